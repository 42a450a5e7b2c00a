//! A network abstraction layer for embedded systems
//!
//! The asset client never opens sockets itself. Instead it is generic over a
//! [`Connect`] implementation supplied by the device: a smoltcp socket, an
//! AT-command modem, a TLS session wrapping either of those, or the
//! [`tcp::TcpNetwork`] adapter on hosted targets.
//!

#![allow(missing_docs)]
#![deny(unsafe_code)]

/// Common error types for network operations
pub mod error;

/// Application layer protocols (HTTP)
pub mod application;

/// `std::net` transport
#[cfg(feature = "std")]
pub mod tcp;

/// Re-exports of common traits
pub mod prelude {
    pub use super::{Close, Connect, Connection, Read, Write};
}

pub trait Read {
    /// Associated error type
    type Error: core::fmt::Debug;
    /// Read data from the connection
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;
}

pub trait Write {
    /// Associated error type
    type Error: core::fmt::Debug;
    /// Write data to the connection
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error>;
    /// Flush the write buffer
    fn flush(&mut self) -> Result<(), Self::Error>;

    /// Write the whole buffer, retrying short writes
    fn write_all(&mut self, mut buf: &[u8]) -> Result<(), WriteAllError<Self::Error>> {
        while !buf.is_empty() {
            match self.write(buf) {
                Ok(0) => return Err(WriteAllError::WriteZero),
                Ok(n) => buf = &buf[n..],
                Err(e) => return Err(WriteAllError::Other(e)),
            }
        }
        Ok(())
    }
}

/// Error returned by [`Write::write_all`]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum WriteAllError<E> {
    /// The connection accepted zero bytes
    WriteZero,
    /// The underlying write failed
    Other(E),
}

pub trait Close {
    /// Associated error type
    type Error: core::fmt::Debug;
    /// Close the connection
    fn close(self) -> Result<(), Self::Error>;
}

/// A synchronous connection
pub trait Connection: Read + Write + Close {}

/// A synchronous connector (client)
pub trait Connect {
    /// Associated connection type
    type Connection: Connection;
    /// Associated error type, reported to callers as a [`error::Error`]
    type Error: core::fmt::Debug + Into<error::Error>;
    /// Open a connection to `remote`, given as `host:port`
    fn connect(&mut self, remote: &str) -> Result<Self::Connection, Self::Error>;
}
