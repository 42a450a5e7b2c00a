//! [`Connect`] over `std::net::TcpStream`.
//!
//! Plain TCP only. An `https://` endpoint needs a transport that wraps the
//! stream in TLS before handing it to the asset client.

use super::error::Error;
use super::{Close, Connect, Connection, Read, Write};
use std::io::{ErrorKind, Read as StdRead, Write as StdWrite};
use std::net::{Shutdown, TcpStream};
use std::time::Duration;

/// Default read/write timeout applied to every connection.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Opens one [`TcpConnection`] per call to [`Connect::connect`].
#[derive(Debug, Clone)]
pub struct TcpNetwork {
    timeout: Option<Duration>,
}

impl TcpNetwork {
    /// Creates a connector using [`DEFAULT_TIMEOUT`].
    pub fn new() -> Self {
        Self {
            timeout: Some(DEFAULT_TIMEOUT),
        }
    }

    /// Overrides the read/write timeout; `None` blocks indefinitely.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for TcpNetwork {
    fn default() -> Self {
        Self::new()
    }
}

impl Connect for TcpNetwork {
    type Connection = TcpConnection;
    type Error = Error;

    fn connect(&mut self, remote: &str) -> Result<Self::Connection, Self::Error> {
        let stream = TcpStream::connect(remote).map_err(|e| match e.kind() {
            ErrorKind::ConnectionRefused => Error::ConnectionRefused,
            ErrorKind::TimedOut => Error::Timeout,
            ErrorKind::InvalidInput | ErrorKind::NotFound => Error::InvalidAddress,
            _ => Error::NotOpen,
        })?;
        stream
            .set_read_timeout(self.timeout)
            .map_err(|_| Error::NotOpen)?;
        stream
            .set_write_timeout(self.timeout)
            .map_err(|_| Error::NotOpen)?;
        Ok(TcpConnection { stream })
    }
}

/// A connected TCP stream.
#[derive(Debug)]
pub struct TcpConnection {
    stream: TcpStream,
}

impl Read for TcpConnection {
    type Error = Error;
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        self.stream.read(buf).map_err(|e| match e.kind() {
            ErrorKind::WouldBlock | ErrorKind::TimedOut => Error::Timeout,
            _ => Error::ReadError,
        })
    }
}

impl Write for TcpConnection {
    type Error = Error;
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        self.stream.write(buf).map_err(|_| Error::WriteError)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.stream.flush().map_err(|_| Error::WriteError)
    }
}

impl Close for TcpConnection {
    type Error = Error;
    fn close(self) -> Result<(), Self::Error> {
        match self.stream.shutdown(Shutdown::Both) {
            Ok(()) => Ok(()),
            // The server already hung up after `Connection: close`.
            Err(e) if e.kind() == ErrorKind::NotConnected => Ok(()),
            Err(_) => Err(Error::ConnectionClosed),
        }
    }
}

impl Connection for TcpConnection {}
