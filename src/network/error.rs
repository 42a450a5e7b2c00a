//! Common error types for network operations

/// A common error type for network operations.
///
/// This enum defines the errors the transport and the HTTP layer can report.
/// It is designed to be simple and portable for `no_std` environments.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    /// An operation was attempted on a connection that is not open.
    NotOpen,
    /// An error occurred during a write operation.
    WriteError,
    /// An error occurred during a read operation.
    ReadError,
    /// A connection attempt was refused.
    ConnectionRefused,
    /// A timeout occurred.
    Timeout,
    /// The connection was closed.
    ConnectionClosed,
    /// An invalid address was provided.
    InvalidAddress,
    /// The peer sent something that is not valid HTTP.
    ProtocolError,
    /// A request or response did not fit its fixed-size buffer.
    BufferFull,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotOpen => write!(f, "connection not open"),
            Self::WriteError => write!(f, "write failed"),
            Self::ReadError => write!(f, "read failed"),
            Self::ConnectionRefused => write!(f, "connection refused"),
            Self::Timeout => write!(f, "timed out"),
            Self::ConnectionClosed => write!(f, "connection closed"),
            Self::InvalidAddress => write!(f, "invalid address"),
            Self::ProtocolError => write!(f, "malformed HTTP response"),
            Self::BufferFull => write!(f, "buffer full"),
        }
    }
}

impl core::error::Error for Error {}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::NotOpen => defmt::write!(f, "NotOpen"),
            Error::WriteError => defmt::write!(f, "WriteError"),
            Error::ReadError => defmt::write!(f, "ReadError"),
            Error::ConnectionRefused => defmt::write!(f, "ConnectionRefused"),
            Error::Timeout => defmt::write!(f, "Timeout"),
            Error::ConnectionClosed => defmt::write!(f, "ConnectionClosed"),
            Error::InvalidAddress => defmt::write!(f, "InvalidAddress"),
            Error::ProtocolError => defmt::write!(f, "ProtocolError"),
            Error::BufferFull => defmt::write!(f, "BufferFull"),
        }
    }
}
