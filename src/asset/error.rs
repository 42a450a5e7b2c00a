//! Error type returned by every asset operation

use crate::config;
use crate::network::error::Error as NetworkError;

/// Why an asset operation failed.
///
/// API errors carry the HTTP status the platform answered with, so callers
/// can tell a bad API key apart from a rejected payload or a server outage.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    /// The transport failed or the response was not valid HTTP.
    Network(NetworkError),
    /// The platform rejected the credentials (401, 403).
    Unauthorized(u16),
    /// The platform rejected the request itself (any other 4xx).
    Rejected(u16),
    /// The platform failed to handle the request (5xx).
    Server(u16),
    /// A non-2xx status outside the ranges above.
    UnexpectedStatus(u16),
    /// A request body could not be serialized.
    Encode,
    /// A response body could not be parsed into the expected type.
    Decode,
    /// A value did not fit into its fixed-capacity buffer.
    BufferOverflow,
    /// The configured base URL is not a valid `http(s)://` URL.
    InvalidUrl,
    /// The operation needs an asset id, but the asset has not registered yet.
    NotRegistered,
    /// The asset configuration could not be loaded.
    Config(config::Error),
}

impl Error {
    /// Maps a non-2xx status to its error kind.
    pub fn from_status(status: u16) -> Self {
        match status {
            401 | 403 => Error::Unauthorized(status),
            400..=499 => Error::Rejected(status),
            500..=599 => Error::Server(status),
            _ => Error::UnexpectedStatus(status),
        }
    }

    /// The HTTP status of an API error.
    pub fn status(&self) -> Option<u16> {
        match *self {
            Error::Unauthorized(s)
            | Error::Rejected(s)
            | Error::Server(s)
            | Error::UnexpectedStatus(s) => Some(s),
            _ => None,
        }
    }

    /// `true` when the platform answered, but not with a 2xx status.
    pub fn is_api_status(&self) -> bool {
        self.status().is_some()
    }
}

impl From<NetworkError> for Error {
    fn from(e: NetworkError) -> Self {
        match e {
            NetworkError::BufferFull => Error::BufferOverflow,
            NetworkError::InvalidAddress => Error::InvalidUrl,
            other => Error::Network(other),
        }
    }
}

impl From<config::Error> for Error {
    fn from(e: config::Error) -> Self {
        Error::Config(e)
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Network(e) => write!(f, "network error: {}", e),
            Self::Unauthorized(s) => write!(f, "unauthorized (HTTP {})", s),
            Self::Rejected(s) => write!(f, "request rejected (HTTP {})", s),
            Self::Server(s) => write!(f, "server error (HTTP {})", s),
            Self::UnexpectedStatus(s) => write!(f, "unexpected HTTP status {}", s),
            Self::Encode => write!(f, "failed to encode request body"),
            Self::Decode => write!(f, "failed to decode response body"),
            Self::BufferOverflow => write!(f, "buffer overflow"),
            Self::InvalidUrl => write!(f, "invalid base URL"),
            Self::NotRegistered => write!(f, "asset is not registered"),
            Self::Config(e) => write!(f, "config error: {}", e),
        }
    }
}

impl core::error::Error for Error {}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::Network(e) => defmt::write!(f, "Network({})", e),
            Error::Unauthorized(s) => defmt::write!(f, "Unauthorized({})", s),
            Error::Rejected(s) => defmt::write!(f, "Rejected({})", s),
            Error::Server(s) => defmt::write!(f, "Server({})", s),
            Error::UnexpectedStatus(s) => defmt::write!(f, "UnexpectedStatus({})", s),
            Error::Encode => defmt::write!(f, "Encode"),
            Error::Decode => defmt::write!(f, "Decode"),
            Error::BufferOverflow => defmt::write!(f, "BufferOverflow"),
            Error::InvalidUrl => defmt::write!(f, "InvalidUrl"),
            Error::NotRegistered => defmt::write!(f, "NotRegistered"),
            Error::Config(e) => defmt::write!(f, "Config({})", e),
        }
    }
}
