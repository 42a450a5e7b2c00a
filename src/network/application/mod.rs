//! # Application Layer Network Protocols
//!
//! The LiveIntersect agent API is plain HTTP/1.1 with JSON bodies, so HTTP is
//! the only application protocol this crate speaks. The client works with any
//! type implementing [`Connection`](crate::network::Connection).

/// HTTP client implementation.
///
/// Provides a simple HTTP/1.1 client suitable for embedded systems,
/// supporting GET and POST methods with custom headers.
pub mod http;
