//! HTTP/1.1 protocol implementation for embedded systems.
//!
//! This module provides a lightweight HTTP client implementation designed specifically
//! for embedded systems and `no_std` environments. It focuses on simplicity,
//! predictable memory usage, and compatibility with resource-constrained devices.
//!
//! # Features
//!
//! - Synchronous request/response model, one request per connection
//! - Fixed-size buffers for predictable memory usage
//! - `Content-Length`, chunked and close-delimited response bodies
//! - Base URL parsing and percent-encoded query strings ([`url`])
//!
//! # Usage
//!
//! ```rust,no_run
//! use liveintersect::network::application::http::{Client, Header, Headers, Method, Request};
//! # use liveintersect::network::Connection;
//! # struct MockConnection;
//! # impl Connection for MockConnection {}
//! # impl liveintersect::network::Read for MockConnection {
//! #     type Error = ();
//! #     fn read(&mut self, _buf: &mut [u8]) -> Result<usize, Self::Error> { Ok(0) }
//! # }
//! # impl liveintersect::network::Write for MockConnection {
//! #     type Error = ();
//! #     fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> { Ok(buf.len()) }
//! #     fn flush(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # impl liveintersect::network::Close for MockConnection {
//! #     type Error = ();
//! #     fn close(self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//!
//! let connection = MockConnection;
//! let mut client = Client::new(connection);
//!
//! let mut headers = Headers::new();
//! headers.push(Header::new("Host", "sandbox.liveintersect.com").unwrap()).unwrap();
//!
//! let request = Request {
//!     method: Method::Get,
//!     path: "/agentapi/assets/42",
//!     headers,
//!     body: None,
//! };
//!
//! // let response = client.request(&request)?;
//! ```

/// HTTP client implementation and supporting types.
pub mod client;

/// Base URL parsing and query-string encoding.
pub mod url;

pub use client::{
    Client, Header, Headers, Method, Request, Response, MAX_HEADERS, MAX_HEADER_NAME_LEN,
    MAX_HEADER_VALUE_LEN, MAX_REQUEST_LEN, MAX_RESPONSE_BODY_LEN, MAX_RESPONSE_HEAD_LEN,
};
pub use url::{Endpoint, Scheme};
