//! # liveintersect - LiveIntersect device SDK
//!
//! A small Rust SDK that lets an IoT device register itself with the
//! [LiveIntersect](https://esprida.com/platform/) cloud platform and report
//! telemetry ("metrics") and configuration ("attributes") over HTTP/JSON.
//! It is designed for embedded systems and supports `no_std` environments.
//!
//! ## Features
//!
//! - **Asset client**: registration, asset info, metric and attribute upload
//! - **HTTP Client**: fixed-buffer HTTP/1.1 over any byte stream
//! - **Typed errors**: transport, authentication, validation and server
//!   failures are distinguishable
//! - **Configuration**: `asset.config.json` loading
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! liveintersect = "0.1.0"
//! ```
//!
//! ### Reporting a reading
//!
//! ```rust,no_run
//! use liveintersect::asset::{Asset, post_metric};
//! use liveintersect::config::AssetConfig;
//! # use liveintersect::network::{Close, Connect, Connection, Read, Write};
//! # struct MockNetwork;
//! # struct MockConnection;
//! # impl Connection for MockConnection {}
//! # impl Read for MockConnection {
//! #     type Error = ();
//! #     fn read(&mut self, _buf: &mut [u8]) -> Result<usize, Self::Error> { Ok(0) }
//! # }
//! # impl Write for MockConnection {
//! #     type Error = ();
//! #     fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> { Ok(buf.len()) }
//! #     fn flush(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # impl Close for MockConnection {
//! #     type Error = ();
//! #     fn close(self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # impl Connect for MockNetwork {
//! #     type Connection = MockConnection;
//! #     type Error = liveintersect::network::error::Error;
//! #     fn connect(&mut self, _remote: &str) -> Result<MockConnection, Self::Error> { Ok(MockConnection) }
//! # }
//! # fn main() -> Result<(), liveintersect::asset::Error> {
//!
//! let config: AssetConfig = r#"{
//!     "baseUrl": "http://sandbox.liveintersect.com/",
//!     "apiKey": "my-api-key",
//!     "srNo": "SN-0001",
//!     "assetName": "Boiler room sensor"
//! }"#.parse()?;
//!
//! let mut asset = Asset::new(MockNetwork, config)?;
//! asset.register_asset()?;
//! post_metric(&mut asset, "temp", "45C")?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Platform Support
//!
//! This library is designed to work on:
//! - Embedded microcontrollers (ARM Cortex-M, RISC-V, etc.)
//! - Linux-based IoT devices (Raspberry Pi, etc.)
//! - Any platform supporting Rust's `core` library
//!
//! TLS is left to the transport: for an `https://` base URL, hand the asset a
//! [`network::Connect`] implementation that wraps its sockets in TLS.
//!
//! ## Optional Features
//!
//! - `std`: Enable standard library support: a TCP transport and reading the
//!   config from a file (default: disabled)
//! - `defmt`: Enable defmt logging support for embedded debugging
//! - `log`: Log through the `log` facade

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(missing_docs)]
#![warn(missing_debug_implementations)]

#[macro_use]
mod fmt;

/// Network abstraction layer: transport traits and the HTTP client.
pub mod network;

/// The LiveIntersect asset client and its REST operations.
#[allow(missing_docs)]
pub mod asset;

/// Loading the asset configuration.
#[allow(missing_docs)]
pub mod config;
