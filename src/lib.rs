//! # iotreq - minimal HTTP for IoT devices
//!
//! A small HTTP/1.0 client for devices that talk to the cloud over a raw
//! stream socket. The request is assembled byte by byte, the response is
//! parsed line by line, and the body is only read when the caller asks for
//! it. The library supports `no_std` environments and allocates nothing: every
//! buffer has a fixed capacity.
//!
//! ## Features
//!
//! ### Network
//! - **HTTP Client**: HTTP/1.0 requests with raw or JSON bodies, one followed redirect
//! - **Transport traits**: plug in any socket stack through [`network::Connect`]
//! - **TCP transport**: `std::net` implementation behind the `std` feature
//! - **WiFi bring-up**: AT-command driver for ESP-AT co-processors
//!
//! ### Provisioning
//! - Parse `ssid,password` QR payloads into WiFi credentials
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! iotreq = "0.1.0"
//! ```
//!
//! ### Basic HTTP Client Example
//!
//! ```rust,no_run
//! use iotreq::network::application::http::{Client, Method, Request};
//! # use iotreq::network::{Close, Connect, Connection, Read, Write};
//! # struct Modem;
//! # struct Socket;
//! # impl Read for Socket {
//! #     type Error = ();
//! #     fn read(&mut self, _buf: &mut [u8]) -> Result<usize, Self::Error> { Ok(0) }
//! # }
//! # impl Write for Socket {
//! #     type Error = ();
//! #     fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> { Ok(buf.len()) }
//! #     fn flush(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # impl Close for Socket {
//! #     type Error = ();
//! #     fn close(self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # impl Connection for Socket {}
//! # impl Connect for Modem {
//! #     type Connection = Socket;
//! #     type Address = ();
//! #     type Error = ();
//! #     fn resolve(&mut self, _host: &str, _port: u16) -> Result<(), ()> { Ok(()) }
//! #     fn connect(&mut self, _remote: &()) -> Result<Socket, ()> { Ok(Socket) }
//! # }
//!
//! let mut client = Client::new(Modem);
//!
//! let request = Request::new(Method::Get, "http://example.com/api/data")
//!     .with_header("Accept", "application/json")
//!     .unwrap();
//!
//! let mut response = client.send(&request).unwrap();
//! if response.status_code == 200 {
//!     let _body = response.text().unwrap();
//! }
//! ```
//!
//! ### Bringing the Link Up
//!
//! ```rust,no_run
//! use iotreq::network::wifi::WifiModule;
//! use iotreq::provisioning::Credentials;
//! # struct Uart;
//! # impl iotreq::network::Read for Uart {
//! #     type Error = ();
//! #     fn read(&mut self, _buf: &mut [u8]) -> Result<usize, Self::Error> { Ok(0) }
//! # }
//! # impl iotreq::network::Write for Uart {
//! #     type Error = ();
//! #     fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> { Ok(buf.len()) }
//! #     fn flush(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//!
//! let credentials = Credentials::from_qr_payload("office,hunter2").unwrap();
//! let mut wifi = WifiModule::new(Uart);
//! wifi.init().unwrap();
//! wifi.join(&credentials).unwrap();
//! ```
//!
//! ## Platform Support
//!
//! This library is designed to work on:
//! - Embedded microcontrollers (ARM Cortex-M, RISC-V, etc.)
//! - Linux-based IoT devices (Raspberry Pi, etc.)
//! - Any platform supporting Rust's `core` library
//!
//! ## Optional Features
//!
//! - `std`: Enable the `std::net` transport and `std::error::Error` impls (default: disabled)
//! - `defmt`: Enable defmt logging support for embedded debugging
//! - `log`: Route the same log messages through the `log` facade

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(missing_docs)]
#![warn(missing_debug_implementations)]

mod logging;

/// Network abstraction layer providing the transport traits and protocol clients.
///
/// This module contains the traits a platform implements for its socket
/// stack, the HTTP client built on them, and the WiFi link driver.
pub mod network;

/// WiFi credential provisioning from QR code payloads.
pub mod provisioning;
