//! HTTP/1.0 client for embedded systems.
//!
//! This module provides a small HTTP client that speaks HTTP/1.0 directly
//! over a stream socket. It builds the request bytes itself, parses the
//! response status line and headers line by line, follows at most one
//! redirect, and reads the body only when asked for it.
//!
//! # Features
//!
//! - HTTP/1.0 requests with `Connection: close`, one connection per request
//! - Raw or JSON request bodies (`serde` + `serde-json-core`)
//! - Basic authentication
//! - Case-preserving response header table, or a custom per-line handler
//! - Lazy body read with UTF-8 and JSON views
//! - Fixed-size buffers for predictable memory usage
//!
//! Chunked transfer encoding, keep-alive and TLS are not supported. A
//! chunked response is rejected with [`Error::UnsupportedEncoding`] before
//! any of its body is read.
//!
//! # Usage
//!
//! The main entry point is the [`Client`], which works with any transport
//! implementing [`Connect`](crate::network::Connect).
//!
//! ```rust,no_run
//! use iotreq::network::application::http::{Client, HeaderMode, Method, Request};
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
//! #[derive(serde::Serialize)]
//! struct Reading {
//!     deci_celsius: i16,
//! }
//!
//! let mut client = Client::new(Modem);
//! let request = Request::new(Method::Post, "http://example.com/readings")
//!     .with_json(&Reading { deci_celsius: 215 })
//!     .unwrap()
//!     .with_header_mode(HeaderMode::Skip);
//!
//! let mut response = client.send(&request).unwrap();
//! let status = response.status_code;
//! println!("{status} {}", response.text().unwrap());
//! ```

mod error;
mod headers;
mod line;
mod request;
mod response;

/// HTTP client implementation and request serialization.
pub mod client;

/// URL splitting.
pub mod url;

pub use client::{Client, REDIRECT_LIMIT, RedirectBudget, write_request};
pub use error::Error;
pub use headers::{Header, Headers, MAX_HEADER_NAME_LEN, MAX_HEADER_VALUE_LEN, MAX_HEADERS};
pub use line::{LineReader, MAX_LINE_LEN};
pub use request::{Body, HeaderHandler, HeaderMode, MAX_JSON_LEN, Method, Request};
pub use response::{MAX_BODY_LEN, MAX_LOCATION_LEN, MAX_REASON_LEN, Response};
pub use url::Url;
