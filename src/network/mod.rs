//! A network abstraction layer for embedded systems
//!
//! This module provides the small set of traits the HTTP client is written
//! against. A platform implements them once for its socket stack (smoltcp,
//! an AT-command modem, `std::net`, ...) and every protocol client above
//! works unchanged.
//!

#![allow(missing_docs)]
#![deny(unsafe_code)]

/// Common error types for network operations
pub mod error;

/// Application layer protocol clients
pub mod application;

/// WiFi link bring-up over an AT-command co-processor
pub mod wifi;

/// `std::net` transport
#[cfg(feature = "std")]
pub mod tcp;

/// Re-exports of common traits
pub mod prelude {
    pub use super::{Close, Connect, Connection, Read, Write};
}

// Core synchronous traits
pub trait Read {
    /// Associated error type
    type Error: core::fmt::Debug;
    /// Read data from the connection.
    ///
    /// Blocks until at least one byte is available. `Ok(0)` means the peer
    /// closed the stream.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;
}

pub trait Write {
    /// Associated error type
    type Error: core::fmt::Debug;
    /// Write data to the connection
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error>;
    /// Flush the write buffer
    fn flush(&mut self) -> Result<(), Self::Error>;
}

pub trait Close {
    /// Associated error type
    type Error: core::fmt::Debug;
    /// Close the connection
    fn close(self) -> Result<(), Self::Error>;
}

/// A synchronous connection
pub trait Connection: Read + Write + Close {}

/// A synchronous connector (client).
///
/// This is the transport provider: it turns a host name into an address and
/// an address into an open [`Connection`]. Both calls block.
pub trait Connect {
    /// Associated connection type
    type Connection: Connection;
    /// Resolved remote address
    type Address;
    /// Associated error type
    type Error: core::fmt::Debug;
    /// Resolve `host` and `port` to a connectable address.
    ///
    /// Only the first candidate is returned. Callers do not fall back to
    /// later candidates when it turns out to be unreachable.
    fn resolve(&mut self, host: &str, port: u16) -> Result<Self::Address, Self::Error>;
    /// Open a connection
    fn connect(&mut self, remote: &Self::Address) -> Result<Self::Connection, Self::Error>;
}

/// Write the whole buffer, looping over short writes.
///
/// A write that accepts zero bytes is reported as [`error::Error::WriteError`]
/// rather than spinning forever.
pub fn write_all<W: Write>(writer: &mut W, mut buf: &[u8]) -> Result<(), error::Error> {
    while !buf.is_empty() {
        match writer.write(buf) {
            Ok(0) => return Err(error::Error::WriteError),
            Ok(n) => buf = &buf[n..],
            Err(_) => return Err(error::Error::WriteError),
        }
    }
    Ok(())
}
