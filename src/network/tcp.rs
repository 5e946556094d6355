//! `std::net` transport for hosts with an operating system.

use std::io::{ErrorKind, Read as _, Write as _};
use std::net::{Shutdown, SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

use super::error::Error;
use super::{Close, Connect, Connection, Read, Write};

/// Opens [`TcpConnection`]s through the operating system's resolver and
/// socket stack.
#[derive(Debug, Clone, Default)]
pub struct TcpNetwork {
    read_timeout: Option<Duration>,
}

impl TcpNetwork {
    /// A transport with blocking reads that never time out.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail reads that wait longer than `timeout`.
    ///
    /// [`TcpConnection::read`] reports these as [`Error::Timeout`]. The HTTP
    /// client does not look inside transport errors, so a timed-out response
    /// reaches its caller as `http::Error::Network(Error::ReadError)`.
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = Some(timeout);
        self
    }
}

impl Connect for TcpNetwork {
    type Connection = TcpConnection;
    type Address = SocketAddr;
    type Error = Error;

    fn resolve(&mut self, host: &str, port: u16) -> Result<Self::Address, Self::Error> {
        (host, port)
            .to_socket_addrs()
            .map_err(|_| Error::InvalidAddress)?
            .next()
            .ok_or(Error::InvalidAddress)
    }

    fn connect(&mut self, remote: &Self::Address) -> Result<Self::Connection, Self::Error> {
        let stream = TcpStream::connect(remote).map_err(|_| Error::ConnectionRefused)?;
        stream
            .set_read_timeout(self.read_timeout)
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
            // The peer got there first.
            Err(e) if e.kind() == ErrorKind::NotConnected => Ok(()),
            Err(_) => Err(Error::NotOpen),
        }
    }
}

impl Connection for TcpConnection {}
