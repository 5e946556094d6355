//! Positional URL splitting.
//!
//! This is not a general URL parser. The URL is split on `/` at most three
//! times into `scheme:`, an empty authority separator, the host and the rest,
//! which is sent verbatim as the request path.

use super::Error;

/// Port used when the URL does not name one.
pub const DEFAULT_PORT: u16 = 80;

/// A URL split into the parts the client needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Url<'a> {
    /// Always `"http"`.
    pub scheme: &'a str,
    /// Host name or address, without the port.
    pub host: &'a str,
    /// Port from `host:port`, or [`DEFAULT_PORT`].
    pub port: u16,
    /// Everything after the third `/`, possibly empty. Has no leading `/`.
    pub path: &'a str,
}

impl<'a> Url<'a> {
    /// Split `url` into scheme, host, port and path.
    ///
    /// `http://host` is accepted and yields an empty path. A string with
    /// fewer than two `/` is [`Error::InvalidUrl`]; any scheme other than
    /// `http` is [`Error::UnsupportedProtocol`].
    pub fn parse(url: &'a str) -> Result<Self, Error> {
        let mut parts = url.splitn(4, '/');
        let proto = parts.next().ok_or(Error::InvalidUrl)?;
        parts.next().ok_or(Error::InvalidUrl)?;
        let authority = parts.next().ok_or(Error::InvalidUrl)?;
        let path = parts.next().unwrap_or("");

        if proto != "http:" {
            return Err(Error::UnsupportedProtocol);
        }

        let (host, port) = match authority.split_once(':') {
            Some((host, port)) => (host, port.parse::<u16>().map_err(|_| Error::InvalidUrl)?),
            None => (authority, DEFAULT_PORT),
        };

        Ok(Self {
            scheme: "http",
            host,
            port,
            path,
        })
    }
}
