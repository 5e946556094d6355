//! Errors returned by the HTTP client.

use core::fmt;

use crate::network::error::Error as NetworkError;

/// Errors returned by [`Client`](super::Client) and [`Response`](super::Response).
///
/// None of these are retried internally. By the time one reaches the caller
/// the socket involved has already been closed.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    /// The URL could not be split into scheme, host and path, or its port is
    /// not a number.
    InvalidUrl,
    /// The URL scheme is not `http`.
    UnsupportedProtocol,
    /// Resolving, connecting, writing or reading failed at the socket layer.
    Network(NetworkError),
    /// The response uses `Transfer-Encoding: chunked`.
    UnsupportedEncoding,
    /// A second redirect was offered after the budget was spent.
    TooManyRedirects,
    /// The status line is missing or its code is not a number.
    InvalidStatusLine,
    /// A response header line has no `:` or is not valid UTF-8.
    InvalidHeader,
    /// The body is not valid UTF-8 or not valid JSON for the requested type.
    Decode,
    /// The body was accessed after the response was closed.
    Closed,
    /// A raw body and a JSON payload were both supplied.
    ConflictingBody,
    /// A fixed-capacity buffer (header table, line, body) was exceeded.
    Overflow,
}

impl From<NetworkError> for Error {
    fn from(err: NetworkError) -> Self {
        Error::Network(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidUrl => f.write_str("malformed URL"),
            Error::UnsupportedProtocol => f.write_str("unsupported protocol"),
            Error::Network(err) => write!(f, "transport failure: {err}"),
            Error::UnsupportedEncoding => f.write_str("unsupported transfer encoding: chunked"),
            Error::TooManyRedirects => f.write_str("too many redirects"),
            Error::InvalidStatusLine => f.write_str("malformed status line"),
            Error::InvalidHeader => f.write_str("malformed header line"),
            Error::Decode => f.write_str("body decode failed"),
            Error::Closed => f.write_str("response already closed"),
            Error::ConflictingBody => f.write_str("both a raw body and a JSON payload were given"),
            Error::Overflow => f.write_str("buffer capacity exceeded"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::InvalidUrl => defmt::write!(f, "InvalidUrl"),
            Error::UnsupportedProtocol => defmt::write!(f, "UnsupportedProtocol"),
            Error::Network(err) => defmt::write!(f, "Network({})", err),
            Error::UnsupportedEncoding => defmt::write!(f, "UnsupportedEncoding"),
            Error::TooManyRedirects => defmt::write!(f, "TooManyRedirects"),
            Error::InvalidStatusLine => defmt::write!(f, "InvalidStatusLine"),
            Error::InvalidHeader => defmt::write!(f, "InvalidHeader"),
            Error::Decode => defmt::write!(f, "Decode"),
            Error::Closed => defmt::write!(f, "Closed"),
            Error::ConflictingBody => defmt::write!(f, "ConflictingBody"),
            Error::Overflow => defmt::write!(f, "Overflow"),
        }
    }
}
