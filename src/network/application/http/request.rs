use base64ct::{Base64, Encoding};
use core::fmt::Write as _;
use heapless::{String, Vec};
use serde::Serialize;

use super::Error;
use super::headers::{Headers, MAX_HEADER_VALUE_LEN};

/// Maximum size of a serialized JSON payload.
pub const MAX_JSON_LEN: usize = 1024;

const MAX_CREDENTIALS_LEN: usize = 128;

/// HTTP request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// `GET`
    Get,
    /// `HEAD`
    Head,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `PATCH`
    Patch,
    /// `DELETE`
    Delete,
    /// `OPTIONS`
    Options,
}

impl Method {
    /// The method token as sent on the request line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Head => "HEAD",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
            Method::Options => "OPTIONS",
        }
    }
}

/// Handler for [`HeaderMode::Custom`].
///
/// Called with each raw header line, terminator included, and the table that
/// ends up in [`Response::headers`](super::Response::headers).
/// A plain `fn` cannot capture state; use
/// [`Client::send_with`](super::Client::send_with) for a closure.
pub type HeaderHandler = fn(line: &[u8], headers: &mut Headers);

/// What to do with response header lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderMode {
    /// Discard them. The response header table stays empty.
    Skip,
    /// Split each line on the first `:` and store the trimmed value under
    /// the name as received.
    #[default]
    Default,
    /// Pass each line to a caller-supplied handler.
    Custom(HeaderHandler),
}

/// Request body.
///
/// A request carries either raw bytes or a JSON payload, never both.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Body<'a> {
    /// No body.
    #[default]
    Empty,
    /// Bytes sent as given.
    Raw(&'a [u8]),
    /// A serialized JSON payload. Sent with `Content-Type: application/json`.
    Json(Vec<u8, MAX_JSON_LEN>),
}

impl Body<'_> {
    /// The bytes that go on the wire after the header block.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Body::Empty => &[],
            Body::Raw(bytes) => bytes,
            Body::Json(bytes) => bytes.as_slice(),
        }
    }

    /// Whether this is a JSON payload.
    pub fn is_json(&self) -> bool {
        matches!(self, Body::Json(_))
    }
}

/// An HTTP request.
///
/// # Examples
///
/// ```rust
/// use iotreq::network::application::http::{Method, Request};
///
/// let request = Request::new(Method::Post, "http://192.168.4.1/api/readings")
///     .with_header("X-Device", "sensor-07")
///     .and_then(|r| r.with_body(b"t=21.5"))
///     .unwrap();
///
/// assert_eq!(request.headers.get("X-Device"), Some("sensor-07"));
/// assert_eq!(request.body.as_bytes(), b"t=21.5");
/// ```
#[derive(Debug, Clone)]
pub struct Request<'a> {
    /// Request method.
    pub method: Method,
    /// Absolute `http://` URL.
    pub url: &'a str,
    /// Headers sent after `Host`, in table order.
    pub headers: Headers,
    /// Request body.
    pub body: Body<'a>,
    /// How response header lines are handled.
    pub header_mode: HeaderMode,
}

impl<'a> Request<'a> {
    /// A request with no headers, no body and default header parsing.
    pub fn new(method: Method, url: &'a str) -> Self {
        Self {
            method,
            url,
            headers: Headers::new(),
            body: Body::Empty,
            header_mode: HeaderMode::Default,
        }
    }

    /// Add or replace a header.
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self, Error> {
        self.headers.insert(name, value)?;
        Ok(self)
    }

    /// Send `body` as is.
    ///
    /// Fails with [`Error::ConflictingBody`] if a JSON payload was already set.
    pub fn with_body(mut self, body: &'a [u8]) -> Result<Self, Error> {
        if self.body.is_json() {
            return Err(Error::ConflictingBody);
        }
        self.body = Body::Raw(body);
        Ok(self)
    }

    /// Serialize `value` as the JSON payload.
    ///
    /// Fails with [`Error::ConflictingBody`] if a raw body was already set,
    /// and with [`Error::Overflow`] if the serialized form does not fit in
    /// [`MAX_JSON_LEN`] bytes.
    pub fn with_json<T: Serialize + ?Sized>(mut self, value: &T) -> Result<Self, Error> {
        if matches!(self.body, Body::Raw(_)) {
            return Err(Error::ConflictingBody);
        }
        let mut buf: Vec<u8, MAX_JSON_LEN> = Vec::new();
        buf.resize_default(MAX_JSON_LEN)
            .map_err(|_| Error::Overflow)?;
        let len = serde_json_core::to_slice(value, &mut buf).map_err(|_| Error::Overflow)?;
        buf.truncate(len);
        self.body = Body::Json(buf);
        Ok(self)
    }

    /// Add an `Authorization: Basic` header for `user` and `password`.
    pub fn with_basic_auth(mut self, user: &str, password: &str) -> Result<Self, Error> {
        let mut credentials: String<MAX_CREDENTIALS_LEN> = String::new();
        write!(credentials, "{user}:{password}").map_err(|_| Error::Overflow)?;

        let mut encoded = [0u8; MAX_CREDENTIALS_LEN.div_ceil(3) * 4];
        let encoded =
            Base64::encode(credentials.as_bytes(), &mut encoded).map_err(|_| Error::Overflow)?;

        let mut value: String<MAX_HEADER_VALUE_LEN> = String::new();
        value.push_str("Basic ").map_err(|_| Error::Overflow)?;
        value.push_str(encoded).map_err(|_| Error::Overflow)?;
        self.headers.insert("Authorization", &value)?;
        Ok(self)
    }

    /// Choose how response header lines are handled.
    pub fn with_header_mode(mut self, mode: HeaderMode) -> Self {
        self.header_mode = mode;
        self
    }
}
