use core::fmt::Write as _;
use heapless::String;

use super::Error;
use super::line::LineReader;
use super::headers::Headers;
use super::request::{HeaderMode, Method, Request};
use super::response::{Head, HeaderSink, MAX_LOCATION_LEN, Response, read_head};
use super::url::Url;
use crate::logging::{debug, warning};
use crate::network::error::Error as NetworkError;
use crate::network::{Close, Connect, Write, write_all};

/// Maximum size of the request line plus header block.
pub const MAX_REQUEST_HEAD_LEN: usize = 2048;

/// Number of redirects a single [`Client::send`] call may follow.
pub const REDIRECT_LIMIT: u8 = 1;

/// Redirect hops left for one top-level request.
///
/// A fresh budget is created by every [`Client::send`] call and lives only
/// for that call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RedirectBudget {
    remaining: u8,
}

impl RedirectBudget {
    /// A budget of [`REDIRECT_LIMIT`] hops.
    pub const fn new() -> Self {
        Self {
            remaining: REDIRECT_LIMIT,
        }
    }

    /// Hops left.
    pub fn remaining(&self) -> u8 {
        self.remaining
    }

    /// Spend one hop, or fail with [`Error::TooManyRedirects`] if none are left.
    pub fn take(&mut self) -> Result<(), Error> {
        if self.remaining == 0 {
            return Err(Error::TooManyRedirects);
        }
        self.remaining -= 1;
        Ok(())
    }
}

impl Default for RedirectBudget {
    fn default() -> Self {
        Self::new()
    }
}

/// An HTTP/1.0 client over any [`Connect`] transport.
///
/// Every request opens a fresh connection and sends `Connection: close`.
/// Nothing is kept between requests apart from the transport itself.
///
/// # Examples
///
/// ```rust,no_run
/// use iotreq::network::application::http::Client;
/// # use iotreq::network::{Close, Connect, Connection, Read, Write};
/// # struct Modem;
/// # struct Socket;
/// # impl Read for Socket {
/// #     type Error = ();
/// #     fn read(&mut self, _buf: &mut [u8]) -> Result<usize, Self::Error> { Ok(0) }
/// # }
/// # impl Write for Socket {
/// #     type Error = ();
/// #     fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> { Ok(buf.len()) }
/// #     fn flush(&mut self) -> Result<(), Self::Error> { Ok(()) }
/// # }
/// # impl Close for Socket {
/// #     type Error = ();
/// #     fn close(self) -> Result<(), Self::Error> { Ok(()) }
/// # }
/// # impl Connection for Socket {}
/// # impl Connect for Modem {
/// #     type Connection = Socket;
/// #     type Address = ();
/// #     type Error = ();
/// #     fn resolve(&mut self, _host: &str, _port: u16) -> Result<(), ()> { Ok(()) }
/// #     fn connect(&mut self, _remote: &()) -> Result<Socket, ()> { Ok(Socket) }
/// # }
///
/// let mut client = Client::new(Modem);
/// let mut response = client.get("http://192.168.4.1/status").unwrap();
/// if response.status_code == 200 {
///     let _body = response.text().unwrap();
/// }
/// ```
#[derive(Debug)]
pub struct Client<N: Connect> {
    network: N,
}

impl<N: Connect> Client<N> {
    /// Create a client that opens connections through `network`.
    pub fn new(network: N) -> Self {
        Self { network }
    }

    /// The transport.
    pub fn network(&self) -> &N {
        &self.network
    }

    /// Give the transport back.
    pub fn into_inner(self) -> N {
        self.network
    }

    /// Send `request` and read the response head.
    ///
    /// One redirect is followed: a 3xx response with a `Location:` header
    /// closes the connection and sends the same request to the new URL. A
    /// second redirect fails with [`Error::TooManyRedirects`].
    pub fn send(&mut self, request: &Request) -> Result<Response<N::Connection>, Error> {
        match request.header_mode {
            HeaderMode::Skip => self.exchange(request, &mut HeaderSink::Skip),
            HeaderMode::Default => self.exchange(request, &mut HeaderSink::Table),
            HeaderMode::Custom(mut handler) => {
                self.exchange(request, &mut HeaderSink::Handler(&mut handler))
            }
        }
    }

    /// Like [`send`](Client::send), but every response header line goes to
    /// `handler`, whatever [`Request::header_mode`] says.
    ///
    /// Unlike [`HeaderMode::Custom`], the handler may capture state. Lines
    /// are passed raw, terminator included. A line longer than
    /// [`MAX_LINE_LEN`](super::MAX_LINE_LEN) fails with [`Error::Overflow`].
    ///
    /// ```rust,no_run
    /// # use iotreq::network::application::http::{Client, Headers, Method, Request};
    /// # fn demo<N: iotreq::network::Connect>(client: &mut Client<N>) {
    /// let mut cookies = 0;
    /// let request = Request::new(Method::Get, "http://192.168.4.1/login");
    /// let response = client.send_with(&request, &mut |line: &[u8], _: &mut Headers| {
    ///     if line.starts_with(b"Set-Cookie:") {
    ///         cookies += 1;
    ///     }
    /// });
    /// # drop(response);
    /// # }
    /// ```
    pub fn send_with(
        &mut self,
        request: &Request,
        handler: &mut dyn FnMut(&[u8], &mut Headers),
    ) -> Result<Response<N::Connection>, Error> {
        self.exchange(request, &mut HeaderSink::Handler(handler))
    }

    fn exchange(
        &mut self,
        request: &Request,
        sink: &mut HeaderSink<'_>,
    ) -> Result<Response<N::Connection>, Error> {
        let mut budget = RedirectBudget::new();
        let mut redirect: Option<String<MAX_LOCATION_LEN>> = None;

        loop {
            let url = match &redirect {
                Some(location) => location.as_str(),
                None => request.url,
            };
            let target = Url::parse(url)?;
            let mut reader = LineReader::new(self.open(&target, request)?);

            match read_head(&mut reader, sink, &mut budget) {
                Ok(Head::Final {
                    status_code,
                    reason,
                    headers,
                }) => return Ok(Response::new(reader, status_code, reason, headers)),
                Ok(Head::Redirect(location)) => {
                    debug!("redirected to {}", location.as_str());
                    if let Err(err) = reader.close() {
                        warning!("closing redirected connection failed: {}", err);
                    }
                    redirect = Some(location);
                }
                Err(err) => {
                    if let Err(close_err) = reader.close() {
                        warning!("closing failed connection failed: {}", close_err);
                    }
                    return Err(err);
                }
            }
        }
    }

    /// `GET url`
    pub fn get(&mut self, url: &str) -> Result<Response<N::Connection>, Error> {
        self.send(&Request::new(Method::Get, url))
    }

    /// `HEAD url`
    pub fn head(&mut self, url: &str) -> Result<Response<N::Connection>, Error> {
        self.send(&Request::new(Method::Head, url))
    }

    /// `DELETE url`
    pub fn delete(&mut self, url: &str) -> Result<Response<N::Connection>, Error> {
        self.send(&Request::new(Method::Delete, url))
    }

    /// `POST url` with a raw body.
    pub fn post(&mut self, url: &str, body: &[u8]) -> Result<Response<N::Connection>, Error> {
        self.send(&Request::new(Method::Post, url).with_body(body)?)
    }

    /// `PUT url` with a raw body.
    pub fn put(&mut self, url: &str, body: &[u8]) -> Result<Response<N::Connection>, Error> {
        self.send(&Request::new(Method::Put, url).with_body(body)?)
    }

    /// `PATCH url` with a raw body.
    pub fn patch(&mut self, url: &str, body: &[u8]) -> Result<Response<N::Connection>, Error> {
        self.send(&Request::new(Method::Patch, url).with_body(body)?)
    }

    /// Resolve, connect and write the request. The connection is closed
    /// again if the write fails.
    fn open(&mut self, url: &Url, request: &Request) -> Result<N::Connection, Error> {
        debug!("connecting to {}:{}", url.host, url.port);
        let address = self
            .network
            .resolve(url.host, url.port)
            .map_err(|_| NetworkError::InvalidAddress)?;
        let mut connection = self
            .network
            .connect(&address)
            .map_err(|_| NetworkError::ConnectionRefused)?;

        if let Err(err) = write_request(&mut connection, url, request) {
            if connection.close().is_err() {
                warning!("closing connection after failed write failed");
            }
            return Err(err);
        }
        Ok(connection)
    }
}

/// Serialize `request` for `url` as HTTP/1.0 and write it to `writer`.
///
/// The header block is, in order: `Host` (unless the request has a header
/// named exactly `Host`), the request headers, `Content-Type` for JSON
/// payloads, `Content-Length` for non-empty bodies, and `Connection: close`.
pub fn write_request<W: Write>(writer: &mut W, url: &Url, request: &Request) -> Result<(), Error> {
    let mut head: String<MAX_REQUEST_HEAD_LEN> = String::new();
    let body = request.body.as_bytes();

    write!(head, "{} /{} HTTP/1.0\r\n", request.method.as_str(), url.path)
        .map_err(|_| Error::Overflow)?;
    if !request.headers.contains("Host") {
        write!(head, "Host: {}\r\n", url.host).map_err(|_| Error::Overflow)?;
    }
    for header in request.headers.iter() {
        write!(head, "{}: {}\r\n", header.name, header.value).map_err(|_| Error::Overflow)?;
    }
    if request.body.is_json() {
        head.push_str("Content-Type: application/json\r\n")
            .map_err(|_| Error::Overflow)?;
    }
    if !body.is_empty() {
        write!(head, "Content-Length: {}\r\n", body.len()).map_err(|_| Error::Overflow)?;
    }
    head.push_str("Connection: close\r\n\r\n")
        .map_err(|_| Error::Overflow)?;

    write_all(writer, head.as_bytes())?;
    if !body.is_empty() {
        write_all(writer, body)?;
    }
    writer.flush().map_err(|_| NetworkError::WriteError)?;
    Ok(())
}
