use core::mem;
use heapless::{String, Vec};
use serde::Deserialize;

use super::Error;
use super::client::RedirectBudget;
use super::headers::Headers;
use super::line::{LineReader, MAX_LINE_LEN};
use crate::logging::{trace, warning};
use crate::network::Connection;

/// Maximum size of a response body.
pub const MAX_BODY_LEN: usize = 4096;
/// Maximum length of the reason phrase.
pub const MAX_REASON_LEN: usize = 64;
/// Maximum length of a redirect target.
pub const MAX_LOCATION_LEN: usize = 256;

const TRANSFER_ENCODING: &[u8] = b"Transfer-Encoding:";
const LOCATION: &[u8] = b"Location:";

/// Outcome of reading a status line and header block.
#[derive(Debug)]
pub(crate) enum Head {
    /// A terminal response. The body, if any, follows on the stream.
    Final {
        status_code: u16,
        reason: String<MAX_REASON_LEN>,
        headers: Headers,
    },
    /// A redirect was taken. The stream should be closed and the request
    /// sent again to this URL.
    Redirect(String<MAX_LOCATION_LEN>),
}

/// Where header lines go once the client has looked at them.
pub(crate) enum HeaderSink<'h> {
    /// Discard.
    Skip,
    /// Parse into the response header table.
    Table,
    /// Hand each raw line to the caller.
    Handler(&'h mut dyn FnMut(&[u8], &mut Headers)),
}

/// Read the status line and headers from `reader`.
///
/// Stops at the blank line that ends the header block, at end of stream, or
/// at the first `Location:` line of a 3xx response. The caller owns closing
/// the stream on every outcome.
///
/// Header lines longer than [`MAX_LINE_LEN`] are only an error when the
/// sink needs the whole line. Otherwise their prefix is still checked for
/// `Transfer-Encoding:` and `Location:` and the rest is dropped.
pub(crate) fn read_head<C: Connection>(
    reader: &mut LineReader<C>,
    sink: &mut HeaderSink<'_>,
    budget: &mut RedirectBudget,
) -> Result<Head, Error> {
    let mut line: Vec<u8, MAX_LINE_LEN> = Vec::new();
    reader.read_line(&mut line)?;
    let (status_code, reason) = parse_status_line(&line)?;
    trace!("status {}", status_code);

    let mut headers = Headers::new();
    loop {
        let (n, truncated) = reader.read_line_truncated(&mut line)?;
        if n == 0 || line[..] == *b"\r\n" || line[..] == *b"\n" {
            break;
        }
        if truncated {
            trace!("header line of {} bytes cut to {}", n, MAX_LINE_LEN);
        }

        if line.starts_with(TRANSFER_ENCODING) {
            if find_slice(&line, b"chunked").is_some() {
                warning!("refusing chunked response");
                return Err(Error::UnsupportedEncoding);
            }
        } else if line.starts_with(LOCATION) && (300..=399).contains(&status_code) {
            budget.take()?;
            if truncated {
                return Err(Error::Overflow);
            }
            let target = core::str::from_utf8(&line[LOCATION.len()..])
                .map_err(|_| Error::InvalidHeader)?
                .trim();
            let location = String::try_from(target).map_err(|_| Error::Overflow)?;
            return Ok(Head::Redirect(location));
        }

        match sink {
            HeaderSink::Skip => {}
            _ if truncated => return Err(Error::Overflow),
            HeaderSink::Table => parse_header_line(&line, &mut headers)?,
            HeaderSink::Handler(handler) => (**handler)(&line, &mut headers),
        }
    }

    Ok(Head::Final {
        status_code,
        reason,
        headers,
    })
}

/// Parse `HTTP/1.x <code> [reason]`.
///
/// Only the code is checked. The version field is not interpreted, so
/// HTTP/1.1 servers are accepted.
fn parse_status_line(line: &[u8]) -> Result<(u16, String<MAX_REASON_LEN>), Error> {
    let text = core::str::from_utf8(line).map_err(|_| Error::InvalidStatusLine)?;
    let (_version, rest) = text
        .trim_start()
        .split_once(|c: char| c.is_ascii_whitespace())
        .ok_or(Error::InvalidStatusLine)?;
    let rest = rest.trim_start();
    let (code, reason) = match rest.split_once(|c: char| c.is_ascii_whitespace()) {
        Some((code, reason)) => (code, reason.trim()),
        None => (rest.trim_end(), ""),
    };
    let status_code = code.parse::<u16>().map_err(|_| Error::InvalidStatusLine)?;
    let reason = String::try_from(reason).map_err(|_| Error::Overflow)?;
    Ok((status_code, reason))
}

/// Store `Name: value` under the literal name with the value trimmed.
fn parse_header_line(line: &[u8], headers: &mut Headers) -> Result<(), Error> {
    let text = core::str::from_utf8(line).map_err(|_| Error::InvalidHeader)?;
    let (name, value) = text.split_once(':').ok_or(Error::InvalidHeader)?;
    headers.insert(name, value.trim())
}

/// Finds the first occurrence of a slice in another slice and returns its starting position.
fn find_slice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

#[derive(Debug)]
enum BodyState<C: Connection> {
    /// The stream is still open and nothing has been read past the headers.
    Open(LineReader<C>),
    /// The body has been read and the stream closed.
    Cached(Vec<u8, MAX_BODY_LEN>),
    /// Closed by the caller, or a body read failed.
    Closed,
}

/// A response to a request sent by [`Client`](super::Client).
///
/// The response owns the connection until the body is read or the response
/// is closed. The body is read lazily: the first call to [`content`],
/// [`text`] or [`json`] reads the rest of the stream, caches it and closes
/// the connection, whether or not the read succeeded. Dropping an unread
/// response closes the connection.
///
/// [`content`]: Response::content
/// [`text`]: Response::text
/// [`json`]: Response::json
#[derive(Debug)]
pub struct Response<C: Connection> {
    /// Status code from the status line.
    pub status_code: u16,
    /// Reason phrase, possibly empty.
    pub reason: String<MAX_REASON_LEN>,
    /// Response headers. Empty unless header parsing was requested.
    pub headers: Headers,
    body: BodyState<C>,
}

impl<C: Connection> Response<C> {
    pub(crate) fn new(
        reader: LineReader<C>,
        status_code: u16,
        reason: String<MAX_REASON_LEN>,
        headers: Headers,
    ) -> Self {
        Self {
            status_code,
            reason,
            headers,
            body: BodyState::Open(reader),
        }
    }

    /// The body bytes.
    ///
    /// Reads and caches the body on first use. Fails with [`Error::Closed`]
    /// after [`close`](Response::close) or after a failed first read.
    pub fn content(&mut self) -> Result<&[u8], Error> {
        match mem::replace(&mut self.body, BodyState::Closed) {
            BodyState::Open(reader) => self.body = BodyState::Cached(read_body(reader)?),
            other => self.body = other,
        }
        match &self.body {
            BodyState::Cached(body) => Ok(body.as_slice()),
            _ => Err(Error::Closed),
        }
    }

    /// The body decoded as UTF-8.
    pub fn text(&mut self) -> Result<&str, Error> {
        core::str::from_utf8(self.content()?).map_err(|_| Error::Decode)
    }

    /// The body decoded as JSON.
    ///
    /// `T` may borrow from the cached body.
    pub fn json<'a, T: Deserialize<'a>>(&'a mut self) -> Result<T, Error> {
        let (value, _) = serde_json_core::from_slice(self.content()?).map_err(|_| Error::Decode)?;
        Ok(value)
    }

    /// Release the connection and drop any cached body.
    ///
    /// Later body access fails with [`Error::Closed`]. Closing twice is a
    /// no-op.
    pub fn close(&mut self) -> Result<(), Error> {
        match mem::replace(&mut self.body, BodyState::Closed) {
            BodyState::Open(reader) => reader.close(),
            _ => Ok(()),
        }
    }
}

impl<C: Connection> Drop for Response<C> {
    fn drop(&mut self) {
        if let Err(err) = self.close() {
            warning!("closing dropped response failed: {}", err);
        }
    }
}

/// Read the rest of the stream, then close it regardless of the outcome.
fn read_body<C: Connection>(mut reader: LineReader<C>) -> Result<Vec<u8, MAX_BODY_LEN>, Error> {
    let mut body = Vec::new();
    let read = reader.read_to_end(&mut body);
    if let Err(err) = reader.close() {
        warning!("closing response stream failed: {}", err);
    }
    read?;
    Ok(body)
}
