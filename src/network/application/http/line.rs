use heapless::Vec;

use super::Error;
use crate::network::Connection;
use crate::network::error::Error as NetworkError;

/// Maximum length of a status or header line, terminator included.
pub const MAX_LINE_LEN: usize = 512;

const READ_CHUNK: usize = 256;

/// Line-oriented reads over a byte-oriented [`Connection`].
///
/// Bytes read past the end of a line stay in the internal buffer, so the
/// body that follows the header block is not lost when the reader is handed
/// over to a [`Response`](super::Response).
#[derive(Debug)]
pub struct LineReader<C: Connection> {
    connection: C,
    buf: [u8; READ_CHUNK],
    start: usize,
    end: usize,
}

impl<C: Connection> LineReader<C> {
    /// Wrap a connection.
    pub fn new(connection: C) -> Self {
        Self {
            connection,
            buf: [0; READ_CHUNK],
            start: 0,
            end: 0,
        }
    }

    /// Read one line, including its `\n` terminator, into `line`.
    ///
    /// Returns the line length. A short line without terminator is returned
    /// at end of stream, and `0` once the stream is exhausted. A line longer
    /// than `N` is consumed and reported as [`Error::Overflow`].
    pub fn read_line<const N: usize>(&mut self, line: &mut Vec<u8, N>) -> Result<usize, Error> {
        match self.read_line_truncated(line)? {
            (_, true) => Err(Error::Overflow),
            (len, false) => Ok(len),
        }
    }

    /// Like [`read_line`](LineReader::read_line), but a line longer than `N`
    /// keeps its first `N` bytes and the rest is discarded up to and
    /// including the `\n`.
    ///
    /// Returns the full length of the line on the wire and whether it was
    /// cut.
    pub fn read_line_truncated<const N: usize>(
        &mut self,
        line: &mut Vec<u8, N>,
    ) -> Result<(usize, bool), Error> {
        line.clear();
        let mut total = 0;
        loop {
            if self.start == self.end && self.fill()? == 0 {
                return Ok((total, total > line.len()));
            }
            let pending = &self.buf[self.start..self.end];
            let (take, done) = match pending.iter().position(|&b| b == b'\n') {
                Some(i) => (i + 1, true),
                None => (pending.len(), false),
            };
            let keep = take.min(N - line.len());
            line.extend_from_slice(&pending[..keep])
                .map_err(|_| Error::Overflow)?;
            total += take;
            self.start += take;
            if done {
                return Ok((total, total > line.len()));
            }
        }
    }

    /// Append everything up to end of stream to `out`.
    pub fn read_to_end<const N: usize>(&mut self, out: &mut Vec<u8, N>) -> Result<usize, Error> {
        loop {
            if self.start < self.end {
                out.extend_from_slice(&self.buf[self.start..self.end])
                    .map_err(|_| Error::Overflow)?;
                self.start = self.end;
            }
            if self.fill()? == 0 {
                return Ok(out.len());
            }
        }
    }

    /// Close the underlying connection, dropping any buffered bytes.
    pub fn close(self) -> Result<(), Error> {
        self.connection
            .close()
            .map_err(|_| Error::Network(NetworkError::NotOpen))
    }

    fn fill(&mut self) -> Result<usize, Error> {
        let n = self
            .connection
            .read(&mut self.buf)
            .map_err(|_| NetworkError::ReadError)?;
        self.start = 0;
        self.end = n;
        Ok(n)
    }
}
