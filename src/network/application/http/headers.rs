use heapless::{String, Vec};

use super::Error;

/// Maximum number of distinct header names held by a [`Headers`] table.
pub const MAX_HEADERS: usize = 24;
/// Maximum length of a header name in bytes.
pub const MAX_HEADER_NAME_LEN: usize = 64;
/// Maximum length of a header value in bytes.
pub const MAX_HEADER_VALUE_LEN: usize = 256;

/// A single header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// Header name, exactly as given or received. Case is preserved.
    pub name: String<MAX_HEADER_NAME_LEN>,
    /// Header value.
    pub value: String<MAX_HEADER_VALUE_LEN>,
}

/// A fixed-capacity map from header name to value.
///
/// Names are compared byte for byte: `Host` and `host` are different keys.
/// Inserting an existing name replaces its value in place. Iteration yields
/// headers in insertion order, but callers should not rely on it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<Header, MAX_HEADERS>,
}

impl Headers {
    /// Create an empty table.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert or replace `name`.
    ///
    /// Fails with [`Error::Overflow`] if the name or value is too long, or if
    /// the table is full and `name` is new.
    pub fn insert(&mut self, name: &str, value: &str) -> Result<(), Error> {
        let value = String::try_from(value).map_err(|_| Error::Overflow)?;
        if let Some(existing) = self.entries.iter_mut().find(|h| h.name.as_str() == name) {
            existing.value = value;
            return Ok(());
        }
        let name = String::try_from(name).map_err(|_| Error::Overflow)?;
        self.entries
            .push(Header { name, value })
            .map_err(|_| Error::Overflow)
    }

    /// Value stored under exactly `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|h| h.name.as_str() == name)
            .map(|h| h.value.as_str())
    }

    /// Whether exactly `name` is present.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Remove `name`, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<String<MAX_HEADER_VALUE_LEN>> {
        let index = self.entries.iter().position(|h| h.name.as_str() == name)?;
        Some(self.entries.swap_remove(index).value)
    }

    /// Iterate over all headers.
    pub fn iter(&self) -> impl Iterator<Item = &Header> {
        self.entries.iter()
    }

    /// Number of headers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
