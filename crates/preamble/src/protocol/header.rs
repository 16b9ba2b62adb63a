//! Insertion-ordered header storage over a shared character buffer.
//!
//! A [`HeaderTable`] never holds header text. Each [`HeaderEntry`] records the
//! offsets of its name and value in the parse buffer together with
//! case-insensitive hashes of both, and the buffer itself belongs to the
//! message the table is part of. Reading header text goes through a
//! [`Headers`] view which pairs the table with that buffer.
//!
//! Duplicate names are kept as separate entries in the order they arrived.

use http::{HeaderMap, HeaderName, HeaderValue};

use crate::pool::Pooled;
use crate::protocol::{ParseError, Span};

/// Hashes `text` as if it were ASCII-lowercased.
///
/// `Content-Type` and `content-type` produce the same value.
pub(crate) fn hash_lowercase(text: &str) -> u32 {
    text.bytes().fold(0u32, |hash, b| hash.wrapping_mul(31).wrapping_add(u32::from(b.to_ascii_lowercase())))
}

/// Location and hashes of one header line.
///
/// Invariant: `name.start <= name.end <= value.start <= value.end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderEntry {
    name_hash: u32,
    value_hash: u32,
    name: Span,
    value: Span,
}

impl HeaderEntry {
    pub(crate) fn new(name_hash: u32, value_hash: u32, name: Span, value: Span) -> Self {
        debug_assert!(name.end() <= value.start(), "header value starts before the name ends");
        Self { name_hash, value_hash, name, value }
    }

    pub fn name_hash(&self) -> u32 {
        self.name_hash
    }

    pub fn value_hash(&self) -> u32 {
        self.value_hash
    }

    pub fn name_span(&self) -> Span {
        self.name
    }

    pub fn value_span(&self) -> Span {
        self.value
    }
}

/// The header entries of one message, in insertion order.
#[derive(Debug)]
pub struct HeaderTable {
    entries: Pooled<Vec<HeaderEntry>>,
}

impl HeaderTable {
    pub(crate) fn new(entries: Pooled<Vec<HeaderEntry>>) -> Self {
        Self { entries }
    }

    /// Appends an entry; same-named entries already present are kept.
    pub(crate) fn put(&mut self, entry: HeaderEntry) {
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[HeaderEntry] {
        &self.entries
    }

    /// Hands the entry storage back to its pool.
    pub fn release(self) {
        drop(self);
    }

    /// Binds the table to the buffer its offsets point into.
    pub fn view<'a>(&'a self, text: &'a str) -> Headers<'a> {
        Headers { text, table: self }
    }
}

/// Read access to a [`HeaderTable`] through its backing buffer.
///
/// All name lookups are case-insensitive.
#[derive(Debug, Clone, Copy)]
pub struct Headers<'a> {
    text: &'a str,
    table: &'a HeaderTable,
}

impl<'a> Headers<'a> {
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns the first value stored under `name`.
    pub fn get(&self, name: &str) -> Option<&'a str> {
        self.get_all(name).next()
    }

    /// Returns every value stored under `name`, in insertion order.
    pub fn get_all<'n>(&self, name: &'n str) -> impl Iterator<Item = &'a str> + use<'a, 'n> {
        let hash = hash_lowercase(name);
        let text = self.text;
        let table = self.table;
        table
            .entries()
            .iter()
            .filter(move |entry| entry.name_hash == hash && entry.name.as_str(text).eq_ignore_ascii_case(name))
            .map(move |entry| entry.value.as_str(text))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterates `(name, value)` pairs with the names as they appeared on the wire.
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a str)> + use<'a> {
        let text = self.text;
        let table = self.table;
        table.entries().iter().map(move |entry| (entry.name.as_str(text), entry.value.as_str(text)))
    }

    pub fn names(&self) -> impl Iterator<Item = &'a str> + use<'a> {
        self.iter().map(|(name, _)| name)
    }

    /// Copies the headers into an [`http::HeaderMap`], keeping duplicates.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidHeader`] when a name or value is not
    /// acceptable to the `http` crate.
    pub fn to_header_map(&self) -> Result<HeaderMap, ParseError> {
        let mut map = HeaderMap::with_capacity(self.len());
        for (name, value) in self.iter() {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| ParseError::invalid_header(format!("name {name}: {e}")))?;
            let header_value =
                HeaderValue::from_str(value).map_err(|e| ParseError::invalid_header(format!("value of {name}: {e}")))?;
            map.append(header_name, header_value);
        }
        Ok(map)
    }
}
