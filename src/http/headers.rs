//! Case-insensitive header table with an incremental line parser.
//!
//! Names are folded to lowercase on every insert and lookup. A name seen more
//! than once keeps a single entry whose value is every observed value joined
//! with `", "`, in arrival order.
//!
//! [`Headers::parse`] consumes at most one line per call, so the caller keeps
//! feeding it the unconsumed remainder of its buffer until the blank line
//! that ends the block is reported.

use indexmap::IndexMap;

use crate::http::error::ParseError;
use crate::http::find_crlf;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    fields: IndexMap<String, String>,
}

impl Headers {
    pub fn new() -> Self {
        Self {
            fields: IndexMap::new(),
        }
    }

    /// Parses a single header line from the front of `data`.
    ///
    /// Returns the number of bytes consumed and whether the blank line ending
    /// the header block was reached. When `data` holds no complete line,
    /// nothing is consumed and `(0, false)` is returned. On error nothing is
    /// consumed and the table is left untouched.
    ///
    /// # Example
    ///
    /// ```
    /// # use h1frame::http::headers::Headers;
    /// let mut headers = Headers::new();
    /// let data = b"Host: localhost:42069\r\n\r\n";
    ///
    /// let (n, done) = headers.parse(data).unwrap();
    /// assert_eq!((n, done), (23, false));
    ///
    /// let (n, done) = headers.parse(&data[n..]).unwrap();
    /// assert_eq!((n, done), (2, true));
    /// assert_eq!(headers.get("HOST"), Some("localhost:42069"));
    /// ```
    pub fn parse(&mut self, data: &[u8]) -> Result<(usize, bool), ParseError> {
        let Some(end) = find_crlf(data) else {
            return Ok((0, false));
        };

        if end == 0 {
            return Ok((2, true));
        }

        let line = trim_ows(&data[..end]);
        let colon = line
            .iter()
            .position(|&b| b == b':')
            .ok_or_else(|| ParseError::InvalidHeader(lossy(line)))?;

        let name = &line[..colon];
        if name.is_empty() || !name.iter().all(|&b| is_tchar(b)) {
            return Err(ParseError::InvalidHeaderName(lossy(name)));
        }

        // obs-text is allowed; bytes that are not UTF-8 decode to U+FFFD.
        let value = trim_ows(&line[colon + 1..]);
        if value.iter().any(|&b| b == b'\r' || b == b'\n' || b == 0) {
            return Err(ParseError::InvalidHeader(lossy(line)));
        }

        let name: String = name.iter().map(|&b| b.to_ascii_lowercase() as char).collect();
        self.append(&name, &String::from_utf8_lossy(value));

        Ok((end + 2, false))
    }

    /// Looks up a header value, ignoring the case of `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name.to_ascii_lowercase().as_str())
            .map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name.to_ascii_lowercase().as_str())
    }

    /// Sets a header, replacing any previous value.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.fields.insert(name.to_ascii_lowercase(), value.into());
    }

    /// Adds a value, folding it into an existing entry with `", "`.
    pub fn append(&mut self, name: &str, value: &str) {
        match self.fields.get_mut(name.to_ascii_lowercase().as_str()) {
            Some(existing) => {
                existing.push_str(", ");
                existing.push_str(value);
            }
            None => {
                self.fields.insert(name.to_ascii_lowercase(), value.to_string());
            }
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.fields.shift_remove(name.to_ascii_lowercase().as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Serializes every field as `name: value\r\n`, then the blank line.
    pub(crate) fn encode(&self, buf: &mut Vec<u8>) {
        for (name, value) in &self.fields {
            buf.extend_from_slice(name.as_bytes());
            buf.extend_from_slice(b": ");
            buf.extend_from_slice(value.as_bytes());
            buf.extend_from_slice(b"\r\n");
        }
        buf.extend_from_slice(b"\r\n");
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for Headers {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        let mut headers = Headers::new();
        for (name, value) in iter {
            headers.append(name, value);
        }
        headers
    }
}

/// Token characters allowed in a field name.
pub(crate) fn is_tchar(b: u8) -> bool {
    matches!(b,
        b'!' | b'#' | b'$' | b'%' | b'&' | b'\'' | b'*' | b'+' | b'-' | b'.' |
        b'^' | b'_' | b'`' | b'|' | b'~' | b'0'..=b'9' | b'A'..=b'Z' | b'a'..=b'z'
    )
}

fn trim_ows(mut bytes: &[u8]) -> &[u8] {
    while let [b' ' | b'\t', rest @ ..] = bytes {
        bytes = rest;
    }
    while let [rest @ .., b' ' | b'\t'] = bytes {
        bytes = rest;
    }
    bytes
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
