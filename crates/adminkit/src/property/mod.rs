//! Line-oriented `key<delimiter>value` files.
//!
//! A [`PropertyFile`] is parsed once, rewritten in memory by
//! [`PropertyFile::apply`], and committed with [`update_property`], which
//! replaces the file on disk atomically.
//!
//! Lines are kept as raw bytes, so files in any ASCII-compatible encoding
//! (Latin-1 `.properties` files included) pass through unchanged apart from
//! the updated line.

mod request;
mod update;

use std::io::{self, Write};

pub use request::{CombineMode, UpdateRequest};
pub use update::{UpdatedLine, update_property};

/// One line of a property file, without its terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// Blank lines, comments, and lines without the delimiter. Never matched.
    Verbatim(Vec<u8>),
    /// Bytes before the first delimiter, the delimiter, and everything after it.
    Entry {
        key: Vec<u8>,
        delimiter: char,
        value: Vec<u8>,
    },
}

impl Line {
    fn parse(raw: &[u8], delimiter: char) -> Self {
        let first = raw.iter().copied().find(|b| !b.is_ascii_whitespace());
        if matches!(first, None | Some(b'#')) {
            return Line::Verbatim(raw.to_vec());
        }

        let mut buf = [0u8; 4];
        let delim = delimiter.encode_utf8(&mut buf).as_bytes();
        match find_subslice(raw, delim) {
            Some(pos) => Line::Entry {
                key: raw[..pos].to_vec(),
                delimiter,
                value: raw[pos + delim.len()..].to_vec(),
            },
            None => Line::Verbatim(raw.to_vec()),
        }
    }

    /// The line as written to disk, without its terminator.
    pub fn bytes(&self) -> Vec<u8> {
        match self {
            Line::Verbatim(raw) => raw.clone(),
            Line::Entry {
                key,
                delimiter,
                value,
            } => {
                let mut buf = [0u8; 4];
                let delim = delimiter.encode_utf8(&mut buf).as_bytes();
                [key.as_slice(), delim, value.as_slice()].concat()
            }
        }
    }

    /// If this line assigns `key`, return the bytes after `key<delimiter>`.
    ///
    /// Equivalent to matching `^<key><delimiter>(.*)$` with both parts taken
    /// literally, so keys may contain characters that are special in regexes.
    fn value_for(&self, key: &str, delimiter: char) -> Option<Vec<u8>> {
        let Line::Entry { .. } = self else {
            return None;
        };
        let mut buf = [0u8; 4];
        let delim = delimiter.encode_utf8(&mut buf).as_bytes();
        let raw = self.bytes();
        raw.strip_prefix(key.as_bytes())
            .and_then(|rest| rest.strip_prefix(delim))
            .map(<[u8]>::to_vec)
    }
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

/// Split on `\n`, dropping a `\r` before it, the way `str::lines` does.
fn split_lines(raw: &[u8]) -> impl Iterator<Item = &[u8]> {
    let body = raw.strip_suffix(b"\n").unwrap_or(raw);
    body.split(|&b| b == b'\n')
        .take(if raw.is_empty() { 0 } else { usize::MAX })
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
}

/// An in-memory property file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyFile {
    lines: Vec<Line>,
}

impl PropertyFile {
    /// Split `raw` into lines (`\n` or `\r\n`) and classify each one.
    pub fn parse(raw: impl AsRef<[u8]>, delimiter: char) -> Self {
        Self {
            lines: split_lines(raw.as_ref())
                .map(|l| Line::parse(l, delimiter))
                .collect(),
        }
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Apply `request`, returning the rewritten or appended line.
    ///
    /// Only the first matching line is touched. Returns `None`, leaving the
    /// file unchanged, when nothing matches and `force_insert` is off.
    pub fn apply(&mut self, request: &UpdateRequest) -> Option<UpdatedLine> {
        let found = self.lines.iter().enumerate().find_map(|(idx, line)| {
            line.value_for(&request.key, request.delimiter)
                .map(|old| (idx, old))
        });

        let (idx, old, inserted) = match found {
            Some((idx, old)) => (idx, Some(old), false),
            None if request.force_insert => {
                self.lines.push(Line::Verbatim(Vec::new()));
                (self.lines.len() - 1, None, true)
            }
            None => return None,
        };

        let value = request.resolve_value(old.as_deref());
        self.lines[idx] = Line::Entry {
            key: request.key.as_bytes().to_vec(),
            delimiter: request.delimiter,
            value,
        };

        Some(UpdatedLine::new(self.lines[idx].bytes(), idx + 1, inserted))
    }

    /// Write every line followed by a single `\n`.
    pub fn write_to(&self, out: &mut dyn Write) -> io::Result<()> {
        for line in &self.lines {
            out.write_all(&line.bytes())?;
            out.write_all(b"\n")?;
        }
        Ok(())
    }

    pub fn render(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for line in &self.lines {
            out.extend_from_slice(&line.bytes());
            out.push(b'\n');
        }
        out
    }
}
