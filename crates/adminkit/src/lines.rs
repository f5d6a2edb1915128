//! Extract a window of lines, `sed -n 'START,ENDp'` style.
//!
//! A range is written `<start>[,<end>]`. `start` is a 1-based line number or a
//! `/regex/`. `end` is a line number, a `/regex/` (first match after the start
//! line, or end of input when none matches), `+N` for N lines past the start,
//! or `$` for the last line.

use std::str::FromStr;

use regex::Regex;

use crate::error::{AdminError, Result};

#[derive(Debug, Clone)]
pub enum StartBound {
    Line(usize),
    Pattern(Regex),
}

#[derive(Debug, Clone)]
pub enum EndBound {
    Line(usize),
    Pattern(Regex),
    Offset(usize),
    Last,
}

#[derive(Debug, Clone)]
pub struct LineRange {
    pub start: StartBound,
    pub end: Option<EndBound>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberedLine {
    pub number: usize,
    pub text: String,
}

impl FromStr for LineRange {
    type Err = AdminError;

    fn from_str(spec: &str) -> Result<Self> {
        let (start, rest) = split_bound(spec)?;
        let start = match start.strip_prefix('/') {
            Some(_) => StartBound::Pattern(parse_pattern(start)?),
            None => StartBound::Line(parse_line_number(start)?),
        };

        let end = match rest {
            None => None,
            Some(end) => Some(if end == "$" {
                EndBound::Last
            } else if let Some(offset) = end.strip_prefix('+') {
                EndBound::Offset(parse_digits(offset).ok_or_else(|| invalid_range(spec))?)
            } else if end.starts_with('/') {
                EndBound::Pattern(parse_pattern(end)?)
            } else {
                EndBound::Line(parse_line_number(end)?)
            }),
        };

        Ok(LineRange { start, end })
    }
}

/// Split `spec` at the comma separating start and end, skipping commas
/// inside a leading `/regex/`.
fn split_bound(spec: &str) -> Result<(&str, Option<&str>)> {
    let start_len = if spec.starts_with('/') {
        closing_slash(spec).ok_or_else(|| invalid_range(spec))? + 1
    } else {
        spec.find(',').unwrap_or(spec.len())
    };

    let (start, rest) = spec.split_at(start_len);
    if start.is_empty() {
        return Err(invalid_range(spec));
    }
    match rest {
        "" => Ok((start, None)),
        _ => match rest.strip_prefix(',') {
            Some(end) if !end.is_empty() => Ok((start, Some(end))),
            _ => Err(invalid_range(spec)),
        },
    }
}

/// Byte index of the `/` closing a pattern that opens at index 0.
fn closing_slash(spec: &str) -> Option<usize> {
    let mut escaped = false;
    for (idx, ch) in spec.char_indices().skip(1) {
        match ch {
            '\\' if !escaped => escaped = true,
            '/' if !escaped => return Some(idx),
            _ => escaped = false,
        }
    }
    None
}

fn parse_pattern(bound: &str) -> Result<Regex> {
    let inner = bound
        .strip_prefix('/')
        .and_then(|b| b.strip_suffix('/'))
        .filter(|b| !b.is_empty())
        .ok_or_else(|| invalid_range(bound))?;
    Ok(Regex::new(&inner.replace("\\/", "/"))?)
}

fn parse_line_number(bound: &str) -> Result<usize> {
    match parse_digits(bound) {
        Some(n) if n > 0 => Ok(n),
        _ => Err(invalid_range(bound)),
    }
}

/// Plain decimal digits only; `usize::from_str` would also take a leading `+`.
fn parse_digits(bound: &str) -> Option<usize> {
    if bound.is_empty() || !bound.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    bound.parse().ok()
}

fn invalid_range(spec: &str) -> AdminError {
    AdminError::Usage(format!("invalid line range '{spec}'"))
}

/// Return the lines of `text` selected by `range`.
pub fn extract_lines(text: &str, range: &LineRange) -> Vec<NumberedLine> {
    let lines: Vec<&str> = text.lines().collect();
    let Some(last) = lines.len().checked_sub(1) else {
        return Vec::new();
    };

    let start = match &range.start {
        StartBound::Line(n) => n.saturating_sub(1),
        StartBound::Pattern(re) => match lines.iter().position(|l| re.is_match(l)) {
            Some(idx) => idx,
            None => return Vec::new(),
        },
    };
    if start > last {
        return Vec::new();
    }

    let end = match &range.end {
        None => start,
        Some(EndBound::Line(n)) => n.saturating_sub(1).clamp(start, last),
        Some(EndBound::Offset(k)) => start.saturating_add(*k).min(last),
        Some(EndBound::Last) => last,
        Some(EndBound::Pattern(re)) => lines[start + 1..]
            .iter()
            .position(|l| re.is_match(l))
            .map_or(last, |offset| start + 1 + offset),
    };

    lines[start..=end]
        .iter()
        .enumerate()
        .map(|(i, l)| NumberedLine {
            number: start + i + 1,
            text: l.to_string(),
        })
        .collect()
}
