use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use regex::{Regex, RegexBuilder};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::SearchDefaults;
use crate::error::{AdminError, Result};
use crate::fs::glob_match;

/// Bytes inspected when deciding whether a file is binary.
const BINARY_SNIFF_LEN: u64 = 8192;

#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    pub case_insensitive: bool,
    /// Treat the pattern as a literal string.
    pub fixed_strings: bool,
    /// Only search files whose name matches this glob.
    pub include: Option<String>,
    /// Directory names that are never descended into.
    pub skip_dirs: Vec<String>,
}

impl From<&SearchDefaults> for SearchOptions {
    fn from(defaults: &SearchDefaults) -> Self {
        Self {
            skip_dirs: defaults.skip_dirs.clone(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub path: PathBuf,
    pub line_number: usize,
    pub line: String,
}

pub fn build_pattern(pattern: &str, options: &SearchOptions) -> Result<Regex> {
    let pattern = if options.fixed_strings {
        regex::escape(pattern)
    } else {
        pattern.to_string()
    };
    Ok(RegexBuilder::new(&pattern)
        .case_insensitive(options.case_insensitive)
        .build()?)
}

/// Search every text file below `roots` for lines matching `pattern`.
pub fn search<P: AsRef<Path>>(
    pattern: &str,
    roots: &[P],
    options: &SearchOptions,
) -> Result<Vec<SearchHit>> {
    let re = build_pattern(pattern, options)?;
    let mut hits = Vec::new();

    for root in roots {
        let root = root.as_ref();
        if !root.exists() {
            return Err(AdminError::FileNotFound(root.to_path_buf()));
        }

        let walker = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| {
                e.depth() == 0
                    || !e.file_type().is_dir()
                    || !options
                        .skip_dirs
                        .iter()
                        .any(|d| e.file_name().to_string_lossy() == d.as_str())
            });

        for entry in walker {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    warn!(error = %e, "skipping unreadable entry");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            if let Some(include) = &options.include
                && !glob_match(include, &entry.file_name().to_string_lossy())
            {
                continue;
            }
            if let Err(e) = search_file(entry.path(), &re, &mut hits) {
                warn!(path = %entry.path().display(), error = %e, "skipping file");
            }
        }
    }

    debug!(hits = hits.len(), "search finished");
    Ok(hits)
}

fn search_file(path: &Path, re: &Regex, hits: &mut Vec<SearchHit>) -> std::io::Result<()> {
    if looks_binary(path)? {
        debug!(path = %path.display(), "skipping binary file");
        return Ok(());
    }

    let reader = BufReader::new(File::open(path)?);
    for (idx, line) in reader.split(b'\n').enumerate() {
        let raw = line?;
        let decoded = String::from_utf8_lossy(&raw);
        let line = decoded.strip_suffix('\r').unwrap_or(&*decoded);
        if re.is_match(line) {
            hits.push(SearchHit {
                path: path.to_path_buf(),
                line_number: idx + 1,
                line: line.to_string(),
            });
        }
    }
    Ok(())
}

fn looks_binary(path: &Path) -> std::io::Result<bool> {
    let mut head = Vec::new();
    File::open(path)?
        .take(BINARY_SNIFF_LEN)
        .read_to_end(&mut head)?;
    Ok(head.contains(&0))
}
