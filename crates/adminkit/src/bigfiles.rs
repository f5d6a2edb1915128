use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::BigFilesDefaults;
use crate::error::{AdminError, Result};

#[derive(Debug, Clone)]
pub struct BigFilesOptions {
    /// Maximum number of files to return.
    pub limit: usize,
    /// Files smaller than this are ignored.
    pub min_size: u64,
}

impl From<&BigFilesDefaults> for BigFilesOptions {
    fn from(defaults: &BigFilesDefaults) -> Self {
        Self {
            limit: defaults.limit,
            min_size: defaults.min_size,
        }
    }
}

impl Default for BigFilesOptions {
    fn default() -> Self {
        Self::from(&BigFilesDefaults::default())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BigFile {
    pub path: PathBuf,
    pub size: u64,
}

/// Find the largest regular files below `roots`, biggest first.
///
/// Symlinks are not followed. Entries that cannot be read are skipped.
pub fn find_big_files<P: AsRef<Path>>(roots: &[P], options: &BigFilesOptions) -> Result<Vec<BigFile>> {
    let mut files = Vec::new();

    for root in roots {
        let root = root.as_ref();
        if !root.exists() {
            return Err(AdminError::FileNotFound(root.to_path_buf()));
        }

        for entry in WalkDir::new(root) {
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
            let size = match entry.metadata() {
                Ok(m) => m.len(),
                Err(e) => {
                    warn!(path = %entry.path().display(), error = %e, "skipping file");
                    continue;
                }
            };
            if size >= options.min_size {
                files.push(BigFile {
                    path: entry.into_path(),
                    size,
                });
            }
        }
    }

    debug!(candidates = files.len(), "walk finished");
    files.sort_by(|a, b| b.size.cmp(&a.size).then_with(|| a.path.cmp(&b.path)));
    files.truncate(options.limit);
    Ok(files)
}
