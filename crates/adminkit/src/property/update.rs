use std::io;
use std::path::Path;

use tracing::debug;

use super::{PropertyFile, UpdateRequest};
use crate::error::{AdminError, Result};
use crate::fs;

/// The line written by a successful update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatedLine {
    /// Full line text, without terminator. Invalid UTF-8 is replaced.
    pub text: String,
    /// The line exactly as written to disk, without terminator.
    pub bytes: Vec<u8>,
    /// 1-based position in the rewritten file.
    pub line_number: usize,
    /// True when the key was absent and the line was appended.
    pub inserted: bool,
}

impl UpdatedLine {
    pub(crate) fn new(bytes: Vec<u8>, line_number: usize, inserted: bool) -> Self {
        Self {
            text: String::from_utf8_lossy(&bytes).into_owned(),
            bytes,
            line_number,
            inserted,
        }
    }
}

/// Update one key in the property file at `path` and atomically replace it.
///
/// The file is only rewritten when the key is found or `force_insert` is set.
/// Concurrent updates of the same file are not serialized; the last rename
/// wins.
pub fn update_property(path: &Path, request: &UpdateRequest) -> Result<UpdatedLine> {
    request.validate()?;
    let target = fs::regular_file(path)?;

    let raw = std::fs::read(&target).map_err(|e| match e.kind() {
        io::ErrorKind::PermissionDenied => AdminError::FileNotFound(path.to_path_buf()),
        _ => AdminError::Io(e),
    })?;
    let mut file = PropertyFile::parse(&raw, request.delimiter);

    let updated = file
        .apply(request)
        .ok_or_else(|| AdminError::KeyNotFound {
            key: request.key.clone(),
            path: path.to_path_buf(),
        })?;
    debug!(
        path = %target.display(),
        line = updated.line_number,
        inserted = updated.inserted,
        "updated property"
    );

    fs::write_atomic_with(&target, |out| file.write_to(out))?;
    Ok(updated)
}
