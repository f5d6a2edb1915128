use std::io::{self, BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{AdminError, Result};

/// Replace `path` with `contents` via a temporary file in the same directory.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    write_atomic_with(path, |out| out.write_all(contents))
}

/// Replace `path` with whatever `write` produces.
///
/// The output goes to a temporary file next to `path`, is flushed and
/// synced, takes over the permissions (and on Unix, where allowed, the owner
/// and group) of the existing file, and is then renamed over `path`. If `write` or any later step fails the temporary
/// file is removed and `path` is left as it was.
pub fn write_atomic_with<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut dyn Write) -> io::Result<()>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let original = std::fs::metadata(path).ok();

    let mut tmp = NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        write(&mut writer)?;
        writer.flush()?;
    }
    tmp.as_file().sync_all()?;

    if let Some(original) = &original {
        #[cfg(unix)]
        copy_owner(tmp.as_file(), original);
        tmp.as_file().set_permissions(original.permissions())?;
    }

    let tmp_path = tmp.path().to_path_buf();
    tmp.persist(path).map_err(|e| AdminError::Io(e.error))?;
    debug!(from = %tmp_path.display(), to = %path.display(), "replaced file");

    Ok(())
}

/// Best effort: an unprivileged caller may only hand the file to its own
/// uid and groups, so failures are logged and otherwise ignored.
#[cfg(unix)]
fn copy_owner(file: &std::fs::File, original: &std::fs::Metadata) {
    use std::os::unix::fs::MetadataExt;

    if let Err(e) = std::os::unix::fs::fchown(file, Some(original.uid()), Some(original.gid())) {
        debug!(uid = original.uid(), gid = original.gid(), error = %e, "could not copy owner");
    }
}
