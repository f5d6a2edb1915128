pub mod atomic;
pub mod glob;

use std::path::{Path, PathBuf};

pub use atomic::{write_atomic, write_atomic_with};
pub use glob::glob_match;

use crate::error::{AdminError, Result};

/// Resolve `path` to the regular file it names, following symlinks.
pub fn regular_file(path: &Path) -> Result<PathBuf> {
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_file() => Ok(path.canonicalize()?),
        Ok(_) => Err(AdminError::FileNotFound(path.to_path_buf())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(AdminError::FileNotFound(path.to_path_buf()))
        }
        Err(e) => Err(AdminError::Io(e)),
    }
}

/// Format a byte count the way `du -h` does.
pub fn human_size(bytes: u64) -> String {
    if bytes >= 1_073_741_824 {
        format!("{:.1}G", bytes as f64 / 1_073_741_824.0)
    } else if bytes >= 1_048_576 {
        format!("{:.1}M", bytes as f64 / 1_048_576.0)
    } else if bytes >= 1024 {
        format!("{:.1}K", bytes as f64 / 1024.0)
    } else {
        bytes.to_string()
    }
}

/// Parse a size such as `512`, `10K`, `3M` or `1G` (powers of 1024).
pub fn parse_size(text: &str) -> Option<u64> {
    let text = text.trim();
    let (digits, multiplier) = match text.char_indices().last()? {
        (i, 'k' | 'K') => (&text[..i], 1024),
        (i, 'm' | 'M') => (&text[..i], 1024 * 1024),
        (i, 'g' | 'G') => (&text[..i], 1024 * 1024 * 1024),
        _ => (text, 1),
    };
    digits.parse::<u64>().ok()?.checked_mul(multiplier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regular_file() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("app.conf");
        std::fs::write(&file, "a=1\n").unwrap();

        assert!(regular_file(&file).is_ok());
    }

    #[test]
    fn test_missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let result = regular_file(&tmp.path().join("missing.conf"));
        assert!(matches!(result, Err(AdminError::FileNotFound(_))));
    }

    #[test]
    fn test_directory_is_not_a_regular_file() {
        let tmp = tempfile::tempdir().unwrap();
        let result = regular_file(tmp.path());
        assert!(matches!(result, Err(AdminError::FileNotFound(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_resolves_to_target() {
        let tmp = tempfile::tempdir().unwrap();
        let target = tmp.path().join("real.conf");
        let link = tmp.path().join("link.conf");
        std::fs::write(&target, "a=1\n").unwrap();
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let resolved = regular_file(&link).unwrap();
        assert_eq!(resolved, target.canonicalize().unwrap());
    }

    #[test]
    fn test_human_size() {
        assert_eq!(human_size(512), "512");
        assert_eq!(human_size(2048), "2.0K");
        assert_eq!(human_size(5 * 1024 * 1024 + 512 * 1024), "5.5M");
        assert_eq!(human_size(3 * 1_073_741_824), "3.0G");
    }

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("512"), Some(512));
        assert_eq!(parse_size("10K"), Some(10 * 1024));
        assert_eq!(parse_size("2m"), Some(2 * 1024 * 1024));
        assert_eq!(parse_size("1G"), Some(1_073_741_824));
        assert_eq!(parse_size("abc"), None);
        assert_eq!(parse_size(""), None);
        assert_eq!(parse_size("K"), None);
    }
}
