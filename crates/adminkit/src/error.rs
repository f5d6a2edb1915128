use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdminError {
    #[error("{0}")]
    Usage(String),

    #[error("{}: no such file", .0.display())]
    FileNotFound(PathBuf),

    #[error("key '{key}' not found in {}", .path.display())]
    KeyNotFound { key: String, path: PathBuf },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, AdminError>;
