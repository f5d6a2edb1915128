use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AdminError, Result};

/// Environment variable naming an optional TOML configuration file.
pub const CONFIG_ENV: &str = "ADMINKIT_CONFIG";

/// Defaults shared by every tool in the kit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// `tracing` filter used when `ADMINKIT_LOG` is unset (default: `warn`).
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Delimiter used by `update_property` when `-d` is not given.
    #[serde(default = "default_delimiter")]
    pub default_delimiter: char,

    #[serde(default)]
    pub bigfiles: BigFilesDefaults,

    #[serde(default)]
    pub search: SearchDefaults,
}

/// Defaults for the `bigfiles` tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BigFilesDefaults {
    /// How many files to report (default: 10).
    #[serde(default = "default_limit")]
    pub limit: usize,

    /// Smallest size in bytes worth reporting (default: 0).
    #[serde(default)]
    pub min_size: u64,
}

/// Defaults for the `search` tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchDefaults {
    /// Directory names never descended into.
    #[serde(default = "default_skip_dirs")]
    pub skip_dirs: Vec<String>,
}

fn default_log_filter() -> String {
    "warn".to_string()
}

fn default_delimiter() -> char {
    '='
}

fn default_limit() -> usize {
    10
}

fn default_skip_dirs() -> Vec<String> {
    vec![".git".to_string()]
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
            default_delimiter: default_delimiter(),
            bigfiles: BigFilesDefaults::default(),
            search: SearchDefaults::default(),
        }
    }
}

impl Default for BigFilesDefaults {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            min_size: 0,
        }
    }
}

impl Default for SearchDefaults {
    fn default() -> Self {
        Self {
            skip_dirs: default_skip_dirs(),
        }
    }
}

impl ToolsConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| AdminError::Config(e.to_string()))
    }

    /// Load a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| AdminError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml(&text).map_err(|e| match e {
            AdminError::Config(msg) => AdminError::Config(format!("{}: {}", path.display(), msg)),
            other => other,
        })
    }

    /// Load from `ADMINKIT_CONFIG` if it is set, otherwise use defaults.
    pub fn from_env() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) if !path.is_empty() => Self::load(Path::new(&path)),
            _ => Ok(Self::default()),
        }
    }
}
