//! Small system administration utilities.
//!
//! The centerpiece is [`property::update_property`], which edits one key of a
//! `key<delimiter>value` file in place while keeping every other line, and
//! replaces the file atomically. The remaining modules back the `bigfiles`,
//! `search` and `lines` commands of the `adminkit` binary.

pub mod bigfiles;
pub mod config;
pub mod error;
pub mod fs;
pub mod lines;
pub mod property;
pub mod search;

pub use config::ToolsConfig;
pub use error::{AdminError, Result};
pub use property::{CombineMode, UpdateRequest, UpdatedLine, update_property};

/// Commands provided by the `adminkit` binary.
pub const AVAILABLE_TOOLS: &[&str] = &["update_property", "bigfiles", "search", "lines"];
