//! Error types for the lint front.
//!
//! The analysis engines themselves never fail; errors only come from
//! loading syntax trees and configuration from disk.

use std::path::PathBuf;

use thiserror::Error;

pub use crate::lint_config::ConfigError;

/// Errors that can occur while preparing a lint run.
#[derive(Error, Debug)]
pub enum LintError {
    #[error("I/O error reading {}: {source}", .path.display())]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed syntax tree in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, LintError>;
