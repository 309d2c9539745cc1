//! Error types for filesystem snapshots and the tooling around them.

use std::path::PathBuf;
use thiserror::Error;

/// Snapshot construction errors
#[derive(Debug, Error)]
pub enum TreeError {
    #[error("Invalid snapshot root {path:?}: {reason}")]
    InvalidRoot { path: PathBuf, reason: String },
}

impl TreeError {
    pub(crate) fn invalid_root(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        TreeError::InvalidRoot {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Errors raised by the configuration, logging and CLI layers
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Snapshot error: {0}")]
    TreeError(#[from] TreeError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Output error: {0}")]
    OutputError(String),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::OutputError(err.to_string())
    }
}
