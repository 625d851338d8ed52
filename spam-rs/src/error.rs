//! Error types for spam-rs

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for classifier operations
pub type Result<T> = std::result::Result<T, SpamError>;

/// Classifier error types
#[derive(Error, Debug)]
pub enum SpamError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Document exceeds the configured maximum length
    #[error("Input too long: {len} bytes (max {max})")]
    InputTooLong { len: usize, max: usize },

    /// Training or model file could not be opened, read or written
    #[error("File unavailable: {}: {source}", .path.display())]
    FileUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A model file line did not parse
    #[error("Malformed model at line {line}: {reason}")]
    MalformedModel { line: usize, reason: String },

    /// Classification requested before both labels were trained
    #[error("No training data available, train first")]
    NoTrainingData,
}

impl SpamError {
    pub(crate) fn file_unavailable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SpamError::FileUnavailable {
            path: path.into(),
            source,
        }
    }

    /// Attribute a bare IO error to the file at `path`
    pub(crate) fn at_path(self, path: &Path) -> Self {
        match self {
            SpamError::Io(source) => SpamError::file_unavailable(path, source),
            other => other,
        }
    }

    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        SpamError::MalformedModel {
            line,
            reason: reason.into(),
        }
    }
}
