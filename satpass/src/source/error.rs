use std::path::PathBuf;

use thiserror::Error;

/// Failures of an element text provider.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SourceError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Failed to read {path}: {message}")]
    Io { path: PathBuf, message: String },

    #[error("Element text is not valid UTF-8")]
    InvalidUtf8,
}

impl SourceError {
    pub(crate) fn io(path: impl Into<PathBuf>, err: &std::io::Error) -> Self {
        SourceError::Io {
            path: path.into(),
            message: err.to_string(),
        }
    }
}
