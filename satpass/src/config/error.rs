use std::path::PathBuf;

use thiserror::Error;

/// Errors reading, writing or editing the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {message}")]
    Read { path: PathBuf, message: String },

    #[error("Failed to write config file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },

    #[error("Unknown configuration key '{0}'")]
    UnknownKey(String),

    #[error("Unknown city '{0}'")]
    UnknownCity(String),

    #[error("Observer location is not configured: set observer.city or observer.latitude and observer.longitude")]
    MissingObserver,

    #[error("Invalid observer location: {0}")]
    InvalidObserver(#[from] crate::frame::GeometryError),
}
