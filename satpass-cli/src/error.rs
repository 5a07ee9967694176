//! CLI error type and exit codes.

use satpass::config::ConfigError;
use satpass::logging::LoggingError;
use satpass::PredictError;
use thiserror::Error;

/// Errors surfaced to the command line.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Predict(#[from] PredictError),

    #[error("{0}")]
    ConfigFile(#[from] ConfigError),

    #[error("Failed to initialise logging: {0}")]
    Logging(#[from] LoggingError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error("Failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Process exit code for this error.
    ///
    /// - 2: bad arguments or configuration
    /// - 3: element text could not be fetched
    /// - 4: no usable element record
    /// - 1: anything else
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Argument(_) | CliError::Config(_) | CliError::ConfigFile(_) => 2,
            CliError::Predict(PredictError::InvalidQuery(_)) => 2,
            CliError::Predict(PredictError::Source(_)) => 3,
            CliError::Predict(PredictError::NotFound { .. } | PredictError::Parse(_)) => 4,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use satpass::source::SourceError;

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::Argument("x".into()).exit_code(), 2);
        assert_eq!(
            CliError::Predict(PredictError::InvalidQuery("x".into())).exit_code(),
            2
        );
        assert_eq!(
            CliError::Predict(PredictError::Source(SourceError::InvalidUtf8)).exit_code(),
            3
        );
        assert_eq!(
            CliError::Predict(PredictError::NotFound {
                designator: "ISS".into()
            })
            .exit_code(),
            4
        );
        assert_eq!(
            CliError::Io(std::io::Error::other("broken pipe")).exit_code(),
            1
        );
    }

    #[test]
    fn test_predict_message_passes_through() {
        let err = CliError::from(PredictError::NotFound {
            designator: "TIANGONG".into(),
        });
        assert!(err.to_string().contains("TIANGONG"));
    }
}
