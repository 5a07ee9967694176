//! Shared setup for commands that run a prediction.

use satpass::config::{config_file_path, ConfigFile};
use satpass::logging::{init_logging, LoggingConfig, WorkerGuard};
use tracing::info;

use crate::error::CliError;

/// Loaded configuration plus the logging guard for one CLI invocation.
pub struct CliRunner {
    config: ConfigFile,
    // Dropping the guard flushes buffered file log lines
    _log_guard: Option<WorkerGuard>,
}

impl CliRunner {
    /// Load the configuration file and install logging.
    ///
    /// `log_level` overrides `logging.level` from the file.
    pub fn new(log_level: Option<&str>) -> Result<Self, CliError> {
        let config = ConfigFile::load()?;

        let mut logging = LoggingConfig::from(&config);
        if let Some(level) = log_level {
            logging = logging.with_level(level);
        }
        let log_guard = init_logging(&logging)?;

        Ok(Self {
            config,
            _log_guard: log_guard,
        })
    }

    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    /// Log the command being run and where its settings came from.
    pub fn log_startup(&self, command: &str) {
        info!(
            version = satpass::VERSION,
            command,
            config = %config_file_path().display(),
            "satpass starting"
        );
    }
}
