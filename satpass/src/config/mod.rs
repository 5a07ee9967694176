//! Configuration file
//!
//! Application settings in an INI file at
//! `~/.config/satpass/config.ini` (platform config directory). Library
//! tunables ([`PropagatorConfig`](crate::propagator::PropagatorConfig),
//! [`DetectorConfig`](crate::visibility::DetectorConfig)) are derived from it.
//!
//! ```ini
//! [elements]
//! source_url = https://celestrak.org/NORAD/elements/stations.txt
//! designator = ISS
//!
//! [observer]
//! city = Delhi
//!
//! [prediction]
//! min_elevation = 30
//! window_hours = 24
//! ```

mod error;
mod file;
mod keys;

pub use error::ConfigError;
pub use file::{
    config_directory, config_file_path, seconds_to_delta, ConfigFile, ElementsSettings,
    LoggingSettings, ObserverSettings, PredictionSettings, TrackSettings, DEFAULT_CITY,
    DEFAULT_DESIGNATOR, DEFAULT_LOG_LEVEL, DEFAULT_MIN_ELEVATION_DEG, DEFAULT_TRACK_MINUTES,
    DEFAULT_TRACK_STEP_SECS, DEFAULT_WINDOW_HOURS, DURATION_RESOLUTION_SECS, MAX_WINDOW_HOURS,
};
pub use keys::{ConfigKey, LOG_LEVELS};
