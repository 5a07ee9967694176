//! The INI configuration file.

use std::path::{Path, PathBuf};

use chrono::TimeDelta;
use ini::Ini;
use tracing::debug;

use super::keys::ConfigKey;
use super::ConfigError;
use crate::observer::{find_city, ObserverLocation};
use crate::propagator::{PropagatorConfig, DEFAULT_STALENESS_THRESHOLD_DAYS};
use crate::source::{DEFAULT_SOURCE_URL, DEFAULT_TIMEOUT_SECS};
use crate::visibility::{
    DetectorConfig, DEFAULT_COARSE_STEP_SECS, DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE_SECS,
};

/// Default satellite designator.
pub const DEFAULT_DESIGNATOR: &str = "ISS";

/// Default observer site.
pub const DEFAULT_CITY: &str = "Delhi";

/// Default minimum elevation in degrees.
pub const DEFAULT_MIN_ELEVATION_DEG: f64 = 30.0;

/// Default prediction window in hours.
pub const DEFAULT_WINDOW_HOURS: f64 = 24.0;

/// Default ground track duration in minutes.
pub const DEFAULT_TRACK_MINUTES: f64 = 90.0;

/// Default ground track step in seconds.
pub const DEFAULT_TRACK_STEP_SECS: f64 = 60.0;

/// Longest prediction window accepted for `prediction.window_hours`.
pub const MAX_WINDOW_HOURS: f64 = 8_784.0;

/// Durations are held at millisecond resolution.
pub const DURATION_RESOLUTION_SECS: f64 = 0.001;

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// `[elements]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementsSettings {
    /// URL of the element text provider.
    pub source_url: String,
    /// Name substring or catalog number of the satellite.
    pub designator: String,
    /// Local element file; used instead of the URL when set.
    pub file: Option<PathBuf>,
    /// HTTP timeout in seconds.
    pub timeout_secs: u64,
}

/// `[observer]` section. Explicit coordinates take precedence over `city`.
#[derive(Debug, Clone, PartialEq)]
pub struct ObserverSettings {
    pub city: Option<String>,
    pub latitude_deg: Option<f64>,
    pub longitude_deg: Option<f64>,
    pub height_m: f64,
}

/// `[prediction]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionSettings {
    pub min_elevation_deg: f64,
    pub window_hours: f64,
    pub coarse_step_secs: f64,
    pub tolerance_secs: f64,
    pub staleness_days: f64,
}

/// `[track]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackSettings {
    pub duration_minutes: f64,
    pub step_seconds: f64,
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    /// Level filter (`trace`, `debug`, `info`, `warn`, `error`).
    pub level: String,
    /// Directory for daily log files; stderr only when unset.
    pub directory: Option<PathBuf>,
}

/// Application settings stored at [`config_file_path`].
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    pub elements: ElementsSettings,
    pub observer: ObserverSettings,
    pub prediction: PredictionSettings,
    pub track: TrackSettings,
    pub logging: LoggingSettings,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            elements: ElementsSettings {
                source_url: DEFAULT_SOURCE_URL.to_string(),
                designator: DEFAULT_DESIGNATOR.to_string(),
                file: None,
                timeout_secs: DEFAULT_TIMEOUT_SECS,
            },
            observer: ObserverSettings {
                city: Some(DEFAULT_CITY.to_string()),
                latitude_deg: None,
                longitude_deg: None,
                height_m: 0.0,
            },
            prediction: PredictionSettings {
                min_elevation_deg: DEFAULT_MIN_ELEVATION_DEG,
                window_hours: DEFAULT_WINDOW_HOURS,
                coarse_step_secs: DEFAULT_COARSE_STEP_SECS,
                tolerance_secs: DEFAULT_TOLERANCE_SECS,
                staleness_days: DEFAULT_STALENESS_THRESHOLD_DAYS as f64,
            },
            track: TrackSettings {
                duration_minutes: DEFAULT_TRACK_MINUTES,
                step_seconds: DEFAULT_TRACK_STEP_SECS,
            },
            logging: LoggingSettings {
                level: DEFAULT_LOG_LEVEL.to_string(),
                directory: None,
            },
        }
    }
}

impl ConfigFile {
    /// Load from the default location; defaults when the file is absent.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_file_path())
    }

    /// Load from `path`; defaults when the file is absent.
    ///
    /// Keys missing from the file keep their default values. Unknown keys
    /// are ignored.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_ini(&ini)
    }

    /// Parse settings from INI text.
    pub fn from_ini_str(text: &str) -> Result<Self, ConfigError> {
        let ini = Ini::load_from_str(text).map_err(|e| ConfigError::Read {
            path: PathBuf::from("<string>"),
            message: e.to_string(),
        })?;
        Self::from_ini(&ini)
    }

    fn from_ini(ini: &Ini) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        for key in ConfigKey::all() {
            let value = ini
                .section(Some(key.section()))
                .and_then(|props| props.get(key.key_name()))
                .map(str::trim);

            match value {
                // An empty required value keeps its default
                Some("") if !key.is_optional() => {}
                Some(value) => key.set(&mut config, value)?,
                None => {}
            }
        }

        Ok(config)
    }

    /// Save to the default location, creating the directory as needed.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&config_file_path())
    }

    /// Save to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        self.to_ini()
            .write_to_file(path)
            .map_err(|source| ConfigError::Write {
                path: path.to_path_buf(),
                source,
            })?;

        debug!(path = %path.display(), "Saved config file");
        Ok(())
    }

    /// Render as INI; unset optional values are written empty.
    pub fn to_ini(&self) -> Ini {
        let mut ini = Ini::new();
        for key in ConfigKey::all() {
            ini.with_section(Some(key.section()))
                .set(key.key_name(), key.get(self));
        }
        ini
    }

    /// Observer from explicit coordinates, else from the configured city.
    pub fn observer_location(&self) -> Result<ObserverLocation, ConfigError> {
        let observer = &self.observer;
        match (observer.latitude_deg, observer.longitude_deg, &observer.city) {
            (Some(lat), Some(lon), _) => Ok(ObserverLocation::new(lat, lon, observer.height_m)?),
            (_, _, Some(name)) => {
                let city =
                    find_city(name).ok_or_else(|| ConfigError::UnknownCity(name.clone()))?;
                Ok(ObserverLocation::new(
                    city.latitude_deg,
                    city.longitude_deg,
                    observer.height_m,
                )?)
            }
            _ => Err(ConfigError::MissingObserver),
        }
    }

    pub fn propagator_config(&self) -> PropagatorConfig {
        PropagatorConfig::default().with_staleness_days(self.prediction.staleness_days)
    }

    pub fn detector_config(&self) -> DetectorConfig {
        DetectorConfig::default()
            .with_coarse_step_secs(self.prediction.coarse_step_secs)
            .with_tolerance_secs(self.prediction.tolerance_secs)
            .with_max_iterations(DEFAULT_MAX_ITERATIONS)
    }

    /// Prediction window length.
    pub fn window(&self) -> Option<TimeDelta> {
        seconds_to_delta(self.prediction.window_hours * 3_600.0)
    }

    pub fn track_duration(&self) -> Option<TimeDelta> {
        seconds_to_delta(self.track.duration_minutes * 60.0)
    }

    pub fn track_step(&self) -> Option<TimeDelta> {
        seconds_to_delta(self.track.step_seconds)
    }
}

/// Whole-millisecond duration from fractional seconds.
///
/// `None` when `seconds` is not finite or lies outside the range of
/// [`TimeDelta`].
pub fn seconds_to_delta(seconds: f64) -> Option<TimeDelta> {
    let millis = (seconds * 1_000.0).round();
    if !millis.is_finite() || millis.abs() >= i64::MAX as f64 {
        return None;
    }
    TimeDelta::try_milliseconds(millis as i64)
}

/// Directory holding the configuration file.
pub fn config_directory() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("satpass")
}

/// Path of the configuration file.
pub fn config_file_path() -> PathBuf {
    config_directory().join("config.ini")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigFile::load_from(&dir.path().join("config.ini")).unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.ini");

        let mut config = ConfigFile::default();
        config.elements.designator = "NOAA 19".to_string();
        config.elements.file = Some(PathBuf::from("/tmp/weather.txt"));
        config.observer.city = None;
        config.observer.latitude_deg = Some(-33.8688);
        config.observer.longitude_deg = Some(151.2093);
        config.prediction.min_elevation_deg = 10.0;
        config.logging.directory = Some(PathBuf::from("/var/log/satpass"));
        config.save_to(&path).unwrap();

        let loaded = ConfigFile::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = ConfigFile::from_ini_str(
            "[prediction]\nmin_elevation = 15\n\n[observer]\ncity = Mumbai\n",
        )
        .unwrap();
        assert_eq!(config.prediction.min_elevation_deg, 15.0);
        assert_eq!(config.prediction.window_hours, 24.0);
        assert_eq!(config.observer.city.as_deref(), Some("Mumbai"));
        assert_eq!(config.elements.designator, "ISS");
    }

    #[test]
    fn test_invalid_value_is_error() {
        let err = ConfigFile::from_ini_str("[track]\nstep_seconds = fast\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_observer_from_city_and_coordinates() {
        let config = ConfigFile::default();
        let delhi = config.observer_location().unwrap();
        assert_eq!(delhi.latitude_deg(), 28.6139);

        let mut config = ConfigFile::default();
        config.observer.latitude_deg = Some(1.0);
        config.observer.longitude_deg = Some(2.0);
        config.observer.height_m = 50.0;
        let explicit = config.observer_location().unwrap();
        assert_eq!(explicit.longitude_deg(), 2.0);
        assert_eq!(explicit.height_m(), 50.0);
    }

    #[test]
    fn test_observer_errors() {
        let mut config = ConfigFile::default();
        config.observer.city = Some("Atlantis".to_string());
        assert!(matches!(
            config.observer_location(),
            Err(ConfigError::UnknownCity(_))
        ));

        config.observer.city = None;
        assert!(matches!(
            config.observer_location(),
            Err(ConfigError::MissingObserver)
        ));
    }

    #[test]
    fn test_derived_library_configs() {
        let mut config = ConfigFile::default();
        config.prediction.staleness_days = 7.0;
        config.prediction.coarse_step_secs = 15.0;

        assert_eq!(
            config.propagator_config().staleness_threshold,
            TimeDelta::days(7)
        );
        assert_eq!(config.detector_config().coarse_step_secs, 15.0);
        assert_eq!(config.window(), Some(TimeDelta::hours(24)));
        assert_eq!(config.track_duration(), Some(TimeDelta::minutes(90)));
        assert_eq!(config.track_step(), Some(TimeDelta::seconds(60)));
    }

    #[test]
    fn test_seconds_to_delta_range() {
        assert_eq!(seconds_to_delta(1.5), Some(TimeDelta::milliseconds(1_500)));
        assert_eq!(seconds_to_delta(0.0004), Some(TimeDelta::zero()));
        assert_eq!(seconds_to_delta(1e18), None);
        assert_eq!(seconds_to_delta(f64::NAN), None);
        assert_eq!(seconds_to_delta(f64::NEG_INFINITY), None);
    }

    #[test]
    fn test_huge_settings_do_not_panic() {
        let mut config = ConfigFile::default();
        config.prediction.staleness_days = 1e20;
        config.prediction.window_hours = 1e15;

        assert!(config.propagator_config().staleness_threshold > TimeDelta::days(3));
        assert_eq!(config.window(), None);
    }

    #[test]
    fn test_config_path_layout() {
        let path = config_file_path();
        assert!(path.ends_with("satpass/config.ini"));
    }
}
