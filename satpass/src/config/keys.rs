//! Addressable configuration keys (`section.key`).

use std::path::PathBuf;
use std::str::FromStr;

use super::file::{ConfigFile, DURATION_RESOLUTION_SECS, MAX_WINDOW_HOURS};
use super::ConfigError;
use crate::propagator::MAX_STALENESS_THRESHOLD_DAYS;

/// Accepted values for `logging.level`.
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Every setting of the configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    ElementsSourceUrl,
    ElementsDesignator,
    ElementsFile,
    ElementsTimeout,
    ObserverCity,
    ObserverLatitude,
    ObserverLongitude,
    ObserverHeightM,
    PredictionMinElevation,
    PredictionWindowHours,
    PredictionCoarseStepSecs,
    PredictionToleranceSecs,
    PredictionStalenessDays,
    TrackDurationMinutes,
    TrackStepSeconds,
    LoggingLevel,
    LoggingDirectory,
}

const ALL_KEYS: &[ConfigKey] = &[
    ConfigKey::ElementsSourceUrl,
    ConfigKey::ElementsDesignator,
    ConfigKey::ElementsFile,
    ConfigKey::ElementsTimeout,
    ConfigKey::ObserverCity,
    ConfigKey::ObserverLatitude,
    ConfigKey::ObserverLongitude,
    ConfigKey::ObserverHeightM,
    ConfigKey::PredictionMinElevation,
    ConfigKey::PredictionWindowHours,
    ConfigKey::PredictionCoarseStepSecs,
    ConfigKey::PredictionToleranceSecs,
    ConfigKey::PredictionStalenessDays,
    ConfigKey::TrackDurationMinutes,
    ConfigKey::TrackStepSeconds,
    ConfigKey::LoggingLevel,
    ConfigKey::LoggingDirectory,
];

impl ConfigKey {
    /// All keys in file order.
    pub fn all() -> &'static [ConfigKey] {
        ALL_KEYS
    }

    /// Section and key name.
    fn parts(&self) -> (&'static str, &'static str) {
        match self {
            ConfigKey::ElementsSourceUrl => ("elements", "source_url"),
            ConfigKey::ElementsDesignator => ("elements", "designator"),
            ConfigKey::ElementsFile => ("elements", "file"),
            ConfigKey::ElementsTimeout => ("elements", "timeout"),
            ConfigKey::ObserverCity => ("observer", "city"),
            ConfigKey::ObserverLatitude => ("observer", "latitude"),
            ConfigKey::ObserverLongitude => ("observer", "longitude"),
            ConfigKey::ObserverHeightM => ("observer", "height_m"),
            ConfigKey::PredictionMinElevation => ("prediction", "min_elevation"),
            ConfigKey::PredictionWindowHours => ("prediction", "window_hours"),
            ConfigKey::PredictionCoarseStepSecs => ("prediction", "coarse_step_secs"),
            ConfigKey::PredictionToleranceSecs => ("prediction", "tolerance_secs"),
            ConfigKey::PredictionStalenessDays => ("prediction", "staleness_days"),
            ConfigKey::TrackDurationMinutes => ("track", "duration_minutes"),
            ConfigKey::TrackStepSeconds => ("track", "step_seconds"),
            ConfigKey::LoggingLevel => ("logging", "level"),
            ConfigKey::LoggingDirectory => ("logging", "directory"),
        }
    }

    pub fn section(&self) -> &'static str {
        self.parts().0
    }

    pub fn key_name(&self) -> &'static str {
        self.parts().1
    }

    /// Full name in `section.key` form.
    pub fn name(&self) -> String {
        let (section, key) = self.parts();
        format!("{}.{}", section, key)
    }

    /// Whether the setting may be left unset.
    pub fn is_optional(&self) -> bool {
        matches!(
            self,
            ConfigKey::ElementsFile
                | ConfigKey::ObserverCity
                | ConfigKey::ObserverLatitude
                | ConfigKey::ObserverLongitude
                | ConfigKey::LoggingDirectory
        )
    }

    /// Current value as text; empty when unset.
    pub fn get(&self, config: &ConfigFile) -> String {
        match self {
            ConfigKey::ElementsSourceUrl => config.elements.source_url.clone(),
            ConfigKey::ElementsDesignator => config.elements.designator.clone(),
            ConfigKey::ElementsFile => display_path(&config.elements.file),
            ConfigKey::ElementsTimeout => config.elements.timeout_secs.to_string(),
            ConfigKey::ObserverCity => config.observer.city.clone().unwrap_or_default(),
            ConfigKey::ObserverLatitude => display_opt(config.observer.latitude_deg),
            ConfigKey::ObserverLongitude => display_opt(config.observer.longitude_deg),
            ConfigKey::ObserverHeightM => config.observer.height_m.to_string(),
            ConfigKey::PredictionMinElevation => config.prediction.min_elevation_deg.to_string(),
            ConfigKey::PredictionWindowHours => config.prediction.window_hours.to_string(),
            ConfigKey::PredictionCoarseStepSecs => config.prediction.coarse_step_secs.to_string(),
            ConfigKey::PredictionToleranceSecs => config.prediction.tolerance_secs.to_string(),
            ConfigKey::PredictionStalenessDays => config.prediction.staleness_days.to_string(),
            ConfigKey::TrackDurationMinutes => config.track.duration_minutes.to_string(),
            ConfigKey::TrackStepSeconds => config.track.step_seconds.to_string(),
            ConfigKey::LoggingLevel => config.logging.level.clone(),
            ConfigKey::LoggingDirectory => display_path(&config.logging.directory),
        }
    }

    /// Validate `value` and store it. Empty text clears optional settings.
    pub fn set(&self, config: &mut ConfigFile, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        if value.is_empty() && !self.is_optional() {
            return Err(self.invalid(value, "a value is required"));
        }

        match self {
            ConfigKey::ElementsSourceUrl => {
                if !(value.starts_with("http://") || value.starts_with("https://")) {
                    return Err(self.invalid(value, "expected an http(s) URL"));
                }
                config.elements.source_url = value.to_string();
            }
            ConfigKey::ElementsDesignator => config.elements.designator = value.to_string(),
            ConfigKey::ElementsFile => config.elements.file = optional_path(value),
            ConfigKey::ElementsTimeout => {
                let secs: u64 = value
                    .parse()
                    .map_err(|_| self.invalid(value, "expected whole seconds"))?;
                if secs == 0 {
                    return Err(self.invalid(value, "must be at least 1 second"));
                }
                config.elements.timeout_secs = secs;
            }
            ConfigKey::ObserverCity => {
                config.observer.city = (!value.is_empty()).then(|| value.to_string());
            }
            ConfigKey::ObserverLatitude => {
                config.observer.latitude_deg = self.optional_number(value, -90.0, 90.0)?;
            }
            ConfigKey::ObserverLongitude => {
                config.observer.longitude_deg = self.optional_number(value, -180.0, 360.0)?;
            }
            ConfigKey::ObserverHeightM => {
                config.observer.height_m = self.number(value, -500.0, 10_000.0)?;
            }
            ConfigKey::PredictionMinElevation => {
                config.prediction.min_elevation_deg = self.number(value, -90.0, 90.0)?;
            }
            ConfigKey::PredictionWindowHours => {
                config.prediction.window_hours = self.positive_up_to(value, MAX_WINDOW_HOURS)?;
            }
            ConfigKey::PredictionCoarseStepSecs => {
                config.prediction.coarse_step_secs = self.positive(value)?;
            }
            ConfigKey::PredictionToleranceSecs => {
                config.prediction.tolerance_secs = self.positive(value)?;
            }
            ConfigKey::PredictionStalenessDays => {
                config.prediction.staleness_days =
                    self.positive_up_to(value, MAX_STALENESS_THRESHOLD_DAYS)?;
            }
            ConfigKey::TrackDurationMinutes => {
                config.track.duration_minutes = self.number(value, 0.0, f64::MAX)?;
            }
            ConfigKey::TrackStepSeconds => {
                config.track.step_seconds =
                    self.number(value, DURATION_RESOLUTION_SECS, f64::MAX)?;
            }
            ConfigKey::LoggingLevel => {
                let level = value.to_ascii_lowercase();
                if !LOG_LEVELS.contains(&level.as_str()) {
                    return Err(self.invalid(
                        value,
                        &format!("expected one of {}", LOG_LEVELS.join(", ")),
                    ));
                }
                config.logging.level = level;
            }
            ConfigKey::LoggingDirectory => config.logging.directory = optional_path(value),
        }

        Ok(())
    }

    fn number(&self, value: &str, min: f64, max: f64) -> Result<f64, ConfigError> {
        let number: f64 = value
            .parse()
            .map_err(|_| self.invalid(value, "expected a number"))?;
        if !number.is_finite() || number < min || number > max {
            return Err(self.invalid(value, &format!("must be within [{}, {}]", min, max)));
        }
        Ok(number)
    }

    fn optional_number(&self, value: &str, min: f64, max: f64) -> Result<Option<f64>, ConfigError> {
        if value.is_empty() {
            Ok(None)
        } else {
            self.number(value, min, max).map(Some)
        }
    }

    fn positive(&self, value: &str) -> Result<f64, ConfigError> {
        let number = self.number(value, 0.0, f64::MAX)?;
        if number == 0.0 {
            return Err(self.invalid(value, "must be greater than zero"));
        }
        Ok(number)
    }

    fn positive_up_to(&self, value: &str, max: f64) -> Result<f64, ConfigError> {
        let number = self.positive(value)?;
        if number > max {
            return Err(self.invalid(value, &format!("must not exceed {}", max)));
        }
        Ok(number)
    }

    fn invalid(&self, value: &str, reason: &str) -> ConfigError {
        ConfigError::InvalidValue {
            key: self.name(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ALL_KEYS
            .iter()
            .copied()
            .find(|key| key.name() == wanted)
            .ok_or_else(|| ConfigError::UnknownKey(s.to_string()))
    }
}

fn display_opt(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn display_path(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_default()
}

fn optional_path(value: &str) -> Option<PathBuf> {
    (!value.is_empty()).then(|| PathBuf::from(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_names() {
        assert_eq!(
            "prediction.min_elevation".parse::<ConfigKey>().unwrap(),
            ConfigKey::PredictionMinElevation
        );
        assert_eq!(
            " Observer.City ".parse::<ConfigKey>().unwrap(),
            ConfigKey::ObserverCity
        );
        assert!(matches!(
            "prediction.unknown".parse::<ConfigKey>(),
            Err(ConfigError::UnknownKey(_))
        ));
    }

    #[test]
    fn test_every_key_round_trips_its_name() {
        for key in ConfigKey::all() {
            assert_eq!(key.name().parse::<ConfigKey>().unwrap(), *key);
        }
    }

    #[test]
    fn test_get_defaults() {
        let config = ConfigFile::default();
        assert_eq!(ConfigKey::ElementsDesignator.get(&config), "ISS");
        assert_eq!(ConfigKey::PredictionMinElevation.get(&config), "30");
        assert_eq!(ConfigKey::ElementsFile.get(&config), "");
        assert_eq!(ConfigKey::ObserverCity.get(&config), "Delhi");
    }

    #[test]
    fn test_set_valid_values() {
        let mut config = ConfigFile::default();
        ConfigKey::ObserverLatitude
            .set(&mut config, "12.5")
            .unwrap();
        ConfigKey::LoggingLevel.set(&mut config, "DEBUG").unwrap();
        ConfigKey::ElementsTimeout.set(&mut config, "10").unwrap();

        assert_eq!(config.observer.latitude_deg, Some(12.5));
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.elements.timeout_secs, 10);
    }

    #[test]
    fn test_set_rejects_invalid_values() {
        let mut config = ConfigFile::default();
        let cases = [
            (ConfigKey::ObserverLatitude, "95"),
            (ConfigKey::PredictionMinElevation, "abc"),
            (ConfigKey::PredictionCoarseStepSecs, "0"),
            (ConfigKey::TrackStepSeconds, "-5"),
            (ConfigKey::LoggingLevel, "loud"),
            (ConfigKey::ElementsSourceUrl, "ftp://example.com"),
            (ConfigKey::ElementsTimeout, "0"),
            (ConfigKey::ElementsDesignator, ""),
            (ConfigKey::PredictionWindowHours, "NaN"),
            (ConfigKey::PredictionWindowHours, "1e15"),
            (ConfigKey::PredictionStalenessDays, "1e20"),
            (ConfigKey::TrackStepSeconds, "0.0004"),
        ];
        for (key, value) in cases {
            assert!(
                matches!(key.set(&mut config, value), Err(ConfigError::InvalidValue { .. })),
                "{} = {:?} should be rejected",
                key.name(),
                value
            );
        }
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_empty_clears_optional() {
        let mut config = ConfigFile::default();
        ConfigKey::ObserverCity.set(&mut config, "").unwrap();
        assert_eq!(config.observer.city, None);
        ConfigKey::ElementsFile.set(&mut config, "/tmp/x.txt").unwrap();
        ConfigKey::ElementsFile.set(&mut config, "  ").unwrap();
        assert_eq!(config.elements.file, None);
    }

    #[test]
    fn test_sections_are_grouped() {
        let sections: Vec<_> = ConfigKey::all().iter().map(|k| k.section()).collect();
        let mut seen: Vec<&str> = Vec::new();
        for section in sections {
            if seen.last() != Some(&section) {
                assert!(!seen.contains(&section), "section {} split", section);
                seen.push(section);
            }
        }
        assert_eq!(
            seen,
            vec!["elements", "observer", "prediction", "track", "logging"]
        );
    }
}
