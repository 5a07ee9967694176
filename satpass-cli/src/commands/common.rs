//! Argument groups and resolution shared across CLI commands.

use std::io::Write;
use std::path::PathBuf;

use chrono::{DateTime, NaiveDateTime, TimeDelta, Utc};
use clap::{Args, ValueEnum};
use satpass::config::{seconds_to_delta, ConfigFile, DURATION_RESOLUTION_SECS};
use satpass::observer::find_city;
use satpass::source::{fetch_elements, ElementSource, FileElementSource, HttpElementSource};
use satpass::{ObserverLocation, OrbitalElementSet, PredictError};

use crate::error::CliError;

/// Where to read the element set from.
#[derive(Debug, Clone, Default, Args)]
pub struct ElementArgs {
    /// Satellite name substring or catalog number (default: elements.designator)
    #[arg(short, long)]
    pub designator: Option<String>,

    /// Read element records from a local file instead of downloading
    #[arg(long, value_name = "PATH")]
    pub tle_file: Option<PathBuf>,

    /// Download element records from this URL
    #[arg(long, value_name = "URL", conflicts_with = "tle_file")]
    pub source_url: Option<String>,
}

/// Ground observer selection.
#[derive(Debug, Clone, Default, Args)]
pub struct ObserverArgs {
    /// Observer city from the built-in catalog (see `satpass cities`)
    #[arg(long, conflicts_with_all = ["lat", "lon"])]
    pub city: Option<String>,

    /// Observer latitude in degrees, north positive
    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Observer longitude in degrees, east positive
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lon: Option<f64>,

    /// Observer height above the ellipsoid in metres
    #[arg(long, allow_negative_numbers = true)]
    pub height: Option<f64>,
}

/// Output encoding for command results.
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    /// Aligned, human-readable columns
    #[default]
    Table,
    /// Comma-separated values with a header row
    Csv,
    /// A JSON document
    Json,
}

/// Resolve the element set: CLI file, then CLI URL, then the config file.
pub fn resolve_elements(
    args: &ElementArgs,
    config: &ConfigFile,
) -> Result<OrbitalElementSet, CliError> {
    let designator = args
        .designator
        .clone()
        .unwrap_or_else(|| config.elements.designator.clone());
    let source = element_source(args, config)?;
    Ok(fetch_elements(source.as_ref(), &designator)?)
}

fn element_source(
    args: &ElementArgs,
    config: &ConfigFile,
) -> Result<Box<dyn ElementSource>, CliError> {
    if let Some(path) = &args.tle_file {
        return Ok(Box::new(FileElementSource::new(path)));
    }

    let url = match (&args.source_url, &config.elements.file) {
        (Some(url), _) => url.clone(),
        (None, Some(path)) => return Ok(Box::new(FileElementSource::new(path))),
        (None, None) => config.elements.source_url.clone(),
    };

    let source = HttpElementSource::new(url, config.elements.timeout_secs)
        .map_err(PredictError::from)?;
    Ok(Box::new(source))
}

/// Resolve the observer: CLI city or coordinates, then the config file.
pub fn resolve_observer(
    args: &ObserverArgs,
    config: &ConfigFile,
) -> Result<ObserverLocation, CliError> {
    let height_m = args.height.unwrap_or(config.observer.height_m);

    let location = match (&args.city, args.lat, args.lon) {
        (Some(name), _, _) => {
            let city = find_city(name)
                .ok_or_else(|| CliError::Argument(format!("unknown city '{}'", name)))?;
            ObserverLocation::new(city.latitude_deg, city.longitude_deg, height_m)
        }
        (None, Some(lat), Some(lon)) => ObserverLocation::new(lat, lon, height_m),
        _ => {
            let mut settings = config.clone();
            settings.observer.height_m = height_m;
            return Ok(settings.observer_location()?);
        }
    };

    location.map_err(|e| CliError::Argument(e.to_string()))
}

/// Parse a UTC instant, or take the current time when absent.
///
/// Accepts RFC 3339 (`2024-01-01T05:24:00Z`) or a naive
/// `YYYY-MM-DD HH:MM[:SS]` read as UTC.
pub fn resolve_start(text: Option<&str>) -> Result<DateTime<Utc>, CliError> {
    match text {
        Some(text) => parse_instant(text),
        None => Ok(Utc::now()),
    }
}

pub fn parse_instant(text: &str) -> Result<DateTime<Utc>, CliError> {
    let text = text.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
        return Ok(instant.with_timezone(&Utc));
    }

    const NAIVE_FORMATS: &[&str] = &[
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
    ];
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| {
            CliError::Argument(format!(
                "invalid time '{}': expected RFC 3339 or YYYY-MM-DD HH:MM:SS (UTC)",
                text
            ))
        })
}

/// Check that a user-supplied duration is positive and finite.
pub fn positive(name: &str, value: f64) -> Result<f64, CliError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(CliError::Argument(format!(
            "{} must be a positive number, got {}",
            name, value
        )))
    }
}

/// Convert a user-supplied number of seconds to a millisecond-resolution duration.
pub fn duration_arg(name: &str, seconds: f64) -> Result<TimeDelta, CliError> {
    let delta = seconds_to_delta(seconds)
        .ok_or_else(|| CliError::Argument(format!("{} is out of range", name)))?;
    if seconds > 0.0 && delta.is_zero() {
        return Err(CliError::Argument(format!(
            "{} is below the {} s resolution",
            name, DURATION_RESOLUTION_SECS
        )));
    }
    Ok(delta)
}

/// `start + span`, rejected when it leaves the representable calendar range.
pub fn window_end(start: DateTime<Utc>, span: TimeDelta) -> Result<DateTime<Utc>, CliError> {
    start.checked_add_signed(span).ok_or_else(|| {
        CliError::Argument(format!("window of {} from {} is out of range", span, start))
    })
}

/// Write command output to stdout, reporting failures such as a closed pipe.
pub fn write_output(text: &str) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    stdout.flush()?;
    Ok(())
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_naive_time_is_read_as_utc(secs in 0i64..4_102_444_800) {
            let instant = DateTime::from_timestamp(secs, 0).unwrap();
            let text = instant.format("%Y-%m-%d %H:%M:%S").to_string();
            prop_assert_eq!(parse_instant(&text).unwrap(), instant);
        }
    }
}
