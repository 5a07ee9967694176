//! Ground track values.

use std::fmt::Write as _;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::frame::GeodeticPoint;
use crate::propagator::StalenessWarning;

/// CSV header written by [`GroundTrack::to_csv`].
pub const CSV_HEADER: &str = "time,latitude,longitude,altitude_km";

/// One sub-satellite point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrackSample {
    /// Exactly `start + i·step` for the i-th sample.
    pub instant: DateTime<Utc>,
    #[serde(flatten)]
    pub point: GeodeticPoint,
}

/// An ordered run of sub-satellite points.
///
/// Longitudes jump across ±180° as recorded; consumers drawing a continuous
/// line must split at the discontinuity.
#[derive(Debug, Clone, PartialEq)]
pub struct GroundTrack {
    pub samples: Vec<TrackSample>,
    /// Set when either end of the run exceeds the element age threshold.
    pub staleness: Option<StalenessWarning>,
}

impl GroundTrack {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn latitudes(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.point.latitude_deg)
    }

    pub fn longitudes(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.point.longitude_deg)
    }

    /// Geodetic points in time order, without timestamps.
    pub fn points(&self) -> Vec<GeodeticPoint> {
        self.samples.iter().map(|s| s.point).collect()
    }

    /// Export as CSV with an RFC 3339 timestamp column.
    pub fn to_csv(&self) -> String {
        let mut out = String::with_capacity(CSV_HEADER.len() + 1 + self.samples.len() * 56);
        out.push_str(CSV_HEADER);
        out.push('\n');

        for sample in &self.samples {
            // Writing to a String cannot fail
            let _ = writeln!(
                out,
                "{},{:.6},{:.6},{:.3}",
                sample.instant.to_rfc3339_opts(SecondsFormat::Millis, true),
                sample.point.latitude_deg,
                sample.point.longitude_deg,
                sample.point.altitude_km
            );
        }
        out
    }
}
