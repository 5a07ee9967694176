//! Observer-relative look angles.

use chrono::{DateTime, Utc};
use nalgebra::Vector3;
use serde::Serialize;

use super::sidereal::inertial_to_ecef;
use super::GeometryError;
use crate::observer::ObserverLocation;

/// Ranges below this (km) leave the line of sight undefined.
const MIN_RANGE_KM: f64 = 1e-3;

/// Azimuth, elevation and slant range from a ground observer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TopocentricView {
    /// Clockwise from true north, `[0, 360)` degrees.
    pub azimuth_deg: f64,
    /// Signed angle above the local horizontal plane, degrees.
    pub elevation_deg: f64,
    pub range_km: f64,
}

impl TopocentricView {
    /// True when the satellite is at or above `min_elevation_deg`.
    pub fn is_above(&self, min_elevation_deg: f64) -> bool {
        self.elevation_deg >= min_elevation_deg
    }
}

/// Look angles from `observer` to an inertial position (km) at `instant`.
///
/// The relative vector is formed in the Earth-fixed frame and rotated into
/// the observer's South-East-Zenith basis.
///
/// # Errors
///
/// [`GeometryError::CoincidentObserver`] when the range is below one metre,
/// [`GeometryError::DegeneratePosition`] for a non-finite satellite position.
pub fn look_angles(
    position: &Vector3<f64>,
    instant: DateTime<Utc>,
    observer: &ObserverLocation,
) -> Result<TopocentricView, GeometryError> {
    if !position.iter().all(|c| c.is_finite()) {
        return Err(GeometryError::DegeneratePosition {
            x: position.x,
            y: position.y,
            z: position.z,
        });
    }

    let relative = inertial_to_ecef(position, instant) - observer.ecef();
    let range_km = relative.norm();
    if range_km < MIN_RANGE_KM {
        return Err(GeometryError::CoincidentObserver { range_km });
    }

    let (sin_lat, cos_lat) = observer.latitude_deg().to_radians().sin_cos();
    let (sin_lon, cos_lon) = observer.longitude_deg().to_radians().sin_cos();

    let south = sin_lat * cos_lon * relative.x + sin_lat * sin_lon * relative.y
        - cos_lat * relative.z;
    let east = -sin_lon * relative.x + cos_lon * relative.y;
    let zenith = cos_lat * cos_lon * relative.x
        + cos_lat * sin_lon * relative.y
        + sin_lat * relative.z;

    let elevation_deg = (zenith / range_km).clamp(-1.0, 1.0).asin().to_degrees();
    let azimuth_deg = east.atan2(-south).to_degrees().rem_euclid(360.0);
    // rem_euclid can round to exactly 360 for tiny negative angles
    let azimuth_deg = if azimuth_deg >= 360.0 { 0.0 } else { azimuth_deg };

    Ok(TopocentricView {
        azimuth_deg,
        elevation_deg,
        range_km,
    })
}
