//! Ground observer value.

use std::fmt;

use nalgebra::Vector3;
use serde::Serialize;

use crate::frame::{geodetic_to_ecef, normalize_longitude, GeometryError};

/// A fixed ground observer, constant for the duration of a query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ObserverLocation {
    latitude_deg: f64,
    longitude_deg: f64,
    height_m: f64,
}

impl ObserverLocation {
    /// Create a validated observer location.
    ///
    /// Longitude is normalised to `[-180, 180)`.
    ///
    /// # Errors
    ///
    /// Non-finite inputs or a latitude outside `[-90, 90]` are rejected.
    pub fn new(latitude_deg: f64, longitude_deg: f64, height_m: f64) -> Result<Self, GeometryError> {
        if !latitude_deg.is_finite() || !(-90.0..=90.0).contains(&latitude_deg) {
            return Err(GeometryError::InvalidLatitude(latitude_deg));
        }
        if !longitude_deg.is_finite() {
            return Err(GeometryError::InvalidLongitude(longitude_deg));
        }
        if !height_m.is_finite() {
            return Err(GeometryError::InvalidHeight(height_m));
        }

        Ok(Self {
            latitude_deg,
            longitude_deg: normalize_longitude(longitude_deg),
            height_m,
        })
    }

    /// Observer at sea level.
    pub fn at_sea_level(latitude_deg: f64, longitude_deg: f64) -> Result<Self, GeometryError> {
        Self::new(latitude_deg, longitude_deg, 0.0)
    }

    pub fn latitude_deg(&self) -> f64 {
        self.latitude_deg
    }

    pub fn longitude_deg(&self) -> f64 {
        self.longitude_deg
    }

    /// Height above the WGS-84 ellipsoid in metres.
    pub fn height_m(&self) -> f64 {
        self.height_m
    }

    /// Earth-fixed position in kilometres.
    pub fn ecef(&self) -> Vector3<f64> {
        geodetic_to_ecef(self.latitude_deg, self.longitude_deg, self.height_m / 1000.0)
    }
}

impl fmt::Display for ObserverLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ns = if self.latitude_deg < 0.0 { 'S' } else { 'N' };
        let ew = if self.longitude_deg < 0.0 { 'W' } else { 'E' };
        write!(
            f,
            "{:.4}°{} {:.4}°{}",
            self.latitude_deg.abs(),
            ns,
            self.longitude_deg.abs(),
            ew
        )?;
        if self.height_m != 0.0 {
            write!(f, " {:.0} m", self.height_m)?;
        }
        Ok(())
    }
}
