//! Propagation outputs.

use std::fmt;

use chrono::{DateTime, Utc};
use nalgebra::Vector3;

/// Position and velocity in the Earth-centred inertial frame.
///
/// Derived per query, never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateVector {
    /// Instant the state applies to.
    pub instant: DateTime<Utc>,
    /// Position in kilometres.
    pub position: Vector3<f64>,
    /// Velocity in kilometres per second.
    pub velocity: Vector3<f64>,
}

impl StateVector {
    /// Distance from the Earth's centre in kilometres.
    pub fn radius_km(&self) -> f64 {
        self.position.norm()
    }

    /// Inertial speed in kilometres per second.
    pub fn speed_km_s(&self) -> f64 {
        self.velocity.norm()
    }

    /// Specific angular momentum vector (km²/s).
    pub fn angular_momentum(&self) -> Vector3<f64> {
        self.position.cross(&self.velocity)
    }
}

/// Mean elements after secular update to the propagation instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeanElements {
    /// Mean anomaly in radians, `[0, 2π)`.
    pub mean_anomaly: f64,
    /// Eccentric anomaly in radians.
    pub eccentric_anomaly: f64,
    /// True anomaly in radians, `[0, 2π)`.
    pub true_anomaly: f64,
    /// Right ascension of the ascending node in radians, `[0, 2π)`.
    pub raan: f64,
    /// Argument of perigee in radians, `[0, 2π)`.
    pub arg_perigee: f64,
    /// Inclination in radians.
    pub inclination: f64,
    pub eccentricity: f64,
    pub semi_major_axis_km: f64,
    /// Mean motion in revolutions per day.
    pub mean_motion: f64,
}

/// Advisory that the element set is old relative to the query instant.
///
/// Never blocks computation; accuracy degrades with element age.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StalenessWarning {
    /// Absolute element age at the query instant in days.
    pub age_days: f64,
    /// Configured threshold in days.
    pub threshold_days: f64,
}

impl fmt::Display for StalenessWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "element set is {:.1} days from epoch (threshold {:.1} days); accuracy is degraded",
            self.age_days, self.threshold_days
        )
    }
}

/// Result of propagating an element set to one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Propagation {
    pub state: StateVector,
    pub elements: MeanElements,
    pub staleness: Option<StalenessWarning>,
}

impl Propagation {
    pub fn instant(&self) -> DateTime<Utc> {
        self.state.instant
    }
}
