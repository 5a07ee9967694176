use thiserror::Error;

/// Degenerate observer or satellite geometry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("Invalid observer latitude {0}°: must be finite and within [-90, 90]")]
    InvalidLatitude(f64),

    #[error("Invalid observer longitude {0}°: must be finite")]
    InvalidLongitude(f64),

    #[error("Invalid observer height {0} m: must be finite")]
    InvalidHeight(f64),

    /// Position is non-finite or at the Earth's centre.
    #[error("Degenerate position ({x}, {y}, {z}) km")]
    DegeneratePosition { x: f64, y: f64, z: f64 },

    /// Satellite and observer coincide; direction is undefined.
    #[error("Satellite coincides with observer (range {range_km} km)")]
    CoincidentObserver { range_km: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert!(GeometryError::InvalidLatitude(91.0)
            .to_string()
            .contains("91"));
        assert!(GeometryError::CoincidentObserver { range_km: 0.0 }
            .to_string()
            .contains("coincides"));
    }
}
