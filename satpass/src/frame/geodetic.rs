//! Inertial to geodetic conversion on the WGS-84 ellipsoid.

use chrono::{DateTime, Utc};
use nalgebra::Vector3;
use serde::Serialize;

use super::sidereal::inertial_to_ecef;
use super::GeometryError;
use crate::constants::{WGS84_A_KM, WGS84_E2};

/// Convergence tolerance on geodetic latitude (radians).
const LATITUDE_TOLERANCE: f64 = 1e-12;

/// Fixed-point iteration cap; converges in a handful of steps near the Earth.
const LATITUDE_MAX_ITERATIONS: usize = 20;

/// Distance from the polar axis below which the point is treated as polar (km).
const POLAR_AXIS_EPSILON_KM: f64 = 1e-9;

/// A point on or above the WGS-84 ellipsoid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeodeticPoint {
    /// Geodetic latitude in degrees, `[-90, 90]`.
    pub latitude_deg: f64,
    /// Longitude in degrees, `[-180, 180)`.
    pub longitude_deg: f64,
    /// Height above the ellipsoid in kilometres.
    pub altitude_km: f64,
}

/// Normalise a longitude in degrees to `[-180, 180)`.
#[inline]
pub fn normalize_longitude(longitude_deg: f64) -> f64 {
    let wrapped = (longitude_deg + 180.0).rem_euclid(360.0) - 180.0;
    // rem_euclid may round up to exactly 360 for tiny negative inputs
    if wrapped >= 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// Convert an inertial position (km) at `instant` to geodetic coordinates.
///
/// # Errors
///
/// Returns [`GeometryError::DegeneratePosition`] for a non-finite position or
/// one at the Earth's centre.
pub fn inertial_to_geodetic(
    position: &Vector3<f64>,
    instant: DateTime<Utc>,
) -> Result<GeodeticPoint, GeometryError> {
    ecef_to_geodetic(&inertial_to_ecef(position, instant))
}

/// Convert an Earth-fixed position (km) to geodetic coordinates.
pub fn ecef_to_geodetic(ecef: &Vector3<f64>) -> Result<GeodeticPoint, GeometryError> {
    if !ecef.iter().all(|c| c.is_finite()) || ecef.norm() == 0.0 {
        return Err(GeometryError::DegeneratePosition {
            x: ecef.x,
            y: ecef.y,
            z: ecef.z,
        });
    }

    let p = ecef.x.hypot(ecef.y);
    let z = ecef.z;

    if p < POLAR_AXIS_EPSILON_KM {
        let polar_radius = WGS84_A_KM * (1.0 - WGS84_E2).sqrt();
        return Ok(GeodeticPoint {
            latitude_deg: 90.0_f64.copysign(z),
            longitude_deg: 0.0,
            altitude_km: z.abs() - polar_radius,
        });
    }

    let mut lat = z.atan2(p * (1.0 - WGS84_E2));
    for _ in 0..LATITUDE_MAX_ITERATIONS {
        let sin_lat = lat.sin();
        let n = WGS84_A_KM / (1.0 - WGS84_E2 * sin_lat * sin_lat).sqrt();
        let next = (z + WGS84_E2 * n * sin_lat).atan2(p);
        let done = (next - lat).abs() < LATITUDE_TOLERANCE;
        lat = next;
        if done {
            break;
        }
    }

    let (sin_lat, cos_lat) = lat.sin_cos();
    let altitude_km =
        p * cos_lat + z * sin_lat - WGS84_A_KM * (1.0 - WGS84_E2 * sin_lat * sin_lat).sqrt();

    Ok(GeodeticPoint {
        latitude_deg: lat.to_degrees(),
        longitude_deg: normalize_longitude(ecef.y.atan2(ecef.x).to_degrees()),
        altitude_km,
    })
}

/// Earth-fixed position (km) of a geodetic point.
pub fn geodetic_to_ecef(latitude_deg: f64, longitude_deg: f64, altitude_km: f64) -> Vector3<f64> {
    let (sin_lat, cos_lat) = latitude_deg.to_radians().sin_cos();
    let (sin_lon, cos_lon) = longitude_deg.to_radians().sin_cos();
    let n = WGS84_A_KM / (1.0 - WGS84_E2 * sin_lat * sin_lat).sqrt();

    Vector3::new(
        (n + altitude_km) * cos_lat * cos_lon,
        (n + altitude_km) * cos_lat * sin_lon,
        (n * (1.0 - WGS84_E2) + altitude_km) * sin_lat,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_equator_prime_meridian() {
        let point = ecef_to_geodetic(&Vector3::new(WGS84_A_KM + 400.0, 0.0, 0.0)).unwrap();
        assert_relative_eq!(point.latitude_deg, 0.0, epsilon = 1e-12);
        assert_relative_eq!(point.longitude_deg, 0.0, epsilon = 1e-12);
        assert_relative_eq!(point.altitude_km, 400.0, epsilon = 1e-9);
    }

    #[test]
    fn test_north_pole() {
        let point = ecef_to_geodetic(&Vector3::new(0.0, 0.0, 7_000.0)).unwrap();
        assert_eq!(point.latitude_deg, 90.0);
        assert_relative_eq!(point.altitude_km, 7_000.0 - 6_356.752_314, epsilon = 1e-5);
    }

    #[test]
    fn test_south_pole() {
        let point = ecef_to_geodetic(&Vector3::new(0.0, 0.0, -6_356.752_314_245)).unwrap();
        assert_eq!(point.latitude_deg, -90.0);
        assert!(point.altitude_km.abs() < 1e-6);
    }

    #[test]
    fn test_round_trip_known_site() {
        // Delhi, 216 m
        let ecef = geodetic_to_ecef(28.6139, 77.2090, 0.216);
        let point = ecef_to_geodetic(&ecef).unwrap();
        assert_relative_eq!(point.latitude_deg, 28.6139, epsilon = 1e-9);
        assert_relative_eq!(point.longitude_deg, 77.2090, epsilon = 1e-9);
        assert_relative_eq!(point.altitude_km, 0.216, epsilon = 1e-9);
    }

    #[test]
    fn test_western_longitude_is_negative() {
        let ecef = geodetic_to_ecef(40.0, -105.0, 1.6);
        let point = ecef_to_geodetic(&ecef).unwrap();
        assert_relative_eq!(point.longitude_deg, -105.0, epsilon = 1e-9);
    }

    #[test]
    fn test_degenerate_positions_rejected() {
        assert!(matches!(
            ecef_to_geodetic(&Vector3::zeros()),
            Err(GeometryError::DegeneratePosition { .. })
        ));
        assert!(ecef_to_geodetic(&Vector3::new(f64::NAN, 0.0, 0.0)).is_err());
    }

    #[test]
    fn test_normalize_longitude() {
        assert_eq!(normalize_longitude(180.0), -180.0);
        assert_eq!(normalize_longitude(-180.0), -180.0);
        assert_eq!(normalize_longitude(190.0), -170.0);
        assert_eq!(normalize_longitude(-190.0), 170.0);
        assert_eq!(normalize_longitude(720.0), 0.0);
        assert_eq!(normalize_longitude(45.5), 45.5);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_geodetic_ranges(
                x in -50_000.0..50_000.0_f64,
                y in -50_000.0..50_000.0_f64,
                z in -50_000.0..50_000.0_f64
            ) {
                prop_assume!(Vector3::new(x, y, z).norm() > 100.0);
                let point = ecef_to_geodetic(&Vector3::new(x, y, z))?;
                prop_assert!((-90.0..=90.0).contains(&point.latitude_deg));
                prop_assert!((-180.0..180.0).contains(&point.longitude_deg));
                prop_assert!(point.altitude_km.is_finite());
            }

            #[test]
            fn test_geodetic_round_trip(
                lat in -89.9..89.9_f64,
                lon in -179.9..179.9_f64,
                alt in 0.0..2_000.0_f64
            ) {
                let point = ecef_to_geodetic(&geodetic_to_ecef(lat, lon, alt))?;
                prop_assert!((point.latitude_deg - lat).abs() < 1e-8);
                prop_assert!((point.longitude_deg - lon).abs() < 1e-8);
                prop_assert!((point.altitude_km - alt).abs() < 1e-6);
            }
        }
    }
}
