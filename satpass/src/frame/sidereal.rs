//! Earth rotation angle.

use std::f64::consts::TAU;

use chrono::{DateTime, Utc};
use nalgebra::Vector3;

use crate::instant::days_since_j2000;

const SECONDS_PER_SIDEREAL_CIRCLE: f64 = 86_400.0;
const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;

/// Greenwich mean sidereal time in radians, `[0, 2π)`.
///
/// IAU-82 expression evaluated on the UTC instant (UT1 is approximated by UTC).
pub fn gmst(instant: DateTime<Utc>) -> f64 {
    let t = days_since_j2000(instant) / DAYS_PER_JULIAN_CENTURY;

    let seconds = 67_310.548_41
        + (876_600.0 * 3_600.0 + 8_640_184.812_866) * t
        + 0.093_104 * t * t
        - 6.2e-6 * t * t * t;

    seconds.rem_euclid(SECONDS_PER_SIDEREAL_CIRCLE) / SECONDS_PER_SIDEREAL_CIRCLE * TAU
}

/// Rotate an inertial vector into the Earth-fixed frame at `instant`.
pub fn inertial_to_ecef(inertial: &Vector3<f64>, instant: DateTime<Utc>) -> Vector3<f64> {
    rotate_z(inertial, gmst(instant))
}

/// Rotate an Earth-fixed vector into the inertial frame at `instant`.
pub fn ecef_to_inertial(ecef: &Vector3<f64>, instant: DateTime<Utc>) -> Vector3<f64> {
    rotate_z(ecef, -gmst(instant))
}

/// Frame rotation about +Z by `theta` (passive).
#[inline]
fn rotate_z(v: &Vector3<f64>, theta: f64) -> Vector3<f64> {
    let (s, c) = theta.sin_cos();
    Vector3::new(c * v.x + s * v.y, -s * v.x + c * v.y, v.z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::EARTH_ROTATION_RAD_S;
    use approx::assert_relative_eq;
    use chrono::{TimeDelta, TimeZone};

    #[test]
    fn test_gmst_at_j2000() {
        // 18h 41m 50.548s at 2000-01-01 12:00 UT
        let instant = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        assert_relative_eq!(gmst(instant).to_degrees(), 280.460_618_4, epsilon = 1e-6);
    }

    #[test]
    fn test_gmst_vallado_example() {
        // Vallado example 3-5: 1992-08-20 12:14 UT1 gives 152.578 787 886°
        let instant = Utc.with_ymd_and_hms(1992, 8, 20, 12, 14, 0).unwrap();
        assert_relative_eq!(gmst(instant).to_degrees(), 152.578_787_886, epsilon = 1e-5);
    }

    #[test]
    fn test_gmst_advances_at_earth_rate() {
        let a = Utc.with_ymd_and_hms(2024, 3, 1, 6, 0, 0).unwrap();
        let b = a + TimeDelta::seconds(60);
        let mut delta = gmst(b) - gmst(a);
        if delta < 0.0 {
            delta += TAU;
        }
        assert_relative_eq!(delta / 60.0, EARTH_ROTATION_RAD_S, max_relative = 1e-6);
    }

    #[test]
    fn test_rotation_round_trip() {
        let instant = Utc.with_ymd_and_hms(2024, 6, 15, 18, 30, 0).unwrap();
        let v = Vector3::new(6_778.0, -120.5, 2_400.0);
        let back = ecef_to_inertial(&inertial_to_ecef(&v, instant), instant);
        assert_relative_eq!(back, v, epsilon = 1e-9);
    }

    #[test]
    fn test_rotation_preserves_z_and_norm() {
        let instant = Utc.with_ymd_and_hms(2010, 1, 1, 0, 0, 0).unwrap();
        let v = Vector3::new(1.0, 2.0, 3.0);
        let r = inertial_to_ecef(&v, instant);
        assert_eq!(r.z, 3.0);
        assert_relative_eq!(r.norm(), v.norm(), epsilon = 1e-12);
    }
}
