//! Physical constants.
//!
//! Propagation uses the WGS-72 values that two-line element sets are fitted
//! with; geodetic conversion uses the WGS-84 ellipsoid.

/// Earth gravitational parameter, WGS-72 (km³/s²).
pub const MU_KM3_S2: f64 = 398_600.8;

/// Equatorial radius used with J2, WGS-72 (km).
pub const GRAVITY_RADIUS_KM: f64 = 6_378.135;

/// Second zonal harmonic, WGS-72.
pub const J2: f64 = 0.001_082_616;

/// WGS-84 semi-major axis (km).
pub const WGS84_A_KM: f64 = 6_378.137;

/// WGS-84 flattening.
pub const WGS84_F: f64 = 1.0 / 298.257_223_563;

/// WGS-84 first eccentricity squared.
pub const WGS84_E2: f64 = WGS84_F * (2.0 - WGS84_F);

/// Earth rotation rate (rad/s).
pub const EARTH_ROTATION_RAD_S: f64 = 7.292_115_146_706_979e-5;
