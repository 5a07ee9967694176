//! Kepler's equation solver.

use std::f64::consts::PI;

use thiserror::Error;

use crate::tle::normalize_radians;

/// Convergence tolerance on the eccentric anomaly in radians.
pub const KEPLER_TOLERANCE: f64 = 1e-8;

/// Maximum Newton iterations before giving up.
pub const KEPLER_MAX_ITERATIONS: usize = 50;

/// The Newton iteration for Kepler's equation did not converge.
///
/// Not expected for eccentricities below one; surfaced rather than
/// returning an inaccurate anomaly.
#[derive(Debug, Clone, PartialEq, Error)]
#[error(
    "Kepler solver did not converge after {iterations} iterations \
     (M = {mean_anomaly} rad, e = {eccentricity}, last step {residual:e} rad)"
)]
pub struct ConvergenceError {
    pub mean_anomaly: f64,
    pub eccentricity: f64,
    pub iterations: usize,
    pub residual: f64,
}

/// Solve `M = E - e·sin(E)` for the eccentric anomaly `E`.
///
/// `mean_anomaly` may be any finite angle; the result lies near its
/// `[0, 2π)` reduction.
pub fn solve_kepler(mean_anomaly: f64, eccentricity: f64) -> Result<f64, ConvergenceError> {
    solve_kepler_with(
        mean_anomaly,
        eccentricity,
        KEPLER_TOLERANCE,
        KEPLER_MAX_ITERATIONS,
    )
}

/// [`solve_kepler`] with an explicit tolerance and iteration cap.
pub fn solve_kepler_with(
    mean_anomaly: f64,
    eccentricity: f64,
    tolerance: f64,
    max_iterations: usize,
) -> Result<f64, ConvergenceError> {
    let m = normalize_radians(mean_anomaly);
    let e = eccentricity;

    // Starting at π keeps Newton monotone for highly eccentric orbits
    let mut ea = if e < 0.8 { m } else { PI };
    let mut residual = f64::INFINITY;

    for _ in 0..max_iterations {
        let f = ea - e * ea.sin() - m;
        let fp = 1.0 - e * ea.cos();
        let delta = f / fp;
        ea -= delta;
        residual = delta.abs();

        if residual < tolerance {
            return Ok(ea);
        }
    }

    Err(ConvergenceError {
        mean_anomaly: m,
        eccentricity: e,
        iterations: max_iterations,
        residual,
    })
}

/// True anomaly from eccentric anomaly, in `[0, 2π)`.
#[inline]
pub fn true_anomaly(eccentric_anomaly: f64, eccentricity: f64) -> f64 {
    let half = eccentric_anomaly / 2.0;
    let nu = 2.0
        * ((1.0 + eccentricity).sqrt() * half.sin())
            .atan2((1.0 - eccentricity).sqrt() * half.cos());
    normalize_radians(nu)
}
