//! Orbit propagation.
//!
//! Advances an [`OrbitalElementSet`](crate::tle::OrbitalElementSet) to an
//! arbitrary instant and produces an inertial [`StateVector`] together with
//! the updated [`MeanElements`].
//!
//! # Example
//!
//! ```
//! use satpass::propagator::Propagator;
//! use satpass::tle::parse_lines;
//!
//! let set = parse_lines(
//!     "ISS (ZARYA)",
//!     "1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927",
//!     "2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537",
//! )?;
//! let propagator = Propagator::new(set.clone());
//! let result = propagator.propagate(set.epoch())?;
//! assert!(result.staleness.is_none());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod analytic;
mod config;
mod kepler;
mod state;

pub use analytic::{semi_major_axis_km, Propagator};
pub use config::{
    PropagatorConfig, DEFAULT_APPLY_J2, DEFAULT_STALENESS_THRESHOLD_DAYS,
    MAX_STALENESS_THRESHOLD_DAYS,
};
pub use kepler::{
    solve_kepler, solve_kepler_with, true_anomaly, ConvergenceError, KEPLER_MAX_ITERATIONS,
    KEPLER_TOLERANCE,
};
pub use state::{MeanElements, Propagation, StalenessWarning, StateVector};
