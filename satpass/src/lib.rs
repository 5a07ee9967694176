//! Satpass - Satellite pass prediction from two-line element sets
//!
//! This library propagates an orbital element set to arbitrary instants and
//! derives ground tracks and horizon events (Rise, Culminate, Set) for a
//! ground observer.
//!
//! # Components
//!
//! - [`tle`]: element record parsing and multi-record extraction
//! - [`propagator`]: mean-element analytic propagation
//! - [`frame`]: inertial to geodetic and topocentric conversion
//! - [`track`]: fixed-step ground track sampling
//! - [`visibility`]: coarse-scan-then-refine horizon event detection
//! - [`query`]: the three pure query functions over the above
//!
//! Supporting modules provide element text [`source`]s, the built-in
//! [`observer`] catalog, the INI [`config`] file and [`logging`] setup.
//!
//! All computation is synchronous and free of shared state; queries for
//! different satellites or windows may run on separate threads.

pub mod config;
pub mod constants;
pub mod error;
pub mod frame;
pub mod instant;
pub mod logging;
pub mod observer;
pub mod propagator;
pub mod query;
pub mod source;
pub mod tle;
pub mod track;
pub mod visibility;

pub use error::{PredictError, Result};
pub use frame::{GeodeticPoint, TopocentricView};
pub use observer::ObserverLocation;
pub use propagator::{Propagation, StalenessWarning, StateVector};
pub use query::{ground_track, propagate, visibility_events};
pub use tle::OrbitalElementSet;
pub use visibility::{EventKind, PassPrediction, VisibilityEvent};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
