//! Horizon event detection
//!
//! Treats elevation at an observer as a continuous function of time, scans
//! it coarsely and refines threshold crossings and maxima into
//! [`VisibilityEvent`]s.
//!
//! A window without crossings is a successful, empty [`PassPrediction`].

mod config;
mod detector;
mod event;
mod root;

pub use config::{
    DetectorConfig, DEFAULT_COARSE_STEP_SECS, DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE_SECS,
};
pub use detector::{HorizonEventDetector, MAX_SCAN_SAMPLES};
pub use event::{EventKind, Pass, PassPrediction, VisibilityEvent};
pub use root::{bisect, golden_section_max};
