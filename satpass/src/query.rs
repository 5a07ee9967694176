//! Query API
//!
//! The three pure entry points over an element set. Each builds its own
//! [`Propagator`], holds no state between calls and returns identical
//! results for identical arguments.
//!
//! # Example
//!
//! ```
//! use chrono::TimeDelta;
//! use satpass::observer::ObserverLocation;
//! use satpass::query::{ground_track, visibility_events};
//! use satpass::tle::parse_lines;
//!
//! let set = parse_lines(
//!     "ISS (ZARYA)",
//!     "1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927",
//!     "2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537",
//! )?;
//!
//! let track = ground_track(&set, set.epoch(), TimeDelta::minutes(90), TimeDelta::minutes(1))?;
//! assert_eq!(track.len(), 91);
//!
//! let delhi = ObserverLocation::at_sea_level(28.6139, 77.2090)?;
//! let prediction = visibility_events(
//!     &set,
//!     &delhi,
//!     set.epoch(),
//!     set.epoch() + TimeDelta::hours(24),
//!     30.0,
//! )?;
//! for event in &prediction.events {
//!     println!("{}", event);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use chrono::{DateTime, TimeDelta, Utc};

use crate::error::Result;
use crate::observer::ObserverLocation;
use crate::propagator::{Propagation, Propagator, PropagatorConfig};
use crate::tle::OrbitalElementSet;
use crate::track::{sample_ground_track, GroundTrack};
use crate::visibility::{DetectorConfig, HorizonEventDetector, PassPrediction};

/// State vector and mean elements at `instant`, with a staleness advisory
/// when the element set is old relative to it.
pub fn propagate(elements: &OrbitalElementSet, instant: DateTime<Utc>) -> Result<Propagation> {
    propagate_with(elements, instant, &PropagatorConfig::default())
}

pub fn propagate_with(
    elements: &OrbitalElementSet,
    instant: DateTime<Utc>,
    config: &PropagatorConfig,
) -> Result<Propagation> {
    let propagator = Propagator::with_config(elements.clone(), config.clone());
    Ok(propagator.propagate(instant)?)
}

/// Sub-satellite points from `start` for `duration` every `step`.
pub fn ground_track(
    elements: &OrbitalElementSet,
    start: DateTime<Utc>,
    duration: TimeDelta,
    step: TimeDelta,
) -> Result<GroundTrack> {
    ground_track_with(elements, start, duration, step, &PropagatorConfig::default())
}

pub fn ground_track_with(
    elements: &OrbitalElementSet,
    start: DateTime<Utc>,
    duration: TimeDelta,
    step: TimeDelta,
    config: &PropagatorConfig,
) -> Result<GroundTrack> {
    let propagator = Propagator::with_config(elements.clone(), config.clone());
    sample_ground_track(&propagator, start, duration, step)
}

/// Rise, Culminate and Set events over `[window_start, window_end]` at or
/// above `min_elevation_deg`.
pub fn visibility_events(
    elements: &OrbitalElementSet,
    observer: &ObserverLocation,
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
    min_elevation_deg: f64,
) -> Result<PassPrediction> {
    visibility_events_with(
        elements,
        observer,
        window_start,
        window_end,
        min_elevation_deg,
        &PropagatorConfig::default(),
        &DetectorConfig::default(),
    )
}

pub fn visibility_events_with(
    elements: &OrbitalElementSet,
    observer: &ObserverLocation,
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
    min_elevation_deg: f64,
    propagator_config: &PropagatorConfig,
    detector_config: &DetectorConfig,
) -> Result<PassPrediction> {
    let propagator = Propagator::with_config(elements.clone(), propagator_config.clone());
    let detector = HorizonEventDetector::with_config(
        &propagator,
        *observer,
        min_elevation_deg,
        detector_config.clone(),
    )?;
    detector.detect(window_start, window_end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PredictError;
    use crate::tle::parse_lines;

    fn iss() -> OrbitalElementSet {
        parse_lines(
            "ISS (ZARYA)",
            "1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927",
            "2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537",
        )
        .unwrap()
    }

    #[test]
    fn test_propagate_matches_propagator() {
        let set = iss();
        let instant = set.epoch() + TimeDelta::minutes(17);
        let via_query = propagate(&set, instant).unwrap();
        let direct = Propagator::new(set).propagate(instant).unwrap();
        assert_eq!(via_query, direct);
    }

    #[test]
    fn test_ground_track_rejects_zero_step() {
        let set = iss();
        let result = ground_track(&set, set.epoch(), TimeDelta::minutes(1), TimeDelta::zero());
        assert!(matches!(result, Err(PredictError::InvalidQuery(_))));
    }

    #[test]
    fn test_visibility_rejects_nan_threshold() {
        let set = iss();
        let observer = ObserverLocation::at_sea_level(0.0, 0.0).unwrap();
        let result = visibility_events(
            &set,
            &observer,
            set.epoch(),
            set.epoch() + TimeDelta::hours(1),
            f64::NAN,
        );
        assert!(matches!(result, Err(PredictError::InvalidQuery(_))));
    }

    #[test]
    fn test_custom_detector_config() {
        let set = iss();
        let observer = ObserverLocation::at_sea_level(28.6139, 77.2090).unwrap();
        let prediction = visibility_events_with(
            &set,
            &observer,
            set.epoch(),
            set.epoch() + TimeDelta::hours(24),
            10.0,
            &PropagatorConfig::default(),
            &DetectorConfig::default()
                .with_coarse_step_secs(20.0)
                .with_tolerance_secs(0.5),
        )
        .unwrap();
        assert_eq!(prediction.min_elevation_deg, 10.0);
        for pair in prediction.events.windows(2) {
            assert!(pair[0].instant < pair[1].instant);
        }
    }
}
