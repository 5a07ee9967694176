//! Fixed-step ground track sampling.

use chrono::{DateTime, TimeDelta, Utc};
use tracing::{debug, warn};

use super::types::{GroundTrack, TrackSample};
use crate::error::{PredictError, Result};
use crate::frame::inertial_to_geodetic;
use crate::propagator::{Propagator, StalenessWarning};

/// Upper bound on samples per call.
pub const MAX_TRACK_SAMPLES: i64 = 1_000_000;

/// Sample the sub-satellite point from `start` for `duration` every `step`.
///
/// Produces `floor(duration / step) + 1` samples; sample `i` is at exactly
/// `start + i·step`. Deterministic for identical arguments.
///
/// # Errors
///
/// - [`PredictError::InvalidQuery`] for a non-positive step, a negative
///   duration or more than [`MAX_TRACK_SAMPLES`] samples.
/// - Propagation or geometry failures of any sample.
pub fn sample_ground_track(
    propagator: &Propagator,
    start: DateTime<Utc>,
    duration: TimeDelta,
    step: TimeDelta,
) -> Result<GroundTrack> {
    let count = sample_count(duration, step)?;

    let mut samples = Vec::with_capacity(count as usize);
    for i in 0..count {
        // count <= MAX_TRACK_SAMPLES, so i fits in i32
        let instant = start + step * (i as i32);
        let state = propagator.state_at(instant)?;
        let point = inertial_to_geodetic(&state.position, instant)?;
        samples.push(TrackSample { instant, point });
    }

    let end = start + step * ((count - 1) as i32);
    let staleness = worst_staleness(propagator, start, end);
    if let Some(warning) = &staleness {
        warn!(
            catalog_number = propagator.elements().catalog_number(),
            "{}", warning
        );
    }

    debug!(
        samples = samples.len(),
        %start,
        %end,
        "Sampled ground track"
    );

    Ok(GroundTrack { samples, staleness })
}

/// `floor(duration / step) + 1`, validated.
pub fn sample_count(duration: TimeDelta, step: TimeDelta) -> Result<i64> {
    if step <= TimeDelta::zero() {
        return Err(PredictError::InvalidQuery(format!(
            "track step must be positive, got {} s",
            step.num_milliseconds() as f64 / 1000.0
        )));
    }
    if duration < TimeDelta::zero() {
        return Err(PredictError::InvalidQuery(format!(
            "track duration must not be negative, got {} s",
            duration.num_milliseconds() as f64 / 1000.0
        )));
    }

    let (Some(duration_ns), Some(step_ns)) = (duration.num_nanoseconds(), step.num_nanoseconds())
    else {
        return Err(PredictError::InvalidQuery(
            "track duration is too long".to_string(),
        ));
    };

    let count = duration_ns / step_ns + 1;
    if count > MAX_TRACK_SAMPLES {
        return Err(PredictError::InvalidQuery(format!(
            "track would have {} samples (limit {})",
            count, MAX_TRACK_SAMPLES
        )));
    }
    Ok(count)
}

/// The advisory for whichever end of `[start, end]` lies farther from epoch.
pub(crate) fn worst_staleness(
    propagator: &Propagator,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Option<StalenessWarning> {
    match (propagator.staleness_at(start), propagator.staleness_at(end)) {
        (Some(a), Some(b)) => Some(if a.age_days >= b.age_days { a } else { b }),
        (a, b) => a.or(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tle::parse_lines;

    fn iss() -> Propagator {
        Propagator::new(
            parse_lines(
                "ISS (ZARYA)",
                "1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927",
                "2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537",
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_sample_count_rounds_down() {
        assert_eq!(
            sample_count(TimeDelta::minutes(90), TimeDelta::minutes(1)).unwrap(),
            91
        );
        assert_eq!(
            sample_count(TimeDelta::seconds(100), TimeDelta::seconds(30)).unwrap(),
            4
        );
        assert_eq!(
            sample_count(TimeDelta::zero(), TimeDelta::seconds(30)).unwrap(),
            1
        );
    }

    #[test]
    fn test_invalid_arguments() {
        assert!(matches!(
            sample_count(TimeDelta::minutes(1), TimeDelta::zero()),
            Err(PredictError::InvalidQuery(_))
        ));
        assert!(matches!(
            sample_count(TimeDelta::minutes(1), TimeDelta::seconds(-5)),
            Err(PredictError::InvalidQuery(_))
        ));
        assert!(matches!(
            sample_count(TimeDelta::minutes(-1), TimeDelta::seconds(5)),
            Err(PredictError::InvalidQuery(_))
        ));
        assert!(matches!(
            sample_count(TimeDelta::days(365), TimeDelta::milliseconds(1)),
            Err(PredictError::InvalidQuery(_))
        ));
    }

    #[test]
    fn test_sample_instants_are_exact() {
        let propagator = iss();
        let start = propagator.elements().epoch();
        let step = TimeDelta::milliseconds(12_345);
        let track = sample_ground_track(&propagator, start, TimeDelta::minutes(10), step).unwrap();

        assert_eq!(track.len(), 49);
        for (i, sample) in track.samples.iter().enumerate() {
            assert_eq!(sample.instant, start + step * (i as i32));
        }
        assert!(track.staleness.is_none());
    }

    #[test]
    fn test_altitude_and_latitude_bounds() {
        let propagator = iss();
        let start = propagator.elements().epoch();
        let track = sample_ground_track(
            &propagator,
            start,
            TimeDelta::minutes(180),
            TimeDelta::minutes(2),
        )
        .unwrap();

        for sample in &track.samples {
            // Geodetic latitude peaks slightly above the inclination
            assert!(sample.point.latitude_deg.abs() <= 52.0);
            assert!((300.0..450.0).contains(&sample.point.altitude_km));
        }
    }

    #[test]
    fn test_stale_track_reports_farthest_end() {
        let propagator = iss();
        let start = propagator.elements().epoch() + TimeDelta::days(2);
        let track = sample_ground_track(
            &propagator,
            start,
            TimeDelta::days(2),
            TimeDelta::hours(1),
        )
        .unwrap();

        let warning = track.staleness.unwrap();
        assert!((warning.age_days - 4.0).abs() < 1e-9);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_count_matches_floor(
                duration_s in 0i64..200_000,
                step_s in 1i64..5_000
            ) {
                let count = sample_count(
                    TimeDelta::seconds(duration_s),
                    TimeDelta::seconds(step_s),
                )?;
                prop_assert_eq!(count, duration_s / step_s + 1);
            }
        }
    }
}
