//! Coarse-scan-then-refine horizon event detection.

use chrono::{DateTime, Utc};
use tracing::{debug, trace, warn};

use super::config::DetectorConfig;
use super::event::{EventKind, PassPrediction, VisibilityEvent};
use super::root::{bisect, golden_section_max};
use crate::error::{PredictError, Result};
use crate::frame::{look_angles, TopocentricView};
use crate::instant::{offset_by_seconds, seconds_between};
use crate::observer::ObserverLocation;
use crate::propagator::Propagator;
use crate::track::worst_staleness;

/// Upper bound on coarse elevation samples per detection.
pub const MAX_SCAN_SAMPLES: usize = 5_000_000;

/// A coarse elevation sample, `t` in seconds from window start.
#[derive(Debug, Clone, Copy)]
struct Sample {
    t: f64,
    elevation: f64,
}

/// A maximal run of coarse samples at or above the threshold.
#[derive(Debug, Clone, Copy)]
struct Segment {
    /// Refined upward crossing, if it lies inside the window.
    rise: Option<f64>,
    /// Refined downward crossing, if it lies inside the window.
    set: Option<f64>,
    /// Index of the highest coarse sample in the run.
    peak: usize,
}

/// Finds Rise, Culminate and Set events of one satellite over one observer.
///
/// # Algorithm
///
/// 1. Sample elevation every `coarse_step_secs` from the window start, plus
///    the window end itself.
/// 2. A sample pair going from below to at-or-above the threshold brackets a
///    Rise; the reverse brackets a Set. Each bracket is bisected down to
///    `tolerance_secs`, reporting the end on the above-threshold side.
/// 3. Within each above-threshold run the maximum is refined by
///    golden-section search around the highest coarse sample.
///
/// Only crossings strictly inside the window are reported; a pass already
/// in progress at either edge keeps its unpaired events.
#[derive(Debug, Clone)]
pub struct HorizonEventDetector<'a> {
    propagator: &'a Propagator,
    observer: ObserverLocation,
    min_elevation_deg: f64,
    config: DetectorConfig,
}

impl<'a> HorizonEventDetector<'a> {
    /// Create a detector with default configuration.
    ///
    /// # Errors
    ///
    /// [`PredictError::InvalidQuery`] when the threshold is not a finite
    /// angle within `[-90, 90]` degrees.
    pub fn new(
        propagator: &'a Propagator,
        observer: ObserverLocation,
        min_elevation_deg: f64,
    ) -> Result<Self> {
        Self::with_config(
            propagator,
            observer,
            min_elevation_deg,
            DetectorConfig::default(),
        )
    }

    /// Create a detector with custom configuration.
    pub fn with_config(
        propagator: &'a Propagator,
        observer: ObserverLocation,
        min_elevation_deg: f64,
        config: DetectorConfig,
    ) -> Result<Self> {
        if !min_elevation_deg.is_finite() || !(-90.0..=90.0).contains(&min_elevation_deg) {
            return Err(PredictError::InvalidQuery(format!(
                "minimum elevation must be within [-90, 90] degrees, got {}",
                min_elevation_deg
            )));
        }
        config.validate()?;

        Ok(Self {
            propagator,
            observer,
            min_elevation_deg,
            config,
        })
    }

    pub fn observer(&self) -> &ObserverLocation {
        &self.observer
    }

    pub fn min_elevation_deg(&self) -> f64 {
        self.min_elevation_deg
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Look angles at `instant`.
    pub fn view_at(&self, instant: DateTime<Utc>) -> Result<TopocentricView> {
        let state = self.propagator.state_at(instant)?;
        Ok(look_angles(&state.position, instant, &self.observer)?)
    }

    /// Elevation in degrees at `instant`; the function the detector scans.
    pub fn elevation_at(&self, instant: DateTime<Utc>) -> Result<f64> {
        self.view_at(instant).map(|view| view.elevation_deg)
    }

    /// Detect events in `[window_start, window_end]`.
    ///
    /// A window without crossings yields an empty prediction. An empty
    /// window (`start == end`) yields no events.
    ///
    /// # Errors
    ///
    /// - [`PredictError::InvalidQuery`] if `window_end` precedes `window_start`
    ///   or the coarse scan would take more than [`MAX_SCAN_SAMPLES`] samples.
    /// - Geometry or propagation failures while sampling.
    pub fn detect(
        &self,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    ) -> Result<PassPrediction> {
        if window_end < window_start {
            return Err(PredictError::InvalidQuery(format!(
                "window end {} precedes start {}",
                window_end, window_start
            )));
        }

        let staleness = worst_staleness(self.propagator, window_start, window_end);
        if let Some(warning) = &staleness {
            warn!(
                catalog_number = self.propagator.elements().catalog_number(),
                "{}", warning
            );
        }

        let window = seconds_between(window_start, window_end);
        let events = if window > 0.0 {
            self.scan(window_start, window)?
        } else {
            Vec::new()
        };

        debug!(
            events = events.len(),
            %window_start,
            %window_end,
            min_elevation = self.min_elevation_deg,
            "Detected horizon events"
        );

        Ok(PassPrediction {
            window_start,
            window_end,
            min_elevation_deg: self.min_elevation_deg,
            events,
            staleness,
        })
    }

    fn scan(&self, origin: DateTime<Utc>, window: f64) -> Result<Vec<VisibilityEvent>> {
        let samples = self.coarse_scan(origin, window)?;
        let segments = self.segments(origin, window, &samples)?;

        let mut events = Vec::with_capacity(segments.len() * 3);
        for segment in &segments {
            let culminate = self.culminate(origin, window, &samples, segment)?;

            if let Some(t) = segment.rise {
                events.push(self.event_at(EventKind::Rise, origin, t)?);
            }
            if let Some(t) = culminate {
                events.push(self.event_at(EventKind::Culminate, origin, t)?);
            }
            if let Some(t) = segment.set {
                events.push(self.event_at(EventKind::Set, origin, t)?);
            }
        }

        Ok(events)
    }

    fn coarse_scan(&self, origin: DateTime<Utc>, window: f64) -> Result<Vec<Sample>> {
        let step = self.config.coarse_step_secs;
        let mut samples = Vec::with_capacity(scan_sample_count(window, step)?);

        let mut k = 0u64;
        loop {
            let t = k as f64 * step;
            if t >= window {
                break;
            }
            samples.push(Sample {
                t,
                elevation: self.elevation_at_offset(origin, t)?,
            });
            k += 1;
        }
        samples.push(Sample {
            t: window,
            elevation: self.elevation_at_offset(origin, window)?,
        });

        Ok(samples)
    }

    /// Split the coarse samples into above-threshold runs and refine the
    /// crossings that bound them.
    fn segments(
        &self,
        origin: DateTime<Utc>,
        window: f64,
        samples: &[Sample],
    ) -> Result<Vec<Segment>> {
        let mut segments = Vec::new();
        let mut open: Option<Segment> = None;

        for (i, sample) in samples.iter().enumerate() {
            let above = self.is_above(sample.elevation);

            match open.as_mut() {
                None if above => {
                    let rise = if i == 0 {
                        None
                    } else {
                        self.refine_crossing(origin, window, samples[i - 1].t, sample.t, true)?
                    };
                    open = Some(Segment {
                        rise,
                        set: None,
                        peak: i,
                    });
                }
                Some(segment) if above => {
                    if sample.elevation > samples[segment.peak].elevation {
                        segment.peak = i;
                    }
                }
                Some(segment) => {
                    segment.set =
                        self.refine_crossing(origin, window, samples[i - 1].t, sample.t, false)?;
                    segments.push(*segment);
                    open = None;
                }
                None => {}
            }
        }

        segments.extend(open);
        Ok(segments)
    }

    /// Bisect a crossing in `(lo, hi)` and return the above-threshold end,
    /// or `None` when it does not lie strictly inside the window.
    fn refine_crossing(
        &self,
        origin: DateTime<Utc>,
        window: f64,
        lo: f64,
        hi: f64,
        rising: bool,
    ) -> Result<Option<f64>> {
        let (lo, hi) = bisect(
            |t| Ok::<_, PredictError>(self.is_above(self.elevation_at_offset(origin, t)?)),
            lo,
            hi,
            self.config.tolerance_secs,
            self.config.max_iterations,
        )?;
        let t = if rising { hi } else { lo };

        trace!(
            kind = if rising { "rise" } else { "set" },
            offset_secs = t,
            bracket_secs = hi - lo,
            "Refined crossing"
        );

        Ok((t > 0.0 && t < window).then_some(t))
    }

    /// Refined time of maximum elevation for a segment, if reportable.
    fn culminate(
        &self,
        origin: DateTime<Utc>,
        window: f64,
        samples: &[Sample],
        segment: &Segment,
    ) -> Result<Option<f64>> {
        let last = samples.len() - 1;
        let starts_at_edge = segment.rise.is_none();
        let ends_at_edge = segment.set.is_none();

        // A maximum on the window edge is not a culmination inside the window
        if (starts_at_edge && segment.peak == 0) || (ends_at_edge && segment.peak == last) {
            return Ok(None);
        }

        let lower = segment.rise.unwrap_or(0.0);
        let upper = segment.set.unwrap_or(window);
        let a = samples[segment.peak.saturating_sub(1)].t.max(lower);
        let b = samples[(segment.peak + 1).min(last)].t.min(upper);

        let (mut t, elevation) = golden_section_max(
            |t| self.elevation_at_offset(origin, t),
            a,
            b,
            self.config.tolerance_secs,
            self.config.max_iterations,
        )?;

        // Unimodality can fail on a coarse bracket; never report below the sample
        let peak = samples[segment.peak];
        if elevation < peak.elevation {
            t = peak.t;
        }

        let lower_ok = if starts_at_edge {
            t > self.config.tolerance_secs
        } else {
            t > lower
        };
        let upper_ok = if ends_at_edge {
            t < window - self.config.tolerance_secs
        } else {
            t < upper
        };

        Ok((lower_ok && upper_ok).then_some(t))
    }

    fn event_at(&self, kind: EventKind, origin: DateTime<Utc>, t: f64) -> Result<VisibilityEvent> {
        let instant = offset_by_seconds(origin, t);
        let view = self.view_at(instant)?;
        Ok(VisibilityEvent {
            kind,
            instant,
            elevation_deg: view.elevation_deg,
            azimuth_deg: view.azimuth_deg,
            range_km: view.range_km,
        })
    }

    fn elevation_at_offset(&self, origin: DateTime<Utc>, t: f64) -> Result<f64> {
        self.elevation_at(offset_by_seconds(origin, t))
    }

    #[inline]
    fn is_above(&self, elevation: f64) -> bool {
        elevation >= self.min_elevation_deg
    }
}

/// Number of coarse samples for `window` seconds at `step`, window end included.
fn scan_sample_count(window: f64, step: f64) -> Result<usize> {
    let intervals = (window / step).ceil();
    if !intervals.is_finite() || intervals >= MAX_SCAN_SAMPLES as f64 {
        return Err(PredictError::InvalidQuery(format!(
            "coarse scan of {} s every {} s exceeds {} samples",
            window, step, MAX_SCAN_SAMPLES
        )));
    }
    Ok(intervals as usize + 1)
}
