//! Propagator tunables.

use chrono::TimeDelta;

/// Default element age beyond which a staleness advisory is attached.
pub const DEFAULT_STALENESS_THRESHOLD_DAYS: i64 = 3;

/// Largest staleness threshold representable through [`PropagatorConfig::with_staleness_days`].
pub const MAX_STALENESS_THRESHOLD_DAYS: f64 = 36_525.0;

/// Whether J2 secular drift of the node and perigee is applied by default.
pub const DEFAULT_APPLY_J2: bool = true;

/// Configuration for [`super::Propagator`].
#[derive(Debug, Clone, PartialEq)]
pub struct PropagatorConfig {
    /// Element age (either side of epoch) that triggers a staleness advisory.
    ///
    /// Default: 3 days.
    pub staleness_threshold: TimeDelta,

    /// Apply J2 secular drift to the right ascension and argument of perigee.
    ///
    /// The drift is zero at epoch. Default: enabled.
    pub apply_j2: bool,
}

impl Default for PropagatorConfig {
    fn default() -> Self {
        Self {
            staleness_threshold: TimeDelta::days(DEFAULT_STALENESS_THRESHOLD_DAYS),
            apply_j2: DEFAULT_APPLY_J2,
        }
    }
}

impl PropagatorConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the staleness threshold.
    pub fn with_staleness_threshold(mut self, threshold: TimeDelta) -> Self {
        self.staleness_threshold = threshold;
        self
    }

    /// Set the staleness threshold in (fractional) days.
    ///
    /// Values are clamped to `[0, MAX_STALENESS_THRESHOLD_DAYS]`; NaN means zero.
    pub fn with_staleness_days(self, days: f64) -> Self {
        let days = days.clamp(0.0, MAX_STALENESS_THRESHOLD_DAYS);
        let secs = (days * 86_400.0).round() as i64;
        self.with_staleness_threshold(TimeDelta::seconds(secs))
    }

    /// Enable or disable J2 secular drift.
    pub fn with_j2(mut self, apply: bool) -> Self {
        self.apply_j2 = apply;
        self
    }

    /// Staleness threshold in days.
    pub fn staleness_threshold_days(&self) -> f64 {
        self.staleness_threshold.num_seconds() as f64 / 86_400.0
    }
}
