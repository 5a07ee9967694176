//! Horizon event detector tunables.

use crate::error::{PredictError, Result};

/// Default coarse sampling step in seconds.
pub const DEFAULT_COARSE_STEP_SECS: f64 = 30.0;

/// Default refinement tolerance in seconds.
pub const DEFAULT_TOLERANCE_SECS: f64 = 1.0;

/// Default iteration cap for each refinement.
pub const DEFAULT_MAX_ITERATIONS: usize = 64;

/// Configuration for [`super::HorizonEventDetector`].
///
/// Passes shorter than the coarse step can fall between samples and be
/// missed; shrink the step for low thresholds or short arcs.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectorConfig {
    /// Spacing of the coarse elevation scan (seconds).
    ///
    /// Default: 30 s
    pub coarse_step_secs: f64,

    /// Width at which a crossing or culmination bracket counts as converged
    /// (seconds).
    ///
    /// Default: 1 s
    pub tolerance_secs: f64,

    /// Iteration cap per bracket; a soft bound on refinement time.
    ///
    /// Default: 64
    pub max_iterations: usize,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            coarse_step_secs: DEFAULT_COARSE_STEP_SECS,
            tolerance_secs: DEFAULT_TOLERANCE_SECS,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl DetectorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_coarse_step_secs(mut self, secs: f64) -> Self {
        self.coarse_step_secs = secs;
        self
    }

    pub fn with_tolerance_secs(mut self, secs: f64) -> Self {
        self.tolerance_secs = secs;
        self
    }

    pub fn with_max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = iterations;
        self
    }

    /// Reject non-finite or non-positive step and tolerance values.
    pub fn validate(&self) -> Result<()> {
        if !self.coarse_step_secs.is_finite() || self.coarse_step_secs <= 0.0 {
            return Err(PredictError::InvalidQuery(format!(
                "coarse step must be positive, got {} s",
                self.coarse_step_secs
            )));
        }
        if !self.tolerance_secs.is_finite() || self.tolerance_secs <= 0.0 {
            return Err(PredictError::InvalidQuery(format!(
                "refinement tolerance must be positive, got {} s",
                self.tolerance_secs
            )));
        }
        if self.max_iterations == 0 {
            return Err(PredictError::InvalidQuery(
                "iteration cap must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DetectorConfig::default();
        assert_eq!(config.coarse_step_secs, 30.0);
        assert_eq!(config.tolerance_secs, 1.0);
        assert_eq!(config.max_iterations, 64);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        assert!(DetectorConfig::new()
            .with_coarse_step_secs(0.0)
            .validate()
            .is_err());
        assert!(DetectorConfig::new()
            .with_coarse_step_secs(f64::NAN)
            .validate()
            .is_err());
        assert!(DetectorConfig::new()
            .with_tolerance_secs(-1.0)
            .validate()
            .is_err());
        assert!(DetectorConfig::new()
            .with_max_iterations(0)
            .validate()
            .is_err());
        assert!(DetectorConfig::new()
            .with_coarse_step_secs(10.0)
            .with_tolerance_secs(0.1)
            .validate()
            .is_ok());
    }
}
