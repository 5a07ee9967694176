//! Crate-level error type.
//!
//! Each component reports failures through its own error enum; query
//! functions surface them as [`PredictError`]. A window without passes is a
//! successful, empty result and never an error.

use thiserror::Error;

use crate::frame::GeometryError;
use crate::propagator::ConvergenceError;
use crate::source::SourceError;
use crate::tle::ParseError;

/// Result type for prediction queries.
pub type Result<T> = std::result::Result<T, PredictError>;

/// Errors surfaced by the query API.
#[derive(Debug, Error)]
pub enum PredictError {
    /// Malformed element text.
    #[error("Element parse error: {0}")]
    Parse(#[from] ParseError),

    /// The Kepler solver exceeded its iteration cap.
    #[error("Propagation error: {0}")]
    Convergence(#[from] ConvergenceError),

    /// Degenerate observer or satellite geometry.
    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),

    /// The element text had no record matching the designator.
    #[error("No element record matching '{designator}'")]
    NotFound { designator: String },

    /// The element text provider failed.
    #[error("Element source error: {0}")]
    Source(#[from] SourceError),

    /// Query arguments are unusable (non-positive step, inverted window, ...).
    #[error("Invalid query: {0}")]
    InvalidQuery(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = PredictError::NotFound {
            designator: "HUBBLE".to_string(),
        };
        assert_eq!(err.to_string(), "No element record matching 'HUBBLE'");
    }

    #[test]
    fn test_from_parse_error() {
        let parse = ParseError::LineLength {
            line: 1,
            expected: 69,
            actual: 12,
        };
        let err: PredictError = parse.into();
        assert!(matches!(err, PredictError::Parse(_)));
        assert!(err.to_string().contains("expected 69 characters"));
    }

    #[test]
    fn test_source_of_convergence_error() {
        use std::error::Error as _;

        let err: PredictError = ConvergenceError {
            mean_anomaly: 1.0,
            eccentricity: 0.99,
            iterations: 50,
            residual: 1e-3,
        }
        .into();
        assert!(err.source().is_some());
    }
}
