//! Ground track sampling
//!
//! Sub-satellite points at a fixed step, recomputed per call. No smoothing
//! or interpolation is applied between samples.

mod sampler;
mod types;

pub(crate) use sampler::worst_staleness;
pub use sampler::{sample_count, sample_ground_track, MAX_TRACK_SAMPLES};
pub use types::{GroundTrack, TrackSample, CSV_HEADER};
