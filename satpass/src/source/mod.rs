//! Element text sources
//!
//! Providers of UTF-8 text holding one or more element records. Retrying a
//! failed fetch is the caller's decision; sources make a single attempt.

mod error;
mod http;
mod local;

pub use error::SourceError;
pub use http::{HttpClient, HttpElementSource, ReqwestClient, DEFAULT_TIMEOUT_SECS};
pub use local::{FileElementSource, StaticElementSource};

use tracing::info;

use crate::error::Result;
use crate::tle::{find_record, OrbitalElementSet};

/// Default element text URL (CelesTrak space stations group).
pub const DEFAULT_SOURCE_URL: &str = "https://celestrak.org/NORAD/elements/stations.txt";

/// A provider of element record text.
pub trait ElementSource {
    /// Return the full provider text.
    fn fetch(&self) -> std::result::Result<String, SourceError>;

    /// Human-readable origin for logs and messages.
    fn describe(&self) -> String;
}

/// Fetch provider text and parse the record matching `designator`.
///
/// # Errors
///
/// [`PredictError::Source`](crate::PredictError::Source) on fetch failure,
/// then as [`find_record`].
pub fn fetch_elements(source: &dyn ElementSource, designator: &str) -> Result<OrbitalElementSet> {
    let text = source.fetch()?;
    let elements = find_record(&text, designator)?;
    info!(
        source = %source.describe(),
        name = elements.name(),
        catalog_number = elements.catalog_number(),
        epoch = %elements.epoch(),
        "Loaded element set"
    );
    Ok(elements)
}
