//! Element record parsing
//!
//! Decodes the fixed-width two-line element format into an immutable
//! [`OrbitalElementSet`], and extracts individual records from provider text
//! holding many of them.
//!
//! # Example
//!
//! ```ignore
//! use satpass::tle::{find_record, parse_lines};
//!
//! let set = parse_lines("ISS (ZARYA)", line1, line2)?;
//! let iss = find_record(&stations_txt, "ISS")?;
//! ```

mod catalog;
mod error;
mod parser;
mod types;

pub use catalog::{find_record, parse_records, split_records, RawRecord};
pub use error::ParseError;
pub use parser::{checksum_valid, compute_checksum, parse_lines, LINE_LENGTH};
pub use types::{
    normalize_radians, Designator, DriftTerms, KeplerianElements, OrbitalElementSet,
    SECONDS_PER_DAY,
};
