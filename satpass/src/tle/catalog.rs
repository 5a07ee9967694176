//! Record extraction from multi-record element text.
//!
//! Providers return text holding many records, each a name line followed by
//! two data lines. Blank lines are skipped and a record without a name line
//! is accepted with an empty name.

use tracing::debug;

use super::parser::parse_lines;
use super::types::OrbitalElementSet;
use super::ParseError;
use crate::error::{PredictError, Result};

/// One undecoded record as found in provider text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawRecord<'a> {
    pub name: &'a str,
    pub line1: &'a str,
    pub line2: &'a str,
}

impl RawRecord<'_> {
    /// Decode this record.
    pub fn parse(&self) -> std::result::Result<OrbitalElementSet, ParseError> {
        parse_lines(self.name, self.line1, self.line2)
    }

    /// Catalog number text from line 1 (columns 3-7), if present.
    pub fn catalog_field(&self) -> Option<&str> {
        self.line1.get(2..7).map(str::trim)
    }

    /// Whether this record matches a designator by name substring
    /// (case-insensitive) or by exact catalog number.
    pub fn matches(&self, designator: &str) -> bool {
        let designator = designator.trim();
        if designator.is_empty() {
            return false;
        }

        if self.catalog_field() == Some(designator) {
            return true;
        }

        self.name
            .to_lowercase()
            .contains(&designator.to_lowercase())
    }
}

/// Split provider text into raw records.
pub fn split_records(text: &str) -> Vec<RawRecord<'_>> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim_end)
        .filter(|l| !l.trim().is_empty())
        .collect();

    let mut records = Vec::new();
    let mut pending_name: Option<&str> = None;
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];
        let next = lines.get(i + 1).copied();

        match next {
            Some(next) if is_data_line(line, '1') && is_data_line(next, '2') => {
                records.push(RawRecord {
                    name: pending_name.take().unwrap_or(""),
                    line1: line,
                    line2: next,
                });
                i += 2;
            }
            _ if is_data_line(line, '1') || is_data_line(line, '2') => {
                // Unpaired data line from a truncated record
                pending_name = None;
                i += 1;
            }
            _ => {
                // Three-line element files prefix names with "0 "
                let name = line.strip_prefix("0 ").unwrap_or(line).trim();
                pending_name = Some(name);
                i += 1;
            }
        }
    }

    records
}

/// Decode every record in the text, keeping per-record failures.
pub fn parse_records(text: &str) -> Vec<std::result::Result<OrbitalElementSet, ParseError>> {
    split_records(text).iter().map(RawRecord::parse).collect()
}

/// Find and decode the first record matching `designator`.
///
/// Only the matching record is decoded, so malformed records elsewhere in
/// the text do not affect the result.
pub fn find_record(text: &str, designator: &str) -> Result<OrbitalElementSet> {
    let records = split_records(text);
    let record = records
        .iter()
        .find(|r| r.matches(designator))
        .ok_or_else(|| PredictError::NotFound {
            designator: designator.to_string(),
        })?;

    debug!(
        designator,
        name = record.name,
        records = records.len(),
        "Matched element record"
    );

    Ok(record.parse()?)
}

fn is_data_line(line: &str, number: char) -> bool {
    let mut chars = line.chars();
    chars.next() == Some(number) && chars.next() == Some(' ')
}
