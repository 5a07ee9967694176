//! Error types for element record parsing.

use thiserror::Error;

/// Errors that can occur while parsing a two-line element record.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// A data line does not have the fixed width of the format.
    #[error("line {line}: expected {expected} characters, found {actual}")]
    LineLength {
        line: u8,
        expected: usize,
        actual: usize,
    },

    /// A data line contains non-ASCII characters.
    #[error("line {line}: contains non-ASCII characters")]
    NonAscii { line: u8 },

    /// A data line does not start with its expected line number.
    #[error("line {line}: expected line number '{line}', found '{found}'")]
    LineNumber { line: u8, found: char },

    /// A numeric field could not be decoded.
    #[error("line {line}: invalid {field} field '{value}'")]
    InvalidField {
        line: u8,
        field: &'static str,
        value: String,
    },

    /// A decoded field lies outside its physical range.
    #[error("{field} out of range: {value}")]
    OutOfRange { field: &'static str, value: f64 },

    /// The catalog numbers of the two data lines disagree.
    #[error("designator mismatch: line 1 has {line1}, line 2 has {line2}")]
    DesignatorMismatch { line1: u32, line2: u32 },

    /// The epoch does not name a valid calendar instant.
    #[error("invalid epoch: year {year}, day {day}")]
    InvalidEpoch { year: i32, day: f64 },
}
