//! Fixed-column decoding of two-line element records.
//!
//! # Record Format
//!
//! ```text
//! ISS (ZARYA)
//! 1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927
//! 2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537
//! ```
//!
//! Both data lines are exactly 69 columns. Validation checks field syntax
//! and physical ranges; the trailing checksum digit is verified but a
//! mismatch only produces a warning.

use chrono::{DateTime, Datelike, NaiveDate, TimeDelta, Utc};
use tracing::{trace, warn};

use super::types::{Designator, DriftTerms, KeplerianElements, OrbitalElementSet};
use super::ParseError;

/// Width of each data line.
pub const LINE_LENGTH: usize = 69;

/// Two-digit epoch years below this pivot belong to the 21st century.
const EPOCH_YEAR_PIVOT: i32 = 57;

/// Parse a name line and two data lines into an [`OrbitalElementSet`].
///
/// The name may be empty. Trailing whitespace (including `\r`) is ignored on
/// every line.
pub fn parse_lines(name: &str, line1: &str, line2: &str) -> Result<OrbitalElementSet, ParseError> {
    let line1 = normalize_line(line1, 1)?;
    let line2 = normalize_line(line2, 2)?;

    let catalog1 = parse_catalog_number(1, &line1[2..7])?;
    let catalog2 = parse_catalog_number(2, &line2[2..7])?;
    if catalog1 != catalog2 {
        return Err(ParseError::DesignatorMismatch {
            line1: catalog1,
            line2: catalog2,
        });
    }

    for (number, line) in [(1u8, line1), (2u8, line2)] {
        if !checksum_valid(line) {
            warn!(
                catalog_number = catalog1,
                line = number,
                "Element record checksum mismatch"
            );
        }
    }

    // Line 1
    let classification = line1[7..8].chars().next().unwrap_or('U');
    let international_designator = line1[9..17].trim().to_string();
    let epoch_year = parse_int(1, "epoch year", &line1[18..20])?;
    let epoch_day = parse_float(1, "epoch day", &line1[20..32])?;
    let epoch = parse_epoch(epoch_year as i32, epoch_day)?;
    let ndot_over_2 = parse_float(1, "mean motion derivative", &line1[33..43])?;
    let nddot_over_6 = parse_assumed_decimal(1, "mean motion second derivative", &line1[44..52])?;
    let bstar = parse_assumed_decimal(1, "bstar", &line1[53..61])?;
    let element_set_number = parse_optional_int(1, "element set number", &line1[64..68])?;

    // Line 2
    let inclination_deg = parse_float(2, "inclination", &line2[8..16])?;
    let raan_deg = parse_float(2, "right ascension", &line2[17..25])?;
    let eccentricity = parse_implied_fraction(2, "eccentricity", &line2[26..33])?;
    let arg_perigee_deg = parse_float(2, "argument of perigee", &line2[34..42])?;
    let mean_anomaly_deg = parse_float(2, "mean anomaly", &line2[43..51])?;
    let mean_motion_rev_per_day = parse_float(2, "mean motion", &line2[52..63])?;
    let revolution_number = parse_optional_int(2, "revolution number", &line2[63..68])?;

    let designator = Designator {
        name: name.trim().to_string(),
        catalog_number: catalog1,
        classification,
        international_designator,
        element_set_number,
        revolution_number,
    };

    let elements = KeplerianElements {
        mean_motion_rev_per_day,
        eccentricity,
        inclination_deg,
        raan_deg,
        arg_perigee_deg,
        mean_anomaly_deg,
    };

    let drift = DriftTerms {
        ndot_over_2,
        nddot_over_6,
        bstar,
    };

    let set = OrbitalElementSet::from_elements(designator, epoch, elements, drift)?;
    trace!(catalog_number = catalog1, epoch = %set.epoch(), "Parsed element record");
    Ok(set)
}

/// Verify the modulo-10 checksum in column 69.
///
/// Digits count at face value, minus signs count as one, everything else
/// as zero. Returns `false` for lines too short to carry a checksum.
pub fn checksum_valid(line: &str) -> bool {
    let bytes = line.as_bytes();
    if bytes.len() < LINE_LENGTH {
        return false;
    }

    let expected = match (bytes[LINE_LENGTH - 1] as char).to_digit(10) {
        Some(d) => d,
        None => return false,
    };

    compute_checksum(&line[..LINE_LENGTH - 1]) == expected
}

/// Compute the modulo-10 checksum of the first 68 columns.
pub fn compute_checksum(data: &str) -> u32 {
    data.chars()
        .map(|c| match c {
            '0'..='9' => c as u32 - '0' as u32,
            '-' => 1,
            _ => 0,
        })
        .sum::<u32>()
        % 10
}

fn normalize_line(line: &str, number: u8) -> Result<&str, ParseError> {
    let line = line.trim_end();

    if !line.is_ascii() {
        return Err(ParseError::NonAscii { line: number });
    }

    if line.len() != LINE_LENGTH {
        return Err(ParseError::LineLength {
            line: number,
            expected: LINE_LENGTH,
            actual: line.len(),
        });
    }

    let first = line.chars().next().unwrap_or(' ');
    if first.to_digit(10) != Some(number as u32) {
        return Err(ParseError::LineNumber {
            line: number,
            found: first,
        });
    }

    Ok(line)
}

fn parse_epoch(two_digit_year: i32, day: f64) -> Result<DateTime<Utc>, ParseError> {
    let year = if two_digit_year < EPOCH_YEAR_PIVOT {
        2000 + two_digit_year
    } else {
        1900 + two_digit_year
    };

    let invalid = || ParseError::InvalidEpoch { year, day };

    let start = NaiveDate::from_ymd_opt(year, 1, 1).ok_or_else(invalid)?;
    let days_in_year = NaiveDate::from_ymd_opt(year, 12, 31)
        .ok_or_else(invalid)?
        .ordinal() as f64;

    if !(1.0..days_in_year + 1.0).contains(&day) {
        return Err(invalid());
    }

    let offset_ns = ((day - 1.0) * 86_400.0 * 1e9).round() as i64;
    let midnight = start.and_hms_opt(0, 0, 0).ok_or_else(invalid)?.and_utc();

    Ok(midnight + TimeDelta::nanoseconds(offset_ns))
}

/// Catalog numbers are five digits, or Alpha-5 (a leading letter standing
/// for 10..33, skipping I and O).
fn parse_catalog_number(line: u8, raw: &str) -> Result<u32, ParseError> {
    let invalid = || ParseError::InvalidField {
        line,
        field: "catalog number",
        value: raw.to_string(),
    };

    let trimmed = raw.trim();
    let mut chars = trimmed.chars();
    let first = chars.next().ok_or_else(invalid)?;

    if first.is_ascii_alphabetic() {
        let upper = first.to_ascii_uppercase();
        if upper == 'I' || upper == 'O' {
            return Err(invalid());
        }
        let mut index = upper as u32 - 'A' as u32 + 10;
        if upper > 'I' {
            index -= 1;
        }
        if upper > 'O' {
            index -= 1;
        }
        let rest: u32 = chars.as_str().parse().map_err(|_| invalid())?;
        return Ok(index * 10_000 + rest);
    }

    trimmed.parse().map_err(|_| invalid())
}

fn parse_float(line: u8, field: &'static str, raw: &str) -> Result<f64, ParseError> {
    let value: f64 = raw.trim().parse().map_err(|_| ParseError::InvalidField {
        line,
        field,
        value: raw.to_string(),
    })?;

    if !value.is_finite() {
        return Err(ParseError::InvalidField {
            line,
            field,
            value: raw.to_string(),
        });
    }

    Ok(value)
}

fn parse_int(line: u8, field: &'static str, raw: &str) -> Result<u32, ParseError> {
    raw.trim().parse().map_err(|_| ParseError::InvalidField {
        line,
        field,
        value: raw.to_string(),
    })
}

/// Integer field that may be left blank.
fn parse_optional_int(line: u8, field: &'static str, raw: &str) -> Result<u32, ParseError> {
    if raw.trim().is_empty() {
        Ok(0)
    } else {
        parse_int(line, field, raw)
    }
}

/// Digits with an implied leading decimal point (`0006703` → 0.0006703).
fn parse_implied_fraction(line: u8, field: &'static str, raw: &str) -> Result<f64, ParseError> {
    let digits = raw.trim();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::InvalidField {
            line,
            field,
            value: raw.to_string(),
        });
    }

    format!("0.{}", digits)
        .parse()
        .map_err(|_| ParseError::InvalidField {
            line,
            field,
            value: raw.to_string(),
        })
}

/// Assumed-decimal mantissa with a signed exponent (`-11606-4` → -0.11606e-4).
fn parse_assumed_decimal(line: u8, field: &'static str, raw: &str) -> Result<f64, ParseError> {
    let invalid = || ParseError::InvalidField {
        line,
        field,
        value: raw.to_string(),
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }

    let (sign, body) = match trimmed.as_bytes()[0] {
        b'-' => (-1.0, &trimmed[1..]),
        b'+' => (1.0, &trimmed[1..]),
        _ => (1.0, trimmed),
    };

    let (mantissa, exponent) = match body.rfind(['+', '-']) {
        Some(idx) if idx > 0 => {
            let exponent: i32 = body[idx..].parse().map_err(|_| invalid())?;
            (body[..idx].trim(), exponent)
        }
        _ => (body.trim(), 0),
    };

    let fraction = parse_implied_fraction(line, field, mantissa).map_err(|_| invalid())?;
    Ok(sign * fraction * 10f64.powi(exponent))
}
