//! The immutable orbital element set produced by the parser.

use std::f64::consts::TAU;
use std::fmt;

use chrono::{DateTime, Utc};

use super::ParseError;

/// Seconds in a mean solar day.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Classical mean elements used to build an [`OrbitalElementSet`] directly.
///
/// Angles are in degrees and mean motion in revolutions per day, matching
/// the units of the two-line format.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeplerianElements {
    pub mean_motion_rev_per_day: f64,
    pub eccentricity: f64,
    pub inclination_deg: f64,
    pub raan_deg: f64,
    pub arg_perigee_deg: f64,
    pub mean_anomaly_deg: f64,
}

/// An orbital element set identified by its catalog designator.
///
/// Created once (by [`super::parse_lines`] or [`OrbitalElementSet::from_elements`])
/// and never mutated afterwards. Angles are stored in radians normalised to
/// `[0, 2π)`, mean motion in revolutions per day.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitalElementSet {
    name: String,
    catalog_number: u32,
    classification: char,
    international_designator: String,
    epoch: DateTime<Utc>,
    mean_motion: f64,
    ndot_over_2: f64,
    nddot_over_6: f64,
    bstar: f64,
    eccentricity: f64,
    inclination: f64,
    raan: f64,
    arg_perigee: f64,
    mean_anomaly: f64,
    element_set_number: u32,
    revolution_number: u32,
}

/// Drift terms as encoded on line 1 of the element record.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DriftTerms {
    /// First derivative of mean motion divided by two (rev/day²).
    pub ndot_over_2: f64,
    /// Second derivative of mean motion divided by six (rev/day³).
    pub nddot_over_6: f64,
    /// B* drag term (1/earth radii).
    pub bstar: f64,
}

/// Catalog identity fields of an element record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Designator {
    pub name: String,
    pub catalog_number: u32,
    pub classification: char,
    pub international_designator: String,
    pub element_set_number: u32,
    pub revolution_number: u32,
}

impl Designator {
    /// A designator with only a name and catalog number.
    pub fn new(name: impl Into<String>, catalog_number: u32) -> Self {
        Self {
            name: name.into(),
            catalog_number,
            classification: 'U',
            ..Default::default()
        }
    }
}

impl OrbitalElementSet {
    /// Build an element set from classical elements, validating ranges.
    pub fn from_elements(
        designator: Designator,
        epoch: DateTime<Utc>,
        elements: KeplerianElements,
        drift: DriftTerms,
    ) -> Result<Self, ParseError> {
        validate(&elements, &drift)?;

        Ok(Self {
            name: designator.name,
            catalog_number: designator.catalog_number,
            classification: designator.classification,
            international_designator: designator.international_designator,
            epoch,
            mean_motion: elements.mean_motion_rev_per_day,
            ndot_over_2: drift.ndot_over_2,
            nddot_over_6: drift.nddot_over_6,
            bstar: drift.bstar,
            eccentricity: elements.eccentricity,
            inclination: elements.inclination_deg.to_radians(),
            raan: normalize_radians(elements.raan_deg.to_radians()),
            arg_perigee: normalize_radians(elements.arg_perigee_deg.to_radians()),
            mean_anomaly: normalize_radians(elements.mean_anomaly_deg.to_radians()),
            element_set_number: designator.element_set_number,
            revolution_number: designator.revolution_number,
        })
    }

    /// Satellite name from the record's name line (may be empty).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Catalog number shared by both data lines.
    pub fn catalog_number(&self) -> u32 {
        self.catalog_number
    }

    pub fn classification(&self) -> char {
        self.classification
    }

    pub fn international_designator(&self) -> &str {
        &self.international_designator
    }

    /// Instant at which the elements are exact.
    pub fn epoch(&self) -> DateTime<Utc> {
        self.epoch
    }

    /// Mean motion in revolutions per day.
    pub fn mean_motion(&self) -> f64 {
        self.mean_motion
    }

    /// Mean motion in radians per second.
    pub fn mean_motion_rad_per_sec(&self) -> f64 {
        self.mean_motion * TAU / SECONDS_PER_DAY
    }

    pub fn drift(&self) -> DriftTerms {
        DriftTerms {
            ndot_over_2: self.ndot_over_2,
            nddot_over_6: self.nddot_over_6,
            bstar: self.bstar,
        }
    }

    pub fn eccentricity(&self) -> f64 {
        self.eccentricity
    }

    /// Inclination in radians.
    pub fn inclination(&self) -> f64 {
        self.inclination
    }

    /// Right ascension of the ascending node in radians.
    pub fn raan(&self) -> f64 {
        self.raan
    }

    /// Argument of perigee in radians.
    pub fn arg_perigee(&self) -> f64 {
        self.arg_perigee
    }

    /// Mean anomaly at epoch in radians.
    pub fn mean_anomaly(&self) -> f64 {
        self.mean_anomaly
    }

    pub fn element_set_number(&self) -> u32 {
        self.element_set_number
    }

    pub fn revolution_number(&self) -> u32 {
        self.revolution_number
    }

    /// Orbital period at epoch in minutes.
    pub fn period_minutes(&self) -> f64 {
        1440.0 / self.mean_motion
    }
}

impl fmt::Display for OrbitalElementSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = if self.name.is_empty() {
            "UNNAMED"
        } else {
            self.name.as_str()
        };
        write!(
            f,
            "{} [{}] epoch {}",
            name,
            self.catalog_number,
            self.epoch.format("%Y-%m-%d %H:%M:%S UTC")
        )
    }
}

fn validate(elements: &KeplerianElements, drift: &DriftTerms) -> Result<(), ParseError> {
    let n = elements.mean_motion_rev_per_day;
    if !n.is_finite() || n <= 0.0 {
        return Err(ParseError::OutOfRange {
            field: "mean motion",
            value: n,
        });
    }

    let e = elements.eccentricity;
    if !(0.0..1.0).contains(&e) {
        return Err(ParseError::OutOfRange {
            field: "eccentricity",
            value: e,
        });
    }

    let i = elements.inclination_deg;
    if !(0.0..=180.0).contains(&i) {
        return Err(ParseError::OutOfRange {
            field: "inclination",
            value: i,
        });
    }

    let angles = [
        ("right ascension", elements.raan_deg),
        ("argument of perigee", elements.arg_perigee_deg),
        ("mean anomaly", elements.mean_anomaly_deg),
        ("mean motion derivative", drift.ndot_over_2),
        ("mean motion second derivative", drift.nddot_over_6),
        ("bstar", drift.bstar),
    ];
    for (field, value) in angles {
        if !value.is_finite() {
            return Err(ParseError::OutOfRange { field, value });
        }
    }

    Ok(())
}

/// Reduce an angle to `[0, 2π)`.
#[inline]
pub fn normalize_radians(angle: f64) -> f64 {
    let reduced = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if reduced >= TAU {
        0.0
    } else {
        reduced
    }
}
