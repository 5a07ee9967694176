//! Conversions between UTC instants and the floating-point time scales used
//! by the propagation and frame math.

use chrono::{DateTime, TimeDelta, TimeZone, Utc};

/// Seconds from `from` to `to` (negative when `to` is earlier).
#[inline]
pub fn seconds_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    let delta = to - from;
    match delta.num_nanoseconds() {
        Some(ns) => ns as f64 * 1e-9,
        // Beyond ±292 years nanosecond counts overflow; milliseconds suffice there
        None => delta.num_milliseconds() as f64 * 1e-3,
    }
}

/// Shift an instant by a (possibly fractional, possibly negative) number of seconds.
///
/// The offset is rounded to the nearest nanosecond.
#[inline]
pub fn offset_by_seconds(instant: DateTime<Utc>, seconds: f64) -> DateTime<Utc> {
    instant + TimeDelta::nanoseconds((seconds * 1e9).round() as i64)
}

/// The J2000.0 reference epoch (2000-01-01 12:00:00 UTC).
pub fn j2000() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0)
        .single()
        .unwrap_or_default()
}

/// Days elapsed since J2000.0.
#[inline]
pub fn days_since_j2000(instant: DateTime<Utc>) -> f64 {
    seconds_between(j2000(), instant) / 86_400.0
}

/// Julian date of an instant (UTC, treated as UT1).
#[inline]
pub fn julian_date(instant: DateTime<Utc>) -> f64 {
    2_451_545.0 + days_since_j2000(instant)
}
