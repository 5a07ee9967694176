//! Visibility events and their grouping into passes.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::propagator::StalenessWarning;

/// The kind of a horizon event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EventKind {
    /// Elevation crosses the threshold upwards.
    Rise,
    /// Maximum elevation of a pass.
    Culminate,
    /// Elevation crosses the threshold downwards.
    Set,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventKind::Rise => "Rise",
            EventKind::Culminate => "Culminate",
            EventKind::Set => "Set",
        };
        f.write_str(name)
    }
}

/// One horizon event with the look angles at its instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VisibilityEvent {
    pub kind: EventKind,
    pub instant: DateTime<Utc>,
    pub elevation_deg: f64,
    pub azimuth_deg: f64,
    pub range_km: f64,
}

impl fmt::Display for VisibilityEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}",
            self.kind,
            self.instant.format("%Y-%m-%d %H:%M:%S UTC")
        )
    }
}

/// Events of one pass. Members are absent when the window cuts the pass.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Pass {
    pub rise: Option<VisibilityEvent>,
    pub culminate: Option<VisibilityEvent>,
    pub set: Option<VisibilityEvent>,
}

impl Pass {
    /// Rise and Set both present.
    pub fn is_complete(&self) -> bool {
        self.rise.is_some() && self.set.is_some()
    }

    /// Highest elevation reported for the pass.
    pub fn max_elevation_deg(&self) -> Option<f64> {
        [self.rise, self.culminate, self.set]
            .iter()
            .flatten()
            .map(|e| e.elevation_deg)
            .reduce(f64::max)
    }

    /// Time from Rise to Set when both are present.
    pub fn duration(&self) -> Option<chrono::TimeDelta> {
        match (self.rise, self.set) {
            (Some(rise), Some(set)) => Some(set.instant - rise.instant),
            _ => None,
        }
    }
}

/// Result of a visibility query over one window.
#[derive(Debug, Clone, PartialEq)]
pub struct PassPrediction {
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
    pub min_elevation_deg: f64,
    /// Strictly ordered by instant.
    pub events: Vec<VisibilityEvent>,
    pub staleness: Option<StalenessWarning>,
}

impl PassPrediction {
    /// No events in the window. A normal outcome, not an error.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Group events into passes in chronological order.
    ///
    /// A Rise opens a pass and a Set closes it; events at the window edges
    /// without a partner form partial passes.
    pub fn passes(&self) -> Vec<Pass> {
        let mut passes = Vec::new();
        let mut current: Option<Pass> = None;

        for event in &self.events {
            match event.kind {
                EventKind::Rise => {
                    if let Some(open) = current.take() {
                        passes.push(open);
                    }
                    current = Some(Pass {
                        rise: Some(*event),
                        ..Pass::default()
                    });
                }
                EventKind::Culminate => {
                    if current.is_some_and(|p| p.culminate.is_some()) {
                        passes.extend(current.take());
                    }
                    current.get_or_insert_with(Pass::default).culminate = Some(*event);
                }
                EventKind::Set => {
                    let mut pass = current.take().unwrap_or_default();
                    pass.set = Some(*event);
                    passes.push(pass);
                }
            }
        }

        passes.extend(current);
        passes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone};

    fn event(kind: EventKind, minute: i64, elevation: f64) -> VisibilityEvent {
        VisibilityEvent {
            kind,
            instant: Utc.with_ymd_and_hms(2024, 1, 1, 5, 0, 0).unwrap() + TimeDelta::minutes(minute),
            elevation_deg: elevation,
            azimuth_deg: 180.0,
            range_km: 800.0,
        }
    }

    fn prediction(events: Vec<VisibilityEvent>) -> PassPrediction {
        PassPrediction {
            window_start: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            window_end: Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap(),
            min_elevation_deg: 30.0,
            events,
            staleness: None,
        }
    }

    #[test]
    fn test_event_display() {
        let e = event(EventKind::Rise, 24, 30.0);
        assert_eq!(e.to_string(), "Rise: 2024-01-01 05:24:00 UTC");
        assert_eq!(EventKind::Culminate.to_string(), "Culminate");
    }

    #[test]
    fn test_empty_prediction() {
        let p = prediction(Vec::new());
        assert!(p.is_empty());
        assert!(p.passes().is_empty());
    }

    #[test]
    fn test_complete_passes() {
        let p = prediction(vec![
            event(EventKind::Rise, 0, 30.0),
            event(EventKind::Culminate, 2, 55.0),
            event(EventKind::Set, 4, 30.0),
            event(EventKind::Rise, 90, 30.0),
            event(EventKind::Culminate, 91, 33.0),
            event(EventKind::Set, 92, 30.0),
        ]);
        let passes = p.passes();
        assert_eq!(passes.len(), 2);
        assert!(passes.iter().all(Pass::is_complete));
        assert_eq!(passes[0].max_elevation_deg(), Some(55.0));
        assert_eq!(passes[1].duration(), Some(TimeDelta::minutes(2)));
    }

    #[test]
    fn test_truncated_passes_at_window_edges() {
        let p = prediction(vec![
            event(EventKind::Culminate, 0, 40.0),
            event(EventKind::Set, 1, 30.0),
            event(EventKind::Rise, 95, 30.0),
        ]);
        let passes = p.passes();
        assert_eq!(passes.len(), 2);
        assert!(passes[0].rise.is_none());
        assert!(passes[0].culminate.is_some());
        assert!(passes[0].set.is_some());
        assert!(passes[1].rise.is_some());
        assert!(passes[1].set.is_none());
        assert_eq!(passes[1].duration(), None);
    }

    #[test]
    fn test_lone_set() {
        let p = prediction(vec![event(EventKind::Set, 3, 30.0)]);
        let passes = p.passes();
        assert_eq!(passes.len(), 1);
        assert!(passes[0].rise.is_none() && passes[0].culminate.is_none());
    }

    #[test]
    fn test_event_serializes_kind_by_name() {
        let json = serde_json::to_value(event(EventKind::Set, 0, 30.0)).unwrap();
        assert_eq!(json["kind"], "Set");
    }
}
