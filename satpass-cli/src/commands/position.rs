//! Position command - state vector and sub-satellite point at one instant.

use std::fmt::Write as _;

use clap::Args;
use satpass::frame::{inertial_to_geodetic, look_angles};
use satpass::query::propagate_with;
use satpass::{
    GeodeticPoint, ObserverLocation, OrbitalElementSet, PredictError, Propagation,
    TopocentricView,
};
use serde_json::json;

use super::common::{
    resolve_elements, resolve_observer, resolve_start, write_output, ElementArgs, ObserverArgs,
};
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the position command.
#[derive(Debug, Clone, Args)]
pub struct PositionArgs {
    #[command(flatten)]
    pub elements: ElementArgs,

    // Look angles are added when a city or coordinates are given
    #[command(flatten)]
    pub observer: ObserverArgs,

    /// Instant, RFC 3339 or "YYYY-MM-DD HH:MM:SS" UTC (default: now)
    #[arg(long)]
    pub at: Option<String>,

    /// Print a JSON document instead of text
    #[arg(long)]
    pub json: bool,
}

impl PositionArgs {
    fn wants_look_angles(&self) -> bool {
        self.observer.city.is_some() || self.observer.lat.is_some()
    }
}

/// Everything the position command reports.
pub struct PositionReport {
    pub propagation: Propagation,
    pub point: GeodeticPoint,
    pub view: Option<(ObserverLocation, TopocentricView)>,
}

/// Run the position command.
pub fn run(args: PositionArgs, log_level: Option<&str>) -> Result<(), CliError> {
    let runner = CliRunner::new(log_level)?;
    runner.log_startup("position");
    let config = runner.config();

    let elements = resolve_elements(&args.elements, config)?;
    let instant = resolve_start(args.at.as_deref())?;
    let observer = if args.wants_look_angles() {
        Some(resolve_observer(&args.observer, config)?)
    } else {
        None
    };

    let propagation = propagate_with(&elements, instant, &config.propagator_config())?;
    let report = build_report(propagation, observer)?;

    let output = if args.json {
        render_json(&elements, &report)?
    } else {
        render_text(&elements, &report)
    };
    write_output(&output)
}

/// Derive the geodetic point and optional look angles from a propagation.
pub fn build_report(
    propagation: Propagation,
    observer: Option<ObserverLocation>,
) -> Result<PositionReport, CliError> {
    let state = &propagation.state;
    let point = inertial_to_geodetic(&state.position, state.instant).map_err(PredictError::from)?;
    let view = match observer {
        Some(observer) => {
            let view = look_angles(&state.position, state.instant, &observer)
                .map_err(PredictError::from)?;
            Some((observer, view))
        }
        None => None,
    };

    Ok(PositionReport {
        propagation,
        point,
        view,
    })
}

pub fn render_text(elements: &OrbitalElementSet, report: &PositionReport) -> String {
    let state = &report.propagation.state;
    let mut out = String::new();
    let _ = writeln!(out, "Satellite: {}", elements);
    let _ = writeln!(
        out,
        "Instant:   {}",
        state.instant.format("%Y-%m-%d %H:%M:%S%.3f UTC")
    );
    if let Some(warning) = &report.propagation.staleness {
        let _ = writeln!(out, "Warning:   {}", warning);
    }
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Position (km):    {:>12.3} {:>12.3} {:>12.3}",
        state.position.x, state.position.y, state.position.z
    );
    let _ = writeln!(
        out,
        "Velocity (km/s):  {:>12.6} {:>12.6} {:>12.6}",
        state.velocity.x, state.velocity.y, state.velocity.z
    );
    let _ = writeln!(
        out,
        "Sub-satellite:    lat {:.4}°  lon {:.4}°  alt {:.1} km",
        report.point.latitude_deg, report.point.longitude_deg, report.point.altitude_km
    );

    if let Some((observer, view)) = &report.view {
        let visibility = if view.is_above(0.0) {
            "above horizon"
        } else {
            "below horizon"
        };
        let _ = writeln!(
            out,
            "From {}: az {:.1}°  el {:.1}°  range {:.0} km ({})",
            observer, view.azimuth_deg, view.elevation_deg, view.range_km, visibility
        );
    }
    out
}

pub fn render_json(
    elements: &OrbitalElementSet,
    report: &PositionReport,
) -> Result<String, CliError> {
    let state = &report.propagation.state;
    let elements_at = &report.propagation.elements;
    let document = json!({
        "satellite": {
            "name": elements.name(),
            "catalog_number": elements.catalog_number(),
            "epoch": elements.epoch(),
        },
        "instant": state.instant,
        "position_km": [state.position.x, state.position.y, state.position.z],
        "velocity_km_s": [state.velocity.x, state.velocity.y, state.velocity.z],
        "mean_anomaly_deg": elements_at.mean_anomaly.to_degrees(),
        "true_anomaly_deg": elements_at.true_anomaly.to_degrees(),
        "semi_major_axis_km": elements_at.semi_major_axis_km,
        "geodetic": report.point,
        "observer": report.view.as_ref().map(|(observer, _)| observer),
        "look_angles": report.view.as_ref().map(|(_, view)| view),
        "staleness": report.propagation.staleness.map(|w| w.to_string()),
    });
    let mut text = serde_json::to_string_pretty(&document)?;
    text.push('\n');
    Ok(text)
}
