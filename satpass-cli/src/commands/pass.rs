//! Pass command - list Rise/Culminate/Set events for an observer.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use clap::Args;
use satpass::query::visibility_events_with;
use satpass::{ObserverLocation, OrbitalElementSet, PassPrediction};
use serde_json::json;

use super::common::{
    duration_arg, positive, resolve_elements, resolve_observer, resolve_start, window_end,
    write_output, ElementArgs, ObserverArgs,
};
use crate::error::CliError;
use crate::runner::CliRunner;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Arguments for the pass command.
#[derive(Debug, Clone, Args)]
pub struct PassArgs {
    #[command(flatten)]
    pub elements: ElementArgs,

    #[command(flatten)]
    pub observer: ObserverArgs,

    /// Minimum elevation in degrees (default: prediction.min_elevation)
    #[arg(long, allow_negative_numbers = true)]
    pub min_elevation: Option<f64>,

    /// Window length in hours (default: prediction.window_hours)
    #[arg(long)]
    pub hours: Option<f64>,

    /// Window start, RFC 3339 or "YYYY-MM-DD HH:MM:SS" UTC (default: now)
    #[arg(long)]
    pub start: Option<String>,

    /// Print a JSON document instead of text
    #[arg(long)]
    pub json: bool,
}

/// Run the pass command.
pub fn run(args: PassArgs, log_level: Option<&str>) -> Result<(), CliError> {
    let runner = CliRunner::new(log_level)?;
    runner.log_startup("pass");
    let config = runner.config();

    let elements = resolve_elements(&args.elements, config)?;
    let observer = resolve_observer(&args.observer, config)?;
    let start = resolve_start(args.start.as_deref())?;
    let hours = positive(
        "--hours",
        args.hours.unwrap_or(config.prediction.window_hours),
    )?;
    let end = window_end(start, duration_arg("--hours", hours * 3_600.0)?)?;
    let min_elevation = args
        .min_elevation
        .unwrap_or(config.prediction.min_elevation_deg);

    let prediction = visibility_events_with(
        &elements,
        &observer,
        start,
        end,
        min_elevation,
        &config.propagator_config(),
        &config.detector_config(),
    )?;

    let output = if args.json {
        render_json(&elements, &observer, &prediction)?
    } else {
        render_text(&elements, &observer, &prediction)
    };
    write_output(&output)
}

/// Human-readable listing, one block per pass.
pub fn render_text(
    elements: &OrbitalElementSet,
    observer: &ObserverLocation,
    prediction: &PassPrediction,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Satellite: {}", elements);
    let _ = writeln!(out, "Observer:  {}", observer);
    let _ = writeln!(
        out,
        "Window:    {} to {}, elevation >= {}°",
        format_instant(prediction.window_start),
        format_instant(prediction.window_end),
        prediction.min_elevation_deg
    );

    if let Some(warning) = &prediction.staleness {
        let _ = writeln!(out);
        let _ = writeln!(out, "Warning: {}", warning);
    }

    let _ = writeln!(out);
    if prediction.is_empty() {
        let _ = writeln!(
            out,
            "No passes above {}° in this window.",
            prediction.min_elevation_deg
        );
        return out;
    }

    for (i, pass) in prediction.passes().iter().enumerate() {
        let _ = writeln!(out, "Pass {}", i + 1);
        for event in [pass.rise, pass.culminate, pass.set].into_iter().flatten() {
            let _ = writeln!(
                out,
                "  {:<34} az {:>5.1}°  el {:>4.1}°  range {:>6.0} km",
                event.to_string(),
                event.azimuth_deg,
                event.elevation_deg,
                event.range_km
            );
        }
        if let Some(duration) = pass.duration() {
            let _ = writeln!(
                out,
                "  Duration: {}m {:02}s",
                duration.num_minutes(),
                duration.num_seconds() % 60
            );
        }
        let _ = writeln!(out);
    }

    out
}

/// JSON document with the satellite, observer, window and events.
pub fn render_json(
    elements: &OrbitalElementSet,
    observer: &ObserverLocation,
    prediction: &PassPrediction,
) -> Result<String, CliError> {
    let document = json!({
        "satellite": {
            "name": elements.name(),
            "catalog_number": elements.catalog_number(),
            "epoch": elements.epoch(),
        },
        "observer": observer,
        "window_start": prediction.window_start,
        "window_end": prediction.window_end,
        "min_elevation_deg": prediction.min_elevation_deg,
        "staleness": prediction.staleness.map(|w| w.to_string()),
        "events": prediction.events,
    });
    let mut text = serde_json::to_string_pretty(&document)?;
    text.push('\n');
    Ok(text)
}

fn format_instant(instant: DateTime<Utc>) -> String {
    instant.format(TIME_FORMAT).to_string()
}
