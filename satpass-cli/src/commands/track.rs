//! Track command - emit sub-satellite points for external plotting.

use std::fmt::Write as _;

use clap::Args;
use satpass::query::ground_track_with;
use satpass::track::GroundTrack;
use satpass::OrbitalElementSet;
use serde_json::json;

use super::common::{
    duration_arg, positive, resolve_elements, resolve_start, write_output, ElementArgs,
    OutputFormat,
};
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the track command.
#[derive(Debug, Clone, Args)]
pub struct TrackArgs {
    #[command(flatten)]
    pub elements: ElementArgs,

    /// Track length in minutes (default: track.duration_minutes)
    #[arg(long)]
    pub minutes: Option<f64>,

    /// Sampling step in seconds, millisecond resolution (default: track.step_seconds)
    #[arg(long)]
    pub step_secs: Option<f64>,

    /// First sample instant, RFC 3339 or "YYYY-MM-DD HH:MM:SS" UTC (default: now)
    #[arg(long)]
    pub start: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

/// Run the track command.
pub fn run(args: TrackArgs, log_level: Option<&str>) -> Result<(), CliError> {
    let runner = CliRunner::new(log_level)?;
    runner.log_startup("track");
    let config = runner.config();

    let elements = resolve_elements(&args.elements, config)?;
    let start = resolve_start(args.start.as_deref())?;
    let minutes = args.minutes.unwrap_or(config.track.duration_minutes);
    if !minutes.is_finite() || minutes < 0.0 {
        return Err(CliError::Argument(format!(
            "--minutes must not be negative, got {}",
            minutes
        )));
    }
    let step = positive(
        "--step-secs",
        args.step_secs.unwrap_or(config.track.step_seconds),
    )?;

    let track = ground_track_with(
        &elements,
        start,
        duration_arg("--minutes", minutes * 60.0)?,
        duration_arg("--step-secs", step)?,
        &config.propagator_config(),
    )?;

    if let Some(warning) = &track.staleness {
        eprintln!("Warning: {}", warning);
    }

    write_output(&render(&elements, &track, args.format)?)
}

/// Encode a ground track in the requested format.
pub fn render(
    elements: &OrbitalElementSet,
    track: &GroundTrack,
    format: OutputFormat,
) -> Result<String, CliError> {
    match format {
        OutputFormat::Csv => Ok(track.to_csv()),
        OutputFormat::Json => {
            let document = json!({
                "satellite": {
                    "name": elements.name(),
                    "catalog_number": elements.catalog_number(),
                    "epoch": elements.epoch(),
                },
                "staleness": track.staleness.map(|w| w.to_string()),
                "samples": track.samples,
            });
            let mut text = serde_json::to_string_pretty(&document)?;
            text.push('\n');
            Ok(text)
        }
        OutputFormat::Table => Ok(render_table(elements, track)),
    }
}

fn render_table(elements: &OrbitalElementSet, track: &GroundTrack) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Ground track: {}", elements);
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{:<23}  {:>9}  {:>10}  {:>9}",
        "Time (UTC)", "Latitude", "Longitude", "Alt (km)"
    );
    for sample in &track.samples {
        let _ = writeln!(
            out,
            "{:<23}  {:>9.4}  {:>10.4}  {:>9.1}",
            sample.instant.format("%Y-%m-%d %H:%M:%S"),
            sample.point.latitude_deg,
            sample.point.longitude_deg,
            sample.point.altitude_km
        );
    }
    out
}
