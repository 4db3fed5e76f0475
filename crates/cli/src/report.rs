//! End-of-run report rendering.
//!
//! Reports go to stdout; logs go to stderr so `--output json` stays parseable.

use anyhow::Result;
use serde::Serialize;

use animal_etl_pipeline::{RunMode, RunOutcome, RunReport, RunStats};

use crate::args::OutputFormat;

#[derive(Serialize)]
struct JsonReport<'a> {
    outcome: &'static str,
    mode: &'static str,
    failure: Option<String>,
    duration_seconds: Option<f64>,
    success_rate: f64,
    batches_attempted: usize,
    stats: &'a RunStats,
}

fn outcome_label(outcome: RunOutcome) -> &'static str {
    match outcome {
        RunOutcome::Success => "success",
        RunOutcome::Failure => "failure",
    }
}

fn mode_label(mode: RunMode) -> &'static str {
    match mode {
        RunMode::Normal => "normal",
        RunMode::DryRun => "dry_run",
    }
}

/// Render a run report in the requested format.
pub fn render(report: &RunReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(report)),
        OutputFormat::Json => render_json(report),
    }
}

fn render_text(report: &RunReport) -> String {
    let mut out = report.stats.to_string();
    out.push('\n');
    out.push_str(&format!("Outcome: {}", outcome_label(report.outcome).to_uppercase()));
    if report.mode == RunMode::DryRun {
        out.push_str(" (dry run, nothing submitted)");
    }
    if let Some(ref failure) = report.failure {
        out.push_str(&format!("\nReason: {failure}"));
    }
    out
}

fn render_json(report: &RunReport) -> Result<String> {
    let json = JsonReport {
        outcome: outcome_label(report.outcome),
        mode: mode_label(report.mode),
        failure: report.failure.as_ref().map(ToString::to_string),
        duration_seconds: report
            .stats
            .duration()
            .map(|d| d.num_milliseconds() as f64 / 1000.0),
        success_rate: report.stats.success_rate(),
        batches_attempted: report.stats.batches_attempted(),
        stats: &report.stats,
    };
    Ok(serde_json::to_string_pretty(&json)?)
}
