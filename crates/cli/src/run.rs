//! The `animal-etl` run.
//!
//! Builds a client scoped to this run, drives the pipeline and races it
//! against Ctrl+C.

use anyhow::{Context, Result};
use tracing::Instrument;

use animal_etl_client::{AnimalClient, MetricsCollector};
use animal_etl_config::Config;
use animal_etl_pipeline::{Pipeline, RunMode, RunReport};

use crate::cancellation::{CancellationToken, Cancelled};

/// Run the pipeline once.
///
/// Returns [`Cancelled`] if the token trips first. The client and its
/// connection pool are dropped when this returns, on every path.
pub async fn run_pipeline(
    config: &Config,
    mode: RunMode,
    metrics: MetricsCollector,
    cancel: &CancellationToken,
) -> Result<RunReport> {
    let client = AnimalClient::builder()
        .from_config(config)
        .metrics(metrics)
        .build()
        .context("Failed to build Animal API client")?;

    let pipeline = Pipeline::from_config(&client, &config.pipeline).with_mode(mode);
    let span = tracing::info_span!("etl_run", mode = ?mode, batch_size = pipeline.batch_size());

    tokio::select! {
        report = pipeline.run().instrument(span) => Ok(report),
        _ = cancel.cancelled() => {
            tracing::warn!("Run interrupted, stopping before completion");
            Err(Cancelled.into())
        }
    }
}
