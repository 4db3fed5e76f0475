//! Pipeline orchestrator.
//!
//! Drives one run through its phases, strictly forward:
//!
//! ```text
//! Idle -> Extracting -> Detailing -> Transforming -> Loading -> Done
//! ```
//!
//! # Failure policy
//! - Extraction failures end the run.
//! - Detail fetch and transformation failures are logged, counted and skipped.
//!   A phase that produces nothing from non-empty input ends the run.
//! - A failed batch is counted and later batches still go out. Any failed
//!   batch makes the run a failure.
//!
//! Records and batches are processed one at a time, in order.

use std::time::Instant;

use thiserror::Error;
use tracing::{debug, error, info, warn};

use animal_etl_client::{
    AnimalClient, AnimalDetail, AnimalSummary, ClientError, MetricsCollector, TransformedAnimal,
};
use animal_etl_config::PipelineConfig;
use animal_etl_config::constants::MAX_BATCH_SIZE;

use crate::stats::RunStats;
use crate::transform::transform_batch;

/// Detail fetch progress is logged every this many records.
const DETAIL_PROGRESS_INTERVAL: usize = 10;

/// Whether the run submits anything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RunMode {
    #[default]
    Normal,
    /// Extract, detail and transform, then stop before loading.
    DryRun,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Success,
    Failure,
}

impl RunOutcome {
    pub fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

/// Orchestrator state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Extracting,
    Detailing,
    Transforming,
    Loading,
    Done(RunOutcome),
}

impl Phase {
    fn rank(self) -> u8 {
        match self {
            Self::Idle => 0,
            Self::Extracting => 1,
            Self::Detailing => 2,
            Self::Transforming => 3,
            Self::Loading => 4,
            Self::Done(_) => 5,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Extracting => "extract",
            Self::Detailing => "detail",
            Self::Transforming => "transform",
            Self::Loading => "load",
            Self::Done(_) => "done",
        }
    }
}

/// Why a run ended in failure.
#[derive(Debug, Error)]
pub enum FailureReason {
    #[error("Failed to extract animals: {0}")]
    Extraction(#[source] ClientError),

    #[error("No animal details could be extracted")]
    NoDetails,

    #[error("No animals could be transformed")]
    NoTransformed,

    #[error("{failed} of {attempted} batches failed to submit")]
    BatchFailures { failed: usize, attempted: usize },
}

/// Final result of [`Pipeline::run`].
#[derive(Debug)]
pub struct RunReport {
    pub outcome: RunOutcome,
    pub mode: RunMode,
    pub stats: RunStats,
    pub failure: Option<FailureReason>,
}

impl RunReport {
    pub fn is_success(&self) -> bool {
        self.outcome.is_success()
    }
}

/// One ETL run over a borrowed client.
///
/// ```rust,ignore
/// let client = AnimalClient::builder().from_config(&config).build()?;
/// let report = Pipeline::from_config(&client, &config.pipeline).run().await;
/// ```
#[derive(Debug)]
pub struct Pipeline<'a> {
    client: &'a AnimalClient,
    batch_size: usize,
    mode: RunMode,
    metrics: MetricsCollector,
    phase: Phase,
    stats: RunStats,
}

impl<'a> Pipeline<'a> {
    /// Create a pipeline submitting batches of `batch_size`.
    ///
    /// Sizes outside `1..=100` are clamped with a warning.
    pub fn new(client: &'a AnimalClient, batch_size: usize) -> Self {
        let clamped = batch_size.clamp(1, MAX_BATCH_SIZE);
        if clamped != batch_size {
            warn!(
                requested = batch_size,
                using = clamped,
                "Batch size out of range, clamping"
            );
        }

        Self {
            client,
            batch_size: clamped,
            mode: RunMode::Normal,
            metrics: client
                .metrics()
                .cloned()
                .unwrap_or_else(MetricsCollector::disabled),
            phase: Phase::Idle,
            stats: RunStats::default(),
        }
    }

    pub fn from_config(client: &'a AnimalClient, config: &PipelineConfig) -> Self {
        Self::new(client, config.batch_size)
    }

    pub fn with_mode(mut self, mode: RunMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn mode(&self) -> RunMode {
        self.mode
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Run every phase and report the outcome.
    ///
    /// Never returns an error: failures are carried in the report. Timestamps
    /// and the summary log are produced on every path.
    pub async fn run(mut self) -> RunReport {
        self.stats.mark_started();
        info!(
            mode = ?self.mode,
            batch_size = self.batch_size,
            base_url = self.client.base_url(),
            "Starting Animal ETL run"
        );

        let failure = self.execute().await;
        let outcome = if failure.is_none() {
            RunOutcome::Success
        } else {
            RunOutcome::Failure
        };

        self.stats.mark_finished();
        self.enter(Phase::Done(outcome));
        self.log_summary(outcome, failure.as_ref());

        RunReport {
            outcome,
            mode: self.mode,
            stats: self.stats,
            failure,
        }
    }

    async fn execute(&mut self) -> Option<FailureReason> {
        let summaries = match self.extract().await {
            Ok(summaries) => summaries,
            Err(e) => return Some(FailureReason::Extraction(e)),
        };
        if summaries.is_empty() {
            warn!("No animals found to process");
            return None;
        }

        let details = self.fetch_details(&summaries).await;
        if details.is_empty() {
            error!(found = summaries.len(), "No animal details could be extracted");
            return Some(FailureReason::NoDetails);
        }

        let transformed = self.transform(&details);
        if transformed.is_empty() {
            error!(detailed = details.len(), "No animals could be transformed");
            return Some(FailureReason::NoTransformed);
        }

        if self.mode == RunMode::DryRun {
            info!(
                records = transformed.len(),
                batches = transformed.len().div_ceil(self.batch_size),
                "Dry run, skipping load phase"
            );
            return None;
        }

        self.load(&transformed).await
    }

    fn enter(&mut self, next: Phase) {
        debug_assert!(
            next.rank() > self.phase.rank(),
            "phase transitions are forward only"
        );
        debug!(from = self.phase.as_str(), to = next.as_str(), "Phase transition");
        self.phase = next;
    }

    async fn extract(&mut self) -> Result<Vec<AnimalSummary>, ClientError> {
        self.enter(Phase::Extracting);
        info!("Starting animal extraction");
        let started = Instant::now();

        let result = self.client.fetch_all_summaries().await;
        self.metrics
            .record_phase_duration(Phase::Extracting.as_str(), started.elapsed());

        match result {
            Ok(summaries) => {
                self.stats.found = summaries.len();
                self.metrics
                    .record_phase_records(Phase::Extracting.as_str(), summaries.len(), 0);
                info!(found = summaries.len(), "Extracted animals");
                Ok(summaries)
            }
            Err(e) => {
                error!(error = %e, status = ?e.status_code(), "Failed to extract animals");
                Err(e)
            }
        }
    }

    async fn fetch_details(&mut self, summaries: &[AnimalSummary]) -> Vec<AnimalDetail> {
        self.enter(Phase::Detailing);
        info!(total = summaries.len(), "Starting animal detail extraction");
        let started = Instant::now();

        let total = summaries.len();
        let mut details = Vec::with_capacity(total);
        let mut failed = 0usize;

        for (index, summary) in summaries.iter().enumerate() {
            match self.client.fetch_detail(summary.id).await {
                Ok(detail) => details.push(detail),
                Err(e) => {
                    failed += 1;
                    error!(
                        id = summary.id,
                        status = ?e.status_code(),
                        error = %e,
                        "Failed to fetch animal details"
                    );
                }
            }

            let processed = index + 1;
            if processed % DETAIL_PROGRESS_INTERVAL == 0 {
                info!(processed, total, "Detail extraction progress");
            }
        }

        self.stats.detailed = details.len();
        self.stats.failed_details = failed;
        self.metrics
            .record_phase_duration(Phase::Detailing.as_str(), started.elapsed());
        self.metrics
            .record_phase_records(Phase::Detailing.as_str(), details.len(), failed);

        info!(detailed = details.len(), failed, "Extracted animal details");
        details
    }

    fn transform(&mut self, details: &[AnimalDetail]) -> Vec<TransformedAnimal> {
        self.enter(Phase::Transforming);
        info!(total = details.len(), "Starting animal transformation");
        let started = Instant::now();

        let transformed = transform_batch(details);
        let dropped = details.len() - transformed.len();

        self.stats.transformed = transformed.len();
        self.stats.failed_transformations = dropped;
        self.metrics
            .record_phase_duration(Phase::Transforming.as_str(), started.elapsed());
        self.metrics
            .record_phase_records(Phase::Transforming.as_str(), transformed.len(), dropped);

        transformed
    }

    async fn load(&mut self, records: &[TransformedAnimal]) -> Option<FailureReason> {
        self.enter(Phase::Loading);
        info!(
            total = records.len(),
            batch_size = self.batch_size,
            "Starting to load animals"
        );
        let started = Instant::now();

        for (index, batch) in records.chunks(self.batch_size).enumerate() {
            let number = index + 1;
            info!(batch = number, size = batch.len(), "Submitting batch");

            match self.client.submit_batch(batch).await {
                Ok(()) => {
                    self.stats.submitted += batch.len();
                    self.stats.batches_submitted += 1;
                    self.metrics.record_batch(true);
                    info!(batch = number, "Batch submitted");
                }
                Err(e) => {
                    self.stats.failed_batches += 1;
                    self.metrics.record_batch(false);
                    error!(
                        batch = number,
                        size = batch.len(),
                        status = ?e.status_code(),
                        error = %e,
                        "Failed to submit batch"
                    );
                }
            }
        }

        let failed = self.stats.failed_batches;
        let attempted = self.stats.batches_attempted();
        self.metrics
            .record_phase_duration(Phase::Loading.as_str(), started.elapsed());
        self.metrics.record_phase_records(
            Phase::Loading.as_str(),
            self.stats.submitted,
            records.len() - self.stats.submitted,
        );
        info!(
            submitted = self.stats.submitted,
            batches_attempted = attempted,
            failed_batches = failed,
            "Finished loading animals"
        );

        (failed > 0).then_some(FailureReason::BatchFailures { failed, attempted })
    }

    fn log_summary(&self, outcome: RunOutcome, failure: Option<&FailureReason>) {
        for line in self.stats.to_string().lines() {
            info!("{line}");
        }

        match failure {
            None => info!(outcome = ?outcome, mode = ?self.mode, "Animal ETL run finished"),
            Some(reason) => error!(
                outcome = ?outcome,
                mode = ?self.mode,
                reason = %reason,
                "Animal ETL run finished"
            ),
        }
    }
}
