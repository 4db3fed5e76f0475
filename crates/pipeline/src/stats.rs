//! Run statistics.
//!
//! [`RunStats`] is a passive accumulator. The orchestrator writes it once per
//! phase and callers read cloned snapshots.

use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;

/// Aggregate counters for one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunStats {
    /// Summaries returned by the list endpoint.
    pub found: usize,
    /// Detail records fetched successfully.
    pub detailed: usize,
    /// Records that survived transformation.
    pub transformed: usize,
    /// Records in batches the home endpoint accepted.
    pub submitted: usize,
    pub batches_submitted: usize,
    pub failed_details: usize,
    pub failed_transformations: usize,
    pub failed_batches: usize,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

impl RunStats {
    pub fn mark_started(&mut self) {
        self.start_time = Some(Utc::now());
    }

    pub fn mark_finished(&mut self) {
        self.end_time = Some(Utc::now());
    }

    /// Wall-clock run time, when both ends were stamped.
    pub fn duration(&self) -> Option<TimeDelta> {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => Some(end - start),
            _ => None,
        }
    }

    /// Fraction of found records that were submitted, in `0.0..=1.0`.
    ///
    /// Zero when nothing was found.
    pub fn success_rate(&self) -> f64 {
        if self.found == 0 {
            return 0.0;
        }
        self.submitted as f64 / self.found as f64
    }

    /// Total batches attempted in the load phase.
    pub fn batches_attempted(&self) -> usize {
        self.batches_submitted + self.failed_batches
    }
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(50);
        writeln!(f, "{rule}")?;
        writeln!(f, "ETL RUN SUMMARY")?;
        writeln!(f, "{rule}")?;
        match self.duration() {
            Some(d) => writeln!(f, "Duration: {:.2} seconds", d.num_milliseconds() as f64 / 1000.0)?,
            None => writeln!(f, "Duration: n/a")?,
        }
        writeln!(f, "Animals found: {}", self.found)?;
        writeln!(
            f,
            "Details extracted: {} (failed: {})",
            self.detailed, self.failed_details
        )?;
        writeln!(
            f,
            "Animals transformed: {} (failed: {})",
            self.transformed, self.failed_transformations
        )?;
        writeln!(f, "Animals submitted: {}", self.submitted)?;
        writeln!(
            f,
            "Batches attempted: {} (submitted: {}, failed: {})",
            self.batches_attempted(),
            self.batches_submitted,
            self.failed_batches
        )?;
        writeln!(f, "Overall success rate: {:.1}%", self.success_rate() * 100.0)?;
        write!(f, "{rule}")
    }
}
