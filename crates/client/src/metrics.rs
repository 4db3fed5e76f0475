//! Metrics collection for API calls and pipeline runs.
//!
//! This module provides metrics collection for Animal API calls and ETL phases, including:
//! - Request latency histograms
//! - Request counters (total, retries, errors)
//! - Error categorization
//! - Per-phase record counts and durations
//!
//! # What this module does NOT handle:
//! - Metrics exposition/export (see [`crate::metrics_exporter`])
//!
//! # Invariants
//! - All request metrics use consistent label names: `endpoint`, `method`, `status`, `error_category`
//! - Metric recording is infallible and never disrupts an API call
//! - Zero-cost when no metrics recorder is installed

use crate::error::ClientError;
use std::time::Duration;

/// Metric name for request duration histogram.
pub const METRIC_REQUEST_DURATION: &str = "animal_etl_api_request_duration_seconds";

/// Metric name for total request counter.
pub const METRIC_REQUESTS_TOTAL: &str = "animal_etl_api_requests_total";

/// Metric name for retry counter.
pub const METRIC_RETRIES_TOTAL: &str = "animal_etl_api_retries_total";

/// Metric name for error counter.
pub const METRIC_ERRORS_TOTAL: &str = "animal_etl_api_errors_total";

/// Metric name for deserialization failure counter.
pub const METRIC_DESERIALIZATION_FAILURES: &str = "animal_etl_api_deserialization_failures_total";

/// Metric name for phase duration histogram.
pub const METRIC_PHASE_DURATION: &str = "animal_etl_phase_duration_seconds";

/// Metric name for records leaving each phase.
pub const METRIC_RECORDS_TOTAL: &str = "animal_etl_records_total";

/// Metric name for records dropped in each phase.
pub const METRIC_RECORDS_DROPPED: &str = "animal_etl_records_dropped_total";

/// Metric name for submitted batch counter.
pub const METRIC_BATCHES_TOTAL: &str = "animal_etl_batches_total";

/// Error categories for metrics labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Connection refused, reset, DNS and similar
    Transport,
    /// HTTP 4xx client errors
    Http4xx,
    /// HTTP 5xx server errors
    Http5xx,
    /// Request timeout
    Timeout,
    /// Response body did not match the expected model
    Decode,
    /// Request rejected locally before sending
    Validation,
    /// Unknown/unclassified errors
    Unknown,
}

impl ErrorCategory {
    /// Returns the string label for this error category.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Transport => "transport",
            ErrorCategory::Http4xx => "http_4xx",
            ErrorCategory::Http5xx => "http_5xx",
            ErrorCategory::Timeout => "timeout",
            ErrorCategory::Decode => "decode",
            ErrorCategory::Validation => "validation",
            ErrorCategory::Unknown => "unknown",
        }
    }
}

impl From<&ClientError> for ErrorCategory {
    fn from(error: &ClientError) -> Self {
        match error {
            ClientError::Timeout { .. } => ErrorCategory::Timeout,
            ClientError::Connection { .. } => ErrorCategory::Transport,
            ClientError::ApiError { status, .. } => {
                if (400..500).contains(status) {
                    ErrorCategory::Http4xx
                } else if (500..600).contains(status) {
                    ErrorCategory::Http5xx
                } else {
                    ErrorCategory::Unknown
                }
            }
            ClientError::InvalidResponse { .. } => ErrorCategory::Decode,
            ClientError::BatchTooLarge { .. } | ClientError::InvalidUrl(_) => {
                ErrorCategory::Validation
            }
            ClientError::MaxRetriesExceeded { source, .. } => ErrorCategory::from(source.as_ref()),
            ClientError::HttpError(_) => ErrorCategory::Unknown,
        }
    }
}

/// Metrics collector for Animal API calls and pipeline phases.
///
/// A lightweight wrapper around the `metrics` crate macros with type-safe
/// methods and consistent labels.
#[derive(Debug, Clone, Default)]
pub struct MetricsCollector {
    enabled: bool,
}

impl MetricsCollector {
    /// Create a new, enabled metrics collector.
    pub fn new() -> Self {
        Self { enabled: true }
    }

    /// Create a disabled metrics collector.
    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Record the duration of one request attempt.
    ///
    /// `status` is None when the attempt failed before a response arrived.
    pub fn record_request_duration(
        &self,
        endpoint: &str,
        method: &str,
        duration: Duration,
        status: Option<u16>,
    ) {
        if !self.enabled {
            return;
        }

        let status_label = status.map_or("error".to_string(), |s| s.to_string());

        metrics::histogram!(METRIC_REQUEST_DURATION,
            "endpoint" => endpoint.to_string(),
            "method" => method.to_string(),
            "status" => status_label,
        )
        .record(duration.as_secs_f64());
    }

    /// Record a request attempt, including retries.
    pub fn record_request(&self, endpoint: &str, method: &str) {
        if !self.enabled {
            return;
        }

        metrics::counter!(METRIC_REQUESTS_TOTAL,
            "endpoint" => endpoint.to_string(),
            "method" => method.to_string(),
        )
        .increment(1);
    }

    /// Record a retry attempt (`attempt` is the 1-based attempt that failed).
    pub fn record_retry(&self, endpoint: &str, method: &str, attempt: usize) {
        if !self.enabled {
            return;
        }

        metrics::counter!(METRIC_RETRIES_TOTAL,
            "endpoint" => endpoint.to_string(),
            "method" => method.to_string(),
            "attempt" => attempt.to_string(),
        )
        .increment(1);
    }

    pub fn record_error(&self, endpoint: &str, method: &str, category: ErrorCategory) {
        if !self.enabled {
            return;
        }

        metrics::counter!(METRIC_ERRORS_TOTAL,
            "endpoint" => endpoint.to_string(),
            "method" => method.to_string(),
            "error_category" => category.as_str(),
        )
        .increment(1);
    }

    /// Record an error from a ClientError, categorized automatically.
    pub fn record_client_error(&self, endpoint: &str, method: &str, error: &ClientError) {
        self.record_error(endpoint, method, ErrorCategory::from(error));
    }

    /// Record a deserialization failure.
    pub fn record_deserialization_failure(&self, endpoint: &str, model_type: &'static str) {
        if !self.enabled {
            return;
        }

        metrics::counter!(METRIC_DESERIALIZATION_FAILURES,
            "endpoint" => endpoint.to_string(),
            "model_type" => model_type,
        )
        .increment(1);
    }

    /// Record how long one pipeline phase took.
    pub fn record_phase_duration(&self, phase: &'static str, duration: Duration) {
        if !self.enabled {
            return;
        }

        metrics::histogram!(METRIC_PHASE_DURATION, "phase" => phase).record(duration.as_secs_f64());
    }

    /// Record records produced and dropped by one pipeline phase.
    pub fn record_phase_records(&self, phase: &'static str, produced: usize, dropped: usize) {
        if !self.enabled {
            return;
        }

        metrics::counter!(METRIC_RECORDS_TOTAL, "phase" => phase).increment(produced as u64);
        metrics::counter!(METRIC_RECORDS_DROPPED, "phase" => phase).increment(dropped as u64);
    }

    /// Record the outcome of one batch submission.
    pub fn record_batch(&self, success: bool) {
        if !self.enabled {
            return;
        }

        let outcome = if success { "success" } else { "failure" };
        metrics::counter!(METRIC_BATCHES_TOTAL, "outcome" => outcome).increment(1);
    }
}
