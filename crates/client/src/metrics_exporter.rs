//! Prometheus metrics exporter.
//!
//! Serves metrics recorded through [`crate::metrics::MetricsCollector`] in
//! Prometheus text format at `/metrics` on the configured bind address.
//!
//! # Example
//!
//! ```rust,ignore
//! use animal_etl_client::metrics_exporter::MetricsExporter;
//!
//! // Must run inside a Tokio runtime
//! let exporter = MetricsExporter::install("127.0.0.1:9090")?;
//! ```

use std::net::SocketAddr;

use metrics_exporter_prometheus::{Matcher, PrometheusBuilder};
use tracing::info;

use crate::metrics::{METRIC_PHASE_DURATION, METRIC_REQUEST_DURATION};

/// Metrics exporter for Prometheus scraping.
///
/// Installing it sets the global recorder and starts an HTTP listener on the
/// current Tokio runtime.
#[derive(Debug)]
pub struct MetricsExporter {
    bind_addr: SocketAddr,
}

impl MetricsExporter {
    /// Install the Prometheus exporter as the global metrics recorder.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The bind address is invalid
    /// - Another recorder is already installed or the listener cannot start
    pub fn install(bind_addr: &str) -> Result<Self, MetricsExporterError> {
        let addr: SocketAddr = bind_addr
            .parse()
            .map_err(|e| MetricsExporterError::InvalidBindAddress(bind_addr.to_string(), e))?;

        PrometheusBuilder::new()
            .set_buckets_for_metric(
                Matcher::Full(METRIC_REQUEST_DURATION.to_string()),
                &[
                    0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0,
                ],
            )?
            .set_buckets_for_metric(
                Matcher::Full(METRIC_PHASE_DURATION.to_string()),
                &[0.01, 0.1, 0.5, 1.0, 5.0, 15.0, 60.0, 300.0, 900.0],
            )?
            .with_http_listener(addr)
            .install()?;

        info!(
            "Prometheus metrics exporter started on http://{}/metrics",
            addr
        );

        Ok(Self { bind_addr: addr })
    }

    /// Get the bind address.
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

/// Errors that can occur when installing the metrics exporter.
#[derive(Debug, thiserror::Error)]
pub enum MetricsExporterError {
    /// Invalid bind address provided.
    #[error("Invalid bind address '{0}': {1}")]
    InvalidBindAddress(String, std::net::AddrParseError),

    /// Failed to build or install the Prometheus recorder.
    #[error("Failed to install Prometheus exporter: {0}")]
    BuildError(String),
}

impl From<metrics_exporter_prometheus::BuildError> for MetricsExporterError {
    fn from(err: metrics_exporter_prometheus::BuildError) -> Self {
        MetricsExporterError::BuildError(err.to_string())
    }
}
