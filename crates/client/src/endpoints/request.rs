//! Retry helper for HTTP requests with exponential backoff.
//!
//! This module wraps every outbound call with the retry policy: connection
//! failures, timeouts and HTTP 500/502/503/504 are retried with exponential
//! backoff; any other failure is returned on the spot.

use std::time::{Duration, Instant};

use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use animal_etl_config::RetryConfig;

use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;
use crate::telemetry::inject_trace_context;

/// Attempt budget and backoff curve for one logical request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first. Never zero.
    pub max_attempts: usize,
    pub initial_delay: Duration,
    pub max_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: usize, initial_delay: Duration, max_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            initial_delay,
            max_delay,
        }
    }

    /// Delay before retry `n` (1-based): `initial * 2^(n-1)`, capped at `max_delay`.
    pub fn delay_for_retry(&self, n: usize) -> Duration {
        let exponent = n.saturating_sub(1).min(31) as u32;
        self.initial_delay
            .saturating_mul(2u32.saturating_pow(exponent))
            .min(self.max_delay)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&RetryConfig::default())
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self::new(config.max_retries, config.initial_delay, config.max_delay)
    }
}

/// Map a transport-level reqwest failure onto the client taxonomy.
fn classify_transport_error(err: reqwest::Error, fallback_url: &str) -> ClientError {
    let url = err
        .url()
        .map(|u| u.to_string())
        .unwrap_or_else(|| fallback_url.to_string());

    if err.is_timeout() {
        ClientError::Timeout { url }
    } else if err.is_connect() || err.is_request() {
        ClientError::Connection {
            url,
            message: err.to_string(),
        }
    } else {
        ClientError::HttpError(err)
    }
}

/// Turn a non-success response into an [`ClientError::ApiError`] carrying the raw body.
async fn api_error_from_response(response: Response) -> ClientError {
    let status = response.status().as_u16();
    let url = response.url().to_string();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Could not read error response body".to_string());

    ClientError::ApiError { status, url, body }
}

/// Sends an HTTP request, retrying transient failures with exponential backoff.
///
/// - Retries connection failures, timeouts and HTTP 500/502/503/504
/// - Waits `initial * 2^(n-1)` (capped) before retry `n`
/// - Returns `MaxRetriesExceeded` wrapping the last failure once the budget is spent
/// - Returns any other failure immediately without consuming budget
///
/// # Arguments
///
/// * `builder` - The `reqwest::RequestBuilder` to execute
/// * `policy` - Attempt budget and backoff curve
/// * `endpoint` - Endpoint path used for metrics labels and error context
/// * `method` - HTTP method used for metrics labels
/// * `metrics` - Optional metrics collector
pub async fn send_request_with_retry(
    builder: RequestBuilder,
    policy: &RetryPolicy,
    endpoint: &str,
    method: &str,
    metrics: Option<&MetricsCollector>,
) -> Result<Response> {
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 0;

    loop {
        attempt += 1;
        let attempt_builder = match builder.try_clone() {
            Some(cloned) => cloned,
            None => {
                debug!("Request builder cannot be cloned, single attempt only");
                return builder.send().await.map_err(|e| classify_transport_error(e, endpoint));
            }
        };

        if let Some(m) = metrics {
            m.record_request(endpoint, method);
        }

        let started = Instant::now();
        let outcome = inject_trace_context(attempt_builder).send().await;
        let elapsed = started.elapsed();

        let err = match outcome {
            Ok(response) if response.status().is_success() => {
                if let Some(m) = metrics {
                    m.record_request_duration(
                        endpoint,
                        method,
                        elapsed,
                        Some(response.status().as_u16()),
                    );
                }
                if attempt > 1 {
                    debug!(attempt, endpoint, "Request succeeded after retry");
                }
                return Ok(response);
            }
            Ok(response) => {
                if let Some(m) = metrics {
                    m.record_request_duration(
                        endpoint,
                        method,
                        elapsed,
                        Some(response.status().as_u16()),
                    );
                }
                api_error_from_response(response).await
            }
            Err(e) => {
                if let Some(m) = metrics {
                    m.record_request_duration(endpoint, method, elapsed, None);
                }
                classify_transport_error(e, endpoint)
            }
        };

        if let Some(m) = metrics {
            m.record_client_error(endpoint, method, &err);
        }

        if !err.is_retryable() {
            debug!(endpoint, error = %err, "Non-retryable failure");
            return Err(err);
        }

        if attempt >= max_attempts {
            warn!(
                attempts = max_attempts,
                endpoint,
                error = %err,
                "Retry budget exhausted"
            );
            return Err(ClientError::MaxRetriesExceeded {
                attempts: max_attempts,
                source: Box::new(err),
            });
        }

        let delay = policy.delay_for_retry(attempt);
        warn!(
            attempt,
            max_attempts,
            endpoint,
            delay_ms = delay.as_millis() as u64,
            error = %err,
            "Transient failure, retrying with exponential backoff"
        );
        if let Some(m) = metrics {
            m.record_retry(endpoint, method, attempt);
        }
        tokio::time::sleep(delay).await;
    }
}

/// Read a successful response body and decode it as `T`.
///
/// Decode failures are validation failures and are never retried.
pub async fn decode_json<T: DeserializeOwned>(
    response: Response,
    metrics: Option<&MetricsCollector>,
    endpoint: &str,
    model_type: &'static str,
) -> Result<T> {
    let url = response.url().to_string();
    let body = response.text().await?;

    serde_json::from_str(&body).map_err(|e| {
        if let Some(m) = metrics {
            m.record_deserialization_failure(endpoint, model_type);
        }
        ClientError::InvalidResponse {
            url,
            message: format!("{model_type}: {e}"),
        }
    })
}
