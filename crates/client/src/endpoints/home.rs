//! Submission endpoint.

use reqwest::Client;
use tracing::debug;

use animal_etl_config::constants::MAX_BATCH_SIZE;

use crate::endpoints::request::{RetryPolicy, send_request_with_retry};
use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;
use crate::models::TransformedAnimal;

/// Submit one batch of transformed records.
///
/// Batches above [`MAX_BATCH_SIZE`] are rejected before any request is made.
pub async fn submit_batch(
    client: &Client,
    base_url: &str,
    home_path: &str,
    records: &[TransformedAnimal],
    policy: &RetryPolicy,
    metrics: Option<&MetricsCollector>,
) -> Result<()> {
    if records.len() > MAX_BATCH_SIZE {
        return Err(ClientError::BatchTooLarge {
            size: records.len(),
            max: MAX_BATCH_SIZE,
        });
    }

    let url = format!("{}{}", base_url, home_path);

    debug!(count = records.len(), "Submitting batch");
    let builder = client.post(&url).json(records);
    send_request_with_retry(builder, policy, home_path, "POST", metrics).await?;
    debug!(count = records.len(), "Batch accepted");

    Ok(())
}
