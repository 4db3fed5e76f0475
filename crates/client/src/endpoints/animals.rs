//! List and detail endpoints.

use reqwest::Client;

use crate::endpoints::request::{RetryPolicy, decode_json, send_request_with_retry};
use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;
use crate::models::{AnimalDetail, PaginatedListPage};

/// Fetch one page of the animal list.
pub async fn fetch_list_page(
    client: &Client,
    base_url: &str,
    list_path: &str,
    page: u32,
    page_size: u32,
    policy: &RetryPolicy,
    metrics: Option<&MetricsCollector>,
) -> Result<PaginatedListPage> {
    let url = format!("{}{}", base_url, list_path);

    let builder = client
        .get(&url)
        .query(&[("page", page), ("per_page", page_size)]);
    let response = send_request_with_retry(builder, policy, list_path, "GET", metrics).await?;

    let resp: PaginatedListPage =
        decode_json(response, metrics, list_path, "PaginatedListPage").await?;

    resp.validate()
        .map_err(|message| ClientError::InvalidResponse { url, message })?;

    Ok(resp)
}

/// Fetch the detail record of one animal.
///
/// `detail_path` is the already-resolved path for this id.
pub async fn fetch_detail(
    client: &Client,
    base_url: &str,
    detail_path: &str,
    policy: &RetryPolicy,
    metrics: Option<&MetricsCollector>,
) -> Result<AnimalDetail> {
    let url = format!("{}{}", base_url, detail_path);

    let builder = client.get(&url);
    let response = send_request_with_retry(builder, policy, detail_path, "GET", metrics).await?;

    decode_json(response, metrics, detail_path, "AnimalDetail").await
}
