//! Shared helpers for pipeline integration tests.

use std::time::Duration;

#[allow(unused_imports)]
pub use animal_etl_client::testing::{detail_body, list_page_body};
#[allow(unused_imports)]
pub use animal_etl_client::{AnimalClient, RetryPolicy};
#[allow(unused_imports)]
pub use animal_etl_pipeline::{FailureReason, Pipeline, RunMode, RunOutcome};
#[allow(unused_imports)]
pub use wiremock::matchers::{method, path, path_regex, query_param};
#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

/// Client against the mock server with millisecond backoff.
#[allow(dead_code)]
pub fn fast_client(server: &MockServer) -> AnimalClient {
    AnimalClient::builder()
        .base_url(server.uri())
        .retry_policy(RetryPolicy::new(
            3,
            Duration::from_millis(1),
            Duration::from_millis(5),
        ))
        .timeout(Duration::from_secs(5))
        .build()
        .expect("client should build")
}

/// Serve `ids` as a single list page.
#[allow(dead_code)]
pub async fn mount_single_page(server: &MockServer, ids: &[i64]) {
    Mock::given(method("GET"))
        .and(path("/animals/v1/animals"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_page_body(1, 1, ids)))
        .mount(server)
        .await;
}

/// Serve a well-formed detail record for every id.
#[allow(dead_code)]
pub async fn mount_details(server: &MockServer, ids: &[i64]) {
    for id in ids {
        Mock::given(method("GET"))
            .and(path(format!("/animals/v1/animals/{id}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(detail_body(*id)))
            .mount(server)
            .await;
    }
}

/// Number of POSTs the server received on the home endpoint.
#[allow(dead_code)]
pub async fn home_posts(server: &MockServer) -> Vec<serde_json::Value> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|r| r.method.as_str() == "POST" && r.url.path() == "/animals/v1/home")
        .map(|r| serde_json::from_slice(&r.body).expect("POST body is JSON"))
        .collect()
}
