//! Common test utilities for integration tests.
//!
//! Shared helpers and re-exports for the client integration tests.
//!
//! # Invariants
//! - Fixtures are loaded from the `fixtures/` directory relative to the crate root
//! - Retry delays in tests are kept in the millisecond range unless the clock is paused
//!
//! # What this does NOT handle
//! - Mock server setup (use wiremock directly in tests)

use std::time::Duration;

#[allow(unused_imports)]
pub use animal_etl_client::testing::{detail_body, list_page_body, load_fixture};
#[allow(unused_imports)]
pub use animal_etl_client::{AnimalClient, ClientError, RetryPolicy, endpoints};
#[allow(unused_imports)]
pub use reqwest::Client;
#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

/// Retry policy with millisecond delays for real-clock tests.
#[allow(dead_code)]
pub fn fast_policy(max_attempts: usize) -> RetryPolicy {
    RetryPolicy::new(max_attempts, Duration::from_millis(1), Duration::from_millis(5))
}

/// Client pointed at the mock server with fast retries.
#[allow(dead_code)]
pub fn fast_client(server: &MockServer, max_attempts: usize) -> AnimalClient {
    AnimalClient::builder()
        .base_url(server.uri())
        .retry_policy(fast_policy(max_attempts))
        .timeout(Duration::from_secs(5))
        .build()
        .expect("client should build")
}

/// Base URL of a local port with nothing listening on it.
#[allow(dead_code)]
pub fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}
