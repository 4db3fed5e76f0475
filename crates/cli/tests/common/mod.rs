//! Shared test utilities for animal-etl integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic CLI command factory that prevents dotenv loading.
//! - Mount a small, healthy Animal API on a mock server.
//!
//! Invariants / Assumptions:
//! - Every configuration variable the binary reads is cleared from the child env.
//! - Retries use zero delay so failing scenarios finish quickly.

use assert_cmd::Command;

#[allow(unused_imports)]
pub use animal_etl_client::testing::{detail_body, list_page_body};
#[allow(unused_imports)]
pub use wiremock::matchers::{method, path, query_param};
#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

/// Environment variables the binary reads, cleared for hermeticity.
pub const CONFIG_ENV_VARS: &[&str] = &[
    "API_BASE_URL",
    "ANIMALS_LIST_ENDPOINT",
    "ANIMAL_DETAIL_ENDPOINT",
    "HOME_ENDPOINT",
    "BATCH_SIZE",
    "MAX_RETRIES",
    "TIMEOUT",
    "INITIAL_RETRY_DELAY",
    "MAX_RETRY_DELAY",
    "DEFAULT_PAGE_SIZE",
    "START_PAGE",
    "LOG_LEVEL",
    "ETL_LOG_FILE",
    "ETL_METRICS_BIND",
    "OTEL_EXPORTER_OTLP_ENDPOINT",
    "OTEL_SERVICE_NAME",
    "RUST_LOG",
];

/// Returns a hermetic `animal-etl` command for integration testing.
///
/// It ensures:
/// - `DOTENV_DISABLED=1` is set to prevent local `.env` contamination.
/// - Configuration variables are cleared to ensure no leakage from the host.
/// - Retry delays are zero.
pub fn etl_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("animal-etl");

    cmd.env("DOTENV_DISABLED", "1");
    for var in CONFIG_ENV_VARS {
        cmd.env_remove(var);
    }
    cmd.env("INITIAL_RETRY_DELAY", "0").env("MAX_RETRY_DELAY", "0");

    cmd
}

/// Returns a hermetic `animal-etl` command pointed at `base_url`.
#[allow(dead_code)]
pub fn etl_cmd_with_base_url(base_url: &str) -> Command {
    let mut cmd = etl_cmd();
    cmd.env("API_BASE_URL", base_url);
    cmd
}

/// Serve one list page with `ids` and a healthy detail for each.
#[allow(dead_code)]
pub async fn mount_animals(server: &MockServer, ids: &[i64]) {
    Mock::given(method("GET"))
        .and(path("/animals/v1/animals"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_page_body(1, 1, ids)))
        .mount(server)
        .await;

    for id in ids {
        Mock::given(method("GET"))
            .and(path(format!("/animals/v1/animals/{id}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(detail_body(*id)))
            .mount(server)
            .await;
    }
}
