//! Integration tests for process exit codes.
//!
//! `animal-etl` exits 0 only when the run succeeds and 1 for run failures,
//! configuration errors and startup failures.

mod common;

use common::*;
use predicates::prelude::*;

#[tokio::test]
async fn test_successful_run_exits_0() {
    let server = MockServer::start().await;
    mount_animals(&server, &[1, 2, 3]).await;

    Mock::given(method("POST"))
        .and(path("/animals/v1/home"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    etl_cmd_with_base_url(&server.uri())
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Animals submitted: 3"))
        .stdout(predicate::str::contains("Outcome: SUCCESS"));
}

#[tokio::test]
async fn test_flag_overrides_environment() {
    let server = MockServer::start().await;
    mount_animals(&server, &[1]).await;

    Mock::given(method("POST"))
        .and(path("/animals/v1/home"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    etl_cmd_with_base_url("http://127.0.0.1:1")
        .args(["--base-url", &server.uri()])
        .assert()
        .code(0);
}

#[tokio::test]
async fn test_failed_batch_exits_1() {
    let server = MockServer::start().await;
    mount_animals(&server, &[1, 2]).await;

    Mock::given(method("POST"))
        .and(path("/animals/v1/home"))
        .respond_with(ResponseTemplate::new(400).set_body_string("rejected"))
        .expect(1)
        .mount(&server)
        .await;

    etl_cmd_with_base_url(&server.uri())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Outcome: FAILURE"))
        .stdout(predicate::str::contains("batches failed to submit"));
}

#[tokio::test]
async fn test_extraction_failure_exits_1() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/animals/v1/animals"))
        .respond_with(ResponseTemplate::new(503))
        .expect(2)
        .mount(&server)
        .await;

    etl_cmd_with_base_url(&server.uri())
        .args(["--max-retries", "2"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Failed to extract animals"));
}

#[test]
fn test_connection_refused_exits_1() {
    etl_cmd_with_base_url("http://127.0.0.1:1")
        .args(["--max-retries", "1"])
        .assert()
        .code(1);
}

#[test]
fn test_zero_batch_size_is_config_error() {
    etl_cmd()
        .args(["--batch-size", "0"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("batch size"));
}

#[test]
fn test_unparseable_env_number_exits_1() {
    etl_cmd().env("BATCH_SIZE", "lots").assert().code(1);
}

#[test]
fn test_invalid_base_url_exits_1() {
    etl_cmd_with_base_url("ftp://animals.example")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to build configuration"));
}

#[test]
fn test_max_retries_out_of_range_exits_1() {
    etl_cmd().args(["--max-retries", "11"]).assert().code(1);
}

#[test]
fn test_help_exits_0() {
    etl_cmd()
        .arg("--help")
        .assert()
        .code(0)
        .stdout(predicate::str::contains("--dry-run"));
}

#[test]
fn test_unknown_flag_exits_1() {
    etl_cmd().arg("--no-such-flag").assert().code(1);
}
