//! Integration tests for Ctrl+C/SIGINT handling.
//!
//! Unix-only because they send SIGINT to the child process. We assert:
//! - exit code is 1
//! - stderr contains the interruption message

#![cfg(unix)]

use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use animal_etl_client::testing::list_page_body;
use tokio::sync::Notify;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn etl_bin() -> &'static std::path::Path {
    assert_cmd::cargo::cargo_bin!("animal-etl")
}

fn send_sigint(pid: u32) {
    // SAFETY: standard Unix kill syscall
    unsafe {
        libc::kill(pid as i32, libc::SIGINT);
    }
}

#[tokio::test]
async fn test_ctrl_c_during_detail_fetch_exits_1() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/animals/v1/animals"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_page_body(1, 1, &[1])))
        .mount(&server)
        .await;

    let request_seen = Arc::new(Notify::new());
    let request_seen_clone = Arc::clone(&request_seen);

    Mock::given(method("GET"))
        .and(path("/animals/v1/animals/1"))
        .respond_with(move |_req: &wiremock::Request| {
            request_seen_clone.notify_one();
            ResponseTemplate::new(200)
                .set_delay(Duration::from_secs(60))
                .set_body_json(serde_json::json!({"id": 1, "name": "Slow"}))
        })
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let child = tokio::process::Command::new(etl_bin())
        .env("DOTENV_DISABLED", "1")
        .env("API_BASE_URL", server.uri())
        .env("TIMEOUT", "120")
        .env_remove("RUST_LOG")
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn animal-etl");

    let pid = child.id().expect("child pid");
    tokio::time::timeout(Duration::from_secs(10), request_seen.notified())
        .await
        .expect("expected detail request before SIGINT");
    send_sigint(pid);

    let output = tokio::time::timeout(Duration::from_secs(5), child.wait_with_output())
        .await
        .expect("process should exit promptly")
        .expect("wait_with_output ok");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Run interrupted by user"));
}
