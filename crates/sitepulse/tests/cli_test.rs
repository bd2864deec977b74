//! Integration tests for the `sitepulse` CLI binary.
//!
//! Argument parsing, completions, config handling, and one end-to-end
//! check against a mock backend.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// The `sitepulse` binary with `SITEPULSE_*` cleared and config
/// directories pointed somewhere that does not exist.
fn sitepulse_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("sitepulse");
    cmd.env("HOME", "/tmp/sitepulse-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/sitepulse-cli-test-nonexistent")
        .env("NO_COLOR", "1")
        .env_remove("SITEPULSE_BACKEND_URL")
        .env_remove("SITEPULSE_CONFIG")
        .env_remove("SITEPULSE_OUTPUT")
        .env_remove("SITEPULSE_INSECURE")
        .env_remove("SITEPULSE_STRATEGY")
        .env_remove("RUST_LOG");
    cmd
}

fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

async fn mock_backend() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/get-data-client"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {
                    "server_location": "biznet-1",
                    "program_name": "Alpha",
                    "domain_name": "a.com",
                    "backend_url": null
                },
                {
                    "server_location": "biznet-2",
                    "program_name": "Beta",
                    "domain_name": "b.com",
                    "backend_url": null
                }
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/check"))
        .and(query_param("url", "a.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ONLINE" })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/check"))
        .and(query_param("url", "b.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "OFFLINE" })))
        .mount(&server)
        .await;
    server
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = sitepulse_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    sitepulse_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("check")
            .and(predicate::str::contains("sites"))
            .and(predicate::str::contains("config")),
    );
}

#[test]
fn test_version_flag() {
    sitepulse_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("sitepulse"));
}

#[test]
fn test_unknown_strategy_is_usage_error() {
    sitepulse_cmd()
        .args(["check", "--strategy", "sideways"])
        .assert()
        .code(2);
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_for_each_shell() {
    for shell in ["bash", "zsh", "fish"] {
        sitepulse_cmd()
            .args(["completions", shell])
            .assert()
            .success()
            .stdout(predicate::str::contains("sitepulse"));
    }
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_check_without_backend_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = dir.path().join("config.toml");
    let output = sitepulse_cmd()
        .args(["--config", cfg.to_str().unwrap(), "check"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));
    let text = combined_output(&output);
    assert!(text.contains("No backend URL configured"), "{text}");
}

#[test]
fn test_config_path_honours_flag() {
    sitepulse_cmd()
        .args(["--config", "/tmp/elsewhere/sitepulse.toml", "config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/tmp/elsewhere/sitepulse.toml"));
}

#[test]
fn test_config_init_then_show() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = dir.path().join("nested").join("config.toml");
    let cfg_arg = cfg.to_str().unwrap();

    sitepulse_cmd()
        .args([
            "--config",
            cfg_arg,
            "--backend-url",
            "https://status.example.com",
            "config",
            "init",
            "--force",
        ])
        .assert()
        .success();

    let written = std::fs::read_to_string(&cfg).unwrap();
    assert!(written.contains("backend_url = \"https://status.example.com\""));

    sitepulse_cmd()
        .args(["--config", cfg_arg, "-o", "json", "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"page_size\": 25"));
}

#[test]
fn test_config_init_rejects_bad_scheme() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = dir.path().join("config.toml");
    sitepulse_cmd()
        .args([
            "--config",
            cfg.to_str().unwrap(),
            "--backend-url",
            "ftp://status.example.com",
            "config",
            "init",
            "--force",
        ])
        .assert()
        .code(3);
    assert!(!cfg.exists());
}

// ── Against a mock backend ──────────────────────────────────────────

#[tokio::test]
async fn test_check_json_reports_every_site() {
    let server = mock_backend().await;
    let uri = server.uri();

    let output = tokio::task::spawn_blocking(move || {
        sitepulse_cmd()
            .args(["-b", &uri, "-o", "json", "check"])
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    assert!(output.status.success(), "{}", combined_output(&output));
    let records: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let records = records.as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["site"]["domain"], "a.com");
    assert_eq!(records[0]["client"], "online");
    assert_eq!(records[1]["client"], "offline");
    assert_eq!(records[1]["origin_reachable"], false);
}

#[tokio::test]
async fn test_check_location_and_fail_on_offline() {
    let server = mock_backend().await;
    let uri = server.uri();

    let (only_online, with_offline) = tokio::task::spawn_blocking(move || {
        let only_online = sitepulse_cmd()
            .args(["-b", &uri, "-o", "plain", "check", "-l", "biznet-1", "--fail-on-offline"])
            .output()
            .unwrap();
        let with_offline = sitepulse_cmd()
            .args(["-b", &uri, "-o", "plain", "check", "--fail-on-offline"])
            .output()
            .unwrap();
        (only_online, with_offline)
    })
    .await
    .unwrap();

    assert!(only_online.status.success(), "{}", combined_output(&only_online));
    assert_eq!(String::from_utf8_lossy(&only_online.stdout).trim(), "a.com\tonline\toffline");

    assert_eq!(with_offline.status.code(), Some(9));
    assert!(combined_output(&with_offline).contains("1 site(s) offline"));
}

#[tokio::test]
async fn test_sites_search_filters_locally() {
    let server = mock_backend().await;
    let uri = server.uri();

    let output = tokio::task::spawn_blocking(move || {
        sitepulse_cmd()
            .args(["-b", &uri, "-o", "plain", "sites", "-s", "BETA"])
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "biznet-2\tBeta\tb.com");
}

#[tokio::test]
async fn test_unreachable_backend_exits_with_connection_code() {
    let output = tokio::task::spawn_blocking(|| {
        sitepulse_cmd()
            .args(["-b", "http://127.0.0.1:9", "sites"])
            .output()
            .unwrap()
    })
    .await
    .unwrap();
    assert_eq!(output.status.code(), Some(7), "{}", combined_output(&output));
}
