//! End-to-end CLI tests for the hardcover-lists binary.

#![allow(deprecated)]

mod support;
use support::socket_guard::start_mock_server_or_skip;

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_partial_json, body_string_contains, method, path};
use wiremock::{Mock, ResponseTemplate};

/// Binary with a clean environment: no token, no inherited config.
fn isolated_cmd(config_home: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("hardcover-lists").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home)
        .env_remove("HARDCOVER_TOKEN")
        .env_remove("HARDCOVER_API_TOKEN")
        .env_remove("HARDCOVER_API_BASE")
        .env_remove("HARDCOVER_GRAPHQL_URL")
        .env("RUST_LOG", "warn");
    cmd
}

fn write_config(config_home: &std::path::Path, contents: &str) {
    let dir = config_home.join("hardcover-lists");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("config.toml"), contents).unwrap();
}

#[test]
fn test_binary_help_lists_subcommands() {
    let mut cmd = Command::cargo_bin("hardcover-lists").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("discover"))
        .stdout(predicate::str::contains("verify"));
}

#[test]
fn test_binary_version_displays_version() {
    let mut cmd = Command::cargo_bin("hardcover-lists").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("hardcover-lists"));
}

#[test]
fn test_binary_invalid_flag_returns_error() {
    let mut cmd = Command::cargo_bin("hardcover-lists").unwrap();
    cmd.arg("--invalid-flag")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_config_show_defaults_without_file() {
    let tempdir = TempDir::new().unwrap();
    isolated_cmd(tempdir.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config_file = not found (using defaults)"))
        .stdout(predicate::str::contains("token = <not set>"))
        .stdout(predicate::str::contains(
            "graphql_url = https://api.hardcover.app/v1/graphql",
        ))
        .stdout(predicate::str::contains("api_base_url = http://localhost:3001"))
        .stdout(predicate::str::contains("connect_timeout_secs = 10"))
        .stdout(predicate::str::contains("request_timeout_secs = 30"));
}

#[test]
fn test_config_show_reads_file_and_redacts_token() {
    let tempdir = TempDir::new().unwrap();
    write_config(
        tempdir.path(),
        "token = \"supersecrettoken123\"\napi_base_url = \"http://localhost:4000\"\nverbosity = \"verbose\"\n",
    );
    isolated_cmd(tempdir.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config_file = loaded"))
        .stdout(predicate::str::contains("api_base_url = http://localhost:4000"))
        .stdout(predicate::str::contains("verbosity = verbose"))
        .stdout(predicate::str::contains("supersecrettoken123").not());
}

#[test]
fn test_config_show_env_beats_file() {
    let tempdir = TempDir::new().unwrap();
    write_config(tempdir.path(), "api_base_url = \"http://localhost:4000\"\n");
    isolated_cmd(tempdir.path())
        .env("HARDCOVER_API_BASE", "http://localhost:5000")
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("api_base_url = http://localhost:5000"));
}

#[test]
fn test_invalid_config_key_fails() {
    let tempdir = TempDir::new().unwrap();
    write_config(tempdir.path(), "concurrency = 4\n");
    isolated_cmd(tempdir.path())
        .args(["config", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown configuration key"));
}

#[test]
fn test_discover_without_token_fails_with_hint() {
    let tempdir = TempDir::new().unwrap();
    isolated_cmd(tempdir.path())
        .arg("discover")
        .assert()
        .failure()
        .stderr(predicate::str::contains("HARDCOVER_TOKEN"));
}

#[tokio::test]
async fn test_discover_prints_genre_report() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("POST"))
        .and(path("/v1/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"lists": [
                {"id": 1, "name": "Best Romantasy Books", "slug": "romantasy-2024", "description": null, "books_count": 50},
                {"id": 2, "name": "Cozy Mysteries", "slug": "cozy-reads", "description": null, "books_count": 5}
            ]}
        })))
        .mount(&server)
        .await;

    let tempdir = TempDir::new().unwrap();
    isolated_cmd(tempdir.path())
        .args(["--token", "test-token", "--graphql-url"])
        .arg(format!("{}/v1/graphql", server.uri()))
        .arg("discover")
        .assert()
        .success()
        .stdout(predicate::str::contains("ROMANTASY (1 list)"))
        .stdout(predicate::str::contains("COZY (1 list)"));
}

#[tokio::test]
async fn test_discover_graphql_error_exits_non_zero() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"errors": [{"message": "field not found"}]})),
        )
        .mount(&server)
        .await;

    let tempdir = TempDir::new().unwrap();
    isolated_cmd(tempdir.path())
        .env("HARDCOVER_TOKEN", "test-token")
        .env("HARDCOVER_GRAPHQL_URL", format!("{}/v1/graphql", server.uri()))
        .args(["discover", "--format", "json"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("field not found"));
}

#[tokio::test]
async fn test_verify_exits_zero_even_when_checks_fail() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let tempdir = TempDir::new().unwrap();
    isolated_cmd(tempdir.path())
        .args(["verify", "--api-base"])
        .arg(server.uri())
        .assert()
        .success()
        .stdout(predicate::str::contains("[FAIL] search"))
        .stdout(predicate::str::contains("[SKIP] proxy"))
        .stdout(predicate::str::contains("Summary: 0 passed, 3 failed, 1 skipped (4 checks)"));
}

#[tokio::test]
async fn test_search_requests_twenty_lists_and_prints_report() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("POST"))
        .and(path("/v1/graphql"))
        .and(body_string_contains("limit: 20"))
        .and(body_partial_json(json!({"variables": {"term": "%fae%"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"lists": [
                {"id": 9, "name": "Fae Courts", "slug": "fae-courts", "description": null, "books_count": 30}
            ]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let tempdir = TempDir::new().unwrap();
    isolated_cmd(tempdir.path())
        .args(["--token", "test-token", "--graphql-url"])
        .arg(format!("{}/v1/graphql", server.uri()))
        .args(["search", "fae"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ROMANTASY (1 list)"))
        .stdout(predicate::str::contains("Fae Courts [fae-courts] 30 books"));
}

#[tokio::test]
async fn test_search_without_matches_prints_notice() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("POST"))
        .and(path("/v1/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"lists": []}})))
        .mount(&server)
        .await;

    let tempdir = TempDir::new().unwrap();
    isolated_cmd(tempdir.path())
        .args(["--token", "test-token", "--graphql-url"])
        .arg(format!("{}/v1/graphql", server.uri()))
        .args(["search", "zzzz"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No lists found for 'zzzz'."));
}

#[tokio::test]
async fn test_books_prints_numbered_books() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("POST"))
        .and(path("/v1/graphql"))
        .and(body_partial_json(json!({"variables": {"slug": "fae-courts", "limit": 2}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"lists": [{
                "id": 9,
                "name": "Fae Courts",
                "slug": "fae-courts",
                "description": null,
                "books_count": 30,
                "list_books": [
                    {"book": {"id": 1, "title": "The Cruel Prince",
                              "contributions": [{"author": {"name": "Holly Black"}}]}},
                    {"book": {"id": 2, "title": "A Court of Thorns and Roses",
                              "contributions": [{"author": {"name": "Sarah J. Maas"}}]}}
                ]
            }]}
        })))
        .mount(&server)
        .await;

    let tempdir = TempDir::new().unwrap();
    isolated_cmd(tempdir.path())
        .args(["--token", "test-token", "--graphql-url"])
        .arg(format!("{}/v1/graphql", server.uri()))
        .args(["books", "fae-courts", "--limit", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Fae Courts [fae-courts] 30 books"))
        .stdout(predicate::str::contains("1. The Cruel Prince by Holly Black"))
        .stdout(predicate::str::contains("showing 2 of 30"));
}

#[tokio::test]
async fn test_books_unknown_slug_exits_zero() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("POST"))
        .and(path("/v1/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"lists": []}})))
        .mount(&server)
        .await;

    let tempdir = TempDir::new().unwrap();
    isolated_cmd(tempdir.path())
        .args(["--token", "test-token", "--graphql-url"])
        .arg(format!("{}/v1/graphql", server.uri()))
        .args(["books", "no-such-list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No list found with slug 'no-such-list'."));
}

#[test]
fn test_search_help_describes_name_matching() {
    let mut cmd = Command::cargo_bin("hardcover-lists").unwrap();
    cmd.args(["search", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Text matched against list names"))
        .stdout(predicate::str::contains("slug").not());
}
