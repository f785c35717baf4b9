//! CLI integration tests
//!
//! Every test runs against a throwaway HOME so no real cache or config is touched

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Get a command for the tabquote binary with an isolated home directory
fn tabquote(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("tabquote").unwrap();
    cmd.env("HOME", home.path())
        .env("NO_COLOR", "1")
        .env_remove("TABQUOTE_LANGUAGE")
        .env_remove("RUST_LOG");
    cmd
}

/// Point every provider at a local mock server
fn write_config(home: &TempDir, base_url: &str) {
    let root = home.path().join(".tabquote");
    fs::create_dir_all(&root).unwrap();
    let config = format!(
        r#"[providers]
bulk_url = "{base_url}/dist/"
quotes_api_url = "{base_url}/quote"
programming_quotes_url = "{base_url}/api/random"
quotable_url = "{base_url}/random"
timeout_secs = 5
"#
    );
    fs::write(root.join("config.toml"), config).unwrap();
}

#[test]
fn test_help() {
    let home = TempDir::new().unwrap();
    tabquote(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("inspirational quotes"));
}

#[test]
fn test_version() {
    let home = TempDir::new().unwrap();
    tabquote(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("tabquote"));
}

#[test]
fn test_show_help() {
    let home = TempDir::new().unwrap();
    tabquote(&home)
        .args(["show", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--language"))
        .stdout(predicate::str::contains("--refresh"))
        .stdout(predicate::str::contains("--offline"));
}

#[test]
fn test_cache_help() {
    let home = TempDir::new().unwrap();
    tabquote(&home)
        .args(["cache", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("status"))
        .stdout(predicate::str::contains("clear"));
}

#[test]
fn test_config_help() {
    let home = TempDir::new().unwrap();
    tabquote(&home)
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Manage configuration"))
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("set"))
        .stdout(predicate::str::contains("path"));
}

#[test]
fn test_config_path() {
    let home = TempDir::new().unwrap();
    tabquote(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(".tabquote/config.toml"));
}

#[test]
fn test_cache_status_empty() {
    let home = TempDir::new().unwrap();
    tabquote(&home)
        .args(["cache", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cache Status"))
        .stdout(predicate::str::contains("Not cached"));
}

#[test]
fn test_show_offline_without_cache_uses_fallback() {
    let home = TempDir::new().unwrap();
    tabquote(&home)
        .args(["show", "--offline"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Keep going"))
        .stdout(predicate::str::contains("Sam Levenson"));
}

#[test]
fn test_show_offline_json() {
    let home = TempDir::new().unwrap();
    tabquote(&home)
        .args(["-o", "json", "show", "--offline"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"author\": \"Sam Levenson\""));
}

#[test]
fn test_show_disabled() {
    let home = TempDir::new().unwrap();
    tabquote(&home)
        .args(["config", "set", "quotes.enabled", "false"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Quote cache cleared"));

    tabquote(&home)
        .args(["show", "--offline"])
        .assert()
        .success()
        .stdout(predicate::str::contains("disabled"));
}

#[test]
fn test_config_set_language() {
    let home = TempDir::new().unwrap();
    tabquote(&home)
        .args(["config", "set", "quotes.language", "fr-CA"])
        .assert()
        .success();

    tabquote(&home)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("language = fr"));
}

#[test]
fn test_invalid_language() {
    let home = TempDir::new().unwrap();
    tabquote(&home)
        .args(["show", "--offline", "--language", "not a language"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_unknown_config_key() {
    let home = TempDir::new().unwrap();
    tabquote(&home)
        .args(["config", "set", "quotes.colour", "blue"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn test_invalid_command() {
    let home = TempDir::new().unwrap();
    tabquote(&home)
        .arg("invalid-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_output_format_options() {
    let home = TempDir::new().unwrap();
    tabquote(&home)
        .args(["--output", "pretty", "config", "path"])
        .assert()
        .success();

    tabquote(&home)
        .args(["--output", "json", "config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"exists\""));

    tabquote(&home)
        .args(["--output", "invalid", "config", "path"])
        .assert()
        .failure();
}

#[test]
fn test_show_alias() {
    let home = TempDir::new().unwrap();
    tabquote(&home)
        .args(["s", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--offline"));
}

#[test]
fn test_completions() {
    let home = TempDir::new().unwrap();
    tabquote(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tabquote"));
}

#[test]
fn test_show_fetches_then_serves_from_cache() {
    let mut server = mockito::Server::new();
    let metadata = server
        .mock("GET", "/dist/metadata.json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"lastUpdated":"2024-05-01","files":{"en.json":{"count":2}}}"#)
        .expect(1)
        .create();
    let english = server
        .mock("GET", "/dist/en.json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[{"quote":"Stay hungry","author":"Steve Jobs"},{"quote":"Stay foolish","author":"Stewart Brand"}]"#,
        )
        .expect(1)
        .create();

    let home = TempDir::new().unwrap();
    write_config(&home, &server.url());

    tabquote(&home)
        .args(["-o", "json", "show", "--all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Stay hungry"))
        .stdout(predicate::str::contains("Stewart Brand"));

    // Fresh cache: no second round trip
    tabquote(&home)
        .args(["-o", "json", "show", "--all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Stay foolish"));

    metadata.assert();
    english.assert();

    tabquote(&home)
        .args(["cache", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[en]"))
        .stdout(predicate::str::contains("fresh"));
}

#[test]
fn test_show_falls_back_to_alternative_provider() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/dist/metadata.json")
        .with_status(503)
        .create();
    server.mock("GET", "/quote").with_status(500).create();
    server
        .mock("GET", "/api/random")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"en":"Talk is cheap. Show me the code.","author":"Linus Torvalds"}"#)
        .create();

    let home = TempDir::new().unwrap();
    write_config(&home, &server.url());

    tabquote(&home)
        .args(["show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Show me the code"))
        .stdout(predicate::str::contains("Linus Torvalds"));
}
