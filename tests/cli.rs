//! Binary-level tests for the mcp-hatchery CLI

mod common;

use assert_cmd::Command;
use common::{create_server_project, SAMPLE_JS_SERVER, SAMPLE_TS_SERVER};
use predicates::prelude::*;

fn hatchery() -> Command {
    let mut cmd = Command::cargo_bin("mcp-hatchery").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_analyze_json() {
    let (_dir, path) = create_server_project(&[("src/server.ts", SAMPLE_TS_SERVER)]);

    let output = hatchery()
        .args(["analyze", "--format", "json"])
        .arg(&path)
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["tools"][0]["name"], "get_forecast");
    assert_eq!(json["tools"][0]["inputSchema"]["city"], "string");
    assert_eq!(json["resources"][0]["uri"], "weather://stations");
    assert_eq!(json["summary"]["promptCount"], 1);
}

#[test]
fn test_analyze_table() {
    let (_dir, path) = create_server_project(&[
        ("src/server.ts", SAMPLE_TS_SERVER),
        ("src/legacy.js", SAMPLE_JS_SERVER),
    ]);

    hatchery()
        .env("NO_COLOR", "1")
        .arg("analyze")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 3 tool(s)"))
        .stdout(predicate::str::contains("Found 1 resource(s)"))
        .stdout(predicate::str::contains("Found 2 prompt(s)"))
        .stdout(predicate::str::contains("get_forecast"));
}

#[test]
fn test_analyze_plain() {
    let (_dir, path) = create_server_project(&[("legacy.js", SAMPLE_JS_SERVER)]);

    hatchery()
        .args(["analyze", "-f", "plain"])
        .arg(&path)
        .assert()
        .success()
        .stdout("echo\nping\ngreeting\n");
}

#[test]
fn test_analyze_missing_path_fails() {
    hatchery()
        .args(["analyze", "/nonexistent/mcp/server"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Path not found"))
        .stderr(predicate::str::contains("/nonexistent/mcp/server"));
}

#[test]
fn test_analyze_bare() {
    hatchery()
        .args(["analyze", "--bare", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"toolCount\": 0"));
}

#[test]
fn test_files_lists_candidates() {
    let (_dir, path) = create_server_project(&[
        ("src/index.ts", "export {}"),
        ("node_modules/sdk/index.js", "export {}"),
        ("package.json", "{}"),
    ]);

    hatchery()
        .arg("files")
        .arg(&path)
        .assert()
        .success()
        .stdout("src/index.ts\n");
}

#[test]
fn test_config_json() {
    let (_dir, path) = create_server_project(&[(
        "custom.toml",
        "[analysis]\nschema_window = 42\n\n[remote]\nshallow = false\n",
    )]);

    let output = hatchery()
        .arg("--config")
        .arg(path.join("custom.toml"))
        .args(["config", "--format", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["config"]["analysis"]["schema_window"], 42);
    assert_eq!(json["config"]["remote"]["shallow"], false);
    assert_eq!(json["config"]["remote"]["git_command"], "git");
}

#[test]
fn test_conflicting_sources_rejected() {
    hatchery()
        .args(["analyze", ".", "--bare"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}
