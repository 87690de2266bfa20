use assert_cmd::Command;
use predicates::prelude::*;

/// Test CLI help output
#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("mcp-server-lighthouse").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--api-key"))
        .stdout(predicate::str::contains("--endpoint"));
}

/// Test CLI version output
#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("mcp-server-lighthouse").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

/// The API key must never be echoed back in help output
#[test]
fn test_api_key_hidden_in_help() {
    let mut cmd = Command::cargo_bin("mcp-server-lighthouse").unwrap();
    cmd.env("PAGESPEED_API_KEY", "super-secret-key")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("super-secret-key").not());
}

/// Test rejection of a malformed endpoint
#[test]
fn test_invalid_endpoint() {
    let mut cmd = Command::cargo_bin("mcp-server-lighthouse").unwrap();
    cmd.args(["--endpoint", "not a url"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--endpoint"));
}
