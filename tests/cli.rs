//! CLI smoke tests for the skillscout binary.

use assert_cmd::Command;
use predicates::prelude::*;

fn skillscout() -> Command {
    Command::cargo_bin("skillscout").expect("binary builds")
}

#[test]
fn help_lists_subcommands() {
    skillscout()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("browse"))
        .stdout(predicate::str::contains("search"))
        .stdout(predicate::str::contains("skills"));
}

#[test]
fn version_flag_works() {
    skillscout()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn missing_subcommand_fails() {
    skillscout().assert().failure();
}

#[test]
fn unreachable_service_reports_error() {
    skillscout()
        .args(["--quiet", "--base-url", "http://127.0.0.1:1", "search", "rust"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn json_mode_emits_structured_error() {
    skillscout()
        .args([
            "--quiet",
            "--json",
            "--base-url",
            "http://127.0.0.1:1",
            "search",
            "rust",
        ])
        .assert()
        .failure()
        .stdout(predicate::str::contains("\"error\":true"));
}
