//! CLI surface specs
//!
//! Verify the argument surface stays stable for support scripts.

use crate::prelude::*;

#[test]
fn help_shows_usage_and_flags() {
    let assert = rlec().arg("--help").assert().success();
    let stdout = stdout_of(&assert);
    assert!(stdout.contains("Usage:"));
    assert!(stdout.contains("--namespace"));
    assert!(stdout.contains("--output-dir"));
    assert!(stdout.contains("--timeout"));
    assert!(stdout.contains("--cli"));
    assert!(stdout.contains("--mode"));
}

#[test]
fn version_shows_package_version() {
    let assert = rlec().arg("--version").assert().success();
    assert!(stdout_of(&assert).contains("0.1"));
}

#[test]
fn rejects_unknown_cli_choice() {
    rlec().args(["--cli", "podman"]).assert().failure();
}

#[test]
fn rejects_negative_timeout() {
    // The timeout is unsigned at parse time; negatives never reach the
    // collector.
    rlec().args(["-t", "-1"]).assert().failure();
}
