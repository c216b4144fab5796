//! Binary-level CLI parsing checks
//!
//! These only exercise argument parsing paths that exit before any
//! network or keyring access.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help_lists_subcommands() {
    Command::cargo_bin("lifeharness")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("dashboard"))
        .stdout(predicate::str::contains("thread"))
        .stdout(predicate::str::contains("entries"))
        .stdout(predicate::str::contains("autobiography"));
}

#[test]
fn test_unknown_subcommand_fails() {
    Command::cargo_bin("lifeharness")
        .unwrap()
        .arg("frobnicate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_thread_new_requires_title_and_prompt() {
    Command::cargo_bin("lifeharness")
        .unwrap()
        .args(["thread", "new", "--title", "College"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--prompt"));
}

#[test]
fn test_version_flag() {
    Command::cargo_bin("lifeharness")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("lifeharness"));
}
