use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_help_shows_all_commands() {
    cargo_bin_cmd!("chiedza")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("portal"))
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("report"))
        .stdout(predicate::str::contains("--demo"));
}

#[test]
fn test_report_help_lists_kinds() {
    cargo_bin_cmd!("chiedza")
        .args(["report", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("strategic"))
        .stdout(predicate::str::contains("groups"))
        .stdout(predicate::str::contains("loans"));
}

#[test]
fn test_groups_help_shows_add() {
    cargo_bin_cmd!("chiedza")
        .args(["groups", "add", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--name"))
        .stdout(predicate::str::contains("--cluster"));
}

#[test]
fn test_version_flag() {
    cargo_bin_cmd!("chiedza")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_portal_requires_terminal() {
    let dir = tempfile::tempdir().unwrap();
    cargo_bin_cmd!("chiedza")
        .env("CHIEDZA_HOME", dir.path())
        .arg("--demo")
        .assert()
        .failure()
        .stderr(predicate::str::contains("requires a terminal"));
}
