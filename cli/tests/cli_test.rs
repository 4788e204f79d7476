use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help_command() {
    let mut cmd = Command::cargo_bin("planforge").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Operator command-line surface"))
        .stdout(predicate::str::contains("generate-package"))
        .stdout(predicate::str::contains("validate-distribution"));
}

#[test]
fn test_version_command() {
    let mut cmd = Command::cargo_bin("planforge").unwrap();
    cmd.arg("--version");

    cmd.assert().success().stdout(predicate::str::contains("0.1.0"));
}

#[test]
fn test_completions_command() {
    let mut cmd = Command::cargo_bin("planforge").unwrap();
    cmd.arg("completions").arg("bash");

    cmd.assert().success().stdout(predicate::str::contains("_planforge"));
}

#[test]
fn test_generate_package_reports_fatal_on_missing_profile() {
    let tmp = tempfile::tempdir().unwrap();
    let mut cmd = Command::cargo_bin("planforge").unwrap();
    cmd.current_dir(tmp.path())
        .env("HOME", tmp.path())
        .arg("generate-package")
        .arg("no-such-athlete");

    // A missing profile document is a fatal I/O failure at the
    // validate-profile stage: exit code 1, not a panic or success.
    cmd.assert().code(1).stderr(predicate::str::contains("pipeline stopped at stage"));
}
