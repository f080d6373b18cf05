//! Integration tests for CLI argument handling.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_help_lists_analysis_flags() {
    let mut cmd = cargo_bin_cmd!("birdglot");
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--min-confidence"))
        .stdout(predicate::str::contains("--gain"))
        .stdout(predicate::str::contains("--language"))
        .stdout(predicate::str::contains("--images"));
}

#[test]
fn test_no_inputs_exits_nonzero_with_usage() {
    let mut cmd = cargo_bin_cmd!("birdglot");

    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn test_gain_out_of_range_rejected() {
    let mut cmd = cargo_bin_cmd!("birdglot");
    cmd.arg("--gain").arg("45").arg("test.wav");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("gain must be between"));
}

#[test]
fn test_confidence_out_of_range_rejected() {
    let mut cmd = cargo_bin_cmd!("birdglot");
    cmd.arg("-c").arg("1.5").arg("test.wav");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("confidence must be between"));
}

#[test]
fn test_latitude_out_of_range_rejected() {
    let mut cmd = cargo_bin_cmd!("birdglot");
    cmd.arg("--lat").arg("95").arg("test.wav");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("latitude must be between"));
}

#[test]
fn test_gpu_conflicts_with_cpu() {
    let mut cmd = cargo_bin_cmd!("birdglot");
    cmd.arg("--gpu").arg("--cpu").arg("test.wav");

    cmd.assert().failure();
}

#[test]
fn test_language_conflicts_with_no_translate() {
    let mut cmd = cargo_bin_cmd!("birdglot");
    cmd.arg("--language")
        .arg("fi")
        .arg("--no-translate")
        .arg("test.wav");

    cmd.assert().failure();
}

#[test]
fn test_unknown_format_rejected() {
    let mut cmd = cargo_bin_cmd!("birdglot");
    cmd.arg("--format").arg("xml").arg("test.wav");

    cmd.assert().failure();
}
