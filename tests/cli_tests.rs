//! CLI integration tests.

mod support;

use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;

use support::sample_capture;

fn propmatch() -> Command {
    let mut cmd = cargo_bin_cmd!("propmatch");
    cmd.args(["--color", "never"]);
    cmd
}

#[test]
fn test_help_lists_commands() {
    propmatch()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("merge"))
        .stdout(predicate::str::contains("inspect"))
        .stdout(predicate::str::contains("odds"));
}

#[test]
fn test_odds_implied() {
    propmatch()
        .args(["odds", "implied", "-135"])
        .assert()
        .success()
        .stdout(predicate::str::contains("57.45%"));
}

#[test]
fn test_odds_implied_rejects_invalid_price() {
    propmatch()
        .args(["odds", "implied", "50"])
        .assert()
        .failure();
}

#[test]
fn test_merge_writes_both_outputs() {
    let capture = sample_capture();

    propmatch()
        .arg("merge")
        .arg("--catalog")
        .arg(capture.catalog_path())
        .arg("--event-log-dir")
        .arg(capture.log_dir())
        .arg("--output-dir")
        .arg(capture.output_dir())
        .assert()
        .success()
        .stdout(predicate::str::contains("Travis Kelce"))
        .stdout(predicate::str::contains("merged_props.csv"));

    assert!(capture.output_dir().join("merged_props.json").exists());
    let csv = capture.read_output("merged_props.csv");
    assert!(csv.starts_with("Player,Prop Type,Splash Line,Average Odds,Win %,Exchanges\n"));
    assert_eq!(csv.lines().count(), 3);
}

#[test]
fn test_merge_fails_without_catalog() {
    let capture = sample_capture();
    fs::remove_file(capture.catalog_path()).expect("remove catalog");

    propmatch()
        .arg("merge")
        .arg("--catalog")
        .arg(capture.catalog_path())
        .arg("--event-log-dir")
        .arg(capture.log_dir())
        .arg("--output-dir")
        .arg(capture.output_dir())
        .assert()
        .failure()
        .stderr(predicate::str::contains("catalog feed"));

    assert!(!capture.output_dir().exists());
}

#[test]
fn test_merge_rejects_invalid_config() {
    let capture = sample_capture();
    let path = capture.root().join("propmatch.toml");
    fs::write(&path, "[matching]\nodds_tolerance = 0.0\n").expect("write temp config");

    let output = propmatch()
        .arg("merge")
        .arg("--config")
        .arg(&path)
        .output()
        .expect("run propmatch");

    assert!(!output.status.success(), "Expected nonzero exit code");
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        format!("{stdout}{stderr}").contains("odds_tolerance"),
        "Expected error message about invalid config.\nstdout: {stdout}\nstderr: {stderr}"
    );
}

#[test]
fn test_inspect_writes_parsed_log() {
    let capture = sample_capture();
    let output = capture.root().join("parsed.json");

    propmatch()
        .arg("inspect")
        .arg("--event-log-dir")
        .arg(capture.log_dir())
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("LineChangeTotal"));

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).expect("read parsed log"))
            .expect("parse inspection json");
    assert_eq!(json["metadata"]["stats"]["definitions"], 3);
    assert_eq!(json["metadata"]["stats"]["messages"], 4);
}
