use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn data_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(
        br#"{"colors": ["Red", "Green", "Blue"], "hosts": {"h1": "Host One", "h2": "Host Two"}}"#,
    )
    .unwrap();
    file
}

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("valuemap").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Grafana SimpleJSON datasource"));
}

#[test]
fn test_cli_serve_help() {
    let mut cmd = Command::cargo_bin("valuemap").unwrap();
    cmd.arg("serve").arg("--help").assert().success().stdout(predicate::str::contains("port"));
}

#[test]
fn test_cli_query() {
    let data = data_file();
    let mut cmd = Command::cargo_bin("valuemap").unwrap();
    cmd.args(["query", r#"{"data":"hosts","id":"(h2|h9)"}"#, "--data"])
        .arg(data.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"Host Two\"").and(predicate::str::contains("h1").not()));
}

#[test]
fn test_cli_query_unknown_dataset_fails() {
    let data = data_file();
    let mut cmd = Command::cargo_bin("valuemap").unwrap();
    cmd.args(["query", r#"{"data":"missing"}"#, "--data"])
        .arg(data.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("no data found for data target: missing"));
}

#[test]
fn test_cli_datasets() {
    let data = data_file();
    let mut cmd = Command::cargo_bin("valuemap").unwrap();
    cmd.arg("datasets")
        .arg("--data")
        .arg(data.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("colors\tlist\t3").and(predicate::str::contains("hosts\tkeyed\t2")));
}

#[test]
fn test_cli_missing_data_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = Command::cargo_bin("valuemap").unwrap();
    cmd.arg("datasets")
        .arg("--data")
        .arg(dir.path().join("nope.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load datasets"));
}
