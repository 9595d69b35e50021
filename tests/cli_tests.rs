//! End-to-end runs of the rpa-insights binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn rpa_insights(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("rpa-insights").unwrap();
    // Keep config discovery away from the developer's tree
    cmd.current_dir(dir.path());
    cmd
}

#[test]
fn test_roi_json_over_samples() {
    let dir = TempDir::new().unwrap();
    let output = rpa_insights(&dir)
        .args(["roi", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["kind"], "roi");
    let rows = report["data"].as_array().unwrap();
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[0]["processName"], "Invoice Processing Automation");
    assert_eq!(rows[0]["metrics"]["riskScore"], 6);
}

#[test]
fn test_departments_markdown() {
    let dir = TempDir::new().unwrap();
    rpa_insights(&dir)
        .args(["departments", "--format", "markdown"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Department ROI"))
        .stdout(predicate::str::contains("| Procurement | 1 |"));
}

#[test]
fn test_impact_for_unknown_process_fails() {
    let dir = TempDir::new().unwrap();
    rpa_insights(&dir)
        .args(["impact", "P999"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Process not found: P999"));
}

#[test]
fn test_cycles_from_input_file_with_id_matcher() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("processes.json");
    fs::write(
        &input,
        r#"[
          {"id": "A", "title": "Alpha", "description": "", "department": "IT",
           "priority": "Low", "expectedROI": 0, "status": "Submitted",
           "submittedBy": "x", "submittedDate": "2024-01-01", "estimatedSavings": 0,
           "complexity": "Low", "dependencies": ["B"], "tags": []},
          {"id": "B", "title": "Beta", "description": "", "department": "IT",
           "priority": "Low", "expectedROI": 0, "status": "Submitted",
           "submittedBy": "x", "submittedDate": "2024-01-01", "estimatedSavings": 0,
           "complexity": "Low", "dependencies": ["A"], "tags": []}
        ]"#,
    )
    .unwrap();

    rpa_insights(&dir)
        .args(["cycles", "--matcher", "id", "--format", "markdown", "--input"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("- A -> B -> A"));
}

#[test]
fn test_output_file_and_config_default_format() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(".rpa-insights.toml"),
        "[output]\ndefault_format = \"json\"\n",
    )
    .unwrap();
    let out = dir.path().join("graph.json");

    rpa_insights(&dir)
        .args(["graph", "--output"])
        .arg(&out)
        .assert()
        .success();

    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(report["kind"], "graph");
    assert_eq!(report["data"]["nodes"].as_array().unwrap().len(), 6);
}

#[test]
fn test_init_refuses_overwrite() {
    let dir = TempDir::new().unwrap();
    rpa_insights(&dir).arg("init").assert().success();
    assert!(dir.path().join(".rpa-insights.toml").exists());

    rpa_insights(&dir)
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_invalid_threshold_is_rejected() {
    let dir = TempDir::new().unwrap();
    rpa_insights(&dir)
        .args(["duplicates", "--threshold", "1.5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("between 0.0 and 1.0"));
}
