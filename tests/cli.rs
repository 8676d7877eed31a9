// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 pipgen contributors

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

const PIPELINE: &str = r#"
resources:
  - name: repo
    type: git
  - name: image
    type: registry-image
jobs:
  - name: unit
    plan:
      - get: repo
        trigger: true
  - name: build
    plan:
      - get: repo
        passed: [unit]
      - put: image
  - name: deploy
    plan:
      - aggregate:
          - get: image
            passed: [build]
          - get: repo
            passed: [unit]
"#;

fn write_pipeline(contents: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("pipeline.yml");
    std::fs::write(&path, contents).unwrap();
    (dir, path)
}

fn pipgen() -> Command {
    let mut cmd = Command::cargo_bin("pipgen").unwrap();
    cmd.env_remove("PIPGEN_PIPELINE").env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_resolve_text_order() {
    let (_dir, path) = write_pipeline(PIPELINE);

    pipgen()
        .arg("resolve")
        .arg(&path)
        .args(["--job", "deploy", "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("1. unit\n2. build"))
        .stdout(predicate::str::contains("3. deploy [depends: build, unit]"))
        .stdout(predicate::str::contains("resources: repo, image"));
}

#[test]
fn test_resolve_yaml_to_file() {
    let (dir, path) = write_pipeline(PIPELINE);
    let out = dir.path().join("out.yml");

    pipgen()
        .arg("resolve")
        .arg(&path)
        .args(["-j", "build", "-o"])
        .arg(&out)
        .assert()
        .success();

    let rendered: serde_yaml::Value =
        serde_yaml::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    let jobs = rendered["jobs"].as_sequence().unwrap();
    assert_eq!(jobs.len(), 2);
    assert_eq!(jobs[0]["name"], "unit");
    assert_eq!(jobs[1]["name"], "build");
}

#[test]
fn test_pipeline_from_environment() {
    let (_dir, path) = write_pipeline(PIPELINE);

    pipgen()
        .env("PIPGEN_PIPELINE", &path)
        .args(["resolve", "-j", "unit", "-f", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"type\": \"git\""));
}

#[test]
fn test_missing_job_fails() {
    let (_dir, path) = write_pipeline(PIPELINE);

    pipgen()
        .arg("resolve")
        .arg(&path)
        .args(["--job", "release"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing job 'release'"));
}

#[test]
fn test_circular_dependency_fails() {
    let (_dir, path) = write_pipeline(
        r#"
jobs:
  - name: a
    plan:
      - get: x
        passed: [b]
  - name: b
    plan:
      - get: y
        passed: [a]
"#,
    );

    pipgen()
        .arg("resolve")
        .arg(&path)
        .args(["-j", "a"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Circular dependency detected"));
}

#[test]
fn test_missing_pipeline_file() {
    let dir = TempDir::new().unwrap();

    pipgen()
        .current_dir(dir.path())
        .args(["resolve", "-j", "a"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Pipeline file not found"));
}

#[test]
fn test_graph_dot() {
    let (_dir, path) = write_pipeline(PIPELINE);

    pipgen()
        .arg("graph")
        .arg(&path)
        .args(["-j", "deploy", "-f", "dot"])
        .assert()
        .success()
        .stdout(predicate::str::contains("digraph pipeline {"))
        .stdout(predicate::str::contains("\"build\" -> \"deploy\";"))
        .stdout(predicate::str::contains("\"unit\" -> \"build\";"));
}

#[test]
fn test_jobs_listing() {
    let (_dir, path) = write_pipeline(PIPELINE);

    pipgen()
        .arg("jobs")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Loaded jobs (3):"))
        .stdout(predicate::str::contains("deploy: \t[build, unit]"));
}

#[test]
fn test_jobs_listing_rejects_duplicates() {
    let (_dir, path) = write_pipeline("jobs:\n  - name: a\n  - name: a\n");

    pipgen()
        .arg("jobs")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Duplicate job"));
}

#[test]
fn test_jobs_listing_without_jobs() {
    let (_dir, path) = write_pipeline("{}");

    pipgen()
        .arg("jobs")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("No jobs defined"));
}
