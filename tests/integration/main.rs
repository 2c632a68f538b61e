//! Integration tests for the featmap CLI
//!
//! Build small repositories with the git CLI and run the binary against them.

#[path = "../common/mod.rs"]
#[allow(dead_code)]
mod common;

use assert_cmd::cargo;
use common::git_repo::TempGitRepo;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper function to create a featmap command
fn featmap() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(cargo::cargo_bin!("featmap"));
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

/// Three commits: two on auth by different authors, one on the API
fn sample_repo() -> TempGitRepo {
    let repo = TempGitRepo::new();

    repo.write_file("auth/login.go", "package auth");
    repo.write_file("auth/middleware.go", "package auth");
    repo.commit_as(
        "feat(auth): implement login",
        "John Doe",
        "john@example.com",
        "2024-01-01T09:00:00Z",
    );

    repo.write_file("auth/session.go", "package auth");
    repo.commit_as(
        "fix(auth): fix session handling",
        "Jane Smith",
        "jane@example.com",
        "2024-01-02T09:00:00Z",
    );

    repo.write_file("api/user.go", "package api");
    repo.write_file("api/routes.go", "package api");
    repo.commit_as(
        "feat(api): add user endpoints",
        "John Doe",
        "john@example.com",
        "2024-01-03T09:00:00Z",
    );

    repo
}

// =============================================================================
// BASIC CLI
// =============================================================================

#[test]
fn test_help() {
    featmap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--repo"))
        .stdout(predicate::str::contains("--json"))
        .stdout(predicate::str::contains("UTC"));
}

#[test]
fn test_version() {
    featmap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(featmap::VERSION));
}

#[test]
fn test_repo_flag_is_required() {
    featmap().assert().failure().stderr(predicate::str::contains("--repo"));
}

// =============================================================================
// REPORTS
// =============================================================================

#[test]
fn test_human_report() {
    let repo = sample_repo();

    featmap()
        .arg("--repo")
        .arg(repo.path())
        .current_dir(repo.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 3 commits"))
        .stdout(predicate::str::contains("Feature: Authentication"))
        .stdout(predicate::str::contains("Created: 2024-01-01"))
        .stdout(predicate::str::contains("Last Updated: 2024-01-02"))
        .stdout(predicate::str::contains("  - jane@example.com (50.0%)"))
        .stdout(predicate::str::contains("Number of Bugs: 1"))
        .stdout(predicate::str::contains(
            "[2024-01-02] by jane@example.com: fix(auth): fix session handling",
        ));
}

#[test]
fn test_json_report() {
    let repo = sample_repo();

    let output = featmap()
        .args(["--json", "--skip-empty", "--top", "1"])
        .arg("--repo")
        .arg(repo.path())
        .current_dir(repo.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["commits_analyzed"], 3);

    let features = report["features"].as_array().unwrap();
    let names: Vec<&str> = features.iter().map(|f| f["name"].as_str().unwrap()).collect();
    assert!(names.contains(&"Authentication"));
    assert!(names.contains(&"API"));
    assert!(!names.contains(&"Payment"));

    let api = features.iter().find(|f| f["name"] == "API").unwrap();
    assert_eq!(api["commit_count"], 1);
    assert_eq!(api["owners"][0]["email"], "john@example.com");
    assert_eq!(api["top_contributors"][0], "john@example.com");
}

#[test]
fn test_threshold_flags_change_owners() {
    let repo = sample_repo();

    // Auth is split 50/50; a 0.6 primary threshold demotes both authors
    let output = featmap()
        .args(["--json", "--primary-threshold", "0.6", "--backup-threshold", "0.3"])
        .arg("--repo")
        .arg(repo.path())
        .current_dir(repo.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let auth = report["features"]
        .as_array()
        .unwrap()
        .iter()
        .find(|f| f["name"] == "Authentication")
        .unwrap();
    assert_eq!(auth["owners"].as_array().unwrap().len(), 0);
    assert_eq!(auth["backup_owners"].as_array().unwrap().len(), 2);
}

#[test]
fn test_config_file_adds_features() {
    let repo = sample_repo();
    let config_dir = TempDir::new().unwrap();
    let config = config_dir.path().join("featmap.toml");
    fs::write(
        &config,
        "[taxonomy]\nbuiltin = false\n\n[taxonomy.features]\nRouting = [\"routes\"]\n",
    )
    .unwrap();

    featmap()
        .arg("--repo")
        .arg(repo.path())
        .arg("--config")
        .arg(&config)
        .current_dir(config_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Feature: Routing"))
        .stdout(predicate::str::contains("Feature: Authentication").not());
}

// =============================================================================
// ERROR HANDLING
// =============================================================================

#[test]
fn test_missing_repository_fails() {
    let temp = TempDir::new().unwrap();

    featmap()
        .args(["--repo", "/definitely/not/a/repo/featmap-test"])
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_invalid_threshold_fails() {
    let repo = sample_repo();

    featmap()
        .args(["--primary-threshold", "1.5"])
        .arg("--repo")
        .arg(repo.path())
        .current_dir(repo.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("primary threshold"));
}

#[test]
fn test_invalid_config_pattern_fails() {
    let repo = sample_repo();
    let config_dir = TempDir::new().unwrap();
    fs::write(config_dir.path().join(".featmap.toml"), "[taxonomy.features]\nBroken = [\"(\"]\n")
        .unwrap();

    featmap()
        .arg("--repo")
        .arg(repo.path())
        .current_dir(config_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Broken"));
}
