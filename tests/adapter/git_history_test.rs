//! Tests for the libgit2-backed commit history

use chrono::DateTime;
use featmap::adapters::{GitHistory, HistoryError};
use featmap::core::ports::CommitHistory;
use tempfile::TempDir;

use crate::common::git_repo::TempGitRepo;

fn sorted(mut files: Vec<String>) -> Vec<String> {
    files.sort();
    files
}

#[test]
fn root_commit_lists_every_file() {
    let repo = TempGitRepo::new();
    repo.write_file("auth/login.go", "package auth");
    repo.write_file("README.md", "# demo");
    repo.commit("feat(auth): implement login");

    let commits = GitHistory::open(repo.path()).unwrap().load().unwrap();
    assert_eq!(commits.len(), 1);
    assert_eq!(sorted(commits[0].files.clone()), vec!["README.md", "auth/login.go"]);
}

#[test]
fn later_commits_list_only_changed_paths() {
    let repo = TempGitRepo::new();
    repo.write_file("auth/login.go", "package auth");
    repo.write_file("api/routes.go", "package api");
    repo.commit("initial");

    repo.write_file("auth/session.go", "package auth");
    repo.write_file("auth/login.go", "package auth // v2");
    repo.commit("fix(auth): fix session handling");

    let commits = GitHistory::open(repo.path()).unwrap().load().unwrap();
    assert_eq!(commits.len(), 2);
    // Newest first
    assert_eq!(commits[0].summary(), "fix(auth): fix session handling");
    assert_eq!(sorted(commits[0].files.clone()), vec!["auth/login.go", "auth/session.go"]);
}

#[test]
fn deleted_files_are_reported() {
    let repo = TempGitRepo::new();
    repo.write_file("db/old_schema.sql", "CREATE TABLE t (id INT);");
    repo.write_file("keep.txt", "keep");
    repo.commit("initial");

    std::fs::remove_file(repo.path().join("db/old_schema.sql")).unwrap();
    repo.commit("drop old schema");

    let commits = GitHistory::open(repo.path()).unwrap().load().unwrap();
    assert_eq!(commits[0].files, vec!["db/old_schema.sql"]);
}

#[test]
fn renames_report_old_and_new_paths() {
    let repo = TempGitRepo::new();
    repo.write_file("auth/login.go", "package auth\n\nfunc Login() {}\n");
    repo.commit("initial");

    std::fs::create_dir_all(repo.path().join("session")).unwrap();
    let output = repo.git(&["mv", "auth/login.go", "session/login.go"]);
    assert!(output.status.success(), "git mv failed: {output:?}");
    repo.commit("refactor: move login into session");

    let commits = GitHistory::open(repo.path()).unwrap().load().unwrap();
    assert_eq!(commits[0].files, vec!["auth/login.go", "session/login.go"]);
}

#[test]
fn author_fields_are_read() {
    let repo = TempGitRepo::new();
    repo.write_file("a.txt", "a");
    repo.commit_as("first", "Jane Smith", "jane@example.com", "2024-03-01T10:00:00Z");

    let commits = GitHistory::open(repo.path()).unwrap().load().unwrap();
    let commit = &commits[0];
    assert_eq!(commit.author_name, "Jane Smith");
    assert_eq!(commit.author_email, "jane@example.com");
    assert_eq!(commit.timestamp, DateTime::parse_from_rfc3339("2024-03-01T10:00:00Z").unwrap());
    assert_eq!(commit.hash.len(), 40);
    assert!(commit.message.starts_with("first"));
}

#[test]
fn multi_line_messages_are_kept_whole() {
    let repo = TempGitRepo::new();
    repo.write_file("a.txt", "a");
    repo.commit("feat(ui): add theme\n\nBREAKING CHANGE: new tokens");

    let commits = GitHistory::open(repo.path()).unwrap().load().unwrap();
    assert!(commits[0].message.contains("BREAKING CHANGE: new tokens"));
    assert_eq!(commits[0].summary(), "feat(ui): add theme");
}

#[test]
fn open_from_a_subdirectory() {
    let repo = TempGitRepo::new();
    repo.write_file("nested/dir/file.txt", "x");
    repo.commit("initial");

    let history = GitHistory::open(repo.path().join("nested/dir")).unwrap();
    assert_eq!(history.load().unwrap().len(), 1);
}

#[test]
fn from_source_opens_existing_paths() {
    let repo = TempGitRepo::new();
    repo.write_file("a.txt", "a");
    repo.commit("initial");

    let source = repo.path().display().to_string();
    let history = GitHistory::from_source(&source).unwrap();
    assert_eq!(history.source(), source);
    assert_eq!(history.commits().unwrap().len(), 1);
}

#[test]
fn clone_remote_reads_a_file_url() {
    let upstream = TempGitRepo::new();
    upstream.write_file("cache/redis.go", "package cache");
    upstream.commit("feat(cache): add redis");

    let url = format!("file://{}", upstream.path().display());
    let history = GitHistory::clone_remote(&url).unwrap();
    let commits = history.commits().unwrap();
    assert_eq!(commits.len(), 1);
    assert_eq!(commits[0].files, vec!["cache/redis.go"]);
}

#[test]
fn non_repository_path_fails_to_open() {
    let dir = TempDir::new().unwrap();
    let err = GitHistory::open(dir.path()).unwrap_err();
    assert!(matches!(err, HistoryError::Open { .. }));
}

#[test]
fn unreachable_source_fails_to_clone() {
    let err = GitHistory::from_source("/definitely/not/a/repo/featmap-test").unwrap_err();
    assert!(matches!(err, HistoryError::Clone { .. }));
}

#[test]
fn empty_repository_has_no_head() {
    let repo = TempGitRepo::new();
    let history = GitHistory::open(repo.path()).unwrap();
    assert!(history.load().is_err());
}
