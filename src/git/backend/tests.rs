// extsync: External Dependency Syncer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{GitQuery, GixBackend, ShellBackend};
use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

/// Helper to run git commands in a directory
fn run_git(args: &[&str], cwd: &std::path::Path) -> bool {
    Command::new("git")
        .args(args)
        .current_dir(cwd)
        .env("GIT_AUTHOR_NAME", "Test")
        .env("GIT_AUTHOR_EMAIL", "test@test.com")
        .env("GIT_COMMITTER_NAME", "Test")
        .env("GIT_COMMITTER_EMAIL", "test@test.com")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Create an initialized git repo with an initial commit (README.md)
fn init_test_repo_with_commit(dir: &std::path::Path) {
    run_git(&["init", "-q", "-b", "master"], dir);
    run_git(&["config", "user.email", "test@test.com"], dir);
    run_git(&["config", "user.name", "Test"], dir);
    let file = dir.join("README.md");
    fs::write(&file, "# Test").unwrap();
    run_git(&["add", "."], dir);
    run_git(&["commit", "-m", "Initial commit"], dir);
}

#[test]
fn gix_backend_detects_repo() {
    let temp = temp_dir();
    init_test_repo_with_commit(temp.path());
    assert!(GixBackend::is_git_repo(temp.path()));
}

#[test]
fn backends_agree_on_current_branch() {
    let temp = temp_dir();
    init_test_repo_with_commit(temp.path());

    let gix_branch = GixBackend::current_branch(temp.path()).unwrap();
    let shell_branch = ShellBackend::current_branch(temp.path()).unwrap();
    assert_eq!(gix_branch, shell_branch);
    assert_eq!(gix_branch, Some("master".to_string()));
}

#[test]
fn backends_agree_on_head_commit() {
    let temp = temp_dir();
    init_test_repo_with_commit(temp.path());

    let gix_head = GixBackend::head_commit(temp.path()).unwrap();
    let shell_head = ShellBackend::head_commit(temp.path()).unwrap();
    assert_eq!(gix_head, shell_head);
    assert_eq!(gix_head.len(), 40);
}

#[test]
fn shell_backend_detached_head_has_no_branch() {
    let temp = temp_dir();
    init_test_repo_with_commit(temp.path());

    let head = ShellBackend::head_commit(temp.path()).unwrap();
    run_git(&["checkout", "-q", &head], temp.path());

    assert_eq!(ShellBackend::current_branch(temp.path()).unwrap(), None);
    assert_eq!(GixBackend::current_branch(temp.path()).unwrap(), None);
}

#[test]
fn shell_backend_command_failure_reports_stderr() {
    let temp = temp_dir();
    init_test_repo_with_commit(temp.path());

    let result = ShellBackend::git_command(&["checkout", "no-such-rev"], temp.path());
    let err = result.unwrap_err();
    assert!(err.to_string().contains("git command failed"));
}
