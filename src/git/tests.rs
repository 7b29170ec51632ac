// extsync: External Dependency Syncer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::query::{current_branch, head_commit, is_git_repo};
use tempfile::TempDir;

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

#[test]
fn git_is_git_repo_false_for_plain_dir() {
    let temp = temp_dir();
    assert!(!is_git_repo(temp.path()));
}

#[test]
fn git_current_branch_not_a_repo() {
    let temp = temp_dir();
    assert!(current_branch(temp.path()).is_err());
}

#[test]
fn git_head_commit_not_a_repo() {
    let temp = temp_dir();
    assert!(head_commit(temp.path()).is_err());
}
