// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::fs;
use tempfile::tempdir;

fn write_file(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent");
    }
    fs::write(path, content).expect("write file");
}

#[test]
fn ensure_repo_initializes_when_absent() {
    let dir = tempdir().expect("tempdir");
    let vi = VersionIntegration::ensure_repo(dir.path(), ".morty/logs").expect("ensure_repo");
    assert!(dir.path().join(".git").exists());
    assert!(!vi.has_uncommitted_changes().expect("check changes"));
}

#[test]
fn detects_untracked_files_as_uncommitted() {
    let dir = tempdir().expect("tempdir");
    let vi = VersionIntegration::ensure_repo(dir.path(), ".morty/logs").expect("ensure_repo");
    write_file(dir.path(), "src/main.rs", "fn main() {}");
    assert!(vi.has_uncommitted_changes().expect("check changes"));
}

#[test]
fn untracked_log_directory_does_not_count_as_uncommitted() {
    let dir = tempdir().expect("tempdir");
    let vi = VersionIntegration::ensure_repo(dir.path(), ".morty/logs").expect("ensure_repo");
    write_file(dir.path(), ".morty/logs/execution_1.log", "{}");
    assert!(!vi.has_uncommitted_changes().expect("check changes"));
}

#[test]
fn create_job_commit_is_a_no_op_without_changes() {
    let dir = tempdir().expect("tempdir");
    let vi = VersionIntegration::ensure_repo(dir.path(), ".morty/logs").expect("ensure_repo");
    let result = vi.create_job_commit(1, "completed").expect("commit attempt");
    assert!(result.is_none());
}

#[test]
fn create_job_commit_produces_parseable_loop_subject() {
    let dir = tempdir().expect("tempdir");
    let vi = VersionIntegration::ensure_repo(dir.path(), ".morty/logs").expect("ensure_repo");
    write_file(dir.path(), "src/main.rs", "fn main() {}");
    let hash = vi.create_job_commit(3, "completed").expect("commit").expect("should commit");

    let history = vi.show_loop_history(10).expect("history");
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].hash, hash);
    assert_eq!(history[0].loop_number, 3);
    assert_eq!(history[0].status, "completed");
}

#[test]
fn loop_number_increases_monotonically_and_is_queryable_by_number() {
    let dir = tempdir().expect("tempdir");
    let vi = VersionIntegration::ensure_repo(dir.path(), ".morty/logs").expect("ensure_repo");

    write_file(dir.path(), "a.txt", "1");
    vi.create_job_commit(1, "completed").expect("commit 1");
    write_file(dir.path(), "b.txt", "2");
    vi.create_job_commit(2, "completed").expect("commit 2");

    assert_eq!(vi.get_current_loop_number().expect("current"), 2);
    let hash1 = vi.get_loop_by_number(1).expect("lookup").expect("present");
    let hash2 = vi.get_loop_by_number(2).expect("lookup").expect("present");
    assert_ne!(hash1, hash2);
}

#[test]
fn reset_to_commit_restores_tree_and_preserves_log_dir() {
    let dir = tempdir().expect("tempdir");
    let vi = VersionIntegration::ensure_repo(dir.path(), ".morty/logs").expect("ensure_repo");

    write_file(dir.path(), "a.txt", "first");
    let first_hash = vi.create_job_commit(1, "completed").expect("commit").expect("should commit");

    write_file(dir.path(), ".morty/logs/execution_1.log", "log-before-reset");
    write_file(dir.path(), "a.txt", "second");
    vi.create_job_commit(2, "completed").expect("commit 2");

    vi.reset_to_commit(&first_hash).expect("reset");

    assert_eq!(fs::read_to_string(dir.path().join("a.txt")).expect("read"), "first");
    assert_eq!(
        fs::read_to_string(dir.path().join(".morty/logs/execution_1.log")).expect("read log"),
        "log-before-reset"
    );
}

#[test]
fn reset_to_commit_rejects_unknown_hash() {
    let dir = tempdir().expect("tempdir");
    let vi = VersionIntegration::ensure_repo(dir.path(), ".morty/logs").expect("ensure_repo");
    let err = vi.reset_to_commit("0000000000000000000000000000000000000000").unwrap_err();
    assert!(matches!(err, VcsError::InvalidCommit(_)));
}

#[test]
fn reset_to_loop_resolves_loop_number_then_resets() {
    let dir = tempdir().expect("tempdir");
    let vi = VersionIntegration::ensure_repo(dir.path(), ".morty/logs").expect("ensure_repo");

    write_file(dir.path(), "a.txt", "first");
    vi.create_job_commit(1, "completed").expect("commit 1");
    write_file(dir.path(), "a.txt", "second");
    vi.create_job_commit(2, "completed").expect("commit 2");

    vi.reset_to_loop(1).expect("reset to loop 1");
    assert_eq!(fs::read_to_string(dir.path().join("a.txt")).expect("read"), "first");
}
