// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use tempfile::tempdir;

#[test]
fn writes_bytes_readable_after_return() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("state.json");
    write_atomic(&path, b"{\"a\":1}").expect("write");
    let read_back = fs::read(&path).expect("read");
    assert_eq!(read_back, b"{\"a\":1}");
}

#[test]
fn overwrites_existing_file_completely() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("state.json");
    write_atomic(&path, b"first-longer-content").expect("write");
    write_atomic(&path, b"second").expect("write");
    let read_back = fs::read(&path).expect("read");
    assert_eq!(read_back, b"second");
}

#[test]
fn creates_missing_parent_directories() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("nested").join("deep").join("state.json");
    write_atomic(&path, b"ok").expect("write");
    assert!(path.exists());
}

#[test]
fn no_leftover_tmp_file_after_success() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("state.json");
    write_atomic(&path, b"ok").expect("write");
    let tmp_path = dir.path().join(".state.json.tmp");
    assert!(!tmp_path.exists());
}
