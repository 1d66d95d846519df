// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn short_truncates_to_n_chars() {
    let id = ModuleId::new("module-with-a-long-name");
    assert_eq!(id.short(6), "module");
}

#[test]
fn short_returns_whole_string_when_shorter_than_n() {
    let id = ModuleId::new("m1");
    assert_eq!(id.short(10), "m1");
}

#[test]
fn equality_against_str_slices() {
    let id = JobId::new("j1");
    assert_eq!(id, "j1");
    assert_eq!(id, *&"j1");
}

#[test]
fn display_matches_inner_string() {
    let id = JobId::new("build");
    assert_eq!(id.to_string(), "build");
}

#[test]
fn serde_roundtrip_is_transparent() {
    let id = ModuleId::new("m1");
    let json = serde_json::to_string(&id).expect("serialize");
    assert_eq!(json, "\"m1\"");
    let back: ModuleId = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, id);
}
