// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::io::Write as _;

#[test]
fn defaults_when_file_absent() {
    let config = Config::load(std::path::Path::new("/nonexistent/config.toml"));
    assert_eq!(config.cli.ai_command, "claude");
    assert_eq!(config.engine.max_iterations, 50);
    assert_eq!(config.engine.max_retries, 3);
}

#[test]
fn loads_partial_overrides_from_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    let mut file = std::fs::File::create(&path).expect("create");
    write!(file, "[engine]\nmax_iterations = 5\n").expect("write");

    let config = Config::load(&path);
    assert_eq!(config.engine.max_iterations, 5);
    assert_eq!(config.engine.max_retries, 3, "unset fields keep their default");
    assert_eq!(config.cli.ai_command, "claude");
}

#[test]
fn env_override_wins_over_file_and_default() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[engine]\nmax_iterations = 5\n").expect("write");

    // SAFETY-equivalent: test-only process-wide env mutation, no concurrent access in this test.
    std::env::set_var("MORTY_MAX_ITERATIONS", "9");
    let config = Config::load(&path);
    std::env::remove_var("MORTY_MAX_ITERATIONS");

    assert_eq!(config.engine.max_iterations, 9);
}
