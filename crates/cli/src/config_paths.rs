// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Default on-disk layout under `.morty/` in the current working directory.

use std::path::PathBuf;

pub fn config_path() -> PathBuf {
    PathBuf::from(".morty/config.toml")
}

pub fn default_plan_path() -> PathBuf {
    PathBuf::from(".morty/plan.toml")
}

pub fn default_state_path() -> PathBuf {
    PathBuf::from(".morty/state.json")
}

/// Parses a duration flag like `600`, `600s`, `10m`, or `1h`. Bare numbers
/// are seconds.
pub fn parse_duration(s: &str) -> Result<std::time::Duration, String> {
    let s = s.trim();
    let (digits, unit) = match s.find(|c: char| !c.is_ascii_digit()) {
        Some(idx) => s.split_at(idx),
        None => (s, ""),
    };
    let value: u64 = digits.parse().map_err(|_| format!("invalid duration: {s}"))?;
    let secs = match unit {
        "" | "s" => value,
        "m" => value * 60,
        "h" => value * 3600,
        other => return Err(format!("unknown duration unit: {other}")),
    };
    Ok(std::time::Duration::from_secs(secs))
}

#[cfg(test)]
#[path = "config_paths_tests.rs"]
mod tests;
