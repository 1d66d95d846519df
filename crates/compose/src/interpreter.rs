// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Parses the external CLI's stdout into a success/failure verdict plus
//! any best-effort structured extraction. Failure here is only ever a
//! signal, never a hard error: a result that cannot be parsed is simply
//! treated as having no structured data.

use regex::Regex;
use std::sync::LazyLock;

const EXIT_SIGNAL_MARKER: &str = "EXIT_SIGNAL: true";

#[allow(clippy::expect_used)]
static JSON_BLOCK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```json\s*\n(.*?)\n```").expect("constant regex pattern is valid"));

#[derive(Debug, Clone)]
pub struct Verdict {
    pub success: bool,
    pub exit_signal: bool,
    pub structured: Option<serde_json::Value>,
}

/// `exit_code`/`timed_out`/`interrupted` come from the process invocation's
/// Result; `stdout` is scanned for the exit-signal marker and an optional
/// fenced JSON block.
pub fn interpret(stdout: &str, exit_code: i32, timed_out: bool, interrupted: bool) -> Verdict {
    let success = exit_code == 0 && !timed_out && !interrupted;
    let exit_signal = stdout.contains(EXIT_SIGNAL_MARKER);
    let structured = JSON_BLOCK_PATTERN
        .captures(stdout)
        .and_then(|caps| caps.get(1))
        .and_then(|m| serde_json::from_str(m.as_str()).ok());

    Verdict {
        success,
        exit_signal,
        structured,
    }
}

#[cfg(test)]
#[path = "interpreter_tests.rs"]
mod tests;
