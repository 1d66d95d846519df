// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The loop-commit message format: a subject line the rest of the system
//! parses back out of history, plus a human-readable body.

use chrono::{DateTime, Utc};
use regex::Regex;
use std::sync::LazyLock;

#[allow(clippy::expect_used)]
static LOOP_SUBJECT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^morty\[loop:(\d+),status:([a-z]+)\]").expect("constant regex pattern is valid"));

pub struct ChangeCounts {
    pub staged: usize,
    pub unstaged: usize,
    pub untracked: usize,
}

pub fn build_message(
    loop_number: u64,
    status: &str,
    timestamp: DateTime<Utc>,
    counts: &ChangeCounts,
    changed_files: &[String],
) -> String {
    let subject = format!("morty[loop:{loop_number},status:{status}]");
    let mut body = String::new();
    body.push_str(&subject);
    body.push_str("\n\n");
    body.push_str("Loop Metadata:\n");
    body.push_str(&format!("- Loop Number: {loop_number}\n"));
    body.push_str(&format!("- Status: {status}\n"));
    body.push_str(&format!("- Timestamp: {}\n", timestamp.to_rfc3339()));
    body.push('\n');
    body.push_str("Changes:\n");
    body.push_str(&format!("- Staged files: {}\n", counts.staged));
    body.push_str(&format!("- Unstaged files: {}\n", counts.unstaged));
    body.push_str(&format!("- Untracked files: {}\n", counts.untracked));
    body.push('\n');
    body.push_str("Files Changed:\n");
    for line in changed_files {
        body.push_str("  ");
        body.push_str(line);
        body.push('\n');
    }
    body
}

pub fn parse_loop_subject(subject: &str) -> Option<(u64, String)> {
    let caps = LOOP_SUBJECT_PATTERN.captures(subject)?;
    let number: u64 = caps.get(1)?.as_str().parse().ok()?;
    let status = caps.get(2)?.as_str().to_string();
    Some((number, status))
}

#[cfg(test)]
#[path = "commit_format_tests.rs"]
mod tests;
