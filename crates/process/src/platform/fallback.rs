// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Non-Unix fallback: no process-group primitive exists, so isolation and
//! signaling degrade to per-process operations. `tokio::process::Child`
//! already terminates the direct child on `kill`; descendants spawned by
//! the child are not reachable from here.

use std::io;
use tokio::process::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalKind {
    Term,
    Kill,
}

pub fn setup_process_group(_cmd: &mut Command) {
    // No process-group concept; the child is killed individually by the
    // caller via `tokio::process::Child::start_kill`.
}

pub fn send_signal(_pid: u32, _signal: SignalKind) -> io::Result<()> {
    Ok(())
}

pub fn group_is_alive(_pid: u32) -> bool {
    false
}
