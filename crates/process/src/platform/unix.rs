// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![allow(unsafe_code)]

//! POSIX process-group isolation: every spawned child becomes its own
//! session/group leader so a single signal reaches it and any descendants
//! it forks.

use std::io;
use tokio::process::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalKind {
    Term,
    Kill,
}

/// Makes the about-to-be-spawned child a session and process-group leader.
pub fn setup_process_group(cmd: &mut Command) {
    unsafe {
        cmd.pre_exec(|| {
            if libc::setsid() == -1 {
                return Err(io::Error::last_os_error());
            }
            Ok(())
        });
    }
}

/// Sends `signal` to the whole process group led by `pid`.
pub fn send_signal(pid: u32, signal: SignalKind) -> io::Result<()> {
    let sig = match signal {
        SignalKind::Term => libc::SIGTERM,
        SignalKind::Kill => libc::SIGKILL,
    };
    let group_pid = -(pid as i32);
    let rc = unsafe { libc::kill(group_pid, sig) };
    if rc == -1 {
        let err = io::Error::last_os_error();
        if err.raw_os_error() == Some(libc::ESRCH) {
            return Ok(()); // already gone
        }
        return Err(err);
    }
    Ok(())
}

/// Zero-signal liveness probe; `true` iff the process group still exists.
pub fn group_is_alive(pid: u32) -> bool {
    let group_pid = -(pid as i32);
    unsafe { libc::kill(group_pid, 0) == 0 }
}
