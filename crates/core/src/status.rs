// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Job/Module status state machine.

use serde::{Deserialize, Serialize};

/// Status of a job (and, derived, of a module).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Pending,
    Running,
    Completed,
    Failed,
    Blocked,
}

impl Status {
    /// True once a job cannot transition further on its own.
    pub fn is_terminal(self) -> bool {
        matches!(self, Status::Completed)
    }

    /// Validates a transition against the fixed rule table.
    ///
    /// ```text
    /// pending   -> running, blocked
    /// running   -> completed, failed
    /// failed    -> pending
    /// blocked   -> pending
    /// completed -> (terminal)
    /// ```
    /// Transitioning to the same status is always permitted as a no-op.
    pub fn can_transition_to(self, to: Status) -> bool {
        if self == to {
            return true;
        }
        matches!(
            (self, to),
            (Status::Pending, Status::Running)
                | (Status::Pending, Status::Blocked)
                | (Status::Running, Status::Completed)
                | (Status::Running, Status::Failed)
                | (Status::Failed, Status::Pending)
                | (Status::Blocked, Status::Pending)
        )
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Status::Pending => "pending",
            Status::Running => "running",
            Status::Completed => "completed",
            Status::Failed => "failed",
            Status::Blocked => "blocked",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
