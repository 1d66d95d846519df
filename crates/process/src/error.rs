// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

/// Typed invocation failures, ordered the way the invoker classifies them:
/// the first applicable variant wins when multiple conditions race.
#[derive(Debug, Error)]
pub enum InvokeError {
    #[error("command not found: {0}")]
    CommandNotFound(String),
    #[error("context already cancelled before start")]
    CancelledBeforeStart,
    #[error("failed to start process: {0}")]
    StartFailed(#[source] std::io::Error),
    #[error("process timed out after {0:?}")]
    Timeout(std::time::Duration),
    #[error("cancelled during execution")]
    CancelledDuringExecution,
    #[error("process was killed by signal")]
    Signalled,
    #[error("process exited with non-zero status {0}")]
    NonZeroExit(i32),
    #[error("output handler failed: {0}")]
    OutputHandlerFailed(String),
}

impl InvokeError {
    /// Stable short code, independent of the Display message, for log
    /// correlation and `failure_reason` classification.
    pub fn code(&self) -> &'static str {
        match self {
            Self::CommandNotFound(_) => "COMMAND_NOT_FOUND",
            Self::StartFailed(_) => "START_FAILED",
            Self::Timeout(_) => "TIMEOUT",
            Self::CancelledBeforeStart => "CANCELLED_BEFORE_START",
            Self::CancelledDuringExecution => "CANCELLED_DURING_EXECUTION",
            Self::Signalled => "SIGNALLED",
            Self::NonZeroExit(_) => "NON_ZERO_EXIT",
            Self::OutputHandlerFailed(_) => "OUTPUT_HANDLER_FAILED",
        }
    }
}
