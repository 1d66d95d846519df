// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VcsError {
    #[error("not a git repository: {0}")]
    NotARepo(String),
    #[error("git operation failed: {0}")]
    Git(#[from] git2::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("commit failed: {0}")]
    CommitFailed(String),
    #[error("invalid commit reference: {0}")]
    InvalidCommit(String),
    #[error("reset failed: {0}")]
    ResetFailed(String),
}

impl VcsError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotARepo(_) => "NOT_A_REPO",
            Self::Git(_) | Self::Io(_) => "COMMIT_FAILED",
            Self::CommitFailed(_) => "COMMIT_FAILED",
            Self::InvalidCommit(_) => "INVALID_COMMIT",
            Self::ResetFailed(_) => "RESET_FAILED",
        }
    }
}
