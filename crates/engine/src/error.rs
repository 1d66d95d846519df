// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use morty_core::StateError;
use morty_process::InvokeError;
use morty_storage::StorageError;
use morty_vcs::VcsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("failed to read plan file {path}: {source}")]
    Read { path: String, source: std::io::Error },
    #[error("failed to parse plan file {path}: {source}")]
    Parse { path: String, source: toml::de::Error },
    #[error("invalid identifier {id:?}: must match [A-Za-z0-9_.-]+")]
    InvalidIdentifier { id: String },
    #[error("duplicate module id: {0}")]
    DuplicateModule(String),
    #[error("duplicate job id {job} in module {module}")]
    DuplicateJob { module: String, job: String },
    #[error("job {module}/{job} has no tasks")]
    EmptyJob { module: String, job: String },
    #[error("job {module}/{job} declares a precondition on unknown job {pmodule}/{pjob}")]
    UnknownPrecondition {
        module: String,
        job: String,
        pmodule: String,
        pjob: String,
    },
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("job {module}/{job} is not defined in the plan")]
    JobNotInPlan { module: String, job: String },
    #[error("job {module}/{job} exceeded max retries ({max_retries})")]
    MaxRetriesExceeded { module: String, job: String, max_retries: u32 },
    #[error("failed to build prompt for {module}/{job} task {task_index}: {reason}")]
    PromptBuildFailed {
        module: String,
        job: String,
        task_index: usize,
        reason: String,
    },
    #[error("failed to parse result for {module}/{job} task {task_index}: {reason}")]
    ResultParseFailed {
        module: String,
        job: String,
        task_index: usize,
        reason: String,
    },
    #[error(transparent)]
    State(#[from] StateError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Invoke(#[from] InvokeError),
    #[error(transparent)]
    Vcs(#[from] VcsError),
}

impl RunnerError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::JobNotInPlan { .. } => "PRECONDITION_UNMET",
            Self::MaxRetriesExceeded { .. } => "MAX_RETRIES_EXCEEDED",
            Self::PromptBuildFailed { .. } => "PROMPT_BUILD_FAILED",
            Self::ResultParseFailed { .. } => "RESULT_PARSE_FAILED",
            Self::State(e) => e.code(),
            Self::Storage(e) => e.code(),
            Self::Invoke(e) => e.code(),
            Self::Vcs(e) => e.code(),
        }
    }
}
