// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Persistent hierarchical execution state: session -> modules -> jobs.
//!
//! This module owns the pure data model and the transition rules. Durable
//! persistence (atomic file writes) lives in `morty-storage`, which wraps
//! `State` with a writer lock and a load/save cycle.

use crate::clock::Clock;
use crate::id::{JobId, ModuleId};
use crate::plan::Plan;
use crate::status::Status;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Schema version written to every state document. Bumped on breaking
/// changes to the on-disk shape.
pub const STATE_SCHEMA_VERSION: &str = "2.0";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StateError {
    #[error("invalid transition from {from} to {to}")]
    InvalidTransition { from: Status, to: Status },
    #[error("module not found: {0}")]
    ModuleNotFound(String),
    #[error("job not found: {0}/{1}")]
    JobNotFound(String, String),
    #[error("task index {index} out of bounds (job has {total} tasks)")]
    TaskIndexOutOfBounds { index: usize, total: usize },
    #[error("state schema mismatch: expected {expected}, found {found}")]
    SchemaMismatch { expected: String, found: String },
}

impl StateError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::SchemaMismatch { .. } => "SCHEMA_MISMATCH",
            Self::ModuleNotFound(_) => "MODULE_NOT_FOUND",
            Self::JobNotFound(..) => "JOB_NOT_FOUND",
            Self::TaskIndexOutOfBounds { .. } => "TASK_INDEX_OUT_OF_BOUNDS",
        }
    }
}

/// Last-active focus of the session, surfaced for `morty stat`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentFocus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<ModuleId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job: Option<JobId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionInfo {
    pub start_time: DateTime<Utc>,
    pub last_update: DateTime<Utc>,
    pub total_loops: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobState {
    pub status: Status,
    #[serde(default)]
    pub retry_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
    pub tasks_total: usize,
    #[serde(default)]
    pub tasks_completed: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
}

impl JobState {
    fn pending(tasks_total: usize) -> Self {
        Self {
            status: Status::Pending,
            retry_count: 0,
            started_at: None,
            finished_at: None,
            tasks_total,
            tasks_completed: 0,
            failure_reason: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleState {
    pub status: Status,
    pub jobs: BTreeMap<String, JobState>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total_modules: usize,
    pub completed_modules: usize,
    pub running_modules: usize,
    pub pending_modules: usize,
    pub blocked_modules: usize,
    pub total_jobs: usize,
    pub completed_jobs: usize,
    pub running_jobs: usize,
    pub failed_jobs: usize,
    pub blocked_jobs: usize,
    pub progress_percentage: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    pub version: String,
    /// Coarse session-level summary of `modules`, for a reader who only wants
    /// "is this session done" without walking the job tree. Recomputed on
    /// every mutation; never written to directly.
    #[serde(default = "default_session_state")]
    pub state: String,
    pub current: CurrentFocus,
    pub session: SessionInfo,
    pub modules: IndexMap<String, ModuleState>,
    pub summary: Summary,
}

impl State {
    /// A fresh, empty state document.
    pub fn new(clock: &impl Clock) -> Self {
        let now = clock.now_utc();
        Self {
            version: STATE_SCHEMA_VERSION.to_string(),
            state: "initialized".to_string(),
            current: CurrentFocus::default(),
            session: SessionInfo {
                start_time: now,
                last_update: now,
                total_loops: 0,
            },
            modules: IndexMap::new(),
            summary: Summary::default(),
        }
    }

    pub fn check_schema(&self) -> Result<(), StateError> {
        if self.version != STATE_SCHEMA_VERSION {
            return Err(StateError::SchemaMismatch {
                expected: STATE_SCHEMA_VERSION.to_string(),
                found: self.version.clone(),
            });
        }
        Ok(())
    }

    /// Ensures every `(module, job)` in `plan` exists with `pending` status.
    /// Never downgrades an existing non-pending job.
    pub fn init_from_plan(&mut self, plan: &Plan) {
        for module in &plan.modules {
            let module_state = self
                .modules
                .entry(module.id.as_str().to_string())
                .or_insert_with(|| ModuleState {
                    status: Status::Pending,
                    jobs: BTreeMap::new(),
                });
            for job in &module.job {
                module_state
                    .jobs
                    .entry(job.id.as_str().to_string())
                    .or_insert_with(|| JobState::pending(job.task.len()));
            }
            module_state.status = derive_module_status(module_state);
        }
        self.recompute_summary();
    }

    pub fn get_module(&self, module: &ModuleId) -> Result<&ModuleState, StateError> {
        self.modules
            .get(module.as_str())
            .ok_or_else(|| StateError::ModuleNotFound(module.as_str().to_string()))
    }

    pub fn get_job(&self, module: &ModuleId, job: &JobId) -> Result<&JobState, StateError> {
        let m = self.get_module(module)?;
        m.jobs
            .get(job.as_str())
            .ok_or_else(|| StateError::JobNotFound(module.as_str().to_string(), job.as_str().to_string()))
    }

    fn get_job_mut(&mut self, module: &ModuleId, job: &JobId) -> Result<&mut JobState, StateError> {
        let m = self
            .modules
            .get_mut(module.as_str())
            .ok_or_else(|| StateError::ModuleNotFound(module.as_str().to_string()))?;
        m.jobs
            .get_mut(job.as_str())
            .ok_or_else(|| StateError::JobNotFound(module.as_str().to_string(), job.as_str().to_string()))
    }

    pub fn transition_job(
        &mut self,
        module: &ModuleId,
        job: &JobId,
        to: Status,
        clock: &impl Clock,
    ) -> Result<(), StateError> {
        let now = clock.now_utc();
        let js = self.get_job_mut(module, job)?;
        if !js.status.can_transition_to(to) {
            return Err(StateError::InvalidTransition { from: js.status, to });
        }
        if js.status != to {
            if to == Status::Running && js.started_at.is_none() {
                js.started_at = Some(now);
            }
            if matches!(to, Status::Running | Status::Pending) {
                // Retrying a failed job clears finished_at but keeps started_at,
                // so elapsed time spans the whole retry sequence.
                js.finished_at = None;
            }
            if to.is_terminal() || to == Status::Failed {
                js.finished_at = Some(now);
            }
            js.status = to;
        }
        self.touch_module(module);
        self.current = CurrentFocus {
            module: Some(module.clone()),
            job: Some(job.clone()),
            status: Some(to),
        };
        self.session.last_update = now;
        self.recompute_summary();
        Ok(())
    }

    pub fn increment_retry(&mut self, module: &ModuleId, job: &JobId) -> Result<(), StateError> {
        let js = self.get_job_mut(module, job)?;
        js.retry_count += 1;
        Ok(())
    }

    pub fn mark_task_completed(
        &mut self,
        module: &ModuleId,
        job: &JobId,
        task_index: usize,
    ) -> Result<(), StateError> {
        let js = self.get_job_mut(module, job)?;
        if task_index >= js.tasks_total {
            return Err(StateError::TaskIndexOutOfBounds {
                index: task_index,
                total: js.tasks_total,
            });
        }
        js.tasks_completed = js.tasks_completed.max(task_index + 1);
        Ok(())
    }

    pub fn set_failure_reason(
        &mut self,
        module: &ModuleId,
        job: &JobId,
        reason: impl Into<String>,
    ) -> Result<(), StateError> {
        let js = self.get_job_mut(module, job)?;
        js.failure_reason = Some(reason.into());
        Ok(())
    }

    /// Returns the first runnable `(module, job)` in plan order, marking any
    /// job whose preconditions can never be satisfied as `blocked`.
    pub fn select_next(&mut self, plan: &Plan, clock: &impl Clock) -> Option<(ModuleId, JobId)> {
        let candidates: Vec<(ModuleId, JobId, Vec<(ModuleId, JobId)>)> = plan
            .jobs()
            .map(|(m, j)| (m.id.clone(), j.id.clone(), j.preconditions.clone()))
            .collect();

        for (module, job, preconditions) in candidates {
            let status = match self.get_job(&module, &job) {
                Ok(js) => js.status,
                Err(_) => continue,
            };
            if status != Status::Pending {
                continue;
            }
            let mut blocked = false;
            let mut ready = true;
            for (pm, pj) in &preconditions {
                match self.get_job(pm, pj) {
                    Ok(pjs) if pjs.status == Status::Completed => {}
                    Ok(pjs) if matches!(pjs.status, Status::Failed | Status::Blocked) => {
                        blocked = true;
                        ready = false;
                    }
                    _ => ready = false,
                }
            }
            if blocked {
                let _ = self.transition_job(&module, &job, Status::Blocked, clock);
                continue;
            }
            if ready {
                return Some((module, job));
            }
        }
        None
    }

    fn touch_module(&mut self, module: &ModuleId) {
        if let Some(ms) = self.modules.get_mut(module.as_str()) {
            ms.status = derive_module_status(ms);
        }
    }

    fn recompute_summary(&mut self) {
        let mut summary = Summary::default();
        summary.total_modules = self.modules.len();
        for ms in self.modules.values() {
            match ms.status {
                Status::Completed => summary.completed_modules += 1,
                Status::Running => summary.running_modules += 1,
                Status::Blocked => summary.blocked_modules += 1,
                Status::Pending | Status::Failed => summary.pending_modules += 1,
            }
            summary.total_jobs += ms.jobs.len();
            for js in ms.jobs.values() {
                match js.status {
                    Status::Completed => summary.completed_jobs += 1,
                    Status::Running => summary.running_jobs += 1,
                    Status::Failed => summary.failed_jobs += 1,
                    Status::Blocked => summary.blocked_jobs += 1,
                    Status::Pending => {}
                }
            }
        }
        summary.progress_percentage = if summary.total_jobs == 0 {
            0
        } else {
            (summary.completed_jobs * 100 / summary.total_jobs) as u32
        };
        self.state = derive_session_state(&summary).to_string();
        self.summary = summary;
    }
}

/// Coarse session state derived from the job summary: `initialized` before
/// any job exists, `completed` once every job is, `failed` once nothing
/// pending or running remains but not everything completed, `running`
/// otherwise.
fn default_session_state() -> String {
    "initialized".to_string()
}

fn derive_session_state(summary: &Summary) -> &'static str {
    if summary.total_jobs == 0 {
        "initialized"
    } else if summary.completed_jobs == summary.total_jobs {
        "completed"
    } else if summary.running_jobs == 0 && summary.pending_modules == 0 {
        "failed"
    } else {
        "running"
    }
}

fn derive_module_status(ms: &ModuleState) -> Status {
    if ms.jobs.is_empty() {
        return Status::Pending;
    }
    if ms.jobs.values().all(|j| j.status == Status::Completed) {
        return Status::Completed;
    }
    if ms.jobs.values().any(|j| j.status == Status::Running) {
        return Status::Running;
    }
    if ms.jobs.values().any(|j| j.status == Status::Failed) {
        return Status::Failed;
    }
    if ms.jobs.values().any(|j| j.status == Status::Blocked) {
        return Status::Blocked;
    }
    Status::Pending
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
