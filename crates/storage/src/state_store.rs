// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Durable wrapper around `morty_core::State`: a single writer lock guards
//! every mutation, and each mutation is persisted before it is considered
//! to have taken effect. If persistence fails, the in-memory state is
//! rolled back to its pre-mutation snapshot so memory and disk never
//! diverge.

use crate::atomic::write_atomic;
use crate::error::StorageError;
use morty_core::{Clock, JobId, ModuleId, Plan, State, Status};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct StateStore {
    path: PathBuf,
    state: Mutex<State>,
}

impl StateStore {
    /// Loads `path` if it exists, otherwise starts from a fresh empty state.
    pub fn load(path: impl Into<PathBuf>, clock: &impl Clock) -> Result<Self, StorageError> {
        let path = path.into();
        let state = if path.exists() {
            let bytes = std::fs::read(&path)?;
            let state: State = serde_json::from_slice(&bytes)?;
            state.check_schema()?;
            state
        } else {
            State::new(clock)
        };
        Ok(Self {
            path,
            state: Mutex::new(state),
        })
    }

    pub fn save(&self) -> Result<(), StorageError> {
        let guard = self.state.lock();
        let bytes = serde_json::to_vec_pretty(&*guard)?;
        write_atomic(&self.path, &bytes)?;
        Ok(())
    }

    pub fn snapshot(&self) -> State {
        self.state.lock().clone()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Applies `mutate` under the write lock, persists the result, and
    /// restores the pre-mutation snapshot if persistence fails.
    fn mutate<T>(
        &self,
        mutate: impl FnOnce(&mut State) -> Result<T, StorageError>,
    ) -> Result<T, StorageError> {
        let mut guard = self.state.lock();
        let before = guard.clone();
        let result = mutate(&mut guard)?;
        let bytes = match serde_json::to_vec_pretty(&*guard) {
            Ok(b) => b,
            Err(e) => {
                *guard = before;
                return Err(e.into());
            }
        };
        if let Err(e) = write_atomic(&self.path, &bytes) {
            *guard = before;
            return Err(e.into());
        }
        Ok(result)
    }

    pub fn init_from_plan(&self, plan: &Plan) -> Result<(), StorageError> {
        self.mutate(|state| {
            state.init_from_plan(plan);
            Ok(())
        })
    }

    pub fn get_job(&self, module: &ModuleId, job: &JobId) -> Result<morty_core::JobState, StorageError> {
        let guard = self.state.lock();
        Ok(guard.get_job(module, job)?.clone())
    }

    pub fn get_module(&self, module: &ModuleId) -> Result<morty_core::ModuleState, StorageError> {
        let guard = self.state.lock();
        Ok(guard.get_module(module)?.clone())
    }

    pub fn summary(&self) -> morty_core::Summary {
        self.state.lock().summary.clone()
    }

    pub fn transition_job(
        &self,
        module: &ModuleId,
        job: &JobId,
        to: Status,
        clock: &impl Clock,
    ) -> Result<(), StorageError> {
        self.mutate(|state| Ok(state.transition_job(module, job, to, clock)?))
    }

    pub fn increment_retry(&self, module: &ModuleId, job: &JobId) -> Result<(), StorageError> {
        self.mutate(|state| Ok(state.increment_retry(module, job)?))
    }

    pub fn mark_task_completed(
        &self,
        module: &ModuleId,
        job: &JobId,
        task_index: usize,
    ) -> Result<(), StorageError> {
        self.mutate(|state| Ok(state.mark_task_completed(module, job, task_index)?))
    }

    pub fn set_failure_reason(
        &self,
        module: &ModuleId,
        job: &JobId,
        reason: impl Into<String>,
    ) -> Result<(), StorageError> {
        let reason = reason.into();
        self.mutate(|state| Ok(state.set_failure_reason(module, job, reason)?))
    }

    pub fn select_next(&self, plan: &Plan, clock: &impl Clock) -> Result<Option<(ModuleId, JobId)>, StorageError> {
        self.mutate(|state| Ok(state.select_next(plan, clock)))
    }
}

#[cfg(test)]
#[path = "state_store_tests.rs"]
mod tests;
