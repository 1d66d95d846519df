// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The static Plan tree: Module -> Job -> Task.
//!
//! A Plan is immutable input to the engine; it is produced by the plan
//! loader and never mutated during a run.

use crate::id::{JobId, ModuleId};
use serde::{Deserialize, Serialize};

/// One task within a job: a single prompt sent to the external CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verifier: Option<String>,
}

/// A unit of work: a sequence of tasks plus optional preconditions on other
/// jobs that must already be `completed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    #[serde(default)]
    pub preconditions: Vec<(ModuleId, JobId)>,
    pub task: Vec<Task>,
}

/// A named group of jobs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    pub id: ModuleId,
    pub name: String,
    pub job: Vec<Job>,
}

/// The whole plan: an ordered sequence of modules.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Plan {
    #[serde(default, rename = "module")]
    pub modules: Vec<Module>,
}

impl Plan {
    /// Iterates `(module, job)` pairs in Plan order.
    pub fn jobs(&self) -> impl Iterator<Item = (&Module, &Job)> {
        self.modules.iter().flat_map(|m| m.job.iter().map(move |j| (m, j)))
    }

    pub fn find_module(&self, id: &ModuleId) -> Option<&Module> {
        self.modules.iter().find(|m| &m.id == id)
    }

    pub fn find_job(&self, module: &ModuleId, job: &JobId) -> Option<(&Module, &Job)> {
        let m = self.find_module(module)?;
        let j = m.job.iter().find(|j| &j.id == job)?;
        Some((m, j))
    }
}

#[cfg(test)]
#[path = "plan_tests.rs"]
mod tests;
