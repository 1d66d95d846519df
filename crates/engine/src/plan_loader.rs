// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Loads `.morty/plan.toml` into a `morty_core::Plan`, validating identifier
//! charset, uniqueness, and precondition references before the engine ever
//! sees it.

use crate::error::PlanError;
use morty_core::Plan;
use std::collections::HashSet;
use std::path::Path;

fn is_valid_identifier(id: &str) -> bool {
    !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
}

pub fn load_plan(path: &Path) -> Result<Plan, PlanError> {
    let text = std::fs::read_to_string(path).map_err(|source| PlanError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let plan: Plan = toml::from_str(&text).map_err(|source| PlanError::Parse {
        path: path.display().to_string(),
        source,
    })?;
    validate_plan(&plan)?;
    Ok(plan)
}

fn validate_plan(plan: &Plan) -> Result<(), PlanError> {
    let mut seen_modules = HashSet::new();
    let mut known_jobs = HashSet::new();

    for module in &plan.modules {
        if !is_valid_identifier(module.id.as_str()) {
            return Err(PlanError::InvalidIdentifier {
                id: module.id.as_str().to_string(),
            });
        }
        if !seen_modules.insert(module.id.as_str().to_string()) {
            return Err(PlanError::DuplicateModule(module.id.as_str().to_string()));
        }

        let mut seen_jobs = HashSet::new();
        for job in &module.job {
            if !is_valid_identifier(job.id.as_str()) {
                return Err(PlanError::InvalidIdentifier {
                    id: job.id.as_str().to_string(),
                });
            }
            if !seen_jobs.insert(job.id.as_str().to_string()) {
                return Err(PlanError::DuplicateJob {
                    module: module.id.as_str().to_string(),
                    job: job.id.as_str().to_string(),
                });
            }
            if job.task.is_empty() {
                return Err(PlanError::EmptyJob {
                    module: module.id.as_str().to_string(),
                    job: job.id.as_str().to_string(),
                });
            }
            known_jobs.insert((module.id.as_str().to_string(), job.id.as_str().to_string()));
        }
    }

    for module in &plan.modules {
        for job in &module.job {
            for (pmodule, pjob) in &job.preconditions {
                let key = (pmodule.as_str().to_string(), pjob.as_str().to_string());
                if !known_jobs.contains(&key) {
                    return Err(PlanError::UnknownPrecondition {
                        module: module.id.as_str().to_string(),
                        job: job.id.as_str().to_string(),
                        pmodule: pmodule.as_str().to_string(),
                        pjob: pjob.as_str().to_string(),
                    });
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "plan_loader_tests.rs"]
mod tests;
