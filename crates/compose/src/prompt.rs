// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Deterministic prompt assembly: identical (plan node, state, templates)
//! always produce byte-identical output.

use morty_core::{Job, JobState, Module, Task};

/// Static boilerplate wrapped around every task prompt.
#[derive(Debug, Clone, Default)]
pub struct PromptTemplates {
    pub environment_instructions: String,
}

pub struct PromptComposer {
    templates: PromptTemplates,
}

impl PromptComposer {
    pub fn new(templates: PromptTemplates) -> Self {
        Self { templates }
    }

    pub fn compose(&self, module: &Module, job: &Job, job_state: &JobState, task_index: usize, task: &Task) -> String {
        let mut out = String::new();

        out.push_str(&format!("# Task: {} / {} (step {} of {})\n\n", module.name, job.id, task_index + 1, job.task.len()));
        out.push_str(&task.prompt);
        out.push_str("\n\n");

        if let Some(verifier) = &task.verifier {
            out.push_str("## Verification\n");
            out.push_str(verifier);
            out.push_str("\n\n");
        }

        out.push_str("## Progress\n");
        out.push_str(&format!(
            "- Tasks completed so far: {}/{}\n",
            job_state.tasks_completed, job_state.tasks_total
        ));
        if job_state.retry_count > 0 {
            out.push_str(&format!("- Retry attempt: {}\n", job_state.retry_count));
            if let Some(reason) = &job_state.failure_reason {
                out.push_str(&format!("- Previous failure: {reason}\n"));
            }
        }
        out.push('\n');

        if !self.templates.environment_instructions.is_empty() {
            out.push_str("## Environment\n");
            out.push_str(&self.templates.environment_instructions);
            out.push('\n');
        }

        out
    }
}

#[cfg(test)]
#[path = "prompt_tests.rs"]
mod tests;
