// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use morty_core::{JobId, ModuleId};

fn job_and_module() -> (Module, Job) {
    let module = Module {
        id: ModuleId::new("m1"),
        name: "Module One".to_string(),
        job: vec![],
    };
    let job = Job {
        id: JobId::new("j1"),
        preconditions: vec![],
        task: vec![
            Task {
                prompt: "write the function".to_string(),
                verifier: Some("unit tests pass".to_string()),
            },
            Task {
                prompt: "write the docs".to_string(),
                verifier: None,
            },
        ],
    };
    (module, job)
}

fn job_state() -> JobState {
    JobState {
        status: morty_core::Status::Running,
        retry_count: 0,
        started_at: None,
        finished_at: None,
        tasks_total: 2,
        tasks_completed: 0,
        failure_reason: None,
    }
}

#[test]
fn compose_is_deterministic_for_identical_inputs() {
    let (module, job) = job_and_module();
    let js = job_state();
    let composer = PromptComposer::new(PromptTemplates::default());
    let a = composer.compose(&module, &job, &js, 0, &job.task[0]);
    let b = composer.compose(&module, &job, &js, 0, &job.task[0]);
    assert_eq!(a, b);
}

#[test]
fn compose_includes_task_prompt_and_verifier() {
    let (module, job) = job_and_module();
    let js = job_state();
    let composer = PromptComposer::new(PromptTemplates::default());
    let prompt = composer.compose(&module, &job, &js, 0, &job.task[0]);
    assert!(prompt.contains("write the function"));
    assert!(prompt.contains("unit tests pass"));
}

#[test]
fn compose_surfaces_retry_context() {
    let (module, job) = job_and_module();
    let mut js = job_state();
    js.retry_count = 2;
    js.failure_reason = Some("timed out".to_string());
    let composer = PromptComposer::new(PromptTemplates::default());
    let prompt = composer.compose(&module, &job, &js, 0, &job.task[0]);
    assert!(prompt.contains("Retry attempt: 2"));
    assert!(prompt.contains("timed out"));
}

#[test]
fn compose_omits_verifier_section_when_absent() {
    let (module, job) = job_and_module();
    let js = job_state();
    let composer = PromptComposer::new(PromptTemplates::default());
    let prompt = composer.compose(&module, &job, &js, 1, &job.task[1]);
    assert!(!prompt.contains("## Verification"));
}
