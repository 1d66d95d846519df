// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn sample_plan() -> Plan {
    Plan {
        modules: vec![Module {
            id: ModuleId::new("m1"),
            name: "Module One".to_string(),
            job: vec![
                Job {
                    id: JobId::new("j1"),
                    preconditions: vec![],
                    task: vec![Task {
                        prompt: "do the thing".to_string(),
                        verifier: Some("tests pass".to_string()),
                    }],
                },
                Job {
                    id: JobId::new("j2"),
                    preconditions: vec![(ModuleId::new("m1"), JobId::new("j1"))],
                    task: vec![Task {
                        prompt: "do the next thing".to_string(),
                        verifier: None,
                    }],
                },
            ],
        }],
    }
}

#[test]
fn jobs_iterates_in_plan_order() {
    let plan = sample_plan();
    let ids: Vec<_> = plan.jobs().map(|(_, j)| j.id.as_str()).collect();
    assert_eq!(ids, vec!["j1", "j2"]);
}

#[test]
fn find_job_locates_by_ids() {
    let plan = sample_plan();
    let (m, j) = plan
        .find_job(&ModuleId::new("m1"), &JobId::new("j2"))
        .expect("job should be found");
    assert_eq!(m.name, "Module One");
    assert_eq!(j.preconditions.len(), 1);
}

#[test]
fn find_job_returns_none_for_unknown_ids() {
    let plan = sample_plan();
    assert!(plan.find_job(&ModuleId::new("nope"), &JobId::new("j1")).is_none());
    assert!(plan.find_job(&ModuleId::new("m1"), &JobId::new("nope")).is_none());
}

#[test]
fn empty_plan_has_no_jobs() {
    let plan = Plan::default();
    assert_eq!(plan.jobs().count(), 0);
}
