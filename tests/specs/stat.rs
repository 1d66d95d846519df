use crate::prelude::*;

#[test]
fn stat_on_fresh_project_shows_zero_counts() {
    let project = Project::empty();
    project
        .morty()
        .args(&["stat"])
        .passes()
        .stdout_has("session: initialized")
        .stdout_has("modules: 0/0 completed")
        .stdout_has("jobs:    0/0 completed");
}

#[test]
fn stat_reflects_completed_job_after_doing() {
    let project = Project::empty();
    project.plan_running("true");
    project.morty().args(&["doing"]).passes();
    project
        .morty()
        .args(&["stat"])
        .passes()
        .stdout_has("session: completed")
        .stdout_has("modules: 1/1 completed")
        .stdout_has("completed")
        .stdout_has("m1")
        .stdout_has("j1");
}
