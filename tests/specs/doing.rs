use crate::prelude::*;

#[test]
fn doing_runs_a_single_job_to_completion() {
    let project = Project::empty();
    project.plan_running("true");
    project
        .morty()
        .args(&["doing"])
        .passes()
        .stdout_has("m1/j1")
        .stdout_has("completed")
        .stdout_has("done:");
}

#[test]
fn doing_reports_exhausted_retries_as_failure() {
    let project = Project::empty();
    project.plan_running("false");
    project
        .morty()
        .args(&["doing", "--max-iterations", "5"])
        .fails()
        .stdout_has("exhausted its retries");
}

#[test]
fn rerunning_doing_after_completion_is_a_no_op() {
    let project = Project::empty();
    project.plan_running("true");

    project.morty().args(&["doing"]).passes().stdout_has("done:");
    project.morty().args(&["doing"]).passes().stdout_has("done: all jobs completed (0 loops)");
}
