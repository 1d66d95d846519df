use crate::prelude::*;

#[test]
fn reset_requires_loop_or_commit() {
    let project = Project::empty();
    project.morty().args(&["reset"]).fails();
}

#[test]
fn reset_rejects_both_loop_and_commit() {
    let project = Project::empty();
    project.morty().args(&["reset", "--loop", "1", "--commit", "abc"]).fails();
}

#[test]
fn reset_to_loop_restores_the_commit_for_that_loop() {
    let project = Project::empty();
    project.plan_running("true");
    project.morty().args(&["doing"]).passes();

    project.morty().args(&["reset", "--loop", "1"]).passes();
}
