use crate::prelude::*;

#[test]
fn plan_is_not_yet_implemented() {
    let project = Project::empty();
    project.morty().args(&["plan"]).fails().stderr_has("not yet implemented");
}

#[test]
fn research_is_not_yet_implemented() {
    let project = Project::empty();
    project.morty().args(&["research"]).fails().stderr_has("not yet implemented");
}
