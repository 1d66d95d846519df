// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

const ALL: [Status; 5] = [
    Status::Pending,
    Status::Running,
    Status::Completed,
    Status::Failed,
    Status::Blocked,
];

#[test]
fn same_state_transition_is_always_a_no_op() {
    for s in ALL {
        assert!(s.can_transition_to(s));
    }
}

#[test]
fn legal_transitions_are_permitted() {
    assert!(Status::Pending.can_transition_to(Status::Running));
    assert!(Status::Pending.can_transition_to(Status::Blocked));
    assert!(Status::Running.can_transition_to(Status::Completed));
    assert!(Status::Running.can_transition_to(Status::Failed));
    assert!(Status::Failed.can_transition_to(Status::Pending));
    assert!(Status::Blocked.can_transition_to(Status::Pending));
}

#[test]
fn illegal_transitions_are_rejected() {
    assert!(!Status::Pending.can_transition_to(Status::Completed));
    assert!(!Status::Completed.can_transition_to(Status::Running));
    assert!(!Status::Completed.can_transition_to(Status::Pending));
    assert!(!Status::Failed.can_transition_to(Status::Completed));
    assert!(!Status::Blocked.can_transition_to(Status::Completed));
    assert!(!Status::Running.can_transition_to(Status::Pending));
    assert!(!Status::Running.can_transition_to(Status::Blocked));
}

#[test]
fn only_completed_is_terminal() {
    assert!(Status::Completed.is_terminal());
    assert!(!Status::Pending.is_terminal());
    assert!(!Status::Running.is_terminal());
    assert!(!Status::Failed.is_terminal());
    assert!(!Status::Blocked.is_terminal());
}

#[test]
fn serializes_to_snake_case() {
    let json = serde_json::to_string(&Status::Blocked).expect("serialize");
    assert_eq!(json, "\"blocked\"");
}

#[test]
fn display_matches_serde_form() {
    for s in ALL {
        let json = serde_json::to_string(&s).expect("serialize");
        assert_eq!(json, format!("\"{}\"", s));
    }
}
