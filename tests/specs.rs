//! Behavioral specifications for the morty CLI.
//!
//! These tests are black-box: they invoke the CLI binary and verify
//! stdout, stderr, and exit codes.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

#[path = "specs/prelude.rs"]
mod prelude;

#[path = "specs/doing.rs"]
mod doing;
#[path = "specs/plan_research.rs"]
mod plan_research;
#[path = "specs/reset.rs"]
mod reset;
#[path = "specs/stat.rs"]
mod stat;
