// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `morty plan` — validate and display a Plan document.

use anyhow::{bail, Result};

#[derive(clap::Args)]
pub struct PlanArgs {
    /// Path to the Plan document
    #[arg(long)]
    path: Option<std::path::PathBuf>,
}

pub fn handle(_args: PlanArgs) -> Result<()> {
    bail!("morty plan is not yet implemented")
}
