// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `morty research` — generate a Plan from a research prompt.

use anyhow::{bail, Result};

#[derive(clap::Args)]
pub struct ResearchArgs {
    /// Research prompt describing the work to plan
    prompt: Option<String>,
}

pub fn handle(_args: ResearchArgs) -> Result<()> {
    bail!("morty research is not yet implemented")
}
