// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `morty reset` — rewinds the repository to a past loop or commit.

use anyhow::{bail, Context, Result};
use morty_vcs::VersionIntegration;
use std::path::PathBuf;

#[derive(clap::Args)]
pub struct ResetArgs {
    /// Reset to the commit created at the end of this loop number
    #[arg(long, value_name = "N", conflicts_with = "commit")]
    pub(crate) r#loop: Option<u64>,
    /// Reset to this exact commit hash
    #[arg(long, value_name = "HASH", conflicts_with = "loop")]
    pub(crate) commit: Option<String>,
    /// Path to the git repository
    #[arg(long, default_value = ".")]
    repo: PathBuf,
}

pub fn handle(args: ResetArgs) -> Result<()> {
    let vcs = VersionIntegration::ensure_repo(&args.repo, ".morty/logs").context("opening git repository")?;

    match (args.r#loop, args.commit) {
        (Some(n), None) => {
            vcs.reset_to_loop(n).with_context(|| format!("resetting to loop {n}"))?;
            println!("reset to loop {n}");
        }
        (None, Some(hash)) => {
            vcs.reset_to_commit(&hash).with_context(|| format!("resetting to commit {hash}"))?;
            println!("reset to commit {hash}");
        }
        _ => bail!("exactly one of --loop or --commit is required"),
    }

    Ok(())
}
