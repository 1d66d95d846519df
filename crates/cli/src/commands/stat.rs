// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `morty stat` — prints the summary counters and per-module/per-job status.

use crate::color;
use crate::config_paths;
use crate::table::{Column, Table};
use anyhow::{Context, Result};
use morty_core::SystemClock;
use morty_storage::StateStore;
use std::path::PathBuf;

#[derive(clap::Args)]
pub struct StatArgs {
    /// Path to the persistent state file
    #[arg(long)]
    state: Option<PathBuf>,
}

pub fn handle(args: StatArgs) -> Result<()> {
    let state_path = args.state.unwrap_or_else(config_paths::default_state_path);
    let clock = SystemClock;
    let store = StateStore::load(&state_path, &clock).with_context(|| format!("loading state from {}", state_path.display()))?;

    let snapshot = store.snapshot();
    println!("session: {}", color::status(&snapshot.state));

    let summary = store.summary();
    println!(
        "modules: {}/{} completed, {} running, {} pending, {} blocked",
        summary.completed_modules, summary.total_modules, summary.running_modules, summary.pending_modules, summary.blocked_modules
    );
    println!(
        "jobs:    {}/{} completed, {} running, {} failed, {} blocked",
        summary.completed_jobs, summary.total_jobs, summary.running_jobs, summary.failed_jobs, summary.blocked_jobs
    );
    println!();

    let mut table = Table::new(vec![
        Column::left("MODULE"),
        Column::left("JOB"),
        Column::status("STATUS"),
        Column::right("TASKS"),
        Column::right("RETRIES"),
        Column::muted("FAILURE"),
    ]);

    for (module_name, module_state) in &snapshot.modules {
        for (job_name, job_state) in &module_state.jobs {
            table.row(vec![
                module_name.clone(),
                job_name.clone(),
                job_state.status.to_string(),
                format!("{}/{}", job_state.tasks_completed, job_state.tasks_total),
                job_state.retry_count.to_string(),
                job_state.failure_reason.clone().unwrap_or_default(),
            ]);
        }
    }

    table.render(&mut std::io::stdout());
    Ok(())
}
