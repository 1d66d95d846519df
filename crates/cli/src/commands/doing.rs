// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `morty doing` — runs the Engine to terminal status.

use crate::color;
use crate::config_paths::{self, parse_duration};
use anyhow::{Context, Result};
use morty_compose::{PromptComposer, PromptTemplates};
use morty_core::SystemClock;
use morty_engine::{Config, Engine, JobOutcome, JobRunnerConfig, StopReason};
use morty_storage::{ExecutionLog, RotationPolicy, StateStore};
use morty_vcs::VersionIntegration;
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

#[derive(clap::Args)]
pub struct DoingArgs {
    /// Path to the Plan document
    #[arg(long)]
    pub(crate) plan: Option<PathBuf>,
    /// Path to the persistent state file
    #[arg(long)]
    pub(crate) state: Option<PathBuf>,
    /// Override the configured iteration cap
    #[arg(long)]
    pub(crate) max_iterations: Option<u32>,
    /// Override the per-task timeout (e.g. `600`, `10m`, `1h`)
    #[arg(long, value_parser = parse_duration)]
    pub(crate) task_timeout: Option<std::time::Duration>,
}

pub async fn handle(args: DoingArgs, cancel: CancellationToken) -> Result<()> {
    let config = Config::load(&config_paths::config_path());
    let plan_path = args.plan.unwrap_or_else(config_paths::default_plan_path);
    let state_path = args.state.unwrap_or_else(config_paths::default_state_path);

    let plan = morty_engine::load_plan(&plan_path).with_context(|| format!("loading plan from {}", plan_path.display()))?;

    let clock = SystemClock;
    let store = Arc::new(StateStore::load(&state_path, &clock).context("loading state store")?);
    let log = Arc::new(
        ExecutionLog::open(
            &config.log.dir,
            RotationPolicy {
                max_size_bytes: config.log.max_size_bytes,
                max_backups: config.log.max_backups,
                max_age_days: config.log.max_age_days,
            },
        )
        .context("opening execution log")?,
    );
    let vcs = Arc::new(VersionIntegration::ensure_repo(".", &config.log.dir).context("initializing git repository")?);

    let max_retries = config.engine.max_retries;
    let runner_config = JobRunnerConfig {
        ai_command: config.cli.ai_command.clone(),
        ai_args: config.cli.ai_args.clone(),
        task_timeout: args.task_timeout.unwrap_or(std::time::Duration::from_secs(config.engine.task_timeout_secs)),
        graceful_period: std::time::Duration::from_secs(config.engine.graceful_period_secs),
        max_retries,
    };
    let max_iterations = args.max_iterations.unwrap_or(config.engine.max_iterations) as u64;

    let engine = Engine::new(store, log, Some(vcs), clock, max_iterations, runner_config);
    let composer = PromptComposer::new(PromptTemplates::default());

    let report = engine
        .run(&plan, composer, cancel, |module, job, result| {
            let (status, detail) = match &result.outcome {
                JobOutcome::Completed => ("completed", String::new()),
                JobOutcome::Retrying { retry_count } => ("failed", format!(" (retry {retry_count}/{max_retries})")),
                JobOutcome::ExhaustedRetries { retry_count } => ("failed", format!(" (retries exhausted at {retry_count})")),
            };
            println!("{}/{} {}{}", module.as_str(), job.as_str(), color::status(status), detail);
        })
        .await?;

    match &report.stop_reason {
        StopReason::NoRunnableJobs => println!("done: all jobs completed ({} loops)", report.loops_run),
        StopReason::IterationCapReached { loops } => {
            println!("stopped: iteration cap reached after {loops} loops");
            std::process::exit(1);
        }
        StopReason::ExitSignal => println!("stopped: exit signal observed after {} loops", report.loops_run),
        StopReason::Cancelled => {
            println!("cancelled after {} loops", report.loops_run);
            std::process::exit(130);
        }
        StopReason::JobFailed { module, job } => {
            println!("stopped: job {module}/{job} exhausted its retries after {} loops", report.loops_run);
            std::process::exit(1);
        }
    }

    Ok(())
}
