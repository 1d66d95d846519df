// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The outer loop: load the Plan and State, then repeatedly select and run
//! the next runnable job until none remain, the iteration cap is hit, an
//! exit-signal is observed, or the run is cancelled.

use crate::error::RunnerError;
use crate::job_runner::{JobOutcome, JobRunResult, JobRunner, JobRunnerConfig};
use morty_core::{Clock, JobId, ModuleId, Plan};
use morty_storage::{ExecutionLog, StateStore};
use morty_vcs::VersionIntegration;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Why the outer loop stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// No runnable job remained: either everything completed, or every
    /// remaining job is blocked on something that will never clear.
    NoRunnableJobs,
    /// `max_iterations` loops ran without exhausting the plan.
    IterationCapReached { loops: u64 },
    /// A job's stdout carried the exit-signal marker.
    ExitSignal,
    /// The run was cancelled externally (e.g. SIGINT/SIGTERM).
    Cancelled,
    /// A job exhausted its retries without succeeding.
    JobFailed { module: String, job: String },
}

#[derive(Debug, Clone)]
pub struct EngineReport {
    pub stop_reason: StopReason,
    pub loops_run: u64,
}

pub struct Engine<C: Clock> {
    store: Arc<StateStore>,
    log: Arc<ExecutionLog>,
    vcs: Option<Arc<VersionIntegration>>,
    clock: C,
    max_iterations: u64,
    runner_config: JobRunnerConfig,
}

impl<C: Clock> Engine<C> {
    pub fn new(
        store: Arc<StateStore>,
        log: Arc<ExecutionLog>,
        vcs: Option<Arc<VersionIntegration>>,
        clock: C,
        max_iterations: u64,
        runner_config: JobRunnerConfig,
    ) -> Self {
        Self {
            store,
            log,
            vcs,
            clock,
            max_iterations,
            runner_config,
        }
    }

    /// Runs the plan to a terminal stop reason. `on_progress` is invoked once
    /// per job attempt, right after `run_job` returns, so a caller can print a
    /// one-line-per-job-transition feed without the engine knowing anything
    /// about output formatting.
    pub async fn run(
        &self,
        plan: &Plan,
        composer: morty_compose::PromptComposer,
        cancel: CancellationToken,
        mut on_progress: impl FnMut(&ModuleId, &JobId, &JobRunResult),
    ) -> Result<EngineReport, RunnerError> {
        self.store.init_from_plan(plan)?;

        let runner = JobRunner::new(
            self.store.clone(),
            self.log.clone(),
            self.vcs.clone(),
            composer,
            self.clock.clone(),
            self.runner_config.clone(),
        );

        let mut loops_run = 0u64;

        loop {
            if cancel.is_cancelled() {
                return Ok(EngineReport {
                    stop_reason: StopReason::Cancelled,
                    loops_run,
                });
            }
            if loops_run >= self.max_iterations {
                return Ok(EngineReport {
                    stop_reason: StopReason::IterationCapReached { loops: loops_run },
                    loops_run,
                });
            }

            let next = self.store.select_next(plan, &self.clock)?;
            let Some((module, job)) = next else {
                return Ok(EngineReport {
                    stop_reason: StopReason::NoRunnableJobs,
                    loops_run,
                });
            };

            loops_run += 1;
            let result = runner.run_job(plan, &module, &job, loops_run, cancel.clone()).await?;
            on_progress(&module, &job, &result);

            if let JobOutcome::ExhaustedRetries { .. } = result.outcome {
                return Ok(EngineReport {
                    stop_reason: StopReason::JobFailed {
                        module: module.as_str().to_string(),
                        job: job.as_str().to_string(),
                    },
                    loops_run,
                });
            }

            if result.exit_signal {
                return Ok(EngineReport {
                    stop_reason: StopReason::ExitSignal,
                    loops_run,
                });
            }
        }
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
