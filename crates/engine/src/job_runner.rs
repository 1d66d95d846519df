// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runs a single job to completion: walks its tasks in order, composes each
//! prompt, invokes the external CLI, interprets the result, and applies the
//! retry policy when a task fails. One commit is created per terminal job
//! transition when version integration is configured.

use crate::error::RunnerError;
use morty_core::{Clock, JobId, ModuleId, Plan, Status};
use morty_compose::PromptComposer;
use morty_process::{InvokeOptions, OutputOptions, ProcessInvoker};
use morty_storage::{ExecutionLog, InvocationRecord, StateStore};
use morty_vcs::VersionIntegration;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone)]
pub struct JobRunnerConfig {
    pub ai_command: String,
    pub ai_args: Vec<String>,
    pub task_timeout: Duration,
    pub graceful_period: Duration,
    pub max_retries: u32,
}

/// Outcome of one `run_job` call. The exit-signal marker, when seen, is
/// reported independently of success/failure: it tells the Engine to stop
/// selecting further jobs even on a failed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    Completed,
    Retrying { retry_count: u32 },
    ExhaustedRetries { retry_count: u32 },
}

#[derive(Debug, Clone)]
pub struct JobRunResult {
    pub outcome: JobOutcome,
    pub exit_signal: bool,
}

pub struct JobRunner<C: Clock> {
    store: Arc<StateStore>,
    log: Arc<ExecutionLog>,
    vcs: Option<Arc<VersionIntegration>>,
    invoker: ProcessInvoker,
    composer: PromptComposer,
    clock: C,
    config: JobRunnerConfig,
}

impl<C: Clock> JobRunner<C> {
    pub fn new(
        store: Arc<StateStore>,
        log: Arc<ExecutionLog>,
        vcs: Option<Arc<VersionIntegration>>,
        composer: PromptComposer,
        clock: C,
        config: JobRunnerConfig,
    ) -> Self {
        Self {
            store,
            log,
            vcs,
            invoker: ProcessInvoker::new(),
            composer,
            clock,
            config,
        }
    }

    pub async fn run_job(
        &self,
        plan: &Plan,
        module: &ModuleId,
        job: &JobId,
        loop_number: u64,
        cancel: CancellationToken,
    ) -> Result<JobRunResult, RunnerError> {
        let (module_def, job_def) = plan.find_job(module, job).ok_or_else(|| RunnerError::JobNotInPlan {
            module: module.as_str().to_string(),
            job: job.as_str().to_string(),
        })?;

        self.store.transition_job(module, job, Status::Running, &self.clock)?;

        let mut exit_signal = false;
        let resume_from = self.store.get_job(module, job)?.tasks_completed;

        for (task_index, task) in job_def.task.iter().enumerate() {
            if task_index < resume_from {
                continue;
            }
            let job_state = self.store.get_job(module, job)?;
            let prompt = self.composer.compose(module_def, job_def, &job_state, task_index, task);

            let options = InvokeOptions {
                timeout: Some(self.config.task_timeout),
                stdin: Some(prompt),
                graceful_period: self.config.graceful_period,
                output: OutputOptions::default(),
                ..Default::default()
            };

            let invocation_id = uuid::Uuid::new_v4().to_string();
            let started = self.clock.now_utc();

            let invoked = self
                .invoker
                .invoke(&self.config.ai_command, &self.config.ai_args, options, cancel.clone())
                .await;

            let (succeeded, record_exit_code, timed_out, interrupted, stdout_len, stderr_len, failure_reason, task_exit_signal) =
                match &invoked {
                    Ok(result) => {
                        let verdict = morty_compose::interpret(&result.stdout, result.exit_code, result.timed_out, result.interrupted);
                        let reason = if verdict.success {
                            None
                        } else if result.interrupted {
                            Some("cancelled".to_string())
                        } else {
                            Some(
                                result
                                    .classify()
                                    .map(|e| format!("{}: {e}", e.code()))
                                    .unwrap_or_else(|| format!("task exited with code {}", result.exit_code)),
                            )
                        };
                        (
                            verdict.success,
                            result.exit_code,
                            result.timed_out,
                            result.interrupted,
                            result.stdout.len(),
                            result.stderr.len(),
                            reason,
                            verdict.exit_signal,
                        )
                    }
                    Err(e) => (false, -1, false, false, 0, 0, Some(format!("{}: {e}", e.code())), false),
                };

            let record = InvocationRecord {
                id: invocation_id,
                timestamp: started,
                command: self.config.ai_command.clone(),
                args: self.config.ai_args.clone(),
                full_command: format!("{} {}", self.config.ai_command, self.config.ai_args.join(" ")),
                working_dir: self.vcs.as_ref().map(|v| v.root().display().to_string()).unwrap_or_default(),
                duration_ms: invoked.as_ref().map(|r| r.duration.as_millis() as u64).unwrap_or(0),
                exit_code: record_exit_code,
                success: succeeded,
                timed_out,
                interrupted,
                stdout_size: stdout_len,
                stderr_size: stderr_len,
                total_output_size: stdout_len + stderr_len,
                timeout: Some(self.config.task_timeout.as_secs()),
                error: failure_reason.clone(),
            };
            let _ = self.log.append(&record);

            if task_exit_signal {
                exit_signal = true;
            }

            if !succeeded {
                let reason = failure_reason.unwrap_or_else(|| "task failed".to_string());
                self.store.set_failure_reason(module, job, reason)?;
                return self.handle_failure(module, job, loop_number, exit_signal).await;
            }

            self.store.mark_task_completed(module, job, task_index)?;
        }

        self.store.transition_job(module, job, Status::Completed, &self.clock)?;
        self.commit(loop_number, "completed");

        Ok(JobRunResult {
            outcome: JobOutcome::Completed,
            exit_signal,
        })
    }

    async fn handle_failure(
        &self,
        module: &ModuleId,
        job: &JobId,
        loop_number: u64,
        exit_signal: bool,
    ) -> Result<JobRunResult, RunnerError> {
        self.store.transition_job(module, job, Status::Failed, &self.clock)?;
        let previous_retry_count = self.store.get_job(module, job)?.retry_count;
        self.store.increment_retry(module, job)?;
        let retry_count = self.store.get_job(module, job)?.retry_count;
        self.commit(loop_number, "failed");

        if previous_retry_count >= self.config.max_retries {
            return Ok(JobRunResult {
                outcome: JobOutcome::ExhaustedRetries { retry_count },
                exit_signal,
            });
        }

        self.store.transition_job(module, job, Status::Pending, &self.clock)?;
        Ok(JobRunResult {
            outcome: JobOutcome::Retrying { retry_count },
            exit_signal,
        })
    }

    fn commit(&self, loop_number: u64, status: &str) {
        if let Some(vcs) = &self.vcs {
            if let Err(e) = vcs.create_job_commit(loop_number, status) {
                tracing::warn!(error = %e, "failed to create loop commit");
            }
        }
    }
}

#[cfg(test)]
#[path = "job_runner_tests.rs"]
mod tests;
