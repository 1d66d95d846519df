// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Spawns a single external command, enforces its timeout and cancellation,
//! and reports a structured result. Grounded in the same
//! spawn/tee/idle-timeout/process-group-kill shape used by subprocess
//! runners elsewhere in this ecosystem: `setsid` on spawn, `kill(-pid)` to
//! signal the whole group, polite SIGTERM before a forced SIGKILL.

use crate::error::InvokeError;
use crate::options::InvokeOptions;
use crate::output::{tee_line, CaptureBuffer};
use crate::platform::{self, SignalKind};
use crate::OutputMode;
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, Command};
use tokio_util::sync::CancellationToken;

/// Outcome of a single invocation.
#[derive(Debug, Clone)]
pub struct InvocationResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
    pub duration: Duration,
    pub command_str: String,
    pub timed_out: bool,
    pub interrupted: bool,
}

impl InvocationResult {
    pub fn succeeded(&self) -> bool {
        self.exit_code == 0 && !self.timed_out && !self.interrupted
    }

    /// Classifies a non-successful result into the typed error taxonomy,
    /// for callers that need a stable code/message (e.g. a job's
    /// `failure_reason`). Infrastructure failures that prevent a Result
    /// from existing at all (command not found, failed to spawn, cancelled
    /// before start) are returned directly as `Err` from `invoke` instead.
    pub fn classify(&self) -> Option<InvokeError> {
        if self.timed_out {
            Some(InvokeError::Timeout(self.duration))
        } else if self.interrupted {
            Some(InvokeError::CancelledDuringExecution)
        } else if self.exit_code != 0 {
            Some(InvokeError::NonZeroExit(self.exit_code))
        } else {
            None
        }
    }
}

#[derive(Default)]
pub struct ProcessInvoker;

impl ProcessInvoker {
    pub fn new() -> Self {
        Self
    }

    pub async fn invoke(
        &self,
        command: &str,
        args: &[String],
        options: InvokeOptions,
        cancel: CancellationToken,
    ) -> Result<InvocationResult, InvokeError> {
        if cancel.is_cancelled() {
            return Err(InvokeError::CancelledBeforeStart);
        }

        let command_str = format!("{command} {}", args.join(" "));
        let mut cmd = Command::new(command);
        cmd.args(args);
        cmd.stdin(if options.stdin.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        });
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        cmd.kill_on_drop(true);
        if let Some(dir) = &options.working_dir {
            cmd.current_dir(dir);
        }
        for (k, v) in &options.env {
            cmd.env(k, v);
        }
        platform::setup_process_group(&mut cmd);

        let start = Instant::now();
        let mut child = cmd.spawn().map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => InvokeError::CommandNotFound(command.to_string()),
            _ => InvokeError::StartFailed(e),
        })?;

        if let Some(input) = &options.stdin {
            if let Some(mut stdin) = child.stdin.take() {
                let _ = stdin.write_all(input.as_bytes()).await;
                let _ = stdin.shutdown().await;
            }
        }

        let mirror_file = options
            .output
            .file
            .as_ref()
            .and_then(|p| std::fs::OpenOptions::new().create(true).append(true).open(p).ok());
        let mirror_file = std::sync::Mutex::new(mirror_file);

        let capture = matches!(options.output.mode, OutputMode::Capture | OutputMode::CaptureAndStream);
        let max_capture = options.output.max_capture_size;
        let stdout_pipe = child.stdout.take();
        let stderr_pipe = child.stderr.take();

        let stdout_task = spawn_reader(stdout_pipe, true, capture, max_capture, &options, &mirror_file);
        let stderr_task = spawn_reader(stderr_pipe, false, capture, max_capture, &options, &mirror_file);

        let timeout_fut = async {
            match options.timeout {
                Some(d) if !d.is_zero() => tokio::time::sleep(d).await,
                _ => std::future::pending::<()>().await,
            }
        };

        enum Outcome {
            Exited(std::io::Result<std::process::ExitStatus>),
            TimedOut,
            Cancelled,
        }

        let outcome = tokio::select! {
            status = child.wait() => Outcome::Exited(status),
            _ = timeout_fut => Outcome::TimedOut,
            _ = cancel.cancelled() => Outcome::Cancelled,
        };

        let (status, timed_out, interrupted) = match outcome {
            Outcome::Exited(status) => (status, false, false),
            Outcome::TimedOut => {
                let status = terminate_and_reap(&mut child, options.graceful_period).await;
                (status, true, false)
            }
            Outcome::Cancelled => {
                let status = terminate_and_reap(&mut child, options.graceful_period).await;
                (status, false, true)
            }
        };

        let stdout = stdout_task.await.unwrap_or_default();
        let stderr = stderr_task.await.unwrap_or_default();

        let exit_code = if timed_out || interrupted {
            -1
        } else {
            match &status {
                Ok(s) => s.code().unwrap_or(-1),
                Err(_) => -1,
            }
        };

        Ok(InvocationResult {
            stdout,
            stderr,
            exit_code,
            duration: start.elapsed(),
            command_str,
            timed_out,
            interrupted,
        })
    }
}

fn spawn_reader(
    pipe: Option<impl tokio::io::AsyncRead + Unpin + Send + 'static>,
    is_stdout: bool,
    capture: bool,
    max_capture: usize,
    options: &InvokeOptions,
    mirror_file: &std::sync::Mutex<Option<std::fs::File>>,
) -> tokio::task::JoinHandle<String> {
    let output = options.output.clone();
    // SAFETY-free clone: we only need the mirror file handle cloned via try_clone for the task.
    let mirror = mirror_file
        .lock()
        .ok()
        .and_then(|g| g.as_ref().and_then(|f| f.try_clone().ok()));
    tokio::spawn(async move {
        let Some(pipe) = pipe else {
            return String::new();
        };
        let mut lines = BufReader::new(pipe).lines();
        let mut buffer = CaptureBuffer::new(max_capture);
        let mut mirror = mirror;
        while let Ok(Some(line)) = lines.next_line().await {
            if capture {
                buffer.push_line(&line);
            }
            tee_line(&output, &line, is_stdout, mirror.as_mut());
        }
        buffer.into_trimmed()
    })
}

/// Polite terminate -> bounded wait -> forced kill, applied to the whole
/// process group on Unix. Always reaps the child so no zombie remains.
async fn terminate_and_reap(child: &mut Child, graceful_period: Duration) -> std::io::Result<std::process::ExitStatus> {
    if let Some(pid) = child.id() {
        let _ = platform::send_signal(pid, SignalKind::Term);
        if !graceful_period.is_zero() {
            if let Ok(status) = tokio::time::timeout(graceful_period, child.wait()).await {
                return status;
            }
        }
        let _ = platform::send_signal(pid, SignalKind::Kill);
    } else {
        let _ = child.start_kill();
    }
    child.wait().await
}

#[cfg(test)]
#[path = "invoker_tests.rs"]
mod tests;
