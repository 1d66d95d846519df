// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// How stdout/stderr are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Only buffer into the returned Result.
    #[default]
    Capture,
    /// Only tee to the terminal (and any custom sinks); nothing buffered.
    Stream,
    /// Both buffer and tee.
    CaptureAndStream,
    /// Discard.
    Silent,
}

/// A shared, lockable byte sink for custom stdout/stderr taps.
pub type Sink = Arc<Mutex<dyn std::io::Write + Send>>;

#[derive(Clone, Default)]
pub struct OutputOptions {
    pub mode: OutputMode,
    pub file: Option<PathBuf>,
    /// 0 = unlimited. Truncation past this many bytes never surfaces as an
    /// error; the child always observes a successful write.
    pub max_capture_size: usize,
    pub custom_stdout: Option<Sink>,
    pub custom_stderr: Option<Sink>,
}

impl std::fmt::Debug for OutputOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutputOptions")
            .field("mode", &self.mode)
            .field("file", &self.file)
            .field("max_capture_size", &self.max_capture_size)
            .field("custom_stdout", &self.custom_stdout.is_some())
            .field("custom_stderr", &self.custom_stderr.is_some())
            .finish()
    }
}

#[derive(Debug, Clone, Default)]
pub struct InvokeOptions {
    pub working_dir: Option<PathBuf>,
    pub env: HashMap<String, String>,
    /// `None` or zero duration means "wait forever".
    pub timeout: Option<Duration>,
    pub stdin: Option<String>,
    pub graceful_period: Duration,
    pub output: OutputOptions,
}
