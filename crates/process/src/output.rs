// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output fan-out: a line read from the child is written to every
//! configured sink (capture buffer, mirror file, caller-provided sink,
//! this process's own stderr) without ever surfacing a short-write to the
//! caller.

use crate::options::OutputOptions;
use crate::OutputMode;
use std::io::Write;

/// Accumulates captured bytes up to `max_capture_size` (0 = unlimited),
/// silently dropping the remainder once full.
pub(crate) struct CaptureBuffer {
    buf: String,
    max: usize,
}

impl CaptureBuffer {
    pub fn new(max: usize) -> Self {
        Self {
            buf: String::new(),
            max,
        }
    }

    pub fn push_line(&mut self, line: &str) {
        if self.max > 0 && self.buf.len() >= self.max {
            return;
        }
        if !self.buf.is_empty() {
            self.buf.push('\n');
        }
        self.buf.push_str(line);
        if self.max > 0 && self.buf.len() > self.max {
            self.buf.truncate(self.max);
        }
    }

    pub fn into_trimmed(self) -> String {
        self.buf.trim().to_string()
    }
}

/// Fans a line out to the file mirror, custom sink, and/or this process's
/// terminal, according to `options.mode`. Errors from auxiliary sinks are
/// logged, never propagated: the child must never observe a failed write.
pub(crate) fn tee_line(options: &OutputOptions, line: &str, is_stdout: bool, file: Option<&mut std::fs::File>) {
    let should_stream = matches!(options.mode, OutputMode::Stream | OutputMode::CaptureAndStream);
    if should_stream {
        if is_stdout {
            let _ = writeln!(std::io::stdout(), "{line}");
        } else {
            let _ = writeln!(std::io::stderr(), "{line}");
        }
    }
    if let Some(f) = file {
        if let Err(e) = writeln!(f, "{line}") {
            tracing::warn!(error = %e, "failed to mirror output to file");
        }
    }
    let sink = if is_stdout {
        options.custom_stdout.as_ref()
    } else {
        options.custom_stderr.as_ref()
    };
    if let Some(sink) = sink {
        match sink.lock() {
            Ok(mut guard) => {
                if let Err(e) = writeln!(guard, "{line}") {
                    tracing::warn!(error = %e, "custom output sink write failed");
                }
            }
            Err(_) => tracing::warn!("custom output sink mutex poisoned"),
        }
    }
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
