// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Append-only, size-rotated invocation log plus in-memory aggregate
//! statistics. One JSON object per line, one file per rotation window.

use crate::error::StorageError;
use chrono::Utc;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvocationRecord {
    pub id: String,
    pub timestamp: chrono::DateTime<Utc>,
    pub command: String,
    pub args: Vec<String>,
    pub full_command: String,
    pub working_dir: String,
    pub duration_ms: u64,
    pub exit_code: i32,
    pub success: bool,
    pub timed_out: bool,
    pub interrupted: bool,
    pub stdout_size: usize,
    pub stderr_size: usize,
    pub total_output_size: usize,
    pub timeout: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct PerCommandStats {
    pub count: u64,
    pub success: u64,
    pub fail: u64,
    pub total_duration: Duration,
}

impl PerCommandStats {
    pub fn average_duration(&self) -> Duration {
        if self.count == 0 {
            Duration::ZERO
        } else {
            self.total_duration / self.count as u32
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ExecutionStats {
    pub total: u64,
    pub successful: u64,
    pub failed: u64,
    pub timed_out: u64,
    pub interrupted: u64,
    pub total_duration: Duration,
    pub min_duration: Option<Duration>,
    pub max_duration: Option<Duration>,
    pub per_command: HashMap<String, PerCommandStats>,
    pub last_execution: Option<chrono::DateTime<Utc>>,
}

impl ExecutionStats {
    pub fn average_duration(&self) -> Duration {
        if self.total == 0 {
            Duration::ZERO
        } else {
            self.total_duration / self.total as u32
        }
    }

    fn record(&mut self, rec: &InvocationRecord) {
        self.total += 1;
        let duration = Duration::from_millis(rec.duration_ms);
        self.total_duration += duration;
        self.min_duration = Some(self.min_duration.map_or(duration, |d| d.min(duration)));
        self.max_duration = Some(self.max_duration.map_or(duration, |d| d.max(duration)));
        self.last_execution = Some(rec.timestamp);
        if rec.success {
            self.successful += 1;
        } else {
            self.failed += 1;
        }
        if rec.timed_out {
            self.timed_out += 1;
        }
        if rec.interrupted {
            self.interrupted += 1;
        }
        let entry = self.per_command.entry(rec.command.clone()).or_default();
        entry.count += 1;
        entry.total_duration += duration;
        if rec.success {
            entry.success += 1;
        } else {
            entry.fail += 1;
        }
    }
}

#[derive(Debug, Clone)]
pub struct RotationPolicy {
    pub max_size_bytes: u64,
    pub max_backups: usize,
    pub max_age_days: u64,
}

impl Default for RotationPolicy {
    fn default() -> Self {
        Self {
            max_size_bytes: 10 * 1024 * 1024,
            max_backups: 5,
            max_age_days: 0,
        }
    }
}

struct Inner {
    current_file: File,
    current_path: PathBuf,
    current_size: u64,
}

pub struct ExecutionLog {
    dir: PathBuf,
    policy: RotationPolicy,
    inner: Mutex<Inner>,
    stats: Mutex<ExecutionStats>,
}

impl ExecutionLog {
    pub fn open(dir: impl Into<PathBuf>, policy: RotationPolicy) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        let (file, path) = open_fresh_file(&dir)?;
        Ok(Self {
            dir,
            policy,
            inner: Mutex::new(Inner {
                current_file: file,
                current_path: path,
                current_size: 0,
            }),
            stats: Mutex::new(ExecutionStats::default()),
        })
    }

    pub fn append(&self, record: &InvocationRecord) -> Result<(), StorageError> {
        let mut line = serde_json::to_vec(record)?;
        line.push(b'\n');

        let mut inner = self.inner.lock();
        if self.policy.max_size_bytes > 0 && inner.current_size >= self.policy.max_size_bytes {
            self.rotate(&mut inner)?;
        }
        inner.current_file.write_all(&line)?;
        inner.current_file.flush()?;
        inner.current_size += line.len() as u64;
        drop(inner);

        self.stats.lock().record(record);
        Ok(())
    }

    pub fn stats(&self) -> ExecutionStats {
        self.stats.lock().clone()
    }

    fn rotate(&self, inner: &mut Inner) -> Result<(), StorageError> {
        let (file, path) = open_fresh_file(&self.dir)?;
        inner.current_file = file;
        inner.current_path = path;
        inner.current_size = 0;
        self.apply_retention()?;
        Ok(())
    }

    fn apply_retention(&self) -> Result<(), StorageError> {
        let mut entries: Vec<(PathBuf, std::time::SystemTime)> = fs::read_dir(&self.dir)?
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "log"))
            .filter_map(|e| e.metadata().ok().and_then(|m| m.modified().ok()).map(|mtime| (e.path(), mtime)))
            .collect();
        entries.sort_by_key(|(_, mtime)| *mtime);

        if self.policy.max_age_days > 0 {
            let cutoff = std::time::SystemTime::now()
                .checked_sub(Duration::from_secs(self.policy.max_age_days * 86_400));
            if let Some(cutoff) = cutoff {
                entries.retain(|(path, mtime)| {
                    if *mtime < cutoff {
                        let _ = fs::remove_file(path);
                        false
                    } else {
                        true
                    }
                });
            }
        }

        if self.policy.max_backups > 0 && entries.len() > self.policy.max_backups {
            let excess = entries.len() - self.policy.max_backups;
            for (path, _) in entries.into_iter().take(excess) {
                let _ = fs::remove_file(path);
            }
        }
        Ok(())
    }
}

fn open_fresh_file(dir: &Path) -> Result<(File, PathBuf), StorageError> {
    let name = format!("execution_{}.log", Utc::now().format("%Y%m%d_%H%M%S%3f"));
    let path = dir.join(name);
    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    Ok((file, path))
}

#[cfg(test)]
#[path = "execution_log_tests.rs"]
mod tests;
