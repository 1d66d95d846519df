// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `.morty/config.toml`, overridable by `MORTY_*` environment variables.

use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub ai_command: String,
    pub ai_args: Vec<String>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            ai_command: "claude".to_string(),
            ai_args: vec!["-p".to_string()],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub max_iterations: u32,
    pub task_timeout_secs: u64,
    pub graceful_period_secs: u64,
    pub max_retries: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_iterations: 50,
            task_timeout_secs: 600,
            graceful_period_secs: 10,
            max_retries: 3,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub dir: PathBuf,
    pub max_size_bytes: u64,
    pub max_backups: usize,
    pub max_age_days: u64,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(".morty/logs"),
            max_size_bytes: 10 * 1024 * 1024,
            max_backups: 5,
            max_age_days: 0,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub cli: CliConfig,
    pub engine: EngineConfig,
    pub log: LogConfig,
}

impl Config {
    pub fn load(path: &std::path::Path) -> Self {
        let mut config = if path.exists() {
            std::fs::read_to_string(path)
                .ok()
                .and_then(|s| toml::from_str(&s).ok())
                .unwrap_or_default()
        } else {
            Config::default()
        };
        config.apply_env_overrides();
        config
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("MORTY_AI_COMMAND") {
            self.cli.ai_command = v;
        }
        if let Ok(v) = std::env::var("MORTY_MAX_ITERATIONS") {
            if let Ok(n) = v.parse() {
                self.engine.max_iterations = n;
            }
        }
        if let Ok(v) = std::env::var("MORTY_TASK_TIMEOUT_SECS") {
            if let Ok(n) = v.parse() {
                self.engine.task_timeout_secs = n;
            }
        }
        if let Ok(v) = std::env::var("MORTY_GRACEFUL_PERIOD_SECS") {
            if let Ok(n) = v.parse() {
                self.engine.graceful_period_secs = n;
            }
        }
        if let Ok(v) = std::env::var("MORTY_MAX_RETRIES") {
            if let Ok(n) = v.parse() {
                self.engine.max_retries = n;
            }
        }
        if let Ok(v) = std::env::var("MORTY_LOG_DIR") {
            self.log.dir = PathBuf::from(v);
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
