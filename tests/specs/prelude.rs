//! Test helpers for behavioral specifications.
//!
//! Provides a high-level DSL for testing morty CLI behavior.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Returns a Command configured to run the morty binary.
fn morty_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin("morty"))
}

/// Create a CLI builder for morty commands.
pub fn cli() -> CliBuilder {
    CliBuilder::new()
}

/// High-level CLI builder for fluent test assertions.
pub struct CliBuilder {
    args: Vec<String>,
    dir: Option<PathBuf>,
}

impl CliBuilder {
    fn new() -> Self {
        Self {
            args: Vec::new(),
            dir: None,
        }
    }

    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    pub fn pwd(mut self, path: impl Into<PathBuf>) -> Self {
        self.dir = Some(path.into());
        self
    }

    pub fn command(self) -> Command {
        let mut cmd = morty_cmd();
        cmd.args(&self.args);
        if let Some(dir) = self.dir {
            cmd.current_dir(dir);
        }
        cmd
    }

    /// Run and expect success (exit code 0).
    pub fn passes(self) -> RunAssert {
        let mut cmd = self.command();
        let output = cmd.output().expect("command should run");
        assert!(
            output.status.success(),
            "expected command to pass, got exit code {:?}\nstdout: {}\nstderr: {}",
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        RunAssert { output }
    }

    /// Run and expect failure (non-zero exit code).
    pub fn fails(self) -> RunAssert {
        let mut cmd = self.command();
        let output = cmd.output().expect("command should run");
        assert!(
            !output.status.success(),
            "expected command to fail, but it passed\nstdout: {}\nstderr: {}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        RunAssert { output }
    }
}

/// Result of a CLI run for chaining assertions.
pub struct RunAssert {
    output: Output,
}

impl RunAssert {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    pub fn stdout_has(self, expected: &str) -> Self {
        let stdout = self.stdout();
        assert!(stdout.contains(expected), "stdout does not contain '{expected}'\nstdout: {stdout}");
        self
    }

    pub fn stderr_has(self, expected: &str) -> Self {
        let stderr = self.stderr();
        assert!(stderr.contains(expected), "stderr does not contain '{expected}'\nstderr: {stderr}");
        self
    }
}

/// Temporary project directory with helper methods.
pub struct Project {
    dir: tempfile::TempDir,
}

impl Project {
    /// Create an empty project with a `.morty/` directory and an initialized
    /// git repository.
    pub fn empty() -> Self {
        let project = Self {
            dir: tempfile::tempdir().expect("tempdir"),
        };
        std::fs::create_dir_all(project.path().join(".morty")).expect("mkdir .morty");
        project.git_init();
        project
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    fn git_init(&self) {
        Command::new("git")
            .args(["init"])
            .current_dir(self.path())
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .status()
            .expect("git init should work");
        Command::new("git")
            .args(["config", "user.email", "test@example.com"])
            .current_dir(self.path())
            .status()
            .expect("git config should work");
        Command::new("git")
            .args(["config", "user.name", "test"])
            .current_dir(self.path())
            .status()
            .expect("git config should work");
    }

    /// Write a file at the given path (parent directories created automatically).
    pub fn file(&self, path: impl AsRef<Path>, content: &str) {
        let full_path = self.dir.path().join(path.as_ref());
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(full_path, content).unwrap();
    }

    /// Write a Plan with a single module/job, configured to shell out to
    /// `cmd` instead of invoking a real AI CLI.
    pub fn plan_running(&self, cmd: &str) {
        self.file(".morty/plan.toml", MINIMAL_PLAN);
        self.file(
            ".morty/config.toml",
            &format!(
                r#"
[cli]
ai_command = "{cmd}"
ai_args = []
"#
            ),
        );
    }

    pub fn morty(&self) -> CliBuilder {
        cli().pwd(self.path())
    }
}

/// A minimal Plan with a single module, job, and task.
pub const MINIMAL_PLAN: &str = r#"
[[module]]
id = "m1"
name = "Module One"

[[module.job]]
id = "j1"

[[module.job.task]]
prompt = "do the thing"
"#;
