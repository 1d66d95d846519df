// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Git-backed version integration: ensure a repo exists, detect
//! uncommitted work, and commit one loop at a time with a parseable
//! subject line.

use crate::commit_format::{build_message, parse_loop_subject, ChangeCounts};
use crate::error::VcsError;
use chrono::Utc;
use git2::{IndexAddOption, Repository, ResetType, StatusOptions};
use std::path::{Path, PathBuf};

pub struct LoopCommit {
    pub hash: String,
    pub loop_number: u64,
    pub status: String,
    pub date: chrono::DateTime<Utc>,
}

pub struct VersionIntegration {
    repo: Repository,
    root: PathBuf,
    log_dir_rel: PathBuf,
}

impl VersionIntegration {
    /// Opens the repository at `root`, initializing one if none exists.
    pub fn ensure_repo(root: impl Into<PathBuf>, log_dir_rel: impl Into<PathBuf>) -> Result<Self, VcsError> {
        let root = root.into();
        let repo = match Repository::open(&root) {
            Ok(repo) => repo,
            Err(_) => Repository::init(&root)?,
        };
        ensure_identity(&repo)?;
        Ok(Self {
            repo,
            root,
            log_dir_rel: log_dir_rel.into(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn status_options(&self) -> StatusOptions {
        let mut opts = StatusOptions::new();
        opts.include_untracked(true);
        opts.recurse_untracked_dirs(true);
        opts
    }

    fn change_counts(&self) -> Result<(ChangeCounts, Vec<String>), VcsError> {
        let statuses = self.repo.statuses(Some(&mut self.status_options()))?;
        let mut staged = 0;
        let mut unstaged = 0;
        let mut untracked = 0;
        let mut lines = Vec::new();

        for entry in statuses.iter() {
            let status = entry.status();
            let path = entry.path().unwrap_or_default().to_string();
            let is_log_path = path.starts_with(&self.log_dir_rel.to_string_lossy().to_string());

            if status.is_index_new() || status.is_index_modified() || status.is_index_deleted() || status.is_index_renamed() {
                staged += 1;
            }
            if status.is_wt_modified() || status.is_wt_deleted() || status.is_wt_renamed() {
                unstaged += 1;
            }
            if status.is_wt_new() {
                if !is_log_path {
                    untracked += 1;
                }
            }
            lines.push(format!("{} {}", porcelain_code(status), path));
        }

        Ok((
            ChangeCounts {
                staged,
                unstaged,
                untracked,
            },
            lines,
        ))
    }

    /// True iff staged, unstaged, or untracked (excluding the log directory) changes exist.
    pub fn has_uncommitted_changes(&self) -> Result<bool, VcsError> {
        let (counts, _) = self.change_counts()?;
        Ok(counts.staged > 0 || counts.unstaged > 0 || counts.untracked > 0)
    }

    pub fn is_ignored(&self, path: &Path) -> Result<bool, VcsError> {
        Ok(self.repo.status_should_ignore(path)?)
    }

    /// Stages everything and creates a loop commit. No-op (returns `Ok(None)`)
    /// if there is nothing to commit.
    pub fn create_job_commit(&self, loop_number: u64, status: &str) -> Result<Option<String>, VcsError> {
        let (counts, changed_files) = self.change_counts()?;
        if counts.staged == 0 && counts.unstaged == 0 && counts.untracked == 0 {
            return Ok(None);
        }

        let mut index = self.repo.index()?;
        index.add_all(["*"].iter(), IndexAddOption::DEFAULT, None)?;
        index.write()?;
        let tree_oid = index.write_tree()?;
        let tree = self.repo.find_tree(tree_oid)?;

        let sig = self.repo.signature()?;
        let message = build_message(loop_number, status, Utc::now(), &counts, &changed_files);

        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        let oid = self
            .repo
            .commit(Some("HEAD"), &sig, &sig, &message, &tree, &parents)
            .map_err(|e| VcsError::CommitFailed(e.to_string()))?;

        Ok(Some(oid.to_string()))
    }

    fn loop_commits(&self) -> Result<Vec<LoopCommit>, VcsError> {
        let mut revwalk = self.repo.revwalk()?;
        if revwalk.push_head().is_err() {
            return Ok(Vec::new());
        }
        let mut out = Vec::new();
        for oid in revwalk {
            let oid = oid?;
            let commit = self.repo.find_commit(oid)?;
            let summary = commit.summary().unwrap_or_default();
            if let Some((number, status)) = parse_loop_subject(summary) {
                let date = chrono::DateTime::from_timestamp(commit.time().seconds(), 0).unwrap_or_else(Utc::now);
                out.push(LoopCommit {
                    hash: oid.to_string(),
                    loop_number: number,
                    status,
                    date,
                });
            }
        }
        Ok(out)
    }

    pub fn get_current_loop_number(&self) -> Result<u64, VcsError> {
        Ok(self.loop_commits()?.first().map(|c| c.loop_number).unwrap_or(0))
    }

    pub fn show_loop_history(&self, n: usize) -> Result<Vec<LoopCommit>, VcsError> {
        let mut commits = self.loop_commits()?;
        commits.truncate(n);
        Ok(commits)
    }

    pub fn get_loop_by_number(&self, n: u64) -> Result<Option<String>, VcsError> {
        Ok(self.loop_commits()?.into_iter().find(|c| c.loop_number == n).map(|c| c.hash))
    }

    /// Resets the working tree hard to `hash`, first snapshotting the
    /// current branch tip and the log directory so neither is lost.
    pub fn reset_to_commit(&self, hash: &str) -> Result<(), VcsError> {
        let oid = git2::Oid::from_str(hash).map_err(|_| VcsError::InvalidCommit(hash.to_string()))?;
        let commit = self
            .repo
            .find_commit(oid)
            .map_err(|_| VcsError::InvalidCommit(hash.to_string()))?;

        if let Err(e) = self.create_backup_branch() {
            tracing::warn!(error = %e, "failed to create backup branch before reset");
        }

        let log_dir = self.root.join(&self.log_dir_rel);
        let backup_logs = preserve_log_dir(&log_dir)?;

        self.repo
            .reset(commit.as_object(), ResetType::Hard, None)
            .map_err(|e| VcsError::ResetFailed(e.to_string()))?;

        if let Some(backup_logs) = backup_logs {
            restore_log_dir(&log_dir, &backup_logs)?;
        }

        Ok(())
    }

    pub fn reset_to_loop(&self, n: u64) -> Result<(), VcsError> {
        let hash = self
            .get_loop_by_number(n)?
            .ok_or_else(|| VcsError::InvalidCommit(format!("no commit for loop {n}")))?;
        self.reset_to_commit(&hash)
    }

    fn create_backup_branch(&self) -> Result<(), VcsError> {
        let head = self.repo.head()?.peel_to_commit()?;
        let name = format!("backup/{}", Utc::now().format("%Y%m%d-%H%M%S"));
        self.repo.branch(&name, &head, false)?;
        Ok(())
    }
}

fn ensure_identity(repo: &Repository) -> Result<(), VcsError> {
    let config = repo.config()?;
    if config.get_string("user.name").is_err() {
        let mut config = config;
        config.set_str("user.name", "Morty")?;
        config.set_str("user.email", "morty@localhost")?;
    }
    Ok(())
}

fn porcelain_code(status: git2::Status) -> &'static str {
    if status.is_index_new() || status.is_wt_new() {
        "??"
    } else if status.is_index_deleted() || status.is_wt_deleted() {
        " D"
    } else if status.is_index_modified() || status.is_wt_modified() {
        " M"
    } else if status.is_index_renamed() || status.is_wt_renamed() {
        " R"
    } else {
        "  "
    }
}

fn preserve_log_dir(log_dir: &Path) -> Result<Option<tempfile::TempDir>, VcsError> {
    if !log_dir.exists() {
        return Ok(None);
    }
    let backup = tempfile::tempdir()?;
    copy_dir_recursive(log_dir, backup.path())?;
    Ok(Some(backup))
}

fn restore_log_dir(log_dir: &Path, backup: &tempfile::TempDir) -> Result<(), VcsError> {
    std::fs::create_dir_all(log_dir)?;
    copy_dir_recursive(backup.path(), log_dir)?;
    Ok(())
}

fn copy_dir_recursive(from: &Path, to: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(to)?;
    for entry in std::fs::read_dir(from)? {
        let entry = entry?;
        let dest = to.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir_recursive(&entry.path(), &dest)?;
        } else {
            std::fs::copy(entry.path(), &dest)?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "repo_tests.rs"]
mod tests;
