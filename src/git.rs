//! Git metadata capture
//!
//! Shells out to the `git` binary rather than linking a git library; the
//! packaged metadata needs only the abbreviated commit SHA and the
//! committer time of HEAD.

use std::path::Path;
use std::process::Command;

use chrono::{DateTime, FixedOffset};

use crate::error::{DistpackError, DistpackResult};

/// Environment variable overriding the captured commit SHA
pub const SHA_OVERRIDE_VAR: &str = "DISTPACK_SHA";
/// Environment variable overriding the captured commit time (ISO-8601)
pub const TIME_OVERRIDE_VAR: &str = "DISTPACK_TIME";

/// Commit metadata stamped into the `version` file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitInfo {
    /// Abbreviated commit SHA of HEAD
    pub sha: String,
    /// Committer time of HEAD
    pub time: DateTime<FixedOffset>,
}

impl CommitInfo {
    /// Capture HEAD metadata from the repository containing `repo_dir`.
    ///
    /// Returns an error if the directory is not inside a git work tree, git
    /// is not available, or the repository has no commits.
    pub fn capture(repo_dir: &Path) -> DistpackResult<Self> {
        let sha = git_show(repo_dir, "%h")?;
        let raw_time = git_show(repo_dir, "%cI")?;
        let time = parse_commit_time(&raw_time)?;
        Ok(Self { sha, time })
    }

    /// Capture HEAD metadata, honoring `DISTPACK_SHA` / `DISTPACK_TIME`
    /// overrides. With both set, git is never invoked, which allows packing
    /// from an exported source tree.
    pub fn resolve(repo_dir: &Path) -> DistpackResult<Self> {
        Self::resolve_with(
            repo_dir,
            std::env::var(SHA_OVERRIDE_VAR).ok(),
            std::env::var(TIME_OVERRIDE_VAR).ok(),
        )
    }

    fn resolve_with(
        repo_dir: &Path,
        sha_override: Option<String>,
        time_override: Option<String>,
    ) -> DistpackResult<Self> {
        let time_override = time_override.map(|raw| parse_commit_time(&raw)).transpose()?;
        match (sha_override, time_override) {
            (Some(sha), Some(time)) => Ok(Self { sha, time }),
            (sha, time) => {
                let captured = Self::capture(repo_dir)?;
                Ok(Self {
                    sha: sha.unwrap_or(captured.sha),
                    time: time.unwrap_or(captured.time),
                })
            }
        }
    }

    /// Date portion of the commit time, `YYYY-MM-DD`
    pub fn date(&self) -> String {
        self.time.format("%Y-%m-%d").to_string()
    }

    /// Commit time as seconds since the unix epoch, used for archive entry
    /// mtimes. Pre-epoch times clamp to zero.
    pub fn epoch_secs(&self) -> u64 {
        self.time.timestamp().max(0) as u64
    }
}

/// Check whether a directory is inside a git work tree
pub fn is_git_repo(dir: &Path) -> bool {
    Command::new("git")
        .args(["rev-parse", "--is-inside-work-tree"])
        .current_dir(dir)
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

fn parse_commit_time(raw: &str) -> DistpackResult<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(raw).map_err(|_| DistpackError::CommitTime {
        value: raw.to_string(),
    })
}

fn git_show(repo_dir: &Path, format: &str) -> DistpackResult<String> {
    let output = Command::new("git")
        .args(["log", "-1"])
        .arg(format!("--pretty=format:{format}"))
        .current_dir(repo_dir)
        .output()
        .map_err(|e| DistpackError::Git {
            message: format!("failed to run git: {e}"),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(DistpackError::Git {
            message: format!("git log failed: {}", stderr.trim()),
        });
    }

    let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if value.is_empty() {
        return Err(DistpackError::Git {
            message: "git log returned empty output".to_string(),
        });
    }

    Ok(value)
}
