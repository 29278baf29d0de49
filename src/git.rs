//! Commit clock
//!
//! The pet decays by the hours since the last commit in the working
//! repository. Git is treated as an opaque data source: any failure (no
//! repository, no commits, git not installed) reads as zero hours.

use std::path::{Path, PathBuf};
use std::process::Command;

use chrono::{DateTime, Utc};

/// Source of "hours since the last relevant event".
pub trait CommitClock {
    /// Non-negative fractional hours. Implementations return `0.0` when
    /// they cannot tell.
    fn hours_since_last_commit(&self) -> f64;
}

/// A clock stuck at a fixed number of hours.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedClock(pub f64);

impl CommitClock for FixedClock {
    fn hours_since_last_commit(&self) -> f64 {
        crate::pet::normalize_hours(self.0)
    }
}

/// Metadata about the most recent commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitInfo {
    pub message: String,
    pub author: String,
    /// Human readable age, e.g. "3 hours ago".
    pub time_ago: String,
}

/// Rough health of the pet's memory given commit age.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// Under a day.
    Intact,
    /// Between one and two days.
    Fading,
    /// Two days or more.
    Forgotten,
}

impl Freshness {
    pub fn from_hours(hours: f64) -> Self {
        if hours < 24.0 {
            Self::Intact
        } else if hours < 48.0 {
            Self::Fading
        } else {
            Self::Forgotten
        }
    }

    pub fn describe(self, hours: f64) -> String {
        match self {
            Self::Intact => format!("Pet memory intact (only {hours:.1}h since commit)"),
            Self::Fading => format!("Pet starting to forget ({hours:.1}h)"),
            Self::Forgotten => format!(
                "Pet has forgotten a lot ({hours:.1}h = {:.1} days!)",
                hours / 24.0
            ),
        }
    }
}

/// A directory that may or may not be inside a git repository.
#[derive(Debug, Clone)]
pub struct GitRepo {
    dir: PathBuf,
}

impl GitRepo {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The current working directory.
    pub fn current() -> Self {
        Self::new(std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Last path component of the repository root, falling back to the directory.
    pub fn name(&self) -> String {
        let root = self
            .run(&["rev-parse", "--show-toplevel"])
            .map(PathBuf::from)
            .unwrap_or_else(|| self.dir.clone());
        root.file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| root.display().to_string())
    }

    pub fn is_git_repo(&self) -> bool {
        self.run(&["rev-parse", "--git-dir"]).is_some()
    }

    pub fn last_commit_time(&self) -> Option<DateTime<Utc>> {
        let stamp = self.run(&["log", "-1", "--format=%ct"])?;
        let secs = stamp.parse::<i64>().ok()?;
        DateTime::from_timestamp(secs, 0)
    }

    /// Hours between the last commit and `now`, never negative.
    pub fn hours_since(&self, now: DateTime<Utc>) -> f64 {
        match self.last_commit_time() {
            Some(last) => hours_between(last, now),
            None => 0.0,
        }
    }

    pub fn total_commits(&self) -> u64 {
        self.run(&["rev-list", "--count", "HEAD"])
            .and_then(|n| n.parse().ok())
            .unwrap_or(0)
    }

    pub fn commit_info(&self) -> Option<CommitInfo> {
        Some(CommitInfo {
            message: self.run(&["log", "-1", "--format=%s"])?,
            author: self.run(&["log", "-1", "--format=%an"])?,
            time_ago: self.run(&["log", "-1", "--format=%ar"])?,
        })
    }

    /// Run git in this directory; `None` on spawn failure, non-zero exit or empty output.
    fn run(&self, args: &[&str]) -> Option<String> {
        let output = match Command::new("git").current_dir(&self.dir).args(args).output() {
            Ok(output) => output,
            Err(e) => {
                tracing::debug!(error = %e, "git not available");
                return None;
            }
        };

        if !output.status.success() {
            tracing::trace!(?args, status = ?output.status, "git command failed");
            return None;
        }

        let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

impl CommitClock for GitRepo {
    fn hours_since_last_commit(&self) -> f64 {
        self.hours_since(Utc::now())
    }
}

/// Fractional hours from `from` to `to`, clamped at zero.
pub fn hours_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    let millis = (to - from).num_milliseconds() as f64;
    (millis / 3_600_000.0).max(0.0)
}
