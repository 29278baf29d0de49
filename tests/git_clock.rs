//! Commit clock against real repositories. Skipped when git is not installed.

use std::path::Path;
use std::process::Command;

use chrono::{Duration, Utc};
use tempfile::TempDir;

use memory_pet::git::{Freshness, GitRepo};
use memory_pet::CommitClock;

fn git_available() -> bool {
    Command::new("git").arg("--version").output().is_ok()
}

fn git(dir: &Path, args: &[&str], date: Option<&str>) {
    let mut cmd = Command::new("git");
    cmd.current_dir(dir)
        .args(args)
        .env("GIT_AUTHOR_NAME", "Sam")
        .env("GIT_AUTHOR_EMAIL", "sam@example.com")
        .env("GIT_COMMITTER_NAME", "Sam")
        .env("GIT_COMMITTER_EMAIL", "sam@example.com");
    if let Some(date) = date {
        cmd.env("GIT_AUTHOR_DATE", date).env("GIT_COMMITTER_DATE", date);
    }
    let status = cmd.status().expect("Failed to run git");
    assert!(status.success(), "git {args:?} failed");
}

#[test]
fn test_plain_directory_reads_zero() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let repo = GitRepo::new(temp_dir.path());

    assert!(!repo.is_git_repo());
    assert_eq!(repo.hours_since_last_commit(), 0.0);
    assert_eq!(repo.total_commits(), 0);
    assert!(repo.commit_info().is_none());
}

#[test]
fn test_repository_without_commits_reads_zero() {
    if !git_available() {
        return;
    }
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    git(temp_dir.path(), &["init", "-q"], None);

    let repo = GitRepo::new(temp_dir.path());
    assert!(repo.is_git_repo());
    assert!(repo.last_commit_time().is_none());
    assert_eq!(repo.hours_since_last_commit(), 0.0);
}

#[test]
fn test_hours_since_backdated_commit() {
    if !git_available() {
        return;
    }
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let dir = temp_dir.path();
    git(dir, &["init", "-q"], None);
    std::fs::write(dir.join("notes.txt"), "hello").unwrap();
    git(dir, &["add", "."], None);

    let when = Utc::now() - Duration::hours(30);
    git(
        dir,
        &["commit", "-q", "-m", "Feed the pet"],
        Some(&format!("{} +0000", when.timestamp())),
    );

    let repo = GitRepo::new(dir);
    let hours = repo.hours_since_last_commit();
    assert!((29.9..30.2).contains(&hours), "got {hours}");
    assert_eq!(Freshness::from_hours(hours), Freshness::Fading);
    assert_eq!(repo.total_commits(), 1);

    let info = repo.commit_info().unwrap();
    assert_eq!(info.message, "Feed the pet");
    assert_eq!(info.author, "Sam");
    assert!(!info.time_ago.is_empty());
}
