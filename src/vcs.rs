// src/vcs.rs
//! Thin wrappers around the `git` CLI.

use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::error::{Result, SmellfixError};

/// Shallow-clones `url` into `dest`.
///
/// # Errors
/// Returns error if git is missing or the clone fails.
pub fn clone_repository(url: &str, dest: &Path) -> Result<()> {
    let dest_arg = dest.to_string_lossy();
    let output = Command::new("git")
        .args(["clone", "--depth", "1", url, dest_arg.as_ref()])
        .output()
        .map_err(|e| SmellfixError::Git(format!("Failed to run git clone: {e}")))?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(SmellfixError::Git(format!(
            "git clone {url} failed: {}",
            stderr.trim()
        )));
    }
    debug!(url, dest = %dest.display(), "cloned repository");
    Ok(())
}

/// Commit hash `HEAD` points to.
///
/// # Errors
/// Returns error if `repo` is not a git work tree.
pub fn head_hash(repo: &Path) -> Result<String> {
    let stdout = run_git(repo, &["rev-parse", "HEAD"])?;
    Ok(stdout.trim().to_string())
}

/// True if `dir` is inside a git work tree.
#[must_use]
pub fn in_repo(dir: &Path) -> bool {
    Command::new("git")
        .arg("-C")
        .arg(dir)
        .args(["rev-parse", "--is-inside-work-tree"])
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Stages everything and commits with `message`.
///
/// Returns false if there was nothing to commit.
///
/// # Errors
/// Returns error if any git command fails.
pub fn commit_all(repo: &Path, message: &str) -> Result<bool> {
    run_git(repo, &["add", "-A"])?;

    let status = Command::new("git")
        .arg("-C")
        .arg(repo)
        .args(["diff", "--cached", "--quiet"])
        .status()
        .map_err(|e| SmellfixError::Git(format!("Failed to check staged changes: {e}")))?;
    if status.success() {
        return Ok(false);
    }

    run_git(repo, &["commit", "-m", message])?;
    Ok(true)
}

/// Repository name from a clone URL: `https://host/owner/name.git` is `name`.
#[must_use]
pub fn repo_name(url: &str) -> Option<&str> {
    let trimmed = url.trim_end_matches('/');
    let last = trimmed.rsplit(['/', ':']).next()?;
    let name = last.strip_suffix(".git").unwrap_or(last);
    (!name.is_empty()).then_some(name)
}

fn run_git(repo: &Path, args: &[&str]) -> Result<String> {
    let output = Command::new("git")
        .arg("-C")
        .arg(repo)
        .args(args)
        .output()
        .map_err(|e| SmellfixError::Git(format!("Failed to run git {}: {e}", args.join(" "))))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(SmellfixError::Git(format!(
            "git {} failed: {}",
            args.join(" "),
            stderr.trim()
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
