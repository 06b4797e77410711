//! Git command runner for github-commenter.
//!
//! Git is always spawned directly (never through a shell), so revision
//! strings coming from CI environment variables cannot inject commands.
//! All git operations should go through this module.

use crate::error::{CommenterError, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Result of a successful git command execution.
#[derive(Debug, Clone)]
pub struct GitOutput {
    /// Standard output from the command (trimmed).
    pub stdout: String,
    /// Standard error from the command (trimmed).
    pub stderr: String,
}

impl GitOutput {
    fn from_output(output: &Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
    }

    /// Returns true if stdout is empty.
    pub fn is_empty(&self) -> bool {
        self.stdout.is_empty()
    }
}

/// Run a git command with the specified working directory.
///
/// # Returns
///
/// * `Ok(GitOutput)` - On successful execution (exit code 0)
/// * `Err(CommenterError::GitError)` - On non-zero exit code (mapped to exit code 3)
pub fn run_git<P: AsRef<Path>>(cwd: P, args: &[&str]) -> Result<GitOutput> {
    let output = execute(cwd.as_ref(), args)?;
    Ok(GitOutput::from_output(&output))
}

/// Run a git command and return stdout exactly as git printed it.
///
/// Diff text must not be trimmed: a trailing blank context line is a
/// line of the patch.
pub fn run_git_raw<P: AsRef<Path>>(cwd: P, args: &[&str]) -> Result<String> {
    let output = execute(cwd.as_ref(), args)?;
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// The git subcommand in `args`, skipping `-c name=value` pairs.
fn subcommand<'a>(args: &[&'a str]) -> &'a str {
    let mut rest = args;
    while let ["-c", _, tail @ ..] = rest {
        rest = tail;
    }
    rest.first().copied().unwrap_or("")
}

fn execute(cwd: &Path, args: &[&str]) -> Result<Output> {
    let output = Command::new("git")
        .current_dir(cwd)
        .args(args)
        .output()
        .map_err(|e| {
            CommenterError::GitError(format!(
                "failed to execute git {}: {}",
                subcommand(args),
                e
            ))
        })?;

    if output.status.success() {
        return Ok(output);
    }

    let git_output = GitOutput::from_output(&output);
    let exit_code = output.status.code().unwrap_or(-1);
    let error_msg = if git_output.stderr.is_empty() {
        git_output.stdout
    } else {
        git_output.stderr
    };

    Err(CommenterError::GitError(format!(
        "git {} failed (exit code {}): {}",
        subcommand(args),
        exit_code,
        error_msg
    )))
}

/// Get the repository root directory using `git rev-parse --show-toplevel`.
///
/// Returns a `UserError` rather than a `GitError` when `cwd` is not inside
/// a repository, since that is a usage problem rather than a git failure.
pub fn get_repo_root<P: AsRef<Path>>(cwd: P) -> Result<PathBuf> {
    match run_git(cwd, &["rev-parse", "--show-toplevel"]) {
        Ok(output) => Ok(PathBuf::from(output.stdout)),
        Err(CommenterError::GitError(msg)) if msg.contains("not a git repository") => {
            Err(CommenterError::UserError(
                "not inside a git repository. Run this command from within a git repository."
                    .to_string(),
            ))
        }
        Err(e) => Err(e),
    }
}

/// Full SHA of the commit checked out at `cwd`.
pub fn head_sha<P: AsRef<Path>>(cwd: P) -> Result<String> {
    let output = run_git(cwd, &["rev-parse", "HEAD"])?;
    if output.is_empty() {
        return Err(CommenterError::GitError(
            "git rev-parse HEAD printed nothing".to_string(),
        ));
    }
    Ok(output.stdout)
}

/// Reject revision strings git would read as options.
pub fn validate_revision(revision: &str) -> Result<&str> {
    if revision.is_empty() {
        return Err(CommenterError::UserError(
            "revision must not be empty".to_string(),
        ));
    }
    if revision.starts_with('-') {
        return Err(CommenterError::UserError(format!(
            "invalid revision '{}': revisions must not start with '-'",
            revision
        )));
    }
    if revision.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(CommenterError::UserError(format!(
            "invalid revision '{}': revisions must not contain whitespace",
            revision
        )));
    }
    Ok(revision)
}
