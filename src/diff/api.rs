//! Diff acquisition: run `git diff` and parse its output.

use crate::error::Result;
use crate::git::{run_git_raw, validate_revision};
use std::path::Path;

use super::model::Diff;
use super::parser::parse_diff;

/// Parse the diff between two revisions.
///
/// Runs `git diff {from} {until}`, or `git diff {from}` against the working
/// tree when `until` is `None`. The output format is pinned so that user
/// configuration (`diff.context`, `diff.noprefix`, `diff.mnemonicPrefix`,
/// `diff.relative`, `core.quotePath`) cannot change what the parser sees:
/// three lines of context keep patch positions equal to the review API's.
///
/// # Arguments
///
/// * `cwd` - The working directory (repository root or any path inside it)
/// * `from` - The revision the diff starts at
/// * `until` - The revision the diff ends at, or `None` for the working tree
///
/// # Returns
///
/// * `Ok(Diff)` - The parsed diff
/// * `Err(CommenterError::UserError)` - A revision looks like a git option
/// * `Err(CommenterError::GitError)` - Git command failed
/// * `Err(CommenterError::DiffParseError)` - Git printed a malformed diff
pub fn diff_between<P: AsRef<Path>>(cwd: P, from: &str, until: Option<&str>) -> Result<Diff> {
    let mut args = vec![
        "-c",
        "core.quotePath=false",
        "diff",
        "--no-color",
        "--no-ext-diff",
        "--no-relative",
        "-U3",
        "--src-prefix=a/",
        "--dst-prefix=b/",
        validate_revision(from)?,
    ];
    if let Some(until) = until {
        args.push(validate_revision(until)?);
    }
    // Keep revisions from ever being read as paths.
    args.push("--");

    log::debug!("running git {}", args.join(" "));
    let output = run_git_raw(&cwd, &args)?;

    parse_diff(&output)
}
