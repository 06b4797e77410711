//! Implementation of the `github-commenter pr` command.
//!
//! Comments go through two independent diffs:
//! - the applicability diff (`after`..`until`) decides which comments are
//!   about lines changed in that range;
//! - the posting diff (PR base..working tree) gives each surviving comment
//!   its position in the pull request's patch.

use std::collections::HashMap;
use std::io::{IsTerminal, Read};
use std::path::Path;

use crate::ci::process_environment;
use crate::cli::PrArgs;
use crate::comment::CommentRequest;
use crate::config::{Config, PrOptions};
use crate::diff::{Diff, diff_between};
use crate::error::{CommenterError, Result};
use crate::git::{get_repo_root, head_sha};
use crate::github::{GitHubClient, ReviewApi, ReviewComment};
use crate::input::{InputFormat, parse_comments};
use crate::resolve::{filter_applicable, resolve_position};

/// Where resolved comments get posted.
#[derive(Debug, Clone)]
pub struct PostTarget {
    pub repo: String,
    pub pr: u64,
    pub head: String,
}

/// Outcome of one `pr` run.
#[derive(Debug)]
pub struct PrSummary {
    pub requested: usize,
    pub applicable: usize,
    pub planned: Vec<ReviewComment>,
    pub posted: usize,
}

/// Execute the `github-commenter pr` command.
pub fn cmd_pr(args: PrArgs) -> Result<()> {
    let cwd = std::env::current_dir().map_err(|e| {
        CommenterError::UserError(format!("failed to read current directory: {}", e))
    })?;
    let repo_root = get_repo_root(&cwd)?;
    let config = Config::load_from_repo(&repo_root)?;

    let input_format = args.input_format.unwrap_or(config.input_format);
    let requests = collect_comments(&args, input_format, read_piped_stdin)?;

    let options = resolve_options(&args, &config, &process_environment())?;
    let client = GitHubClient::new(&options.github, &options.token);

    let summary = run(&repo_root, &options, requests, &client, args.debug)?;

    if args.debug {
        println!(
            "{} comment(s) requested, {} applicable, {} planned (not posted: --debug).",
            summary.requested,
            summary.applicable,
            summary.planned.len()
        );
    } else {
        println!(
            "{} comment(s) requested, {} applicable, {} posted to {}#{}.",
            summary.requested, summary.applicable, summary.posted, options.repo, options.pr
        );
    }

    Ok(())
}

/// Resolve options from the config file, CLI flags and CI environment.
pub fn resolve_options(
    args: &PrArgs,
    config: &Config,
    env: &HashMap<String, String>,
) -> Result<PrOptions> {
    let mut layers = config.as_partial().overlay(args.as_partial());

    if let Some(provider) = args.from_env.or(config.from_env) {
        let completed = provider.completion().complete_from_environment(env)?;
        log::debug!("completed from {:?} environment: {:?}", provider, completed);
        layers = layers.overlay(completed);
    }

    PrOptions::resolve(layers, args.github_access_token.clone())
}

/// Comment requests from --file/--line/--message, or else from stdin.
///
/// `read_stdin` is only called when none of the comment options is given,
/// so an inherited pipe that never closes cannot block a run that names
/// its comment on the command line.
pub fn collect_comments<F>(
    args: &PrArgs,
    format: InputFormat,
    read_stdin: F,
) -> Result<Vec<CommentRequest>>
where
    F: FnOnce() -> Result<Option<String>>,
{
    match (&args.file, args.line, &args.message) {
        (Some(file), Some(line), Some(message)) => {
            return Ok(vec![CommentRequest::line_comment(
                file.as_str(),
                line as usize,
                message.as_str(),
            )]);
        }
        (None, None, None) => {}
        _ => {
            return Err(CommenterError::UserError(
                "--file, --line and --message must be given together".to_string(),
            ));
        }
    }

    match read_stdin()? {
        Some(input) if !input.trim().is_empty() => parse_comments(format, &input),
        _ => Err(CommenterError::UserError(
            "no comments found. Pipe LTSV comments to stdin or pass --file, --line and --message."
                .to_string(),
        )),
    }
}

fn read_piped_stdin() -> Result<Option<String>> {
    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }
    let mut input = String::new();
    stdin
        .read_to_string(&mut input)
        .map_err(|e| CommenterError::InputError(format!("failed to read stdin: {}", e)))?;
    Ok(Some(input))
}

/// Filter, resolve and post `requests` for the pull request in `options`.
pub fn run<A: ReviewApi>(
    repo_root: &Path,
    options: &PrOptions,
    requests: Vec<CommentRequest>,
    api: &A,
    dry_run: bool,
) -> Result<PrSummary> {
    let requested = requests.len();
    let base = api.pull_request_base_sha(&options.repo, options.pr)?;
    log::info!("{}#{} base is {}", options.repo, options.pr, base);

    let after = options.after.as_deref().unwrap_or(&base);
    let applicability = diff_between(repo_root, after, options.until.as_deref())?;
    let applicable = filter_applicable(&applicability, requests);
    log::info!(
        "{} of {} comment(s) apply to {}..{}",
        applicable.len(),
        requested,
        after,
        options.until.as_deref().unwrap_or("working tree")
    );

    let mut summary = PrSummary {
        requested,
        applicable: applicable.len(),
        planned: Vec::new(),
        posted: 0,
    };
    if applicable.is_empty() {
        return Ok(summary);
    }

    let target = PostTarget {
        repo: options.repo.clone(),
        pr: options.pr,
        head: head_sha(repo_root)?,
    };
    let posting = diff_between(repo_root, &base, None)?;
    summary.planned = plan_comments(&posting, applicable, &target);

    for comment in &summary.planned {
        if dry_run {
            eprintln!("{}", comment);
        } else {
            api.create_review_comment(comment)?;
            summary.posted += 1;
        }
    }

    Ok(summary)
}

/// Anchor each request to its position in `diff`, dropping the ones the
/// pull request's patch does not contain.
pub fn plan_comments(
    diff: &Diff,
    requests: Vec<CommentRequest>,
    target: &PostTarget,
) -> Vec<ReviewComment> {
    requests
        .into_iter()
        .filter_map(|request| {
            let Some(position) = resolve_position(diff, &request) else {
                log::warn!(
                    "{} is not part of the pull request diff; skipping",
                    request.location()
                );
                return None;
            };
            Some(ReviewComment {
                repo: target.repo.clone(),
                pr: target.pr,
                commit_id: target.head.clone(),
                path: request.file?,
                position,
                body: request.message,
            })
        })
        .collect()
}
