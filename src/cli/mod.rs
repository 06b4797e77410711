//! CLI argument parsing for github-commenter.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use crate::ci::{CiProvider, PartialOptions};
use crate::input::InputFormat;
use clap::{Parser, Subcommand};

/// Post inline review comments on a pull request.
///
/// Comments name a file and a line of the current working tree; they are
/// mapped onto positions in the pull request's diff before posting.
/// Comments on lines the diff does not touch are dropped.
#[derive(Parser, Debug)]
#[command(name = "github-commenter")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for github-commenter.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Comment on a pull request.
    ///
    /// Takes a single comment from --file, --line and --message, or else
    /// reads comments as LTSV from stdin (`file`, `line`, `message` labels).
    Pr(PrArgs),
}

/// Arguments for the `pr` command.
#[derive(Parser, Debug)]
pub struct PrArgs {
    /// Complete options from a CI provider's environment variables.
    /// Overrides --github, --repo, --pr, --after and --until.
    #[arg(long, value_enum)]
    pub from_env: Option<CiProvider>,

    /// GitHub API entry point (default: https://api.github.com).
    #[arg(long)]
    pub github: Option<String>,

    /// Repository, e.g. okitan/github_commenter.
    #[arg(long)]
    pub repo: Option<String>,

    /// Pull request number.
    #[arg(long)]
    pub pr: Option<u64>,

    /// GitHub access token.
    #[arg(long, env = "GITHUB_ACCESS_TOKEN", hide_env_values = true)]
    pub github_access_token: Option<String>,

    /// Only post comments on lines changed after this revision
    /// (default: the pull request's base).
    #[arg(long)]
    pub after: Option<String>,

    /// Only post comments on lines changed up to this revision
    /// (default: the working tree).
    #[arg(long)]
    pub until: Option<String>,

    /// Format of comments piped on stdin.
    #[arg(long, value_enum)]
    pub input_format: Option<InputFormat>,

    /// Comment message. Stdin is not read when given.
    #[arg(long)]
    pub message: Option<String>,

    /// Target file of the comment.
    #[arg(long)]
    pub file: Option<String>,

    /// Line number in the target file (not a line of the diff).
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub line: Option<u64>,

    /// Print the comments instead of posting them.
    #[arg(long)]
    pub debug: bool,
}

impl PrArgs {
    /// The options given on the command line, as one option layer.
    pub fn as_partial(&self) -> PartialOptions {
        PartialOptions {
            github: self.github.clone(),
            repo: self.repo.clone(),
            pr: self.pr,
            after: self.after.clone(),
            until: self.until.clone(),
        }
    }
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use serial_test::serial;

    #[test]
    fn cli_debug_assert() {
        Cli::command().debug_assert();
    }

    fn parse_pr(args: &[&str]) -> PrArgs {
        let mut argv = vec!["github-commenter", "pr"];
        argv.extend_from_slice(args);
        match Cli::try_parse_from(argv).unwrap().command {
            Command::Pr(args) => args,
        }
    }

    #[test]
    #[serial]
    fn parse_pr_full() {
        let args = parse_pr(&[
            "--from-env",
            "circleci",
            "--github",
            "https://ghe.example.com/api/v3",
            "--repo",
            "okitan/app",
            "--pr",
            "42",
            "--github-access-token",
            "secret",
            "--after",
            "abc",
            "--until",
            "def",
            "--input-format",
            "ltsv",
            "--message",
            "hello",
            "--file",
            "lib/a.rb",
            "--line",
            "10",
            "--debug",
        ]);

        assert_eq!(args.from_env, Some(CiProvider::CircleCi));
        assert_eq!(args.github_access_token.as_deref(), Some("secret"));
        assert_eq!(args.input_format, Some(InputFormat::Ltsv));
        assert_eq!(args.file.as_deref(), Some("lib/a.rb"));
        assert_eq!(args.line, Some(10));
        assert!(args.debug);
        assert_eq!(
            args.as_partial(),
            PartialOptions {
                github: Some("https://ghe.example.com/api/v3".to_string()),
                repo: Some("okitan/app".to_string()),
                pr: Some(42),
                after: Some("abc".to_string()),
                until: Some("def".to_string()),
            }
        );
    }

    #[test]
    #[serial]
    fn parse_pr_token_from_environment() {
        // SAFETY: serialized with every other test reading the environment.
        unsafe { std::env::set_var("GITHUB_ACCESS_TOKEN", "from-env") };
        let args = parse_pr(&["--repo", "a/b", "--pr", "1"]);
        unsafe { std::env::remove_var("GITHUB_ACCESS_TOKEN") };

        assert_eq!(args.github_access_token.as_deref(), Some("from-env"));
    }

    #[test]
    fn parse_pr_rejects_line_zero() {
        let result = Cli::try_parse_from(["github-commenter", "pr", "--line", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_pr_rejects_unknown_provider() {
        let result = Cli::try_parse_from(["github-commenter", "pr", "--from-env", "travis"]);
        assert!(result.is_err());
    }
}
