//! Error types for the github-commenter CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for github-commenter operations.
///
/// Each variant maps to a specific exit code. A comment that cannot be
/// placed on a diff is not an error; see `resolve::resolve_position`.
#[derive(Error, Debug)]
pub enum CommenterError {
    /// User provided invalid arguments or options are incomplete.
    #[error("{0}")]
    UserError(String),

    /// Comment input (stdin) could not be decoded.
    #[error("invalid comment input: {0}")]
    InputError(String),

    /// Diff text could not be parsed.
    #[error("malformed diff at line {line}: {message}")]
    DiffParseError { line: usize, message: String },

    /// Git operation failed.
    #[error("Git operation failed: {0}")]
    GitError(String),

    /// GitHub API request failed.
    #[error("GitHub API request failed: {0}")]
    GitHubError(String),
}

impl CommenterError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            CommenterError::UserError(_) => exit_codes::USER_ERROR,
            CommenterError::InputError(_) => exit_codes::PARSE_FAILURE,
            CommenterError::DiffParseError { .. } => exit_codes::PARSE_FAILURE,
            CommenterError::GitError(_) => exit_codes::GIT_FAILURE,
            CommenterError::GitHubError(_) => exit_codes::GITHUB_FAILURE,
        }
    }

    pub(crate) fn diff_parse(line: usize, message: impl Into<String>) -> Self {
        CommenterError::DiffParseError {
            line,
            message: message.into(),
        }
    }
}

/// Result type alias for github-commenter operations.
pub type Result<T> = std::result::Result<T, CommenterError>;
