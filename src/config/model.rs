//! Config file and resolved option types.

use crate::ci::CiProvider;
use crate::input::InputFormat;
use serde::{Deserialize, Serialize};

/// Name of the optional config file at the repository root.
pub const CONFIG_FILE_NAME: &str = ".github-commenter.yaml";

/// API entry point used when nothing else names one.
pub const DEFAULT_GITHUB_API: &str = "https://api.github.com";

/// Repository-level defaults for the `pr` command.
///
/// This struct represents the contents of `.github-commenter.yaml`.
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// GitHub API entry point, e.g. `https://ghe.example.com/api/v3`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,

    /// Repository as `owner/name`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,

    /// Format of comment requests piped on stdin.
    pub input_format: InputFormat,

    /// CI provider whose environment completes the options.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_env: Option<CiProvider>,
}

/// Fully resolved options for commenting on one pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrOptions {
    /// GitHub API entry point, without a trailing slash.
    pub github: String,
    pub repo: String,
    pub pr: u64,
    pub token: String,
    /// Start of the applicability range; the PR base when unset.
    pub after: Option<String>,
    /// End of the applicability range; the working tree when unset.
    pub until: Option<String>,
}
