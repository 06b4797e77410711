//! Pull request review comments on GitHub.

mod client;

use crate::error::Result;
use serde::Serialize;

pub use client::GitHubClient;

/// A review comment anchored to a patch position, ready to post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewComment {
    pub repo: String,
    pub pr: u64,
    /// Head commit the position refers to.
    pub commit_id: String,
    pub path: String,
    pub position: usize,
    pub body: String,
}

impl ReviewComment {
    /// JSON body for the create-review-comment endpoint.
    pub fn payload(&self) -> ReviewCommentPayload<'_> {
        ReviewCommentPayload {
            body: &self.body,
            commit_id: &self.commit_id,
            path: &self.path,
            position: self.position,
        }
    }
}

impl std::fmt::Display for ReviewComment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "PR comment to {}/pulls/{}@{}#{}:{} => {}",
            self.repo, self.pr, self.commit_id, self.path, self.position, self.body
        )
    }
}

#[derive(Debug, Serialize)]
pub struct ReviewCommentPayload<'a> {
    pub body: &'a str,
    pub commit_id: &'a str,
    pub path: &'a str,
    pub position: usize,
}

/// The review API calls the `pr` command needs.
pub trait ReviewApi {
    /// SHA of the pull request's base commit.
    fn pull_request_base_sha(&self, repo: &str, pr: u64) -> Result<String>;

    /// Create one review comment on the pull request.
    fn create_review_comment(&self, comment: &ReviewComment) -> Result<()>;
}
