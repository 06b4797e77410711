//! Blocking GitHub REST client built on ureq.

use std::time::Duration;

use serde::Deserialize;

use super::{ReviewApi, ReviewComment};
use crate::error::{CommenterError, Result};

const USER_AGENT: &str = concat!("github-commenter/", env!("CARGO_PKG_VERSION"));
const TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct PullRequest {
    base: GitRef,
}

#[derive(Debug, Deserialize)]
struct GitRef {
    sha: String,
}

/// GitHub (or GitHub Enterprise) REST API client.
pub struct GitHubClient {
    agent: ureq::Agent,
    api_base: String,
    token: String,
}

impl GitHubClient {
    /// `api_base` is the API entry point, e.g. `https://api.github.com` or
    /// `https://ghe.example.com/api/v3`.
    pub fn new(api_base: &str, token: &str) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(TIMEOUT)
            .user_agent(USER_AGENT)
            .build();
        Self {
            agent,
            api_base: api_base.trim_end_matches('/').to_string(),
            token: token.to_string(),
        }
    }

    fn pulls_url(&self, repo: &str, pr: u64) -> String {
        format!("{}/repos/{}/pulls/{}", self.api_base, repo, pr)
    }

    fn authorized(&self, request: ureq::Request) -> ureq::Request {
        request
            .set("Authorization", &format!("token {}", self.token))
            .set("Accept", "application/vnd.github+json")
    }
}

impl ReviewApi for GitHubClient {
    fn pull_request_base_sha(&self, repo: &str, pr: u64) -> Result<String> {
        let url = self.pulls_url(repo, pr);
        log::debug!("GET {}", url);

        let response = self
            .authorized(self.agent.get(&url))
            .call()
            .map_err(|e| request_error("GET", &url, e))?;

        let pull: PullRequest = response.into_json().map_err(|e| {
            CommenterError::GitHubError(format!("unexpected response from GET {}: {}", url, e))
        })?;

        Ok(pull.base.sha)
    }

    fn create_review_comment(&self, comment: &ReviewComment) -> Result<()> {
        let url = format!("{}/comments", self.pulls_url(&comment.repo, comment.pr));
        log::debug!("POST {} ({}:{})", url, comment.path, comment.position);

        self.authorized(self.agent.post(&url))
            .send_json(comment.payload())
            .map_err(|e| request_error("POST", &url, e))?;

        Ok(())
    }
}

fn request_error(method: &str, url: &str, err: ureq::Error) -> CommenterError {
    match err {
        ureq::Error::Status(code, response) => {
            let body = response.into_string().unwrap_or_default();
            CommenterError::GitHubError(format!(
                "{} {} returned {}: {}",
                method,
                url,
                code,
                body.trim()
            ))
        }
        ureq::Error::Transport(transport) => {
            CommenterError::GitHubError(format!("{} {} failed: {}", method, url, transport))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pulls_url_for_enterprise_base() {
        let client = GitHubClient::new("https://ghe.example.com/api/v3/", "t");
        assert_eq!(
            client.pulls_url("team/svc", 7),
            "https://ghe.example.com/api/v3/repos/team/svc/pulls/7"
        );
    }

    #[test]
    fn test_pull_request_base_is_decoded() {
        let json = r#"{"number": 42, "base": {"ref": "main", "sha": "0123abcd"}, "head": {"sha": "ffff"}}"#;
        let pull: PullRequest = serde_json::from_str(json).unwrap();
        assert_eq!(pull.base.sha, "0123abcd");
    }

    #[test]
    fn test_unreachable_host_is_github_error() {
        // Port 9 (discard) on localhost is closed in test environments.
        let client = GitHubClient::new("http://127.0.0.1:9", "t");
        let err = client.pull_request_base_sha("a/b", 1).unwrap_err();
        assert!(matches!(err, CommenterError::GitHubError(_)));
    }
}
