//! CircleCI: `CI_PULL_REQUEST` and `CIRCLE_COMPARE_URL`.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use super::{EnvironmentCompletion, PartialOptions};
use crate::error::{CommenterError, Result};

static COMPARE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^https://(?P<host>[^/]+)/(?P<organization>[^/]+)/(?P<repository>[^/]+)/compare/(?P<after>[^/.]+)\.\.\.(?P<until>[^/.]+)$",
    )
    .expect("compare URL pattern is valid")
});

/// Completes options from CircleCI pull request builds.
#[derive(Debug, Clone, Copy, Default)]
pub struct CircleCi;

impl EnvironmentCompletion for CircleCi {
    fn complete_from_environment(&self, vars: &HashMap<String, String>) -> Result<PartialOptions> {
        let Some(pull_request) = vars.get("CI_PULL_REQUEST").filter(|v| !v.is_empty()) else {
            log::debug!("CI_PULL_REQUEST is not set; not a pull request build");
            return Ok(PartialOptions::default());
        };

        let pr = pull_request
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .and_then(|n| n.parse::<u64>().ok())
            .ok_or_else(|| {
                CommenterError::UserError(format!(
                    "CI_PULL_REQUEST does not end with a pull request number: '{}'",
                    pull_request
                ))
            })?;

        let compare_url = vars.get("CIRCLE_COMPARE_URL").map(String::as_str).unwrap_or("");
        let captures = COMPARE_URL.captures(compare_url).ok_or_else(|| {
            CommenterError::UserError(format!(
                "CIRCLE_COMPARE_URL is not a compare URL \
                 (https://{{host}}/{{organization}}/{{repository}}/compare/{{after}}...{{until}}): '{}'",
                compare_url
            ))
        })?;

        let host = &captures["host"];
        let github = if host == "github.com" {
            "https://api.github.com".to_string()
        } else {
            format!("https://{}/api/v3", host)
        };

        Ok(PartialOptions {
            github: Some(github),
            repo: Some(format!("{}/{}", &captures["organization"], &captures["repository"])),
            pr: Some(pr),
            after: Some(captures["after"].to_string()),
            until: Some(captures["until"].to_string()),
        })
    }
}
