//! Config loading, validation, and option resolution.

use super::model::{CONFIG_FILE_NAME, Config, DEFAULT_GITHUB_API, PrOptions};
use crate::ci::PartialOptions;
use crate::error::{CommenterError, Result};
use std::path::Path;

impl Config {
    /// Load config from a YAML file.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(CommenterError::UserError)` - Read error, parse error or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            CommenterError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Load `.github-commenter.yaml` from `repo_root`, or defaults when the
    /// file does not exist.
    pub fn load_from_repo<P: AsRef<Path>>(repo_root: P) -> Result<Self> {
        let path = repo_root.as_ref().join(CONFIG_FILE_NAME);
        if !path.exists() {
            log::debug!("no {} at {}", CONFIG_FILE_NAME, repo_root.as_ref().display());
            return Ok(Self::default());
        }
        log::debug!("loading config from {}", path.display());
        Self::load(path)
    }

    /// Parse config from a YAML string.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| CommenterError::UserError(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate config values.
    pub fn validate(&self) -> Result<()> {
        if let Some(github) = &self.github {
            validate_endpoint(github)
                .map_err(|msg| CommenterError::UserError(format!("config validation failed: {}", msg)))?;
        }
        if let Some(repo) = &self.repo {
            validate_repo(repo)
                .map_err(|msg| CommenterError::UserError(format!("config validation failed: {}", msg)))?;
        }
        Ok(())
    }

    /// The config file's contribution as the lowest option layer.
    pub fn as_partial(&self) -> PartialOptions {
        PartialOptions {
            github: self.github.clone(),
            repo: self.repo.clone(),
            ..PartialOptions::default()
        }
    }
}

impl PartialOptions {
    /// Fields set in `higher` replace the ones in `self`.
    pub fn overlay(self, higher: PartialOptions) -> PartialOptions {
        PartialOptions {
            github: higher.github.or(self.github),
            repo: higher.repo.or(self.repo),
            pr: higher.pr.or(self.pr),
            after: higher.after.or(self.after),
            until: higher.until.or(self.until),
        }
    }
}

impl PrOptions {
    /// Resolve final options from layered partial options and a token.
    ///
    /// # Returns
    ///
    /// * `Ok(PrOptions)` - Every required option is present and valid
    /// * `Err(CommenterError::UserError)` - Missing or invalid option
    pub fn resolve(options: PartialOptions, token: Option<String>) -> Result<Self> {
        let github = options
            .github
            .unwrap_or_else(|| DEFAULT_GITHUB_API.to_string())
            .trim_end_matches('/')
            .to_string();
        validate_endpoint(&github).map_err(CommenterError::UserError)?;

        let repo = options.repo.ok_or_else(|| {
            CommenterError::UserError(
                "missing repository: pass --repo owner/name, set `repo` in .github-commenter.yaml, \
                 or use --from-env"
                    .to_string(),
            )
        })?;
        validate_repo(&repo).map_err(CommenterError::UserError)?;

        let pr = match options.pr {
            Some(pr) if pr > 0 => pr,
            Some(_) => {
                return Err(CommenterError::UserError(
                    "pull request number must be greater than 0".to_string(),
                ));
            }
            None => {
                return Err(CommenterError::UserError(
                    "missing pull request number: pass --pr or use --from-env".to_string(),
                ));
            }
        };

        let token = token.filter(|t| !t.trim().is_empty()).ok_or_else(|| {
            CommenterError::UserError(
                "missing GitHub access token: pass --github-access-token or set GITHUB_ACCESS_TOKEN"
                    .to_string(),
            )
        })?;

        Ok(Self {
            github,
            repo,
            pr,
            token,
            after: options.after,
            until: options.until,
        })
    }
}

fn validate_endpoint(github: &str) -> std::result::Result<(), String> {
    if github.starts_with("https://") || github.starts_with("http://") {
        Ok(())
    } else {
        Err(format!(
            "GitHub API entry point must be an http(s) URL (found '{}')",
            github
        ))
    }
}

fn validate_repo(repo: &str) -> std::result::Result<(), String> {
    match repo.split_once('/') {
        Some((owner, name))
            if !owner.is_empty() && !name.is_empty() && !name.contains('/') =>
        {
            Ok(())
        }
        _ => Err(format!("repository must be in owner/name form (found '{}')", repo)),
    }
}
