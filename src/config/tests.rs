//! Tests for config functionality.

use crate::ci::{CiProvider, PartialOptions};
use crate::config::{CONFIG_FILE_NAME, Config, DEFAULT_GITHUB_API, PrOptions};
use crate::error::CommenterError;
use crate::input::InputFormat;
use tempfile::TempDir;

fn partial(repo: &str, pr: u64) -> PartialOptions {
    PartialOptions {
        repo: Some(repo.to_string()),
        pr: Some(pr),
        ..PartialOptions::default()
    }
}

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.github, None);
    assert_eq!(config.repo, None);
    assert_eq!(config.input_format, InputFormat::Ltsv);
    assert_eq!(config.from_env, None);
}

#[test]
fn test_parse_minimal_yaml() {
    let config = Config::from_yaml("").unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_parse_full_yaml() {
    let yaml = r#"
github: https://ghe.example.com/api/v3
repo: okitan/github_commenter
input_format: ltsv
from_env: circleci
"#;
    let config = Config::from_yaml(yaml).unwrap();

    assert_eq!(config.github.as_deref(), Some("https://ghe.example.com/api/v3"));
    assert_eq!(config.repo.as_deref(), Some("okitan/github_commenter"));
    assert_eq!(config.input_format, InputFormat::Ltsv);
    assert_eq!(config.from_env, Some(CiProvider::CircleCi));
}

#[test]
fn test_unknown_fields_are_ignored() {
    let yaml = r#"
repo: a/b
future_option: true
"#;
    let config = Config::from_yaml(yaml).unwrap();
    assert_eq!(config.repo.as_deref(), Some("a/b"));
}

#[test]
fn test_invalid_values_are_rejected() {
    let err = Config::from_yaml("repo: just-a-name\n").unwrap_err();
    assert!(matches!(err, CommenterError::UserError(_)));
    assert!(err.to_string().contains("owner/name"));

    let err = Config::from_yaml("github: api.github.com\n").unwrap_err();
    assert!(err.to_string().contains("http(s)"));

    let err = Config::from_yaml("from_env: travis\n").unwrap_err();
    assert!(err.to_string().contains("failed to parse config YAML"));
}

#[test]
fn test_load_from_repo_without_file_uses_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::load_from_repo(temp_dir.path()).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_load_from_repo_reads_file() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join(CONFIG_FILE_NAME), "repo: team/svc\n").unwrap();

    let config = Config::load_from_repo(temp_dir.path()).unwrap();
    assert_eq!(config.repo.as_deref(), Some("team/svc"));
}

#[test]
fn test_overlay_prefers_higher_layer() {
    let file = PartialOptions {
        github: Some("https://ghe.example.com/api/v3".to_string()),
        repo: Some("file/repo".to_string()),
        ..PartialOptions::default()
    };
    let cli = PartialOptions {
        repo: Some("cli/repo".to_string()),
        pr: Some(3),
        until: Some("abc".to_string()),
        ..PartialOptions::default()
    };
    let env = PartialOptions {
        pr: Some(9),
        after: Some("def".to_string()),
        ..PartialOptions::default()
    };

    let merged = file.overlay(cli).overlay(env);

    assert_eq!(
        merged,
        PartialOptions {
            github: Some("https://ghe.example.com/api/v3".to_string()),
            repo: Some("cli/repo".to_string()),
            pr: Some(9),
            after: Some("def".to_string()),
            until: Some("abc".to_string()),
        }
    );
}

#[test]
fn test_resolve_applies_defaults() {
    let options = PrOptions::resolve(partial("okitan/app", 42), Some("secret".to_string())).unwrap();

    assert_eq!(options.github, DEFAULT_GITHUB_API);
    assert_eq!(options.repo, "okitan/app");
    assert_eq!(options.pr, 42);
    assert_eq!(options.token, "secret");
    assert_eq!(options.after, None);
    assert_eq!(options.until, None);
}

#[test]
fn test_resolve_trims_trailing_slash() {
    let mut layers = partial("a/b", 1);
    layers.github = Some("https://ghe.example.com/api/v3/".to_string());

    let options = PrOptions::resolve(layers, Some("t".to_string())).unwrap();
    assert_eq!(options.github, "https://ghe.example.com/api/v3");
}

#[test]
fn test_resolve_requires_repo_pr_and_token() {
    let err = PrOptions::resolve(
        PartialOptions {
            pr: Some(1),
            ..PartialOptions::default()
        },
        Some("t".to_string()),
    )
    .unwrap_err();
    assert!(err.to_string().contains("missing repository"));

    let err = PrOptions::resolve(
        PartialOptions {
            repo: Some("a/b".to_string()),
            ..PartialOptions::default()
        },
        Some("t".to_string()),
    )
    .unwrap_err();
    assert!(err.to_string().contains("missing pull request number"));

    let err = PrOptions::resolve(partial("a/b", 0), Some("t".to_string())).unwrap_err();
    assert!(err.to_string().contains("greater than 0"));

    let err = PrOptions::resolve(partial("a/b", 1), None).unwrap_err();
    assert!(err.to_string().contains("GITHUB_ACCESS_TOKEN"));

    let err = PrOptions::resolve(partial("a/b", 1), Some("  ".to_string())).unwrap_err();
    assert!(matches!(err, CommenterError::UserError(_)));
}
