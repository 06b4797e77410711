//! Completing pull request options from CI environment variables.
//!
//! Each CI provider implements [`EnvironmentCompletion`]; adding a provider
//! means adding a [`CiProvider`] variant and its implementation, without
//! touching option resolution or the resolver.

mod circleci;

use std::collections::HashMap;

use crate::error::Result;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub use circleci::CircleCi;

/// Options a CI environment can supply. Set fields override the CLI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialOptions {
    pub github: Option<String>,
    pub repo: Option<String>,
    pub pr: Option<u64>,
    pub after: Option<String>,
    pub until: Option<String>,
}

/// A source of pull request options in a CI provider's environment.
pub trait EnvironmentCompletion {
    /// Read whatever options `vars` provide. Returns empty options when the
    /// build is not for a pull request.
    fn complete_from_environment(&self, vars: &HashMap<String, String>) -> Result<PartialOptions>;
}

/// CI providers selectable with `--from-env`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum CiProvider {
    #[value(name = "circleci")]
    #[serde(rename = "circleci")]
    CircleCi,
}

impl CiProvider {
    pub fn completion(self) -> Box<dyn EnvironmentCompletion> {
        match self {
            CiProvider::CircleCi => Box::new(CircleCi),
        }
    }
}

/// Snapshot of the process environment.
pub fn process_environment() -> HashMap<String, String> {
    std::env::vars().collect()
}
