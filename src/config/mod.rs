//! Configuration for github-commenter.
//!
//! Options come from four layers, lowest precedence first: built-in
//! defaults, the optional `.github-commenter.yaml` at the repository root,
//! command-line flags, and CI environment completion.

mod model;
mod operations;

#[cfg(test)]
mod tests;

pub use model::{CONFIG_FILE_NAME, Config, DEFAULT_GITHUB_API, PrOptions};
