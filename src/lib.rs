//! github-commenter: post inline review comments on pull requests.
//!
//! Comment requests name a file and a line of the current working tree.
//! The [`resolve`] module maps them onto the patch positions the review API
//! expects, using diffs parsed by the [`diff`] module.

pub mod ci;
pub mod cli;
pub mod commands;
pub mod comment;
pub mod config;
pub mod diff;
pub mod error;
pub mod exit_codes;
pub mod git;
pub mod github;
pub mod input;
pub mod resolve;

#[cfg(test)]
pub(crate) mod test_support;
