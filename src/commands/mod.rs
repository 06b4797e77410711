//! Command implementations for github-commenter.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations.

mod pr;

use crate::cli::Command;
use crate::error::Result;

/// Dispatch a command to its implementation.
pub fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Pr(args) => pr::cmd_pr(args),
    }
}
