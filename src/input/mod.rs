//! Decoding comment requests from piped input.

mod ltsv;

use crate::comment::CommentRequest;
use crate::error::Result;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub use ltsv::parse_ltsv;

/// Structured text formats accepted on stdin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum InputFormat {
    /// Labeled tab-separated values: `file:a.rb<TAB>line:10<TAB>message:...`
    #[default]
    Ltsv,
}

/// Decode every comment request in `input`.
///
/// Either all records decode or the whole input is rejected.
pub fn parse_comments(format: InputFormat, input: &str) -> Result<Vec<CommentRequest>> {
    match format {
        InputFormat::Ltsv => parse_ltsv(input),
    }
}
