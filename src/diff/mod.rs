//! Unified diff model and parser.
//!
//! The parsing is deterministic and supports:
//! - Added lines with new-file line numbers and patch positions
//! - Multiple hunks per file, counted by their header lengths
//! - New files (from /dev/null) and deleted files (to /dev/null)
//! - File renames (keyed by the new path)
//! - "\ No newline at end of file" markers

mod api;
mod helpers;
mod model;
mod parser;


pub use api::diff_between;
pub use model::{ChangedLine, Diff, DiffPatch};
pub use parser::parse_diff;
