//! Core diff parsing logic.

use std::collections::HashMap;

use crate::error::{CommenterError, Result};

use super::helpers::{HunkHeader, parse_diff_git_line, parse_hunk_header, parse_new_file_line};
use super::model::{ChangedLine, Diff, DiffPatch};

/// Parse raw `git diff` output into a [`Diff`].
///
/// Patch positions count every line of a file's patch text starting from
/// its first hunk header (position 0): context, added and removed lines,
/// later hunk headers and "\ No newline at end of file" markers all take a
/// position. Only added lines are recorded as changed lines.
///
/// # Returns
///
/// * `Ok(Diff)` - One patch per file in diff order
/// * `Err(CommenterError::DiffParseError)` - Malformed diff, with the offending line
pub fn parse_diff(diff_output: &str) -> Result<Diff> {
    let mut patches: Vec<DiffPatch> = Vec::new();
    let mut seen_paths: HashMap<String, usize> = HashMap::new();
    let mut current: Option<PatchBuilder> = None;
    let mut line_no = 0;

    for (index, line) in diff_output.lines().enumerate() {
        line_no = index + 1;

        if let Some(file) = current.as_mut() {
            if file.in_hunk() {
                file.push_hunk_line(line, line_no)?;
                continue;
            }
        }

        // Format: "diff --git a/path/to/file b/path/to/file"
        if let Some(rest) = line.strip_prefix("diff --git ") {
            if let Some(done) = current.take() {
                finish(done, &mut patches, &mut seen_paths)?;
            }
            let path = parse_diff_git_line(rest).ok_or_else(|| {
                CommenterError::diff_parse(line_no, format!("unrecognized file header '{}'", line))
            })?;
            current = Some(PatchBuilder::new(path, line_no));
            continue;
        }

        // Format: "@@ -old_start,old_len +new_start,new_len @@ optional context"
        if line.starts_with("@@ ") {
            let file = current.as_mut().ok_or_else(|| {
                CommenterError::diff_parse(line_no, "hunk header before any file header")
            })?;
            let header = parse_hunk_header(line).ok_or_else(|| {
                CommenterError::diff_parse(line_no, format!("unrecognized hunk header '{}'", line))
            })?;
            file.start_hunk(header);
            continue;
        }

        let Some(file) = current.as_mut() else {
            // Preamble before the first file (e.g. commit headers).
            continue;
        };

        if file.position.is_some() {
            // A no-newline marker may trail the last line of a hunk.
            if line.starts_with('\\') {
                file.advance();
                continue;
            }
            if line.is_empty() {
                continue;
            }
            return Err(CommenterError::diff_parse(
                line_no,
                format!("unexpected line after hunk in '{}': '{}'", file.path, line),
            ));
        }

        // Extended headers: index, mode, rename, similarity, binary, ---.
        if let Some(rest) = line.strip_prefix("+++ ") {
            // Deleted files keep the path from the "diff --git" line.
            if let Some(path) = parse_new_file_line(rest) {
                file.path = path;
            }
        }
    }

    if let Some(done) = current.take() {
        if done.in_hunk() {
            return Err(CommenterError::diff_parse(
                line_no,
                format!("diff ended inside a hunk of '{}'", done.path),
            ));
        }
        finish(done, &mut patches, &mut seen_paths)?;
    }

    Ok(Diff::from_patches(patches))
}

/// Append a finished file to `patches`.
///
/// A type change (say, a file replaced by a symlink) comes out of git as a
/// deletion and an addition of the same path. The section that adds lines
/// wins; two sections that both add lines are malformed.
fn finish(
    file: PatchBuilder,
    patches: &mut Vec<DiffPatch>,
    seen_paths: &mut HashMap<String, usize>,
) -> Result<()> {
    if let Some(&index) = seen_paths.get(&file.path) {
        let earlier_adds = !patches[index].changed_lines().is_empty();
        if earlier_adds && !file.changed_lines.is_empty() {
            return Err(CommenterError::diff_parse(
                file.header_line,
                format!("duplicate patch for '{}'", file.path),
            ));
        }
        if !earlier_adds {
            log::debug!("'{}' appears twice in the diff (type change)", file.path);
            patches[index] = DiffPatch::new(file.path, file.changed_lines);
        }
        return Ok(());
    }

    seen_paths.insert(file.path.clone(), patches.len());
    patches.push(DiffPatch::new(file.path, file.changed_lines));
    Ok(())
}

/// Accumulates one file's patch while its lines stream by.
struct PatchBuilder {
    path: String,
    header_line: usize,
    changed_lines: Vec<ChangedLine>,
    /// `None` until the first hunk header.
    position: Option<usize>,
    hunk: Option<HunkHeader>,
    new_line: usize,
    old_remaining: usize,
    new_remaining: usize,
}

impl PatchBuilder {
    fn new(path: String, header_line: usize) -> Self {
        Self {
            path,
            header_line,
            changed_lines: Vec::new(),
            position: None,
            hunk: None,
            new_line: 0,
            old_remaining: 0,
            new_remaining: 0,
        }
    }

    fn in_hunk(&self) -> bool {
        self.old_remaining > 0 || self.new_remaining > 0
    }

    fn advance(&mut self) -> usize {
        let next = self.position.map_or(0, |p| p + 1);
        self.position = Some(next);
        next
    }

    fn start_hunk(&mut self, header: HunkHeader) {
        self.advance();
        self.new_line = header.new_start;
        self.old_remaining = header.old_len;
        self.new_remaining = header.new_len;
        self.hunk = Some(header);
    }

    fn push_hunk_line(&mut self, line: &str, line_no: usize) -> Result<()> {
        if line.starts_with("diff --git ") || line.starts_with("@@ ") {
            return Err(self.truncated(line_no));
        }

        let position = self.advance();

        if line.starts_with('+') {
            if self.new_remaining == 0 {
                return Err(self.overrun(line_no));
            }
            self.changed_lines.push(ChangedLine {
                number: self.new_line,
                patch_position: position,
            });
            self.new_line += 1;
            self.new_remaining -= 1;
        } else if line.starts_with('-') {
            if self.old_remaining == 0 {
                return Err(self.overrun(line_no));
            }
            self.old_remaining -= 1;
        } else if line.is_empty() || line.starts_with(' ') {
            // Some tools strip the single space from blank context lines.
            if self.old_remaining == 0 || self.new_remaining == 0 {
                return Err(self.overrun(line_no));
            }
            self.new_line += 1;
            self.old_remaining -= 1;
            self.new_remaining -= 1;
        } else if !line.starts_with('\\') {
            return Err(CommenterError::diff_parse(
                line_no,
                format!("unexpected line inside hunk of '{}': '{}'", self.path, line),
            ));
        }

        Ok(())
    }

    fn truncated(&self, line_no: usize) -> CommenterError {
        CommenterError::diff_parse(
            line_no,
            format!(
                "hunk of '{}' ended early: {} old and {} new lines missing",
                self.path, self.old_remaining, self.new_remaining
            ),
        )
    }

    fn overrun(&self, line_no: usize) -> CommenterError {
        let range = self.hunk.map_or_else(String::new, |h| {
            format!(" (@@ -{},{} +{},{} @@)", h.old_start, h.old_len, h.new_start, h.new_len)
        });
        CommenterError::diff_parse(
            line_no,
            format!("hunk of '{}' has more lines than its header declares{}", self.path, range),
        )
    }
}
