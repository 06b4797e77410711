//! Parsed diff data model.
//!
//! A [`Diff`] is built once per `git diff` invocation and never mutated
//! afterwards; resolution only ever borrows it.

/// A line added by a diff, anchored both in the new file and in the patch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangedLine {
    /// Line number in the new file (1-based).
    pub number: usize,
    /// Position within the file's patch text. The first hunk header is
    /// position 0, so the line right below it is position 1.
    pub patch_position: usize,
}

/// The patch for a single file of a diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffPatch {
    path: String,
    changed_lines: Vec<ChangedLine>,
}

impl DiffPatch {
    /// Build a patch from its changed lines.
    ///
    /// Lines must be ordered by new-file line number, which is also patch
    /// order.
    pub fn new(path: impl Into<String>, changed_lines: Vec<ChangedLine>) -> Self {
        debug_assert!(
            changed_lines
                .windows(2)
                .all(|w| w[0].number < w[1].number && w[0].patch_position < w[1].patch_position),
            "changed lines must be strictly increasing"
        );
        Self {
            path: path.into(),
            changed_lines,
        }
    }

    /// Repository-relative file path (forward slashes).
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn changed_lines(&self) -> &[ChangedLine] {
        &self.changed_lines
    }

    /// The changed line with new-file line number `number`, if the diff
    /// touched it.
    pub fn changed_line(&self, number: usize) -> Option<&ChangedLine> {
        self.changed_lines
            .binary_search_by_key(&number, |line| line.number)
            .ok()
            .map(|index| &self.changed_lines[index])
    }
}

/// A parsed unified diff: at most one [`DiffPatch`] per path, in diff order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diff {
    patches: Vec<DiffPatch>,
}

impl Diff {
    /// Build a diff from patches with distinct paths.
    pub fn from_patches(patches: Vec<DiffPatch>) -> Self {
        Self { patches }
    }

    pub fn patches(&self) -> &[DiffPatch] {
        &self.patches
    }

    /// The patch for `path`, or `None` if this diff did not touch the file.
    pub fn patch(&self, path: &str) -> Option<&DiffPatch> {
        self.patches.iter().find(|patch| patch.path == path)
    }
}
