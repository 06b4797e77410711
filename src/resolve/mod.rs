//! Mapping comment requests onto diff patch positions.
//!
//! The resolver never runs git: callers hand it an already-parsed
//! [`Diff`]. The same functions answer two questions against two diffs:
//! whether a comment applies to a revision range, and where it attaches
//! in the pull request's patch.
//!
//! A request that does not land on a changed line is not an error; it
//! resolves to `None` and the comment is dropped.

use crate::comment::CommentRequest;
use crate::diff::Diff;


/// The patch position of the changed line `request` targets.
///
/// Requires an exact match: the request's file must have a patch in
/// `diff` and its line must be a line that patch added. Returns `None`
/// for file-less requests, untouched files, and unchanged lines.
pub fn resolve_position(diff: &Diff, request: &CommentRequest) -> Option<usize> {
    let file = request.file.as_deref()?;
    let line = request.line?;

    diff.patch(file)?
        .changed_line(line)
        .map(|changed| changed.patch_position)
}

/// Keep the requests that resolve against `diff`, in input order.
///
/// Pull-request-level requests (no `file`) are always dropped: posting
/// them is not supported yet.
pub fn filter_applicable(diff: &Diff, requests: Vec<CommentRequest>) -> Vec<CommentRequest> {
    requests
        .into_iter()
        .filter(|request| {
            if request.file.is_none() {
                log::debug!("skipping pull request comment: not supported yet");
                return false;
            }
            let applicable = resolve_position(diff, request).is_some();
            if !applicable {
                log::debug!("{} is not changed by this diff", request.location());
            }
            applicable
        })
        .collect()
}
