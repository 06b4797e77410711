//! Comment requests: what to say, and where in the current files to say it.

/// A request to comment on a pull request.
///
/// `line` is a line number in the current working-tree file, not a
/// position in any diff. A request without a `file` targets the pull
/// request as a whole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentRequest {
    pub file: Option<String>,
    pub line: Option<usize>,
    pub message: String,
}

impl CommentRequest {
    /// A comment on line `line` (1-based) of `file`.
    pub fn line_comment(file: impl Into<String>, line: usize, message: impl Into<String>) -> Self {
        Self {
            file: Some(file.into()),
            line: Some(line),
            message: message.into(),
        }
    }

    /// A comment on the pull request itself.
    pub fn pr_comment(message: impl Into<String>) -> Self {
        Self {
            file: None,
            line: None,
            message: message.into(),
        }
    }

    /// `file:line`, or `(pull request)` for file-less requests.
    pub fn location(&self) -> String {
        match (&self.file, self.line) {
            (Some(file), Some(line)) => format!("{}:{}", file, line),
            (Some(file), None) => file.clone(),
            (None, _) => "(pull request)".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location() {
        assert_eq!(
            CommentRequest::line_comment("lib/a.rb", 10, "x").location(),
            "lib/a.rb:10"
        );
        assert_eq!(CommentRequest::pr_comment("x").location(), "(pull request)");
    }
}
