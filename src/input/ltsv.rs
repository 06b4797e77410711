//! LTSV (labeled tab-separated values) decoding.
//!
//! One record per line, fields separated by TAB, each field `label:value`.
//! Recognized labels are `file`, `line` and `message`; others are ignored.

use std::collections::HashMap;

use crate::comment::CommentRequest;
use crate::error::{CommenterError, Result};

/// Parse LTSV text into comment requests, one per non-empty line.
///
/// `file` and `line` must appear together; a record with neither is a
/// pull-request-level comment. `message` is always required.
pub fn parse_ltsv(input: &str) -> Result<Vec<CommentRequest>> {
    let mut comments = Vec::new();

    for (index, raw) in input.lines().enumerate() {
        let record_line = index + 1;
        let raw = raw.strip_suffix('\r').unwrap_or(raw);
        if raw.trim().is_empty() {
            continue;
        }

        let fields = parse_fields(raw, record_line)?;
        comments.push(to_request(&fields, record_line)?);
    }

    Ok(comments)
}

fn parse_fields(raw: &str, record_line: usize) -> Result<HashMap<&str, String>> {
    let mut fields = HashMap::new();
    for field in raw.split('\t') {
        if field.is_empty() {
            continue;
        }
        let (label, value) = field.split_once(':').ok_or_else(|| {
            CommenterError::InputError(format!(
                "line {}: field '{}' is not in label:value form",
                record_line, field
            ))
        })?;
        fields.insert(label, unescape(value));
    }
    Ok(fields)
}

fn to_request(fields: &HashMap<&str, String>, record_line: usize) -> Result<CommentRequest> {
    let message = fields.get("message").ok_or_else(|| {
        CommenterError::InputError(format!("line {}: missing 'message' field", record_line))
    })?;

    match (fields.get("file"), fields.get("line")) {
        (None, None) => Ok(CommentRequest::pr_comment(message.as_str())),
        (Some(file), Some(line)) => {
            let line = parse_line_number(line, record_line)?;
            if file.is_empty() {
                return Err(CommenterError::InputError(format!(
                    "line {}: 'file' must not be empty",
                    record_line
                )));
            }
            Ok(CommentRequest::line_comment(file.as_str(), line, message.as_str()))
        }
        (Some(_), None) => Err(CommenterError::InputError(format!(
            "line {}: 'file' given without 'line'",
            record_line
        ))),
        (None, Some(_)) => Err(CommenterError::InputError(format!(
            "line {}: 'line' given without 'file'",
            record_line
        ))),
    }
}

fn parse_line_number(value: &str, record_line: usize) -> Result<usize> {
    match value.trim().parse::<usize>() {
        Ok(line) if line > 0 => Ok(line),
        _ => Err(CommenterError::InputError(format!(
            "line {}: 'line' must be a positive integer, got '{}'",
            record_line, value
        ))),
    }
}

/// Undo the escaping LTSV writers apply to tabs, newlines and backslashes.
fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line_comments() {
        let input = "file:lib/a.rb\tline:10\tmessage:use guard clause\n\
                     message:second\tline:3\tfile:b.rb\n";

        let comments = parse_ltsv(input).unwrap();

        assert_eq!(
            comments,
            vec![
                CommentRequest::line_comment("lib/a.rb", 10, "use guard clause"),
                CommentRequest::line_comment("b.rb", 3, "second"),
            ]
        );
    }

    #[test]
    fn test_message_may_contain_colons() {
        let comments = parse_ltsv("file:a.rb\tline:1\tmessage:Style/Foo: bad\n").unwrap();
        assert_eq!(comments[0].message, "Style/Foo: bad");
    }

    #[test]
    fn test_record_without_target_is_pr_comment() {
        let comments = parse_ltsv("message:overall looks good\n").unwrap();
        assert_eq!(comments, vec![CommentRequest::pr_comment("overall looks good")]);
    }

    #[test]
    fn test_blank_lines_and_unknown_labels_are_ignored() {
        let input = "\nfile:a.rb\tline:2\tmessage:m\tseverity:warning\r\n\n";
        let comments = parse_ltsv(input).unwrap();
        assert_eq!(comments, vec![CommentRequest::line_comment("a.rb", 2, "m")]);
    }

    #[test]
    fn test_escaped_values() {
        let comments = parse_ltsv("file:a.rb\tline:2\tmessage:first\\nsecond\\tx\\\\y\n").unwrap();
        assert_eq!(comments[0].message, "first\nsecond\tx\\y");
    }

    #[test]
    fn test_missing_message_is_rejected() {
        let err = parse_ltsv("file:a.rb\tline:2\n").unwrap_err();
        assert!(matches!(err, CommenterError::InputError(_)));
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn test_file_without_line_is_rejected() {
        let err = parse_ltsv("message:ok\nfile:a.rb\tmessage:m\n").unwrap_err();
        assert!(err.to_string().contains("line 2"));
        assert!(err.to_string().contains("without 'line'"));
    }

    #[test]
    fn test_invalid_line_numbers_are_rejected() {
        for bad in ["0", "-1", "ten", ""] {
            let input = format!("file:a.rb\tline:{}\tmessage:m\n", bad);
            let err = parse_ltsv(&input).unwrap_err();
            assert!(
                err.to_string().contains("positive integer"),
                "accepted line '{}'",
                bad
            );
        }
    }

    #[test]
    fn test_field_without_label_is_rejected() {
        let err = parse_ltsv("file:a.rb\t10\tmessage:m\n").unwrap_err();
        assert!(err.to_string().contains("label:value"));
    }
}
