//! Helper functions for diff parsing.

/// Ranges from a hunk header line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct HunkHeader {
    pub old_start: usize,
    pub old_len: usize,
    pub new_start: usize,
    pub new_len: usize,
}

/// Parse the file path from a "diff --git" line.
///
/// Handles various formats:
/// - "a/path/to/file b/path/to/file" (normal)
/// - "a/path/to/file b/path/to/renamed" (rename)
/// - "a/path b/path" (short paths)
/// - "\"a/tab\\there\" \"b/tab\\there\"" (C-quoted, either side independently)
///
/// Returns the "b/" path (new file path), or None if parsing fails.
pub(super) fn parse_diff_git_line(rest: &str) -> Option<String> {
    if rest.starts_with('"') {
        let (_, after_a) = unquote_c_style(rest)?;
        return parse_prefixed_path(after_a.strip_prefix(' ')?, "b/");
    }
    if rest.ends_with('"') {
        let b_pos = rest.rfind(" \"b/")?;
        return parse_prefixed_path(&rest[b_pos + 1..], "b/");
    }

    // Paths can contain spaces, so split on the last " b/".
    if let Some(b_pos) = rest.rfind(" b/") {
        let b_path = &rest[b_pos + 3..];
        if !b_path.is_empty() {
            return Some(normalize_path(b_path));
        }
    }

    let parts: Vec<&str> = rest.split_whitespace().collect();
    if parts.len() >= 2 {
        let b_part = parts[parts.len() - 1];
        if let Some(path) = b_part.strip_prefix("b/") {
            return Some(normalize_path(path));
        }
    }

    None
}

/// Parse the new path from the text after "+++ ".
///
/// Returns None for "/dev/null" and anything without the "b/" prefix.
/// Git appends a TAB to names containing a space; it is not part of the
/// path.
pub(super) fn parse_new_file_line(rest: &str) -> Option<String> {
    if rest.starts_with('"') {
        let (name, _) = unquote_c_style(rest)?;
        return name.strip_prefix("b/").map(normalize_path);
    }
    let rest = rest.strip_suffix('\t').unwrap_or(rest);
    parse_prefixed_path(rest, "b/")
}

/// Strip `prefix` from a plain or C-quoted path.
fn parse_prefixed_path(text: &str, prefix: &str) -> Option<String> {
    let name = if text.starts_with('"') {
        let (name, trailing) = unquote_c_style(text)?;
        if !trailing.is_empty() {
            return None;
        }
        name
    } else {
        text.to_string()
    };
    let path = name.strip_prefix(prefix)?;
    if path.is_empty() {
        return None;
    }
    Some(normalize_path(path))
}

/// Decode a leading C-quoted string as git writes quoted paths.
///
/// Returns the decoded string and whatever follows the closing quote.
/// Octal escapes are raw bytes, so multi-byte UTF-8 names round-trip.
pub(super) fn unquote_c_style(text: &str) -> Option<(String, &str)> {
    let body = text.strip_prefix('"')?;
    let bytes = body.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'"' => {
                let name = String::from_utf8_lossy(&decoded).into_owned();
                return Some((name, &body[i + 1..]));
            }
            b'\\' => {
                let escape = *bytes.get(i + 1)?;
                i += 2;
                let byte = match escape {
                    b'a' => 0x07,
                    b'b' => 0x08,
                    b't' => b'\t',
                    b'n' => b'\n',
                    b'v' => 0x0b,
                    b'f' => 0x0c,
                    b'r' => b'\r',
                    b'"' => b'"',
                    b'\\' => b'\\',
                    b'0'..=b'3' => {
                        let digits = bytes.get(i - 1..i + 2)?;
                        let mut value = 0u8;
                        for digit in digits {
                            if !(b'0'..=b'7').contains(digit) {
                                return None;
                            }
                            value = value * 8 + (digit - b'0');
                        }
                        i += 2;
                        value
                    }
                    _ => return None,
                };
                decoded.push(byte);
            }
            byte => {
                decoded.push(byte);
                i += 1;
            }
        }
    }

    None
}

/// Parse a hunk header line.
///
/// Format: "@@ -old_start,old_len +new_start,new_len @@" or "@@ -old_start +new_start @@"
/// Also handles: "@@ -old_start,old_len +new_start,new_len @@ context info"
///
/// Omitted lengths default to 1, as in git's output.
pub(super) fn parse_hunk_header(line: &str) -> Option<HunkHeader> {
    let line = line.strip_prefix("@@ ")?;

    let end_marker = line.find(" @@")?;
    let range_part = &line[..end_marker];

    let parts: Vec<&str> = range_part.split_whitespace().collect();
    if parts.len() != 2 {
        return None;
    }

    let (old_start, old_len) = parse_range(parts[0].strip_prefix('-')?)?;
    let (new_start, new_len) = parse_range(parts[1].strip_prefix('+')?)?;

    Some(HunkHeader {
        old_start,
        old_len,
        new_start,
        new_len,
    })
}

/// Parse "start" or "start,len" into (start, len).
fn parse_range(range: &str) -> Option<(usize, usize)> {
    match range.split_once(',') {
        Some((start, len)) => Some((start.parse().ok()?, len.parse().ok()?)),
        None => Some((range.parse().ok()?, 1)),
    }
}

/// Normalize a file path to use forward slashes.
///
/// Comment requests name files with forward slashes regardless of the
/// platform the diff was generated on.
pub(super) fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
}
