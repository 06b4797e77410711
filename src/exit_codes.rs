//! Exit code constants for the github-commenter CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, missing options)
//! - 2: Parse failure (comment input or diff text)
//! - 3: Git operation failure
//! - 4: GitHub API failure

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, missing or invalid options.
pub const USER_ERROR: i32 = 1;

/// Comment input or diff text could not be parsed.
pub const PARSE_FAILURE: i32 = 2;

/// Git operation failure: git missing, bad revision, not a repository.
pub const GIT_FAILURE: i32 = 3;

/// GitHub API request failed or returned an unexpected response.
pub const GITHUB_FAILURE: i32 = 4;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        let codes = [SUCCESS, USER_ERROR, PARSE_FAILURE, GIT_FAILURE, GITHUB_FAILURE];
        for (i, &a) in codes.iter().enumerate() {
            for (j, &b) in codes.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b, "Exit codes must be distinct");
                }
            }
        }
    }

    #[test]
    fn exit_codes_fit_in_a_byte() {
        for code in [SUCCESS, USER_ERROR, PARSE_FAILURE, GIT_FAILURE, GITHUB_FAILURE] {
            assert!((0..=255).contains(&code));
        }
    }
}
