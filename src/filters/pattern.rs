//! Regex matcher construction.
//!
//! The matcher is always compiled with `multi_line(true)` so that `^` and
//! `$` anchor at line boundaries; what distinguishes multiline *search* is
//! whether `.` may cross `\n` and whether the searcher hands whole-file
//! windows to the regex engine.

use grep::regex::{RegexMatcher, RegexMatcherBuilder};

use crate::error::SearchError;

/// Build the content matcher for a request.
///
/// # Errors
///
/// `InvalidPattern` when the pattern does not compile.
pub(crate) fn build_matcher(
    pattern: &str,
    case_insensitive: bool,
    literal: bool,
    multiline: bool,
) -> Result<RegexMatcher, SearchError> {
    let mut builder = RegexMatcherBuilder::new();
    builder
        .multi_line(true)
        .case_insensitive(case_insensitive)
        .fixed_strings(literal);
    if multiline {
        builder.dot_matches_new_line(true);
    } else {
        builder
            .line_terminator(Some(b'\n'))
            .dot_matches_new_line(false);
    }
    // Pairs with the searcher's NUL-based binary detection.
    builder.ban_byte(Some(b'\x00'));
    builder
        .build(pattern)
        .map_err(|err| SearchError::InvalidPattern(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use grep::matcher::Matcher;

    #[test]
    fn case_sensitivity_is_configurable() {
        let sensitive = build_matcher("error", false, false, false).unwrap();
        assert!(sensitive.is_match(b"an error occurred").unwrap());
        assert!(!sensitive.is_match(b"ERROR: boom").unwrap());

        let insensitive = build_matcher("error", true, false, false).unwrap();
        assert!(insensitive.is_match(b"ERROR: boom").unwrap());
    }

    #[test]
    fn literal_mode_escapes_metacharacters() {
        let literal = build_matcher("a.b(c)", false, true, false).unwrap();
        assert!(literal.is_match(b"x a.b(c) y").unwrap());
        assert!(!literal.is_match(b"aXb(c)").unwrap());
    }

    #[test]
    fn dot_crosses_newlines_only_in_multiline_mode() {
        let single = build_matcher("struct.*\\{", false, false, false).unwrap();
        assert!(!single.is_match(b"struct Config\n{").unwrap());

        let multi = build_matcher("struct.*\\{", false, false, true).unwrap();
        assert!(multi.is_match(b"struct Config\n{").unwrap());
    }

    #[test]
    fn malformed_pattern_reports_invalid_pattern() {
        let err = build_matcher("[invalid regex", false, false, false).unwrap_err();
        assert!(matches!(err, SearchError::InvalidPattern(_)));
    }
}
