//! Normalization of extracted page text.

use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Word char, hyphen, line break, lowercase continuation.
    static ref HYPHEN_BREAK: Regex = Regex::new(
        r"(\w)-[^\S\n]*\r?\n\s*(\p{Ll})"
    ).unwrap();

    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
}

/// Rejoin words split by a hyphen at a line break ("sec-\nondary" -> "secondary").
///
/// Only continuations starting with a lowercase letter are joined, so
/// hyphenated compounds broken before a capital ("Kenya-\nUganda") survive.
pub fn dehyphenate(text: &str) -> Cow<'_, str> {
    HYPHEN_BREAK.replace_all(text, "${1}${2}")
}

/// Collapse every run of whitespace into a single space and trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").trim().to_string()
}

/// Full normalization applied before segmentation.
///
/// The result contains no line breaks, so applying it again is a no-op.
pub fn normalize_text(text: &str, dehyphenate_breaks: bool) -> String {
    if dehyphenate_breaks {
        collapse_whitespace(&dehyphenate(text))
    } else {
        collapse_whitespace(text)
    }
}
