//! UTF-8-safe string truncation utilities
//!
//! Title, description and alt-text windows are measured in characters, never
//! bytes, so every length check and cut in the recommendation engine goes
//! through these helpers.

/// Safely truncate a string to a maximum number of CHARACTERS (not bytes).
///
/// ```
/// # use seo_crawler::utils::string_utils::safe_truncate_chars;
/// assert_eq!(safe_truncate_chars("Hello, World!", 5), "Hello");
/// assert_eq!(safe_truncate_chars("🎉🎊🎈", 2), "🎉🎊");
/// assert_eq!(safe_truncate_chars("Hi", 100), "Hi");
/// ```
#[inline]
pub fn safe_truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        None => s,
        Some((byte_idx, _)) => &s[..byte_idx],
    }
}

/// Number of Unicode scalar values in `s`
#[inline]
#[must_use]
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Cut `s` to `keep` characters and append `...`.
///
/// Trailing whitespace left by the cut is dropped before the marker so the
/// result never reads "word ...".
#[must_use]
pub fn truncate_with_ellipsis(s: &str, keep: usize) -> String {
    let head = safe_truncate_chars(s, keep).trim_end();
    format!("{head}...")
}

/// Collapse runs of whitespace into single spaces and trim both ends
#[must_use]
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
