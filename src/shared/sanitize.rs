//! Input Sanitization
//!
//! All user-supplied text passes through [`sanitize`] before it is validated
//! or persisted. Sanitizing trims surrounding whitespace, truncates to a
//! character budget and then strips anything that looks like an HTML tag.
//!
//! Truncation happens before tag stripping, so the stored text can end up
//! shorter than the budget but never longer.

use once_cell::sync::Lazy;
use regex::Regex;

static TAG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^>]+>").expect("tag pattern is a valid regex"));

/// Maximum length of a post or reply author name
pub const NAME_MAX_LEN: usize = 100;

/// Maximum length of a post topic
pub const TOPIC_MAX_LEN: usize = 200;

/// Maximum length of a post or reply message body
pub const MESSAGE_MAX_LEN: usize = 1000;

/// Sanitize a piece of user text.
///
/// Returns an empty string for empty input. Lengths are counted in
/// characters, not bytes, so multi-byte text is never split mid-character.
///
/// # Example
///
/// ```rust
/// use threadboard::shared::sanitize::sanitize;
///
/// assert_eq!(sanitize("  <b>hello</b> ", 100), "hello");
/// assert_eq!(sanitize("abcdef", 3), "abc");
/// ```
pub fn sanitize(text: &str, max_length: usize) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let truncated: String = trimmed.chars().take(max_length).collect();
    TAG_PATTERN.replace_all(&truncated, "").into_owned()
}

/// Same as [`sanitize`] but accepts a missing value.
pub fn sanitize_opt(text: Option<&str>, max_length: usize) -> String {
    text.map(|t| sanitize(t, max_length)).unwrap_or_default()
}
