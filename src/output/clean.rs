//! Content cleaning for prompt-oriented exports
//!
//! Body-only content is already plain text, so it only gets its whitespace
//! collapsed, boilerplate phrases dropped and its length capped. Full-page
//! content is raw HTML and is reduced to its readable text instead, without
//! a length cap.

use crate::crawler::{document_text, Mode};
use regex::Regex;
use std::sync::LazyLock;

/// Body-only content longer than this many characters is truncated
pub const MAX_CONTENT_CHARS: usize = 8000;

const TRUNCATION_MARKER: &str = "... [Content truncated]";

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s+").expect("whitespace regex is valid") // Static pattern, safe to panic
});

static BOILERPLATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Cookie Policy|Privacy Policy|Terms of Service|Contact Us")
        .expect("boilerplate regex is valid") // Static pattern, safe to panic
});

/// Cleans page content for inclusion in an export
///
/// # Example
///
/// ```
/// use sumi_sift::crawler::Mode;
/// use sumi_sift::output::clean_content;
///
/// let text = clean_content("Read  our\nPRIVACY POLICY today", Mode::BodyOnly);
/// assert_eq!(text, "Read our  today");
/// ```
pub fn clean_content(content: &str, mode: Mode) -> String {
    match mode {
        Mode::FullPage => document_text(content),
        Mode::BodyOnly => clean_text(content),
    }
}

fn clean_text(text: &str) -> String {
    let collapsed = WHITESPACE_RUN.replace_all(text, " ");
    let filtered = BOILERPLATE.replace_all(&collapsed, "");
    truncate_chars(&filtered, MAX_CONTENT_CHARS).trim().to_string()
}

fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}{}", &text[..cut], TRUNCATION_MARKER),
        None => text.to_string(),
    }
}
