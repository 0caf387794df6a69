//! Text normalization for extracted page content.

use regex::Regex;
use std::sync::OnceLock;

/// Default cap on cleaned snippet length, in characters.
pub const DEFAULT_MAX_CHARS: usize = 1500;

fn newline_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n+").expect("newline regex is valid"))
}

/// Normalizes whitespace and truncates extracted text.
///
/// Collapses runs of consecutive newlines into a single newline, strips
/// leading and trailing whitespace, and hard-truncates at `max_chars`
/// characters. The cut is not word-boundary aware.
#[must_use]
pub fn clean_text(text: &str, max_chars: usize) -> String {
    let collapsed = newline_runs().replace_all(text, "\n");
    collapsed.trim().chars().take(max_chars).collect()
}

/// [`clean_text`] with the default length cap.
#[must_use]
pub fn clean_text_default(text: &str) -> String {
    clean_text(text, DEFAULT_MAX_CHARS)
}
