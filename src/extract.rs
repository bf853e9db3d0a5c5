//! Text extraction: pull structured candidates out of assistant prose.
//!
//! Both entry points are total. They return an empty string when nothing
//! usable is found and never fail.

mod reframe;
mod shift;

use std::sync::LazyLock;

use regex::Regex;

pub use reframe::extract_reframe;
pub use shift::{clean_shift_part, extract_shift_suggestion};

/// Longest candidate handed back to the caller, in characters.
pub const MAX_CANDIDATE_CHARS: usize = 300;

static TRAILING_SHIFT_SECTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)\s*\bShift\s*[:\-].*$").expect("valid trailing shift regex")
});

/// Assistant text as it should appear in the transcript.
///
/// Drops a trailing `Shift:` section, since the shift candidate is shown
/// on its own.
pub fn display_text(text: &str) -> String {
    TRAILING_SHIFT_SECTION
        .replace(text, "")
        .trim()
        .to_string()
}

/// Characters that may wrap a candidate after normalization.
const QUOTE_CHARS: [char; 7] = ['"', '\'', '`', '\u{201C}', '\u{201D}', '\u{2018}', '\u{2019}'];

/// Strip leading separators and surrounding quotes, capitalize, and end the sentence.
fn clean_candidate(text: &str) -> String {
    let body = text
        .trim()
        .trim_start_matches(|c: char| c == ':' || c == '-' || c.is_whitespace())
        .trim_start_matches(QUOTE_CHARS)
        .trim_start()
        .trim_end_matches(QUOTE_CHARS)
        .trim();
    let mut chars = body.chars();
    let mut out = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
        None => return String::new(),
    };
    if !out.ends_with(['.', '!', '?']) {
        out.push('.');
    }
    out
}

/// Cut to at most [`MAX_CANDIDATE_CHARS`] characters.
fn truncate(text: &str) -> String {
    text.chars().take(MAX_CANDIDATE_CHARS).collect()
}
