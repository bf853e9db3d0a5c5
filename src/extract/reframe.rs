//! Reframe extraction: find the sentence the assistant is offering as a reframe.
//!
//! Strategies run in priority order and the first hit wins:
//! quoted spans, introductory phrases, connective patterns, then a sentence
//! scan for reframe vocabulary.

use std::sync::LazyLock;

use regex::Regex;

use super::{clean_candidate, truncate};
use crate::normalize::{straighten_quotes, to_first_person};

/// Find a reframe candidate in assistant text.
///
/// Returns the candidate in first person, cleaned and truncated, or an empty
/// string when no strategy matches.
pub fn extract_reframe(text: &str) -> String {
    let text = straighten_quotes(text);
    let found = from_quoted_span(&text)
        .or_else(|| from_introduction(&text))
        .or_else(|| from_connective(&text))
        .or_else(|| from_sentences(&text));
    match found {
        Some(candidate) => {
            tracing::debug!(candidate, "reframe candidate found");
            finish(candidate)
        }
        None => String::new(),
    }
}

fn finish(candidate: &str) -> String {
    truncate(&clean_candidate(&to_first_person(candidate)))
}

static QUOTED_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"]{15,})""#).expect("valid quoted span regex"));

static PERSON_INDICATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:I'm|I am|I feel|I see|I've|I have|I recognize|I can|I need|I want|you're|you are|you need|you have|you can)\b",
    )
    .expect("valid person indicator regex")
});

/// Quoted phrases that are suggestions of a direction rather than a reframe.
const FILLER_PHRASES: [&str; 3] = ["something else", "more hopeful", "more practical"];

/// A quoted span that reads like a statement about the user.
fn from_quoted_span(text: &str) -> Option<&str> {
    QUOTED_SPAN
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .find(|quote| {
            let lower = quote.to_lowercase();
            !quote.ends_with('?')
                && !FILLER_PHRASES.iter().any(|filler| lower.contains(filler))
                && PERSON_INDICATOR.is_match(quote)
        })
}

static INTRODUCTIONS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r#"(?i)(?:here'?s|here is)\s+(?:a\s+)?(?:quick\s+)?reframe[:\s]+"([^"]+)""#,
        r#"(?i)(?:how about|what about)\s+this(?:\s+as)?(?:\s+a)?\s*(?:fresh\s+)?reframe[:\s]+"([^"]+)""#,
        r#"(?i)(?:try\s+this|consider\s+this)[:\s]+"([^"]+)""#,
    ]
    .into_iter()
    .map(|p| Regex::new(p).expect("valid introduction regex"))
    .collect()
});

/// A quoted span announced by a fixed phrase ("here's a reframe:").
fn from_introduction(text: &str) -> Option<&str> {
    INTRODUCTIONS.iter().find_map(|pattern| {
        let quote = pattern.captures(text)?.get(1)?.as_str().trim();
        (quote.chars().count() > 10).then_some(quote)
    })
}

/// A phrasing that introduces an alternative view without quoting it.
struct Connective {
    pattern: Regex,

    /// Use the whole match rather than the clause after the connective.
    keep_whole: bool,
}

static CONNECTIVES: LazyLock<Vec<Connective>> = LazyLock::new(|| {
    [
        (
            r"(?i)instead of[^,.]*,?\s*(?:you might|try|consider|what if|perhaps)\s*([^.!?]*[.!?])",
            false,
        ),
        (
            r"(?i)rather than[^,.]*,?\s*(?:you could|try|consider|what if|perhaps)\s*([^.!?]*[.!?])",
            false,
        ),
        (r"(?i)what if (?:you|we)\s*([^.!?]*[.!?])", true),
        (r"(?i)try (?:thinking|seeing|viewing)\s*([^.!?]*[.!?])", false),
        (r"(?i)consider (?:that)?\s*([^.!?]*[.!?])", false),
        (r"(?i)perhaps\s*([^.!?]*[.!?])", false),
        (r"(?i)maybe\s*([^.!?]*[.!?])", false),
        (
            r"(?i)^I\s+(?:am|feel|see|think|believe|recognize|understand)\s*([^.!?]*[.!?])",
            true,
        ),
    ]
    .into_iter()
    .map(|(pattern, keep_whole)| Connective {
        pattern: Regex::new(pattern).expect("valid connective regex"),
        keep_whole,
    })
    .collect()
});

static LEADING_PRONOUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:I|you)\s").expect("valid leading pronoun regex"));

static LEADING_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:this\s+)?(?:reframe|this)\s*[:\-]?\s*").expect("valid label regex")
});

/// Strip a leading "reframe:" style label and one layer of stray quotes.
fn strip_label(text: &str) -> &str {
    let text = match LEADING_LABEL.find(text) {
        Some(m) => &text[m.end()..],
        None => text,
    };
    let text = text.strip_prefix(['"', '\'', '`']).unwrap_or(text);
    text.strip_suffix(['"', '\'', '`']).unwrap_or(text).trim()
}

fn from_connective(text: &str) -> Option<&str> {
    CONNECTIVES.iter().find_map(|connective| {
        let caps = connective.pattern.captures(text)?;
        let clause = caps.get(1).map_or("", |m| m.as_str());
        let candidate = if connective.keep_whole
            || clause.trim().is_empty()
            || LEADING_PRONOUN.is_match(clause)
        {
            caps.get(0)?.as_str()
        } else {
            clause
        };
        let candidate = strip_label(candidate.trim());
        (candidate.chars().count() > 10 && !candidate.ends_with('?')).then_some(candidate)
    })
}

static SENTENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^.!?]+[.!?]*").expect("valid sentence regex"));

static REFRAME_VOCABULARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:instead|rather|reframe\w*|perspectives?|opportunit(?:y|ies)|possibilit(?:y|ies)|potential|growth|learning)\b",
    )
    .expect("valid reframe vocabulary regex")
});

/// Shortest sentence the fallback scan will consider, in characters.
const MIN_SENTENCE_CHARS: usize = 20;

/// The first declarative sentence that talks in reframe vocabulary.
fn from_sentences(text: &str) -> Option<&str> {
    SENTENCE
        .find_iter(text)
        .map(|m| m.as_str().trim())
        .filter(|sentence| !sentence.ends_with('?'))
        .map(|sentence| sentence.trim_end_matches(['.', '!']).trim())
        .filter(|body| body.chars().count() >= MIN_SENTENCE_CHARS)
        .filter(|body| REFRAME_VOCABULARY.is_match(body))
        .map(strip_label)
        .find(|candidate| candidate.chars().count() > 10)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::extract::MAX_CANDIDATE_CHARS;

    #[test]
    fn quoted_span_with_first_person_wins() {
        let text = "Try this: \"I'm capable of handling ambiguity with curiosity.\"";
        assert_eq!(
            extract_reframe(text),
            "I'm capable of handling ambiguity with curiosity."
        );
    }

    #[test]
    fn quoted_questions_are_skipped() {
        let text = "You asked \"Are you sure this is the right path?\" \
                    One option: \"I'm allowed to learn as I go.\"";
        assert_eq!(extract_reframe(text), "I'm allowed to learn as I go.");
    }

    #[test]
    fn second_person_quotes_are_normalized() {
        let text = "Hold onto this: \u{201C}You\u{2019}re building capacity with every attempt\u{201D}";
        assert_eq!(
            extract_reframe(text),
            "I'm building capacity with every attempt."
        );
    }

    #[test]
    fn filler_quotes_are_skipped() {
        let text = "Would you like \"something else, since you need more options\" or a new angle?";
        assert_eq!(extract_reframe(text), "");
    }

    #[test]
    fn introduction_phrase_without_person_words() {
        let text = "Here's a reframe: \"Every draft teaches me\"";
        assert_eq!(extract_reframe(text), "Every draft teaches me.");
    }

    #[test]
    fn connective_clause_after_instead_of() {
        let text = "Instead of seeing the deadline as a threat, try treating it as a guide for your focus.";
        assert_eq!(
            extract_reframe(text),
            "Treating it as a guide for my focus."
        );
    }

    #[test]
    fn leading_first_person_clause_is_kept_whole() {
        let text = "I am choosing progress over perfection. Does that fit?";
        assert_eq!(
            extract_reframe(text),
            "I am choosing progress over perfection."
        );
    }

    #[test]
    fn sentence_fallback_finds_reframe_vocabulary() {
        let text = "Setbacks like this are a real opportunity to practice patience. How does that land?";
        assert_eq!(
            extract_reframe(text),
            "Setbacks like this are a real opportunity to practice patience."
        );
    }

    #[test]
    fn sentence_fallback_ignores_questions() {
        let text = "Is this an opportunity to practice patience with yourself?";
        assert_eq!(extract_reframe(text), "");
    }

    #[test]
    fn nothing_usable_yields_empty() {
        assert_eq!(extract_reframe("Tell me more about what happened."), "");
        assert_eq!(extract_reframe(""), "");
    }

    #[test]
    fn long_candidates_are_truncated() {
        let quote = format!("I am {}", "steady ".repeat(80));
        let text = format!("\"{quote}\"");
        assert_eq!(extract_reframe(&text).chars().count(), MAX_CANDIDATE_CHARS);
    }
}
