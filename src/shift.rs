//! Guided shift subflow: capture "I went from X to Y" without the assistant.
//!
//! The user first edits a bracketed template. After repeated submissions that
//! still contain the brackets, the flow escalates to two single-field
//! questions, so it always ends within four turns.

use crate::extract::{clean_shift_part, extract_shift_suggestion};
use crate::model::ShiftStep;
use crate::prompts;

/// Bracketed template submissions allowed before escalating to questions.
pub const ESCALATION_THRESHOLD: u32 = 2;

/// Whether text still holds the template's bracketed placeholders.
pub fn has_placeholders(text: &str) -> bool {
    text.contains('[') && text.contains(']')
}

/// What one submission to the subflow produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftOutcome {
    /// A new shift statement, when the submission completed one.
    pub shift: Option<String>,

    /// Scripted reply for the transcript.
    pub reply: String,
}

impl ShiftOutcome {
    fn prompt(reply: impl Into<String>) -> Self {
        Self {
            shift: None,
            reply: reply.into(),
        }
    }

    fn ready(shift: String) -> Self {
        Self {
            reply: prompts::shift_ready(&shift),
            shift: Some(shift),
        }
    }
}

/// The shift subflow, driven one submission at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShiftFlow {
    step: ShiftStep,
    attempts: u32,
    from: String,
}

impl ShiftFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> ShiftStep {
        self.step
    }

    /// Consecutive template submissions that still had brackets.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Back to the template step with no attempts recorded.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Handle one user submission.
    pub fn submit(&mut self, text: &str) -> ShiftOutcome {
        let outcome = match self.step {
            ShiftStep::Template => self.submit_template(text),
            ShiftStep::AskFrom => self.submit_from(text),
            ShiftStep::AskTo => self.submit_to(text),
        };
        tracing::debug!(
            step = ?self.step,
            attempts = self.attempts,
            completed = outcome.shift.is_some(),
            "shift submission handled"
        );
        outcome
    }

    fn submit_template(&mut self, text: &str) -> ShiftOutcome {
        if has_placeholders(text) {
            self.attempts += 1;
            if self.attempts < ESCALATION_THRESHOLD {
                return ShiftOutcome::prompt(prompts::TEMPLATE_TIP);
            }
            self.step = ShiftStep::AskFrom;
            return ShiftOutcome::prompt(prompts::ASK_FROM);
        }

        let extracted = extract_shift_suggestion(text);
        let shift = if extracted.is_empty() {
            strip_template_prefix(text).to_string()
        } else {
            extracted
        };
        if shift.is_empty() {
            return ShiftOutcome::prompt(prompts::TEMPLATE_EMPTY);
        }
        self.attempts = 0;
        ShiftOutcome::ready(shift)
    }

    fn submit_from(&mut self, text: &str) -> ShiftOutcome {
        let cleaned = clean_shift_part(text);
        let Some(from) = answer_part(
            cleaned.trim_end_matches(['.', '!', '?']).trim_end(),
            text,
        ) else {
            return ShiftOutcome::prompt(prompts::ASK_FROM);
        };
        self.from = from;
        self.step = ShiftStep::AskTo;
        ShiftOutcome::prompt(prompts::ask_to(&self.from))
    }

    fn submit_to(&mut self, text: &str) -> ShiftOutcome {
        let Some(to) = answer_part(&clean_shift_part(text), text) else {
            return ShiftOutcome::prompt(prompts::ask_to(&self.from));
        };
        let shift = format!("I went from {} to {to}", self.from);
        self.reset();
        ShiftOutcome::ready(shift)
    }
}

/// The cleaned answer, or the raw answer when cleaning left no words.
/// `None` only for a blank answer.
fn answer_part(cleaned: &str, raw: &str) -> Option<String> {
    if cleaned.chars().any(char::is_alphanumeric) {
        return Some(cleaned.to_string());
    }
    let raw = raw.trim();
    (!raw.is_empty()).then(|| raw.to_string())
}

/// Drop a leading "Here is what shifted for me:" from free-form input.
fn strip_template_prefix(text: &str) -> &str {
    let trimmed = text.trim();
    let prefix_len = prompts::SHIFT_INPUT_PREFIX.len();
    match trimmed.get(..prefix_len) {
        Some(head) if head.eq_ignore_ascii_case(prompts::SHIFT_INPUT_PREFIX) => {
            trimmed[prefix_len..].trim()
        }
        _ => trimmed,
    }
}
