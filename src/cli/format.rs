//! Output formatting for CLI display.

use std::fmt::Write;

use uuid::Uuid;

use crate::dialogue::Dialogue;
use crate::model::{ChatMessage, DialoguePhase, Role, ShiftStep, StoredResult, Tag};

/// First eight characters of an ID, the form users type back in.
pub(super) fn short_id(id: &Uuid) -> String {
    id.to_string()[..8].to_string()
}

/// Format a transcript message for the terminal.
pub(super) fn format_message(message: &ChatMessage) -> String {
    let speaker = match message.role {
        Role::User => "you",
        Role::Assistant => "coach",
    };
    format!("{speaker}: {}", message.content)
}

/// One line per tag with its helper text.
pub(super) fn format_tags() -> String {
    Tag::ALL
        .iter()
        .map(|t| format!("  {:<10} {}", t.name().to_lowercase(), t.helper()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Where the dialogue stands: phase, candidate fields, subflow progress.
pub(super) fn format_status(dialogue: &Dialogue) -> String {
    let mut out = format!("phase:   {}", dialogue.phase());
    let _ = write!(out, "\nreframe: {}", or_none(dialogue.current_reframe()));
    if dialogue.phase() >= DialoguePhase::Shift {
        let _ = write!(out, "\nshift:   {}", or_none(dialogue.shift_box()));
    }
    if dialogue.phase() == DialoguePhase::Shift {
        let step = match dialogue.shift_step() {
            ShiftStep::Template => "fill in the template",
            ShiftStep::AskFrom => "where you started",
            ShiftStep::AskTo => "where you are now",
        };
        let _ = write!(
            out,
            "\nstep:    {step} ({} bracketed attempt(s))",
            dialogue.shift_attempts()
        );
    }
    if dialogue.phase() == DialoguePhase::Tag {
        let tag = dialogue.tag().map_or("(none)", Tag::name);
        let _ = write!(out, "\ntag:     {tag}");
    }
    out
}

/// Summary line for a saved result.
pub(super) fn format_result_line(stored: &StoredResult) -> String {
    format!(
        "{}  {}  [{}]  {}",
        short_id(&stored.id),
        stored.created_at.strftime("%Y-%m-%d"),
        stored.result.tag,
        stored.challenge
    )
}

/// Full view of a saved result.
pub(super) fn format_result(stored: &StoredResult) -> String {
    let mut out = format!(
        "id:        {}\nsaved:     {}\nchallenge: {}\nreframe:   {}\nshift:     {}\ntag:       {}\n\ntranscript:",
        stored.id,
        stored.created_at,
        stored.challenge,
        stored.result.reframe,
        stored.result.shift,
        stored.result.tag,
    );
    for line in &stored.result.transcript {
        let _ = write!(out, "\n  - {line}");
    }
    out
}

fn or_none(text: &str) -> &str {
    if text.trim().is_empty() {
        "(none)"
    } else {
        text
    }
}
