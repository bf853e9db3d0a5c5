//! Transcript messages.

use serde::{Deserialize, Serialize};

/// Who authored a transcript message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    User,
    Assistant,
}

/// One turn in the visible transcript.
///
/// Messages are appended in arrival order and never mutated afterward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub role: Role,

    /// Display-ready text.
    pub content: String,

    /// Scripted engine output. Never scanned by the extraction engine.
    #[serde(default)]
    pub skip_reframe: bool,

    /// The extraction engine found a reframe candidate in this message.
    #[serde(default)]
    pub is_reframe_offer: bool,

    /// The extraction engine found a shift candidate in this message.
    #[serde(default)]
    pub is_shift_suggestion: bool,
}

impl ChatMessage {
    /// A message typed by the user.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            skip_reframe: false,
            is_reframe_offer: false,
            is_shift_suggestion: false,
        }
    }

    /// A message from the assistant service.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            ..Self::user(content)
        }
    }

    /// An assistant-role message synthesized by the engine itself.
    pub fn scripted(content: impl Into<String>) -> Self {
        Self {
            skip_reframe: true,
            ..Self::assistant(content)
        }
    }
}
