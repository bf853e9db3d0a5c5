//! Dialogue phases and the guided shift steps nested inside them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Top-level phase of the dialogue.
///
/// Strictly ordered: `Reframe` → `Shift` → `Tag`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DialoguePhase {
    /// Working with the assistant toward a reframed statement.
    #[default]
    Reframe,

    /// Capturing the "I went from X to Y" statement.
    Shift,

    /// Choosing a tag. Terminal until the result is applied.
    Tag,
}

impl DialoguePhase {
    /// The phase a confirmation moves to, if any.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Reframe => Some(Self::Shift),
            Self::Shift => Some(Self::Tag),
            Self::Tag => None,
        }
    }

    /// The phase a back operation moves to, if any.
    pub fn previous(self) -> Option<Self> {
        match self {
            Self::Reframe => None,
            Self::Shift => Some(Self::Reframe),
            Self::Tag => Some(Self::Shift),
        }
    }
}

impl fmt::Display for DialoguePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Reframe => "reframe",
            Self::Shift => "shift",
            Self::Tag => "tag",
        })
    }
}

/// Where the guided shift subflow stands.
///
/// Only meaningful while the dialogue is in [`DialoguePhase::Shift`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShiftStep {
    /// The user edits the bracketed template directly.
    #[default]
    Template,

    /// Asking where the user started.
    AskFrom,

    /// Asking where the user is now.
    AskTo,
}
