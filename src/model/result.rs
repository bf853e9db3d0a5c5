//! Finalized dialogue output.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What the dialogue produces once the user applies it.
///
/// Immutable once produced. The engine keeps no reference to it afterward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReframeResult {
    /// Every non-empty transcript message, in order.
    pub transcript: Vec<String>,

    /// The canonical "I went from X to Y" statement.
    pub shift: String,

    /// The chosen tag's name.
    pub tag: String,

    /// The reframed challenge, first person.
    pub reframe: String,
}

/// A result as the caller keeps it in its own store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredResult {
    pub id: Uuid,

    /// The challenge the dialogue was opened with.
    pub challenge: String,

    pub created_at: Timestamp,

    pub result: ReframeResult,
}
