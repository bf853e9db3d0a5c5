//! Core data model for the reframe dialogue.
//!
//! These types carry everything the engine hands across its boundary:
//! transcript messages, phases, tags, and the finalized result.

mod message;
mod phase;
mod result;
mod tag;

pub use message::{ChatMessage, Role};
pub use phase::{DialoguePhase, ShiftStep};
pub use result::{ReframeResult, StoredResult};
pub use tag::{ParseTagError, Tag};
