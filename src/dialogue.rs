//! Phase state machine: reframe → shift → tag, and the finalized result.
//!
//! [`Dialogue`] is a plain value. Every operation is a method that moves it
//! from one state to the next; nothing here performs I/O. The caller owns
//! the only mutable reference, so a dialogue can be cloned, inspected, or
//! rolled back freely.

use crate::extract::{display_text, extract_reframe, extract_shift_suggestion};
use crate::model::{ChatMessage, DialoguePhase, ReframeResult, ShiftStep, Tag};
use crate::prompts;
use crate::shift::{ShiftFlow, ShiftOutcome};

/// Errors from dialogue operations the caller may legitimately attempt.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DialogueError {
    #[error("this needs the {expected} phase, but the dialogue is in the {actual} phase")]
    WrongPhase {
        expected: DialoguePhase,
        actual: DialoguePhase,
    },

    #[error("there is no shift statement yet")]
    MissingShift,

    #[error("the shift statement still has [placeholders] in it")]
    ShiftHasPlaceholders,

    #[error("no tag has been chosen")]
    MissingTag,

    #[error("the dialogue has already been applied")]
    Closed,
}

pub type Result<T> = core::result::Result<T, DialogueError>;

/// A user send that was forwarded to the assistant and has not resolved yet.
///
/// Tied to the dialogue epoch it started in, so a reply that arrives after a
/// reset is dropped instead of appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSend {
    epoch: u64,
    text: String,
}

/// The full state of one guided reframe dialogue.
#[derive(Debug, Clone)]
pub struct Dialogue {
    challenge: String,
    seed: String,
    phase: DialoguePhase,
    transcript: Vec<ChatMessage>,
    shift_flow: ShiftFlow,
    current_reframe: String,
    shift_box: String,
    tag: Option<Tag>,
    epoch: u64,
    closed: bool,
}

impl Dialogue {
    /// Start a dialogue about `challenge`.
    ///
    /// The transcript opens with one scripted message and the assistant seed
    /// quotes the challenge.
    pub fn open(challenge: impl Into<String>) -> Self {
        let challenge = challenge.into();
        Self {
            seed: prompts::seed(&challenge),
            challenge,
            phase: DialoguePhase::Reframe,
            transcript: vec![ChatMessage::scripted(prompts::OPENING)],
            shift_flow: ShiftFlow::new(),
            current_reframe: String::new(),
            shift_box: String::new(),
            tag: None,
            epoch: 0,
            closed: false,
        }
    }

    /// Replace this dialogue with a fresh one about a new challenge.
    ///
    /// Sends still pending from before are dropped when they resolve.
    pub fn reopen(&mut self, challenge: impl Into<String>) {
        let epoch = self.epoch + 1;
        *self = Self::open(challenge);
        self.epoch = epoch;
    }

    // ── Accessors ──

    pub fn challenge(&self) -> &str {
        &self.challenge
    }

    /// Context string sent with every assistant call.
    pub fn seed(&self) -> &str {
        &self.seed
    }

    pub fn phase(&self) -> DialoguePhase {
        self.phase
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn current_reframe(&self) -> &str {
        &self.current_reframe
    }

    pub fn shift_box(&self) -> &str {
        &self.shift_box
    }

    pub fn tag(&self) -> Option<Tag> {
        self.tag
    }

    pub fn shift_step(&self) -> ShiftStep {
        self.shift_flow.step()
    }

    pub fn shift_attempts(&self) -> u32 {
        self.shift_flow.attempts()
    }

    /// Bumped whenever the dialogue restarts.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Whether the result has been applied, ending the session.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Text the caller should pre-fill the input with, if any.
    ///
    /// The assistant seed before the first send, and the bracketed template
    /// while the shift subflow waits for it.
    pub fn input_seed(&self) -> Option<&str> {
        match self.phase {
            DialoguePhase::Reframe if !self.has_user_messages() => Some(&self.seed),
            DialoguePhase::Shift if self.shift_flow.step() == ShiftStep::Template => {
                Some(prompts::SHIFT_INPUT_TEMPLATE)
            }
            _ => None,
        }
    }

    fn has_user_messages(&self) -> bool {
        self.transcript
            .iter()
            .any(|m| m.role == crate::model::Role::User)
    }

    // ── Transcript ──

    /// Mark a forwarded send as in flight.
    ///
    /// Nothing is recorded until [`Dialogue::complete_send`] succeeds, so a
    /// failed assistant call leaves the dialogue as it was.
    pub fn begin_send(&self, text: impl Into<String>) -> PendingSend {
        PendingSend {
            epoch: self.epoch,
            text: text.into(),
        }
    }

    /// Record a forwarded send together with the assistant's reply.
    ///
    /// Returns `false` and records nothing when the dialogue was reset or
    /// applied while the send was in flight.
    pub fn complete_send(&mut self, pending: PendingSend, reply: &str) -> bool {
        if self.closed || pending.epoch != self.epoch {
            tracing::debug!(
                pending_epoch = pending.epoch,
                epoch = self.epoch,
                closed = self.closed,
                "dropping stale assistant reply"
            );
            return false;
        }
        self.transcript.push(ChatMessage::user(pending.text));
        self.on_assistant_reply(reply);
        true
    }

    /// Feed an assistant reply through phase-appropriate extraction and
    /// append it to the transcript.
    pub fn on_assistant_reply(&mut self, text: &str) {
        if self.closed {
            tracing::debug!("ignoring assistant reply for a closed dialogue");
            return;
        }
        let mut message = ChatMessage::assistant(display_text(text));
        match self.phase {
            DialoguePhase::Reframe => {
                let reframe = extract_reframe(text);
                if !reframe.is_empty() {
                    message.is_reframe_offer = true;
                    self.current_reframe = reframe;
                }
            }
            DialoguePhase::Shift => {
                let shift = extract_shift_suggestion(text);
                if !shift.is_empty() {
                    message.is_shift_suggestion = true;
                    self.shift_box = shift;
                }
            }
            DialoguePhase::Tag => {}
        }
        tracing::debug!(
            phase = %self.phase,
            reframe_offer = message.is_reframe_offer,
            shift_suggestion = message.is_shift_suggestion,
            "assistant reply recorded"
        );
        self.transcript.push(message);
    }

    /// Run a shift-phase send through the guided subflow.
    pub(crate) fn submit_shift_input(&mut self, text: &str) -> ShiftOutcome {
        self.transcript.push(ChatMessage::user(text));
        let outcome = self.shift_flow.submit(text);
        let mut reply = ChatMessage::scripted(outcome.reply.clone());
        if let Some(shift) = &outcome.shift {
            reply.is_shift_suggestion = true;
            self.shift_box.clone_from(shift);
        }
        self.transcript.push(reply);
        outcome
    }

    /// Answer a tag-phase send locally with a pointer to the tag commands.
    pub(crate) fn submit_tag_input(&mut self, text: &str) {
        self.transcript.push(ChatMessage::user(text));
        self.transcript.push(ChatMessage::scripted(prompts::TAG_HINT));
    }

    // ── Manual edits ──

    /// Overwrite the reframe by hand.
    pub fn edit_reframe(&mut self, text: &str) -> Result<()> {
        self.require_phase(DialoguePhase::Reframe)?;
        self.current_reframe = text.trim().to_string();
        Ok(())
    }

    /// Overwrite the shift statement by hand.
    pub fn edit_shift(&mut self, text: &str) -> Result<()> {
        self.require_phase(DialoguePhase::Shift)?;
        self.shift_box = text.trim().to_string();
        Ok(())
    }

    // ── Transitions ──

    /// Try to move one phase forward.
    ///
    /// Returns the new phase, or `None` when the current phase's guard does
    /// not hold yet.
    pub fn confirm_phase(&mut self) -> Option<DialoguePhase> {
        if self.closed {
            return None;
        }
        match self.phase.next()? {
            DialoguePhase::Shift => {
                if self.current_reframe.trim().is_empty() {
                    return None;
                }
                self.enter_shift();
                self.shift_box = prompts::SHIFT_PLACEHOLDER.to_string();
                self.transcript
                    .push(ChatMessage::scripted(prompts::SHIFT_INTRO));
            }
            DialoguePhase::Tag => {
                if !shift_is_usable(&self.shift_box) {
                    return None;
                }
                self.phase = DialoguePhase::Tag;
            }
            DialoguePhase::Reframe => return None,
        }
        tracing::debug!(phase = %self.phase, "phase confirmed");
        Some(self.phase)
    }

    /// Move one phase back. Candidate fields are kept.
    pub fn go_back(&mut self) -> Option<DialoguePhase> {
        if self.closed {
            return None;
        }
        match self.phase.previous()? {
            DialoguePhase::Shift => self.enter_shift(),
            previous => self.phase = previous,
        }
        tracing::debug!(phase = %self.phase, "went back");
        Some(self.phase)
    }

    fn enter_shift(&mut self) {
        self.phase = DialoguePhase::Shift;
        self.shift_flow.reset();
    }

    /// Choose the tag. Only valid in the tag phase.
    pub fn set_tag(&mut self, tag: Tag) -> Result<()> {
        self.require_phase(DialoguePhase::Tag)?;
        self.tag = Some(tag);
        Ok(())
    }

    /// Whether [`Dialogue::apply`] would succeed.
    pub fn can_apply(&self) -> bool {
        self.check_apply().is_ok()
    }

    /// Finalize the dialogue, or explain why it cannot be finalized yet.
    pub fn try_apply(&mut self) -> Result<ReframeResult> {
        let tag = self.check_apply()?;
        let result = ReframeResult {
            transcript: self
                .transcript
                .iter()
                .filter(|m| !m.content.trim().is_empty())
                .map(|m| m.content.clone())
                .collect(),
            shift: self.shift_box.trim().to_string(),
            tag: tag.name().to_string(),
            reframe: self.current_reframe.trim().to_string(),
        };
        self.closed = true;
        tracing::debug!(tag = %tag, "dialogue applied");
        Ok(result)
    }

    /// Finalize the dialogue and end the session.
    ///
    /// # Panics
    ///
    /// When called before the dialogue can be finalized: outside the tag
    /// phase, without a usable shift statement, without a tag, or twice.
    /// Check [`Dialogue::can_apply`] first or use [`Dialogue::try_apply`].
    pub fn apply(&mut self) -> ReframeResult {
        match self.try_apply() {
            Ok(result) => result,
            Err(e) => panic!("apply called on a dialogue that cannot be finalized: {e}"),
        }
    }

    /// Start over: clear every phase, subflow, and candidate field.
    ///
    /// The caller confirms intent before calling this. The challenge is kept
    /// and the transcript restarts with a fresh scripted message.
    pub fn reset(&mut self) {
        let epoch = self.epoch + 1;
        let challenge = std::mem::take(&mut self.challenge);
        *self = Self::open(challenge);
        self.transcript = vec![ChatMessage::scripted(prompts::RESTART)];
        self.epoch = epoch;
        tracing::debug!(epoch, "dialogue reset");
    }

    fn require_phase(&self, expected: DialoguePhase) -> Result<()> {
        if self.closed {
            return Err(DialogueError::Closed);
        }
        if self.phase != expected {
            return Err(DialogueError::WrongPhase {
                expected,
                actual: self.phase,
            });
        }
        Ok(())
    }

    fn check_apply(&self) -> Result<Tag> {
        self.require_phase(DialoguePhase::Tag)?;
        if self.shift_box.trim().is_empty() {
            return Err(DialogueError::MissingShift);
        }
        if !shift_is_usable(&self.shift_box) {
            return Err(DialogueError::ShiftHasPlaceholders);
        }
        self.tag.ok_or(DialogueError::MissingTag)
    }
}

/// A shift statement is usable once it is non-empty and bracket-free.
fn shift_is_usable(shift: &str) -> bool {
    !shift.trim().is_empty() && !shift.contains(['[', ']'])
}
