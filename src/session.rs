//! Session driver: a [`Dialogue`] wired to an [`Assistant`].

use crate::assistant::{Assistant, AssistantError, AssistantRequest};
use crate::dialogue::{Dialogue, DialogueError};
use crate::intercept::{SendDecision, before_send};
use crate::model::ChatMessage;
use crate::prompts;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Assistant(#[from] AssistantError),

    #[error(transparent)]
    Dialogue(#[from] DialogueError),

    #[error("the session is closed")]
    Closed,
}

pub type Result<T> = core::result::Result<T, SessionError>;

/// What happened to one user send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// Blank input. Nothing was recorded.
    Ignored,

    /// The engine answered locally with this scripted message.
    Handled(ChatMessage),

    /// The assistant answered with this message.
    Replied(ChatMessage),
}

/// One guided reframe session.
pub struct Session<A> {
    dialogue: Dialogue,
    assistant: A,
    system_prompt: String,
}

impl<A: Assistant> Session<A> {
    pub fn open(challenge: impl Into<String>, assistant: A) -> Self {
        Self::with_system_prompt(challenge, assistant, prompts::SYSTEM_PROMPT)
    }

    pub fn with_system_prompt(
        challenge: impl Into<String>,
        assistant: A,
        system_prompt: impl Into<String>,
    ) -> Self {
        let dialogue = Dialogue::open(challenge);
        tracing::debug!(challenge = dialogue.challenge(), "session opened");
        Self {
            dialogue,
            assistant,
            system_prompt: system_prompt.into(),
        }
    }

    pub fn dialogue(&self) -> &Dialogue {
        &self.dialogue
    }

    /// Mutable access for phase transitions, tags, and edits.
    pub fn dialogue_mut(&mut self) -> &mut Dialogue {
        &mut self.dialogue
    }

    /// Send one line of user text.
    ///
    /// Only reframe-phase sends call the assistant. The shift and tag phases
    /// answer locally. If the assistant call fails the dialogue is left exactly as
    /// it was, so the same text can be sent again.
    pub fn user_send(&mut self, text: &str) -> Result<SendOutcome> {
        if self.dialogue.is_closed() {
            return Err(SessionError::Closed);
        }
        let text = text.trim();
        if text.is_empty() {
            return Ok(SendOutcome::Ignored);
        }

        if before_send(&mut self.dialogue, text) == SendDecision::Handled {
            return Ok(SendOutcome::Handled(self.last_message()));
        }

        let pending = self.dialogue.begin_send(text);
        let request = AssistantRequest {
            system_prompt: &self.system_prompt,
            seed: self.dialogue.seed(),
            history: self.dialogue.transcript(),
            user_message: text,
        };
        let reply = match self.assistant.send(&request) {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(error = %e, phase = %self.dialogue.phase(), "assistant call failed");
                return Err(e.into());
            }
        };
        tracing::info!(phase = %self.dialogue.phase(), chars = reply.len(), "assistant replied");

        if !self.dialogue.complete_send(pending, &reply) {
            return Ok(SendOutcome::Ignored);
        }
        Ok(SendOutcome::Replied(self.last_message()))
    }

    fn last_message(&self) -> ChatMessage {
        self.dialogue
            .transcript()
            .last()
            .cloned()
            .unwrap_or_else(|| ChatMessage::scripted(""))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;

    use super::*;
    use crate::model::{DialoguePhase, Role, Tag};

    /// Replays canned replies and records every request it sees.
    #[derive(Default)]
    struct ScriptedAssistant {
        replies: RefCell<VecDeque<core::result::Result<String, String>>>,
        calls: RefCell<Vec<(String, usize)>>,
    }

    impl ScriptedAssistant {
        fn new(replies: &[&str]) -> Self {
            Self {
                replies: RefCell::new(replies.iter().map(|r| Ok((*r).to_string())).collect()),
                calls: RefCell::default(),
            }
        }

        fn failing(detail: &str) -> Self {
            Self {
                replies: RefCell::new(VecDeque::from([Err(detail.to_string())])),
                calls: RefCell::default(),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.borrow().len()
        }
    }

    impl Assistant for ScriptedAssistant {
        fn send(
            &self,
            request: &AssistantRequest<'_>,
        ) -> core::result::Result<String, AssistantError> {
            self.calls
                .borrow_mut()
                .push((request.user_message.to_string(), request.history.len()));
            match self.replies.borrow_mut().pop_front() {
                Some(Ok(reply)) => Ok(reply),
                Some(Err(detail)) => Err(AssistantError::Rejected(detail)),
                None => Ok(String::new()),
            }
        }
    }

    #[test]
    fn blank_input_is_ignored() {
        let assistant = ScriptedAssistant::new(&[]);
        let mut session = Session::open("challenge", &assistant);

        assert_eq!(session.user_send("   ").unwrap(), SendOutcome::Ignored);
        assert_eq!(assistant.call_count(), 0);
        assert_eq!(session.dialogue().transcript().len(), 1);
    }

    #[test]
    fn reframe_send_calls_assistant_and_records_both_turns() {
        let assistant = ScriptedAssistant::new(&[
            "Try this: \"I'm capable of handling ambiguity with curiosity.\"",
        ]);
        let mut session = Session::open("I freeze when plans change", &assistant);
        let seed = session.dialogue().seed().to_string();

        let outcome = session.user_send(&seed).unwrap();

        let SendOutcome::Replied(message) = outcome else {
            panic!("expected an assistant reply");
        };
        assert!(message.is_reframe_offer);
        assert_eq!(assistant.calls.borrow()[0], (seed, 1));
        let roles: Vec<Role> = session.dialogue().transcript().iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::Assistant, Role::User, Role::Assistant]);
        assert_eq!(
            session.dialogue().current_reframe(),
            "I'm capable of handling ambiguity with curiosity."
        );
    }

    #[test]
    fn failed_call_leaves_dialogue_untouched() {
        let assistant = ScriptedAssistant::failing("service unavailable");
        let mut session = Session::open("challenge", &assistant);
        let before = session.dialogue().transcript().to_vec();

        let err = session.user_send("help me").unwrap_err();

        assert!(matches!(
            err,
            SessionError::Assistant(AssistantError::Rejected(ref d)) if d == "service unavailable"
        ));
        assert_eq!(session.dialogue().transcript(), before.as_slice());
    }

    #[test]
    fn shift_phase_never_calls_assistant() {
        let assistant = ScriptedAssistant::new(&[
            "Here's a reframe: \"Every draft teaches me something\"",
        ]);
        let mut session = Session::open("I hate writing first drafts", &assistant);
        session.user_send("help").unwrap();
        assert_eq!(
            session.dialogue_mut().confirm_phase(),
            Some(DialoguePhase::Shift)
        );

        for text in [
            prompts::SHIFT_INPUT_TEMPLATE,
            prompts::SHIFT_INPUT_TEMPLATE,
            "dreading the blank page",
            "enjoying the mess",
        ] {
            assert!(matches!(
                session.user_send(text).unwrap(),
                SendOutcome::Handled(_)
            ));
        }

        assert_eq!(assistant.call_count(), 1);
        assert_eq!(
            session.dialogue().shift_box(),
            "I went from dreading the blank page to enjoying the mess"
        );
    }

    #[test]
    fn tag_phase_never_calls_assistant() {
        let assistant = ScriptedAssistant::new(&[
            "Try this: \"I'm capable of handling ambiguity with curiosity.\"",
        ]);
        let mut session = Session::open("I avoid hard conversations", &assistant);
        session.user_send("help").unwrap();
        session.dialogue_mut().confirm_phase();
        session
            .dialogue_mut()
            .edit_shift("I went from tense to calm")
            .unwrap();
        assert_eq!(
            session.dialogue_mut().confirm_phase(),
            Some(DialoguePhase::Tag)
        );

        for text in ["which tag?", "calm", "done", "apply", "hello?"] {
            let SendOutcome::Handled(message) = session.user_send(text).unwrap() else {
                panic!("tag-phase send should be handled locally");
            };
            assert_eq!(message.content, prompts::TAG_HINT);
        }

        assert_eq!(assistant.call_count(), 1);
        assert_eq!(session.dialogue().phase(), DialoguePhase::Tag);
        assert_eq!(session.dialogue().shift_box(), "I went from tense to calm");
    }

    #[test]
    fn full_dialogue_applies_and_closes() {
        let assistant = ScriptedAssistant::new(&[
            "Try this: \"I'm capable of handling ambiguity with curiosity.\"",
        ]);
        let mut session = Session::open("I avoid hard conversations", &assistant);
        session.user_send("help").unwrap();
        session.dialogue_mut().confirm_phase();
        session
            .user_send(
                "Here is what shifted for me: I went from avoiding the conversation to scheduling it for tomorrow",
            )
            .unwrap();
        assert_eq!(
            session.dialogue_mut().confirm_phase(),
            Some(DialoguePhase::Tag)
        );
        session.dialogue_mut().set_tag(Tag::Calm).unwrap();

        let result = session.dialogue_mut().apply();

        assert_eq!(
            result.shift,
            "I went from avoiding the conversation to scheduling it for tomorrow"
        );
        assert_eq!(result.tag, "Calm");
        assert_eq!(
            result.reframe,
            "I'm capable of handling ambiguity with curiosity."
        );
        assert!(matches!(
            session.user_send("one more thing"),
            Err(SessionError::Closed)
        ));
    }
}
