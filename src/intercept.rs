//! Decides, per phase, whether a user send goes to the assistant.

use crate::dialogue::Dialogue;
use crate::model::DialoguePhase;

/// What to do with a user send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendDecision {
    /// Pass the text to the assistant service.
    Forward,

    /// The engine answered locally; the transcript is already updated.
    Handled,
}

/// Route one send before any network call happens.
///
/// Shift-phase input is owned by the guided subflow and tag-phase input gets
/// a scripted pointer to the tag commands. Only reframe-phase sends reach the
/// assistant.
pub fn before_send(dialogue: &mut Dialogue, text: &str) -> SendDecision {
    let decision = match dialogue.phase() {
        DialoguePhase::Shift => {
            dialogue.submit_shift_input(text);
            SendDecision::Handled
        }
        DialoguePhase::Tag => {
            dialogue.submit_tag_input(text);
            SendDecision::Handled
        }
        DialoguePhase::Reframe => SendDecision::Forward,
    };
    tracing::debug!(phase = %dialogue.phase(), ?decision, "send routed");
    decision
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::model::Role;
    use crate::prompts;

    #[test]
    fn reframe_phase_forwards() {
        let mut dialogue = Dialogue::open("challenge");
        assert_eq!(before_send(&mut dialogue, "help me"), SendDecision::Forward);
        assert_eq!(dialogue.transcript().len(), 1);
    }

    #[test]
    fn shift_phase_is_handled_locally() {
        let mut dialogue = Dialogue::open("challenge");
        dialogue.edit_reframe("I can take this one step at a time.").unwrap();
        dialogue.confirm_phase();
        let before = dialogue.transcript().len();

        let decision = before_send(
            &mut dialogue,
            "Here is what shifted for me: I went from avoiding the conversation to scheduling it for tomorrow",
        );

        assert_eq!(decision, SendDecision::Handled);
        let added = &dialogue.transcript()[before..];
        assert_eq!(added.len(), 2);
        assert_eq!(added[0].role, Role::User);
        assert!(added[1].skip_reframe);
        assert!(added[1].is_shift_suggestion);
        assert_eq!(
            dialogue.shift_box(),
            "I went from avoiding the conversation to scheduling it for tomorrow"
        );
    }

    #[test]
    fn bracketed_shift_input_gets_a_tip() {
        let mut dialogue = Dialogue::open("challenge");
        dialogue.edit_reframe("I can take this one step at a time.").unwrap();
        dialogue.confirm_phase();

        before_send(&mut dialogue, prompts::SHIFT_INPUT_TEMPLATE);

        let last = dialogue.transcript().last().unwrap();
        assert_eq!(last.content, prompts::TEMPLATE_TIP);
        assert_eq!(dialogue.shift_box(), prompts::SHIFT_PLACEHOLDER);
    }

    #[test]
    fn tag_phase_is_handled_locally() {
        let mut dialogue = Dialogue::open("challenge");
        dialogue.edit_reframe("I can take this one step at a time.").unwrap();
        dialogue.confirm_phase();
        dialogue.edit_shift("I went from tense to calm").unwrap();
        dialogue.confirm_phase();
        let before = dialogue.transcript().len();

        assert_eq!(before_send(&mut dialogue, "which tag fits?"), SendDecision::Handled);

        let added = &dialogue.transcript()[before..];
        assert_eq!(added.len(), 2);
        assert_eq!(added[0].content, "which tag fits?");
        assert_eq!(added[1].content, prompts::TAG_HINT);
        assert!(added[1].skip_reframe);
        assert_eq!(dialogue.shift_box(), "I went from tense to calm");
        assert_eq!(dialogue.tag(), None);
    }
}
