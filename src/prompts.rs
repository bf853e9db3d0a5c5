//! Scripted copy: the system prompt, the seed, and every message the engine
//! writes into the transcript itself.

/// System prompt for the assistant service.
pub const SYSTEM_PROMPT: &str = "You are a warm, concise coach helping someone reframe a challenge \
they are facing. Offer one reframe at a time as a single first-person sentence in double quotes, \
for example: \"I'm learning how to move forward without every answer.\" Keep replies under \
120 words, ask at most one question, and never lecture. If the person describes how their view \
changed, reflect it back as \"I went from ... to ...\".";

/// First message of a freshly opened dialogue.
pub const OPENING: &str = "Hi! I see you have a challenge. I put a starter prompt in the box below. \
Feel free to edit it and hit Send.";

/// First message after the user starts over.
pub const RESTART: &str =
    "What challenge do you want to tackle today? I'll help you reframe it in a more empowering way.";

/// Posted when the dialogue enters the shift phase.
pub const SHIFT_INTRO: &str = "Perfect! Now let's capture what shifted for you. I've put a template \
in the box below. Replace the words in brackets with your own experience, for example: \
'I went from feeling overwhelmed to feeling capable.'";

/// Input seed for the shift phase.
pub const SHIFT_INPUT_TEMPLATE: &str =
    "Here is what shifted for me: I went from [where you were] to [where you are now]";

/// Placeholder shift statement shown until the user fills it in.
pub const SHIFT_PLACEHOLDER: &str = "I went from [where you were] to [where you are now]";

/// Prefix of [`SHIFT_INPUT_TEMPLATE`], stripped from free-form shift input.
pub const SHIFT_INPUT_PREFIX: &str = "here is what shifted for me:";

/// Re-offered after a template submission that still has brackets in it.
pub const TEMPLATE_TIP: &str = "It looks like the brackets are still in there. Replace \
[where you were] and [where you are now] with your own words, and remove the brackets. \
Try again with the template below.";

/// Re-offered when a template submission had nothing after the prefix.
pub const TEMPLATE_EMPTY: &str =
    "I didn't catch a shift there. Fill in the template below with where you started and where you are now.";

/// Asked once template attempts run out.
pub const ASK_FROM: &str = "If your framing of the challenge shifted, where did you start?";

/// Answer to free text typed in the tag phase.
pub const TAG_HINT: &str = "Your shift is saved. Choose a tag with /tag <name> (/tags lists them), \
then /apply to finish. Use /back to revisit the shift.";

/// Seed for the assistant conversation.
pub fn seed(challenge: &str) -> String {
    format!("I need a new perspective. Help me reframe my challenge: \"{challenge}\"")
}

/// Confirms the starting point and asks for the end point.
pub fn ask_to(from: &str) -> String {
    format!("Got it: you started from \"{from}\". Where are you now?")
}

/// Confirms a complete shift statement.
pub fn shift_ready(shift: &str) -> String {
    format!(
        "Here is your shift statement: \"{shift}\". If it looks right, confirm it and choose a tag."
    )
}
