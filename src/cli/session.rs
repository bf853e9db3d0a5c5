//! The interactive dialogue loop behind `reframe start`.

use std::io::{self, BufRead, Write};

use jiff::Timestamp;
use uuid::Uuid;

use crate::assistant::{Assistant, HttpAssistant};
use crate::config::Config;
use crate::dialogue::DialogueError;
use crate::model::{DialoguePhase, StoredResult, Tag};
use crate::session::{SendOutcome, Session, SessionError};
use crate::storage::Storage;

use super::format::{format_message, format_status, format_tags, short_id};

const LOOP_HELP: &str = "Commands:
  /next          keep the current candidate and move on
  /back          return to the previous phase
  /edit <text>   replace the current reframe or shift by hand
  /tag <name>    choose a tag (see /tags)
  /tags          list tags
  /status        show where the dialogue stands
  /apply         save the result and finish
  /reset         start over (asks first)
  /quit          leave without saving
Anything else is sent. An empty line sends the pre-filled text, if any.";

/// One line of user input.
#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Send(&'a str),
    Next,
    Back,
    Edit(&'a str),
    Tag(&'a str),
    Tags,
    Status,
    Apply,
    Reset,
    Quit,
    Help,
    Unknown(&'a str),
}

fn parse_input(line: &str) -> Input<'_> {
    let line = line.trim();
    let Some(command) = line.strip_prefix('/') else {
        return Input::Send(line);
    };
    let (name, arg) = command
        .split_once(char::is_whitespace)
        .map_or((command, ""), |(n, a)| (n, a.trim()));
    match name {
        "next" => Input::Next,
        "back" => Input::Back,
        "edit" => Input::Edit(arg),
        "tag" => Input::Tag(arg),
        "tags" => Input::Tags,
        "status" => Input::Status,
        "apply" => Input::Apply,
        "reset" => Input::Reset,
        "quit" | "exit" => Input::Quit,
        "help" => Input::Help,
        _ => Input::Unknown(name),
    }
}

pub(super) fn cmd_start(config: &Config, storage: &Storage, challenge: &str) -> Result<(), String> {
    let assistant = HttpAssistant::new(
        &config.endpoint,
        config.training_id.clone(),
        config.model.clone(),
        config.timeout(),
    )
    .map_err(|e| format!("failed to set up assistant client: {e}"))?;
    let session = Session::with_system_prompt(challenge, assistant, config.system_prompt());

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();
    drive(session, storage, &mut input, &mut out)?;
    Ok(())
}

/// Run the loop until the user applies, quits, or input ends.
///
/// Returns the saved result's ID when the dialogue was applied.
fn drive<A: Assistant>(
    mut session: Session<A>,
    storage: &Storage,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<Option<Uuid>, String> {
    for message in session.dialogue().transcript() {
        say(out, &format_message(message))?;
    }
    hint_prefill(&session, out)?;

    loop {
        write!(out, "[{}] > ", session.dialogue().phase()).map_err(|e| e.to_string())?;
        out.flush().map_err(|e| e.to_string())?;

        let Some(line) = read_line(input)? else {
            return Ok(None);
        };

        match parse_input(&line) {
            Input::Send(text) => send(&mut session, text, out)?,
            Input::Next => next(&mut session, out)?,
            Input::Back => match session.dialogue_mut().go_back() {
                Some(phase) => {
                    say(out, &format!("Back to the {phase} phase."))?;
                    hint_prefill(&session, out)?;
                }
                None => say(out, "Already at the first phase.")?,
            },
            Input::Edit(text) => {
                let dialogue = session.dialogue_mut();
                let edited = match dialogue.phase() {
                    DialoguePhase::Reframe => dialogue.edit_reframe(text),
                    DialoguePhase::Shift => dialogue.edit_shift(text),
                    DialoguePhase::Tag => Err(DialogueError::WrongPhase {
                        expected: DialoguePhase::Shift,
                        actual: DialoguePhase::Tag,
                    }),
                };
                match edited {
                    Ok(()) => say(out, &format_status(session.dialogue()))?,
                    Err(e) => say(out, &format!("Can't edit: {e}."))?,
                }
            }
            Input::Tag(name) => match name.parse::<Tag>() {
                Ok(tag) => match session.dialogue_mut().set_tag(tag) {
                    Ok(()) => say(out, &format!("Tag: {tag}. /apply when ready."))?,
                    Err(e) => say(out, &format!("Can't set a tag: {e}."))?,
                },
                Err(e) => say(out, &format!("{e}. Choose one of:\n{}", format_tags()))?,
            },
            Input::Tags => say(out, &format_tags())?,
            Input::Status => say(out, &format_status(session.dialogue()))?,
            Input::Apply => {
                if let Some(id) = apply(&mut session, storage, out)? {
                    return Ok(Some(id));
                }
            }
            Input::Reset => {
                write!(out, "Start over? This clears the reframe, shift, and tag. [y/N] ")
                    .map_err(|e| e.to_string())?;
                out.flush().map_err(|e| e.to_string())?;
                let answer = read_line(input)?.unwrap_or_default();
                if matches!(answer.trim().to_lowercase().as_str(), "y" | "yes") {
                    session.dialogue_mut().reset();
                    for message in session.dialogue().transcript() {
                        say(out, &format_message(message))?;
                    }
                    hint_prefill(&session, out)?;
                } else {
                    say(out, "Kept going.")?;
                }
            }
            Input::Quit => return Ok(None),
            Input::Help => say(out, LOOP_HELP)?,
            Input::Unknown(name) => say(out, &format!("Unknown command /{name}. Try /help."))?,
        }
    }
}

fn send<A: Assistant>(
    session: &mut Session<A>,
    text: &str,
    out: &mut impl Write,
) -> Result<(), String> {
    let text = if text.is_empty() {
        match session.dialogue().input_seed() {
            Some(prefill) => prefill.to_string(),
            None => return Ok(()),
        }
    } else {
        text.to_string()
    };

    match session.user_send(&text) {
        Ok(SendOutcome::Ignored) => Ok(()),
        Ok(SendOutcome::Handled(message)) => {
            say(out, &format_message(&message))?;
            if message.is_shift_suggestion {
                say(out, "Type /next to keep it, or send another version.")?;
            } else {
                hint_prefill(session, out)?;
            }
            Ok(())
        }
        Ok(SendOutcome::Replied(message)) => {
            say(out, &format_message(&message))?;
            let dialogue = session.dialogue();
            if message.is_reframe_offer {
                say(
                    out,
                    &format!(
                        "Reframe: {}\nType /next to keep it, or keep chatting.",
                        dialogue.current_reframe()
                    ),
                )?;
            } else if message.is_shift_suggestion {
                say(
                    out,
                    &format!(
                        "Shift: {}\nType /next to keep it, or keep chatting.",
                        dialogue.shift_box()
                    ),
                )?;
            }
            Ok(())
        }
        Err(SessionError::Assistant(e)) => say(out, &format!("{e}. Send again to retry.")),
        Err(e) => Err(e.to_string()),
    }
}

fn next<A: Assistant>(session: &mut Session<A>, out: &mut impl Write) -> Result<(), String> {
    let dialogue = session.dialogue_mut();
    let from = dialogue.phase();
    match dialogue.confirm_phase() {
        Some(DialoguePhase::Shift) => {
            if let Some(intro) = session.dialogue().transcript().last() {
                say(out, &format_message(intro))?;
            }
            hint_prefill(session, out)
        }
        Some(DialoguePhase::Tag) => say(
            out,
            &format!(
                "Shift: {}\nChoose a tag with /tag <name>:\n{}",
                session.dialogue().shift_box(),
                format_tags()
            ),
        ),
        Some(DialoguePhase::Reframe) => Ok(()),
        None => {
            let reason = match from {
                DialoguePhase::Reframe => "No reframe yet. Keep chatting, or /edit one in.",
                DialoguePhase::Shift => {
                    "The shift statement is empty or still has [brackets]. Send it filled in."
                }
                DialoguePhase::Tag => "Last phase. Choose a tag and /apply.",
            };
            say(out, reason)
        }
    }
}

fn apply<A: Assistant>(
    session: &mut Session<A>,
    storage: &Storage,
    out: &mut impl Write,
) -> Result<Option<Uuid>, String> {
    let result = match session.dialogue_mut().try_apply() {
        Ok(result) => result,
        Err(e) => {
            say(out, &format!("Can't apply yet: {e}."))?;
            return Ok(None);
        }
    };
    let stored = StoredResult {
        id: Uuid::new_v4(),
        challenge: session.dialogue().challenge().to_string(),
        created_at: Timestamp::now(),
        result,
    };
    storage
        .save_result(&stored)
        .map_err(|e| format!("failed to save result: {e}"))?;

    say(
        out,
        &format!(
            "Saved.\nreframe: {}\nshift:   {}\ntag:     {}",
            stored.result.reframe, stored.result.shift, stored.result.tag
        ),
    )?;
    say(out, &short_id(&stored.id))?;
    Ok(Some(stored.id))
}

fn hint_prefill<A: Assistant>(session: &Session<A>, out: &mut impl Write) -> Result<(), String> {
    match session.dialogue().input_seed() {
        Some(prefill) => say(out, &format!("(Enter sends: {prefill})")),
        None => Ok(()),
    }
}

fn read_line(input: &mut impl BufRead) -> Result<Option<String>, String> {
    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .map_err(|e| format!("failed to read input: {e}"))?;
    Ok((read > 0).then_some(line))
}

fn say(out: &mut impl Write, text: &str) -> Result<(), String> {
    writeln!(out, "{text}").map_err(|e| format!("failed to write output: {e}"))
}
