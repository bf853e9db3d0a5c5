//! CLI interface for Reframe.
//!
//! Commands split into two groups:
//!
//! - `reframe start <challenge>`: an interactive guided dialogue on stdin.
//! - `reframe results|normalize|extract`: non-interactive, arguments in,
//!   plain text out.

mod format;
mod results;
mod session;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::Config;
use crate::extract::{extract_reframe, extract_shift_suggestion};
use crate::normalize::to_first_person;
use crate::storage::Storage;

use results::ResultsCommand;

/// Reframe: turn a challenge into a new perspective, then name the shift.
#[derive(Debug, Parser)]
#[command(name = "reframe", after_long_help = WORKFLOW_HELP)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

const WORKFLOW_HELP: &str = r#"Workflow:
  1. reframe start "I freeze whenever plans change"
     → press Enter to send the starter prompt, then chat
  2. /next once a reframe candidate looks right
  3. fill in "I went from ... to ...", then /next
  4. /tag calm, then /apply
     → prints the saved result ID (e.g. a3b0fc12)
  5. reframe results show a3b

Offline text tools:
  reframe normalize "You are doing your best"
  reframe extract reframe "Try this: \"You're learning as you go.\"""#;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start a guided reframe dialogue about a challenge.
    ///
    /// Reads lines from stdin. Plain lines are sent; lines starting with `/`
    /// are commands (`/help` lists them).
    Start {
        /// The challenge, in your own words.
        #[arg(required = true, num_args = 1..)]
        challenge: Vec<String>,
    },

    /// Browse saved results.
    Results {
        #[command(subcommand)]
        command: ResultsCommand,
    },

    /// Rewrite second-person text in first person.
    Normalize {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Run one extractor over a piece of assistant text.
    Extract {
        /// Which candidate to look for.
        #[arg(value_enum)]
        kind: ExtractKind,

        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExtractKind {
    /// A first-person reframe sentence.
    Reframe,
    /// An "I went from X to Y" statement.
    Shift,
}

/// Run the CLI, returning an error message on failure.
pub fn run(config: &Config, storage: &Storage) -> Result<(), String> {
    let cli = Cli::parse();

    match cli.command {
        Command::Start { challenge } => session::cmd_start(config, storage, &challenge.join(" ")),
        Command::Results { command } => match command {
            ResultsCommand::List => results::cmd_list(storage),
            ResultsCommand::Show { result } => results::cmd_show(storage, &result),
        },
        Command::Normalize { text } => {
            println!("{}", to_first_person(&text.join(" ")));
            Ok(())
        }
        Command::Extract { kind, text } => cmd_extract(kind, &text.join(" ")),
    }
}

fn cmd_extract(kind: ExtractKind, text: &str) -> Result<(), String> {
    let candidate = match kind {
        ExtractKind::Reframe => extract_reframe(text),
        ExtractKind::Shift => extract_shift_suggestion(text),
    };
    if candidate.is_empty() {
        eprintln!("No candidate found");
    } else {
        println!("{candidate}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn multi_word_arguments_are_collected() {
        let cli = Cli::try_parse_from(["reframe", "start", "I", "freeze", "up"]).unwrap();
        let Command::Start { challenge } = cli.command else {
            panic!("expected start");
        };
        assert_eq!(challenge.join(" "), "I freeze up");
    }

    #[test]
    fn extract_kind_parses() {
        let cli = Cli::try_parse_from(["reframe", "extract", "shift", "from a to b"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Extract {
                kind: ExtractKind::Shift,
                ..
            }
        ));
    }

    #[test]
    fn start_requires_a_challenge() {
        assert!(Cli::try_parse_from(["reframe", "start"]).is_err());
    }
}
