//! Application entry point for word-drill.
//!
//! # Startup sequence
//!
//! 1. Parse the command line.
//! 2. Initialise logging.
//! 3. Load [`AppConfig`] and the [`WordList`] (defaults / empty on first run).
//! 4. `words …` edits the list and exits; `study` and `autoplay` build a
//!    current-thread tokio runtime and run an interactive loop over stdin
//!    lines and playback events.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};

use word_drill::{
    config::{AppConfig, AppPaths},
    playback::{PlaybackEvent, PlaybackSequencer, RunState},
    session::{AutoplaySession, StudySession},
    speech,
    words::{EditCommit, EditOutcome, WordEditor, WordList},
};

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

/// Vocabulary drill: page through your words and hear them spoken.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding settings.toml and word-list.json
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show or change the word list
    Words {
        #[command(subcommand)]
        action: WordsAction,
    },
    /// Page through the words and play them on demand
    Study {
        /// Position (1-based) of the first word shown
        #[arg(long, default_value_t = 1)]
        start: usize,
    },
    /// Announce and repeat each word hands-free
    Autoplay {
        /// Position (1-based) of the first word played
        #[arg(long, default_value_t = 1)]
        start: usize,
    },
}

#[derive(Subcommand, Debug)]
enum WordsAction {
    /// Print every word with its position
    List,
    /// Append one or more words
    Add {
        #[arg(required = true)]
        words: Vec<String>,
    },
    /// Delete the word at a position
    Remove { index: usize },
    /// Replace the word at a position (an empty word deletes it)
    Edit { index: usize, word: String },
    /// Delete every word
    Clear,
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let paths = AppPaths::resolve(cli.config.as_deref());
    let config = AppConfig::load_or_default(&paths);
    let list = WordList::load_from(&paths.word_list_file)?;

    match cli.command {
        Command::Words { action } => run_words(action, list, &config),
        Command::Study { start } => {
            let start = to_index(start)?;
            runtime()?.block_on(run_study(list.words().to_vec(), start, &config))
        }
        Command::Autoplay { start } => {
            let start = to_index(start)?;
            runtime()?.block_on(run_autoplay(list.words().to_vec(), start, &config))
        }
    }
}

fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to create tokio runtime")
}

/// Convert a 1-based position from the command line.
fn to_index(position: usize) -> Result<usize> {
    position.checked_sub(1).context("positions start at 1")
}

// ---------------------------------------------------------------------------
// words
// ---------------------------------------------------------------------------

fn run_words(action: WordsAction, mut list: WordList, config: &AppConfig) -> Result<()> {
    match action {
        WordsAction::List => {
            if list.is_empty() {
                println!("There are currently no words to learn");
            }
            for (i, word) in list.words().iter().enumerate() {
                println!("{:>3}. {word}", i + 1);
            }
            return Ok(());
        }
        WordsAction::Add { words } => {
            for word in &words {
                let index = list.add(word)?;
                println!("Added {:?} at {}", list.get(index).unwrap_or_default(), index + 1);
            }
        }
        WordsAction::Remove { index } => {
            let removed = list.remove(to_index(index)?)?;
            println!("Removed {removed:?}");
        }
        WordsAction::Edit { index, word } => {
            let mut editor = WordEditor::new(list, &config.gesture);
            editor.start_edit(to_index(index)?)?;
            editor.set_draft(word);
            match editor.commit(EditCommit::Confirm)? {
                Some(EditOutcome::Removed) => println!("Removed word {index}"),
                Some(EditOutcome::Saved) => println!("Updated word {index}"),
                _ => {}
            }
            list = editor.into_list();
        }
        WordsAction::Clear => {
            list.clear();
            println!("Deleted all words");
        }
    }
    list.save()?;
    Ok(())
}

// ---------------------------------------------------------------------------
// study
// ---------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq)]
enum StudyInput {
    TogglePlayback,
    Next,
    Previous,
    GoTo(usize),
    Quit,
    Unknown,
}

fn parse_study_input(line: &str) -> StudyInput {
    let mut parts = line.split_whitespace();
    match (parts.next(), parts.next()) {
        (None, _) | (Some("play"), None) => StudyInput::TogglePlayback,
        (Some("n"), None) => StudyInput::Next,
        (Some("p"), None) => StudyInput::Previous,
        (Some("q"), None) => StudyInput::Quit,
        (Some("go"), Some(n)) => match n.parse::<usize>() {
            Ok(position) if position > 0 => StudyInput::GoTo(position - 1),
            _ => StudyInput::Unknown,
        },
        _ => StudyInput::Unknown,
    }
}

fn print_study(session: &StudySession) {
    let word = session.current_word().unwrap_or_default();
    println!("[{}] {word}", session.position_label());
}

async fn run_study(words: Vec<String>, start: usize, config: &AppConfig) -> Result<()> {
    if words.is_empty() {
        println!("There are currently no words to learn");
        return Ok(());
    }

    let (sequencer, mut events) =
        PlaybackSequencer::new(speech::from_config(&config.speech), config.playback.clone());
    let mut session = StudySession::new(words, start, &config.gesture, sequencer);

    if !session.is_playback_supported() {
        println!("Audio playback is not available on this system");
    }
    println!("Enter: play/stop   n: next   p: previous   go N: jump   q: quit");
    print_study(&session);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read input")? else {
                    break;
                };
                match parse_study_input(&line) {
                    StudyInput::TogglePlayback => {
                        if session.toggle_playback().is_none() {
                            println!("Stopped");
                        }
                    }
                    StudyInput::Next => {
                        session.next();
                        print_study(&session);
                    }
                    StudyInput::Previous => {
                        session.previous();
                        print_study(&session);
                    }
                    StudyInput::GoTo(index) => {
                        session.go_to(index);
                        print_study(&session);
                    }
                    StudyInput::Quit => break,
                    StudyInput::Unknown => {
                        println!("Enter: play/stop   n: next   p: previous   go N: jump   q: quit");
                    }
                }
            }
            Some(event) = events.recv() => {
                if let PlaybackEvent::Finished { state: RunState::Failed, .. } = event {
                    println!("Could not play the word");
                }
            }
        }
    }

    session.stop();
    Ok(())
}

// ---------------------------------------------------------------------------
// autoplay
// ---------------------------------------------------------------------------

fn print_autoplay(session: &AutoplaySession) {
    let word = session.current_word().unwrap_or_default();
    println!("Word {} of {}: {word}", session.index() + 1, session.len());
}

fn print_actions(session: &AutoplaySession) {
    let mut actions = vec!["r: repeat"];
    if session.can_go_previous() {
        actions.push("p: previous");
    }
    if session.can_go_next() {
        actions.push("n: next");
    }
    actions.push("q: quit");
    println!("{}", actions.join("   "));
}

async fn run_autoplay(words: Vec<String>, start: usize, config: &AppConfig) -> Result<()> {
    if words.is_empty() {
        println!("There are currently no words to learn");
        return Ok(());
    }

    let (sequencer, mut events) =
        PlaybackSequencer::new(speech::from_config(&config.speech), config.playback.clone());
    if !sequencer.is_supported() {
        println!("Audio playback is not available on this system");
    }
    let mut session = AutoplaySession::new(words, start, sequencer);

    session.start();
    print_autoplay(&session);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read input")? else {
                    break;
                };
                let moved = match line.trim() {
                    "r" => session.repeat(),
                    "p" => session.previous(),
                    "n" => session.next(),
                    "q" => break,
                    "" => continue,
                    _ => {
                        print_actions(&session);
                        continue;
                    }
                };
                match moved {
                    Some(_) => print_autoplay(&session),
                    None => println!("No word in that direction"),
                }
            }
            Some(event) = events.recv() => {
                if let PlaybackEvent::Finished { state: RunState::Failed, .. } = event {
                    println!("Playback failed");
                }
                if session.handle_event(&event) {
                    print_actions(&session);
                }
            }
        }
    }

    session.stop();
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn study_input_parsing() {
        assert_eq!(parse_study_input(""), StudyInput::TogglePlayback);
        assert_eq!(parse_study_input(" play "), StudyInput::TogglePlayback);
        assert_eq!(parse_study_input("n"), StudyInput::Next);
        assert_eq!(parse_study_input("p"), StudyInput::Previous);
        assert_eq!(parse_study_input("go 3"), StudyInput::GoTo(2));
        assert_eq!(parse_study_input("go 0"), StudyInput::Unknown);
        assert_eq!(parse_study_input("go x"), StudyInput::Unknown);
        assert_eq!(parse_study_input("q"), StudyInput::Quit);
        assert_eq!(parse_study_input("next please"), StudyInput::Unknown);
    }

    #[test]
    fn positions_are_one_based() {
        assert_eq!(to_index(1).unwrap(), 0);
        assert!(to_index(0).is_err());
    }

    #[test]
    fn cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["word-drill", "--config", "/tmp/wd", "study", "--start", "3"])
            .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/wd")));
        assert!(matches!(cli.command, Command::Study { start: 3 }));

        let cli = Cli::try_parse_from(["word-drill", "words", "edit", "2", "水"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Words { action: WordsAction::Edit { index: 2, .. } }
        ));

        assert!(Cli::try_parse_from(["word-drill", "words", "add"]).is_err());
    }
}
