//! Wordle - CLI
//!
//! Play Wordle in a TUI, in a line-based loop, or one command at a time with
//! the session saved between invocations.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use wordle_engine::{
    commands::{new_game, reset_game, run_simple, show_status, submit_word},
    engine::Game,
    interactive::{App, run_tui},
    persistence::{JsonFileStore, MemoryStore, SessionStore},
    wordlists::WordList,
};

#[derive(Parser)]
#[command(
    name = "wordle_engine",
    about = "Guess the five-letter word in six tries",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Wordlist: 'all' (default, answers plus allowed guesses), 'answers' (answers only), or path to file
    #[arg(short = 'w', long, global = true, default_value = "all")]
    wordlist: String,

    /// Where the session is saved (default: the user's data directory)
    #[arg(short = 's', long, global = true, env = "WORDLE_STORE")]
    store: Option<PathBuf>,

    /// Keep the session in memory only; nothing is loaded or saved
    #[arg(long, global = true, conflicts_with = "store")]
    no_save: bool,

    /// Log engine events at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive TUI mode (default)
    Play,

    /// Simple CLI mode (line-based, no TUI)
    Simple,

    /// Start a new game, abandoning the saved one
    New,

    /// Submit one guess to the saved game
    Submit {
        /// The guess
        word: String,
    },

    /// Show the saved game
    Status,

    /// Clear the saved game
    Reset,
}

/// Build the word source based on the -w flag
///
/// - "all": embedded answers as secrets, full allowed list as dictionary
/// - "answers": embedded answers for both
/// - "<path>": custom list for both
fn load_word_list(mode: &str) -> Result<WordList> {
    match mode {
        "all" => Ok(WordList::embedded()),
        "answers" => Ok(WordList::answers_only()),
        path => WordList::from_file(path)
            .with_context(|| format!("Failed to load word list from {path}")),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let words = load_word_list(&cli.wordlist)?;
    debug!(
        answers = words.answer_count(),
        dictionary = words.dictionary_size(),
        "Word list loaded"
    );

    // Default to Play mode if no command given
    let command = cli.command.unwrap_or(Commands::Play);

    if cli.no_save {
        return run(command, Game::new(words, MemoryStore::new()));
    }
    let store = cli
        .store
        .map_or_else(JsonFileStore::at_default_path, JsonFileStore::new);
    debug!(path = %store.path().display(), "Session store");
    run(command, Game::resume(words, store))
}

fn run<S: SessionStore>(command: Commands, mut game: Game<WordList, S>) -> Result<ExitCode> {
    match command {
        Commands::Play => run_tui(App::new(game))?,
        Commands::Simple => run_simple(&mut game)?,
        Commands::New => new_game(&mut game)?,
        Commands::Submit { word } => {
            if !submit_word(&mut game, &word)? {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Status => show_status(&game),
        Commands::Reset => reset_game(&mut game)?,
    }
    Ok(ExitCode::SUCCESS)
}
