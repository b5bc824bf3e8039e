//! Simple interactive CLI mode
//!
//! Line-based game loop without TUI

use crate::core::MAX_ATTEMPTS;
use crate::engine::{Game, Phase};
use crate::output::{print_board, print_game_over, print_keyboard, print_outcome, print_status};
use crate::persistence::SessionStore;
use crate::wordlists::WordSource;
use anyhow::{Context, Result};
use colored::Colorize;
use std::io::{self, Write};

/// What a line typed at the prompt asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineCommand {
    Quit,
    NewGame,
    Status,
    Help,
    Guess(String),
}

/// Interpret one input line
///
/// Anything that is not a command is taken as a guess.
#[must_use]
pub fn parse_line(input: &str) -> LineCommand {
    let input = input.trim().to_lowercase();
    match input.as_str() {
        "quit" | "q" | "exit" => LineCommand::Quit,
        "new" | "n" => LineCommand::NewGame,
        "status" | "?" => LineCommand::Status,
        "help" | "h" => LineCommand::Help,
        _ => LineCommand::Guess(input),
    }
}

/// Run the simple interactive CLI mode
///
/// Continues the saved game if there is one, otherwise starts a new one.
///
/// # Errors
///
/// Returns an error on I/O failure, if no secret can be drawn, or if the
/// session cannot be saved.
pub fn run_simple<W: WordSource, S: SessionStore>(game: &mut Game<W, S>) -> Result<()> {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                    Wordle - Interactive Mode                 ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");
    print_help();

    match game.phase() {
        Phase::Initial => game.start_game().context("Failed to start a game")?,
        Phase::Won | Phase::Lost => restart(game)?,
        Phase::Guessing | Phase::Submitting => println!("Resuming your saved game."),
    }
    print_board(game.ledger());

    loop {
        if game.phase().is_terminal() {
            print_game_over(game.phase(), game.ledger(), game.revealed_secret());
            match get_user_input("Play again? (yes/no)")?.as_deref() {
                Some("yes" | "y") => {
                    restart(game)?;
                    print_board(game.ledger());
                    continue;
                }
                _ => break,
            }
        }

        let prompt = format!("Guess {}/{MAX_ATTEMPTS}", game.ledger().len() + 1);
        let Some(line) = get_user_input(&prompt)? else {
            break;
        };

        match parse_line(&line) {
            LineCommand::Quit => break,
            LineCommand::NewGame => {
                restart(game)?;
                print_board(game.ledger());
            }
            LineCommand::Status => print_status(
                game.phase(),
                game.ledger(),
                game.availability(),
                game.revealed_secret(),
            ),
            LineCommand::Help => print_help(),
            LineCommand::Guess(word) => match game.submit_guess(&word) {
                Ok(outcome) => {
                    print_outcome(&outcome);
                    if outcome.is_accepted() {
                        print_board(game.ledger());
                        print_keyboard(game.availability());
                        game.take_delta();
                    }
                }
                Err(err) if err.is_retryable() => {
                    println!("{} {err}. Try again.", "⚠️ ".yellow());
                }
                Err(err) => return Err(err).context("Failed to record guess"),
            },
        }
    }

    println!("\n👋 Thanks for playing!\n");
    Ok(())
}

fn restart<W: WordSource, S: SessionStore>(game: &mut Game<W, S>) -> Result<()> {
    game.reset().context("Failed to reset the game")?;
    game.start_game().context("Failed to start a game")?;
    println!("\n🔄 New game started!");
    Ok(())
}

fn print_help() {
    println!("Guess the five-letter word in {MAX_ATTEMPTS} tries. After each guess:\n");
    println!("  🟩 letter is in the right spot");
    println!("  🟨 letter is in the word, elsewhere");
    println!("  ⬜ letter is not in the word\n");
    println!("Commands: 'quit' to exit, 'new' for a new game, 'status' to show the board\n");
}

/// Get user input with a prompt; `None` at end of input
fn get_user_input(prompt: &str) -> Result<Option<String>> {
    print!("{prompt}: ");
    io::stdout().flush()?;

    let mut input = String::new();
    if io::stdin().read_line(&mut input)? == 0 {
        return Ok(None);
    }
    Ok(Some(input.trim().to_lowercase()))
}
