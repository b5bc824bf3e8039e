//! One-shot commands
//!
//! Each command resumes the saved session, performs a single action and
//! leaves the session saved for the next invocation.

use crate::engine::{Game, Phase};
use crate::output::{print_board, print_game_over, print_keyboard, print_outcome, print_status};
use crate::persistence::SessionStore;
use crate::wordlists::WordSource;
use anyhow::{Context, Result};

/// Start a fresh game, abandoning any game in progress
///
/// # Errors
///
/// Returns an error if no secret can be drawn or the session cannot be saved.
pub fn new_game<W: WordSource, S: SessionStore>(game: &mut Game<W, S>) -> Result<()> {
    if game.phase() != Phase::Initial {
        game.reset().context("Failed to reset the game")?;
    }
    game.start_game().context("Failed to start a game")?;
    println!("🔄 New game started! Guess with `submit WORD`.");
    print_board(game.ledger());
    Ok(())
}

/// Submit one guess
///
/// Returns whether the guess was accepted.
///
/// # Errors
///
/// Returns an error if the dictionary cannot be consulted or the session
/// cannot be saved.
pub fn submit_word<W: WordSource, S: SessionStore>(
    game: &mut Game<W, S>,
    word: &str,
) -> Result<bool> {
    let outcome = game
        .submit_guess(word)
        .with_context(|| format!("Failed to submit '{word}'"))?;
    print_outcome(&outcome);
    if !outcome.is_accepted() {
        return Ok(false);
    }

    print_board(game.ledger());
    if game.phase().is_terminal() {
        print_game_over(game.phase(), game.ledger(), game.revealed_secret());
    } else {
        print_keyboard(game.availability());
    }
    Ok(true)
}

/// Show the saved game
pub fn show_status<W: WordSource, S: SessionStore>(game: &Game<W, S>) {
    print_status(
        game.phase(),
        game.ledger(),
        game.availability(),
        game.revealed_secret(),
    );
}

/// Clear the saved game
///
/// # Errors
///
/// Returns an error if the session cannot be saved.
pub fn reset_game<W: WordSource, S: SessionStore>(game: &mut Game<W, S>) -> Result<()> {
    game.reset().context("Failed to reset the game")?;
    println!("Game cleared. Run `new` to start another.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Word;
    use crate::persistence::MemoryStore;
    use crate::wordlists::WordList;

    fn game() -> Game<WordList, MemoryStore> {
        let answers = vec![Word::new("crane").unwrap()];
        let allowed = [Word::new("slate").unwrap()];
        Game::new(WordList::new(answers, &allowed), MemoryStore::new())
    }

    #[test]
    fn submit_reports_acceptance() {
        let mut game = game();
        assert!(!submit_word(&mut game, "crane").unwrap());

        new_game(&mut game).unwrap();
        assert!(!submit_word(&mut game, "zzzzz").unwrap());
        assert!(submit_word(&mut game, "slate").unwrap());
        assert!(submit_word(&mut game, "crane").unwrap());
        assert_eq!(game.phase(), Phase::Won);
        assert!(!submit_word(&mut game, "crane").unwrap());
    }

    #[test]
    fn new_game_replaces_finished_game() {
        let mut game = game();
        new_game(&mut game).unwrap();
        submit_word(&mut game, "crane").unwrap();

        new_game(&mut game).unwrap();
        assert_eq!(game.phase(), Phase::Guessing);
        assert!(game.ledger().is_empty());
    }

    #[test]
    fn reset_returns_to_initial() {
        let mut game = game();
        new_game(&mut game).unwrap();
        reset_game(&mut game).unwrap();
        show_status(&game);
        assert_eq!(game.phase(), Phase::Initial);
    }
}
