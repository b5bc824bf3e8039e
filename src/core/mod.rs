//! Core domain types for Wordle
//!
//! Pure value types and the letter scorer. Nothing here performs I/O or holds
//! session state.

mod feedback;
mod verdict;
mod word;

pub use feedback::{Feedback, score};
pub use verdict::Verdict;
pub use word::{ALPHABET_SIZE, WORD_LENGTH, Word, WordError, alphabet_index};

/// Maximum number of attempts in one game
pub const MAX_ATTEMPTS: usize = 6;
