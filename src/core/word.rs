//! Wordle word representation
//!
//! A Word is a validated, lowercased 5-letter ASCII string.

use derive_more::{Display, Error};

/// Number of letters in every word of the game
pub const WORD_LENGTH: usize = 5;

/// Number of symbols in the recognised alphabet (`a..=z`)
pub const ALPHABET_SIZE: usize = 26;

/// A 5-letter word stored as lowercase bytes
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
#[display("{text}")]
pub struct Word {
    text: String,
    chars: [u8; WORD_LENGTH],
}

/// Error type for invalid words
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum WordError {
    #[display("Word must be exactly 5 letters, got {length}")]
    InvalidLength { length: usize },
    #[display("Word must contain only ASCII letters")]
    NonAscii,
    #[display("Word contains invalid characters")]
    InvalidCharacters,
}

impl Word {
    /// Create a new Word from a string
    ///
    /// Input is trimmed and lowercased. The length is counted in characters, so
    /// a non-ASCII string of the wrong length reports `InvalidLength` first.
    ///
    /// # Errors
    /// Returns `WordError` if:
    /// - Length is not exactly 5
    /// - Contains non-ASCII characters
    /// - Contains non-alphabetic characters
    ///
    /// # Examples
    /// ```
    /// use wordle_engine::core::Word;
    ///
    /// let word = Word::new("Crane").unwrap();
    /// assert_eq!(word.text(), "crane");
    ///
    /// assert!(Word::new("too long").is_err());
    /// assert!(Word::new("sh0rt").is_err());
    /// ```
    pub fn new(text: impl AsRef<str>) -> Result<Self, WordError> {
        let text = text.as_ref().trim().to_lowercase();

        let length = text.chars().count();
        if length != WORD_LENGTH {
            return Err(WordError::InvalidLength { length });
        }

        if !text.is_ascii() {
            return Err(WordError::NonAscii);
        }

        let mut chars = [0u8; WORD_LENGTH];
        for (slot, byte) in chars.iter_mut().zip(text.bytes()) {
            if !byte.is_ascii_lowercase() {
                return Err(WordError::InvalidCharacters);
            }
            *slot = byte;
        }

        Ok(Self { text, chars })
    }

    /// Get the word as a string slice
    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the word as a byte array
    #[inline]
    #[must_use]
    pub const fn chars(&self) -> &[u8; WORD_LENGTH] {
        &self.chars
    }

    /// Occurrence count of every alphabet symbol, indexed by `letter - b'a'`
    ///
    /// Used by the scorer to budget duplicate letters.
    #[must_use]
    pub fn letter_counts(&self) -> [u8; ALPHABET_SIZE] {
        let mut counts = [0u8; ALPHABET_SIZE];
        for &ch in &self.chars {
            counts[usize::from(ch - b'a')] += 1;
        }
        counts
    }
}

/// Alphabet index of a letter, if it is in `a..=z` after lowercasing
#[inline]
#[must_use]
pub fn alphabet_index(letter: char) -> Option<usize> {
    let lower = letter.to_ascii_lowercase();
    lower
        .is_ascii_lowercase()
        .then(|| usize::from(lower as u8 - b'a'))
}
