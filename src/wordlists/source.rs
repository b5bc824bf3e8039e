//! Word sources
//!
//! The engine asks a [`WordSource`] for secrets and for dictionary membership.
//! [`WordList`] is the in-process implementation backed by word vectors.

use super::loader::{load_from_file, words_from_slice};
use super::{ALLOWED, ANSWERS};
use crate::core::Word;
use derive_more::{Display, Error};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rustc_hash::FxHashSet;
use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{debug, instrument};

/// A word source could not answer
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Word source error: {} at {}:{}", message, file, line)]
pub struct SourceError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl SourceError {
    /// Creates a new source error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Supplier of secrets and dictionary lookups
///
/// An `Err` means the source could not answer. `Ok(false)` from
/// [`is_word_valid`](WordSource::is_word_valid) is a definitive "not a word".
pub trait WordSource {
    /// Draw a random secret
    ///
    /// # Errors
    /// Returns `SourceError` if no word can be produced.
    fn fetch_random_word(&self) -> Result<Word, SourceError>;

    /// Whether `word` is an accepted guess
    ///
    /// # Errors
    /// Returns `SourceError` if membership cannot be determined.
    fn is_word_valid(&self, word: &str) -> Result<bool, SourceError>;
}

impl<T: WordSource + ?Sized> WordSource for &T {
    fn fetch_random_word(&self) -> Result<Word, SourceError> {
        (**self).fetch_random_word()
    }

    fn is_word_valid(&self, word: &str) -> Result<bool, SourceError> {
        (**self).is_word_valid(word)
    }
}

impl<T: WordSource + ?Sized> WordSource for Arc<T> {
    fn fetch_random_word(&self) -> Result<Word, SourceError> {
        (**self).fetch_random_word()
    }

    fn is_word_valid(&self, word: &str) -> Result<bool, SourceError> {
        (**self).is_word_valid(word)
    }
}

impl<T: WordSource + ?Sized> WordSource for Box<T> {
    fn fetch_random_word(&self) -> Result<Word, SourceError> {
        (**self).fetch_random_word()
    }

    fn is_word_valid(&self, word: &str) -> Result<bool, SourceError> {
        (**self).is_word_valid(word)
    }
}

/// In-memory word source
///
/// Secrets come from `answers`; guesses are accepted if they appear in
/// `allowed` or `answers`.
#[derive(Debug)]
pub struct WordList {
    answers: Vec<Word>,
    allowed: FxHashSet<String>,
    rng: Mutex<StdRng>,
}

impl WordList {
    /// Build a source from explicit lists
    #[must_use]
    pub fn new(answers: Vec<Word>, allowed: &[Word]) -> Self {
        let allowed = allowed
            .iter()
            .chain(&answers)
            .map(|word| word.text().to_string())
            .collect();
        Self {
            answers,
            allowed,
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Embedded answers as secrets, the full allowed list as dictionary
    #[must_use]
    pub fn embedded() -> Self {
        Self::new(words_from_slice(ANSWERS), &words_from_slice(ALLOWED))
    }

    /// Embedded answers serve as both secrets and dictionary
    #[must_use]
    pub fn answers_only() -> Self {
        Self::new(words_from_slice(ANSWERS), &[])
    }

    /// A single custom list serves as both secrets and dictionary
    ///
    /// # Errors
    /// Returns an I/O error if the file cannot be read.
    pub fn from_file<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        Ok(Self::new(load_from_file(path)?, &[]))
    }

    /// Replace the random generator with a seeded one for reproducible secrets
    #[must_use]
    pub fn with_seed(self, seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            ..self
        }
    }

    /// Number of possible secrets
    #[must_use]
    pub fn answer_count(&self) -> usize {
        self.answers.len()
    }

    /// Number of accepted guesses
    #[must_use]
    pub fn dictionary_size(&self) -> usize {
        self.allowed.len()
    }
}

impl WordSource for WordList {
    #[instrument(skip(self))]
    fn fetch_random_word(&self) -> Result<Word, SourceError> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| SourceError::new("random generator lock poisoned"))?;
        let word = self
            .answers
            .choose(&mut *rng)
            .cloned()
            .ok_or_else(|| SourceError::new("answer list is empty"))?;
        debug!("Drew a new secret");
        Ok(word)
    }

    fn is_word_valid(&self, word: &str) -> Result<bool, SourceError> {
        Ok(self.allowed.contains(&word.trim().to_lowercase()))
    }
}
