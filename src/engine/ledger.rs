//! Guess ledger
//!
//! Ordered record of committed attempts plus the draft being typed. The
//! cursor is `(attempt index, position)`: the attempt index equals the number
//! of committed attempts and the position is the next cell to fill.

use crate::core::{Feedback, MAX_ATTEMPTS, Verdict, WORD_LENGTH, Word, alphabet_index};
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};

/// One letter of an attempt and its verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessCell {
    pub letter: char,
    pub verdict: Verdict,
}

/// A committed, scored attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    word: Word,
    feedback: Feedback,
}

impl Attempt {
    #[must_use]
    pub const fn new(word: Word, feedback: Feedback) -> Self {
        Self { word, feedback }
    }

    #[must_use]
    pub const fn word(&self) -> &Word {
        &self.word
    }

    #[must_use]
    pub const fn feedback(&self) -> &Feedback {
        &self.feedback
    }

    /// The attempt as `(letter, verdict)` cells
    pub fn cells(&self) -> impl Iterator<Item = GuessCell> + '_ {
        self.word
            .chars()
            .iter()
            .zip(self.feedback.verdicts())
            .map(|(&letter, &verdict)| GuessCell {
                letter: char::from(letter),
                verdict,
            })
    }
}

/// Input position inside the active attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub attempt: usize,
    pub position: usize,
}

/// Ledger misuse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum LedgerError {
    #[display("no attempts left")]
    CapacityExceeded,
    #[display("no attempt is open for input")]
    NoOpenAttempt,
    #[display("'{letter}' is not a letter")]
    NotALetter { letter: char },
    #[display("saved ledger is inconsistent: {reason}")]
    Corrupt { reason: &'static str },
}

/// Serializable form of the ledger
///
/// `draft` holds the typed letters of the open attempt, `None` for empty cells.
/// It is absent when no attempt is open (before the first attempt or after the
/// game ended).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub attempts: Vec<Vec<GuessCell>>,
    #[serde(default)]
    pub draft: Option<Vec<Option<char>>>,
}

/// Attempts of one game, at most [`MAX_ATTEMPTS`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    attempts: Vec<Attempt>,
    draft: Option<[Option<char>; WORD_LENGTH]>,
}

impl Ledger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open an empty draft for the next attempt
    ///
    /// Reopening while a draft is open discards its letters.
    ///
    /// # Errors
    /// `CapacityExceeded` when every attempt is already committed.
    pub fn begin_attempt(&mut self) -> Result<(), LedgerError> {
        if self.attempts.len() >= MAX_ATTEMPTS {
            return Err(LedgerError::CapacityExceeded);
        }
        self.draft = Some([None; WORD_LENGTH]);
        Ok(())
    }

    /// Type a letter at the cursor and advance it
    ///
    /// Returns `false` when the draft is already full; nothing is overwritten.
    ///
    /// # Errors
    /// `NoOpenAttempt` without an open draft, `NotALetter` for symbols outside
    /// `a..=z`.
    pub fn set_letter_at_cursor(&mut self, letter: char) -> Result<bool, LedgerError> {
        if alphabet_index(letter).is_none() {
            return Err(LedgerError::NotALetter { letter });
        }
        let position = self.cursor().position;
        let draft = self.draft.as_mut().ok_or(LedgerError::NoOpenAttempt)?;
        match draft.get_mut(position) {
            Some(cell) => {
                *cell = Some(letter.to_ascii_lowercase());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Clear the cell before the cursor and move back onto it
    ///
    /// Returns the removed letter, `None` when the cursor is already at 0.
    ///
    /// # Errors
    /// `NoOpenAttempt` without an open draft.
    pub fn backspace_at_cursor(&mut self) -> Result<Option<char>, LedgerError> {
        let position = self.cursor().position;
        let draft = self.draft.as_mut().ok_or(LedgerError::NoOpenAttempt)?;
        Ok(position
            .checked_sub(1)
            .and_then(|previous| draft[previous].take()))
    }

    /// Append a scored attempt and close the draft
    ///
    /// # Errors
    /// `CapacityExceeded` when every attempt is already committed.
    pub fn commit_attempt(&mut self, word: Word, feedback: Feedback) -> Result<(), LedgerError> {
        if self.attempts.len() >= MAX_ATTEMPTS {
            return Err(LedgerError::CapacityExceeded);
        }
        self.attempts.push(Attempt::new(word, feedback));
        self.draft = None;
        Ok(())
    }

    /// Current cursor
    ///
    /// The position is the first empty cell of the draft, `WORD_LENGTH` when it
    /// is full, and 0 when no draft is open.
    #[must_use]
    pub fn cursor(&self) -> Cursor {
        let position = self.draft.map_or(0, |draft| {
            draft
                .iter()
                .position(Option::is_none)
                .unwrap_or(WORD_LENGTH)
        });
        Cursor {
            attempt: self.attempts.len(),
            position,
        }
    }

    #[must_use]
    pub fn attempts(&self) -> &[Attempt] {
        &self.attempts
    }

    #[must_use]
    pub fn last(&self) -> Option<&Attempt> {
        self.attempts.last()
    }

    /// Number of committed attempts
    #[must_use]
    pub fn len(&self) -> usize {
        self.attempts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attempts.is_empty()
    }

    /// Whether every attempt has been used
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.attempts.len() >= MAX_ATTEMPTS
    }

    #[must_use]
    pub const fn has_open_attempt(&self) -> bool {
        self.draft.is_some()
    }

    /// Draft cells, `None` for empty ones
    #[must_use]
    pub fn draft(&self) -> Option<&[Option<char>; WORD_LENGTH]> {
        self.draft.as_ref()
    }

    /// The typed letters up to the first gap
    #[must_use]
    pub fn draft_text(&self) -> String {
        self.draft
            .iter()
            .flatten()
            .map_while(|cell| *cell)
            .collect()
    }

    /// The draft as a word, once every cell is filled
    #[must_use]
    pub fn draft_word(&self) -> Option<Word> {
        let draft = self.draft?;
        let letters: String = draft.iter().copied().collect::<Option<_>>()?;
        Word::new(letters).ok()
    }

    /// Every committed cell, oldest attempt first
    pub fn committed_cells(&self) -> impl Iterator<Item = GuessCell> + '_ {
        self.attempts.iter().flat_map(|attempt| attempt.cells())
    }

    #[must_use]
    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            attempts: self
                .attempts
                .iter()
                .map(|attempt| attempt.cells().collect())
                .collect(),
            draft: self.draft.map(|draft| draft.to_vec()),
        }
    }

    /// Rebuild a ledger from its saved form, re-scoring against `secret`
    ///
    /// Every committed attempt must be a full word whose recorded verdicts match
    /// a fresh score; a draft must have exactly `WORD_LENGTH` cells of letters
    /// and may only exist while attempts remain. The cursor is derived, never
    /// stored.
    ///
    /// # Errors
    /// `Corrupt` describing the first inconsistency found.
    pub fn restore(saved: &LedgerSnapshot, secret: &Word) -> Result<Self, LedgerError> {
        if saved.attempts.len() > MAX_ATTEMPTS {
            return Err(LedgerError::Corrupt {
                reason: "too many attempts",
            });
        }

        let mut attempts = Vec::with_capacity(saved.attempts.len());
        for cells in &saved.attempts {
            if cells.len() != WORD_LENGTH {
                return Err(LedgerError::Corrupt {
                    reason: "attempt has the wrong number of cells",
                });
            }
            let text: String = cells.iter().map(|cell| cell.letter).collect();
            let word = Word::new(&text).map_err(|_| LedgerError::Corrupt {
                reason: "attempt is not a word",
            })?;
            let feedback = Feedback::calculate(&word, secret);
            let recorded = cells.iter().map(|cell| cell.verdict);
            if !recorded.eq(feedback.verdicts().iter().copied()) {
                return Err(LedgerError::Corrupt {
                    reason: "verdicts do not match the secret",
                });
            }
            attempts.push(Attempt::new(word, feedback));
        }

        let draft = match &saved.draft {
            None => None,
            Some(_) if attempts.len() >= MAX_ATTEMPTS => {
                return Err(LedgerError::Corrupt {
                    reason: "draft open after the last attempt",
                });
            }
            Some(cells) => {
                let cells: [Option<char>; WORD_LENGTH] =
                    cells.as_slice().try_into().map_err(|_| LedgerError::Corrupt {
                        reason: "draft has the wrong number of cells",
                    })?;
                if cells.iter().flatten().any(|&c| !c.is_ascii_lowercase()) {
                    return Err(LedgerError::Corrupt {
                        reason: "draft holds a non-letter",
                    });
                }
                Some(cells)
            }
        };

        Ok(Self { attempts, draft })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(text: &str) -> Word {
        Word::new(text).unwrap()
    }

    fn commit(ledger: &mut Ledger, guess: &str, secret: &str) {
        let guess = word(guess);
        let feedback = Feedback::calculate(&guess, &word(secret));
        ledger.commit_attempt(guess, feedback).unwrap();
    }

    fn type_word(ledger: &mut Ledger, text: &str) {
        for letter in text.chars() {
            ledger.set_letter_at_cursor(letter).unwrap();
        }
    }

    #[test]
    fn typing_moves_cursor_until_full() {
        let mut ledger = Ledger::new();
        ledger.begin_attempt().unwrap();
        assert_eq!(ledger.cursor(), Cursor { attempt: 0, position: 0 });

        type_word(&mut ledger, "CRA");
        assert_eq!(ledger.cursor().position, 3);
        assert_eq!(ledger.draft_text(), "cra");

        type_word(&mut ledger, "ne");
        assert_eq!(ledger.cursor().position, WORD_LENGTH);
        assert_eq!(ledger.set_letter_at_cursor('x'), Ok(false));
        assert_eq!(ledger.draft_text(), "crane");
        assert_eq!(ledger.draft_word(), Some(word("crane")));
    }

    #[test]
    fn partial_draft_is_not_a_word() {
        let mut ledger = Ledger::new();
        assert_eq!(ledger.draft_word(), None);
        ledger.begin_attempt().unwrap();
        type_word(&mut ledger, "cra");
        assert_eq!(ledger.draft_word(), None);
    }

    #[test]
    fn backspace_clears_previous_cell() {
        let mut ledger = Ledger::new();
        ledger.begin_attempt().unwrap();
        assert_eq!(ledger.backspace_at_cursor(), Ok(None));

        type_word(&mut ledger, "ab");
        assert_eq!(ledger.backspace_at_cursor(), Ok(Some('b')));
        assert_eq!(ledger.cursor().position, 1);
        assert_eq!(ledger.draft_text(), "a");
    }

    #[test]
    fn input_requires_open_attempt_and_letters() {
        let mut ledger = Ledger::new();
        assert_eq!(
            ledger.set_letter_at_cursor('a'),
            Err(LedgerError::NoOpenAttempt)
        );
        assert_eq!(ledger.backspace_at_cursor(), Err(LedgerError::NoOpenAttempt));

        ledger.begin_attempt().unwrap();
        assert_eq!(
            ledger.set_letter_at_cursor('7'),
            Err(LedgerError::NotALetter { letter: '7' })
        );
    }

    #[test]
    fn commit_advances_attempt_and_resets_cursor() {
        let mut ledger = Ledger::new();
        ledger.begin_attempt().unwrap();
        type_word(&mut ledger, "tra");
        commit(&mut ledger, "trace", "crane");

        assert_eq!(ledger.len(), 1);
        assert!(!ledger.has_open_attempt());
        assert_eq!(ledger.cursor(), Cursor { attempt: 1, position: 0 });
        assert_eq!(ledger.last().unwrap().word().text(), "trace");
    }

    #[test]
    fn capacity_is_bounded() {
        let mut ledger = Ledger::new();
        for _ in 0..MAX_ATTEMPTS {
            ledger.begin_attempt().unwrap();
            commit(&mut ledger, "slate", "crane");
        }

        assert!(ledger.is_full());
        assert_eq!(ledger.begin_attempt(), Err(LedgerError::CapacityExceeded));
        let guess = word("crane");
        let feedback = Feedback::calculate(&guess, &guess);
        assert_eq!(
            ledger.commit_attempt(guess, feedback),
            Err(LedgerError::CapacityExceeded)
        );
        assert_eq!(ledger.cursor().attempt, MAX_ATTEMPTS);
    }

    #[test]
    fn snapshot_round_trip() {
        let secret = word("crane");
        let mut ledger = Ledger::new();
        ledger.begin_attempt().unwrap();
        commit(&mut ledger, "trace", "crane");
        ledger.begin_attempt().unwrap();
        type_word(&mut ledger, "cr");

        let restored = Ledger::restore(&ledger.snapshot(), &secret).unwrap();
        assert_eq!(restored, ledger);
        assert_eq!(restored.cursor(), Cursor { attempt: 1, position: 2 });
    }

    #[test]
    fn restore_places_cursor_on_first_gap() {
        let saved = LedgerSnapshot {
            attempts: Vec::new(),
            draft: Some(vec![Some('a'), None, Some('c'), None, None]),
        };
        let ledger = Ledger::restore(&saved, &word("crane")).unwrap();
        assert_eq!(ledger.cursor(), Cursor { attempt: 0, position: 1 });
        assert_eq!(ledger.draft_text(), "a");
    }

    #[test]
    fn restore_rejects_tampered_verdicts() {
        let secret = word("crane");
        let mut ledger = Ledger::new();
        commit(&mut ledger, "slate", "crane");

        let mut saved = ledger.snapshot();
        saved.attempts[0][0].verdict = Verdict::Correct;

        assert!(matches!(
            Ledger::restore(&saved, &secret),
            Err(LedgerError::Corrupt { .. })
        ));
    }

    #[test]
    fn restore_rejects_short_rows_and_bad_drafts() {
        let secret = word("crane");
        let short = LedgerSnapshot {
            attempts: vec![vec![GuessCell {
                letter: 'c',
                verdict: Verdict::Correct,
            }]],
            draft: None,
        };
        assert!(Ledger::restore(&short, &secret).is_err());

        let bad_draft = LedgerSnapshot {
            attempts: Vec::new(),
            draft: Some(vec![Some('a'), Some('1'), None, None, None]),
        };
        assert!(Ledger::restore(&bad_draft, &secret).is_err());

        let long_draft = LedgerSnapshot {
            attempts: Vec::new(),
            draft: Some(vec![None; 6]),
        };
        assert!(Ledger::restore(&long_draft, &secret).is_err());
    }
}
