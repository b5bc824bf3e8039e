//! Game state machine
//!
//! [`Game`] owns one session: the secret, the [`Ledger`], the
//! [`AvailabilityMap`] and the current [`Phase`]. Calls to the word source are
//! split in two halves (`begin_*` hands out a ticket, `finish_*` applies the
//! answer) so a front-end can perform the lookup however it likes. Every
//! ticket carries the generation it was issued for; answers for an older
//! generation are discarded.

use super::availability::{AvailabilityDelta, AvailabilityMap};
use super::error::EngineError;
use super::ledger::Ledger;
use super::phase::Phase;
use crate::core::{Feedback, WORD_LENGTH, Word};
use crate::persistence::{SessionSnapshot, SessionStore};
use crate::wordlists::{SourceError, WordSource};
use derive_more::Display;
use tracing::{debug, info, instrument, warn};

/// Why a guess was refused without touching the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Rejection {
    #[display("wrong length")]
    WrongLength { expected: usize, actual: usize },
    #[display("not in word list")]
    NotInWordList,
    #[display("game is over")]
    GameOver,
    #[display("a guess is already being checked")]
    Busy,
    #[display("no game in progress")]
    NotStarted,
}

/// Result of a submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The guess was scored and recorded
    Accepted {
        feedback: Feedback,
        /// Keys whose colour improved
        delta: AvailabilityDelta,
        /// Phase after the guess: Guessing, Won or Lost
        phase: Phase,
        /// The secret, when the guess used up the last attempt
        revealed: Option<Word>,
    },
    Rejected(Rejection),
}

impl SubmitOutcome {
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }

    #[must_use]
    pub const fn rejection(&self) -> Option<Rejection> {
        match self {
            Self::Rejected(rejection) => Some(*rejection),
            Self::Accepted { .. } => None,
        }
    }
}

/// Permission to finish a start with a freshly fetched secret
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartTicket {
    generation: u64,
}

impl StartTicket {
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}

/// A well-formed guess waiting for its dictionary lookup
#[derive(Debug, PartialEq, Eq)]
pub struct PendingGuess {
    generation: u64,
    guess: Word,
}

impl PendingGuess {
    /// The guess to look up
    #[must_use]
    pub const fn guess(&self) -> &Word {
        &self.guess
    }

    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}

/// First half of a submission
#[derive(Debug, PartialEq, Eq)]
pub enum SubmitStep {
    /// Refused before any lookup
    Rejected(Rejection),
    /// The game is now Submitting and waits for [`Game::finish_submit`]
    Pending(PendingGuess),
}

/// State put back when a change cannot be saved
#[derive(Debug)]
struct Checkpoint {
    secret: Option<Word>,
    ledger: Ledger,
    availability: AvailabilityMap,
    phase: Phase,
}

/// One word game
///
/// Every change is saved before it is reported. If the store refuses it, the
/// game returns to where it was and the store error is returned.
///
/// # Examples
/// ```
/// use wordle_engine::core::Word;
/// use wordle_engine::engine::{Game, Phase};
/// use wordle_engine::persistence::MemoryStore;
/// use wordle_engine::wordlists::WordList;
///
/// let crane = Word::new("crane").unwrap();
/// let source = WordList::new(vec![crane], &[]);
/// let mut game = Game::new(source, MemoryStore::new());
///
/// game.start_game().unwrap();
/// let outcome = game.submit_guess("crane").unwrap();
///
/// assert!(outcome.is_accepted());
/// assert_eq!(game.phase(), Phase::Won);
/// ```
#[derive(Debug)]
pub struct Game<W, S> {
    source: W,
    store: S,
    secret: Option<Word>,
    ledger: Ledger,
    availability: AvailabilityMap,
    phase: Phase,
    generation: u64,
}

impl<W, S> Game<W, S> {
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Bumped on every start and reset
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub const fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    #[must_use]
    pub const fn availability(&self) -> &AvailabilityMap {
        &self.availability
    }

    /// Hand the pending keyboard delta to the caller and clear it
    pub fn take_delta(&mut self) -> AvailabilityDelta {
        self.availability.take_delta()
    }

    /// The secret, once the game is over
    #[must_use]
    pub fn revealed_secret(&self) -> Option<&Word> {
        self.secret.as_ref().filter(|_| self.phase.is_terminal())
    }

    #[must_use]
    pub const fn source(&self) -> &W {
        &self.source
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Current state in saveable form
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::capture(
            self.secret.as_ref(),
            &self.ledger,
            &self.availability,
            self.phase,
        )
    }
}

impl<W: WordSource, S: SessionStore> Game<W, S> {
    /// A game in `Initial`, nothing loaded or saved
    pub fn new(source: W, store: S) -> Self {
        Self {
            source,
            store,
            secret: None,
            ledger: Ledger::new(),
            availability: AvailabilityMap::new(),
            phase: Phase::Initial,
            generation: 0,
        }
    }

    /// Continue the session saved in `store`
    ///
    /// A missing, unreadable or inconsistent snapshot gives a fresh game. The
    /// restored availability delta lists every known letter.
    #[instrument(skip_all)]
    pub fn resume(source: W, store: S) -> Self {
        let restored = match store.load() {
            Ok(Some(snapshot)) => match snapshot.restore() {
                Ok(restored) => Some(restored),
                Err(err) => {
                    warn!(error = %err, "Discarding inconsistent session");
                    None
                }
            },
            Ok(None) => {
                debug!("No saved session, starting fresh");
                None
            }
            Err(err) => {
                warn!(error = %err, "Could not load session, starting fresh");
                None
            }
        };

        let mut game = Self::new(source, store);
        if let Some(restored) = restored {
            info!(phase = %restored.phase, attempts = restored.ledger.len(), "Resumed session");
            game.secret = restored.secret;
            game.ledger = restored.ledger;
            game.availability = restored.availability;
            game.phase = restored.phase;
        }
        game
    }

    /// Draw a secret and start guessing
    ///
    /// # Errors
    /// `InvalidTransition` outside `Initial`, `WordSourceUnavailable` if no
    /// secret could be drawn, `Store` if the new game could not be saved. The
    /// game stays `Initial` on every error.
    #[instrument(skip(self), fields(generation = self.generation))]
    pub fn start_game(&mut self) -> Result<(), EngineError> {
        let ticket = self.begin_start()?;
        let fetched = self.source.fetch_random_word();
        self.finish_start(ticket, fetched)
    }

    /// First half of [`start_game`](Self::start_game)
    ///
    /// Starts a new generation, so tickets handed out earlier go stale.
    ///
    /// # Errors
    /// `InvalidTransition` outside `Initial`.
    pub fn begin_start(&mut self) -> Result<StartTicket, EngineError> {
        self.require(Phase::Initial, "start a game")?;
        self.generation += 1;
        Ok(StartTicket {
            generation: self.generation,
        })
    }

    /// Second half of [`start_game`](Self::start_game)
    ///
    /// # Errors
    /// `StaleGeneration` for a superseded ticket, otherwise as `start_game`.
    pub fn finish_start(
        &mut self,
        ticket: StartTicket,
        fetched: Result<Word, SourceError>,
    ) -> Result<(), EngineError> {
        self.check_generation(ticket.generation)?;
        self.require(Phase::Initial, "start a game")?;
        let secret = fetched?;

        let before = self.checkpoint(Phase::Initial);
        self.secret = Some(secret);
        self.ledger = Ledger::new();
        self.availability.reset();
        if let Err(err) = self.ledger.begin_attempt() {
            self.rollback(before);
            return Err(err.into());
        }
        self.phase = Phase::Guessing;
        info!(generation = self.generation, "Game started");
        self.save_or_rollback(before)
    }

    /// Check, score and record a guess
    ///
    /// # Errors
    /// `WordSourceUnavailable` if the dictionary lookup failed, `Store` if the
    /// result could not be saved. In both cases the guess is dropped and the
    /// game is back in `Guessing` as it was before the call.
    #[instrument(skip(self), fields(generation = self.generation))]
    pub fn submit_guess(&mut self, raw: &str) -> Result<SubmitOutcome, EngineError> {
        match self.begin_submit(raw) {
            SubmitStep::Rejected(rejection) => Ok(SubmitOutcome::Rejected(rejection)),
            SubmitStep::Pending(pending) => {
                let lookup = self.source.is_word_valid(pending.guess.text());
                self.finish_submit(pending, lookup)
            }
        }
    }

    /// First half of [`submit_guess`](Self::submit_guess)
    ///
    /// Checks phase and shape. A well-formed guess moves the game to
    /// `Submitting` until [`finish_submit`](Self::finish_submit) is called.
    pub fn begin_submit(&mut self, raw: &str) -> SubmitStep {
        let rejection = match self.phase {
            Phase::Initial => Some(Rejection::NotStarted),
            Phase::Submitting => Some(Rejection::Busy),
            Phase::Won | Phase::Lost => Some(Rejection::GameOver),
            Phase::Guessing => None,
        };
        if let Some(rejection) = rejection {
            debug!(%rejection, phase = %self.phase, "Submission refused");
            return SubmitStep::Rejected(rejection);
        }

        let raw = raw.trim();
        let actual = raw.chars().count();
        if actual != WORD_LENGTH {
            info!(actual, "Rejected guess: wrong length");
            return SubmitStep::Rejected(Rejection::WrongLength {
                expected: WORD_LENGTH,
                actual,
            });
        }
        let Ok(guess) = Word::new(raw) else {
            info!("Rejected guess: not letters");
            return SubmitStep::Rejected(Rejection::NotInWordList);
        };

        self.phase = Phase::Submitting;
        SubmitStep::Pending(PendingGuess {
            generation: self.generation,
            guess,
        })
    }

    /// Second half of [`submit_guess`](Self::submit_guess)
    ///
    /// `lookup` is the word source's answer for the pending guess.
    ///
    /// # Errors
    /// `StaleGeneration` if the game was reset in between, otherwise as
    /// `submit_guess`.
    pub fn finish_submit(
        &mut self,
        pending: PendingGuess,
        lookup: Result<bool, SourceError>,
    ) -> Result<SubmitOutcome, EngineError> {
        self.check_generation(pending.generation)?;
        self.require(Phase::Submitting, "finish a submission")?;

        match lookup {
            Err(err) => {
                warn!(error = %err, "Dictionary lookup failed");
                self.phase = Phase::Guessing;
                return Err(err.into());
            }
            Ok(false) => {
                info!(guess = %pending.guess, "Rejected guess: not in word list");
                self.phase = Phase::Guessing;
                return Ok(SubmitOutcome::Rejected(Rejection::NotInWordList));
            }
            Ok(true) => {}
        }

        let Some(secret) = self.secret.clone() else {
            self.phase = Phase::Initial;
            return Err(EngineError::InvalidTransition {
                action: "score a guess",
                phase: Phase::Initial,
            });
        };

        let before = self.checkpoint(Phase::Guessing);
        let outcome = match self.record_guess(pending.guess, secret) {
            Ok(outcome) => outcome,
            Err(err) => {
                self.rollback(before);
                return Err(err);
            }
        };
        self.save_or_rollback(before)?;
        Ok(outcome)
    }

    /// Score `guess`, commit it and move to the resulting phase
    fn record_guess(&mut self, guess: Word, secret: Word) -> Result<SubmitOutcome, EngineError> {
        let feedback = Feedback::calculate(&guess, &secret);
        let cells: Vec<_> = guess
            .text()
            .chars()
            .zip(feedback.verdicts().iter().copied())
            .collect();

        debug_assert!(!self.ledger.is_full(), "guess accepted with no attempt left");
        self.ledger.commit_attempt(guess, feedback)?;
        let delta = self.availability.update(cells).clone();

        let (phase, revealed) = if feedback.is_solved() {
            (Phase::Won, None)
        } else if self.ledger.is_full() {
            (Phase::Lost, Some(secret))
        } else {
            self.ledger.begin_attempt()?;
            (Phase::Guessing, None)
        };
        self.phase = phase;
        info!(
            attempt = self.ledger.len(),
            feedback = %feedback.to_emoji(),
            %phase,
            "Guess recorded"
        );

        Ok(SubmitOutcome::Accepted {
            feedback,
            delta,
            phase,
            revealed,
        })
    }

    /// Type a letter into the draft
    ///
    /// Returns whether the draft changed; outside `Guessing` or on a full
    /// draft nothing happens.
    ///
    /// # Errors
    /// `Ledger(NotALetter)` for symbols outside `a..=z`, `Store` if the draft
    /// could not be saved (the letter is taken back).
    pub fn type_letter(&mut self, letter: char) -> Result<bool, EngineError> {
        if self.phase != Phase::Guessing {
            return Ok(false);
        }
        let before = self.checkpoint(Phase::Guessing);
        let changed = self.ledger.set_letter_at_cursor(letter)?;
        if changed {
            self.save_or_rollback(before)?;
        }
        Ok(changed)
    }

    /// Remove the last typed letter
    ///
    /// # Errors
    /// `Store` if the draft could not be saved (the letter is restored).
    pub fn backspace(&mut self) -> Result<Option<char>, EngineError> {
        if self.phase != Phase::Guessing {
            return Ok(None);
        }
        let before = self.checkpoint(Phase::Guessing);
        let removed = self.ledger.backspace_at_cursor()?;
        if removed.is_some() {
            self.save_or_rollback(before)?;
        }
        Ok(removed)
    }

    /// Submit whatever has been typed
    ///
    /// # Errors
    /// As [`submit_guess`](Self::submit_guess).
    pub fn submit_draft(&mut self) -> Result<SubmitOutcome, EngineError> {
        let text = self.ledger.draft_text();
        self.submit_guess(&text)
    }

    /// Abandon the current game
    ///
    /// Allowed from any phase. Outstanding tickets go stale, even when the
    /// reset itself fails.
    ///
    /// # Errors
    /// `Store` if the cleared session could not be saved. The old game is kept;
    /// a submission that was in flight is dropped and the game is `Guessing`.
    #[instrument(skip(self), fields(phase = %self.phase))]
    pub fn reset(&mut self) -> Result<(), EngineError> {
        let previous = match self.phase {
            Phase::Submitting => Phase::Guessing,
            other => other,
        };
        let before = self.checkpoint(previous);
        self.generation += 1;
        self.secret = None;
        self.ledger = Ledger::new();
        self.availability.reset();
        self.phase = Phase::Initial;
        info!(generation = self.generation, "Game reset");
        self.save_or_rollback(before)
    }

    fn require(&self, expected: Phase, action: &'static str) -> Result<(), EngineError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(EngineError::InvalidTransition {
                action,
                phase: self.phase,
            })
        }
    }

    fn check_generation(&self, ticket: u64) -> Result<(), EngineError> {
        if ticket == self.generation {
            return Ok(());
        }
        debug!(ticket, current = self.generation, "Discarding stale result");
        Err(EngineError::StaleGeneration {
            ticket,
            current: self.generation,
        })
    }

    /// Current state, with `phase` as the phase to return to
    fn checkpoint(&self, phase: Phase) -> Checkpoint {
        Checkpoint {
            secret: self.secret.clone(),
            ledger: self.ledger.clone(),
            availability: self.availability.clone(),
            phase,
        }
    }

    fn rollback(&mut self, before: Checkpoint) {
        self.secret = before.secret;
        self.ledger = before.ledger;
        self.availability = before.availability;
        self.phase = before.phase;
    }

    fn save_or_rollback(&mut self, before: Checkpoint) -> Result<(), EngineError> {
        let snapshot = self.snapshot();
        if let Err(err) = self.store.save(&snapshot) {
            warn!(error = %err, phase = %before.phase, "Could not save session, rolling back");
            self.rollback(before);
            return Err(err.into());
        }
        Ok(())
    }
}
