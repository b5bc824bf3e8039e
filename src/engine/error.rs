//! Engine errors
//!
//! Guesses the game refuses are not errors; they come back as
//! [`Rejection`](super::Rejection) values. `EngineError` covers failures of
//! collaborators and misuse of the state machine.

use super::ledger::LedgerError;
use super::phase::Phase;
use crate::persistence::StoreError;
use crate::wordlists::SourceError;
use derive_more::{Display, Error, From};

/// Why an engine operation could not complete
#[derive(Debug, Display, Error, From)]
pub enum EngineError {
    /// The word source could not answer; nothing was changed
    #[display("word source unavailable: {_0}")]
    WordSourceUnavailable(SourceError),
    #[display("ledger error: {_0}")]
    Ledger(LedgerError),
    /// A result arrived for a game that has since been restarted or reset
    #[display("result for generation {ticket} discarded, current generation is {current}")]
    #[from(ignore)]
    StaleGeneration { ticket: u64, current: u64 },
    #[display("cannot {action} while {phase}")]
    #[from(ignore)]
    InvalidTransition { action: &'static str, phase: Phase },
    /// The snapshot could not be saved; the in-memory state already changed
    #[display("session store failed: {_0}")]
    Store(StoreError),
}

impl EngineError {
    /// The in-memory game is fine and the call can simply be retried
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::WordSourceUnavailable(_))
    }
}
