//! The game engine
//!
//! [`Game`] drives one session through its [`Phase`]s, recording attempts in a
//! [`Ledger`] and folding their verdicts into an [`AvailabilityMap`].

mod availability;
mod error;
mod game;
mod ledger;
mod phase;

pub use availability::{AvailabilityDelta, AvailabilityMap};
pub use error::EngineError;
pub use game::{Game, PendingGuess, Rejection, StartTicket, SubmitOutcome, SubmitStep};
pub use ledger::{Attempt, Cursor, GuessCell, Ledger, LedgerError, LedgerSnapshot};
pub use phase::Phase;
