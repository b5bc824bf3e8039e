//! Game phases

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// State of the game state machine
///
/// `Initial → Guessing ⇄ Submitting → Won | Lost`, with `reset` leading back
/// to `Initial` from anywhere.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// No secret yet
    #[default]
    #[display("initial")]
    Initial,
    /// Waiting for the next guess
    #[display("guessing")]
    Guessing,
    /// A guess is being checked against the dictionary
    #[display("submitting")]
    Submitting,
    /// The secret was guessed
    #[display("won")]
    Won,
    /// Every attempt was used without guessing the secret
    #[display("lost")]
    Lost,
}

impl Phase {
    /// Won and Lost accept nothing but `reset`
    #[inline]
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}
