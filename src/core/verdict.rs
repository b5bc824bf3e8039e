//! Per-letter verdicts
//!
//! The variant order is the knowledge order used by the availability map:
//! `Unknown < Absent < Present < Correct`.

use serde::{Deserialize, Serialize};

/// Feedback classification for a single letter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    /// Not evaluated yet
    #[default]
    Unknown,
    /// Gray - letter not in word (or all its occurrences already attributed)
    Absent,
    /// Yellow - letter in word, wrong position
    Present,
    /// Green - letter in correct position
    Correct,
}

impl Verdict {
    /// Square emoji used in shareable results
    #[must_use]
    pub const fn emoji(self) -> char {
        match self {
            Self::Correct => '🟩',
            Self::Present => '🟨',
            Self::Absent => '⬜',
            Self::Unknown => '▫',
        }
    }

    /// Whether the letter has been evaluated at least once
    #[inline]
    #[must_use]
    pub const fn is_known(self) -> bool {
        !matches!(self, Self::Unknown)
    }
}
