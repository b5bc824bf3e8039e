//! Formatting utilities for terminal output

use crate::core::{MAX_ATTEMPTS, Verdict, WORD_LENGTH};
use colored::{ColoredString, Colorize};

/// On-screen keyboard layout
pub const KEYBOARD_ROWS: [&str; 3] = ["qwertyuiop", "asdfghjkl", "zxcvbnm"];

/// A letter tile coloured by its verdict
#[must_use]
pub fn paint_tile(letter: char, verdict: Verdict) -> ColoredString {
    let tile = format!(" {} ", letter.to_ascii_uppercase());
    match verdict {
        Verdict::Correct => tile.black().on_green().bold(),
        Verdict::Present => tile.black().on_yellow().bold(),
        Verdict::Absent => tile.white().on_bright_black(),
        Verdict::Unknown => tile.bold(),
    }
}

/// Draft cells with `_` for the empty ones, e.g. `TR___`
#[must_use]
pub fn draft_cells(draft: &[Option<char>; WORD_LENGTH]) -> String {
    draft
        .iter()
        .map(|cell| cell.map_or('_', |letter| letter.to_ascii_uppercase()))
        .collect()
}

/// Used attempts as a bar, e.g. `██░░░░`
#[must_use]
pub fn attempts_bar(used: usize) -> String {
    let used = used.min(MAX_ATTEMPTS);
    format!("{}{}", "█".repeat(used), "░".repeat(MAX_ATTEMPTS - used))
}

/// Short label for a letter's state on the keyboard legend
#[must_use]
pub const fn verdict_label(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::Correct => "correct",
        Verdict::Present => "elsewhere",
        Verdict::Absent => "not in word",
        Verdict::Unknown => "unused",
    }
}
