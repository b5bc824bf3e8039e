//! Terminal output formatting
//!
//! Coloured boards, keyboards and results for the line-based front-end.

pub mod display;
pub mod formatters;

pub use display::{
    print_board, print_game_over, print_keyboard, print_outcome, print_rejection, print_status,
};
