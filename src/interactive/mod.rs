//! Interactive TUI
//!
//! A ratatui front-end: the board, an on-screen keyboard coloured from the
//! availability map, and a message log.

pub mod app;
pub mod rendering;

pub use app::{App, run_tui};
