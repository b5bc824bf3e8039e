//! Wordle Engine
//!
//! The guess-evaluation and game-state engine of a Wordle game: duplicate-safe
//! letter scoring, a monotone keyboard availability map, a bounded guess
//! ledger and a state machine that saves every step through a pluggable
//! session store.
//!
//! # Quick Start
//!
//! ```rust
//! use wordle_engine::core::{Verdict, score};
//!
//! let feedback = score("trace", "crane").unwrap();
//! assert_eq!(feedback.verdicts()[0], Verdict::Absent);
//! assert_eq!(feedback.to_emoji(), "⬜🟩🟩🟨🟩");
//! ```

// Core domain types
pub mod core;

// Game state machine
pub mod engine;

// Snapshots and stores
pub mod persistence;

// Word lists
pub mod wordlists;

// Concurrent sessions
pub mod session;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

// Interactive TUI interface
pub mod interactive;
