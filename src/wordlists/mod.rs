//! Word lists and word sources
//!
//! Provides embedded word lists compiled into the binary and the
//! [`WordSource`] abstraction the game engine draws secrets from.

mod embedded;
pub mod loader;
mod source;

pub use embedded::{ALLOWED, ALLOWED_COUNT, ANSWERS, ANSWERS_COUNT};
pub use source::{SourceError, WordList, WordSource};
