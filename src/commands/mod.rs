//! Command implementations

pub mod oneshot;
pub mod simple;

pub use oneshot::{new_game, reset_game, show_status, submit_word};
pub use simple::run_simple;
