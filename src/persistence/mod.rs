//! Session persistence
//!
//! A game is saved as a [`SessionSnapshot`] through a [`SessionStore`] and
//! validated again when it is loaded.

mod snapshot;
mod store;

pub use snapshot::{RestoreError, RestoredSession, SNAPSHOT_VERSION, SessionSnapshot};
pub use store::{JsonFileStore, MemoryStore, SessionStore, StoreError};
