//! Registry of concurrent game sessions
//!
//! Each session is its own [`Game`] behind its own mutex, so sessions never
//! share state and operations on one session are serialized. The word source
//! is shared read-only.

use crate::engine::Game;
use crate::persistence::MemoryStore;
use crate::wordlists::WordSource;
use derive_more::{Display, Error};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info, instrument, warn};

/// Unique identifier for a game session.
pub type SessionId = String;

/// A game owned by the registry.
pub type SessionGame<W> = Game<Arc<W>, MemoryStore>;

/// Handle to one session's game.
pub type SharedGame<W> = Arc<Mutex<SessionGame<W>>>;

/// Registry failures.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum RegistryError {
    #[display("session {id} already exists")]
    AlreadyExists { id: SessionId },
    #[display("session {id} not found")]
    NotFound { id: SessionId },
    /// A thread panicked while holding a lock
    #[display("session lock poisoned")]
    Poisoned,
}

/// Manages all game sessions.
#[derive(Debug)]
pub struct SessionRegistry<W> {
    source: Arc<W>,
    sessions: Mutex<HashMap<SessionId, SharedGame<W>>>,
}

impl<W: WordSource> SessionRegistry<W> {
    /// Creates a registry drawing every session's secrets from `source`.
    pub fn new(source: Arc<W>) -> Self {
        info!("Creating session registry");
        Self {
            source,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    fn sessions(&self) -> Result<MutexGuard<'_, HashMap<SessionId, SharedGame<W>>>, RegistryError> {
        self.sessions.lock().map_err(|_| RegistryError::Poisoned)
    }

    /// Creates a session in the `Initial` phase.
    ///
    /// # Errors
    /// `AlreadyExists` if the id is taken.
    #[instrument(skip(self))]
    pub fn create(&self, id: &str) -> Result<SharedGame<W>, RegistryError> {
        let mut sessions = self.sessions()?;
        if sessions.contains_key(id) {
            warn!(session_id = id, "Session already exists");
            return Err(RegistryError::AlreadyExists { id: id.to_string() });
        }

        let game = Arc::new(Mutex::new(Game::new(
            Arc::clone(&self.source),
            MemoryStore::new(),
        )));
        sessions.insert(id.to_string(), Arc::clone(&game));
        info!(session_id = id, "Created new session");
        Ok(game)
    }

    /// Gets a session by ID.
    #[instrument(skip(self))]
    pub fn get(&self, id: &str) -> Option<SharedGame<W>> {
        let session = self.sessions().ok()?.get(id).cloned();
        if session.is_none() {
            debug!(session_id = id, "Session not found");
        }
        session
    }

    /// Drops a session; returns whether it existed.
    #[instrument(skip(self))]
    pub fn remove(&self, id: &str) -> bool {
        let removed = self
            .sessions()
            .is_ok_and(|mut sessions| sessions.remove(id).is_some());
        if removed {
            info!(session_id = id, "Removed session");
        }
        removed
    }

    /// Lists all session IDs, sorted.
    pub fn list(&self) -> Vec<SessionId> {
        let mut ids: Vec<_> = self
            .sessions()
            .map(|sessions| sessions.keys().cloned().collect())
            .unwrap_or_default();
        ids.sort();
        ids
    }

    /// Runs `f` with exclusive access to one session's game.
    ///
    /// The registry lock is released before the session is locked, so a slow
    /// operation only blocks its own session.
    ///
    /// # Errors
    /// `NotFound` for an unknown id, `Poisoned` if a lock is poisoned.
    pub fn with_game<R>(
        &self,
        id: &str,
        f: impl FnOnce(&mut SessionGame<W>) -> R,
    ) -> Result<R, RegistryError> {
        let game = self.get(id).ok_or_else(|| RegistryError::NotFound {
            id: id.to_string(),
        })?;
        let mut game = game.lock().map_err(|_| RegistryError::Poisoned)?;
        Ok(f(&mut *game))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Word;
    use crate::engine::Phase;
    use crate::wordlists::WordList;
    use std::thread;

    fn registry() -> SessionRegistry<WordList> {
        let answers = vec![Word::new("crane").unwrap()];
        let allowed = [Word::new("slate").unwrap(), Word::new("trace").unwrap()];
        SessionRegistry::new(Arc::new(WordList::new(answers, &allowed)))
    }

    #[test]
    fn duplicate_ids_are_refused() {
        let registry = registry();
        registry.create("a").unwrap();
        assert_eq!(
            registry.create("a").unwrap_err(),
            RegistryError::AlreadyExists { id: "a".into() }
        );
        assert_eq!(registry.list(), vec!["a".to_string()]);
    }

    #[test]
    fn sessions_do_not_share_state() {
        let registry = registry();
        registry.create("a").unwrap();
        registry.create("b").unwrap();

        registry
            .with_game("a", |game| {
                game.start_game().unwrap();
                game.submit_guess("crane").unwrap();
            })
            .unwrap();

        let phase_a = registry.with_game("a", |game| game.phase()).unwrap();
        let phase_b = registry.with_game("b", |game| game.phase()).unwrap();
        assert_eq!(phase_a, Phase::Won);
        assert_eq!(phase_b, Phase::Initial);
    }

    #[test]
    fn unknown_and_removed_sessions() {
        let registry = registry();
        assert!(registry.get("ghost").is_none());
        assert!(matches!(
            registry.with_game("ghost", |_| ()),
            Err(RegistryError::NotFound { .. })
        ));

        registry.create("a").unwrap();
        assert!(registry.remove("a"));
        assert!(!registry.remove("a"));
        assert!(registry.list().is_empty());
    }

    #[test]
    fn sessions_play_in_parallel() {
        let registry = registry();
        let ids: Vec<String> = (0..8).map(|i| format!("player-{i}")).collect();
        for id in &ids {
            registry.create(id).unwrap();
        }

        thread::scope(|scope| {
            for id in &ids {
                let registry = &registry;
                scope.spawn(move || {
                    registry
                        .with_game(id, |game| {
                            game.start_game().unwrap();
                            game.submit_guess("slate").unwrap();
                            game.submit_guess("trace").unwrap();
                        })
                        .unwrap();
                });
            }
        });

        for id in &ids {
            let attempts = registry.with_game(id, |game| game.ledger().len()).unwrap();
            assert_eq!(attempts, 2);
        }
    }
}
