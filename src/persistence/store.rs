//! Snapshot stores
//!
//! Where a session's [`SessionSnapshot`] lives between runs.

use super::snapshot::SessionSnapshot;
use derive_more::{Display, Error, From};
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

const APP_DIR: &str = "wordle_engine";
const SESSION_FILE: &str = "session.json";

/// Reading or writing a snapshot failed
#[derive(Debug, Display, Error, From)]
pub enum StoreError {
    #[display("session store I/O failed: {_0}")]
    Io(io::Error),
    #[display("session snapshot is not valid JSON: {_0}")]
    Corrupt(serde_json::Error),
}

/// Load/save of one session's snapshot
pub trait SessionStore {
    /// The last saved snapshot, `None` if nothing was ever saved
    ///
    /// # Errors
    /// `StoreError::Io` if the backing storage cannot be read,
    /// `StoreError::Corrupt` if it does not hold a snapshot.
    fn load(&self) -> Result<Option<SessionSnapshot>, StoreError>;

    /// Replace the stored snapshot
    ///
    /// # Errors
    /// Returns `StoreError` if the snapshot cannot be written.
    fn save(&mut self, snapshot: &SessionSnapshot) -> Result<(), StoreError>;
}

/// Keeps the serialized snapshot in memory
///
/// Snapshots go through JSON exactly as they would on disk, so a test can seed
/// the store with truncated or hand-edited text.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    raw: Option<String>,
    saves: usize,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose next `load` reads `raw`
    #[must_use]
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Some(raw.into()),
            saves: 0,
        }
    }

    /// The serialized snapshot, if any
    #[must_use]
    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    /// How many times `save` succeeded
    #[must_use]
    pub const fn saves(&self) -> usize {
        self.saves
    }
}

impl SessionStore for MemoryStore {
    fn load(&self) -> Result<Option<SessionSnapshot>, StoreError> {
        self.raw
            .as_deref()
            .map(serde_json::from_str::<SessionSnapshot>)
            .transpose()
            .map_err(StoreError::from)
    }

    fn save(&mut self, snapshot: &SessionSnapshot) -> Result<(), StoreError> {
        self.raw = Some(serde_json::to_string(snapshot)?);
        self.saves += 1;
        Ok(())
    }
}

/// Stores the snapshot as pretty-printed JSON in a file
///
/// Writes go to a sibling temporary file that is then renamed over the target,
/// so a crash mid-write leaves the previous snapshot intact.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Store at the default session location, see
    /// [`default_path`](Self::default_path)
    #[must_use]
    pub fn at_default_path() -> Self {
        Self::new(Self::default_path(
            std::env::var_os("XDG_DATA_HOME"),
            std::env::var_os("HOME"),
        ))
    }

    /// Default session file
    ///
    /// `$XDG_DATA_HOME/wordle_engine/session.json`, else
    /// `$HOME/.local/share/wordle_engine/session.json`, else
    /// `wordle_session.json` in the working directory. Empty variables count as
    /// unset.
    #[must_use]
    pub fn default_path(xdg_data_home: Option<OsString>, home: Option<OsString>) -> PathBuf {
        let set = |var: Option<OsString>| var.filter(|value| !value.is_empty());
        if let Some(data) = set(xdg_data_home) {
            let path = PathBuf::from(data).join(APP_DIR).join(SESSION_FILE);
            debug!(path = %path.display(), "Using XDG_DATA_HOME session path");
            return path;
        }
        if let Some(home) = set(home) {
            let path = PathBuf::from(home)
                .join(".local/share")
                .join(APP_DIR)
                .join(SESSION_FILE);
            debug!(path = %path.display(), "Using HOME session path");
            return path;
        }
        debug!("Falling back to the working directory for the session");
        PathBuf::from("wordle_session.json")
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl SessionStore for JsonFileStore {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn load(&self) -> Result<Option<SessionSnapshot>, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!("No saved session");
                return Ok(None);
            }
            Err(err) => return Err(err.into()),
        };
        Ok(Some(serde_json::from_str(&content)?))
    }

    #[instrument(skip(self, snapshot), fields(path = %self.path.display()))]
    fn save(&mut self, snapshot: &SessionSnapshot) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let temp = self.temp_path();
        fs::write(&temp, serde_json::to_string_pretty(snapshot)?)?;
        fs::rename(&temp, &self.path)?;
        debug!("Saved session");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_starts_empty() {
        let store = MemoryStore::new();
        assert!(store.load().unwrap().is_none());
        assert_eq!(store.saves(), 0);
    }

    #[test]
    fn memory_store_round_trip() {
        let mut store = MemoryStore::new();
        let snapshot = SessionSnapshot::initial();
        store.save(&snapshot).unwrap();

        assert_eq!(store.load().unwrap(), Some(snapshot));
        assert_eq!(store.saves(), 1);
    }

    #[test]
    fn memory_store_reports_truncated_json() {
        let store = MemoryStore::with_raw("{\"version\":1,\"secret\":\"cra");
        assert!(matches!(store.load(), Err(StoreError::Corrupt(_))));
    }

    #[test]
    fn file_store_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("session.json"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn file_store_round_trip_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("nested/state/session.json"));
        let snapshot = SessionSnapshot::initial();

        store.save(&snapshot).unwrap();
        assert!(store.path().exists());
        assert!(!store.temp_path().exists());
        assert_eq!(store.load().unwrap(), Some(snapshot));
    }

    #[test]
    fn default_path_prefers_xdg_data_home() {
        let path = JsonFileStore::default_path(Some("/data".into()), Some("/home/ann".into()));
        assert_eq!(path, Path::new("/data/wordle_engine/session.json"));

        let path = JsonFileStore::default_path(Some("".into()), Some("/home/ann".into()));
        assert_eq!(
            path,
            Path::new("/home/ann/.local/share/wordle_engine/session.json")
        );

        let path = JsonFileStore::default_path(None, None);
        assert_eq!(path, Path::new("wordle_session.json"));
    }

    #[test]
    fn file_store_reports_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "not json at all").unwrap();

        let store = JsonFileStore::new(path);
        assert!(matches!(store.load(), Err(StoreError::Corrupt(_))));
    }
}
