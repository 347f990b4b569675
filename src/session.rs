//! Client session identity and its on-disk persistence
//!
//! The session is an explicit value passed to every per-user operation, not an
//! ambient lookup. Exactly one thing survives a process restart: the session
//! file (username plus login stamp). Logout deletes it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::config::with_config;

/// The minimal identity scoping all per-user requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub username: String,
    pub logged_in_at: DateTime<Utc>,
}

impl Session {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            logged_in_at: Utc::now(),
        }
    }
}

/// Default session file location under the platform data directory
pub fn default_session_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("leadbook")
        .join("session.json")
}

/// Persists the active [`Session`] as a single JSON file
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the configured location (config `session.path` override, else
    /// the platform default)
    pub fn from_config() -> Self {
        let path = with_config(|config| config.session.path.clone())
            .unwrap_or_else(default_session_path);
        Self::new(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted session. A missing file is simply "logged out";
    /// an unreadable or corrupt file is an error for the caller to surface.
    pub fn load(&self) -> Result<Option<Session>, String> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&self.path)
            .map_err(|e| format!("Failed to read session file '{}': {}", self.path.display(), e))?;

        let session = serde_json::from_str::<Session>(&contents).map_err(|e| {
            format!(
                "Session file '{}' is corrupt: {}",
                self.path.display(),
                e
            )
        })?;

        Ok(Some(session))
    }

    pub fn save(&self, session: &Session) -> Result<(), String> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                format!("Failed to create '{}': {}", parent.display(), e)
            })?;
        }
        let contents = serde_json::to_string_pretty(session)
            .map_err(|e| format!("Failed to encode session: {}", e))?;

        std::fs::write(&self.path, contents).map_err(|e| {
            format!(
                "Failed to write session file '{}': {}",
                self.path.display(),
                e
            )
        })
    }

    /// Delete the persisted session. Already-absent is fine.
    pub fn clear(&self) -> Result<(), String> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(format!(
                "Failed to remove session file '{}': {}",
                self.path.display(),
                e
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_load_clear_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = SessionStore::new(dir.path().join("session.json"));

        assert_eq!(store.load().unwrap(), None);

        let session = Session::new("alice");
        store.save(&session).unwrap();
        let loaded = store.load().unwrap().expect("session present");
        assert_eq!(loaded.username, "alice");
        assert_eq!(loaded.logged_in_at, session.logged_in_at);

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_clear_when_absent_is_ok() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = SessionStore::new(dir.path().join("missing.json"));
        assert!(store.clear().is_ok());
    }

    #[test]
    fn test_corrupt_file_is_an_error_not_a_panic() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json").unwrap();

        let store = SessionStore::new(path);
        assert!(store.load().is_err());
    }
}
