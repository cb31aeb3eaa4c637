//! The signed-in user, passed explicitly to whatever needs the token.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Fixed key the session blob is stored under.
pub const SESSION_KEY: &str = "auth_user";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthSession {
    pub uid: String,
    pub email: String,
    pub token: String,
}

/// Keeps one session blob as `<dir>/auth_user.json`.
#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(format!("{}.json", SESSION_KEY))
    }

    /// Load the stored session; `None` when nobody is signed in.
    pub fn load(&self) -> Result<Option<AuthSession>, EngineError> {
        let path = self.path();
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&path).map_err(|e| io_error(&path, e))?;
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| EngineError::Session(format!("{}: {}", path.display(), e)))
    }

    pub fn save(&self, session: &AuthSession) -> Result<(), EngineError> {
        fs::create_dir_all(&self.dir).map_err(|e| io_error(&self.dir, e))?;
        let path = self.path();
        let blob = serde_json::to_string(session)
            .map_err(|e| EngineError::Session(e.to_string()))?;
        fs::write(&path, blob).map_err(|e| io_error(&path, e))
    }

    pub fn clear(&self) -> Result<(), EngineError> {
        let path = self.path();
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(&path, e)),
        }
    }
}

fn io_error(path: &Path, err: std::io::Error) -> EngineError {
    EngineError::Session(format!("{}: {}", path.display(), err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn session() -> AuthSession {
        AuthSession {
            uid: "u-1".to_string(),
            email: "coach@example.com".to_string(),
            token: "tok".to_string(),
        }
    }

    #[test]
    fn test_save_load_clear() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());
        assert_eq!(store.load().unwrap(), None);

        store.save(&session()).unwrap();
        assert_eq!(store.load().unwrap(), Some(session()));
        assert!(store.path().ends_with("auth_user.json"));

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
        store.clear().unwrap();
    }

    #[test]
    fn test_corrupt_blob() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());
        fs::write(store.path(), "{\"uid\": 3").unwrap();
        assert_eq!(store.load().unwrap_err().kind(), ErrorKind::Session);
    }
}
