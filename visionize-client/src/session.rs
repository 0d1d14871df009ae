/// Durable session storage
///
/// The session is the signed-in state: the bearer token plus the profile
/// returned at signin, persisted as JSON at a caller-chosen path so it
/// survives restarts. Loading never fails on absence; a missing or
/// unreadable file simply means "not signed in".

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use visionize_shared::models::user::UserProfile;

/// A signed-in session: bearer token and the profile it belongs to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: UserProfile,
}

/// Error type for session persistence
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Failed to access session file: {0}")]
    Io(#[from] io::Error),

    #[error("Session file is not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// File-backed session cache
#[derive(Debug, Clone)]
pub struct SessionCache {
    path: PathBuf,
}

impl SessionCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored session, if any.
    ///
    /// A missing file is `Ok(None)`; a present but unparsable file is an
    /// error so a corrupt cache is surfaced rather than silently treated as
    /// signed out.
    pub fn load(&self) -> Result<Option<Session>, SessionError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(serde_json::from_str(&contents)?)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Writes the session, creating parent directories as needed.
    pub fn save(&self, session: &Session) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let contents = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, contents)?;
        Ok(())
    }

    /// Removes the stored session. Clearing an absent session is a no-op.
    pub fn clear(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_cache(name: &str) -> SessionCache {
        let path = std::env::temp_dir().join(format!(
            "visionize-session-{}-{}.json",
            name,
            uuid::Uuid::new_v4()
        ));
        SessionCache::new(path)
    }

    fn sample_session() -> Session {
        Session {
            token: "header.payload.signature".to_string(),
            user: UserProfile {
                email: "ada@example.com".to_string(),
                first_name: Some("Ada".to_string()),
                last_name: Some("Lovelace".to_string()),
            },
        }
    }

    #[test]
    fn test_load_absent_is_none() {
        let cache = temp_cache("absent");
        assert!(cache.load().unwrap().is_none());
    }

    #[test]
    fn test_save_then_load_roundtrip() {
        let cache = temp_cache("roundtrip");
        cache.save(&sample_session()).unwrap();

        let loaded = cache.load().unwrap().unwrap();
        assert_eq!(loaded.token, "header.payload.signature");
        assert_eq!(loaded.user.email, "ada@example.com");

        cache.clear().unwrap();
    }

    #[test]
    fn test_clear_removes_file_and_is_idempotent() {
        let cache = temp_cache("clear");
        cache.save(&sample_session()).unwrap();

        cache.clear().unwrap();
        assert!(cache.load().unwrap().is_none());

        // Second clear finds nothing and still succeeds.
        cache.clear().unwrap();
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let cache = temp_cache("corrupt");
        fs::write(cache.path(), "{ not json").unwrap();

        assert!(matches!(cache.load(), Err(SessionError::Corrupt(_))));

        cache.clear().unwrap();
    }
}
