//! # Session Store
//!
//! Keeps the auth token and a cached copy of the signed-in user.
//!
//! ## Storage Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Session Slots                                    │
//! │                                                                         │
//! │   "token" ──► opaque bearer token (sole authority for requests)        │
//! │   "user"  ──► JSON-serialized User (display cache only)                │
//! │                                                                         │
//! │   login   ──► store([token, user])   one atomic write                  │
//! │   /me     ──► store([user])          refresh the cache                 │
//! │   logout  ──► remove([token, user])  one atomic removal                │
//! │                                                                         │
//! │  Backends:                                                             │
//! │   • MemoryBackend - process lifetime, used by tests                    │
//! │   • FileBackend   - JSON file in the data dir, survives restarts       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Reads never fail: unreadable or malformed data is logged and treated as
//! absent. Writes report [`ClientError::Storage`].

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::{ErrorKind as IoErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tempfile::NamedTempFile;

use shopfront_core::User;
use tracing::{debug, warn};

use crate::error::{ClientError, ClientResult};

/// Slot holding the bearer token.
pub const TOKEN_KEY: &str = "token";

/// Slot holding the serialized user record.
pub const USER_KEY: &str = "user";

// =============================================================================
// Backend Seam
// =============================================================================

/// String-keyed persistence the session lives in.
///
/// `store` and `remove` take several keys at once and must apply them as a
/// unit, so a token is never persisted without its user or the other way
/// round.
pub trait SessionBackend: Send + Sync {
    /// Reads one slot.
    fn load(&self, key: &str) -> ClientResult<Option<String>>;

    /// Writes all entries in a single step.
    fn store(&self, entries: &[(&str, &str)]) -> ClientResult<()>;

    /// Removes all keys in a single step.
    fn remove(&self, keys: &[&str]) -> ClientResult<()>;
}

// =============================================================================
// Memory Backend
// =============================================================================

/// In-process backend. Everything is lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn slots(&self) -> ClientResult<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.slots
            .lock()
            .map_err(|_| ClientError::Storage("session lock poisoned".into()))
    }
}

impl SessionBackend for MemoryBackend {
    fn load(&self, key: &str) -> ClientResult<Option<String>> {
        Ok(self.slots()?.get(key).cloned())
    }

    fn store(&self, entries: &[(&str, &str)]) -> ClientResult<()> {
        let mut slots = self.slots()?;
        for (key, value) in entries {
            slots.insert((*key).to_string(), (*value).to_string());
        }
        Ok(())
    }

    fn remove(&self, keys: &[&str]) -> ClientResult<()> {
        let mut slots = self.slots()?;
        for key in keys {
            slots.remove(*key);
        }
        Ok(())
    }
}

// =============================================================================
// File Backend
// =============================================================================

/// Backend persisting all slots as one JSON object on disk.
///
/// Every write rewrites the whole file through a temp file and a rename, so
/// readers see either the old pair or the new pair.
#[derive(Debug)]
pub struct FileBackend {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileBackend {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Platform data directory location of the session file.
    ///
    /// - **Linux**: `~/.local/share/shopfront/session.json`
    /// - **macOS**: `~/Library/Application Support/com.shopfront.client/session.json`
    /// - **Windows**: `%APPDATA%\shopfront\client\data\session.json`
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "shopfront", "client")
            .map(|dirs| dirs.data_dir().join("session.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_slots(&self) -> ClientResult<BTreeMap<String, String>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == IoErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(ClientError::Storage(e.to_string())),
        };

        match serde_json::from_str(&contents) {
            Ok(slots) => Ok(slots),
            Err(e) => {
                warn!(path = ?self.path, error = %e, "Session file is malformed, ignoring it");
                Ok(BTreeMap::new())
            }
        }
    }

    fn write_slots(&self, slots: &BTreeMap<String, String>) -> ClientResult<()> {
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent).map_err(|e| ClientError::Storage(e.to_string()))?;

        let contents =
            serde_json::to_string_pretty(slots).map_err(|e| ClientError::Storage(e.to_string()))?;

        // Uniquely named, owner-only temp file in the same directory, renamed into place.
        let mut tmp =
            NamedTempFile::new_in(parent).map_err(|e| ClientError::Storage(e.to_string()))?;
        tmp.write_all(contents.as_bytes())
            .map_err(|e| ClientError::Storage(e.to_string()))?;
        tmp.persist(&self.path)
            .map_err(|e| ClientError::Storage(e.error.to_string()))?;

        debug!(path = ?self.path, "Session file written");
        Ok(())
    }

    fn guard(&self) -> ClientResult<std::sync::MutexGuard<'_, ()>> {
        self.lock
            .lock()
            .map_err(|_| ClientError::Storage("session lock poisoned".into()))
    }
}

impl SessionBackend for FileBackend {
    fn load(&self, key: &str) -> ClientResult<Option<String>> {
        let _guard = self.guard()?;
        Ok(self.read_slots()?.remove(key))
    }

    fn store(&self, entries: &[(&str, &str)]) -> ClientResult<()> {
        let _guard = self.guard()?;
        let mut slots = self.read_slots()?;
        for (key, value) in entries {
            slots.insert((*key).to_string(), (*value).to_string());
        }
        self.write_slots(&slots)
    }

    fn remove(&self, keys: &[&str]) -> ClientResult<()> {
        let _guard = self.guard()?;
        if !self.path.exists() {
            return Ok(());
        }
        let mut slots = self.read_slots()?;
        for key in keys {
            slots.remove(*key);
        }
        self.write_slots(&slots)
    }
}

// =============================================================================
// Session Store
// =============================================================================

/// Point-in-time view of the session.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<User>,
}

/// Typed access to the session slots.
///
/// Cheap to clone; clones share the same backend.
#[derive(Clone)]
pub struct SessionStore {
    backend: Arc<dyn SessionBackend>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore").finish_non_exhaustive()
    }
}

impl SessionStore {
    pub fn new(backend: impl SessionBackend + 'static) -> Self {
        SessionStore {
            backend: Arc::new(backend),
        }
    }

    pub fn from_arc(backend: Arc<dyn SessionBackend>) -> Self {
        SessionStore { backend }
    }

    /// Session that lives only as long as the process.
    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::new())
    }

    /// Current token, if any. An empty token counts as absent.
    pub fn get_token(&self) -> Option<String> {
        match self.backend.load(TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                warn!(error = %e, "Failed to read session token");
                None
            }
        }
    }

    pub fn set_token(&self, token: &str) -> ClientResult<()> {
        self.backend.store(&[(TOKEN_KEY, token)])
    }

    /// Cached user, if any. Malformed data is treated as absent.
    pub fn get_user(&self) -> Option<User> {
        let raw = match self.backend.load(USER_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(error = %e, "Failed to read cached user");
                return None;
            }
        };

        match serde_json::from_str(&raw).map(User::from_value_lenient) {
            Ok(Some(user)) => Some(user),
            Ok(None) => {
                warn!("Cached user is not an object, treating as signed out");
                None
            }
            Err(e) => {
                warn!(error = %e, "Cached user is malformed, treating as signed out");
                None
            }
        }
    }

    pub fn set_user(&self, user: &User) -> ClientResult<()> {
        let raw = encode_user(user)?;
        self.backend.store(&[(USER_KEY, &raw)])
    }

    /// Stores token and user together.
    pub fn set_session(&self, token: &str, user: &User) -> ClientResult<()> {
        let raw = encode_user(user)?;
        self.backend.store(&[(TOKEN_KEY, token), (USER_KEY, &raw)])
    }

    /// Removes token and user together.
    pub fn clear_session(&self) -> ClientResult<()> {
        self.backend.remove(&[TOKEN_KEY, USER_KEY])
    }

    pub fn snapshot(&self) -> Session {
        Session {
            token: self.get_token(),
            user: self.get_user(),
        }
    }
}

fn encode_user(user: &User) -> ClientResult<String> {
    serde_json::to_string(user).map_err(|e| ClientError::Storage(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shopfront_core::{EntityId, Role};

    fn sample_user() -> User {
        serde_json::from_value(json!({
            "id": 7,
            "name": "Ada",
            "email": "ada@example.com",
            "role": "admin",
            "preferences": { "currency": "GBP" }
        }))
        .unwrap()
    }

    #[test]
    fn test_user_round_trip() {
        let store = SessionStore::in_memory();
        let user = sample_user();

        store.set_user(&user).unwrap();
        assert_eq!(store.get_user(), Some(user));
    }

    #[test]
    fn test_clear_session_from_any_state() {
        let store = SessionStore::in_memory();
        store.clear_session().unwrap();
        assert_eq!(store.snapshot(), Session::default());

        store.set_token("T").unwrap();
        store.clear_session().unwrap();
        assert!(store.get_token().is_none());

        store.set_session("T", &sample_user()).unwrap();
        store.clear_session().unwrap();
        assert!(store.get_token().is_none());
        assert!(store.get_user().is_none());
    }

    #[test]
    fn test_malformed_user_is_absent() {
        let backend = MemoryBackend::new();
        backend.store(&[(USER_KEY, "{not json")]).unwrap();
        let store = SessionStore::new(backend);
        assert!(store.get_user().is_none());
    }

    #[test]
    fn test_empty_token_is_absent() {
        let store = SessionStore::in_memory();
        store.set_token("").unwrap();
        assert!(store.get_token().is_none());
    }

    #[test]
    fn test_clones_share_backend() {
        let store = SessionStore::in_memory();
        let other = store.clone();
        store.set_session("T", &sample_user()).unwrap();

        let session = other.snapshot();
        assert_eq!(session.token.as_deref(), Some("T"));
        assert_eq!(session.user.unwrap().id, Some(EntityId::Number(7)));
    }

    #[test]
    fn test_file_backend_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let store = SessionStore::new(FileBackend::new(&path));
        store.set_session("T", &sample_user()).unwrap();

        let reopened = SessionStore::new(FileBackend::new(&path));
        assert_eq!(reopened.get_token().as_deref(), Some("T"));
        assert_eq!(reopened.get_user().unwrap().role, Some(Role::Admin));

        reopened.clear_session().unwrap();
        let raw: BTreeMap<String, String> =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert!(raw.is_empty());
    }

    #[test]
    fn test_file_backend_writes_pair_together() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        SessionStore::new(FileBackend::new(&path))
            .set_session("T", &sample_user())
            .unwrap();

        let raw: BTreeMap<String, String> =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw.get(TOKEN_KEY).map(String::as_str), Some("T"));
        assert!(raw.contains_key(USER_KEY));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_file_backend_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        SessionStore::new(FileBackend::new(&path))
            .set_session("SECRET", &sample_user())
            .unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o077, 0, "session file mode is {:o}", mode & 0o777);
    }

    #[test]
    fn test_file_backend_tolerates_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "garbage").unwrap();

        let store = SessionStore::new(FileBackend::new(&path));
        assert!(store.get_token().is_none());

        store.set_token("fresh").unwrap();
        assert_eq!(store.get_token().as_deref(), Some("fresh"));
    }

    #[test]
    fn test_file_backend_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(FileBackend::new(dir.path().join("absent.json")));
        assert_eq!(store.snapshot(), Session::default());
        store.clear_session().unwrap();
    }
}
