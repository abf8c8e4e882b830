//! Durable client-side key-value storage.
//!
//! SYSTEM CONTEXT
//! ==============
//! Plays the part browser `localStorage` plays for a single-page app: string
//! keys, string values, survives restarts. The session store, the router
//! guard and the auth request hook all read the same `Arc<dyn Storage>`, so
//! durable storage stays the single source of truth for the bearer token.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Mutex;

/// Durable key holding the bearer token.
pub const TOKEN_KEY: &str = "token";
/// Durable key for the cached profile. Never written; removed on 401 teardown.
pub const USER_INFO_KEY: &str = "userInfo";

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage io failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("storage file is not a JSON object: {0}")]
    Json(#[from] serde_json::Error),
}

/// String key-value store with `localStorage` semantics.
pub trait Storage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Non-empty token from durable storage, if any.
pub fn read_token(storage: &dyn Storage) -> Option<String> {
    storage.get(TOKEN_KEY).filter(|token| !token.is_empty())
}

// =============================================================================
// MEMORY
// =============================================================================

/// Process-local storage; nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, String>> {
        self.entries.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries().remove(key);
        Ok(())
    }
}

// =============================================================================
// FILE
// =============================================================================

/// JSON-object file storage. Every call re-reads the file and every write
/// replaces it atomically, so readers never see a half-written object.
/// `write_lock` serializes writers within one instance only; across
/// processes the last writer wins.
///
/// A file that does not parse reads as empty and is overwritten by the next
/// `set` or `remove`, the way a cleared `localStorage` would behave.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), write_lock: Mutex::new(()) }
    }

    fn load(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => return Err(StorageError::Io { path: self.path.clone(), source }),
        };
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&raw)?)
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| StorageError::Io { path: parent.to_path_buf(), source })?;
        }
        let rendered = serde_json::to_string_pretty(entries)?;
        let staging = self.staging_path();
        std::fs::write(&staging, rendered).map_err(|source| StorageError::Io { path: staging.clone(), source })?;
        std::fs::rename(&staging, &self.path).map_err(|source| {
            let _ = std::fs::remove_file(&staging);
            StorageError::Io { path: self.path.clone(), source }
        })
    }

    /// Sibling of the target, so the final rename stays on one filesystem.
    fn staging_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(std::ffi::OsStr::to_os_string).unwrap_or_default();
        name.push(format!(".{}.tmp", std::process::id()));
        self.path.with_file_name(name)
    }

    fn update(&self, apply: impl FnOnce(&mut BTreeMap<String, String>)) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let mut entries = match self.load() {
            Ok(entries) => entries,
            Err(StorageError::Json(e)) => {
                tracing::warn!(error = %e, path = %self.path.display(), "storage file unreadable; starting fresh");
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        apply(&mut entries);
        self.save(&entries)
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        match self.load() {
            Ok(mut entries) => entries.remove(key),
            Err(e) => {
                tracing::warn!(error = %e, path = %self.path.display(), "storage read failed");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.update(|entries| {
            entries.insert(key.to_owned(), value.to_owned());
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.update(|entries| {
            entries.remove(key);
        })
    }
}
