//! Durable key/value storage backends.
//!
//! Models the browser-profile-scoped store the drafts live in: synchronous
//! get/set/remove by string key, no transactionality, values are opaque
//! strings. Implementations only need to be honest about I/O failures; the
//! draft store above this seam decides how to degrade.

use crate::StorageError;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

/// Synchronous string key/value store.
pub trait KeyValueStorage {
    /// Returns the stored value, or `None` when the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes `key`; absent keys are a no-op.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Default)]
struct MemoryState {
    entries: HashMap<String, String>,
    writes: u64,
}

/// In-memory storage backend.
///
/// Clones share the same underlying map, modelling several consumers of one
/// store. The write counter exists so tests can assert on debounce
/// coalescing (one burst of edits, one write).
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    inner: Arc<Mutex<MemoryState>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `set` calls that reached this backend.
    pub fn write_count(&self) -> u64 {
        self.lock().writes
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.lock().entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut state = self.lock();
        state.entries.insert(key.to_string(), value.to_string());
        state.writes += 1;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.lock().entries.remove(key);
        Ok(())
    }
}

/// File-backed storage: one file per key under a fixed directory.
///
/// Keys are sanitised into safe file names, so keys like `nursia:drafts`
/// never escape the directory.
#[derive(Clone, Debug)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Creates a backend rooted at `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidDirectory`] if `dir` does not exist or
    /// is not a directory.
    pub fn new(dir: &Path) -> Result<Self, StorageError> {
        if !dir.is_dir() {
            return Err(StorageError::InvalidDirectory(format!(
                "not a directory: {}",
                dir.display()
            )));
        }
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    fn file_path(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                    c
                } else {
                    '-'
                }
            })
            .collect();
        self.dir.join(name)
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.file_path(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::write(self.file_path(key), value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.file_path(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_storage_round_trips_and_counts_writes() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("k").expect("get"), None);

        storage.set("k", "v1").expect("set");
        storage.set("k", "v2").expect("set");
        assert_eq!(storage.get("k").expect("get").as_deref(), Some("v2"));
        assert_eq!(storage.write_count(), 2);
    }

    #[test]
    fn memory_storage_clones_share_state() {
        let a = MemoryStorage::new();
        let b = a.clone();
        a.set("k", "v").expect("set");
        assert_eq!(b.get("k").expect("get").as_deref(), Some("v"));
    }

    #[test]
    fn file_storage_round_trips_values() {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = FileStorage::new(dir.path()).expect("storage");

        storage.set("nursia:drafts", "{}").expect("set");
        assert_eq!(
            storage.get("nursia:drafts").expect("get").as_deref(),
            Some("{}")
        );

        storage.remove("nursia:drafts").expect("remove");
        assert_eq!(storage.get("nursia:drafts").expect("get"), None);
        // removing again stays a no-op
        storage.remove("nursia:drafts").expect("remove");
    }

    #[test]
    fn file_storage_rejects_missing_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("nope");
        assert!(matches!(
            FileStorage::new(&missing),
            Err(StorageError::InvalidDirectory(_))
        ));
    }

    #[test]
    fn file_storage_sanitises_keys_into_file_names() {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = FileStorage::new(dir.path()).expect("storage");
        storage.set("a/b:c", "x").expect("set");
        assert!(dir.path().join("a-b-c").is_file());
    }
}
