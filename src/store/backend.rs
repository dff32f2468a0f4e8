//! Pluggable storage backends
//!
//! A backend stores opaque JSON strings under flat keys, mirroring the
//! key/value layout the original deployment kept in browser storage.
//! Two implementations:
//!
//! - [`FileBackend`]: one document per key under a data directory
//! - [`MemoryBackend`]: HashMap-backed, for tests and ephemeral sessions
//!
//! Backends report real failures; the [`RecordStore`](super::RecordStore)
//! facade decides what to do with them.

use crate::store::error::StoreResult;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Storage behind the record store
pub trait StorageBackend {
    /// Read the raw payload at `key`, `None` when absent
    fn read(&self, key: &str) -> StoreResult<Option<String>>;

    /// Write the raw payload at `key`, replacing any previous value
    fn write(&mut self, key: &str, value: &str) -> StoreResult<()>;

    /// Delete `key`; deleting an absent key is not an error
    fn remove(&mut self, key: &str) -> StoreResult<()>;

    /// Wipe all keys
    fn clear(&mut self) -> StoreResult<()>;
}

/// File-per-key backend
///
/// Each key becomes `<dir>/<key>.json`. Writes replace the whole document;
/// there is no locking, so concurrent processes race with last-write-wins.
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    /// Open (creating if needed) a backend rooted at `dir`
    pub fn open(dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl StorageBackend for FileBackend {
    fn read(&self, key: &str) -> StoreResult<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(std::fs::read_to_string(path)?))
    }

    fn write(&mut self, key: &str, value: &str) -> StoreResult<()> {
        std::fs::write(self.key_path(key), value)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        let path = self.key_path(key);
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }

    fn clear(&mut self) -> StoreResult<()> {
        for entry in std::fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().map(|e| e == "json").unwrap_or(false) {
                std::fs::remove_file(path)?;
            }
        }
        Ok(())
    }
}

/// In-memory backend for tests and throwaway sessions
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: HashMap<String, String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryBackend {
    fn read(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        self.entries.remove(key);
        Ok(())
    }

    fn clear(&mut self) -> StoreResult<()> {
        self.entries.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_file_backend_read_write_remove() {
        let dir = tempdir().unwrap();
        let mut backend = FileBackend::open(dir.path()).unwrap();

        assert!(backend.read("user").unwrap().is_none());

        backend.write("user", "{\"id\":\"1\"}").unwrap();
        assert_eq!(backend.read("user").unwrap().unwrap(), "{\"id\":\"1\"}");

        backend.remove("user").unwrap();
        assert!(backend.read("user").unwrap().is_none());

        // Removing again is fine
        backend.remove("user").unwrap();
    }

    #[test]
    fn test_file_backend_clear() {
        let dir = tempdir().unwrap();
        let mut backend = FileBackend::open(dir.path()).unwrap();

        backend.write("properties", "[]").unwrap();
        backend.write("bookings", "[]").unwrap();
        backend.clear().unwrap();

        assert!(backend.read("properties").unwrap().is_none());
        assert!(backend.read("bookings").unwrap().is_none());
    }

    #[test]
    fn test_memory_backend() {
        let mut backend = MemoryBackend::new();
        backend.write("chats", "[]").unwrap();
        assert_eq!(backend.read("chats").unwrap().unwrap(), "[]");
        backend.clear().unwrap();
        assert!(backend.read("chats").unwrap().is_none());
    }
}
