//! The record store facade
//!
//! `RecordStore` wraps a [`StorageBackend`] with JSON encode/decode and
//! default-value fallback. Its contract is deliberately forgiving: `get`
//! always yields a value (the stored one or the caller's default) and `set`
//! never fails the caller. Backend and decode failures are logged at `warn`
//! and swallowed, matching the storage semantics the screens were written
//! against.
//!
//! Writes replace whole collections. There is no cross-process coordination;
//! two processes sharing a data directory race with last-write-wins.

use crate::store::backend::StorageBackend;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Well-known storage keys
pub mod keys {
    /// The acting user record
    pub const USER: &str = "user";
    /// All known users (chat counterparties included)
    pub const USERS: &str = "users";
    pub const PROPERTIES: &str = "properties";
    pub const BOOKINGS: &str = "bookings";
    pub const PURCHASES: &str = "purchases";
    pub const CHATS: &str = "chats";
    pub const IS_LOGGED_IN: &str = "isLoggedIn";
    /// Seed data version stamp, compared by the seed loader
    pub const DATA_VERSION: &str = "dataVersion";
    /// One-time initialization flag
    pub const INITIALIZED: &str = "initialized";
}

/// Typed key/value store over an injected backend
pub struct RecordStore {
    backend: Box<dyn StorageBackend>,
}

impl RecordStore {
    pub fn new(backend: impl StorageBackend + 'static) -> Self {
        Self {
            backend: Box::new(backend),
        }
    }

    /// Read and decode the value at `key`, or `default` when the key is
    /// absent, the payload is corrupt, or the backend fails
    pub fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let raw = match self.backend.read(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return default,
            Err(e) => {
                tracing::warn!("Failed to read key {key:?}: {e}");
                return default;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Corrupt payload under key {key:?}: {e}");
                default
            }
        }
    }

    /// Encode and write `value` under `key`; failures are logged, not returned
    pub fn set<T: Serialize>(&mut self, key: &str, value: &T) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("Failed to encode value for key {key:?}: {e}");
                return;
            }
        };

        if let Err(e) = self.backend.write(key, &raw) {
            tracing::warn!("Failed to write key {key:?}: {e}");
        }
    }

    /// Delete `key`
    pub fn remove(&mut self, key: &str) {
        if let Err(e) = self.backend.remove(key) {
            tracing::warn!("Failed to remove key {key:?}: {e}");
        }
    }

    /// Wipe all keys
    pub fn clear(&mut self) {
        if let Err(e) = self.backend.clear() {
            tracing::warn!("Failed to clear store: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::backend::{FileBackend, MemoryBackend};
    use crate::store::error::{StoreResult, StoreError};
    use crate::model::{Booking, BookingStatus, RentType};
    use tempfile::tempdir;

    fn memory_store() -> RecordStore {
        RecordStore::new(MemoryBackend::new())
    }

    #[test]
    fn test_default_fallback_for_missing_key() {
        let store = memory_store();
        let bookings: Vec<Booking> = store.get(keys::BOOKINGS, Vec::new());
        assert!(bookings.is_empty());

        let flag: bool = store.get(keys::IS_LOGGED_IN, false);
        assert!(!flag);
    }

    #[test]
    fn test_round_trip_collection() {
        let mut store = memory_store();
        let bookings = vec![Booking {
            id: "100-0".into(),
            property_id: "1".into(),
            user_id: "1".into(),
            date: "2023-06-15".into(),
            adults: 2,
            status: BookingStatus::Pending,
            rent_type: RentType::Daily,
        }];

        store.set(keys::BOOKINGS, &bookings);
        let loaded: Vec<Booking> = store.get(keys::BOOKINGS, Vec::new());
        assert_eq!(loaded, bookings);
    }

    #[test]
    fn test_corrupt_payload_yields_default() {
        struct CorruptBackend;
        impl StorageBackend for CorruptBackend {
            fn read(&self, _key: &str) -> StoreResult<Option<String>> {
                Ok(Some("{not json".into()))
            }
            fn write(&mut self, _key: &str, _value: &str) -> StoreResult<()> {
                Ok(())
            }
            fn remove(&mut self, _key: &str) -> StoreResult<()> {
                Ok(())
            }
            fn clear(&mut self) -> StoreResult<()> {
                Ok(())
            }
        }

        let store = RecordStore::new(CorruptBackend);
        let value: Vec<Booking> = store.get(keys::BOOKINGS, Vec::new());
        assert!(value.is_empty());
    }

    #[test]
    fn test_failing_backend_never_propagates() {
        struct FailingBackend;
        impl StorageBackend for FailingBackend {
            fn read(&self, _key: &str) -> StoreResult<Option<String>> {
                Err(StoreError::Io(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    "quota exceeded",
                )))
            }
            fn write(&mut self, _key: &str, _value: &str) -> StoreResult<()> {
                Err(StoreError::Io(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    "quota exceeded",
                )))
            }
            fn remove(&mut self, _key: &str) -> StoreResult<()> {
                Ok(())
            }
            fn clear(&mut self) -> StoreResult<()> {
                Ok(())
            }
        }

        let mut store = RecordStore::new(FailingBackend);
        // set swallows the error, get substitutes the default
        store.set(keys::IS_LOGGED_IN, &true);
        let flag: bool = store.get(keys::IS_LOGGED_IN, false);
        assert!(!flag);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut store = memory_store();
        store.set(keys::IS_LOGGED_IN, &true);
        store.remove(keys::IS_LOGGED_IN);
        assert!(!store.get::<bool>(keys::IS_LOGGED_IN, false));

        store.set(keys::DATA_VERSION, &3u32);
        store.clear();
        assert_eq!(store.get::<u32>(keys::DATA_VERSION, 0), 0);
    }

    #[test]
    fn test_file_backend_persists_across_sessions() {
        let dir = tempdir().unwrap();

        {
            let mut store = RecordStore::new(FileBackend::open(dir.path()).unwrap());
            store.set(keys::DATA_VERSION, &5u32);
        }

        let store = RecordStore::new(FileBackend::open(dir.path()).unwrap());
        assert_eq!(store.get::<u32>(keys::DATA_VERSION, 0), 5);
    }
}
