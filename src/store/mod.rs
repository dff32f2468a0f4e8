//! Record persistence layer
//!
//! This module provides the local record store the rest of the crate reads
//! and writes:
//!
//! - **backend**: the `StorageBackend` trait plus file and in-memory
//!   implementations
//! - **records**: the `RecordStore` facade (JSON encode/decode,
//!   default-value fallback) and the well-known key names
//! - **error**: backend error types
//!
//! # Example
//!
//! ```rust
//! use orelax::store::{keys, MemoryBackend, RecordStore};
//!
//! let mut store = RecordStore::new(MemoryBackend::new());
//! store.set(keys::IS_LOGGED_IN, &true);
//! assert!(store.get::<bool>(keys::IS_LOGGED_IN, false));
//! ```

pub mod backend;
pub mod error;
pub mod records;

// Re-export commonly used types
pub use backend::{FileBackend, MemoryBackend, StorageBackend};
pub use error::{StoreError, StoreResult};
pub use records::{keys, RecordStore};
