//! Record store error types
//!
//! These errors surface from the pluggable backends. The [`RecordStore`]
//! facade swallows them and substitutes defaults, per the storage contract;
//! they exist so backends stay honest about what can fail.
//!
//! [`RecordStore`]: crate::store::RecordStore

use thiserror::Error;

/// Errors that can occur in a storage backend
#[derive(Error, Debug)]
pub enum StoreError {
    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Encoding or decoding a record payload failed
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

/// Result type alias for backend operations
pub type StoreResult<T> = Result<T, StoreError>;
