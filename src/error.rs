//! Operation error types
//!
//! Errors surfaced by the catalog, booking, chat and account operations.
//! Validation failures carry the human-readable message the screens showed
//! as blocking alerts; absence is an explicit `NotFound` instead of the
//! original's perpetual loading state.

use thiserror::Error;

/// Errors that can occur in marketplace operations
#[derive(Error, Debug)]
pub enum MarketError {
    /// A required field is missing or malformed
    #[error("Validation error: {0}")]
    Validation(String),

    /// A referenced record does not exist
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// Login was attempted with credentials that match no stored user
    #[error("Invalid email or password")]
    InvalidCredentials,
}

impl MarketError {
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        MarketError::NotFound {
            kind,
            id: id.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        MarketError::Validation(message.into())
    }
}

/// Result type alias for marketplace operations
pub type MarketResult<T> = Result<T, MarketError>;
