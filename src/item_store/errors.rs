//! # Item Store Errors

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Item store errors
///
/// Every variant surfaces as a server error at the HTTP boundary; the store
/// never retries.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Backing document does not exist
    #[error("Item store not found: {0}")]
    Missing(String),

    /// Backing document exists but is not a valid item collection
    #[error("Item store is corrupt: {0}")]
    Corrupt(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl StoreError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        500
    }
}
