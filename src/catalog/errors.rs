//! # Catalog Errors

use thiserror::Error;

use crate::item_store::StoreError;

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Catalog errors
#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    /// Requested id absent (or not an id at all)
    #[error("Item not found")]
    NotFound,

    /// Create payload failed the shape check
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// Backing store unreadable, unparseable or unwritable
    #[error("{0}")]
    Store(#[from] StoreError),
}

impl CatalogError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            CatalogError::NotFound => 404,
            CatalogError::InvalidPayload(_) => 400,
            CatalogError::Store(e) => e.status_code(),
        }
    }
}
