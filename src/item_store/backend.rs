//! # Item Store Trait

use std::path::Path;

use super::errors::StoreResult;
use crate::catalog::Item;

/// Backend trait for the item collection
///
/// The collection is the unit of persistence: it is always loaded and saved
/// whole. Implementations do not serialize writers; callers that need
/// read-modify-write atomicity hold their own lock around `load` + `save`.
pub trait ItemStore: Send + Sync + std::fmt::Debug {
    /// Load the full, ordered item collection
    fn load(&self) -> StoreResult<Vec<Item>>;

    /// Replace the stored collection with `items`
    fn save(&self, items: &[Item]) -> StoreResult<()>;

    /// Filesystem location backing this store, if any
    fn location(&self) -> Option<&Path> {
        None
    }
}
