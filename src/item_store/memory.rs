//! # In-Memory Backend
//!
//! Volatile store, mainly for tests. `set_unavailable` simulates a missing
//! backing document.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use super::backend::ItemStore;
use super::errors::{StoreError, StoreResult};
use crate::catalog::Item;

/// Item store holding the collection in process memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RwLock<Vec<Item>>,
    unavailable: AtomicBool,
}

impl MemoryStore {
    /// Create a store seeded with `items`
    pub fn new(items: Vec<Item>) -> Self {
        Self {
            items: RwLock::new(items),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Make every subsequent load and save fail as if the backing document
    /// had disappeared
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> StoreResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Missing("memory".into()));
        }
        Ok(())
    }
}

impl ItemStore for MemoryStore {
    fn load(&self) -> StoreResult<Vec<Item>> {
        self.check_available()?;
        self.items
            .read()
            .map(|items| items.clone())
            .map_err(|_| StoreError::Internal("Lock poisoned".into()))
    }

    fn save(&self, items: &[Item]) -> StoreResult<()> {
        self.check_available()?;
        let mut guard = self
            .items
            .write()
            .map_err(|_| StoreError::Internal("Lock poisoned".into()))?;
        *guard = items.to_vec();
        Ok(())
    }
}
