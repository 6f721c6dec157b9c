//! # Item Store Module
//!
//! Persistence for the item collection. The collection is read and written
//! whole; there is no indexing and no partial write.

pub mod backend;
pub mod errors;
pub mod json_file;
pub mod memory;

pub use backend::ItemStore;
pub use errors::{StoreError, StoreResult};
pub use json_file::{JsonFileStore, ITEMS_FILE};
pub use memory::MemoryStore;
