//! # Catalog
//!
//! Items, the query engine, the stats aggregator and the service tying them
//! to an item store.

pub mod errors;
pub mod item;
pub mod query;
pub mod service;
pub mod stats;

pub use errors::{CatalogError, CatalogResult};
pub use item::{Item, NewItem};
pub use query::{ItemPage, ItemQuery, Pagination, QueryMode, DEFAULT_PAGE_SIZE};
pub use service::{invalidate, seed_items, seed_store, CatalogService};
pub use stats::{compute_stats, StatsCache, StatsSnapshot};
