//! # Catalog Service
//!
//! The operations the HTTP layer exposes: list, lookup, create, stats.
//!
//! Every call reads the store afresh; the only in-memory state is the stats
//! cache. Creation is read-append-write under `write_lock`, so concurrent
//! creations inside this process cannot drop each other's item. Writers in
//! other processes are not coordinated.

use std::path::Path;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use serde_json::Value;

use super::errors::{CatalogError, CatalogResult};
use super::item::{Item, NewItem};
use super::query::{parse_leading_int, run_query, ItemPage, ItemQuery, DEFAULT_PAGE_SIZE};
use super::stats::{compute_stats, StatsCache, StatsSnapshot};
use crate::item_store::{ItemStore, StoreError, StoreResult};
use crate::observability::{log_event_with_fields, Event, MetricsRegistry};

/// Catalog operations over an [`ItemStore`]
#[derive(Debug)]
pub struct CatalogService {
    store: Arc<dyn ItemStore>,
    stats: Arc<StatsCache>,
    metrics: Arc<MetricsRegistry>,
    write_lock: Mutex<()>,
    default_page_size: usize,
}

impl CatalogService {
    /// Create a service with its own stats cache and metrics
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self::with_parts(
            store,
            Arc::new(StatsCache::new()),
            Arc::new(MetricsRegistry::new()),
        )
    }

    /// Create a service sharing an existing cache and metrics registry
    pub fn with_parts(
        store: Arc<dyn ItemStore>,
        stats: Arc<StatsCache>,
        metrics: Arc<MetricsRegistry>,
    ) -> Self {
        Self {
            store,
            stats,
            metrics,
            write_lock: Mutex::new(()),
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Override the page size used when `pageSize` is absent
    pub fn with_default_page_size(mut self, page_size: usize) -> Self {
        self.default_page_size = page_size.max(1);
        self
    }

    pub fn stats_cache(&self) -> Arc<StatsCache> {
        Arc::clone(&self.stats)
    }

    pub fn metrics(&self) -> Arc<MetricsRegistry> {
        Arc::clone(&self.metrics)
    }

    /// Filesystem path of the backing document, if the store has one
    pub fn store_location(&self) -> Option<&Path> {
        self.store.location()
    }

    /// `GET /api/items`
    pub fn list_items(&self, query: &ItemQuery) -> CatalogResult<ItemPage> {
        let items = self.load()?;
        let page = run_query(items, query, self.default_page_size);
        self.metrics.add_items_listed(page.items.len() as u64);
        Ok(page)
    }

    /// `GET /api/items/:id`
    ///
    /// `raw_id` is parsed leniently; something that is not an id at all is
    /// simply not found.
    pub fn get_item(&self, raw_id: &str) -> CatalogResult<Item> {
        let items = self.load()?;

        let found = parse_leading_int(raw_id)
            .and_then(|id| items.into_iter().find(|item| item.id == id));

        found.ok_or_else(|| {
            self.metrics.increment_not_found();
            log_event_with_fields(Event::ItemNotFound, &[("id", raw_id)]);
            CatalogError::NotFound
        })
    }

    /// `POST /api/items`
    ///
    /// The id is the current time in milliseconds. Two creations landing in
    /// the same millisecond get the same id; that collision is not detected.
    pub fn create_item(&self, body: Value) -> CatalogResult<Item> {
        let new_item = NewItem::from_json(body).map_err(|e| {
            self.metrics.increment_invalid_payloads();
            e
        })?;

        let item = {
            let _guard = self
                .write_lock
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());

            let mut items = self.load()?;
            let item = new_item.with_id(Utc::now().timestamp_millis());
            items.push(item.clone());

            self.store.save(&items).map_err(|e| {
                self.metrics.increment_store_errors();
                log_event_with_fields(Event::StoreWriteFailed, &[("error", e.to_string().as_str())]);
                CatalogError::from(e)
            })?;
            item
        };

        self.invalidate_stats("write");
        self.metrics.increment_items_created();
        log_event_with_fields(
            Event::ItemCreated,
            &[("id", item.id.to_string().as_str()), ("name", item.name.as_str())],
        );
        Ok(item)
    }

    /// `GET /api/stats`
    ///
    /// Served from cache when populated; otherwise recomputed from the store.
    pub fn stats(&self) -> CatalogResult<Arc<StatsSnapshot>> {
        let (snapshot, hit) = self.stats.get_or_compute(|| {
            log_event_with_fields(Event::StatsCacheMiss, &[]);
            self.load().map(|items| compute_stats(&items))
        })?;

        if hit {
            self.metrics.increment_cache_hits();
        } else {
            self.metrics.increment_cache_misses();
        }
        Ok(snapshot)
    }

    /// Clear the cached stats so the next request recomputes them
    ///
    /// `source` only labels the log line (`write`, `watcher`, ...).
    pub fn invalidate_stats(&self, source: &str) {
        invalidate(&self.stats, &self.metrics, source);
    }

    fn load(&self) -> CatalogResult<Vec<Item>> {
        self.store.load().map_err(|e| self.store_failure(e))
    }

    fn store_failure(&self, err: StoreError) -> CatalogError {
        self.metrics.increment_store_errors();
        log_event_with_fields(Event::StoreReadFailed, &[("error", err.to_string().as_str())]);
        CatalogError::Store(err)
    }
}

/// Invalidate `cache`, recording it in `metrics` and the log
///
/// The store watcher calls this directly; it holds no service.
pub fn invalidate(cache: &StatsCache, metrics: &MetricsRegistry, source: &str) {
    let generation = cache.invalidate();
    metrics.increment_invalidations();
    log_event_with_fields(
        Event::StatsCacheInvalidated,
        &[("generation", generation.to_string().as_str()), ("source", source)],
    );
}

/// Seed collection written by `catalogd init`
pub fn seed_items() -> Vec<Item> {
    [
        (1, "Laptop Pro", "Electronics", 2499.0),
        (2, "Noise Cancelling Headphones", "Electronics", 399.0),
        (3, "Ultra-Wide Monitor", "Electronics", 999.0),
        (4, "Ergonomic Chair", "Furniture", 799.0),
        (5, "Standing Desk", "Furniture", 1199.0),
    ]
    .into_iter()
    .map(|(id, name, category, price)| Item {
        id,
        name: name.to_string(),
        category: category.to_string(),
        price,
    })
    .collect()
}

/// Write the seed collection into `store`
pub fn seed_store(store: &dyn ItemStore) -> StoreResult<usize> {
    let items = seed_items();
    store.save(&items)?;
    Ok(items.len())
}
