//! Metrics registry
//!
//! - Counters only
//! - Monotonic increase, reset only on process start
//! - Thread-safe, lock-free

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Operational counters for the catalog service
///
/// All counters use Relaxed ordering; readers only need eventual values.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    requests_served: AtomicU64,
    items_listed: AtomicU64,
    items_created: AtomicU64,
    lookups_not_found: AtomicU64,
    invalid_payloads: AtomicU64,
    stats_cache_hits: AtomicU64,
    stats_cache_misses: AtomicU64,
    stats_invalidations: AtomicU64,
    store_errors: AtomicU64,
}

impl MetricsRegistry {
    /// Create a new metrics registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_requests(&self) {
        self.requests_served.fetch_add(1, Ordering::Relaxed);
    }

    /// Add the number of items returned by a listing
    pub fn add_items_listed(&self, count: u64) {
        self.items_listed.fetch_add(count, Ordering::Relaxed);
    }

    pub fn increment_items_created(&self) {
        self.items_created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_not_found(&self) {
        self.lookups_not_found.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_invalid_payloads(&self) {
        self.invalid_payloads.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_cache_hits(&self) {
        self.stats_cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_cache_misses(&self) {
        self.stats_cache_misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_invalidations(&self) {
        self.stats_invalidations.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_store_errors(&self) {
        self.store_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Get all metrics as a snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            requests_served: self.requests_served.load(Ordering::Relaxed),
            items_listed: self.items_listed.load(Ordering::Relaxed),
            items_created: self.items_created.load(Ordering::Relaxed),
            lookups_not_found: self.lookups_not_found.load(Ordering::Relaxed),
            invalid_payloads: self.invalid_payloads.load(Ordering::Relaxed),
            stats_cache_hits: self.stats_cache_hits.load(Ordering::Relaxed),
            stats_cache_misses: self.stats_cache_misses.load(Ordering::Relaxed),
            stats_invalidations: self.stats_invalidations.load(Ordering::Relaxed),
            store_errors: self.store_errors.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time snapshot of all metrics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub requests_served: u64,
    pub items_listed: u64,
    pub items_created: u64,
    pub lookups_not_found: u64,
    pub invalid_payloads: u64,
    pub stats_cache_hits: u64,
    pub stats_cache_misses: u64,
    pub stats_invalidations: u64,
    pub store_errors: u64,
}
