//! # Stats Aggregator
//!
//! Count and average price over the whole collection, memoized in a
//! process-wide cache that is emptied whenever the store changes.
//!
//! The cache carries a generation counter. A recomputation records the
//! generation it started under and only publishes its result if no
//! invalidation happened meanwhile, so a write racing a recomputation can
//! never leave a pre-write snapshot cached.

use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};

use super::item::Item;

/// Aggregate over all items, as served by `GET /api/stats`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    pub total: usize,
    pub average_price: f64,
}

/// Compute the aggregate
///
/// An empty collection averages to `0`.
pub fn compute_stats(items: &[Item]) -> StatsSnapshot {
    let total = items.len();
    let average_price = if total == 0 {
        0.0
    } else {
        items.iter().map(|item| item.price).sum::<f64>() / total as f64
    };

    StatsSnapshot {
        total,
        average_price,
    }
}

/// Result of consulting the cache
#[derive(Debug, Clone, PartialEq)]
pub enum CacheLookup {
    Hit(Arc<StatsSnapshot>),
    /// Nothing cached; `generation` must be handed back to [`StatsCache::fill`]
    Miss { generation: u64 },
}

#[derive(Debug, Default)]
struct CacheState {
    snapshot: Option<Arc<StatsSnapshot>>,
    generation: u64,
}

/// Process-wide memo of the last computed [`StatsSnapshot`]
///
/// No time-based expiry: a snapshot lives until [`StatsCache::invalidate`].
#[derive(Debug, Default)]
pub struct StatsCache {
    state: Mutex<CacheState>,
}

impl StatsCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, CacheState> {
        // The state is two plain fields; a panic elsewhere cannot leave it
        // half-updated.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Cached snapshot, or the generation a recomputation should fill
    pub fn lookup(&self) -> CacheLookup {
        let state = self.state();
        match &state.snapshot {
            Some(snapshot) => CacheLookup::Hit(Arc::clone(snapshot)),
            None => CacheLookup::Miss {
                generation: state.generation,
            },
        }
    }

    /// Publish a snapshot computed under `generation`
    ///
    /// Dropped (but still returned) if the cache was invalidated since.
    pub fn fill(&self, generation: u64, snapshot: StatsSnapshot) -> Arc<StatsSnapshot> {
        let snapshot = Arc::new(snapshot);
        let mut state = self.state();
        if state.generation == generation {
            state.snapshot = Some(Arc::clone(&snapshot));
        }
        snapshot
    }

    /// Serve from cache or recompute with `compute`
    ///
    /// Returns the snapshot and whether it was a cache hit. A failed
    /// recomputation leaves the cache empty.
    pub fn get_or_compute<E, F>(&self, compute: F) -> Result<(Arc<StatsSnapshot>, bool), E>
    where
        F: FnOnce() -> Result<StatsSnapshot, E>,
    {
        match self.lookup() {
            CacheLookup::Hit(snapshot) => Ok((snapshot, true)),
            CacheLookup::Miss { generation } => {
                let snapshot = compute()?;
                Ok((self.fill(generation, snapshot), false))
            }
        }
    }

    /// Drop the cached snapshot and bump the generation
    ///
    /// Returns the new generation.
    pub fn invalidate(&self) -> u64 {
        let mut state = self.state();
        state.snapshot = None;
        state.generation += 1;
        state.generation
    }

    /// Current generation (number of invalidations so far)
    pub fn generation(&self) -> u64 {
        self.state().generation
    }

    /// Whether a snapshot is currently cached
    pub fn is_populated(&self) -> bool {
        self.state().snapshot.is_some()
    }
}
