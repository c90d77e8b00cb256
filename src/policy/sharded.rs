//! # Hash-sharded wrapper
//!
//! Fans a cache out over `N` independent inner caches, each of capacity
//! `ceil(C / N)` and each behind its own mutex, so operations on different
//! shards never contend. A key is routed by `hash(key) mod N` and therefore
//! always lands on the same shard; keys routed to one shard never appear in
//! another.
//!
//! ```text
//!             put/get(key)
//!                  │
//!                  ▼
//!        shard = hash(key) mod N
//!   ┌─────────┬─────────┬─────────┬─────────┐
//!   │ Shard 0 │ Shard 1 │ Shard 2 │ Shard 3 │   each: any Cache impl,
//!   │ [mutex] │ [mutex] │ [mutex] │ [mutex] │   capacity ceil(C/N)
//!   └─────────┴─────────┴─────────┴─────────┘
//! ```
//!
//! A shard count of 0 falls back to the hardware concurrency hint. The
//! wrapper adds no lock of its own.

use std::hash::Hash;

use crate::ds::shard::ShardSelector;
use crate::policy::arc::ArcCache;
use crate::policy::lfu::LfuCache;
use crate::policy::lfu_avg::LfuAvgCache;
use crate::policy::lru::LruCache;
use crate::policy::lru_k::LrukCache;
use crate::traits::{Cache, PurgeCache};

/// Sharded LRU cache.
pub type ShardedLruCache<K, V> = ShardedCache<LruCache<K, V>>;
/// Sharded LRU-K cache.
pub type ShardedLrukCache<K, V> = ShardedCache<LrukCache<K, V>>;
/// Sharded LFU cache.
pub type ShardedLfuCache<K, V> = ShardedCache<LfuCache<K, V>>;
/// Sharded LFU cache with frequency aging.
pub type ShardedLfuAvgCache<K, V> = ShardedCache<LfuAvgCache<K, V>>;
/// Sharded Adaptive Replacement Cache.
pub type ShardedArcCache<K, V> = ShardedCache<ArcCache<K, V>>;

fn resolve_shard_count(requested: usize) -> usize {
    if requested == 0 {
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    } else {
        requested
    }
}

/// Fan-out wrapper over `N` independent inner caches.
///
/// # Example
///
/// ```
/// use cachemux::policy::sharded::ShardedLruCache;
/// use cachemux::traits::Cache;
///
/// let cache: ShardedLruCache<u64, String> = ShardedLruCache::lru(64, 4);
/// cache.put(1, "one".to_string());
/// assert_eq!(cache.get(&1), Some("one".to_string()));
/// assert_eq!(cache.shard_count(), 4);
/// ```
#[derive(Debug)]
pub struct ShardedCache<C> {
    shards: Vec<C>,
    selector: ShardSelector,
}

impl<C> ShardedCache<C> {
    /// Builds `shard_count` inner caches (0 ⇒ hardware concurrency), each
    /// constructed by `build` with capacity `ceil(capacity / shard_count)`.
    pub fn with_shards(
        capacity: usize,
        shard_count: usize,
        mut build: impl FnMut(usize) -> C,
    ) -> Self {
        let count = resolve_shard_count(shard_count);
        let per_shard = capacity.div_ceil(count);
        let shards = (0..count).map(|_| build(per_shard)).collect();
        Self {
            shards,
            selector: ShardSelector::new(count),
        }
    }

    /// Returns the number of shards.
    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    fn shard_for<K: Hash>(&self, key: &K) -> Option<&C> {
        // The selector always yields an in-range index while the invariants
        // hold; an out-of-range index degrades to a miss.
        self.shards.get(self.selector.shard_for_key(key))
    }
}

impl<K, V, C> Cache<K, V> for ShardedCache<C>
where
    K: Hash,
    C: Cache<K, V>,
{
    fn put(&self, key: K, value: V) {
        if let Some(shard) = self.shard_for(&key) {
            shard.put(key, value);
        }
    }

    fn get(&self, key: &K) -> Option<V> {
        self.shard_for(key)?.get(key)
    }
}

impl<C> PurgeCache for ShardedCache<C>
where
    C: PurgeCache,
{
    fn purge(&self) {
        for shard in &self.shards {
            shard.purge();
        }
    }
}

impl<K, V> ShardedCache<LruCache<K, V>>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Sharded LRU with `shard_count` shards (0 ⇒ hardware concurrency).
    pub fn lru(capacity: usize, shard_count: usize) -> Self {
        Self::with_shards(capacity, shard_count, LruCache::new)
    }
}

impl<K, V> ShardedCache<LrukCache<K, V>>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Sharded LRU-K; the history capacity is divided across shards the
    /// same way the main capacity is.
    pub fn lru_k(capacity: usize, shard_count: usize, history_capacity: usize, k: usize) -> Self {
        let count = resolve_shard_count(shard_count);
        let history_per_shard = history_capacity.div_ceil(count);
        Self::with_shards(capacity, count, |cap| {
            LrukCache::new(cap, history_per_shard, k)
        })
    }
}

impl<K, V> ShardedCache<LfuCache<K, V>>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Sharded LFU with `shard_count` shards (0 ⇒ hardware concurrency).
    pub fn lfu(capacity: usize, shard_count: usize) -> Self {
        Self::with_shards(capacity, shard_count, LfuCache::new)
    }
}

impl<K, V> ShardedCache<LfuAvgCache<K, V>>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Sharded aging LFU; every shard ages against the same `max_avg`.
    pub fn lfu_avg(capacity: usize, shard_count: usize, max_avg: u64) -> Self {
        Self::with_shards(capacity, shard_count, |cap| {
            LfuAvgCache::with_max_avg(cap, max_avg)
        })
    }
}

impl<K, V> ShardedCache<ArcCache<K, V>>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Sharded ARC; every shard balances its own halves independently.
    pub fn arc(capacity: usize, shard_count: usize, transform_threshold: usize) -> Self {
        Self::with_shards(capacity, shard_count, |cap| {
            ArcCache::with_threshold(cap, transform_threshold)
        })
    }
}
