//! Unified cache builder for all eviction policies.
//!
//! Provides a single entry point that hides the concrete policy types behind
//! one polymorphic handle, so the policy can be picked at runtime (or from
//! configuration) without changing call sites.
//!
//! ## Example
//!
//! ```
//! use cachemux::builder::{CacheBuilder, CachePolicy};
//! use cachemux::traits::Cache;
//!
//! let cache = CacheBuilder::new(100).build::<u64, String>(CachePolicy::Lru);
//! cache.put(1, "hello".to_string());
//! assert_eq!(cache.get(&1), Some("hello".to_string()));
//! ```

use std::hash::Hash;

use crate::policy::arc::{ArcCache, DEFAULT_TRANSFORM_THRESHOLD};
use crate::policy::lfu::LfuCache;
use crate::policy::lfu_avg::{DEFAULT_MAX_AVG_FREQ, LfuAvgCache};
use crate::policy::lru::LruCache;
use crate::policy::lru_k::LrukCache;
use crate::policy::sharded::ShardedCache;
use crate::traits::Cache;

/// Available cache eviction policies.
#[derive(Debug, Clone)]
pub enum CachePolicy {
    /// Least Recently Used eviction.
    Lru,
    /// LRU with an access-count admission filter.
    LruK {
        /// Capacity of the access-count history.
        history_capacity: usize,
        /// Accesses required before admission to the main cache.
        k: usize,
    },
    /// Least Frequently Used eviction.
    Lfu,
    /// LFU with frequency aging once the average exceeds `max_avg`.
    LfuAvg { max_avg: u64 },
    /// Adaptive Replacement Cache balancing recency against frequency.
    Arc { transform_threshold: usize },
}

impl CachePolicy {
    /// LRU-K with the usual `k = 2` and a history twice the main capacity.
    pub fn lru_k_default(capacity: usize) -> Self {
        CachePolicy::LruK {
            history_capacity: capacity * 2,
            k: 2,
        }
    }

    /// LFU-Avg with aging effectively off.
    pub fn lfu_avg_default() -> Self {
        CachePolicy::LfuAvg {
            max_avg: DEFAULT_MAX_AVG_FREQ,
        }
    }

    /// ARC with the default transform threshold.
    pub fn arc_default() -> Self {
        CachePolicy::Arc {
            transform_threshold: DEFAULT_TRANSFORM_THRESHOLD,
        }
    }
}

/// Polymorphic cache handle produced by [`CacheBuilder`].
#[derive(Debug)]
pub struct AnyCache<K, V> {
    inner: AnyCacheInner<K, V>,
}

#[derive(Debug)]
enum AnyCacheInner<K, V> {
    Lru(LruCache<K, V>),
    LruK(LrukCache<K, V>),
    Lfu(LfuCache<K, V>),
    LfuAvg(LfuAvgCache<K, V>),
    Arc(ArcCache<K, V>),
}

impl<K, V> AnyCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Returns the number of resident entries.
    pub fn len(&self) -> usize {
        match &self.inner {
            AnyCacheInner::Lru(cache) => cache.len(),
            AnyCacheInner::LruK(cache) => cache.len(),
            AnyCacheInner::Lfu(cache) => cache.len(),
            AnyCacheInner::LfuAvg(cache) => cache.len(),
            AnyCacheInner::Arc(cache) => cache.len(),
        }
    }

    /// Returns `true` if no entries are resident.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the declared capacity.
    pub fn capacity(&self) -> usize {
        match &self.inner {
            AnyCacheInner::Lru(cache) => cache.capacity(),
            AnyCacheInner::LruK(cache) => cache.capacity(),
            AnyCacheInner::Lfu(cache) => cache.capacity(),
            AnyCacheInner::LfuAvg(cache) => cache.capacity(),
            AnyCacheInner::Arc(cache) => cache.capacity(),
        }
    }

    /// Returns `true` if `key` is resident.
    pub fn contains(&self, key: &K) -> bool {
        match &self.inner {
            AnyCacheInner::Lru(cache) => cache.contains(key),
            AnyCacheInner::LruK(cache) => cache.contains(key),
            AnyCacheInner::Lfu(cache) => cache.contains(key),
            AnyCacheInner::LfuAvg(cache) => cache.contains(key),
            AnyCacheInner::Arc(cache) => cache.contains(key),
        }
    }
}

impl<K, V> Cache<K, V> for AnyCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn put(&self, key: K, value: V) {
        match &self.inner {
            AnyCacheInner::Lru(cache) => cache.put(key, value),
            AnyCacheInner::LruK(cache) => cache.put(key, value),
            AnyCacheInner::Lfu(cache) => cache.put(key, value),
            AnyCacheInner::LfuAvg(cache) => cache.put(key, value),
            AnyCacheInner::Arc(cache) => cache.put(key, value),
        }
    }

    fn get(&self, key: &K) -> Option<V> {
        match &self.inner {
            AnyCacheInner::Lru(cache) => cache.get(key),
            AnyCacheInner::LruK(cache) => cache.get(key),
            AnyCacheInner::Lfu(cache) => cache.get(key),
            AnyCacheInner::LfuAvg(cache) => cache.get(key),
            AnyCacheInner::Arc(cache) => cache.get(key),
        }
    }
}

/// Builder for creating cache instances.
#[derive(Debug, Clone)]
pub struct CacheBuilder {
    capacity: usize,
}

impl CacheBuilder {
    /// Create a new cache builder with the specified total capacity.
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Build a cache with the specified policy.
    ///
    /// # Example
    ///
    /// ```
    /// use cachemux::builder::{CacheBuilder, CachePolicy};
    ///
    /// // ARC with the default threshold
    /// let cache = CacheBuilder::new(100).build::<u64, String>(CachePolicy::arc_default());
    /// assert_eq!(cache.capacity(), 100);
    /// ```
    pub fn build<K, V>(&self, policy: CachePolicy) -> AnyCache<K, V>
    where
        K: Eq + Hash + Clone,
        V: Clone,
    {
        let inner = match policy {
            CachePolicy::Lru => AnyCacheInner::Lru(LruCache::new(self.capacity)),
            CachePolicy::LruK {
                history_capacity,
                k,
            } => AnyCacheInner::LruK(LrukCache::new(self.capacity, history_capacity, k)),
            CachePolicy::Lfu => AnyCacheInner::Lfu(LfuCache::new(self.capacity)),
            CachePolicy::LfuAvg { max_avg } => {
                AnyCacheInner::LfuAvg(LfuAvgCache::with_max_avg(self.capacity, max_avg))
            }
            CachePolicy::Arc {
                transform_threshold,
            } => AnyCacheInner::Arc(ArcCache::with_threshold(self.capacity, transform_threshold)),
        };
        AnyCache { inner }
    }

    /// Build a hash-sharded cache: `shard_count` independent copies of the
    /// chosen policy (0 ⇒ hardware concurrency), each with a share of the
    /// total capacity.
    pub fn build_sharded<K, V>(
        &self,
        policy: CachePolicy,
        shard_count: usize,
    ) -> ShardedCache<AnyCache<K, V>>
    where
        K: Eq + Hash + Clone,
        V: Clone,
    {
        ShardedCache::with_shards(self.capacity, shard_count, |capacity| {
            CacheBuilder::new(capacity).build(policy.clone())
        })
    }
}
