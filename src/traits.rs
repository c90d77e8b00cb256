//! # Cache Trait Contract
//!
//! This module defines the uniform contract shared by every eviction policy in
//! the crate, so callers can swap policies without touching call sites.
//!
//! ## Architecture
//!
//! ```text
//!                  ┌────────────────────────────────────────┐
//!                  │             Cache<K, V>                │
//!                  │                                        │
//!                  │  put(&self, K, V)                      │
//!                  │  get(&self, &K) → Option<V>            │
//!                  │  get_or_default(&self, &K) → V         │
//!                  └───────────────────┬────────────────────┘
//!                                      │
//!        ┌──────────┬──────────┬───────┴───┬───────────┬──────────────┐
//!        ▼          ▼          ▼           ▼           ▼              ▼
//!    LruCache   LrukCache   LfuCache   LfuAvgCache  ArcCache   ShardedCache<C>
//!                              │           │                    (wraps any C)
//!                              └─────┬─────┘
//!                                    ▼
//!                          ┌──────────────────┐
//!                          │   PurgeCache     │
//!                          │   purge(&self)   │
//!                          └──────────────────┘
//! ```
//!
//! ## Design Notes
//!
//! Every method takes `&self`: each cache owns exactly one internal mutex and
//! acquires it for the full duration of the operation, so a cache can be
//! shared across threads behind a plain `Arc`. Values cross the interface by
//! clone in both directions; the cache owns its entries and never exposes
//! internal nodes.
//!
//! The contract is deliberately minimal. There is no enumerate, no size, no
//! evict-by-key on the trait; policies that need extra surface (LRU's
//! `remove`, the LFU family's `purge`) expose it as inherent methods or via
//! [`PurgeCache`].
//!
//! ## Example
//!
//! ```
//! use cachemux::policy::lru::LruCache;
//! use cachemux::traits::Cache;
//!
//! fn warm<C: Cache<u64, String>>(cache: &C, data: &[(u64, String)]) {
//!     for (key, value) in data {
//!         cache.put(*key, value.clone());
//!     }
//! }
//!
//! let cache = LruCache::new(16);
//! warm(&cache, &[(1, "one".to_string()), (2, "two".to_string())]);
//! assert_eq!(cache.get(&1), Some("one".to_string()));
//! ```

/// Uniform get/put contract implemented by every policy.
///
/// A `get` hit registers the access with the policy (recency and/or
/// frequency) and returns a clone of the stored value. A `put` inserts or
/// overwrites; when the cache is full the policy evicts first. Neither
/// operation can fail: capacity is enforced by eviction, and the only
/// reportable condition is "key not found", expressed as `None`.
pub trait Cache<K, V> {
    /// Inserts or overwrites `key` with `value`.
    ///
    /// On a cache constructed with capacity 0 this is a silent no-op.
    fn put(&self, key: K, value: V);

    /// Looks up `key`, registering the access on a hit.
    ///
    /// Returns `Some(value)` on a hit, `None` on a miss. A miss never
    /// disturbs resident entries (though adaptive policies may consume a
    /// ghost record and retune themselves).
    fn get(&self, key: &K) -> Option<V>;

    /// Convenience lookup that yields `V::default()` on a miss.
    ///
    /// A default value is not a diagnostic: callers that must distinguish
    /// "missing" from "default" use [`get`](Self::get).
    fn get_or_default(&self, key: &K) -> V
    where
        V: Default,
    {
        self.get(key).unwrap_or_default()
    }
}

/// Caches that can release every resident entry at once.
///
/// Implemented by the LFU family; the sharded wrapper cascades `purge` to
/// every shard when its inner policy supports it.
///
/// # Example
///
/// ```
/// use cachemux::policy::lfu::LfuCache;
/// use cachemux::traits::{Cache, PurgeCache};
///
/// let cache = LfuCache::new(8);
/// cache.put(1, "a");
/// cache.purge();
/// assert_eq!(cache.get(&1), None);
/// ```
pub trait PurgeCache {
    /// Releases every resident entry and resets policy bookkeeping.
    fn purge(&self);
}
