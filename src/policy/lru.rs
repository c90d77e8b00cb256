//! # Least Recently Used (LRU) cache
//!
//! Recency-ordered cache over a single [`RecencyList`]: every entry sits in
//! one hot→cold chain, touched entries move to the hot end, and eviction
//! takes whatever has drifted to the cold end. The other recency-based
//! policies in the crate reuse the same unlocked core.
//!
//! ## Architecture
//!
//! ```text
//!   ┌───────────────────────────────────────────────────────────────────┐
//!   │                          LruCache<K, V>                           │
//!   │                                                                   │
//!   │   ┌───────────────────────────────────────────────────────────┐   │
//!   │   │                 parking_lot::Mutex<LruCore>               │   │
//!   │   └───────────────────────────────────────────────────────────┘   │
//!   │                               │                                   │
//!   │   ┌───────────────────────────▼───────────────────────────────┐   │
//!   │   │  RecencyList<K, V>  (storage + order + key index in one)  │   │
//!   │   │                                                           │   │
//!   │   │  hot ─► [C] ◄──► [B] ◄──► [A] ◄─ cold                     │   │
//!   │   │         MRU                LRU                            │   │
//!   │   │                             └── evicted when full         │   │
//!   │   └───────────────────────────────────────────────────────────┘   │
//!   └───────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operations
//!
//! | Operation    | Effect                                          | Time |
//! |--------------|-------------------------------------------------|------|
//! | `put` (new)  | Evict LRU if full, insert at MRU                | O(1) |
//! | `put` (hit)  | Overwrite value, move to MRU                    | O(1) |
//! | `get` (hit)  | Clone value, move to MRU                        | O(1) |
//! | `remove`     | Delist the entry from any position              | O(1) |
//!
//! Capacity is enforced by eviction, never by failure: a cache constructed
//! with capacity 0 silently accepts nothing.
//!
//! ## Concurrency
//!
//! `LruCache` owns a single mutex held for the full duration of every public
//! operation; the unlocked [`LruCore`] is also used directly by the LRU-K
//! policy, embedded under that policy's own lock so no operation ever takes
//! two locks.

use std::hash::Hash;

use parking_lot::Mutex;

use crate::ds::recency_list::RecencyList;
use crate::traits::Cache;

/// Unlocked LRU core: a capacity bound applied to a [`RecencyList`].
///
/// Not thread-safe on its own; [`LruCache`] wraps it in a mutex, and the
/// LRU-K policy embeds two of these under its own lock.
#[derive(Debug)]
pub struct LruCore<K, V> {
    entries: RecencyList<K, V>,
    capacity: usize,
}

impl<K, V> LruCore<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: RecencyList::with_capacity(capacity),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains(key)
    }

    /// Looks up `key`, moving it to the MRU position on a hit.
    pub fn get(&mut self, key: &K) -> Option<V> {
        if !self.entries.move_to_front(key) {
            return None;
        }
        self.entries.get(key).cloned()
    }

    /// Inserts or overwrites `key`.
    ///
    /// Returns the entry evicted to make room, if any; an overwrite never
    /// evicts. Callers that compose LRU cores (the LRU-K history) use the
    /// evicted key to keep side tables in sync.
    pub fn put(&mut self, key: K, value: V) -> Option<(K, V)> {
        if self.capacity == 0 {
            return None;
        }

        if let Some(slot) = self.entries.get_mut(&key) {
            *slot = value;
            self.entries.move_to_front(&key);
            return None;
        }

        let evicted = if self.entries.len() >= self.capacity {
            self.entries.pop_back()
        } else {
            None
        };
        self.entries.push_front(key, value);
        evicted
    }

    /// Removes `key` and returns its value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.entries.remove(key)
    }

    /// Removes and returns the least recently used entry.
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        self.entries.pop_back()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        assert!(self.capacity == 0 || self.entries.len() <= self.capacity);
        self.entries.debug_validate_invariants();
    }
}

/// Thread-safe LRU cache.
///
/// # Example
///
/// ```
/// use cachemux::policy::lru::LruCache;
/// use cachemux::traits::Cache;
///
/// let cache = LruCache::new(2);
/// cache.put(1, "a");
/// cache.put(2, "b");
/// cache.put(3, "c"); // evicts key 1 (least recent)
///
/// assert_eq!(cache.get(&1), None);
/// assert_eq!(cache.get(&2), Some("b"));
/// assert_eq!(cache.get(&3), Some("c"));
/// ```
#[derive(Debug)]
pub struct LruCache<K, V> {
    inner: Mutex<LruCore<K, V>>,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Creates an LRU cache holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(LruCore::new(capacity)),
        }
    }

    /// Returns the number of resident entries.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Returns `true` if no entries are resident.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Returns the configured capacity.
    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    /// Returns `true` if `key` is resident, without touching recency order.
    pub fn contains(&self, key: &K) -> bool {
        self.inner.lock().contains(key)
    }

    /// Removes `key` and returns its value.
    pub fn remove(&self, key: &K) -> Option<V> {
        self.inner.lock().remove(key)
    }
}

impl<K, V> Cache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn put(&self, key: K, value: V) {
        self.inner.lock().put(key, value);
    }

    fn get(&self, key: &K) -> Option<V> {
        self.inner.lock().get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lru_insert_within_capacity() {
        let mut core = LruCore::new(4);
        assert_eq!(core.put(1, "a"), None);
        assert_eq!(core.put(2, "b"), None);
        assert_eq!(core.len(), 2);
        assert!(core.contains(&1));
        core.debug_validate_invariants();
    }

    #[test]
    fn lru_eviction_order_is_least_recent_first() {
        let mut core = LruCore::new(2);
        core.put(1, "a");
        core.put(2, "b");
        let evicted = core.put(3, "c");
        assert_eq!(evicted, Some((1, "a")));
        assert!(!core.contains(&1));
        assert!(core.contains(&2));
        assert!(core.contains(&3));
    }

    #[test]
    fn lru_get_refreshes_recency() {
        let mut core = LruCore::new(2);
        core.put(1, "a");
        core.put(2, "b");
        assert_eq!(core.get(&1), Some("a"));

        // Key 2 is now least recent and goes first.
        let evicted = core.put(3, "c");
        assert_eq!(evicted, Some((2, "b")));
        assert_eq!(core.get(&1), Some("a"));
        assert_eq!(core.get(&3), Some("c"));
    }

    #[test]
    fn lru_overwrite_updates_value_and_recency() {
        let mut core = LruCore::new(2);
        core.put(1, "a");
        core.put(2, "b");
        assert_eq!(core.put(1, "a2"), None);

        // Overwrite made key 1 most recent; key 2 is the victim.
        core.put(3, "c");
        assert_eq!(core.get(&1), Some("a2"));
        assert!(!core.contains(&2));
    }

    #[test]
    fn lru_remove_delists_entry() {
        let mut core = LruCore::new(4);
        core.put(1, "a");
        core.put(2, "b");
        assert_eq!(core.remove(&1), Some("a"));
        assert_eq!(core.remove(&1), None);
        assert_eq!(core.len(), 1);
        core.debug_validate_invariants();
    }

    #[test]
    fn lru_zero_capacity_rejects_inserts() {
        let mut core = LruCore::new(0);
        assert_eq!(core.put(1, "a"), None);
        assert_eq!(core.len(), 0);
        assert_eq!(core.get(&1), None);
    }

    #[test]
    fn lru_pop_lru_drains_in_order() {
        let mut core = LruCore::new(3);
        core.put(1, "a");
        core.put(2, "b");
        core.put(3, "c");
        core.get(&1);

        assert_eq!(core.pop_lru(), Some((2, "b")));
        assert_eq!(core.pop_lru(), Some((3, "c")));
        assert_eq!(core.pop_lru(), Some((1, "a")));
        assert_eq!(core.pop_lru(), None);
    }

    #[test]
    fn lru_cache_shared_access() {
        let cache = LruCache::new(2);
        cache.put(1, "a".to_string());
        assert_eq!(cache.get(&1), Some("a".to_string()));
        assert_eq!(cache.remove(&1), Some("a".to_string()));
        assert!(cache.is_empty());
        assert_eq!(cache.capacity(), 2);
    }

    #[test]
    fn lru_cache_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<LruCache<u64, String>>();
    }
}
