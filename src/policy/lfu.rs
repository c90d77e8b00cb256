//! # Least Frequently Used (LFU) cache
//!
//! Entries carry an access counter starting at 1; the cache evicts the key
//! with the smallest counter, breaking ties toward the entry that has held
//! that counter longest. Ordering lives in a [`FrequencyBuckets`] structure
//! (frequency → list of equal-frequency keys), values in a separate map.
//!
//! ```text
//!   buckets:  1 ─► [d, c]        values:  a ─► ...
//!             3 ─► [b]                    b ─► ...
//!             7 ─► [a]                    c ─► ...
//!             ▲                           d ─► ...
//!             └─ min bucket: oldest entry ("c") is the next victim
//! ```
//!
//! When the minimum bucket empties the minimum advances to the next
//! non-empty bucket; there is never a fallback to an arbitrary one.

use std::hash::Hash;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::ds::frequency_buckets::FrequencyBuckets;
use crate::traits::{Cache, PurgeCache};

/// Unlocked LFU core shared by [`LfuCache`] and the LFU-Avg variant.
#[derive(Debug)]
pub(crate) struct LfuCore<K, V> {
    pub(crate) buckets: FrequencyBuckets<K>,
    pub(crate) values: FxHashMap<K, V>,
    pub(crate) capacity: usize,
}

impl<K, V> LfuCore<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            buckets: FrequencyBuckets::new(),
            values: FxHashMap::default(),
            capacity,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.values.len()
    }

    pub(crate) fn contains(&self, key: &K) -> bool {
        self.values.contains_key(key)
    }

    /// Looks up `key`, bumping its frequency on a hit.
    pub(crate) fn get(&mut self, key: &K) -> Option<V> {
        let value = self.values.get(key)?.clone();
        self.buckets.touch(key);
        Some(value)
    }

    /// Inserts or overwrites `key`, evicting the least-frequent (oldest among
    /// ties) entry when full. Returns the evicted key and its frequency.
    pub(crate) fn put(&mut self, key: K, value: V) -> Option<(K, u64)> {
        if self.capacity == 0 {
            return None;
        }

        if let Some(slot) = self.values.get_mut(&key) {
            *slot = value;
            self.buckets.touch(&key);
            return None;
        }

        let evicted = if self.values.len() >= self.capacity {
            let victim = self.buckets.pop_min();
            if let Some((victim_key, _)) = &victim {
                self.values.remove(victim_key);
            }
            victim
        } else {
            None
        };

        self.buckets.insert(key.clone());
        self.values.insert(key, value);
        evicted
    }

    pub(crate) fn purge(&mut self) {
        self.buckets.clear();
        self.values.clear();
    }

    #[cfg(any(test, debug_assertions))]
    pub(crate) fn debug_validate_invariants(&self) {
        assert_eq!(self.values.len(), self.buckets.len());
        assert!(self.values.len() <= self.capacity || self.capacity == 0);
        for key in self.values.keys() {
            assert!(self.buckets.contains(key));
        }
        self.buckets.debug_validate_invariants();
    }
}

/// Thread-safe LFU cache.
///
/// # Example
///
/// ```
/// use cachemux::policy::lfu::LfuCache;
/// use cachemux::traits::Cache;
///
/// let cache = LfuCache::new(2);
/// cache.put(1, "a");
/// cache.put(2, "b");
/// cache.get(&1);
/// cache.get(&1);
/// cache.put(3, "c"); // key 2 has the lowest frequency and is evicted
///
/// assert_eq!(cache.get(&2), None);
/// assert_eq!(cache.get(&1), Some("a"));
/// assert_eq!(cache.get(&3), Some("c"));
/// ```
#[derive(Debug)]
pub struct LfuCache<K, V> {
    inner: Mutex<LfuCore<K, V>>,
}

impl<K, V> LfuCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Creates an LFU cache holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(LfuCore::new(capacity)),
        }
    }

    /// Returns the number of resident entries.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Returns `true` if no entries are resident.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().len() == 0
    }

    /// Returns the configured capacity.
    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity
    }

    /// Returns `true` if `key` is resident, without bumping its frequency.
    pub fn contains(&self, key: &K) -> bool {
        self.inner.lock().contains(key)
    }

    /// Returns the access frequency recorded for `key`.
    pub fn frequency(&self, key: &K) -> Option<u64> {
        self.inner.lock().buckets.frequency(key)
    }
}

impl<K, V> Cache<K, V> for LfuCache<K, V>
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

impl<K, V> PurgeCache for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn purge(&self) {
        self.inner.lock().purge();
    }
}
