//! # LRU-K admission-filtered cache
//!
//! A key is admitted to the main LRU only after it has been accessed `k`
//! times. Accesses below the threshold are counted in a secondary LRU (the
//! history), which evicts its counters under its own capacity so long-absent
//! keys are naturally forgotten. The value from the most recent `put` is
//! parked alongside the counter so promotion can complete immediately, even
//! when the promoting access is a `get`.
//!
//! ```text
//!   put/get(k) ──► main LRU (capacity N) ── hit ──► done
//!                     │ miss
//!                     ▼
//!                  history LRU (capacity M, value = access count)
//!                     │ count reaches K
//!                     ▼
//!                  promote pending value into main
//! ```
//!
//! With `k = 1` every first access promotes and the behaviour collapses to
//! plain LRU. Once a key is evicted from the main cache its counter is not
//! reconstructed; re-admission takes `k` fresh accesses.
//!
//! The main cache, history, and pending-value table all live under the one
//! mutex owned by [`LrukCache`]; the embedded [`LruCore`]s carry no locks of
//! their own.

use std::hash::Hash;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::policy::lru::LruCore;
use crate::traits::Cache;

#[derive(Debug)]
struct LrukCore<K, V> {
    main: LruCore<K, V>,
    history: LruCore<K, u64>,
    pending: FxHashMap<K, V>,
    k: u64,
}

impl<K, V> LrukCore<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn new(capacity: usize, history_capacity: usize, k: usize) -> Self {
        Self {
            main: LruCore::new(capacity),
            history: LruCore::new(history_capacity),
            pending: FxHashMap::default(),
            k: k.max(1) as u64,
        }
    }

    // Bumps the access counter for `key` and returns the new count. When the
    // history LRU evicts another key's counter, that key's pending value is
    // dropped with it so the pending table stays bounded by the history
    // capacity.
    fn record_access(&mut self, key: &K) -> u64 {
        let count = self.history.get(key).unwrap_or(0) + 1;
        if let Some((evicted_key, _)) = self.history.put(key.clone(), count) {
            self.pending.remove(&evicted_key);
        }
        count
    }

    fn forget_history(&mut self, key: &K) {
        self.history.remove(key);
        self.pending.remove(key);
    }

    fn put(&mut self, key: K, value: V) {
        if self.main.capacity() == 0 {
            return;
        }
        if self.main.contains(&key) {
            self.main.put(key, value);
            return;
        }

        let count = self.record_access(&key);
        self.pending.insert(key.clone(), value.clone());

        if count >= self.k {
            self.forget_history(&key);
            self.main.put(key, value);
        }
    }

    fn get(&mut self, key: &K) -> Option<V> {
        if self.main.capacity() == 0 {
            return None;
        }
        let hit = self.main.get(key);
        let count = self.record_access(key);

        if hit.is_some() {
            return hit;
        }

        // A read promotes only once k earlier accesses are already on
        // record; the access performed by this very call does not count
        // toward its own admission. Without a pending value (the key was
        // only ever read) there is nothing to promote either way.
        if count > self.k
            && let Some(value) = self.pending.remove(key)
        {
            self.history.remove(key);
            self.main.put(key.clone(), value.clone());
            return Some(value);
        }
        None
    }
}

/// Thread-safe LRU-K cache: LRU with an access-count admission filter.
///
/// # Example
///
/// ```
/// use cachemux::policy::lru_k::LrukCache;
/// use cachemux::traits::Cache;
///
/// let cache = LrukCache::new(2, 4, 2);
/// cache.put(1, "a");
/// assert_eq!(cache.get(&1), None); // one access: still in history
/// cache.put(1, "a");
/// assert_eq!(cache.get(&1), Some("a")); // promoted on the second access
/// ```
#[derive(Debug)]
pub struct LrukCache<K, V> {
    inner: Mutex<LrukCore<K, V>>,
}

impl<K, V> LrukCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Creates an LRU-K cache.
    ///
    /// `capacity` bounds the main cache, `history_capacity` bounds the
    /// access-count history, and `k` (clamped to at least 1) is the number
    /// of accesses required for admission.
    pub fn new(capacity: usize, history_capacity: usize, k: usize) -> Self {
        Self {
            inner: Mutex::new(LrukCore::new(capacity, history_capacity, k)),
        }
    }

    /// Returns the number of entries resident in the main cache.
    pub fn len(&self) -> usize {
        self.inner.lock().main.len()
    }

    /// Returns `true` if the main cache is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().main.is_empty()
    }

    /// Returns the main cache capacity.
    pub fn capacity(&self) -> usize {
        self.inner.lock().main.capacity()
    }

    /// Returns `true` if `key` is resident in the main cache.
    pub fn contains(&self, key: &K) -> bool {
        self.inner.lock().main.contains(key)
    }
}

impl<K, V> Cache<K, V> for LrukCache<K, V>
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
