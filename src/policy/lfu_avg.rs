//! # LFU with frequency aging (LFU-Avg)
//!
//! Plain LFU lets a long-dead hotspot pin its high counter forever and lets
//! counters grow without bound. This variant tracks the sum of all resident
//! frequencies and, whenever the integer average exceeds a configured cap,
//! runs an aging pass: every resident counter drops by half the cap (floored
//! at 1) and the frequency buckets are rebuilt. A stale hotspot decays to
//! the minimum over successive passes and becomes evictable like any other
//! cold entry.
//!
//! The aging pass walks a snapshot of the resident keys, never the live
//! index, so reshuffling the buckets cannot invalidate the iteration.
//!
//! With the default cap aging is effectively off.

use std::hash::Hash;

use parking_lot::Mutex;

use crate::policy::lfu::LfuCore;
use crate::traits::{Cache, PurgeCache};

/// Default maximum average frequency; high enough that aging never fires in
/// ordinary workloads.
pub const DEFAULT_MAX_AVG_FREQ: u64 = 1_000_000;

#[derive(Debug)]
struct LfuAvgCore<K, V> {
    lfu: LfuCore<K, V>,
    total_freq: u64,
    max_avg: u64,
}

impl<K, V> LfuAvgCore<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn new(capacity: usize, max_avg: u64) -> Self {
        Self {
            lfu: LfuCore::new(capacity),
            total_freq: 0,
            max_avg: max_avg.max(1),
        }
    }

    fn get(&mut self, key: &K) -> Option<V> {
        let value = self.lfu.get(key)?;
        self.note_access();
        Some(value)
    }

    fn put(&mut self, key: K, value: V) {
        if self.lfu.capacity == 0 {
            return;
        }
        if let Some((_, victim_freq)) = self.lfu.put(key, value) {
            self.total_freq = self.total_freq.saturating_sub(victim_freq);
        }
        self.note_access();
    }

    fn purge(&mut self) {
        self.lfu.purge();
        self.total_freq = 0;
    }

    // Called after every admitted access (insert, overwrite, or hit). The
    // access raised exactly one counter by one, so the running total follows
    // suit; if the average breaks the cap, the whole population ages.
    fn note_access(&mut self) {
        self.total_freq += 1;
        let len = self.lfu.len() as u64;
        if len > 0 && self.total_freq / len > self.max_avg {
            self.age();
        }
    }

    // Subtracts half the cap from every resident frequency (floored at 1 by
    // the bucket structure) over a key snapshot, then re-derives the total
    // so it stays the sum of resident frequencies.
    fn age(&mut self) {
        let cut = (self.max_avg / 2).max(1);
        let keys: Vec<K> = self.lfu.buckets.keys().cloned().collect();
        for key in keys {
            if let Some(freq) = self.lfu.buckets.frequency(&key) {
                self.lfu.buckets.set_frequency(&key, freq.saturating_sub(cut));
            }
        }
        self.total_freq = self.lfu.buckets.total_frequency();
    }

    #[cfg(any(test, debug_assertions))]
    fn debug_validate_invariants(&self) {
        self.lfu.debug_validate_invariants();
        assert_eq!(self.total_freq, self.lfu.buckets.total_frequency());
    }
}

/// Thread-safe LFU cache with frequency aging.
///
/// # Example
///
/// ```
/// use cachemux::policy::lfu_avg::LfuAvgCache;
/// use cachemux::traits::Cache;
///
/// let cache = LfuAvgCache::with_max_avg(3, 2);
/// cache.put(1, "hot");
/// for _ in 0..10 {
///     cache.get(&1); // aging keeps the counter near the cap
/// }
/// assert!(cache.frequency(&1).unwrap() <= 3);
/// ```
#[derive(Debug)]
pub struct LfuAvgCache<K, V> {
    inner: Mutex<LfuAvgCore<K, V>>,
}

impl<K, V> LfuAvgCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Creates an LFU-Avg cache with the default (effectively off) aging cap.
    pub fn new(capacity: usize) -> Self {
        Self::with_max_avg(capacity, DEFAULT_MAX_AVG_FREQ)
    }

    /// Creates an LFU-Avg cache that ages frequencies once the average
    /// exceeds `max_avg` (clamped to at least 1).
    pub fn with_max_avg(capacity: usize, max_avg: u64) -> Self {
        Self {
            inner: Mutex::new(LfuAvgCore::new(capacity, max_avg)),
        }
    }

    /// Returns the number of resident entries.
    pub fn len(&self) -> usize {
        self.inner.lock().lfu.len()
    }

    /// Returns `true` if no entries are resident.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().lfu.len() == 0
    }

    /// Returns the configured capacity.
    pub fn capacity(&self) -> usize {
        self.inner.lock().lfu.capacity
    }

    /// Returns `true` if `key` is resident, without bumping its frequency.
    pub fn contains(&self, key: &K) -> bool {
        self.inner.lock().lfu.contains(key)
    }

    /// Returns the (possibly aged) access frequency recorded for `key`.
    pub fn frequency(&self, key: &K) -> Option<u64> {
        self.inner.lock().lfu.buckets.frequency(key)
    }
}

impl<K, V> Cache<K, V> for LfuAvgCache<K, V>
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

impl<K, V> PurgeCache for LfuAvgCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn purge(&self) {
        self.inner.lock().purge();
    }
}
