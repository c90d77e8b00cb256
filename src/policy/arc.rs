//! # Adaptive Replacement Cache (ARC)
//!
//! Two sub-caches split the declared capacity between them: a recency half
//! run as an LRU with per-entry access counts, and a frequency half run on
//! frequency buckets. Each half keeps a ghost list (a key-only LRU of its
//! recent evictions, sized to match the half's resident capacity), and a hit
//! on a ghost shifts one slot of capacity toward the half that evidently
//! needed it.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                           ArcCache<K, V>                             │
//! │                                                                      │
//! │   Recency half (capacity p)          Frequency half (capacity C-p)   │
//! │   ┌──────────────────────────┐       ┌──────────────────────────┐    │
//! │   │ LRU list + access counts │       │ frequency buckets        │    │
//! │   │  MRU ─► [x][y][z] ─► LRU │       │  1 ─► [..]  4 ─► [..]    │    │
//! │   └───────────┬──────────────┘       └───────────┬──────────────┘    │
//! │               │ evict                            │ evict             │
//! │               ▼                                  ▼                   │
//! │   ┌──────────────────────────┐       ┌──────────────────────────┐    │
//! │   │ ghost list (keys only)   │       │ ghost list (keys only)   │    │
//! │   └───────────┬──────────────┘       └───────────┬──────────────┘    │
//! │               │ ghost hit                        │ ghost hit         │
//! │               ▼                                  ▼                   │
//! │        p grows by one                     C - p grows by one         │
//! │        (other half shrinks)               (other half shrinks)      │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key life cycle
//!
//! ```text
//!   (absent) ──put──► resident in recency half
//!   recency, read count reaches T ──► also resident in frequency half
//!   recency evicts ──► recency ghost ──ghost hit──► absent + rebalance
//!   frequency evicts ──► frequency ghost ──ghost hit──► absent + rebalance
//! ```
//!
//! ## Balancing rule
//!
//! A ghost hit on one half is evidence the *other* half is overpopulated.
//! The overpopulated half first evicts a resident into its own ghost list if
//! it is full, then gives up one slot of capacity; only if that succeeded
//! (its capacity was not already zero) does the favoured half grow. The sum
//! of the two half capacities therefore never drifts from the declared
//! total. Either way the ghost record is consumed.
//!
//! Ghost lists are probed before resident lookup on both `get` and `put`:
//! their role is sizing feedback, not caching.

use std::hash::Hash;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::ds::frequency_buckets::FrequencyBuckets;
use crate::ds::ghost_list::GhostList;
use crate::ds::recency_list::RecencyList;
use crate::error::InvariantError;
use crate::traits::Cache;

/// Default number of recency-half reads before a key is copied into the
/// frequency half.
pub const DEFAULT_TRANSFORM_THRESHOLD: usize = 2;

// Resident payload in the recency half: the value plus the read count that
// drives promotion into the frequency half.
#[derive(Debug)]
struct Counted<V> {
    value: V,
    count: u64,
}

/// Recency half: a capacity-bounded [`RecencyList`] whose entries carry an
/// access count, plus the half's own ghost list. The ghost capacity tracks
/// the resident capacity.
#[derive(Debug)]
struct ArcRecencyHalf<K, V> {
    entries: RecencyList<K, Counted<V>>,
    ghost: GhostList<K>,
    capacity: usize,
    promote_threshold: u64,
}

impl<K, V> ArcRecencyHalf<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn new(capacity: usize, promote_threshold: u64) -> Self {
        Self {
            entries: RecencyList::with_capacity(capacity),
            ghost: GhostList::new(capacity),
            capacity,
            promote_threshold,
        }
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn contains(&self, key: &K) -> bool {
        self.entries.contains(key)
    }

    /// On a hit, refreshes recency, bumps the access count, and reports
    /// whether the count has reached the promotion threshold.
    fn get(&mut self, key: &K) -> Option<(V, bool)> {
        if !self.entries.move_to_front(key) {
            return None;
        }
        let entry = self.entries.get_mut(key)?;
        entry.count += 1;
        Some((entry.value.clone(), entry.count >= self.promote_threshold))
    }

    fn put(&mut self, key: K, value: V) {
        if self.capacity == 0 {
            return;
        }

        if let Some(entry) = self.entries.get_mut(&key) {
            entry.value = value;
            self.entries.move_to_front(&key);
            return;
        }

        if self.entries.len() >= self.capacity {
            self.evict_lru();
        }
        self.entries.push_front(key, Counted { value, count: 1 });
    }

    // Eviction drops the value; only the key survives, in the ghost list.
    fn evict_lru(&mut self) {
        if let Some((key, _)) = self.entries.pop_back() {
            self.ghost.record(key);
        }
    }

    fn ghost_remove(&mut self, key: &K) -> bool {
        self.ghost.remove(key)
    }

    fn increase_capacity(&mut self) {
        self.capacity += 1;
        self.ghost.set_capacity(self.capacity);
    }

    fn decrease_capacity(&mut self) -> bool {
        if self.capacity == 0 {
            return false;
        }
        if self.entries.len() >= self.capacity {
            self.evict_lru();
        }
        self.capacity -= 1;
        self.ghost.set_capacity(self.capacity);
        true
    }
}

/// Frequency half: frequency buckets plus a value map and the half's own
/// ghost list.
#[derive(Debug)]
struct ArcFrequencyHalf<K, V> {
    buckets: FrequencyBuckets<K>,
    values: FxHashMap<K, V>,
    ghost: GhostList<K>,
    capacity: usize,
}

impl<K, V> ArcFrequencyHalf<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn new(capacity: usize) -> Self {
        Self {
            buckets: FrequencyBuckets::new(),
            values: FxHashMap::default(),
            ghost: GhostList::new(capacity),
            capacity,
        }
    }

    fn len(&self) -> usize {
        self.values.len()
    }

    fn contains(&self, key: &K) -> bool {
        self.values.contains_key(key)
    }

    fn get(&mut self, key: &K) -> Option<V> {
        let value = self.values.get(key)?.clone();
        self.buckets.touch(key);
        Some(value)
    }

    fn put(&mut self, key: K, value: V) {
        if self.capacity == 0 {
            return;
        }

        if let Some(slot) = self.values.get_mut(&key) {
            *slot = value;
            self.buckets.touch(&key);
            return;
        }

        if self.values.len() >= self.capacity {
            self.evict_min();
        }
        self.buckets.insert(key.clone());
        self.values.insert(key, value);
    }

    fn evict_min(&mut self) {
        if let Some((key, _)) = self.buckets.pop_min() {
            self.values.remove(&key);
            self.ghost.record(key);
        }
    }

    fn ghost_remove(&mut self, key: &K) -> bool {
        self.ghost.remove(key)
    }

    fn increase_capacity(&mut self) {
        self.capacity += 1;
        self.ghost.set_capacity(self.capacity);
    }

    fn decrease_capacity(&mut self) -> bool {
        if self.capacity == 0 {
            return false;
        }
        if self.values.len() >= self.capacity {
            self.evict_min();
        }
        self.capacity -= 1;
        self.ghost.set_capacity(self.capacity);
        true
    }
}

#[derive(Debug)]
struct ArcCore<K, V> {
    recency: ArcRecencyHalf<K, V>,
    frequency: ArcFrequencyHalf<K, V>,
    total_capacity: usize,
}

impl<K, V> ArcCore<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn new(capacity: usize, promote_threshold: u64) -> Self {
        // The recency half takes the extra slot on an odd split.
        let frequency_capacity = capacity / 2;
        let recency_capacity = capacity - frequency_capacity;
        Self {
            recency: ArcRecencyHalf::new(recency_capacity, promote_threshold),
            frequency: ArcFrequencyHalf::new(frequency_capacity),
            total_capacity: capacity,
        }
    }

    // Ghost probe. A hit consumes the record and moves one slot of capacity
    // toward the half whose ghost matched, provided the other half could
    // actually shrink.
    fn check_ghost(&mut self, key: &K) -> bool {
        if self.recency.ghost_remove(key) {
            if self.frequency.decrease_capacity() {
                self.recency.increase_capacity();
            }
            return true;
        }
        if self.frequency.ghost_remove(key) {
            if self.recency.decrease_capacity() {
                self.frequency.increase_capacity();
            }
            return true;
        }
        false
    }

    fn put(&mut self, key: K, value: V) {
        self.check_ghost(&key);

        let in_frequency = self.frequency.contains(&key);
        self.recency.put(key.clone(), value.clone());
        if in_frequency {
            self.frequency.put(key, value);
        }
    }

    fn get(&mut self, key: &K) -> Option<V> {
        self.check_ghost(key);

        if let Some((value, should_promote)) = self.recency.get(key) {
            if should_promote {
                self.frequency.put(key.clone(), value.clone());
            }
            return Some(value);
        }
        self.frequency.get(key)
    }

    fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.recency.capacity + self.frequency.capacity != self.total_capacity {
            return Err(InvariantError::new(format!(
                "half capacities {} + {} do not sum to total {}",
                self.recency.capacity, self.frequency.capacity, self.total_capacity
            )));
        }
        if self.recency.len() > self.recency.capacity {
            return Err(InvariantError::new("recency half over capacity"));
        }
        if self.frequency.len() > self.frequency.capacity {
            return Err(InvariantError::new("frequency half over capacity"));
        }
        if self.recency.ghost.capacity() != self.recency.capacity
            || self.frequency.ghost.capacity() != self.frequency.capacity
        {
            return Err(InvariantError::new(
                "ghost capacity does not track resident capacity",
            ));
        }
        if self.recency.ghost.len() > self.recency.ghost.capacity()
            || self.frequency.ghost.len() > self.frequency.ghost.capacity()
        {
            return Err(InvariantError::new("ghost list over capacity"));
        }
        for (key, _) in self.recency.entries.iter() {
            if self.recency.ghost.contains(key) {
                return Err(InvariantError::new(
                    "key both resident and ghost in recency half",
                ));
            }
        }
        for key in self.frequency.values.keys() {
            if self.frequency.ghost.contains(key) {
                return Err(InvariantError::new(
                    "key both resident and ghost in frequency half",
                ));
            }
        }
        Ok(())
    }
}

/// Thread-safe Adaptive Replacement Cache.
///
/// # Example
///
/// ```
/// use cachemux::policy::arc::ArcCache;
/// use cachemux::traits::Cache;
///
/// let cache = ArcCache::new(4);
/// cache.put(1, "a");
/// assert_eq!(cache.get(&1), Some("a")); // second access promotes
/// assert!(cache.contains(&1));
/// ```
#[derive(Debug)]
pub struct ArcCache<K, V> {
    inner: Mutex<ArcCore<K, V>>,
}

impl<K, V> ArcCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Creates an ARC cache with the default transform threshold.
    pub fn new(capacity: usize) -> Self {
        Self::with_threshold(capacity, DEFAULT_TRANSFORM_THRESHOLD)
    }

    /// Creates an ARC cache that copies a key into the frequency half once
    /// its read count in the recency half reaches `transform_threshold`
    /// (clamped to at least 1).
    pub fn with_threshold(capacity: usize, transform_threshold: usize) -> Self {
        Self {
            inner: Mutex::new(ArcCore::new(capacity, transform_threshold.max(1) as u64)),
        }
    }

    /// Total declared capacity, conserved across all rebalancing.
    pub fn capacity(&self) -> usize {
        self.inner.lock().total_capacity
    }

    /// Number of resident slots in use across both halves.
    ///
    /// A key promoted to the frequency half while still recent occupies a
    /// slot in each half and counts twice, matching how capacity is split.
    pub fn len(&self) -> usize {
        let core = self.inner.lock();
        core.recency.len() + core.frequency.len()
    }

    /// Returns `true` if no entries are resident in either half.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if `key` is resident in either half. Does not probe
    /// ghosts and never mutates.
    pub fn contains(&self, key: &K) -> bool {
        let core = self.inner.lock();
        core.recency.contains(key) || core.frequency.contains(key)
    }

    /// Current capacity of the recency half.
    pub fn recency_capacity(&self) -> usize {
        self.inner.lock().recency.capacity
    }

    /// Current capacity of the frequency half.
    pub fn frequency_capacity(&self) -> usize {
        self.inner.lock().frequency.capacity
    }

    /// Validates the balancing invariants; see module docs.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.inner.lock().check_invariants()
    }
}

impl<K, V> Cache<K, V> for ArcCache<K, V>
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
    fn arc_new_splits_capacity() {
        let cache: ArcCache<u32, &str> = ArcCache::new(4);
        assert_eq!(cache.capacity(), 4);
        assert_eq!(cache.recency_capacity(), 2);
        assert_eq!(cache.frequency_capacity(), 2);
        assert!(cache.is_empty());
        cache.check_invariants().unwrap();

        // Odd capacities give the extra slot to the recency half.
        let odd: ArcCache<u32, &str> = ArcCache::new(5);
        assert_eq!(odd.recency_capacity(), 3);
        assert_eq!(odd.frequency_capacity(), 2);
    }

    #[test]
    fn arc_insert_lands_in_recency_half() {
        let cache = ArcCache::new(4);
        cache.put(1, "a");
        {
            let core = cache.inner.lock();
            assert_eq!(core.recency.len(), 1);
            assert_eq!(core.frequency.len(), 0);
        }
        cache.check_invariants().unwrap();
    }

    #[test]
    fn arc_read_at_threshold_promotes_to_frequency_half() {
        let cache = ArcCache::new(4);
        cache.put(1, "a"); // count 1
        assert_eq!(cache.get(&1), Some("a")); // count 2 reaches T=2
        {
            let core = cache.inner.lock();
            assert!(core.recency.contains(&1));
            assert!(core.frequency.contains(&1));
        }
        cache.check_invariants().unwrap();
    }

    #[test]
    fn arc_update_reaches_both_halves() {
        let cache = ArcCache::new(4);
        cache.put(1, "a");
        cache.get(&1); // promote
        cache.put(1, "a2");
        {
            let core = cache.inner.lock();
            assert_eq!(core.frequency.values.get(&1), Some(&"a2"));
        }
        assert_eq!(cache.get(&1), Some("a2"));
    }

    #[test]
    fn arc_recency_eviction_leaves_ghost() {
        let cache = ArcCache::new(2); // recency 1, frequency 1
        cache.put(1, "a");
        cache.put(2, "b"); // evicts key 1 to the recency ghost
        {
            let core = cache.inner.lock();
            assert!(!core.recency.contains(&1));
            assert!(core.recency.ghost.contains(&1));
        }
        cache.check_invariants().unwrap();
    }

    #[test]
    fn arc_ghost_hit_on_recency_grows_recency_half() {
        let cache = ArcCache::new(2); // recency 1, frequency 1
        cache.put(1, "a");
        cache.put(2, "b"); // key 1 becomes a recency ghost

        // Ghost probe consumes the record, shrinks the frequency half, and
        // grows the recency half; the key itself is gone.
        assert_eq!(cache.get(&1), None);
        assert_eq!(cache.recency_capacity(), 2);
        assert_eq!(cache.frequency_capacity(), 0);
        assert_eq!(cache.capacity(), 2);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn arc_ghost_hit_on_frequency_grows_frequency_half() {
        let cache = ArcCache::new(2); // recency 1, frequency 1
        cache.put(1, "a");
        cache.get(&1); // promote key 1 into the frequency half
        cache.put(2, "b"); // recency evicts key 1 (still resident in F)
        cache.get(&2); // promote key 2; frequency evicts key 1 to its ghost
        cache.put(3, "c"); // recency evicts key 2; its ghost now holds only 2
        {
            let core = cache.inner.lock();
            assert!(core.frequency.ghost.contains(&1));
            assert!(!core.recency.ghost.contains(&1));
        }

        assert_eq!(cache.get(&1), None);
        assert_eq!(cache.recency_capacity(), 0);
        assert_eq!(cache.frequency_capacity(), 2);
        assert_eq!(cache.capacity(), 2);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn arc_shrink_below_zero_is_refused() {
        let cache = ArcCache::new(2);
        cache.put(1, "a");
        cache.put(2, "b");
        cache.get(&1); // recency ghost hit: frequency half shrinks to 0
        assert_eq!(cache.frequency_capacity(), 0);

        cache.put(1, "a");
        cache.put(3, "c"); // recency (now capacity 2) evicts key 2 to its ghost

        // Frequency half is already at 0; it refuses to shrink and the
        // recency half must not grow, though the ghost record is consumed.
        assert_eq!(cache.get(&2), None);
        assert_eq!(cache.recency_capacity(), 2);
        assert_eq!(cache.frequency_capacity(), 0);
        {
            let core = cache.inner.lock();
            assert!(!core.recency.ghost.contains(&2));
        }
        cache.check_invariants().unwrap();
    }

    #[test]
    fn arc_capacity_conserved_under_churn() {
        let cache = ArcCache::new(8);
        for i in 0..200u32 {
            cache.put(i % 13, i);
            cache.get(&(i % 7));
            cache.get(&(i % 29));
            cache.check_invariants().unwrap();
            assert_eq!(
                cache.recency_capacity() + cache.frequency_capacity(),
                cache.capacity()
            );
        }
    }

    #[test]
    fn arc_zero_capacity_rejects_inserts() {
        let cache = ArcCache::new(0);
        cache.put(1, "a");
        assert_eq!(cache.len(), 0);
        assert_eq!(cache.get(&1), None);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn arc_custom_threshold_delays_promotion() {
        let cache = ArcCache::with_threshold(4, 3);
        cache.put(1, "a"); // count 1
        cache.get(&1); // count 2: below T=3
        {
            let core = cache.inner.lock();
            assert!(!core.frequency.contains(&1));
        }
        cache.get(&1); // count 3: promoted
        {
            let core = cache.inner.lock();
            assert!(core.frequency.contains(&1));
        }
    }

    #[test]
    fn arc_cache_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ArcCache<u64, String>>();
    }
}
