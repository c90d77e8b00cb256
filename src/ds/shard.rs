//! Deterministic key-to-shard mapping for the sharded wrapper.
//!
//! Maps any `Hash`able key to a shard index in `[0, shards)` using the
//! platform's generic hash facility. The same `(key, shards)` pair always
//! yields the same index, so a key is routed to the same inner cache on
//! every access.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Deterministic `hash(key) mod N` shard selector.
///
/// # Example
///
/// ```
/// use cachemux::ds::ShardSelector;
///
/// let selector = ShardSelector::new(4);
/// let shard = selector.shard_for_key(&"user:alice");
/// assert!(shard < 4);
/// assert_eq!(selector.shard_for_key(&"user:alice"), shard);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShardSelector {
    shards: usize,
}

impl ShardSelector {
    /// Creates a selector for `shards` shards (clamped to at least 1).
    pub fn new(shards: usize) -> Self {
        Self {
            shards: shards.max(1),
        }
    }

    /// Returns the number of shards.
    pub fn shard_count(&self) -> usize {
        self.shards
    }

    /// Maps a key to a shard index in `[0, shards)`.
    pub fn shard_for_key<K: Hash>(&self, key: &K) -> usize {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        (hasher.finish() as usize) % self.shards
    }
}

impl Default for ShardSelector {
    /// Creates a single-shard selector.
    fn default() -> Self {
        Self::new(1)
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Same key always returns the same shard.
        #[test]
        fn prop_deterministic_mapping(
            shard_count in 1usize..64,
            key in any::<u32>()
        ) {
            let selector = ShardSelector::new(shard_count);
            prop_assert_eq!(selector.shard_for_key(&key), selector.shard_for_key(&key));
        }

        /// Shard index is always in range.
        #[test]
        fn prop_shard_in_range(
            shard_count in 1usize..128,
            key in any::<u64>()
        ) {
            let selector = ShardSelector::new(shard_count);
            prop_assert!(selector.shard_for_key(&key) < shard_count);
        }

        /// With enough distinct keys, more than one shard is used.
        #[test]
        fn prop_keys_use_multiple_shards(
            shard_count in 2usize..16,
            keys in prop::collection::hash_set(any::<u32>(), 64..128)
        ) {
            let selector = ShardSelector::new(shard_count);
            let used: std::collections::HashSet<_> =
                keys.iter().map(|k| selector.shard_for_key(k)).collect();
            prop_assert!(!used.is_empty());
            prop_assert!(used.len() > 1);
        }
    }
}
