pub use crate::builder::{AnyCache, CacheBuilder, CachePolicy};
pub use crate::ds::{FrequencyBuckets, GhostList, RecencyList, ShardSelector};
pub use crate::policy::{
    ArcCache, LfuAvgCache, LfuCache, LruCache, LrukCache, ShardedArcCache, ShardedCache,
    ShardedLfuAvgCache, ShardedLfuCache, ShardedLruCache, ShardedLrukCache,
};
pub use crate::traits::{Cache, PurgeCache};
