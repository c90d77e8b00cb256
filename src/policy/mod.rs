pub mod arc;
pub mod lfu;
pub mod lfu_avg;
pub mod lru;
pub mod lru_k;
pub mod sharded;

pub use arc::ArcCache;
pub use lfu::LfuCache;
pub use lfu_avg::LfuAvgCache;
pub use lru::LruCache;
pub use lru_k::LrukCache;
pub use sharded::{
    ShardedArcCache, ShardedCache, ShardedLfuAvgCache, ShardedLfuCache, ShardedLruCache,
    ShardedLrukCache,
};
