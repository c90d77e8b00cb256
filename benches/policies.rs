use cachemux::policy::arc::ArcCache;
use cachemux::policy::lfu::LfuCache;
use cachemux::policy::lru::LruCache;
use cachemux::policy::sharded::ShardedLruCache;
use cachemux::traits::Cache;
use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const CAPACITY: usize = 1024;

fn bench_lru_insert_get(c: &mut Criterion) {
    c.bench_function("lru_insert_get", |b| {
        b.iter_batched(
            || {
                let cache = LruCache::new(CAPACITY);
                for i in 0..CAPACITY as u64 {
                    cache.put(i, i);
                }
                cache
            },
            |cache| {
                for i in 0..CAPACITY as u64 {
                    cache.put(std::hint::black_box(i + 10_000), i);
                    let _ = std::hint::black_box(cache.get(&std::hint::black_box(i)));
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_lfu_eviction_churn(c: &mut Criterion) {
    c.bench_function("lfu_eviction_churn", |b| {
        b.iter_batched(
            || {
                let cache = LfuCache::new(CAPACITY);
                for i in 0..CAPACITY as u64 {
                    cache.put(i, i);
                }
                cache
            },
            |cache| {
                for i in 0..(4 * CAPACITY) as u64 {
                    cache.put(std::hint::black_box(10_000 + i), i);
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_arc_mixed_workload(c: &mut Criterion) {
    c.bench_function("arc_mixed_workload", |b| {
        b.iter_batched(
            || {
                let cache = ArcCache::new(CAPACITY);
                let mut rng = StdRng::seed_from_u64(42);
                // Hot set plus a long scan tail, pre-generated so the
                // measured loop is pure cache work.
                let trace: Vec<u64> = (0..8_192)
                    .map(|_| {
                        if rng.random::<f64>() < 0.7 {
                            rng.random_range(0..64)
                        } else {
                            rng.random_range(0..100_000)
                        }
                    })
                    .collect();
                (cache, trace)
            },
            |(cache, trace)| {
                for &key in &trace {
                    if cache.get(&std::hint::black_box(key)).is_none() {
                        cache.put(key, key);
                    }
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_sharded_vs_single_lru(c: &mut Criterion) {
    let mut group = c.benchmark_group("sharded_fanout");

    group.bench_function("single_shard", |b| {
        b.iter_batched(
            || ShardedLruCache::<u64, u64>::lru(CAPACITY, 1),
            |cache| {
                for i in 0..4_096u64 {
                    cache.put(std::hint::black_box(i), i);
                    let _ = std::hint::black_box(cache.get(&(i / 2)));
                }
            },
            BatchSize::SmallInput,
        )
    });

    group.bench_function("eight_shards", |b| {
        b.iter_batched(
            || ShardedLruCache::<u64, u64>::lru(CAPACITY, 8),
            |cache| {
                for i in 0..4_096u64 {
                    cache.put(std::hint::black_box(i), i);
                    let _ = std::hint::black_box(cache.get(&(i / 2)));
                }
            },
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_lru_insert_get,
    bench_lfu_eviction_churn,
    bench_arc_mixed_workload,
    bench_sharded_vs_single_lru
);
criterion_main!(benches);
