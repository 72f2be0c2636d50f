use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use lrukit::builder::{CacheBuilder, LruBackend};
use lrukit::policy::linked_lru::LinkedLruCache;
use lrukit::policy::lru::LruCache;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

const CAPACITY: usize = 1024;

/// 80% of accesses land on the hottest 10% of `universe`.
fn hotset_keys(universe: u64, count: usize, seed: u64) -> Vec<u64> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let hot = (universe / 10).max(1);
    (0..count)
        .map(|_| {
            if rng.random::<f64>() < 0.8 {
                rng.random_range(0..hot)
            } else {
                rng.random_range(0..universe)
            }
        })
        .collect()
}

fn filled_arena(capacity: usize) -> LruCache<u64, u64> {
    let mut cache = LruCache::new(capacity);
    for i in 0..capacity as u64 {
        cache.put(i, i);
    }
    cache
}

fn filled_linked(capacity: usize) -> LinkedLruCache<u64, u64> {
    let mut cache = LinkedLruCache::new(capacity);
    for i in 0..capacity as u64 {
        cache.put(i, i);
    }
    cache
}

fn bench_lru_put_get(c: &mut Criterion) {
    c.bench_function("lru_put_get", |b| {
        b.iter_batched(
            || filled_arena(CAPACITY),
            |mut cache| {
                for i in 0..CAPACITY as u64 {
                    cache.put(std::hint::black_box(i + 10_000), i);
                    let _ = std::hint::black_box(cache.get(&std::hint::black_box(i)));
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_lru_pop_lru(c: &mut Criterion) {
    c.bench_function("lru_pop_lru", |b| {
        b.iter_batched(
            || filled_arena(CAPACITY),
            |mut cache| {
                for _ in 0..CAPACITY {
                    let _ = std::hint::black_box(cache.pop_lru());
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_lru_eviction_churn(c: &mut Criterion) {
    c.bench_function("lru_eviction_churn", |b| {
        b.iter_batched(
            || filled_arena(CAPACITY),
            |mut cache| {
                for i in 0..4 * CAPACITY as u64 {
                    cache.put(std::hint::black_box(10_000 + i), i);
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_lru_touch_hotset(c: &mut Criterion) {
    c.bench_function("lru_touch_hotset", |b| {
        b.iter_batched(
            || filled_arena(4 * CAPACITY),
            |mut cache| {
                for i in 0..4 * CAPACITY as u64 {
                    let _ = std::hint::black_box(cache.touch(&std::hint::black_box(i)));
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_linked_put_get(c: &mut Criterion) {
    c.bench_function("linked_lru_put_get", |b| {
        b.iter_batched(
            || filled_linked(CAPACITY),
            |mut cache| {
                for i in 0..CAPACITY as u64 {
                    cache.put(std::hint::black_box(i + 10_000), i);
                    let _ = std::hint::black_box(cache.get(&std::hint::black_box(i)));
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_backends_hotset(c: &mut Criterion) {
    let keys = hotset_keys(16 * CAPACITY as u64, 64 * 1024, 42);
    let mut group = c.benchmark_group("hotset_get_or_put");

    for backend in [LruBackend::Arena, LruBackend::Linked] {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{:?}", backend)),
            &keys,
            |b, keys| {
                b.iter_batched(
                    || CacheBuilder::new(CAPACITY).backend(backend).build::<u64, u64>(),
                    |mut cache| {
                        for &key in keys {
                            if cache.get(&key).is_none() {
                                cache.put(key, key);
                            }
                        }
                        std::hint::black_box(cache.len())
                    },
                    BatchSize::LargeInput,
                )
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_lru_put_get,
    bench_lru_pop_lru,
    bench_lru_eviction_churn,
    bench_lru_touch_hotset,
    bench_linked_put_get,
    bench_backends_hotset
);
criterion_main!(benches);
