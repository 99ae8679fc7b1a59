use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rbt_index::{OSTreeMap, RBTreeMap};
use std::collections::BTreeMap;
use std::hint::black_box;

const N: usize = 10_000;

// ─── Helper functions to generate key sequences ─────────────────────────────

fn ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).collect()
}

fn random_keys(n: usize) -> Vec<i64> {
    // Use a simple LCG for deterministic pseudo-random sequence
    let mut keys = Vec::with_capacity(n);
    let mut x: u64 = 12345;
    for _ in 0..n {
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
        keys.push((x >> 33) as i64);
    }
    keys
}

fn key_sets() -> [(&'static str, Vec<i64>); 2] {
    [("ordered", ordered_keys(N)), ("random", random_keys(N))]
}

// ─── Map Benchmarks ─────────────────────────────────────────────────────────

fn bench_map_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_insert");

    for (order, keys) in key_sets() {
        group.bench_function(BenchmarkId::new("RBTreeMap", order), |b| {
            b.iter(|| {
                let mut map = RBTreeMap::new();
                for &k in &keys {
                    map.insert(k, k);
                }
                map
            });
        });

        group.bench_function(BenchmarkId::new("OSTreeMap", order), |b| {
            b.iter(|| {
                let mut map = OSTreeMap::new();
                for &k in &keys {
                    map.insert(k, k);
                }
                map
            });
        });

        group.bench_function(BenchmarkId::new("BTreeMap", order), |b| {
            b.iter(|| {
                let mut map = BTreeMap::new();
                for &k in &keys {
                    map.insert(k, k);
                }
                map
            });
        });
    }

    group.finish();
}

fn bench_map_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_get");

    for (order, keys) in key_sets() {
        let rb_map: RBTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
        let bt_map: BTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();

        group.bench_function(BenchmarkId::new("RBTreeMap", order), |b| {
            b.iter(|| {
                for k in &keys {
                    black_box(rb_map.get(k));
                }
            });
        });

        group.bench_function(BenchmarkId::new("BTreeMap", order), |b| {
            b.iter(|| {
                for k in &keys {
                    black_box(bt_map.get(k));
                }
            });
        });
    }

    group.finish();
}

fn bench_map_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_remove");

    for (order, keys) in key_sets() {
        let rb_map: RBTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
        let os_map: OSTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();

        group.bench_function(BenchmarkId::new("RBTreeMap", order), |b| {
            b.iter_batched(
                || rb_map.clone(),
                |mut map| {
                    for k in &keys {
                        map.remove(k);
                    }
                    map
                },
                criterion::BatchSize::LargeInput,
            );
        });

        group.bench_function(BenchmarkId::new("OSTreeMap", order), |b| {
            b.iter_batched(
                || os_map.clone(),
                |mut map| {
                    for k in &keys {
                        map.remove(k);
                    }
                    map
                },
                criterion::BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

// ─── Order-statistic and range benchmarks ───────────────────────────────────

fn bench_rank_select(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank_select");
    let keys = random_keys(N);
    let os_map: OSTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();

    group.bench_function(BenchmarkId::new("rank", N), |b| {
        b.iter(|| {
            for k in &keys {
                black_box(os_map.rank(k));
            }
        });
    });

    group.bench_function(BenchmarkId::new("select", N), |b| {
        b.iter(|| {
            for i in 0..os_map.len() {
                black_box(os_map.select(i).ok());
            }
        });
    });

    group.finish();
}

fn bench_range_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("range_scan");
    let rb_map: RBTreeMap<i64, i64> = ordered_keys(N).into_iter().map(|k| (k, k)).collect();
    let bt_map: BTreeMap<i64, i64> = ordered_keys(N).into_iter().map(|k| (k, k)).collect();
    let (lo, hi) = (N as i64 / 4, 3 * N as i64 / 4);

    group.bench_function(BenchmarkId::new("RBTreeMap", N), |b| {
        b.iter(|| rb_map.range(lo..hi).map(|(_, v)| *v).sum::<i64>());
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| bt_map.range(lo..hi).map(|(_, v)| *v).sum::<i64>());
    });

    group.finish();
}

criterion_group!(map_benches, bench_map_insert, bench_map_get, bench_map_remove);

criterion_group!(order_benches, bench_rank_select, bench_range_scan);

criterion_main!(map_benches, order_benches);
