use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rb_index::{Config, RbTree, Verification};
use std::collections::BTreeMap;
use std::hint::black_box;

const N: usize = 10_000;

// ─── Helper functions to generate key sequences ─────────────────────────────

fn ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).collect()
}

fn reverse_ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).rev().collect()
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

fn unchecked() -> RbTree<usize, i64> {
    RbTree::with_config(Config::new().capacity(N).verification(Verification::Never))
}

fn build(keys: &[i64]) -> RbTree<usize, i64> {
    let mut tree = unchecked();
    for (id, &key) in keys.iter().enumerate() {
        tree.insert(id, key).unwrap();
    }
    tree
}

// ─── Insert ─────────────────────────────────────────────────────────────────

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");

    for (name, keys) in [
        ("ordered", ordered_keys(N)),
        ("reverse", reverse_ordered_keys(N)),
        ("random", random_keys(N)),
    ] {
        group.bench_function(BenchmarkId::new("RbTree", name), |b| {
            b.iter(|| build(&keys));
        });

        // Baseline: a multimap keyed by (key, id) gives the same ordering.
        group.bench_function(BenchmarkId::new("BTreeMap", name), |b| {
            b.iter(|| {
                let mut map = BTreeMap::new();
                for (id, &key) in keys.iter().enumerate() {
                    map.insert((key, id), ());
                }
                map
            });
        });
    }

    group.finish();
}

// ─── Delete by identifier ───────────────────────────────────────────────────

fn bench_delete(c: &mut Criterion) {
    let keys = random_keys(N);
    let tree = build(&keys);
    let mut group = c.benchmark_group("delete");

    group.bench_function(BenchmarkId::new("RbTree", "in_id_order"), |b| {
        b.iter_batched(
            || tree.clone(),
            |mut tree| {
                for id in 0..N {
                    tree.delete(&id).unwrap();
                }
                tree
            },
            criterion::BatchSize::LargeInput,
        );
    });

    group.bench_function(BenchmarkId::new("RbTree", "in_key_order"), |b| {
        let order: Vec<usize> = tree.ids().copied().collect();
        b.iter_batched(
            || tree.clone(),
            |mut tree| {
                for id in &order {
                    tree.delete(id).unwrap();
                }
                tree
            },
            criterion::BatchSize::LargeInput,
        );
    });

    group.finish();
}

// ─── Neighbor queries ───────────────────────────────────────────────────────

fn bench_neighbors(c: &mut Criterion) {
    let tree = build(&random_keys(N));
    let mut group = c.benchmark_group("neighbors");

    group.bench_function(BenchmarkId::new("RbTree", "successor_by_id"), |b| {
        b.iter(|| {
            let mut hits = 0usize;
            for id in 0..N {
                hits += usize::from(tree.successor(black_box(&id)).is_some());
            }
            hits
        });
    });

    group.bench_function(BenchmarkId::new("RbTree", "full_walk"), |b| {
        b.iter(|| tree.iter().map(|(_, &key)| key).fold(0i64, i64::wrapping_add));
    });

    group.bench_function(BenchmarkId::new("RbTree", "check"), |b| {
        b.iter(|| tree.is_rbt());
    });

    group.finish();
}

// ─── Criterion Groups ───────────────────────────────────────────────────────

criterion_group!(insert_benches, bench_insert);

criterion_group!(delete_benches, bench_delete);

criterion_group!(query_benches, bench_neighbors);

criterion_main!(insert_benches, delete_benches, query_benches);
