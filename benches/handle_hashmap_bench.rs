use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use std::time::Duration;
use view_map::handle_hash_map::{Handle, HandleHashMap};

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn key(n: u64) -> String {
    format!("k{:016x}", n)
}

fn filled(seed: u64, n: usize) -> HandleHashMap<String, u64> {
    let mut m = HandleHashMap::new();
    for (i, x) in lcg(seed).take(n).enumerate() {
        m.put(key(x), i as u64);
    }
    m
}

fn bench_put_fresh_100k(c: &mut Criterion) {
    c.bench_function("handle::put_fresh_100k", |b| {
        b.iter_batched(
            HandleHashMap::<String, u64>::new,
            |mut m| {
                for (i, x) in lcg(1).take(100_000).enumerate() {
                    m.put(key(x), i as u64);
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_put_overwrite_100k(c: &mut Criterion) {
    c.bench_function("handle::put_overwrite_100k", |b| {
        b.iter_batched(
            || filled(2, 100_000),
            |mut m| {
                for (i, x) in lcg(2).take(100_000).enumerate() {
                    m.put(key(x), !(i as u64));
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_remove_handle_random_10k(c: &mut Criterion) {
    c.bench_function("handle::remove_handle_random_10k_of_110k", |b| {
        b.iter_batched(
            || {
                let m = filled(5, 110_000);
                let handles = m.handles();
                // Precompute 10k unique indices via LCG
                let n = handles.len();
                let mut sel = std::collections::HashSet::with_capacity(10_000);
                let mut s = 0x9e3779b97f4a7c15u64;
                while sel.len() < 10_000 {
                    s = s.wrapping_mul(2862933555777941757).wrapping_add(3037000493);
                    sel.insert((s as usize) % n);
                }
                let to_remove: Vec<Handle> = sel.into_iter().map(|i| handles[i]).collect();
                (m, to_remove)
            },
            |(mut m, to_remove)| {
                for h in to_remove {
                    let _ = m.remove_handle(h);
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_find_hit_10k(c: &mut Criterion) {
    c.bench_function("handle::find_hit_10k_on_100k", |b| {
        let m = filled(7, 100_000);
        let keys: Vec<String> = m.iter().map(|(_, k, _)| k.clone()).collect();
        // Precompute 10k random query keys using LCG
        let n = keys.len();
        let mut s = 0x9e3779b97f4a7c15u64;
        let queries: Vec<String> = (0..10_000)
            .map(|_| {
                s = s.wrapping_mul(2862933555777941757).wrapping_add(3037000493);
                keys[(s as usize) % n].clone()
            })
            .collect();
        b.iter(|| {
            for k in &queries {
                black_box(m.find(k));
            }
        })
    });
}

fn bench_find_miss_10k(c: &mut Criterion) {
    c.bench_function("handle::find_miss_10k_on_100k", |b| {
        let m = filled(11, 100_000);
        let mut miss = lcg(0xdead_beef);
        b.iter(|| {
            for _ in 0..10_000 {
                let k = miss.next().map(key).unwrap_or_default();
                black_box(m.find(&k));
            }
        })
    });
}

fn bench_value_scan(c: &mut Criterion) {
    c.bench_function("handle::contains_value_miss_10k", |b| {
        let m = filled(13, 10_000);
        b.iter(|| black_box(m.contains_value(&u64::MAX)))
    });
}

fn bench_iter_and_retain(c: &mut Criterion) {
    c.bench_function("handle::iter_all_100k", |b| {
        let m = filled(999, 100_000);
        b.iter(|| {
            let mut sum = 0u64;
            for (_h, _k, v) in m.iter() {
                sum = sum.wrapping_add(*v);
            }
            black_box(sum)
        })
    });

    c.bench_function("handle::retain_half_100k", |b| {
        b.iter_batched(
            || filled(1001, 100_000),
            |mut m| {
                let removed = m.retain(|_, v| v % 2 == 0);
                black_box((m, removed))
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(12)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1))
}

criterion_group! {
    name = benches_put;
    config = bench_config();
    targets = bench_put_fresh_100k, bench_put_overwrite_100k
}
criterion_group! {
    name = benches_ops;
    config = bench_config();
    targets = bench_remove_handle_random_10k,
              bench_find_hit_10k,
              bench_find_miss_10k,
              bench_value_scan,
              bench_iter_and_retain
}
criterion_main!(benches_put, benches_ops);
