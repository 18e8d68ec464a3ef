//! Generation benchmarks.
//!
//! Per-seed cost is what bounds scan throughput: one instance setup plus
//! whatever draws a filter makes. Seeds come from fixed seed numbers.

#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use seed_scanner::core::{number_to_seed, pseudohash, LuaRandom};
use seed_scanner::game::{EngineConfig, Instance, Source};
use seed_scanner::search::{builtin, SeedFilter, BUILTIN_FILTERS};

// =============================================================================
// PRIMITIVES
// =============================================================================

fn bench_primitives(c: &mut Criterion) {
    let mut group = c.benchmark_group("primitives");

    group.bench_function("pseudohash_seed", |b| {
        b.iter(|| black_box(pseudohash(black_box("Tag17LB2WVPK"))))
    });

    group.bench_function("lua_random", |b| {
        b.iter(|| {
            let mut rng = LuaRandom::new(black_box(0.123456789));
            black_box(rng.random())
        })
    });

    group.finish();
}

// =============================================================================
// INSTANCE
// =============================================================================

fn bench_instance(c: &mut Criterion) {
    let config = EngineConfig::default();
    let mut group = c.benchmark_group("instance");

    group.bench_function("from_config", |b| {
        b.iter(|| black_box(Instance::from_config(black_box("7LB2WVPK"), &config)))
    });

    group.bench_function("first_shop", |b| {
        b.iter(|| {
            let mut inst = Instance::from_config("7LB2WVPK", &config);
            let tag = inst.next_tag(1);
            let voucher = inst.next_voucher(1);
            let boss = inst.next_boss(1);
            let items: Vec<_> = (0..4).map(|_| inst.next_shop_item(1)).collect();
            black_box((tag, voucher, boss, items))
        })
    });

    group.bench_function("soul_joker", |b| {
        b.iter(|| {
            let mut inst = Instance::from_config("AAAAAC5M", &config);
            black_box(inst.next_joker(Source::Soul, 1, false))
        })
    });

    group.finish();
}

// =============================================================================
// FILTERS
// =============================================================================

fn bench_filters(c: &mut Criterion) {
    let config = EngineConfig::default();
    let seeds: Vec<String> = (0..256u64)
        .filter_map(|n| number_to_seed(n * 7_919))
        .map(|seed| seed.as_str().to_owned())
        .collect();

    let mut group = c.benchmark_group("filters");
    group.throughput(Throughput::Elements(seeds.len() as u64));

    for key in BUILTIN_FILTERS {
        let Some(filter) = builtin(key) else {
            continue;
        };
        group.bench_with_input(BenchmarkId::from_parameter(key), &seeds, |b, seeds| {
            b.iter(|| {
                seeds
                    .iter()
                    .map(|seed| filter.apply(seed, &config))
                    .sum::<u32>()
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_primitives, bench_instance, bench_filters);
criterion_main!(benches);
