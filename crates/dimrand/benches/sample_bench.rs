//! Criterion microbenches for the samplers and their shared primitives.
//!
//! - feasible sets: single divisor, several divisors with exclusions.
//! - single value: closed-form vs listed over a wide range.
//! - dimensions: host defaults, aspect maintenance + Gaussian draws.
//!
//! Results live under `target/criterion`.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dimrand::api::{DimensionInputs, HostNode, RandomDimensionsNode, RandomizationType};
use dimrand::prelude::*;

fn bench_feasible(c: &mut Criterion) {
    let mut group = c.benchmark_group("feasible");
    let range = Range::new(256, 4096).unwrap();
    let single = DivisorSet::single(64).unwrap();
    let several = DivisorSet::new(vec![8, 48, 64, 96]).unwrap();
    let exclusions: ExclusionSet = (0..32).map(|k| 512 + 64 * k).collect();
    group.bench_function(BenchmarkId::new("build", "div64"), |b| {
        b.iter(|| FeasibleSet::build(black_box(range), &single, &ExclusionSet::default()))
    });
    group.bench_function(BenchmarkId::new("build", "4div-excl32"), |b| {
        b.iter(|| FeasibleSet::build(black_box(range), &several, &exclusions))
    });
    let set = FeasibleSet::build(range, &several, &exclusions);
    group.bench_function(BenchmarkId::new("nearest", "4div-excl32"), |b| {
        b.iter(|| set.nearest(black_box(1500)))
    });
    group.finish();
}

fn bench_single(c: &mut Criterion) {
    let mut group = c.benchmark_group("single");
    let mut rng = RngSource::seeded(42);
    group.bench_function(BenchmarkId::new("closed_form", "0-1e6/7"), |b| {
        b.iter(|| sample_uniform_multiple(0, black_box(1_000_000), 7, &mut rng).unwrap())
    });
    group.bench_function(BenchmarkId::new("listed", "0-1e6/7"), |b| {
        b.iter(|| sample_uniform_multiple_listed(0, black_box(1_000_000), 7, &mut rng).unwrap())
    });
    group.finish();
}

fn bench_dims(c: &mut Criterion) {
    let mut group = c.benchmark_group("dims");
    let mut rng = RngSource::seeded(7);
    let defaults = DimensionInputs::default();
    group.bench_function(BenchmarkId::new("node", "defaults"), |b| {
        b.iter(|| RandomDimensionsNode.run(black_box(&defaults), &mut rng).unwrap())
    });
    let aspect = DimensionInputs {
        width_divisors: "8, 64".into(),
        maintain_aspect_ratio: true,
        aspect_ratio: 16.0 / 9.0,
        randomization_type: RandomizationType::Gaussian,
        max_aspect_ratio_deviation: 2.0,
        ..DimensionInputs::default()
    };
    group.bench_function(BenchmarkId::new("node", "aspect-gaussian"), |b| {
        b.iter(|| RandomDimensionsNode.run(black_box(&aspect), &mut rng).unwrap())
    });
    let request = defaults.into_request().unwrap();
    group.bench_function(BenchmarkId::new("sample_dimensions", "typed"), |b| {
        b.iter(|| sample_dimensions(black_box(&request), &mut rng).unwrap())
    });
    group.finish();
}

criterion_group!(benches, bench_feasible, bench_single, bench_dims);
criterion_main!(benches);
