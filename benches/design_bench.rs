//! Design matrix benchmarks using Criterion.
//!
//! Benchmarks cover:
//! - Scalability (1K to 100K observations)
//! - Factor encoding (2 to 50 levels)
//! - Interactions (factor by quantitative, factor by factor)
//! - Formula algebra (sums and products of many terms)
//!
//! Run with: `cargo bench`

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use formula_rs::prelude::*;
use rand::prelude::*;
use rand_distr::Normal;
use std::hint::black_box;

// ============================================================================
// Data Generation with Reproducible RNG
// ============================================================================

/// Generate a namespace with two Gaussian covariates and two factors.
fn generate_data(size: usize, levels: usize, seed: u64) -> Namespace<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let dist = Normal::new(0.0, 1.0).unwrap();

    let x: Vec<f64> = (0..size).map(|_| dist.sample(&mut rng)).collect();
    let z: Vec<f64> = (0..size).map(|_| dist.sample(&mut rng)).collect();
    let g: Vec<Level> = (0..size)
        .map(|_| Level::from(format!("g{}", rng.random_range(0..levels))))
        .collect();
    let h: Vec<i64> = (0..size).map(|_| rng.random_range(0..4)).collect();

    Namespace::new()
        .with_values("x", x)
        .with_values("z", z)
        .with_levels("g", g)
        .with_levels("h", h)
}

fn factor_g(levels: usize) -> Factor<f64> {
    Factor::new("g", (0..levels).map(|i| format!("g{}", i)), false).unwrap()
}

fn factor_h() -> Factor<f64> {
    Factor::new("h", 0_i64..4, false).unwrap()
}

// ============================================================================
// Benchmarks
// ============================================================================

fn bench_scalability(c: &mut Criterion) {
    let mut group = c.benchmark_group("scalability");
    let plan = Design::new().build().unwrap();

    for &size in &[1_000, 10_000, 100_000] {
        let ns = generate_data(size, 5, 42);
        let x = Quantitative::new("x").unwrap();
        let formula = intercept::<f64>()
            + x.clone()
            + x.pow(2).unwrap()
            + Term::new("z").unwrap()
            + factor_g(5).main_effect(None).unwrap();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| plan.realize(black_box(&formula), black_box(&ns)).unwrap())
        });
    }
    group.finish();
}

fn bench_factor_levels(c: &mut Criterion) {
    let mut group = c.benchmark_group("factor_levels");
    let size = 10_000;

    for &levels in &[2, 10, 50] {
        let ns = generate_data(size, levels, 7);
        let g = factor_g(levels);
        let keywords = Keywords::new();

        group.bench_with_input(BenchmarkId::new("indicator", levels), &levels, |b, _| {
            b.iter(|| g.evaluate(black_box(&ns), &keywords).unwrap())
        });

        let me = g.main_effect(None).unwrap();
        group.bench_with_input(BenchmarkId::new("main_effect", levels), &levels, |b, _| {
            b.iter(|| me.evaluate(black_box(&ns), &keywords).unwrap())
        });
    }
    group.finish();
}

fn bench_interactions(c: &mut Criterion) {
    let mut group = c.benchmark_group("interactions");
    let ns = generate_data(10_000, 5, 11);
    let keywords = Keywords::new();

    let by_quant = factor_g(5) * Term::new("x").unwrap();
    group.bench_function("factor_by_quantitative", |b| {
        b.iter(|| by_quant.evaluate(black_box(&ns), None, &keywords).unwrap())
    });

    let by_factor = factor_g(5) * factor_h();
    group.bench_function("factor_by_factor", |b| {
        b.iter(|| by_factor.evaluate(black_box(&ns), None, &keywords).unwrap())
    });
    group.finish();
}

fn bench_algebra(c: &mut Criterion) {
    let mut group = c.benchmark_group("algebra");

    for &n in &[10, 50] {
        let terms: Vec<Term<f64>> = (0..n)
            .map(|i| Term::new(&format!("v{}", i)).unwrap())
            .collect();
        let left = Formula::new(terms[..n / 2].to_vec());
        let right = Formula::new(terms[n / 2..].to_vec());

        group.bench_with_input(BenchmarkId::new("sum", n), &n, |b, _| {
            b.iter(|| black_box(left.clone()) + black_box(right.clone()))
        });
        group.bench_with_input(BenchmarkId::new("product", n), &n, |b, _| {
            b.iter(|| black_box(left.clone()) * black_box(right.clone()))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_scalability,
    bench_factor_levels,
    bench_interactions,
    bench_algebra
);
criterion_main!(benches);
