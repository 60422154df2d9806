//! Criterion benchmarks for window plan construction and evaluation.
//!
//! Uses random Euclidean instances so timings reflect the plan walk rather
//! than any particular geometry.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use u_windowopt::eval::{EvaluationContext, ExhaustiveEvaluator};
use u_windowopt::optimizer::{DistanceMatrix, SubPathOptimizer};
use u_windowopt::plan::MoveTreeBuilder;

fn random_instance(n: usize, seed: u64) -> (DistanceMatrix, Vec<usize>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let points: Vec<(f64, f64)> = (0..n)
        .map(|_| (rng.random_range(0.0..1000.0), rng.random_range(0.0..1000.0)))
        .collect();
    let mut tour: Vec<usize> = (0..n).collect();
    tour.shuffle(&mut rng);
    (DistanceMatrix::from_points(&points), tour)
}

// ===========================================================================
// Plan construction
// ===========================================================================

fn bench_plan_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("plan_build");
    group.sample_size(10);

    for &length in &[5usize, 6, 7, 8] {
        group.bench_with_input(BenchmarkId::from_parameter(length), &length, |b, &l| {
            b.iter(|| {
                let plan = MoveTreeBuilder::new(black_box(l)).unwrap().build().unwrap();
                black_box(plan)
            })
        });
    }
    group.finish();
}

// ===========================================================================
// Incremental apply vs brute force
// ===========================================================================

fn bench_apply(c: &mut Criterion) {
    let mut group = c.benchmark_group("apply");
    group.sample_size(10);

    for &length in &[5usize, 6, 7, 8, 9] {
        let optimizer = SubPathOptimizer::with_window_length(length).unwrap();
        optimizer.plan().unwrap();
        let (dm, tour) = random_instance(64, 42);
        let mut ctx = EvaluationContext::new(length);

        group.bench_with_input(BenchmarkId::from_parameter(length), &length, |b, _| {
            b.iter(|| {
                let mut scratch = tour.clone();
                let delta = optimizer
                    .apply_with_context(&mut ctx, black_box(&mut scratch), 7, &dm)
                    .unwrap();
                black_box(delta)
            })
        });
    }
    group.finish();
}

fn bench_exhaustive(c: &mut Criterion) {
    let mut group = c.benchmark_group("exhaustive");
    group.sample_size(10);

    for &length in &[5usize, 6, 7, 8] {
        let (dm, tour) = random_instance(64, 42);
        let values: Vec<usize> = tour[..length + 2].to_vec();
        group.bench_with_input(BenchmarkId::from_parameter(length), &values, |b, v| {
            b.iter(|| black_box(ExhaustiveEvaluator::best(black_box(v), &dm)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_plan_build, bench_apply, bench_exhaustive);
criterion_main!(benches);
