//! Criterion benchmarks for grid queries and masked assignment.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use gridmask::{CmpOp, DenseGrid, SelectMode};

fn bench_compare_to_scalar(c: &mut Criterion) {
    let mut group = c.benchmark_group("compare_to_scalar");

    for size in [16usize, 128, 512].iter() {
        let grid = DenseGrid::random(*size, *size, Some(42));

        group.bench_with_input(BenchmarkId::new("all", size), size, |b, _| {
            b.iter(|| {
                grid.compare_to_scalar(black_box(0.5), CmpOp::Gt, None, SelectMode::First)
                    .expect("no limit")
            });
        });

        group.bench_with_input(BenchmarkId::new("last_10", size), size, |b, _| {
            b.iter(|| {
                grid.compare_to_scalar(black_box(0.5), CmpOp::Gt, Some(10), SelectMode::Last)
                    .expect("positive limit")
            });
        });
    }

    group.finish();
}

fn bench_compare_elementwise(c: &mut Criterion) {
    let mut group = c.benchmark_group("compare_elementwise");

    for size in [16usize, 128, 512].iter() {
        let a = DenseGrid::random(*size, *size, Some(1));
        let b = DenseGrid::random(*size, *size, Some(2));

        group.bench_with_input(BenchmarkId::new("gt", size), size, |bench, _| {
            bench.iter(|| a.compare_elementwise(black_box(&b), CmpOp::Gt).expect("same shape"));
        });
    }

    group.finish();
}

fn bench_assign_at_indices(c: &mut Criterion) {
    let mut group = c.benchmark_group("assign_at_indices");

    for size in [16usize, 128, 512].iter() {
        let grid = DenseGrid::random(*size, *size, Some(7));
        let indices = grid
            .compare_to_scalar(0.5, CmpOp::Gt, None, SelectMode::First)
            .expect("no limit");

        group.bench_with_input(BenchmarkId::new("half", size), size, |b, _| {
            b.iter_batched(
                || grid.clone(),
                |mut g| {
                    g.assign_at_indices(black_box(&indices), 1.0)
                        .expect("grid-derived indices");
                    g
                },
                criterion::BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_compare_to_scalar,
    bench_compare_elementwise,
    bench_assign_at_indices
);
criterion_main!(benches);
