//! Benchmark for lazy sequence pipelines vs standard iterators.
//!
//! Measures the per-element cost of the cursor protocol, the cost of deep
//! concatenation chains, and the set and grouping operators.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use lazyseq::Sequence;
use std::hint::black_box;

// =============================================================================
// select/filter Pipeline Benchmark
// =============================================================================

fn benchmark_pipeline(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("select_filter");

    for size in [100, 1000, 10000] {
        let values: Vec<i64> = (0..size).collect();
        let sequence = Sequence::from_vec(values.clone());

        group.bench_with_input(BenchmarkId::new("Sequence", size), &sequence, |bencher, sequence| {
            bencher.iter(|| {
                let total = sequence
                    .select(|value| value * 3)
                    .filter(|value| value % 2 == 0)
                    .sum()
                    .unwrap();
                black_box(total)
            });
        });

        group.bench_with_input(BenchmarkId::new("Iterator", size), &values, |bencher, values| {
            bencher.iter(|| {
                let total: i64 = values
                    .iter()
                    .map(|value| value * 3)
                    .filter(|value| value % 2 == 0)
                    .sum();
                black_box(total)
            });
        });
    }

    group.finish();
}

// =============================================================================
// concat Depth Benchmark
// =============================================================================

fn benchmark_concat_depth(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("concat_depth");

    for depth in [10, 100, 500] {
        let chained = (0..depth).fold(Sequence::empty(), |accumulated: Sequence<i32>, index| {
            accumulated.concat(&Sequence::once(index))
        });

        group.bench_with_input(
            BenchmarkId::new("left_nested", depth),
            &chained,
            |bencher, chained| {
                bencher.iter(|| black_box(chained.count().unwrap()));
            },
        );
    }

    group.finish();
}

// =============================================================================
// Set and Grouping Benchmark
// =============================================================================

fn benchmark_set_operators(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("set_operators");

    for size in [100, 1000, 10000] {
        let sequence = Sequence::from_vec((0..size).map(|value| value % 97).collect::<Vec<i32>>());
        let other = Sequence::range(0, 50);

        group.bench_with_input(BenchmarkId::new("distinct", size), &sequence, |bencher, sequence| {
            bencher.iter(|| black_box(sequence.distinct().count().unwrap()));
        });

        group.bench_with_input(BenchmarkId::new("except", size), &sequence, |bencher, sequence| {
            bencher.iter(|| black_box(sequence.except(&other).count().unwrap()));
        });

        group.bench_with_input(BenchmarkId::new("group_by", size), &sequence, |bencher, sequence| {
            bencher.iter(|| black_box(sequence.group_by(|value| value % 7).count().unwrap()));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_pipeline,
    benchmark_concat_depth,
    benchmark_set_operators
);
criterion_main!(benches);
