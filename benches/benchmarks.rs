//! Benchmarks for momentflow accumulators
//!
//! Run with: cargo bench

#[cfg(not(all(feature = "quantiles", feature = "validation")))]
compile_error!("Benchmarks require the default features. Run: cargo bench");

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use momentflow::quantiles::P2Quantile;
use momentflow::statistics::{Moments, RunningStats};
use momentflow::validation::{CrossValidator, FaultReport, FaultSignal};

// ============================================================================
// Moments Benchmarks
// ============================================================================

fn bench_moments(c: &mut Criterion) {
    let mut group = c.benchmark_group("moments");
    group.throughput(Throughput::Elements(1));

    group.bench_function("add", |b| {
        let mut moments = Moments::new();
        let mut i = 0u64;
        b.iter(|| {
            moments.add(i as f64);
            i = i.wrapping_add(1);
        });
    });

    group.bench_function("query_all", |b| {
        let mut moments = Moments::new();
        for i in 0..100_000u64 {
            moments.add(i as f64);
        }
        b.iter(|| {
            black_box(moments.mean());
            black_box(moments.variance());
            black_box(moments.skewness());
            black_box(moments.kurtosis());
        });
    });

    group.finish();
}

// ============================================================================
// P² Quantile Benchmarks
// ============================================================================

fn bench_p2(c: &mut Criterion) {
    let mut group = c.benchmark_group("p2_quantile");
    group.throughput(Throughput::Elements(1));

    for p in [0.5, 0.95] {
        group.bench_function(format!("add_p{}", (p * 100.0) as u32), |b| {
            let mut q = P2Quantile::new(p);
            let mut i = 0u64;
            b.iter(|| {
                let _ = q.add((i.wrapping_mul(2_654_435_761) % 1_000_003) as f64);
                i = i.wrapping_add(1);
            });
        });
    }

    group.bench_function("quantile", |b| {
        let mut q = P2Quantile::new(0.5);
        for i in 0..100_000u64 {
            q.add(i as f64).unwrap();
        }
        b.iter(|| black_box(q.quantile()));
    });

    group.finish();
}

// ============================================================================
// RunningStats Benchmarks
// ============================================================================

fn bench_running_stats(c: &mut Criterion) {
    let mut group = c.benchmark_group("running_stats");
    group.throughput(Throughput::Elements(1));

    group.bench_function("add", |b| {
        let mut stats = RunningStats::new();
        let mut i = 0u64;
        b.iter(|| {
            let _ = stats.add(i as f64);
            i = i.wrapping_add(1);
        });
    });

    group.bench_function("query_all", |b| {
        let mut stats = RunningStats::new();
        for i in 0..100_000u64 {
            stats.add(i as f64).unwrap();
        }
        b.iter(|| {
            black_box(stats.mean());
            black_box(stats.variance());
            black_box(stats.rms());
            black_box(stats.min());
            black_box(stats.max());
            black_box(stats.median());
        });
    });

    group.finish();
}

// ============================================================================
// CrossValidator Benchmarks
// ============================================================================

fn bench_cross_validator(c: &mut Criterion) {
    let mut group = c.benchmark_group("cross_validator");
    group.throughput(Throughput::Elements(1));

    group.bench_function("add", |b| {
        let mut cv =
            CrossValidator::new(|_: &FaultReport<'_>| FaultSignal::Continue);
        let mut i = 0u64;
        b.iter(|| {
            black_box(cv.add(i as f64));
            i = i.wrapping_add(1);
        });
    });

    group.finish();
}

// ============================================================================
// Main
// ============================================================================

criterion_group!(
    benches,
    bench_moments,
    bench_p2,
    bench_running_stats,
    bench_cross_validator,
);

criterion_main!(benches);
