//! Criterion benchmarks for riskq_sim loss aggregation.
//!
//! Benchmarks cover:
//! - Serial aggregation with varying iteration counts
//! - Parallel (rayon) aggregation against the serial runner
//! - Cache hits versus recomputation

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use riskq_core::types::{DistributionSpec, RiskEvent};
use riskq_sim::cache::{Fingerprint, ResultCache};
use riskq_sim::mc::{aggregate, SimulationConfig};

/// Typical register: three events with mixed frequency models.
fn register() -> Vec<RiskEvent> {
    vec![
        RiskEvent::new(
            DistributionSpec::Triangular {
                min: 1_000.0,
                mode: 5_000.0,
                max: 20_000.0,
            },
            DistributionSpec::Triangular {
                min: 0.1,
                mode: 0.5,
                max: 2.0,
            },
        ),
        RiskEvent::new(
            DistributionSpec::Lognormal {
                mean: 10.0,
                std_dev: 1.0,
            },
            DistributionSpec::Poisson { lambda: 0.3 },
        ),
        RiskEvent::new(
            DistributionSpec::Pert {
                min: 500.0,
                mode: 2_000.0,
                max: 9_000.0,
                gamma: 4.0,
            },
            DistributionSpec::NegativeBinomial { r: 2, p: 0.6 },
        ),
    ]
}

fn config(iterations: usize) -> SimulationConfig {
    SimulationConfig::builder()
        .iterations(iterations)
        .seed(42)
        .build()
        .expect("valid benchmark config")
}

/// Benchmark serial aggregation.
fn bench_serial(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate_serial");
    let events = register();

    for iterations in [1_000, 10_000, 100_000] {
        let cfg = config(iterations);
        group.bench_with_input(
            BenchmarkId::new("iterations", iterations),
            &cfg,
            |b, cfg| {
                b.iter(|| aggregate(black_box(&events), cfg));
            },
        );
    }

    group.finish();
}

/// Benchmark parallel aggregation.
#[cfg(feature = "parallel")]
fn bench_parallel(c: &mut Criterion) {
    use riskq_sim::mc::aggregate_parallel;
    use riskq_sim::session::CancellationToken;

    let mut group = c.benchmark_group("aggregate_parallel");
    let events = register();
    let token = CancellationToken::new();

    for iterations in [10_000, 100_000, 1_000_000] {
        let cfg = config(iterations);
        group.bench_with_input(
            BenchmarkId::new("iterations", iterations),
            &cfg,
            |b, cfg| {
                b.iter(|| aggregate_parallel(black_box(&events), cfg, &token));
            },
        );
    }

    group.finish();
}

#[cfg(not(feature = "parallel"))]
fn bench_parallel(_c: &mut Criterion) {}

/// Benchmark fingerprinting and cache hits.
fn bench_cache(c: &mut Criterion) {
    let events = register();
    let cfg = config(10_000);
    let mut cache = ResultCache::new();
    let fp = Fingerprint::new(&events, &cfg);
    cache
        .get_or_compute(fp.clone(), || aggregate(&events, &cfg))
        .expect("valid register");

    c.bench_function("fingerprint", |b| {
        b.iter(|| Fingerprint::new(black_box(&events), &cfg));
    });
    c.bench_function("cache_hit", |b| {
        b.iter(|| cache.get(black_box(&fp)));
    });
}

criterion_group!(benches, bench_serial, bench_parallel, bench_cache);
criterion_main!(benches);
