//! Criterion benchmarks for the geometry engine.
//! Focus sizes: n in {8, 64, 512}.
//! Results land under target/criterion.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use meetpoint::center::{geometric_median, MedianCfg};
use meetpoint::poly::best_fit_polynomial;
use meetpoint::sample::{draw_cloud, CloudCfg, ReplayToken};
use meetpoint::tour::heuristic_tour;
use meetpoint::Metric;

fn cloud(n: usize, seed: u64) -> Vec<meetpoint::Point> {
    let cfg = CloudCfg {
        count: n,
        clusters: 3,
        ..Default::default()
    };
    draw_cloud(cfg, ReplayToken { seed, index: 0 })
}

fn bench_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine");
    for &n in &[8usize, 64, 512] {
        let pts = cloud(n, 43);
        let cfg = MedianCfg::default();
        group.bench_with_input(BenchmarkId::new("median_cardinal", n), &pts, |b, pts| {
            b.iter(|| geometric_median(pts, false, cfg.epsilon, cfg.bounds).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("median_subsearch", n), &pts, |b, pts| {
            b.iter(|| geometric_median(pts, true, cfg.epsilon, cfg.bounds).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("tour_euclidean", n), &pts, |b, pts| {
            b.iter(|| heuristic_tour(pts, 0, Metric::Euclidean).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("fit_cubic", n), &pts, |b, pts| {
            b.iter(|| best_fit_polynomial(pts, Some(3usize.min(pts.len() - 1))))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_engine);
criterion_main!(benches);
