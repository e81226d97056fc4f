//! Benchmarks for the signal engine.

use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use radar_core::Observation;
use radar_signals::SignalEngine;

fn generate_observations(size: usize) -> Vec<Observation> {
    let base = NaiveDate::from_ymd_opt(2015, 1, 1).unwrap();
    (0..size)
        .map(|i| {
            let t = i as f64;
            Observation::new(
                base + Duration::days(i as i64),
                6000.0 + (t * 0.05).sin() * 500.0,
                30_000.0 + (t * 0.07).cos() * 8_000.0,
            )
        })
        .collect()
}

fn benchmark_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("SignalEngine");
    let engine = SignalEngine::default();

    for size in [365, 3650].iter() {
        let data = generate_observations(*size);

        group.bench_with_input(BenchmarkId::new("calculate", size), &data, |b, data| {
            b.iter(|| engine.calculate(black_box(data)))
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_engine);
criterion_main!(benches);
