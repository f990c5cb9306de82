use casemap_layout::{PointRecord, ResolveOptions, resolve_placements};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use std::time::Duration;

/// `n` records spread over `spots` distinct locations, with every 17th record unplaceable.
fn records(n: usize, spots: usize) -> Vec<PointRecord> {
    (0..n)
        .map(|i| {
            let record = PointRecord::new(format!("case-{i}"));
            if i % 17 == 0 {
                return record;
            }
            let spot = (i % spots) as f64;
            record.with_coordinates(34.24 + spot * 0.001, 132.55 + spot * 0.001)
        })
        .collect()
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_placements");
    group.measurement_time(Duration::from_secs(3));

    let opts = ResolveOptions::default();
    for &(n, spots) in &[(100usize, 100usize), (1_000, 50), (10_000, 1_000), (10_000, 10)] {
        let input = records(n, spots);
        group.bench_with_input(
            BenchmarkId::new(format!("spots_{spots}"), n),
            &input,
            |b, input| b.iter(|| resolve_placements(black_box(input), black_box(&opts))),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_resolve);
criterion_main!(benches);
