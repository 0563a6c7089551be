use criterion::{black_box, criterion_group, criterion_main, Criterion};
use bumbles_core::spatial_hash::SpatialHash;

fn grid_positions(n: usize) -> Vec<(f64, f64)> {
    (0..n)
        .map(|i| {
            let x = (i % 40) as f64 * 25.0 + 5.0;
            let y = (i / 40) as f64 * 25.0 + 5.0;
            (x, y)
        })
        .collect()
}

fn bench_spatial_hash_build(c: &mut Criterion) {
    let positions = grid_positions(150);

    c.bench_function("spatial_hash_build_150", |b| {
        b.iter(|| {
            let mut spatial = SpatialHash::new(50.0, 1000.0, 700.0);
            spatial.build(black_box(&positions));
            black_box(spatial)
        })
    });
}

fn bench_spatial_hash_query(c: &mut Criterion) {
    let positions = grid_positions(1000);
    let mut spatial = SpatialHash::new(50.0, 1000.0, 700.0);
    spatial.build(&positions);
    let mut found = Vec::with_capacity(64);

    c.bench_function("spatial_hash_query_sight_radius", |b| {
        b.iter(|| {
            spatial.query_into(black_box(500.0), black_box(350.0), 150.0, &mut found);
            black_box(found.len())
        })
    });
}

fn bench_spatial_hash_count(c: &mut Criterion) {
    let positions = grid_positions(1000);
    let mut spatial = SpatialHash::new(50.0, 1000.0, 700.0);
    spatial.build(&positions);

    c.bench_function("spatial_hash_count_pickup_radius", |b| {
        b.iter(|| black_box(spatial.count_nearby(black_box(300.0), black_box(200.0), 20.0)))
    });
}

criterion_group!(
    benches,
    bench_spatial_hash_build,
    bench_spatial_hash_query,
    bench_spatial_hash_count
);
criterion_main!(benches);
