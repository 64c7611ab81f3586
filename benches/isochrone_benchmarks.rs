use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use isochrones::{
    Config, Graph, MaxDistance, MultiPolygon, Polygon, contains_batch, encode_batch,
    geohash_encode, multi_source_search, polygon_geohashes, single_source_search,
};

/// Bidirectional `side x side` grid with unit weights.
fn grid_graph(side: usize) -> Graph<usize> {
    let mut edges = Vec::with_capacity(side * side * 4);
    for row in 0..side {
        for col in 0..side {
            let v = row * side + col;
            if col + 1 < side {
                edges.push((v, v + 1, 1.0));
                edges.push((v + 1, v, 1.0));
            }
            if row + 1 < side {
                edges.push((v, v + side, 1.0));
                edges.push((v + side, v, 1.0));
            }
        }
    }
    Graph::from_edges(edges).unwrap()
}

fn star_area() -> MultiPolygon {
    let ring: Vec<(f64, f64)> = (0..64)
        .map(|i| {
            let angle = i as f64 * std::f64::consts::TAU / 64.0;
            let radius = if i % 2 == 0 { 1.0 } else { 0.4 };
            (37.6 + radius * angle.cos(), 55.7 + radius * angle.sin())
        })
        .collect();
    MultiPolygon::from(Polygon::from_rings([ring]).unwrap())
}

fn benchmark_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    let graph = grid_graph(100);

    group.bench_function("single_source_cutoff_30", |b| {
        b.iter(|| single_source_search(&graph, black_box(&5050), &MaxDistance(30.0)).unwrap())
    });

    let sources: Vec<usize> = (0..64).map(|i| i * 150).collect();
    for workers in [1, 4, 8] {
        group.bench_with_input(
            BenchmarkId::new("multi_source_64", workers),
            &workers,
            |b, &workers| {
                b.iter(|| {
                    multi_source_search(&graph, black_box(&sources), workers, &MaxDistance(30.0))
                        .unwrap()
                })
            },
        );
    }

    group.finish();
}

fn benchmark_geohash(c: &mut Criterion) {
    let mut group = c.benchmark_group("geohash");

    group.bench_function("encode_single", |b| {
        b.iter(|| geohash_encode(black_box(37.617635), black_box(55.755814), 18, 2).unwrap())
    });

    let lons: Vec<f64> = (0..10_000).map(|i| -180.0 + i as f64 * 0.036).collect();
    let lats: Vec<f64> = (0..10_000).map(|i| -90.0 + i as f64 * 0.018).collect();
    let config = Config::default().with_workers(4);
    group.bench_function("encode_batch_10k", |b| {
        b.iter(|| encode_batch(black_box(&lons), black_box(&lats), &config).unwrap())
    });

    group.finish();
}

fn benchmark_geometry(c: &mut Criterion) {
    let mut group = c.benchmark_group("geometry");
    let area = star_area();

    group.bench_function("contains_inside", |b| {
        b.iter(|| area.contains(black_box((37.6, 55.7))))
    });

    group.bench_function("contains_bbox_reject", |b| {
        b.iter(|| area.contains(black_box((0.0, 0.0))))
    });

    let lons: Vec<f64> = (0..10_000).map(|i| 36.5 + (i % 100) as f64 * 0.022).collect();
    let lats: Vec<f64> = (0..10_000).map(|i| 54.6 + (i / 100) as f64 * 0.022).collect();
    group.bench_function("contains_batch_10k", |b| {
        b.iter(|| contains_batch(&area, black_box(&lons), black_box(&lats), 4).unwrap())
    });

    let config = Config::default()
        .with_workers(4)
        .with_lattice_step(0.01, 0.01);
    group.bench_function("polygon_geohashes", |b| {
        b.iter(|| polygon_geohashes(black_box(&area), &config).unwrap())
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_search,
    benchmark_geohash,
    benchmark_geometry
);
criterion_main!(benches);
