use criterion::{criterion_group, criterion_main, Criterion};
use planar::{polygon, Geometry, PreparedGeometry, Relate, SpatialPredicates};

fn circle(centre_x: f64, centre_y: f64, radius: f64, steps: usize) -> Geometry {
    let coords: Vec<(f64, f64)> = (0..steps)
        .map(|i| {
            let theta = (i as f64) / (steps as f64) * std::f64::consts::TAU;
            (
                centre_x + radius * theta.cos(),
                centre_y + radius * theta.sin(),
            )
        })
        .collect();
    planar::Polygon::new(planar::LinearRing::from_xy(coords), vec![]).into()
}

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("relate overlapping 64-gons", |bencher| {
        let a = circle(0., 0., 10., 64);
        let b = circle(5., 0., 10., 64);
        bencher.iter(|| {
            criterion::black_box(a.relate(&b).unwrap());
        });
    });

    c.bench_function("intersects disjoint squares", |bencher| {
        let a: Geometry = polygon![(x: 0., y: 0.), (x: 1., y: 0.), (x: 1., y: 1.)].into();
        let b: Geometry = polygon![(x: 5., y: 5.), (x: 6., y: 5.), (x: 6., y: 6.)].into();
        bencher.iter(|| {
            criterion::black_box(a.intersects(&b).unwrap());
        });
    });

    c.bench_function("prepared intersects point grid", |bencher| {
        let base = circle(0., 0., 10., 256);
        let prepared = PreparedGeometry::prepare(&base).unwrap();
        let probes: Vec<Geometry> = (0..100)
            .map(|i| planar::Point::new((i % 25) as f64 - 12., (i / 25) as f64 - 2.).into())
            .collect();
        bencher.iter(|| {
            for probe in &probes {
                criterion::black_box(prepared.intersects(probe).unwrap());
            }
        });
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
