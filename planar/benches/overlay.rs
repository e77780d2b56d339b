use criterion::{criterion_group, criterion_main, Criterion};
use planar::{BooleanOps, Geometry};

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
    for steps in [64, 512] {
        let a = circle(0., 0., 10., steps);
        let b = circle(5., 0., 10., steps);

        c.bench_function(&format!("intersection {}-gon", steps), |bencher| {
            bencher.iter(|| {
                criterion::black_box(a.intersection(&b).unwrap());
            });
        });

        c.bench_function(&format!("union {}-gon", steps), |bencher| {
            bencher.iter(|| {
                criterion::black_box(a.union(&b).unwrap());
            });
        });
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
