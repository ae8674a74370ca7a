//! Benchmarks for 3D container loading.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use packit_core::solver::Solver;
use packit_d3::{Container, PackageType, Packer3D};

fn packer_benchmark(c: &mut Criterion) {
    let uniform = vec![PackageType::new(10.0, 10.0, 10.0).with_quantity(1000)];
    let container = Container::new(100.0, 100.0, 100.0);
    let packer = Packer3D::default_config();

    c.bench_function("pack_1000_uniform_boxes", |b| {
        b.iter(|| {
            let result = packer.solve(black_box(&uniform), black_box(&container));
            black_box(result)
        })
    });

    let mixed: Vec<PackageType> = (0..12)
        .map(|i| {
            let i = i as f64;
            PackageType::new(8.0 + i, 5.0 + (i * 0.5), 4.0 + (i % 3.0) * 2.0).with_quantity(25)
        })
        .collect();
    let truck = Container::new(240.0, 120.0, 110.0);

    c.bench_function("pack_300_mixed_boxes", |b| {
        b.iter(|| {
            let result = packer.solve(black_box(&mixed), black_box(&truck));
            black_box(result)
        })
    });
}

criterion_group!(benches, packer_benchmark);
criterion_main!(benches);
