//! Benchmarks for net construction and point generation.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use tms_net::{gf2poly, Niederreiter};

fn bench_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("construction");
    for &dim in &[5u32, 20, 50] {
        group.bench_with_input(BenchmarkId::from_parameter(dim), &dim, |b, &dim| {
            b.iter(|| Niederreiter::new(32, dim).unwrap());
        });
    }
    group.finish();
}

fn bench_polynomial_selection(c: &mut Criterion) {
    let mut group = c.benchmark_group("polynomial_selection");
    group.bench_function("sequential_100", |b| {
        b.iter(|| gf2poly::generate_irrpolys(100, u32::MAX));
    });
    group.bench_function("pipelined_100", |b| {
        b.iter(|| gf2poly::generate_irrpolys_in_parallel(100, u32::MAX));
    });
    group.finish();
}

fn bench_point_generation(c: &mut Criterion) {
    let net = Niederreiter::new(32, 8).unwrap();
    let mut group = c.benchmark_group("points");
    group.bench_function("streaming_65536", |b| {
        b.iter(|| {
            let mut acc = 0u64;
            net.for_each_int_point(|p, _| acc ^= p[0], 1 << 16, 0);
            acc
        });
    });
    group.bench_function("direct_65536", |b| {
        b.iter(|| {
            let mut acc = 0u64;
            for pos in 0..1u64 << 16 {
                acc ^= net.generate_int_point(pos)[0];
            }
            acc
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_construction,
    bench_polynomial_selection,
    bench_point_generation
);
criterion_main!(benches);
