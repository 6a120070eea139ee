// SPDX short identifier: Unlicense

use criterion::{
    black_box,
    criterion_group,
    criterion_main,
    Criterion,
    BenchmarkId
};
use std::time::Duration;
use ringsig::common::*;

fn curve_benchmark(c: &mut Criterion) {
    for curve in Curve::ALL {
        let mut group = c.benchmark_group(curve.name());
        group.sample_size(20);
        group.measurement_time(Duration::from_secs(3));


        group.bench_with_input(BenchmarkId::new("Scalar", "random"), &(),
        |b, () | b.iter(|| {
            black_box(random_scalar(curve));
        }));
        let params = (HashConfig::Sha256, random_point(curve).to_compressed_bytes());
        group.bench_with_input(BenchmarkId::new("Scalar", "hash"), &params,
        |b, (hash_config, bytes) | b.iter(|| {
            black_box(hash_config.hash_to_scalar(bytes, curve.n()));
        }));


        let params = random_point(curve);
        group.bench_with_input(BenchmarkId::new("Encode", "compressed"), &params,
        |b, p | b.iter(|| {
            black_box(p.to_compressed_bytes());
        }));
        let params = random_point(curve).to_compressed_bytes();
        group.bench_with_input(BenchmarkId::new("Decode", "compressed"), &params,
        |b, p | b.iter(|| {
            black_box(Point::from_bytes(curve, p).unwrap());
        }));


        let params = (random_point(curve), random_point(curve));
        group.bench_with_input(BenchmarkId::new("Add", "affine"), &params,
        |b, (p1, p2) | b.iter(|| {
            black_box(curve.add(p1, p2).unwrap());
        }));
        let params = random_point(curve);
        group.bench_with_input(BenchmarkId::new("Double", "affine"), &params,
        |b, p | b.iter(|| {
            black_box(curve.double(p).unwrap());
        }));


        let params = (random_scalar(curve), random_point(curve));
        group.bench_with_input(BenchmarkId::new("Multiply", "fixed shape"), &params,
        |b, (s, p) | b.iter(|| {
            black_box(curve.scalar_mul(p, s).unwrap());
        }));
        let params = (random_scalar(curve), random_point(curve));
        group.bench_with_input(BenchmarkId::new("Multiply", "public scalar"), &params,
        |b, (s, p) | b.iter(|| {
            black_box(curve.scalar_mul_unsafe(p, s).unwrap());
        }));
        let params = PrivateKey::generate(curve);
        group.bench_with_input(BenchmarkId::new("Derive", "public key"), &params,
        |b, key | b.iter(|| {
            black_box(key.public_key(curve).unwrap());
        }));

        group.finish();
    }
}

criterion_group!(curves, curve_benchmark);
criterion_main!(curves);
