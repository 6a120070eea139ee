// SPDX short identifier: Unlicense

use criterion::{
    criterion_group,
    criterion_main,
    Criterion,
    BenchmarkId
};

const RING_SIZES: [usize; 5] = [1, 2, 4, 8, 16];

use ringsig::{
    common::*,
    signature::{
        PartialSignature,
        RingSignature
    }
};

fn random_ring(curve: Curve, size: usize) -> Vec<Point> {
    return (0..size).map(|_| random_point(curve)).collect()
}

fn ring_signature_benchmark(c: &mut Criterion) {
    for curve in Curve::ALL {
        let mut group = c.benchmark_group(format!("Ring signature/{curve}"));
        group.sample_size(10);

        //sign
        for x in RING_SIZES {
            let params = (random_ring(curve, x - 1), PrivateKey::generate(curve));
            group.bench_with_input(BenchmarkId::new("sign", format!("Ring size: {x}")), &params,
                |b, (ring, key)| b.iter(|| {
                    RingSignature::sign(ring, key, b"abcdef", curve, HashConfig::default()).unwrap()
                }));
        }

        //verify
        for x in RING_SIZES {
            let key = PrivateKey::generate(curve);
            let signature = RingSignature::sign(&random_ring(curve, x - 1), &key, b"abcdef", curve, HashConfig::default()).unwrap();
            group.bench_with_input(BenchmarkId::new("verify", format!("Ring size: {x}")), &signature,
                |b, signature| b.iter(|| {
                    assert!(signature.verify().unwrap())
                }));
        }

        //partial sign
        for x in RING_SIZES {
            let key = PrivateKey::generate(curve);
            let params = (random_ring(curve, x - 1), key.public_key(curve).unwrap());
            group.bench_with_input(BenchmarkId::new("partial sign", format!("Ring size: {x}")), &params,
                |b, (ring, public_key)| b.iter(|| {
                    PartialSignature::partial_sign(ring, b"abcdef", public_key, curve, HashConfig::default()).unwrap()
                }));
        }

        group.finish();
    }
}

criterion_group!(signatures, ring_signature_benchmark);
criterion_main!(signatures);
