use ccsds123_entropy::prelude::*;
use criterion::{criterion_group, criterion_main, Criterion};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::hint::black_box;

fn residuals(n: usize, dynamic_range: u32) -> Vec<u64> {
    let mut rng = SmallRng::seed_from_u64(0);
    let max = 1u64 << dynamic_range;
    (0..n)
        .map(|_| {
            if rng.random_range(0..16) == 0 {
                rng.random_range(0..max)
            } else {
                rng.random_range(0..16)
            }
        })
        .collect()
}

pub fn criterion_benchmark(c: &mut Criterion) {
    const N: usize = 1 << 16;
    let shape = ImageShape::new(1, 256, 256);
    let samples = residuals(N, 16);

    c.bench_function("sample_adaptive_encode", |b| {
        b.iter(|| {
            let config = SampleAdaptiveConfig::new(16, shape);
            let mut coder =
                SampleAdaptiveCoder::new(config, BufBitWriter::new(MemWordWriter::new())).unwrap();
            coder.init(0).unwrap();
            for (t, &s) in samples.iter().enumerate() {
                coder.code_sample(black_box(s), t, 0).unwrap();
                coder.update(s, t, 0);
            }
            coder.terminate().unwrap();
            black_box(coder.bits_written())
        })
    });

    c.bench_function("block_adaptive_encode", |b| {
        b.iter(|| {
            let config = BlockAdaptiveConfig::new(16, 16, shape);
            let mut coder =
                BlockAdaptiveCoder::new(config, BufBitWriter::new(MemWordWriter::new())).unwrap();
            for (t, &s) in samples.iter().enumerate() {
                coder.code_sample(black_box(s), t, 0).unwrap();
            }
            coder.terminate().unwrap();
            black_box(coder.bits_written())
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
