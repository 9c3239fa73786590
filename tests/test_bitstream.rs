/*
 * SPDX-FileCopyrightText: 2026 Tommaso Fontana
 * SPDX-FileCopyrightText: 2026 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use ccsds123_entropy::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::io::Cursor;

#[derive(Debug, Clone, Copy)]
enum Op {
    Bits { value: u64, n: usize },
    Unary(u64),
    Rice { value: u64, log2_b: usize },
}

#[test]
fn test_mixed_codes_round_trip() -> Result<()> {
    const N: usize = 100_000;
    let mut r = SmallRng::seed_from_u64(0);
    let mut v = SmallRng::seed_from_u64(1);

    let ops: Vec<Op> = (0..N)
        .map(|_| match r.random_range(0..3) {
            0 => {
                let n = r.random_range(0..=64);
                let value = if n == 64 {
                    v.random::<u64>()
                } else {
                    v.random::<u64>() & ((1u64 << n) - 1)
                };
                Op::Bits { value, n }
            }
            1 => Op::Unary(v.random_range(0..300)),
            _ => Op::Rice {
                value: v.random_range(0..10_000),
                log2_b: r.random_range(0..8),
            },
        })
        .collect();

    let mut write = BufBitWriter::new(MemWordWriter::new());
    for op in &ops {
        match *op {
            Op::Bits { value, n } => {
                assert_eq!(write.write_bits(value, n)?, n);
            }
            Op::Unary(value) => {
                assert_eq!(write.write_unary(value)?, len_unary(value));
            }
            Op::Rice { value, log2_b } => {
                assert_eq!(write.write_rice(value, log2_b)?, len_rice(value, log2_b));
            }
        }
    }
    let words = write.into_inner()?.into_inner();

    let mut read = BufBitReader::new(MemWordReader::new(words));
    for op in &ops {
        match *op {
            Op::Bits { value, n } => assert_eq!(read.read_bits(n)?, value),
            Op::Unary(value) => assert_eq!(read.read_unary()?, value),
            Op::Rice { value, log2_b } => assert_eq!(read.read_rice(log2_b)?, value),
        }
    }
    Ok(())
}

#[test]
fn test_count_bit_writer() -> Result<()> {
    let mut write: CountBitWriter<_> = CountBitWriter::new(BufBitWriter::new(MemWordWriter::new()));
    write.write_bits(0b1010, 4)?;
    write.write_unary(9)?;
    write.write_rice(100, 3)?;
    assert_eq!(
        write.bits_written,
        4 + len_unary(9) as u64 + len_rice(100, 3) as u64
    );
    Ok(())
}

#[test]
fn test_word_adapter_round_trip() -> Result<()> {
    // A sample-adaptive stream through a byte-level backend; the bytes
    // carry the bits MSB first, so the in-memory and io paths agree.
    let mut rng = SmallRng::seed_from_u64(2);
    let shape = ImageShape::new(1, 1, 100);
    let config = SampleAdaptiveConfig::new(8, shape);
    let samples: Vec<u64> = (0..100).map(|_| rng.random_range(0..256)).collect();

    let sink = BufBitWriter::new(WordAdapter::new(Vec::<u8>::new()));
    let mut coder = SampleAdaptiveCoder::new(config.clone(), sink)?;
    coder.init(0)?;
    for (t, &s) in samples.iter().enumerate() {
        coder.code_sample(s, t, 0)?;
        coder.update(s, t, 0);
    }
    coder.terminate()?;
    let bytes = coder.into_sink().into_inner()?.into_inner();

    let source = BufBitReader::new(WordAdapter::new(Cursor::new(bytes)));
    let mut decoder = SampleAdaptiveDecoder::new(config, source)?;
    decoder.init(0)?;
    for (t, &s) in samples.iter().enumerate() {
        let decoded = decoder.decode_sample(t, 0)?;
        assert_eq!(decoded, s);
        decoder.update(decoded, t, 0);
    }
    Ok(())
}

#[test]
fn test_flush_pads_with_zeros() -> Result<()> {
    let mut write = BufBitWriter::new(MemWordWriter::new());
    write.write_bits(0b11, 2)?;
    write.flush()?;
    let words = write.into_inner()?.into_inner();
    assert_eq!(words, vec![0b11u64 << 62]);
    Ok(())
}
