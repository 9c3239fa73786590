/*
 * SPDX-FileCopyrightText: 2026 Tommaso Fontana
 * SPDX-FileCopyrightText: 2026 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Round-trip harnesses for fuzzing.
//!
//! The structures in this module derive [`arbitrary::Arbitrary`] so that a
//! fuzzer can drive the coders with random configurations and sample
//! sequences; the harnesses panic on any round-trip mismatch or statistics
//! divergence.

use arbitrary::Arbitrary;

use crate::coder::{
    BlockAdaptiveCoder, BlockAdaptiveConfig, BlockAdaptiveDecoder, ImageShape,
    SampleAdaptiveCoder, SampleAdaptiveConfig, SampleAdaptiveDecoder, SampleCoder, SampleDecoder,
};
use crate::impls::{BufBitReader, BufBitWriter, MemWordReader, MemWordWriter};

/// A fuzzed single-band coding scenario.
#[derive(Arbitrary, Debug, Clone)]
pub struct RoundTrip {
    pub dynamic_range: u8,
    pub initial_count_exponent: u8,
    pub accumulator_init_constant: u8,
    pub rescaling_counter_size: u8,
    pub unary_length_limit: u8,
    pub use_sixteen_sample_blocks: bool,
    pub samples: Vec<u16>,
}

impl RoundTrip {
    fn dynamic_range(&self) -> u32 {
        2 + (self.dynamic_range % 15) as u32
    }

    fn samples(&self, dynamic_range: u32) -> Vec<u64> {
        self.samples
            .iter()
            .map(|&s| s as u64 & (1u64 << dynamic_range).wrapping_sub(1))
            .collect()
    }
}

/// Encode and decode a fuzzed sequence with the sample-adaptive engine,
/// checking sample equality and statistics lock-step.
pub fn sample_adaptive_round_trip(data: RoundTrip) {
    let dynamic_range = data.dynamic_range();
    let samples = data.samples(dynamic_range);
    let shape = ImageShape::new(1, 1, samples.len().max(1));

    let rescaling_counter_size = 4 + (data.rescaling_counter_size % 8) as u32;
    let config = SampleAdaptiveConfig {
        dynamic_range,
        initial_count_exponent: (data.initial_count_exponent as u32)
            % rescaling_counter_size,
        accumulator_init_constant: (data.accumulator_init_constant % 15) as u32,
        rescaling_counter_size,
        unary_length_limit: 8 + (data.unary_length_limit % 25) as u64,
        accumulator_table: None,
        shape,
    };

    let sink = BufBitWriter::new(MemWordWriter::new());
    let mut coder = SampleAdaptiveCoder::new(config.clone(), sink).unwrap();
    coder.init(0).unwrap();
    for (t, &s) in samples.iter().enumerate() {
        coder.code_sample(s, t, 0).unwrap();
        coder.update(s, t, 0);
    }
    coder.terminate().unwrap();
    let encoder_stats = *coder.band_stats(0);
    let words = coder.into_sink().into_inner().unwrap().into_inner();

    let source = BufBitReader::new(MemWordReader::new(words));
    let mut decoder = SampleAdaptiveDecoder::new(config, source).unwrap();
    decoder.init(0).unwrap();
    for (t, &s) in samples.iter().enumerate() {
        let decoded = decoder.decode_sample(t, 0).unwrap();
        assert_eq!(decoded, s);
        decoder.update(decoded, t, 0);
    }
    assert_eq!(encoder_stats, *decoder.band_stats(0));
}

/// Encode and decode a fuzzed sequence with the block-adaptive engine.
pub fn block_adaptive_round_trip(data: RoundTrip) {
    let dynamic_range = 1 + (data.dynamic_range % 16) as u32;
    let samples = data.samples(dynamic_range);
    let shape = ImageShape::new(1, 1, samples.len().max(1));
    let block_size = if data.use_sixteen_sample_blocks { 16 } else { 8 };
    let config = BlockAdaptiveConfig::new(dynamic_range, block_size, shape);

    let sink = BufBitWriter::new(MemWordWriter::new());
    let mut coder = BlockAdaptiveCoder::new(config, sink).unwrap();
    for (t, &s) in samples.iter().enumerate() {
        coder.code_sample(s, t, 0).unwrap();
    }
    coder.terminate().unwrap();
    let words = coder.into_sink().into_inner().unwrap().into_inner();

    let source = BufBitReader::new(MemWordReader::new(words));
    let mut decoder = BlockAdaptiveDecoder::new(config, source).unwrap();
    for (t, &s) in samples.iter().enumerate() {
        assert_eq!(decoder.decode_sample(t, 0).unwrap(), s);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_harnesses_on_fixed_scenarios() {
        for (seed, samples) in [
            (0u8, vec![]),
            (1, vec![0u16, 1, 2, 3, 4, 5, 6, 7]),
            (7, vec![u16::MAX; 20]),
            (42, (0..100).map(|i| (i * 31) as u16).collect()),
        ] {
            let data = RoundTrip {
                dynamic_range: seed,
                initial_count_exponent: seed.wrapping_mul(3),
                accumulator_init_constant: seed.wrapping_add(11),
                rescaling_counter_size: seed.wrapping_mul(5),
                unary_length_limit: seed.wrapping_add(1),
                use_sixteen_sample_blocks: seed % 2 == 0,
                samples,
            };
            sample_adaptive_round_trip(data.clone());
            block_adaptive_round_trip(data);
        }
    }
}
