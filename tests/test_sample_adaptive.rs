/*
 * SPDX-FileCopyrightText: 2026 Tommaso Fontana
 * SPDX-FileCopyrightText: 2026 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use ccsds123_entropy::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

type Coder = SampleAdaptiveCoder<BufBitWriter<MemWordWriter>>;
type Decoder = SampleAdaptiveDecoder<BufBitReader<MemWordReader>>;

fn encode_interleaved(
    config: &SampleAdaptiveConfig,
    image: &[Vec<u64>],
) -> ccsds123_entropy::Result<(Vec<u64>, Coder)> {
    let mut coder = SampleAdaptiveCoder::new(config.clone(), BufBitWriter::new(MemWordWriter::new()))?;
    for band in 0..image.len() {
        coder.init(band)?;
    }
    for t in 0..image[0].len() {
        for (band, samples) in image.iter().enumerate() {
            coder.code_sample(samples[t], t, band)?;
            coder.update(samples[t], t, band);
        }
    }
    coder.terminate()?;
    let fork = coder.fork(BufBitWriter::new(MemWordWriter::new()));
    let words = coder.into_sink().into_inner()?.into_inner();
    Ok((words, fork))
}

#[test]
fn test_round_trip() -> ccsds123_entropy::Result<()> {
    let mut rng = SmallRng::seed_from_u64(0);
    for dynamic_range in [2u32, 4, 8, 12, 16] {
        for unary_length_limit in [8u64, 16, 32] {
            let shape = ImageShape::new(3, 8, 16);
            let mut config = SampleAdaptiveConfig::new(dynamic_range, shape);
            config.unary_length_limit = unary_length_limit;

            let max = 1u64 << dynamic_range;
            let image: Vec<Vec<u64>> = (0..shape.bands)
                .map(|_| {
                    (0..shape.height * shape.width)
                        // Mostly small residuals with occasional outliers,
                        // which is what a predictor actually produces.
                        .map(|_| {
                            if rng.random_range(0..8) == 0 {
                                rng.random_range(0..max)
                            } else {
                                rng.random_range(0..max.min(8))
                            }
                        })
                        .collect()
                })
                .collect();

            let (words, encoder) = encode_interleaved(&config, &image)?;

            let mut decoder: Decoder =
                SampleAdaptiveDecoder::new(config, BufBitReader::new(MemWordReader::new(words)))?;
            for band in 0..shape.bands {
                decoder.init(band)?;
            }
            for t in 0..shape.height * shape.width {
                for (band, samples) in image.iter().enumerate() {
                    let decoded = decoder.decode_sample(t, band)?;
                    assert_eq!(decoded, samples[t], "band {} sample {}", band, t);
                    decoder.update(decoded, t, band);
                }
            }

            // Statistics determinism: encoder and decoder state must be
            // identical after processing the same samples.
            for band in 0..shape.bands {
                assert_eq!(encoder.band_stats(band), decoder.band_stats(band));
            }
        }
    }
    Ok(())
}

#[test]
fn test_first_sample_verbatim() -> ccsds123_entropy::Result<()> {
    let config = SampleAdaptiveConfig::new(8, ImageShape::new(1, 1, 2));
    let mut coder = SampleAdaptiveCoder::new(config, BufBitWriter::new(MemWordWriter::new()))?;
    coder.init(0)?;
    assert_eq!(coder.code_sample(200, 0, 0)?, 8);
    assert_eq!(coder.bits_written(), 8);
    Ok(())
}

#[test]
fn test_first_sample_out_of_range() -> ccsds123_entropy::Result<()> {
    let config = SampleAdaptiveConfig::new(8, ImageShape::new(1, 1, 2));
    let mut coder = SampleAdaptiveCoder::new(config, BufBitWriter::new(MemWordWriter::new()))?;
    coder.init(0)?;
    assert!(matches!(
        coder.code_sample(256, 0, 0),
        Err(Error::SampleOutOfRange {
            value: 256,
            band: 0,
            dynamic_range: 8,
        })
    ));
    Ok(())
}

#[test]
fn test_unary_escape_length() -> ccsds123_entropy::Result<()> {
    // Defaults give counter = 2, accumulator = 23 after init, so k = 3;
    // 255 >> 3 = 31 exceeds the limit of 8 and takes the verbatim escape.
    let mut config = SampleAdaptiveConfig::new(8, ImageShape::new(1, 1, 4));
    config.unary_length_limit = 8;
    let mut coder = SampleAdaptiveCoder::new(config, BufBitWriter::new(MemWordWriter::new()))?;
    coder.init(0)?;
    coder.code_sample(0, 0, 0)?;
    coder.update(0, 0, 0);
    let written = coder.code_sample(255, 1, 0)?;
    assert_eq!(written, 8 + 8);
    Ok(())
}

#[test]
fn test_rescaling_halves_exactly_once() -> ccsds123_entropy::Result<()> {
    // With initial count exponent 0 the counter starts at 1 and reaches
    // the limit 63 after 62 updates; the 63rd update rescales. Constant
    // samples of 4 make the expected registers easy to track:
    // accumulator 11 + 62*4 = 259, then (259 + 4 + 1) >> 1 = 132.
    let mut config = SampleAdaptiveConfig::new(8, ImageShape::new(1, 1, 64));
    config.initial_count_exponent = 0;
    config.rescaling_counter_size = 6;
    let mut coder = SampleAdaptiveCoder::new(config, BufBitWriter::new(MemWordWriter::new()))?;
    coder.init(0)?;
    for t in 0..64 {
        let sample = if t == 0 { 0 } else { 4 };
        coder.code_sample(sample, t, 0)?;
        coder.update(sample, t, 0);
        assert!(coder.band_stats(0).counter <= 63);
    }
    assert_eq!(coder.band_stats(0).counter, 32);
    assert_eq!(coder.band_stats(0).accumulator, 132);
    Ok(())
}

#[test]
fn test_bit_accounting_matches_sink() -> ccsds123_entropy::Result<()> {
    let mut rng = SmallRng::seed_from_u64(1);
    let shape = ImageShape::new(2, 4, 8);
    let config = SampleAdaptiveConfig::new(12, shape);
    let sink: CountBitWriter<_> = CountBitWriter::new(BufBitWriter::new(MemWordWriter::new()));
    let mut coder = SampleAdaptiveCoder::new(config, sink)?;
    for band in 0..shape.bands {
        coder.init(band)?;
        for t in 0..shape.height * shape.width {
            let sample = rng.random_range(0..1 << 12);
            coder.code_sample(sample, t, band)?;
            coder.update(sample, t, band);
        }
    }
    coder.terminate()?;
    let bits_written = coder.bits_written();
    assert_eq!(bits_written, coder.into_sink().bits_written);
    Ok(())
}

#[test]
fn test_line_counter_resets_independently() -> ccsds123_entropy::Result<()> {
    let shape = ImageShape::new(1, 2, 4);
    let config = SampleAdaptiveConfig::new(8, shape);
    let mut coder = SampleAdaptiveCoder::new(config, BufBitWriter::new(MemWordWriter::new()))?;
    coder.init(0)?;
    for t in 0..4 {
        coder.code_sample(t as u64, t, 0)?;
        coder.update(t as u64, t, 0);
    }
    let total = coder.bits_written();
    assert_eq!(coder.bits_written_line(), total);
    coder.reset_bits_written_line();
    assert_eq!(coder.bits_written_line(), 0);
    assert_eq!(coder.bits_written(), total);
    for t in 4..8 {
        coder.code_sample(1, t, 0)?;
        coder.update(1, t, 0);
    }
    assert_eq!(
        coder.bits_written(),
        total + coder.bits_written_line()
    );
    coder.terminate()?;
    assert!(coder.rate() > 0.0);
    Ok(())
}

#[test]
fn test_fork_tracks_original() -> ccsds123_entropy::Result<()> {
    let mut rng = SmallRng::seed_from_u64(2);
    let shape = ImageShape::new(1, 1, 32);
    let config = SampleAdaptiveConfig::new(8, shape);
    let mut coder = SampleAdaptiveCoder::new(config, BufBitWriter::new(MemWordWriter::new()))?;
    coder.init(0)?;
    for t in 0..16 {
        let sample = rng.random_range(0..256);
        coder.code_sample(sample, t, 0)?;
        coder.update(sample, t, 0);
    }

    let mut fork = coder.fork(BufBitWriter::new(MemWordWriter::new()));
    assert_eq!(fork.band_stats(0), coder.band_stats(0));

    // Feeding the same suffix to both must produce identical accounting
    // and identical statistics; the fork shares nothing with the original.
    for t in 16..32 {
        let sample = rng.random_range(0..256);
        coder.code_sample(sample, t, 0)?;
        coder.update(sample, t, 0);
        fork.code_sample(sample, t, 0)?;
        fork.update(sample, t, 0);
    }
    assert_eq!(coder.bits_written(), fork.bits_written());
    assert_eq!(coder.band_stats(0), fork.band_stats(0));
    Ok(())
}

#[test]
fn test_decoder_accounts_bits_read() -> ccsds123_entropy::Result<()> {
    // After a whole stream the decoder must have consumed exactly the
    // bits the encoder wrote, escapes and verbatim first samples
    // included.
    let mut rng = SmallRng::seed_from_u64(5);
    let shape = ImageShape::new(2, 4, 8);
    let mut config = SampleAdaptiveConfig::new(10, shape);
    config.unary_length_limit = 8;
    let image: Vec<Vec<u64>> = (0..shape.bands)
        .map(|_| {
            (0..shape.height * shape.width)
                .map(|_| rng.random_range(0..1 << 10))
                .collect()
        })
        .collect();

    let (words, encoder) = encode_interleaved(&config, &image)?;

    let mut decoder: Decoder =
        SampleAdaptiveDecoder::new(config, BufBitReader::new(MemWordReader::new(words)))?;
    for band in 0..shape.bands {
        decoder.init(band)?;
    }
    for t in 0..shape.height * shape.width {
        for band in 0..shape.bands {
            let decoded = decoder.decode_sample(t, band)?;
            decoder.update(decoded, t, band);
        }
    }
    assert_eq!(decoder.bits_read(), encoder.bits_written());
    Ok(())
}

#[test]
fn test_entropy_diagnostics() -> ccsds123_entropy::Result<()> {
    let shape = ImageShape::new(1, 1, 16);
    let config = SampleAdaptiveConfig::new(4, shape);
    let mut coder = SampleAdaptiveCoder::new(config, BufBitWriter::new(MemWordWriter::new()))?;
    coder.init(0)?;
    for t in 0..16 {
        let sample = (t % 2) as u64;
        coder.code_sample(sample, t, 0)?;
        coder.update(sample, t, 0);
        coder.update_histogram(sample);
    }
    // Two equiprobable values: one bit per sample.
    assert!((coder.entropy() - 1.0).abs() < 1e-12);
    coder.reset_histogram();
    assert_eq!(coder.entropy(), 0.0);
    Ok(())
}
