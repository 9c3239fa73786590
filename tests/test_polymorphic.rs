/*
 * SPDX-FileCopyrightText: 2026 Tommaso Fontana
 * SPDX-FileCopyrightText: 2026 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! The two engines are interchangeable behind the shared contract: a
//! pipeline written against `dyn SampleCoder`/`dyn SampleDecoder` codes
//! and decodes correctly with either.

use ccsds123_entropy::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

fn encode(coder: &mut dyn SampleCoder, image: &[Vec<u64>]) -> Result<()> {
    for band in 0..image.len() {
        coder.init(band)?;
        for (t, &sample) in image[band].iter().enumerate() {
            coder.code_sample(sample, t, band)?;
            coder.update(sample, t, band);
        }
    }
    coder.terminate()
}

fn decode(decoder: &mut dyn SampleDecoder, shape: ImageShape) -> Result<Vec<Vec<u64>>> {
    let mut image = Vec::with_capacity(shape.bands);
    for band in 0..shape.bands {
        decoder.init(band)?;
        let mut samples = Vec::with_capacity(shape.height * shape.width);
        for t in 0..shape.height * shape.width {
            let sample = decoder.decode_sample(t, band)?;
            decoder.update(sample, t, band);
            samples.push(sample);
        }
        image.push(samples);
    }
    decoder.terminate()?;
    Ok(image)
}

#[test]
fn test_engines_are_interchangeable() -> Result<()> {
    let mut rng = SmallRng::seed_from_u64(0);
    let shape = ImageShape::new(2, 4, 8);
    let image: Vec<Vec<u64>> = (0..shape.bands)
        .map(|_| {
            (0..shape.height * shape.width)
                .map(|_| rng.random_range(0..256))
                .collect()
        })
        .collect();

    // Sample-adaptive engine.
    let config = SampleAdaptiveConfig::new(8, shape);
    let mut coder =
        SampleAdaptiveCoder::new(config.clone(), BufBitWriter::new(MemWordWriter::new()))?;
    encode(&mut coder, &image)?;
    let words = coder.into_sink().into_inner()?.into_inner();
    let mut decoder =
        SampleAdaptiveDecoder::new(config, BufBitReader::new(MemWordReader::new(words)))?;
    assert_eq!(decode(&mut decoder, shape)?, image);

    // Block-adaptive engine, same pipeline.
    let config = BlockAdaptiveConfig::new(8, 8, shape);
    let mut coder = BlockAdaptiveCoder::new(config, BufBitWriter::new(MemWordWriter::new()))?;
    encode(&mut coder, &image)?;
    let words = coder.into_sink().into_inner()?.into_inner();
    let mut decoder =
        BlockAdaptiveDecoder::new(config, BufBitReader::new(MemWordReader::new(words)))?;
    assert_eq!(decode(&mut decoder, shape)?, image);

    Ok(())
}
