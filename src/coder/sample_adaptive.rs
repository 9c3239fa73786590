/*
 * SPDX-FileCopyrightText: 2026 Tommaso Fontana
 * SPDX-FileCopyrightText: 2026 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! The sample-adaptive entropy coder of CCSDS 123.0-B.
//!
//! For every spectral band the coder keeps a running accumulator of past
//! residual magnitudes and a counter of the samples folded into it. The
//! ratio of the two estimates the mean residual magnitude, from which a
//! Golomb power-of-two parameter `k` is derived per sample: the quotient
//! `sample >> k` is coded in length-limited unary and the remainder in `k`
//! verbatim bits. The first sample of each band is coded verbatim at full
//! dynamic range, and quotients at or beyond the unary length limit escape
//! to verbatim coding as well, bounding the worst-case codeword length.
//!
//! Counter and accumulator are periodically halved together ("rescaled")
//! so that their ratio keeps tracking the recent signal statistics while
//! both stay within bounded register width.

#[cfg(feature = "mem_dbg")]
use mem_dbg::{MemDbg, MemSize};

use super::{EntropyEstimate, ImageShape, SampleCoder, SampleDecoder};
use crate::codes::{read_truncated_unary, write_truncated_unary};
use crate::error::{Error, Result};
use crate::traits::{BitRead, BitWrite};
use crate::utils::Histogram;

/// Configuration of the sample-adaptive engine.
///
/// These parameters are the wire contract of the format: a decoder must be
/// constructed with the exact values used by the encoder to interoperate.
/// They are conveyed out of band by the header layer above this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SampleAdaptiveConfig {
    /// Number of significant bits per sample, in `[2, 16]`.
    pub dynamic_range: u32,
    /// The initial counter of each band is `1 << initial_count_exponent`.
    pub initial_count_exponent: u32,
    /// Accumulator initialization constant: values `0..=14` are used
    /// directly as a bit-shift exponent, 15 selects the per-band exponent
    /// from [`accumulator_table`](Self::accumulator_table).
    pub accumulator_init_constant: u32,
    /// The counter saturates at `(1 << rescaling_counter_size) - 1`, at
    /// which point counter and accumulator are halved together.
    pub rescaling_counter_size: u32,
    /// Quotients at or beyond this limit escape to verbatim coding.
    pub unary_length_limit: u64,
    /// Per-band accumulator initialization exponents, in `[0, 14]`; used
    /// only when [`accumulator_init_constant`](Self::accumulator_init_constant)
    /// is 15.
    pub accumulator_table: Option<Vec<u32>>,
    /// Image geometry, for rate reporting.
    pub shape: ImageShape,
}

impl SampleAdaptiveConfig {
    /// Create a configuration with the given dynamic range and geometry
    /// and conventional defaults for the adaptation parameters.
    #[must_use]
    pub fn new(dynamic_range: u32, shape: ImageShape) -> Self {
        Self {
            dynamic_range,
            initial_count_exponent: 1,
            accumulator_init_constant: 3,
            rescaling_counter_size: 6,
            unary_length_limit: 16,
            accumulator_table: None,
            shape,
        }
    }

    /// Check every parameter, so that configuration errors surface at
    /// construction rather than in the middle of a stream.
    pub fn validate(&self) -> Result<()> {
        if !(2..=16).contains(&self.dynamic_range) {
            return Err(Error::config(format!(
                "dynamic range must be in [2, 16], got {}",
                self.dynamic_range
            )));
        }
        if self.accumulator_init_constant > 15 {
            return Err(Error::config(format!(
                "accumulator initialization constant must be in [0, 15], got {}",
                self.accumulator_init_constant
            )));
        }
        if self.accumulator_init_constant == 15 {
            let table = self.accumulator_table.as_ref().ok_or_else(|| {
                Error::config(
                    "accumulator initialization constant 15 requires an accumulator table",
                )
            })?;
            if table.len() < self.shape.bands {
                return Err(Error::config(format!(
                    "accumulator table covers {} bands, image has {}",
                    table.len(),
                    self.shape.bands
                )));
            }
            if let Some(&exp) = table.iter().find(|&&exp| exp > 14) {
                return Err(Error::config(format!(
                    "accumulator table exponents must be in [0, 14], got {}",
                    exp
                )));
            }
        }
        if self.rescaling_counter_size < 1 || self.rescaling_counter_size > 16 {
            return Err(Error::config(format!(
                "rescaling counter size must be in [1, 16], got {}",
                self.rescaling_counter_size
            )));
        }
        if self.initial_count_exponent >= self.rescaling_counter_size {
            return Err(Error::config(format!(
                "initial count exponent {} must be smaller than the rescaling counter size {}",
                self.initial_count_exponent, self.rescaling_counter_size
            )));
        }
        if !(1..=32).contains(&self.unary_length_limit) {
            return Err(Error::config(format!(
                "unary length limit must be in [1, 32], got {}",
                self.unary_length_limit
            )));
        }
        Ok(())
    }

    /// The counter value that triggers a rescale.
    #[inline(always)]
    fn counter_limit(&self) -> u32 {
        (1 << self.rescaling_counter_size) - 1
    }
}

/// The adaptive statistics of one spectral band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BandStats {
    /// Running weighted sum of past sample magnitudes.
    pub accumulator: u64,
    /// Number of samples folded into the accumulator, always in
    /// `[1, (1 << rescaling_counter_size) - 1]`.
    pub counter: u32,
}

impl BandStats {
    /// The standard's closed-form initializer for the running mean
    /// estimate of band `band`.
    pub fn init(config: &SampleAdaptiveConfig, band: usize) -> Result<Self> {
        let counter = 1u32 << config.initial_count_exponent;
        let acc_init = match config.accumulator_init_constant {
            exp @ 0..=14 => exp,
            15 => *config
                .accumulator_table
                .as_ref()
                .and_then(|table| table.get(band))
                .ok_or_else(|| {
                    Error::config(format!("no accumulator table entry for band {}", band))
                })?,
            exp => {
                return Err(Error::config(format!(
                    "accumulator initialization constant must be in [0, 15], got {}",
                    exp
                )));
            }
        };
        let accumulator = ((3 * (1u64 << (acc_init + 6)) - 49) * counter as u64) >> 7;
        Ok(Self {
            accumulator,
            counter,
        })
    }

    /// Fold one sample into the statistics, rescaling at the counter
    /// limit: both registers are halved, rounding the sum-plus-sample up.
    #[inline]
    pub fn update(&mut self, sample: u64, counter_limit: u32) {
        if self.counter < counter_limit {
            self.accumulator += sample;
            self.counter += 1;
        } else {
            self.accumulator = (self.accumulator + sample + 1) >> 1;
            self.counter = (self.counter + 1) >> 1;
        }
    }

    /// The Golomb power-of-two parameter for the next sample of this band,
    /// clamped to `[0, dynamic_range - 2]`.
    #[inline]
    #[must_use]
    pub fn golomb_parameter(&self, dynamic_range: u32) -> u32 {
        let mean = (self.accumulator + ((49 * self.counter as u64) >> 7)) / self.counter as u64;
        if mean == 0 {
            0
        } else {
            mean.ilog2().min(dynamic_range - 2)
        }
    }
}

/// The sample-adaptive encoder.
///
/// See the [module documentation](self) for the coding procedure and
/// [`SampleCoder`] for the calling contract.
#[derive(Debug, Clone)]
pub struct SampleAdaptiveCoder<W: BitWrite> {
    config: SampleAdaptiveConfig,
    sink: W,
    stats: Vec<BandStats>,
    histogram: Histogram,
    bits_written: u64,
    bits_written_line: u64,
}

impl<W: BitWrite> SampleAdaptiveCoder<W> {
    /// Create a coder writing to `sink`.
    ///
    /// All band statistics are initialized here, so invalid configurations
    /// fail immediately.
    pub fn new(config: SampleAdaptiveConfig, sink: W) -> Result<Self> {
        config.validate()?;
        let stats = (0..config.shape.bands)
            .map(|band| BandStats::init(&config, band))
            .collect::<Result<Vec<_>>>()?;
        let histogram = Histogram::new(1 << config.dynamic_range);
        Ok(Self {
            config,
            sink,
            stats,
            histogram,
            bits_written: 0,
            bits_written_line: 0,
        })
    }

    /// The configuration this coder was built with.
    pub fn config(&self) -> &SampleAdaptiveConfig {
        &self.config
    }

    /// The current statistics of band `band`.
    pub fn band_stats(&self, band: usize) -> &BandStats {
        &self.stats[band]
    }

    /// Consume the coder and return its sink.
    ///
    /// Call [`terminate`](SampleCoder::terminate) first: the sink is
    /// returned as is, without flushing.
    pub fn into_sink(self) -> W {
        self.sink
    }

    /// Deep-copy this coder against a different sink.
    ///
    /// The fork shares no mutable state with the original: statistics and
    /// bit counters are copied, so trial encodings can be explored and
    /// compared without perturbing the canonical stream.
    pub fn fork<W2: BitWrite>(&self, sink: W2) -> SampleAdaptiveCoder<W2> {
        SampleAdaptiveCoder {
            config: self.config.clone(),
            sink,
            stats: self.stats.clone(),
            histogram: self.histogram.clone(),
            bits_written: self.bits_written,
            bits_written_line: self.bits_written_line,
        }
    }

    #[inline(always)]
    fn account(&mut self, bits: usize) -> usize {
        self.bits_written += bits as u64;
        self.bits_written_line += bits as u64;
        bits
    }
}

impl<W: BitWrite> SampleCoder for SampleAdaptiveCoder<W> {
    fn init(&mut self, band: usize) -> Result<()> {
        self.stats[band] = BandStats::init(&self.config, band)?;
        Ok(())
    }

    #[inline]
    fn update(&mut self, sample: u64, t: usize, band: usize) {
        if t == 0 {
            return;
        }
        self.stats[band].update(sample, self.config.counter_limit());
    }

    fn code_sample(&mut self, sample: u64, t: usize, band: usize) -> Result<usize> {
        let dynamic_range = self.config.dynamic_range;
        if t == 0 {
            if sample >> dynamic_range != 0 {
                return Err(Error::SampleOutOfRange {
                    value: sample,
                    band,
                    dynamic_range,
                });
            }
            let written = self.sink.write_bits(sample, dynamic_range as usize)?;
            return Ok(self.account(written));
        }

        let k = self.stats[band].golomb_parameter(dynamic_range);
        let quotient = sample >> k;
        let limit = self.config.unary_length_limit;

        let mut written = write_truncated_unary(&mut self.sink, quotient, limit)?;
        if quotient < limit {
            written += self.sink.write_bits(
                sample & (1_u128 << k).wrapping_sub(1) as u64,
                k as usize,
            )?;
        } else {
            written += self.sink.write_bits(
                sample & (1_u128 << dynamic_range).wrapping_sub(1) as u64,
                dynamic_range as usize,
            )?;
        }
        Ok(self.account(written))
    }

    fn terminate(&mut self) -> Result<()> {
        self.sink.flush()
    }

    fn shape(&self) -> ImageShape {
        self.config.shape
    }

    fn bits_written(&self) -> u64 {
        self.bits_written
    }

    fn bits_written_line(&self) -> u64 {
        self.bits_written_line
    }

    fn reset_bits_written(&mut self) {
        self.bits_written = 0;
    }

    fn reset_bits_written_line(&mut self) {
        self.bits_written_line = 0;
    }
}

impl<W: BitWrite> EntropyEstimate for SampleAdaptiveCoder<W> {
    fn update_histogram(&mut self, sample: u64) {
        self.histogram.update(sample);
    }

    fn entropy(&self) -> f64 {
        self.histogram.entropy()
    }

    fn reset_histogram(&mut self) {
        self.histogram.reset();
    }
}

/// The sample-adaptive decoder: the exact mirror of
/// [`SampleAdaptiveCoder`].
///
/// After decoding each sample the caller folds it into the statistics with
/// [`update`](SampleDecoder::update); since the recurrence is identical to
/// the encoder's, both sides hold bit-for-bit identical state after any
/// prefix of the stream.
#[derive(Debug, Clone)]
pub struct SampleAdaptiveDecoder<R: BitRead> {
    config: SampleAdaptiveConfig,
    source: R,
    stats: Vec<BandStats>,
    bits_read: u64,
}

impl<R: BitRead> SampleAdaptiveDecoder<R> {
    /// Create a decoder reading from `source`; the configuration must be
    /// identical to the encoder's.
    pub fn new(config: SampleAdaptiveConfig, source: R) -> Result<Self> {
        config.validate()?;
        let stats = (0..config.shape.bands)
            .map(|band| BandStats::init(&config, band))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            config,
            source,
            stats,
            bits_read: 0,
        })
    }

    /// The current statistics of band `band`.
    pub fn band_stats(&self, band: usize) -> &BandStats {
        &self.stats[band]
    }

    /// Consume the decoder and return its source.
    pub fn into_source(self) -> R {
        self.source
    }
}

impl<R: BitRead> SampleDecoder for SampleAdaptiveDecoder<R> {
    fn init(&mut self, band: usize) -> Result<()> {
        self.stats[band] = BandStats::init(&self.config, band)?;
        Ok(())
    }

    #[inline]
    fn update(&mut self, sample: u64, t: usize, band: usize) {
        if t == 0 {
            return;
        }
        self.stats[band].update(sample, self.config.counter_limit());
    }

    fn decode_sample(&mut self, t: usize, band: usize) -> Result<u64> {
        let dynamic_range = self.config.dynamic_range;
        if t == 0 {
            self.bits_read += dynamic_range as u64;
            return self.source.read_bits(dynamic_range as usize);
        }

        let k = self.stats[band].golomb_parameter(dynamic_range);
        let limit = self.config.unary_length_limit;
        match read_truncated_unary(&mut self.source, limit)? {
            Some(quotient) => {
                self.bits_read += quotient + 1 + k as u64;
                Ok((quotient << k) | self.source.read_bits(k as usize)?)
            }
            None => {
                self.bits_read += limit + dynamic_range as u64;
                self.source.read_bits(dynamic_range as usize)
            }
        }
    }

    fn terminate(&mut self) -> Result<()> {
        Ok(())
    }

    fn bits_read(&self) -> u64 {
        self.bits_read
    }
}
