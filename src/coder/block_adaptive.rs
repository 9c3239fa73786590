/*
 * SPDX-FileCopyrightText: 2026 Tommaso Fontana
 * SPDX-FileCopyrightText: 2026 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! The block-adaptive Rice coder.
//!
//! Samples are buffered into fixed-size blocks. For each block the coder
//! evaluates every Rice split position plus a verbatim backup option,
//! computes the exact encoded size of each candidate, and emits an option
//! id followed by the cheapest representation. There is no adaptive state
//! across blocks: the decision is static per block, which makes this
//! engine simpler and more robust than the sample-adaptive one at some
//! cost in compression.
//!
//! The option search is exact, not a heuristic: the candidate set is small
//! enough that an exhaustive scan is cheap, and the size estimate
//! `Σ(sample >> k) + (k + 1)·block_size` is the true encoded size of the
//! split option `k`.

#[cfg(feature = "mem_dbg")]
use mem_dbg::{MemDbg, MemSize};

use super::{ImageShape, SampleCoder, SampleDecoder};
use crate::codes::rice::{len_rice, RiceRead, RiceWrite};
use crate::error::{Error, Result};
use crate::traits::{BitRead, BitWrite};

/// Configuration of the block-adaptive engine.
///
/// Like [`SampleAdaptiveConfig`](super::SampleAdaptiveConfig), these
/// parameters are the wire contract: encoder and decoder must agree on all
/// of them, out of band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlockAdaptiveConfig {
    /// Number of significant bits per sample, in `[1, 32]`.
    pub dynamic_range: u32,
    /// Number of samples per block, 8 or 16.
    pub block_size: usize,
    /// The standard reserves at least 3 id bits; setting this relaxes the
    /// minimum to the bits strictly needed by the option count.
    pub restrict_id_bits: bool,
    /// Image geometry, for rate reporting.
    pub shape: ImageShape,
}

impl BlockAdaptiveConfig {
    /// Create a configuration with the given dynamic range, block size and
    /// geometry.
    #[must_use]
    pub fn new(dynamic_range: u32, block_size: usize, shape: ImageShape) -> Self {
        Self {
            dynamic_range,
            block_size,
            restrict_id_bits: false,
            shape,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(1..=32).contains(&self.dynamic_range) {
            return Err(Error::config(format!(
                "dynamic range must be in [1, 32], got {}",
                self.dynamic_range
            )));
        }
        if self.block_size != 8 && self.block_size != 16 {
            return Err(Error::config(format!(
                "block size must be 8 or 16, got {}",
                self.block_size
            )));
        }
        Ok(())
    }

    /// The width of the option id field:
    /// `floor(log2(dynamic_range - 1)) + 1`, raised to a minimum of 3
    /// unless [`restrict_id_bits`](Self::restrict_id_bits) is set.
    #[must_use]
    pub fn id_bits(&self) -> u32 {
        let bits = if self.dynamic_range <= 1 {
            1
        } else {
            (self.dynamic_range - 1).ilog2() + 1
        };
        if self.restrict_id_bits {
            bits
        } else {
            bits.max(3)
        }
    }

    /// The number of coding options, one of which is the backup.
    #[must_use]
    pub fn num_options(&self) -> u32 {
        1 << self.id_bits()
    }

    /// The distinguished option id meaning "every sample verbatim at full
    /// dynamic range".
    #[must_use]
    pub fn backup_option(&self) -> u32 {
        self.num_options() - 1
    }
}

/// Exhaustively search the cheapest coding option for a block.
///
/// Candidates are the split positions `0..num_options - 1`, costing
/// `Σ(sample >> k) + (k + 1)·len`, and the backup option, costing
/// `len·dynamic_range`. The strictly smallest cost wins; on ties the
/// earliest candidate is kept, with the backup winning over any split of
/// equal cost.
#[must_use]
pub fn find_best_coding_option(block: &[u64], dynamic_range: u32, num_options: u32) -> u32 {
    let backup = num_options - 1;
    let mut best = backup;
    let mut best_size = block.len() as u64 * dynamic_range as u64;
    for k in 0..backup {
        let size = block.iter().map(|&s| s >> k).sum::<u64>()
            + (k as u64 + 1) * block.len() as u64;
        if size < best_size {
            best_size = size;
            best = k;
        }
    }
    best
}

/// Write every sample of `block` as a Rice code with split position `k`,
/// returning the number of bits written.
///
/// Fails fast with a configuration error if `k` is outside `[0, 31]`.
pub fn code_split_block<W: BitWrite>(sink: &mut W, block: &[u64], k: u32) -> Result<usize> {
    if k > 31 {
        return Err(Error::config(format!(
            "split position must be in [0, 31], got {}",
            k
        )));
    }
    let mut written = 0;
    for &sample in block {
        written += sink.write_rice(sample, k as usize)?;
    }
    Ok(written)
}

/// Write every sample of `block` verbatim at `dynamic_range` bits each,
/// returning the number of bits written.
pub fn code_backup_block<W: BitWrite>(
    sink: &mut W,
    block: &[u64],
    dynamic_range: u32,
) -> Result<usize> {
    let mut written = 0;
    for &sample in block {
        written += sink.write_bits(sample, dynamic_range as usize)?;
    }
    Ok(written)
}

/// The block-adaptive Rice encoder.
///
/// Samples fed through [`code_sample`](SampleCoder::code_sample) fill an
/// internal block buffer; a full buffer is coded and reset to zeros, and
/// [`terminate`](SampleCoder::terminate) codes any partial residue as a
/// full block whose tail slots are zero.
#[derive(Debug, Clone)]
pub struct BlockAdaptiveCoder<W: BitWrite> {
    config: BlockAdaptiveConfig,
    sink: W,
    block: Vec<u64>,
    block_counter: usize,
    bits_written: u64,
    bits_written_line: u64,
}

impl<W: BitWrite> BlockAdaptiveCoder<W> {
    /// Create a coder writing to `sink`.
    pub fn new(config: BlockAdaptiveConfig, sink: W) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            sink,
            block: vec![0; config.block_size],
            block_counter: 0,
            bits_written: 0,
            bits_written_line: 0,
        })
    }

    /// The configuration this coder was built with.
    pub fn config(&self) -> &BlockAdaptiveConfig {
        &self.config
    }

    /// Consume the coder and return its sink.
    ///
    /// Call [`terminate`](SampleCoder::terminate) first: a partial block
    /// still in the buffer is not coded here, and the sink is returned
    /// without flushing.
    pub fn into_sink(self) -> W {
        self.sink
    }

    /// Deep-copy this coder against a different sink, including any
    /// partially filled block buffer.
    pub fn fork<W2: BitWrite>(&self, sink: W2) -> BlockAdaptiveCoder<W2> {
        BlockAdaptiveCoder {
            config: self.config,
            sink,
            block: self.block.clone(),
            block_counter: self.block_counter,
            bits_written: self.bits_written,
            bits_written_line: self.bits_written_line,
        }
    }

    /// Code the buffered block and reset the buffer to zeros.
    fn code_block(&mut self) -> Result<()> {
        let config = self.config;
        // Stray high bits would corrupt the verbatim and remainder fields.
        for sample in self.block.iter_mut() {
            *sample &= (1_u128 << config.dynamic_range).wrapping_sub(1) as u64;
        }

        let option = find_best_coding_option(&self.block, config.dynamic_range, config.num_options());

        let mut written = self
            .sink
            .write_bits(option as u64, config.id_bits() as usize)?;
        if option == config.backup_option() {
            written += code_backup_block(&mut self.sink, &self.block, config.dynamic_range)?;
        } else {
            written += code_split_block(&mut self.sink, &self.block, option)?;
        }
        self.bits_written += written as u64;
        self.bits_written_line += written as u64;

        self.block.fill(0);
        self.block_counter = 0;
        Ok(())
    }
}

impl<W: BitWrite> SampleCoder for BlockAdaptiveCoder<W> {
    /// No-op: the block-adaptive engine keeps no per-band statistics.
    fn init(&mut self, _band: usize) -> Result<()> {
        Ok(())
    }

    /// No-op: the option search looks only at the buffered block.
    fn update(&mut self, _sample: u64, _t: usize, _band: usize) {}

    fn code_sample(&mut self, sample: u64, _t: usize, _band: usize) -> Result<usize> {
        let before = self.bits_written;
        self.block[self.block_counter] = sample;
        self.block_counter += 1;
        if self.block_counter == self.config.block_size {
            self.code_block()?;
        }
        Ok((self.bits_written - before) as usize)
    }

    fn terminate(&mut self) -> Result<()> {
        if self.block_counter > 0 {
            self.code_block()?;
        }
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

/// The block-adaptive Rice decoder.
///
/// Decodes one block at a time and hands samples out one per
/// [`decode_sample`](SampleDecoder::decode_sample) call. A partial final
/// block decodes as a full block whose tail slots are zero; the caller is
/// expected to stop at the true sample count.
#[derive(Debug, Clone)]
pub struct BlockAdaptiveDecoder<R: BitRead> {
    config: BlockAdaptiveConfig,
    source: R,
    block: Vec<u64>,
    /// Index of the next sample to hand out; `block_size` means the buffer
    /// is exhausted.
    pos: usize,
    bits_read: u64,
}

impl<R: BitRead> BlockAdaptiveDecoder<R> {
    /// Create a decoder reading from `source`; the configuration must be
    /// identical to the encoder's.
    pub fn new(config: BlockAdaptiveConfig, source: R) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            source,
            block: vec![0; config.block_size],
            pos: config.block_size,
            bits_read: 0,
        })
    }

    /// Consume the decoder and return its source.
    pub fn into_source(self) -> R {
        self.source
    }

    fn decode_block(&mut self) -> Result<()> {
        let config = self.config;
        let option = self.source.read_bits(config.id_bits() as usize)? as u32;
        let mut bits = config.id_bits() as u64;
        if option == config.backup_option() {
            for sample in self.block.iter_mut() {
                *sample = self.source.read_bits(config.dynamic_range as usize)?;
                bits += config.dynamic_range as u64;
            }
        } else {
            for sample in self.block.iter_mut() {
                *sample = self.source.read_rice(option as usize)?;
                bits += len_rice(*sample, option as usize) as u64;
            }
        }
        self.bits_read += bits;
        self.pos = 0;
        Ok(())
    }
}

impl<R: BitRead> SampleDecoder for BlockAdaptiveDecoder<R> {
    /// No-op, mirroring [`BlockAdaptiveCoder`].
    fn init(&mut self, _band: usize) -> Result<()> {
        Ok(())
    }

    /// No-op, mirroring [`BlockAdaptiveCoder`].
    fn update(&mut self, _sample: u64, _t: usize, _band: usize) {}

    fn decode_sample(&mut self, _t: usize, _band: usize) -> Result<u64> {
        if self.pos == self.config.block_size {
            self.decode_block()?;
        }
        let sample = self.block[self.pos];
        self.pos += 1;
        Ok(sample)
    }

    fn terminate(&mut self) -> Result<()> {
        Ok(())
    }

    fn bits_read(&self) -> u64 {
        self.bits_read
    }
}
