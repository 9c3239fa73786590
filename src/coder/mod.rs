/*
 * SPDX-FileCopyrightText: 2026 Tommaso Fontana
 * SPDX-FileCopyrightText: 2026 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! The entropy-coding engines and their shared contract.
//!
//! Both engines are strictly sequential state machines: the caller feeds
//! samples one at a time, in a fixed traversal order of its choosing
//! (band-sequential or band-interleaved), tagging each sample with its
//! sequence index `t` within its band and its band index `z`. After coding
//! or decoding a sample, the caller folds it into the statistics with
//! [`update`](SampleCoder::update); encoder and decoder thus track the
//! exact same recurrence and stay in bit-for-bit lock-step, which is what
//! makes the format decodable without any side-channel model.
//!
//! No operation may be invoked concurrently on the same instance. A coder
//! may instead be [forked](SampleAdaptiveCoder::fork) onto a different sink
//! to explore trial encodings without perturbing the canonical stream.

#[cfg(feature = "mem_dbg")]
use mem_dbg::{MemDbg, MemSize};

use crate::error::Result;

mod block_adaptive;
pub use block_adaptive::*;

mod sample_adaptive;
pub use sample_adaptive::*;

/// The geometry of the image being coded, used for rate reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImageShape {
    /// Number of spectral bands.
    pub bands: usize,
    /// Number of lines per band.
    pub height: usize,
    /// Number of samples per line.
    pub width: usize,
}

impl ImageShape {
    #[must_use]
    pub fn new(bands: usize, height: usize, width: usize) -> Self {
        Self {
            bands,
            height,
            width,
        }
    }

    /// The total number of samples in the image.
    #[must_use]
    pub fn num_samples(&self) -> usize {
        self.bands * self.height * self.width
    }
}

/// The sample-at-a-time online-encoding contract shared by all engines.
///
/// Implementations emit bits for the current sample and account for them
/// exactly; the statistics update is a separate operation so that the
/// calling pipeline can drive encoder and decoder symmetrically.
pub trait SampleCoder {
    /// (Re)initialize the statistics of band `band` before its first
    /// sample. Engines without per-band statistics implement this as a
    /// documented no-op.
    fn init(&mut self, band: usize) -> Result<()>;

    /// Fold a coded sample into the statistics of band `band`.
    ///
    /// Must be called after [`code_sample`](Self::code_sample) for every
    /// sample; at `t == 0` this is a no-op, since the first sample of a
    /// band is coded verbatim and carries no residual semantics.
    fn update(&mut self, sample: u64, t: usize, band: usize);

    /// Code one sample, returning the number of bits emitted.
    fn code_sample(&mut self, sample: u64, t: usize, band: usize) -> Result<usize>;

    /// Terminate the stream: code any buffered residue and flush the sink.
    ///
    /// Must be the last call before discarding the coder or comparing rate
    /// statistics; it does not reset the statistics.
    fn terminate(&mut self) -> Result<()>;

    /// The geometry this coder reports rates against.
    fn shape(&self) -> ImageShape;

    /// Total bits written since construction or the last
    /// [`reset_bits_written`](Self::reset_bits_written).
    fn bits_written(&self) -> u64;

    /// Bits written since the last
    /// [`reset_bits_written_line`](Self::reset_bits_written_line); used by
    /// rate-control layers that track per-line budgets.
    fn bits_written_line(&self) -> u64;

    fn reset_bits_written(&mut self);

    fn reset_bits_written_line(&mut self);

    /// The current rate in bits per sample over the whole image geometry.
    fn rate(&self) -> f64 {
        let samples = self.shape().num_samples();
        if samples == 0 {
            return 0.0;
        }
        self.bits_written() as f64 / samples as f64
    }
}

/// The decoding mirror of [`SampleCoder`].
pub trait SampleDecoder {
    /// (Re)initialize the statistics of band `band`; exact mirror of
    /// [`SampleCoder::init`].
    fn init(&mut self, band: usize) -> Result<()>;

    /// Fold a decoded sample into the statistics of band `band`; exact
    /// mirror of [`SampleCoder::update`].
    fn update(&mut self, sample: u64, t: usize, band: usize);

    /// Decode one sample.
    fn decode_sample(&mut self, t: usize, band: usize) -> Result<u64>;

    /// Terminate the stream.
    fn terminate(&mut self) -> Result<()>;

    /// Total bits consumed from the source since construction.
    ///
    /// After decoding a whole stream this equals the encoder's
    /// [`bits_written`](SampleCoder::bits_written), which lets rate-control
    /// callers that replay streams account both directions symmetrically.
    fn bits_read(&self) -> u64;
}

/// Optional empirical-entropy diagnostics.
///
/// Engines that estimate residual statistics for diagnostic purposes
/// implement this capability; it is deliberately separate from
/// [`SampleCoder`] so that engines without it need no stub methods.
pub trait EntropyEstimate {
    /// Fold a sample magnitude into the diagnostic histogram.
    fn update_histogram(&mut self, sample: u64);

    /// The empirical zeroth-order entropy of the observed samples, in bits
    /// per sample.
    fn entropy(&self) -> f64;

    /// Zero the diagnostic histogram.
    fn reset_histogram(&mut self);
}
