/*
 * SPDX-FileCopyrightText: 2026 Tommaso Fontana
 * SPDX-FileCopyrightText: 2026 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Adaptive entropy coders for CCSDS 123.0-B lossless multispectral and
//! hyperspectral image compression.
//!
//! This crate implements the entropy-coding stage of a CCSDS 123.0-class
//! compressor: the component that turns a sequence of per-sample prediction
//! residuals into a compact bitstream, and back, using statistics computed
//! incrementally from the data itself. No model is transmitted out of band;
//! encoder and decoder derive identical coding parameters from the samples
//! they have already processed.
//!
//! Two interchangeable engines are provided, both implementing the
//! [`SampleCoder`](crate::coder::SampleCoder)/[`SampleDecoder`](crate::coder::SampleDecoder)
//! contract:
//!
//! - [`SampleAdaptiveCoder`](crate::coder::SampleAdaptiveCoder) keeps a
//!   running accumulator/counter pair per spectral band and derives a
//!   Golomb power-of-two parameter per sample;
//! - [`BlockAdaptiveCoder`](crate::coder::BlockAdaptiveCoder) buffers
//!   samples into fixed-size blocks, searches a small set of Rice split
//!   options per block, and emits the cheapest representation, with a
//!   verbatim fallback.
//!
//! Bits are produced through the [`BitWrite`](crate::traits::BitWrite)
//! trait and consumed through [`BitRead`](crate::traits::BitRead), both
//! with a fixed MSB-first bit order; the [`impls`] module provides buffered
//! in-memory implementations and an adapter for [`std::io`] backends.
//!
//! # Example
//!
//! ```
//! use ccsds123_entropy::prelude::*;
//!
//! # fn main() -> ccsds123_entropy::Result<()> {
//! let shape = ImageShape::new(1, 1, 4);
//! let config = SampleAdaptiveConfig::new(8, shape);
//! let samples = [100, 3, 0, 7];
//!
//! let sink = BufBitWriter::new(MemWordWriter::new());
//! let mut coder = SampleAdaptiveCoder::new(config.clone(), sink)?;
//! coder.init(0)?;
//! for (t, &s) in samples.iter().enumerate() {
//!     coder.code_sample(s, t, 0)?;
//!     coder.update(s, t, 0);
//! }
//! coder.terminate()?;
//!
//! let words = coder.into_sink().into_inner()?.into_inner();
//! let source = BufBitReader::new(MemWordReader::new(words));
//! let mut decoder = SampleAdaptiveDecoder::new(config, source)?;
//! decoder.init(0)?;
//! for (t, &s) in samples.iter().enumerate() {
//!     let decoded = decoder.decode_sample(t, 0)?;
//!     assert_eq!(decoded, s);
//!     decoder.update(decoded, t, 0);
//! }
//! # Ok(())
//! # }
//! ```

pub mod coder;
pub mod codes;
pub mod error;
pub mod impls;
pub mod traits;
pub mod utils;

#[cfg(feature = "fuzz")]
pub mod fuzz;

pub use error::{Error, Result};

/// Prelude module to import everything from this crate
pub mod prelude {
    pub use crate::coder::*;
    pub use crate::codes::*;
    pub use crate::error::{Error, Result};
    pub use crate::impls::*;
    pub use crate::traits::*;
    pub use crate::utils::*;
}
