/*
 * SPDX-FileCopyrightText: 2026 Tommaso Fontana
 * SPDX-FileCopyrightText: 2026 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Error types for the entropy-coding stage.
//!
//! Entropy-coded streams are not self-synchronizing: once a write or read
//! fails, the stream cannot be resumed, so no error here is recoverable.
//! Configuration errors are programmer errors and surface at construction
//! or on first use of the offending parameter; I/O errors from the
//! underlying bit sink are propagated unchanged.

use thiserror::Error;

/// Error variants for coder configuration, coding, and bit-level I/O.
#[derive(Debug, Error)]
pub enum Error {
    /// A construction parameter is invalid (block size, dynamic range,
    /// accumulator initialization constant, split parameter, ...).
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// The first sample of a band does not fit in the declared dynamic
    /// range. The coder halts rather than silently truncating, since
    /// truncation would corrupt the bitstream irrecoverably.
    #[error("sample {value} of band {band} exceeds the {dynamic_range}-bit dynamic range")]
    SampleOutOfRange {
        value: u64,
        band: usize,
        dynamic_range: u32,
    },

    /// An I/O error from the underlying bit sink or source.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized `Result` type for entropy-coding operations.
pub type Result<T> = core::result::Result<T, Error>;

impl Error {
    /// Shorthand for a [`Error::Configuration`] with a formatted message.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Configuration(msg.into())
    }
}
