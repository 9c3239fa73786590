/*
 * SPDX-FileCopyrightText: 2026 Tommaso Fontana
 * SPDX-FileCopyrightText: 2026 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::error::Result;

/// Sequential, streaming bit-by-bit writes, MSB first.
///
/// This trait is the bit-sink contract of the entropy coders: an
/// implementation accepts an exact bit count and an unsigned value, and
/// emits the rightmost `n` bits of the value, most significant of the
/// selected bits first.
///
/// Writes are never partially retried: once bits have been counted as
/// written, a failure aborts the whole stream.
pub trait BitWrite {
    /// Write the lowest `n` bits of `value` to the stream and return the
    /// number of bits written, that is, `n`.
    ///
    /// `n` must be at most 64; `n == 0` is a valid no-op. If the feature
    /// `checks` is enabled, implementors should check that the remaining
    /// bits of `value` are zero.
    fn write_bits(&mut self, value: u64, n: usize) -> Result<usize>;

    /// Write `value` as a unary code (`value` zeros followed by a one) and
    /// return the number of bits written, that is, `value` plus one.
    fn write_unary(&mut self, value: u64) -> Result<usize>;

    /// Flush any buffered bits to the underlying backend, padding the last
    /// word with zeros.
    ///
    /// After a flush the stream is still usable; flushing an empty buffer
    /// writes nothing.
    fn flush(&mut self) -> Result<()>;
}

/// Sequential, streaming bit-by-bit reads, MSB first.
///
/// The mirror of [`BitWrite`]: codes are read back in the exact order and
/// bit layout they were written.
pub trait BitRead {
    /// Read `n` bits and return them in the lowest bits.
    ///
    /// `n` must be at most 64; `n == 0` is a valid no-op returning zero.
    fn read_bits(&mut self, n: usize) -> Result<u64>;

    /// Read a unary code: the number of zeros preceding the next one bit.
    fn read_unary(&mut self) -> Result<u64>;
}

impl<B: BitWrite + ?Sized> BitWrite for &mut B {
    #[inline(always)]
    fn write_bits(&mut self, value: u64, n: usize) -> Result<usize> {
        (**self).write_bits(value, n)
    }

    #[inline(always)]
    fn write_unary(&mut self, value: u64) -> Result<usize> {
        (**self).write_unary(value)
    }

    #[inline(always)]
    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }
}

impl<B: BitRead + ?Sized> BitRead for &mut B {
    #[inline(always)]
    fn read_bits(&mut self, n: usize) -> Result<u64> {
        (**self).read_bits(n)
    }

    #[inline(always)]
    fn read_unary(&mut self) -> Result<u64> {
        (**self).read_unary()
    }
}
