/*
 * SPDX-FileCopyrightText: 2026 Tommaso Fontana
 * SPDX-FileCopyrightText: 2026 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::error::{Error, Result};
use crate::traits::{BitWrite, WordWrite};

/// An implementation of [`BitWrite`] for a [`WordWrite`], MSB first.
///
/// This implementation uses a `u128` bit buffer to store bits that are not
/// yet a full word; the low `bits_in_buffer` bits of the buffer are valid,
/// the most recently written in the lowest positions. Whole `u64` words are
/// handed to the backend as they fill up.
///
/// [`flush`](BitWrite::flush) pads the last word with zeros; call it (or
/// [`into_inner`](BufBitWriter::into_inner), which flushes) before handing
/// the backend to a reader.
#[derive(Debug)]
pub struct BufBitWriter<W: WordWrite> {
    /// The [`WordWrite`] to which we will write words.
    backend: W,
    /// The buffer where we store code writes until we have a word worth of
    /// bits. Only the low `bits_in_buffer` bits are valid.
    buffer: u128,
    /// Number of valid bits in the buffer.
    bits_in_buffer: usize,
}

impl<W: WordWrite> BufBitWriter<W> {
    /// Create a new [`BufBitWriter`] around a backend word writer.
    pub fn new(backend: W) -> Self {
        Self {
            backend,
            buffer: 0,
            bits_in_buffer: 0,
        }
    }

    #[inline(always)]
    #[must_use]
    fn space_left_in_buffer(&self) -> usize {
        u128::BITS as usize - self.bits_in_buffer
    }

    /// Write the oldest buffered word to the backend, if a full word is
    /// available.
    #[inline]
    fn partial_flush(&mut self) -> Result<()> {
        if self.bits_in_buffer < u64::BITS as usize {
            return Ok(());
        }
        self.bits_in_buffer -= u64::BITS as usize;
        let word = (self.buffer >> self.bits_in_buffer) as u64;
        self.backend.write_word(word)?;
        Ok(())
    }

    /// Flush the bit buffer and return the backend.
    pub fn into_inner(mut self) -> Result<W> {
        BitWrite::flush(&mut self)?;
        Ok(self.backend)
    }
}

impl<W: WordWrite> BitWrite for BufBitWriter<W> {
    #[inline]
    fn write_bits(&mut self, value: u64, n: usize) -> Result<usize> {
        if n == 0 {
            return Ok(0);
        }

        if n > 64 {
            return Err(Error::config(format!(
                "the number of bits to write must be in [0, 64], got {}",
                n
            )));
        }

        #[cfg(feature = "checks")]
        if (value & (1_u128 << n).wrapping_sub(1) as u64) != value {
            return Err(Error::config(format!(
                "value {} does not fit in {} bits",
                value, n
            )));
        }

        self.partial_flush()?;
        // After a partial flush at most 63 bits are buffered, so any
        // admissible write fits in one shot.
        debug_assert!(n <= self.space_left_in_buffer());
        self.buffer <<= n;
        self.buffer |= value as u128;
        self.bits_in_buffer += n;
        Ok(n)
    }

    #[inline]
    fn write_unary(&mut self, mut value: u64) -> Result<usize> {
        let code_length = value + 1;
        let space_left = self.space_left_in_buffer() as u64;

        if code_length <= space_left {
            self.bits_in_buffer += code_length as usize;
            // Might be code_length == u128::BITS
            self.buffer = self.buffer << value << 1;
            self.buffer |= 1;
            return Ok(code_length as usize);
        }

        // The zeros of the code fill the buffer completely: write it out
        // and keep emitting zero words.
        self.buffer = if space_left == u128::BITS as u64 {
            0
        } else {
            self.buffer << space_left
        };
        self.backend.write_word((self.buffer >> u64::BITS) as u64)?;
        self.backend.write_word(self.buffer as u64)?;

        value -= space_left;

        for _ in 0..value / u64::BITS as u64 {
            self.backend.write_word(0)?;
        }

        value %= u64::BITS as u64;

        self.buffer = 1;
        self.bits_in_buffer = value as usize + 1;
        Ok(code_length as usize)
    }

    fn flush(&mut self) -> Result<()> {
        self.partial_flush()?;
        if self.bits_in_buffer > 0 {
            let mut word = self.buffer as u64;
            word <<= u64::BITS as usize - self.bits_in_buffer;
            self.backend.write_word(word)?;
            self.bits_in_buffer = 0;
            self.buffer = 0;
        }
        Ok(())
    }
}
