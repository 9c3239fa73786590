/*
 * SPDX-FileCopyrightText: 2026 Tommaso Fontana
 * SPDX-FileCopyrightText: 2026 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::error::{Error, Result};
use crate::traits::{BitRead, WordRead};

/// An implementation of [`BitRead`] for a [`WordRead`], MSB first.
///
/// This implementation uses a `u128` bit buffer to store bits that are not
/// yet read: the high `bits_in_buffer` bits of the buffer are valid, oldest
/// first, and the remaining low bits are zero.
///
/// The reader has no notion of stream end: past the last word of the
/// backend it sees the zero words the backend returns. A decoder must
/// therefore know how many samples to read, which is the case for all
/// coders in this crate.
#[derive(Debug, Clone)]
pub struct BufBitReader<R: WordRead> {
    /// The [`WordRead`] used to fill the buffer.
    backend: R,
    /// The bit buffer; the high `bits_in_buffer` bits are valid, the rest
    /// are zero.
    buffer: u128,
    /// Number of valid bits in the buffer.
    bits_in_buffer: usize,
}

impl<R: WordRead> BufBitReader<R> {
    /// Create a new [`BufBitReader`] around a [`WordRead`].
    #[must_use]
    pub fn new(backend: R) -> Self {
        Self {
            backend,
            buffer: 0,
            bits_in_buffer: 0,
        }
    }

    /// Read a word from the backend into the buffer.
    ///
    /// Must be called only when at most 64 bits are valid.
    #[inline(always)]
    fn refill(&mut self) -> Result<()> {
        debug_assert!(self.bits_in_buffer <= u64::BITS as usize);
        let new_word = self.backend.read_word()? as u128;
        self.buffer |= new_word << (u64::BITS as usize - self.bits_in_buffer);
        self.bits_in_buffer += u64::BITS as usize;
        Ok(())
    }

    /// Consume the reader and return the backend.
    pub fn into_inner(self) -> R {
        self.backend
    }
}

impl<R: WordRead> BitRead for BufBitReader<R> {
    #[inline]
    fn read_bits(&mut self, n: usize) -> Result<u64> {
        if n == 0 {
            return Ok(0);
        }

        if n > 64 {
            return Err(Error::config(format!(
                "the number of bits to read must be in [0, 64], got {}",
                n
            )));
        }

        // A single refill suffices since n is at most 64.
        if self.bits_in_buffer < n {
            self.refill()?;
        }

        let result = (self.buffer >> (u128::BITS as usize - n)) as u64;
        self.buffer <<= n;
        self.bits_in_buffer -= n;
        Ok(result)
    }

    #[inline]
    fn read_unary(&mut self) -> Result<u64> {
        let mut result: u64 = 0;
        loop {
            if self.bits_in_buffer == 0 {
                self.refill()?;
            }

            // The bits below the valid region are zero, so a count smaller
            // than bits_in_buffer means we found the terminator.
            let zeros = self.buffer.leading_zeros() as usize;

            if zeros < self.bits_in_buffer {
                self.buffer = self.buffer << zeros << 1;
                self.bits_in_buffer -= zeros + 1;
                return Ok(result + zeros as u64);
            }

            result += self.bits_in_buffer as u64;
            self.buffer = 0;
            self.bits_in_buffer = 0;
        }
    }
}
