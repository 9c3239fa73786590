/*
 * SPDX-FileCopyrightText: 2026 Tommaso Fontana
 * SPDX-FileCopyrightText: 2026 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Rice codes.
//!
//! Rice codes (AKA Golomb−Rice codes) are Golomb codes in which the
//! parameter *b* is a power of two: the quotient `n >> log₂b` is coded in
//! unary and the remainder in `log₂b` verbatim bits. The restriction to
//! powers of two makes encoding and decoding pure bit manipulation, which
//! is why both CCSDS entropy engines are built on this family.
//!
//! # References
//!
//! Robert F. Rice, “[Some practical universal noiseless coding
//! techniques](https://ntrs.nasa.gov/api/citations/19790014634/downloads/19790014634.pdf)”.
//! Jet Propulsion Laboratory, Pasadena, CA, Tech. Rep. JPL-79-22, March 1979.
//!
//! “Lossless Multispectral & Hyperspectral Image Compression”, CCSDS
//! 123.0-B, Blue Book.

use crate::error::Result;
use crate::traits::{BitRead, BitWrite};

/// Returns the length of the Rice code for `n` with parameter `log2_b`.
#[must_use]
#[inline(always)]
pub fn len_rice(n: u64, log2_b: usize) -> usize {
    debug_assert!(log2_b < 64);
    (n >> log2_b) as usize + 1 + log2_b
}

/// Trait for reading Rice codes.
pub trait RiceRead: BitRead {
    #[inline(always)]
    fn read_rice(&mut self, log2_b: usize) -> Result<u64> {
        debug_assert!(log2_b < 64);
        Ok((self.read_unary()? << log2_b) + self.read_bits(log2_b)?)
    }
}

/// Trait for writing Rice codes.
pub trait RiceWrite: BitWrite {
    #[inline(always)]
    fn write_rice(&mut self, n: u64, log2_b: usize) -> Result<usize> {
        debug_assert!(log2_b < 64);
        let mut written_bits = self.write_unary(n >> log2_b)?;
        // Clean up n so that only the remainder is passed down.
        let n = n & (1_u128 << log2_b).wrapping_sub(1) as u64;
        written_bits += self.write_bits(n, log2_b)?;
        Ok(written_bits)
    }
}

impl<B: BitRead> RiceRead for B {}
impl<B: BitWrite> RiceWrite for B {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::{BufBitReader, BufBitWriter, MemWordReader, MemWordWriter};

    #[test]
    fn test_rice_round_trip() -> Result<()> {
        let mut writer = BufBitWriter::new(MemWordWriter::new());
        for log2_b in 0..8 {
            for n in 0..100 {
                assert_eq!(writer.write_rice(n, log2_b)?, len_rice(n, log2_b));
            }
        }
        let words = writer.into_inner()?.into_inner();

        let mut reader = BufBitReader::new(MemWordReader::new(words));
        for log2_b in 0..8 {
            for n in 0..100 {
                assert_eq!(reader.read_rice(log2_b)?, n);
            }
        }
        Ok(())
    }
}
