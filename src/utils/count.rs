/*
 * SPDX-FileCopyrightText: 2026 Tommaso Fontana
 * SPDX-FileCopyrightText: 2026 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::error::Result;
use crate::traits::BitWrite;

/// Wrapping struct that keeps track of written bits. Optionally, prints to
/// standard error information about methods called.
///
/// Useful to audit the bit accounting of a coder: the coder's own counters
/// must agree with the bits that actually reached the sink.
#[derive(Debug)]
pub struct CountBitWriter<W: BitWrite, const PRINT: bool = false> {
    bit_write: W,
    /// The number of bits written so far on the underlying [`BitWrite`].
    pub bits_written: u64,
}

impl<W: BitWrite, const PRINT: bool> CountBitWriter<W, PRINT> {
    pub fn new(bit_write: W) -> Self {
        Self {
            bit_write,
            bits_written: 0,
        }
    }

    /// Consume the wrapper and return the underlying [`BitWrite`].
    pub fn into_inner(self) -> W {
        self.bit_write
    }
}

impl<W: BitWrite, const PRINT: bool> BitWrite for CountBitWriter<W, PRINT> {
    fn write_bits(&mut self, value: u64, n: usize) -> Result<usize> {
        self.bit_write.write_bits(value, n).inspect(|x| {
            self.bits_written += *x as u64;
            if PRINT {
                eprintln!(
                    "write_bits({:#016x}, {}) = {} (total = {})",
                    value, n, x, self.bits_written
                );
            }
        })
    }

    fn write_unary(&mut self, value: u64) -> Result<usize> {
        self.bit_write.write_unary(value).inspect(|x| {
            self.bits_written += *x as u64;
            if PRINT {
                eprintln!(
                    "write_unary({}) = {} (total = {})",
                    value, x, self.bits_written
                );
            }
        })
    }

    fn flush(&mut self) -> Result<()> {
        self.bit_write.flush()
    }
}
