/*
 * SPDX-FileCopyrightText: 2026 Tommaso Fontana
 * SPDX-FileCopyrightText: 2026 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Unary codes.
//!
//! The unary code of a natural number `n` is `n` zeros followed by a one.
//! Plain unary codes are written and read directly through
//! [`BitWrite::write_unary`](crate::traits::BitWrite::write_unary) and
//! [`BitRead::read_unary`](crate::traits::BitRead::read_unary); this module
//! adds the length-limited variant the sample-adaptive coder uses to bound
//! its worst-case codeword length.
//!
//! In the limited variant with limit *u*, values smaller than *u* are coded
//! in plain unary, and every other value is escaped as exactly *u* zeros
//! with no terminator, leaving the value itself to be coded verbatim by the
//! caller.

use crate::error::Result;
use crate::traits::{BitRead, BitWrite};

/// Returns the length of the unary code for `n`.
#[must_use]
#[inline(always)]
pub fn len_unary(n: u64) -> usize {
    n as usize + 1
}

/// Returns the length of the length-limited unary code for `n` with limit
/// `limit`, excluding any verbatim payload following the escape.
#[must_use]
#[inline(always)]
pub fn len_truncated_unary(n: u64, limit: u64) -> usize {
    if n < limit {
        len_unary(n)
    } else {
        limit as usize
    }
}

/// Write `n` in length-limited unary and return the number of bits written.
///
/// `limit` must be at most 64.
#[inline]
pub fn write_truncated_unary<W: BitWrite>(writer: &mut W, n: u64, limit: u64) -> Result<usize> {
    debug_assert!(limit <= 64);
    if n < limit {
        writer.write_unary(n)
    } else {
        // Escape marker: limit zeros, no terminator.
        writer.write_bits(0, limit as usize)
    }
}

/// Read a length-limited unary code.
///
/// Returns `Some(n)` if a terminator was found before `limit` zeros, and
/// `None` on the escape marker.
#[inline]
pub fn read_truncated_unary<R: BitRead>(reader: &mut R, limit: u64) -> Result<Option<u64>> {
    let mut n = 0;
    while n < limit {
        if reader.read_bits(1)? != 0 {
            return Ok(Some(n));
        }
        n += 1;
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::{BufBitReader, BufBitWriter, MemWordReader, MemWordWriter};

    #[test]
    fn test_truncated_unary_round_trip() -> Result<()> {
        const LIMIT: u64 = 8;
        let mut writer = BufBitWriter::new(MemWordWriter::new());
        for n in 0..2 * LIMIT {
            let written = write_truncated_unary(&mut writer, n, LIMIT)?;
            assert_eq!(written, len_truncated_unary(n, LIMIT));
        }
        let words = writer.into_inner()?.into_inner();

        let mut reader = BufBitReader::new(MemWordReader::new(words));
        for n in 0..2 * LIMIT {
            let expected = if n < LIMIT { Some(n) } else { None };
            assert_eq!(read_truncated_unary(&mut reader, LIMIT)?, expected);
        }
        Ok(())
    }
}
