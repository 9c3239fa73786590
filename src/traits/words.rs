/*
 * SPDX-FileCopyrightText: 2026 Tommaso Fontana
 * SPDX-FileCopyrightText: 2026 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::error::Result;

/// Sequential, streaming word-by-word reads.
///
/// The bit streams of this crate are backed by `u64` word streams. A word
/// read past the end of the available data must return zero, so that the
/// zero padding added by [`BitWrite::flush`](crate::traits::BitWrite::flush)
/// extends naturally.
pub trait WordRead {
    /// Read a word and advance the current position.
    fn read_word(&mut self) -> Result<u64>;
}

/// Sequential, streaming word-by-word writes.
pub trait WordWrite {
    /// Write a word and advance the current position.
    fn write_word(&mut self, word: u64) -> Result<()>;
}
