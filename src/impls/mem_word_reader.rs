/*
 * SPDX-FileCopyrightText: 2026 Tommaso Fontana
 * SPDX-FileCopyrightText: 2026 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::error::Result;
use crate::traits::WordRead;

/// An implementation of [`WordRead`] on a slice or vector of words.
///
/// Reads past the end of the data return zero words. This matches the zero
/// padding that [`BitWrite::flush`](crate::traits::BitWrite::flush) appends
/// to the last word of a stream, so a decoder that stays within the coded
/// sample count never observes the difference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemWordReader<B: AsRef<[u64]> = Vec<u64>> {
    data: B,
    word_index: usize,
}

impl<B: AsRef<[u64]>> MemWordReader<B> {
    /// Create a new word reader on a slice or vector of words.
    #[must_use]
    pub fn new(data: B) -> Self {
        Self {
            data,
            word_index: 0,
        }
    }

    /// The current position, in words.
    #[must_use]
    pub fn word_pos(&self) -> usize {
        self.word_index
    }

    /// Consume the reader and return the underlying data.
    #[must_use]
    pub fn into_inner(self) -> B {
        self.data
    }
}

impl<B: AsRef<[u64]>> WordRead for MemWordReader<B> {
    #[inline(always)]
    fn read_word(&mut self) -> Result<u64> {
        let word = self
            .data
            .as_ref()
            .get(self.word_index)
            .copied()
            .unwrap_or(0);
        self.word_index += 1;
        Ok(word)
    }
}
