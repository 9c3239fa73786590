/*
 * SPDX-FileCopyrightText: 2026 Tommaso Fontana
 * SPDX-FileCopyrightText: 2026 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::error::Result;
use crate::traits::WordWrite;

/// An implementation of [`WordWrite`] on a growable in-memory [`Vec`] of
/// words.
///
/// This is the backend of choice for the in-memory buffered bit sink: wrap
/// it in a [`BufBitWriter`](crate::impls::BufBitWriter) and the resulting
/// word vector can be handed to a
/// [`MemWordReader`](crate::impls::MemWordReader) for decoding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemWordWriter {
    data: Vec<u64>,
}

impl MemWordWriter {
    /// Create an empty word writer.
    #[must_use]
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Create an empty word writer with the given word capacity.
    #[must_use]
    pub fn with_capacity(words: usize) -> Self {
        Self {
            data: Vec::with_capacity(words),
        }
    }

    /// The number of words written so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Consume the writer and return the written words.
    #[must_use]
    pub fn into_inner(self) -> Vec<u64> {
        self.data
    }
}

impl WordWrite for MemWordWriter {
    #[inline(always)]
    fn write_word(&mut self, word: u64) -> Result<()> {
        self.data.push(word);
        Ok(())
    }
}
