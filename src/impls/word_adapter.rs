/*
 * SPDX-FileCopyrightText: 2026 Tommaso Fontana
 * SPDX-FileCopyrightText: 2026 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::error::Result;
use crate::traits::{WordRead, WordWrite};
use std::io::{ErrorKind, Read, Write};

/// An adapter implementing [`WordRead`] and [`WordWrite`] on any type
/// implementing [`std::io::Read`] or [`std::io::Write`].
///
/// Words cross the byte boundary big-endian, so the byte stream carries the
/// bits in the same MSB-first order in which they were written. A partial
/// or missing final word on the read side is padded with zero bytes, which
/// mirrors the zero padding added at flush time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordAdapter<B> {
    backend: B,
}

impl<B> WordAdapter<B> {
    /// Create a new adapter around an I/O backend.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Consume the adapter and return the underlying backend.
    pub fn into_inner(self) -> B {
        self.backend
    }
}

impl<B: Write> WordWrite for WordAdapter<B> {
    #[inline]
    fn write_word(&mut self, word: u64) -> Result<()> {
        self.backend.write_all(&word.to_be_bytes())?;
        Ok(())
    }
}

impl<B: Read> WordRead for WordAdapter<B> {
    #[inline]
    fn read_word(&mut self) -> Result<u64> {
        let mut bytes = [0u8; 8];
        let mut pos = 0;
        while pos < bytes.len() {
            match self.backend.read(&mut bytes[pos..]) {
                // End of stream: the remaining bytes stay zero.
                Ok(0) => break,
                Ok(n) => pos += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(u64::from_be_bytes(bytes))
    }
}
