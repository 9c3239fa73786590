/*
 * SPDX-FileCopyrightText: 2026 Tommaso Fontana
 * SPDX-FileCopyrightText: 2026 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

Implementations of bit and word streams.

If you need to read or write words from a file or any backend implementing
[`std::io::Read`] or [`std::io::Write`] you just need to wrap it in a
[`WordAdapter`]. If instead you want to read or write directly from memory,
you can use [`MemWordReader`] and [`MemWordWriter`].

Once you have a way to access words, [`BufBitWriter`] and [`BufBitReader`]
read and write bits from the word stream through an internal `u128` bit
buffer, emitting bits MSB first as the CCSDS 123.0-B format requires.

*/

mod mem_word_reader;
pub use mem_word_reader::*;

mod mem_word_writer;
pub use mem_word_writer::*;

mod word_adapter;
pub use word_adapter::*;

mod buf_bit_reader;
pub use buf_bit_reader::BufBitReader;

mod buf_bit_writer;
pub use buf_bit_writer::BufBitWriter;
