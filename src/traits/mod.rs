/*
 * SPDX-FileCopyrightText: 2026 Tommaso Fontana
 * SPDX-FileCopyrightText: 2026 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Traits for bit-level and word-level streams.
//!
//! The CCSDS 123.0-B bitstream has a single, fixed bit order: the rightmost
//! `n` bits of a value are emitted most-significant first. All traits in
//! this module therefore assume MSB-first semantics; there is no endianness
//! selector.

mod bits;
pub use bits::*;

mod words;
pub use words::*;
