/*
 * SPDX-FileCopyrightText: 2026 Tommaso Fontana
 * SPDX-FileCopyrightText: 2026 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Instantaneous codes used by the entropy coders.
//!
//! Only the two code families the CCSDS 123.0-B entropy stage needs are
//! provided: unary codes (including the length-limited variant used by the
//! sample-adaptive escape) and Rice codes, that is, Golomb codes with a
//! power-of-two parameter.

pub mod rice;
pub mod unary;

pub use rice::{len_rice, RiceRead, RiceWrite};
pub use unary::{len_truncated_unary, len_unary, read_truncated_unary, write_truncated_unary};
