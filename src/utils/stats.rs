/*
 * SPDX-FileCopyrightText: 2026 Tommaso Fontana
 * SPDX-FileCopyrightText: 2026 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

#[cfg(feature = "mem_dbg")]
use mem_dbg::{MemDbg, MemSize};

/// A histogram of sample magnitudes with an empirical-entropy estimate.
///
/// This structure can be used to compare the rate a coder achieves against
/// the zeroth-order entropy of the residuals it was fed. It is purely
/// diagnostic: nothing in the coded bitstream depends on it.
///
/// The histogram is local to whoever owns it and has an explicit
/// [`reset`](Self::reset); values at or beyond the number of bins are
/// folded into the last bin.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Histogram {
    bins: Vec<u64>,
    total: u64,
}

impl Histogram {
    /// Create a histogram with `num_bins` bins.
    #[must_use]
    pub fn new(num_bins: usize) -> Self {
        Self {
            bins: vec![0; num_bins.max(1)],
            total: 0,
        }
    }

    /// Fold a sample magnitude into the histogram.
    #[inline]
    pub fn update(&mut self, sample: u64) {
        let bin = (sample as usize).min(self.bins.len() - 1);
        self.bins[bin] += 1;
        self.total += 1;
    }

    /// The number of samples observed since the last reset.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// The empirical zeroth-order entropy, in bits per sample, of the
    /// observed frequencies: `-Σ p·log₂(p)`.
    ///
    /// Returns zero if no sample has been observed.
    #[must_use]
    pub fn entropy(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let total = self.total as f64;
        -self
            .bins
            .iter()
            .filter(|&&count| count != 0)
            .map(|&count| {
                let p = count as f64 / total;
                p * p.log2()
            })
            .sum::<f64>()
    }

    /// Zero all bins.
    pub fn reset(&mut self) {
        self.bins.fill(0);
        self.total = 0;
    }
}
