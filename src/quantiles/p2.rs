//! P² single-quantile estimator
//!
//! Implementation of the P² algorithm (Jain & Chlamtac, 1985) for
//! estimating a quantile of a stream without storing observations. Five
//! markers track the minimum, the target quantile, the two quantiles
//! halfway to each extreme, and the maximum; interior markers are nudged
//! toward their ideal positions with a piecewise-parabolic prediction.

use crate::traits::{SampleError, StreamingStat};

/// P² streaming quantile estimator
///
/// Estimates a single quantile (e.g. the median with `p = 0.5`) in O(1)
/// time and memory per sample. Accuracy is approximate and
/// distribution-dependent; for well-behaved streams the estimate is
/// typically within a fraction of a percentile of the true value.
///
/// # Fallible updates
///
/// [`add`](Self::add) places each sample into one of four cells bounded
/// by the marker heights. A sample that compares unordered against every
/// marker — a NaN input, or markers that earlier non-finite arithmetic
/// has corrupted — fits no cell, and `add` reports
/// [`SampleError::Unclassifiable`]. State updated before the
/// classification attempt is kept; the estimator does not roll back.
///
/// # Example
///
/// ```
/// use momentflow::quantiles::P2Quantile;
///
/// let mut q90 = P2Quantile::new(0.9);
///
/// for i in 1..=1000 {
///     q90.add(i as f64).unwrap();
/// }
///
/// let estimate = q90.quantile().unwrap();
/// assert!((estimate - 900.0).abs() < 20.0);
/// ```
#[derive(Clone, Debug)]
pub struct P2Quantile {
    /// Target quantile probability in [0, 1]
    p: f64,
    /// Marker heights
    q: [f64; 5],
    /// Actual marker positions (1-based ranks)
    npos: [i64; 5],
    /// Desired marker positions
    np: [f64; 5],
    /// Desired position increments per sample
    dnp: [f64; 5],
    /// Number of samples folded in
    n: u64,
}

impl P2Quantile {
    /// Create an estimator for the quantile at probability `p`
    ///
    /// # Panics
    ///
    /// Panics if `p` is not within `[0, 1]`.
    pub fn new(p: f64) -> Self {
        assert!(
            (0.0..=1.0).contains(&p),
            "quantile probability must be in [0, 1], got {}",
            p
        );
        Self {
            p,
            q: [0.0; 5],
            npos: [1, 2, 3, 4, 5],
            np: [1.0, 1.0 + 2.0 * p, 1.0 + 4.0 * p, 3.0 + 2.0 * p, 5.0],
            dnp: [0.0, p / 2.0, p, (1.0 + p) / 2.0, 1.0],
            n: 0,
        }
    }

    /// Target quantile probability
    pub fn probability(&self) -> f64 {
        self.p
    }

    /// Fold a sample into the estimator
    ///
    /// The first five samples are stored directly and sorted; afterwards
    /// each sample adjusts the marker invariant in O(1).
    pub fn add(&mut self, x: f64) -> Result<(), SampleError> {
        if self.n < 5 {
            self.q[self.n as usize] = x;
            self.n += 1;
            if self.n == 5 {
                self.q.sort_unstable_by(f64::total_cmp);
            }
            return Ok(());
        }

        // Find cell k such that q[k] <= x < q[k+1], extending the
        // extreme markers for outliers
        let mut k: isize = -1;
        if x < self.q[0] {
            self.q[0] = x;
            k = 0;
        } else if x >= self.q[4] {
            self.q[4] = x;
            k = 3;
        } else {
            for i in 0..4 {
                if self.q[i] <= x && x < self.q[i + 1] {
                    k = i as isize;
                }
            }
        }

        // NaN input or NaN-poisoned markers fail every comparison above
        if k < 0 {
            return Err(SampleError::Unclassifiable { value: x });
        }
        let k = k as usize;

        for i in (k + 1)..5 {
            self.npos[i] += 1;
        }
        for i in 0..5 {
            self.np[i] += self.dnp[i];
        }

        for i in 1..4 {
            self.adjust(i);
        }

        self.n += 1;
        Ok(())
    }

    /// Current quantile estimate
    ///
    /// Returns the height of the center marker once five samples have
    /// been seen, a linear interpolation over the sorted prefix for
    /// shorter streams, and `None` when empty.
    pub fn quantile(&self) -> Option<f64> {
        if self.n == 0 {
            return None;
        }
        if self.n >= 5 {
            return Some(self.q[2]);
        }

        let len = self.n as usize;
        let mut sorted = [0.0f64; 5];
        sorted[..len].copy_from_slice(&self.q[..len]);
        sorted[..len].sort_unstable_by(f64::total_cmp);

        let index = self.p * (len - 1) as f64;
        let lhs = index as usize;
        let delta = index - lhs as f64;
        if lhs + 1 < len {
            Some((1.0 - delta) * sorted[lhs] + delta * sorted[lhs + 1])
        } else {
            Some(sorted[lhs])
        }
    }

    /// Marker heights, for diagnostic snapshots
    pub fn marker_heights(&self) -> [f64; 5] {
        self.q
    }

    /// Actual marker positions, for diagnostic snapshots
    pub fn marker_positions(&self) -> [i64; 5] {
        self.npos
    }

    /// Desired marker positions, for diagnostic snapshots
    pub fn desired_positions(&self) -> [f64; 5] {
        self.np
    }

    /// Adjust interior marker `i` toward its desired position
    fn adjust(&mut self, i: usize) {
        let d = self.np[i] - self.npos[i] as f64;

        if (d >= 1.0 && self.npos[i + 1] - self.npos[i] > 1)
            || (d <= -1.0 && self.npos[i - 1] - self.npos[i] < -1)
        {
            let dsign: i64 = if d >= 1.0 { 1 } else { -1 };

            let candidate = self.parabolic(i, dsign as f64);
            if self.q[i - 1] < candidate && candidate < self.q[i + 1] {
                self.q[i] = candidate;
            } else {
                self.q[i] = self.linear(i, dsign);
            }
            self.npos[i] += dsign;
        }
    }

    /// Piecewise-parabolic prediction of marker height `i` moved by `d`
    fn parabolic(&self, i: usize, d: f64) -> f64 {
        let pos = |j: usize| self.npos[j] as f64;
        self.q[i]
            + d / (pos(i + 1) - pos(i - 1))
                * ((pos(i) - pos(i - 1) + d) * (self.q[i + 1] - self.q[i])
                    / (pos(i + 1) - pos(i))
                    + (pos(i + 1) - pos(i) - d) * (self.q[i] - self.q[i - 1])
                        / (pos(i) - pos(i - 1)))
    }

    /// Linear fallback when the parabolic prediction leaves the cell
    fn linear(&self, i: usize, d: i64) -> f64 {
        let j = (i as i64 + d) as usize;
        self.q[i]
            + d as f64 * (self.q[j] - self.q[i]) / (self.npos[j] - self.npos[i]) as f64
    }
}

impl StreamingStat for P2Quantile {
    fn clear(&mut self) {
        *self = Self::new(self.p);
    }

    fn size_bytes(&self) -> usize {
        core::mem::size_of::<Self>()
    }

    fn count(&self) -> u64 {
        self.n
    }
}
