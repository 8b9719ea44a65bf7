//! Running central moments (mean, variance, skewness, kurtosis)
//!
//! Single-pass accumulator for the second through fourth central moments,
//! updated with the one-pass recurrence of Welford (mean/M2) extended to
//! M3 and M4 (Pébay's formulas, as used by GSL's running statistics).

use crate::math;
use crate::traits::StreamingStat;

/// Running central-moment accumulator
///
/// Folds each sample into `mean` and the central moment sums `m2`, `m3`,
/// `m4` in O(1) time and O(1) space, without retaining the sample history.
/// Mean, variance, skewness, and kurtosis are derived on demand.
///
/// # Non-finite inputs
///
/// `add` accepts any `f64` — zero, subnormals, ±infinity, NaN — and
/// performs no guarding whatsoever. A non-finite sample mechanically
/// propagates infinities and NaNs into the state, and there is no
/// recovery path: once `mean` or a moment sum is NaN it stays NaN no
/// matter how many finite samples follow. Callers wanting filtering must
/// apply it before `add`.
///
/// # Numerical stability
///
/// `m2` is a sum of squares and is non-negative under exact arithmetic,
/// but floating-point cancellation or overflow can drive it negative,
/// infinite, or NaN. This accumulator preserves that behavior rather than
/// clamping; see [`variance`](Self::variance).
///
/// # Concurrency
///
/// The accumulator is single-threaded: `add` mutates state with no
/// internal synchronization. Concurrent ingestion requires one
/// accumulator per thread; no merge operation is provided.
///
/// # Example
///
/// ```
/// use momentflow::statistics::Moments;
///
/// let mut moments = Moments::new();
///
/// moments.add(2.0);
/// moments.add(4.0);
/// moments.add(6.0);
///
/// assert_eq!(moments.count(), 3);
/// assert_eq!(moments.mean(), 4.0);
/// assert_eq!(moments.variance(), 4.0);
/// ```
#[derive(Clone, Debug)]
pub struct Moments {
    /// Number of samples folded in
    count: u64,
    /// Running mean
    mean: f64,
    /// Sum of squared deviations from the current mean
    m2: f64,
    /// Sum of cubed deviations from the current mean
    m3: f64,
    /// Sum of fourth-power deviations from the current mean
    m4: f64,
}

impl Default for Moments {
    fn default() -> Self {
        Self::new()
    }
}

impl Moments {
    /// Create a new empty accumulator
    pub fn new() -> Self {
        Self {
            count: 0,
            mean: 0.0,
            m2: 0.0,
            m3: 0.0,
            m4: 0.0,
        }
    }

    /// Fold a sample into the running state
    ///
    /// The update order is load-bearing: `m4` and `m3` are computed from
    /// the pre-update values of `m2` and `m3`. Reordering changes the
    /// numerical result.
    pub fn add(&mut self, x: f64) {
        let n = (self.count + 1) as f64;
        let delta = x - self.mean;
        let delta_n = delta / n;
        let delta_n_sq = delta_n * delta_n;
        let term1 = delta * delta_n * (n - 1.0);

        self.mean += delta_n;
        self.m4 += term1 * delta_n_sq * (n * n - 3.0 * n + 3.0) + 6.0 * delta_n_sq * self.m2
            - 4.0 * delta_n * self.m3;
        self.m3 += term1 * delta_n * (n - 2.0) - 3.0 * delta_n * self.m2;
        self.m2 += term1;
        self.count += 1;
    }

    /// Number of samples folded in
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Running mean (0.0 when empty)
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Sample variance (Bessel-corrected)
    ///
    /// Returns `m2 / (count - 1)` when more than one sample has been
    /// folded in, `0.0` otherwise. No clamping is applied: a negative or
    /// non-finite `m2` passes straight through.
    pub fn variance(&self) -> f64 {
        if self.count > 1 {
            self.m2 / (self.count - 1) as f64
        } else {
            0.0
        }
    }

    /// Sample standard deviation
    pub fn stddev(&self) -> f64 {
        math::sqrt(self.variance())
    }

    /// Sample skewness
    ///
    /// Normalized third moment, `(n-1)^1.5 / n * m3 / m2^1.5`. Returns
    /// `0.0` when fewer than two samples have been seen or when `m2` is
    /// exactly zero (all-equal input) — a deliberate guard beyond the
    /// literal recurrence, so degenerate input yields a sentinel rather
    /// than a 0/0 NaN. A NaN or negative `m2` still propagates.
    pub fn skewness(&self) -> f64 {
        if self.count < 2 || self.m2 == 0.0 {
            return 0.0;
        }
        let n = self.count as f64;
        let fac = math::powf(n - 1.0, 1.5) / n;
        fac * self.m3 / math::powf(self.m2, 1.5)
    }

    /// Sample excess kurtosis
    ///
    /// Normalized fourth moment, `(n-1) * m4 / m2^2 - 3`. Same degenerate
    /// guard as [`skewness`](Self::skewness).
    pub fn kurtosis(&self) -> f64 {
        if self.count < 2 || self.m2 == 0.0 {
            return 0.0;
        }
        let n = self.count as f64;
        (n - 1.0) * self.m4 / (self.m2 * self.m2) - 3.0
    }

    /// Raw second central moment sum, `Σ(xᵢ − mean)²`
    pub fn sum_squared_deviations(&self) -> f64 {
        self.m2
    }

    /// Raw third central moment sum, `Σ(xᵢ − mean)³`
    pub fn sum_cubed_deviations(&self) -> f64 {
        self.m3
    }

    /// Raw fourth central moment sum, `Σ(xᵢ − mean)⁴`
    pub fn sum_quartic_deviations(&self) -> f64 {
        self.m4
    }
}

impl StreamingStat for Moments {
    fn clear(&mut self) {
        *self = Self::new();
    }

    fn size_bytes(&self) -> usize {
        core::mem::size_of::<Self>()
    }

    fn count(&self) -> u64 {
        self.count
    }
}
