//! Rich running statistics (moments, min/max, median)
//!
//! Combines the central-moment accumulator with extrema tracking and a
//! P² running median, mirroring the classic running-statistics workspace
//! layout (mean, M2..M4, min, max, n, plus a median estimator).

use crate::math;
use crate::quantiles::P2Quantile;
use crate::statistics::Moments;
use crate::traits::{SampleError, StreamingStat};

/// Rich running statistics accumulator
///
/// Tracks everything [`Moments`] does, plus minimum, maximum, root mean
/// square, and a P² estimate of the median — the "reference"
/// implementation that the leaner moment accumulator is cross-validated
/// against.
///
/// # Fallible updates
///
/// Unlike [`Moments::add`], [`add`](Self::add) returns a `Result`: the
/// embedded median estimator rejects samples it cannot classify (NaN, or
/// marker state corrupted by non-finite arithmetic). Extrema and moments
/// are updated *before* the median estimator runs, so a rejected sample
/// still advances the count and moment state — the error reports the
/// fault, it does not roll anything back.
///
/// NaN samples are deliberately not filtered; they propagate through the
/// moment state exactly as in [`Moments`].
///
/// # Example
///
/// ```
/// use momentflow::statistics::RunningStats;
///
/// let mut stats = RunningStats::new();
///
/// for value in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
///     stats.add(value).unwrap();
/// }
///
/// assert_eq!(stats.mean(), 5.0);
/// assert_eq!(stats.min(), Some(2.0));
/// assert_eq!(stats.max(), Some(9.0));
/// ```
#[derive(Clone, Debug)]
pub struct RunningStats {
    /// Central-moment state
    moments: Moments,
    /// Minimum value seen
    min: f64,
    /// Maximum value seen
    max: f64,
    /// Running median estimator
    median: P2Quantile,
}

impl Default for RunningStats {
    fn default() -> Self {
        Self::new()
    }
}

impl RunningStats {
    /// Create a new empty accumulator
    pub fn new() -> Self {
        Self {
            moments: Moments::new(),
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            median: P2Quantile::new(0.5),
        }
    }

    /// Fold a sample into the running state
    ///
    /// Extrema and moments are updated first; the median estimator's
    /// error, if any, is reported after the rest of the state has
    /// already absorbed the sample.
    pub fn add(&mut self, x: f64) -> Result<(), SampleError> {
        if x < self.min {
            self.min = x;
        }
        if x > self.max {
            self.max = x;
        }

        self.moments.add(x);
        self.median.add(x)
    }

    /// Number of samples folded in
    pub fn count(&self) -> u64 {
        self.moments.count()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.moments.is_empty()
    }

    /// Running mean (0.0 when empty)
    pub fn mean(&self) -> f64 {
        self.moments.mean()
    }

    /// Sample variance (Bessel-corrected)
    pub fn variance(&self) -> f64 {
        self.moments.variance()
    }

    /// Sample standard deviation
    pub fn stddev(&self) -> f64 {
        self.moments.stddev()
    }

    /// Sample skewness (0.0 sentinel for degenerate input)
    pub fn skewness(&self) -> f64 {
        self.moments.skewness()
    }

    /// Sample excess kurtosis (0.0 sentinel for degenerate input)
    pub fn kurtosis(&self) -> f64 {
        self.moments.kurtosis()
    }

    /// Root mean square of the samples
    pub fn rms(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        let mean = self.moments.mean();
        let n = self.count() as f64;
        math::sqrt(mean * mean + self.moments.sum_squared_deviations() / n)
    }

    /// Minimum value seen
    pub fn min(&self) -> Option<f64> {
        if self.is_empty() {
            None
        } else {
            Some(self.min)
        }
    }

    /// Maximum value seen
    pub fn max(&self) -> Option<f64> {
        if self.is_empty() {
            None
        } else {
            Some(self.max)
        }
    }

    /// P² estimate of the median
    pub fn median(&self) -> Option<f64> {
        self.median.quantile()
    }

    /// The embedded moment accumulator
    pub fn moments(&self) -> &Moments {
        &self.moments
    }

    /// The embedded median estimator, for diagnostic snapshots
    pub fn median_estimator(&self) -> &P2Quantile {
        &self.median
    }
}

impl StreamingStat for RunningStats {
    fn clear(&mut self) {
        *self = Self::new();
    }

    fn size_bytes(&self) -> usize {
        core::mem::size_of::<Self>()
    }

    fn count(&self) -> u64 {
        self.moments.count()
    }
}
