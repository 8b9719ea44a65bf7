//! Core traits and error types for streaming accumulators
//!
//! All accumulators implement the base [`StreamingStat`] trait. Fallible
//! update paths report [`SampleError`].

use core::fmt::Debug;

/// Error raised when an accumulator cannot fold a sample into its state
///
/// Only the quantile-tracking accumulators can fail: the P² estimator
/// places each sample into one of four marker cells, and a sample that
/// compares unordered against every marker (a NaN input, or markers that
/// non-finite arithmetic has already corrupted) fits none of them. The
/// plain moment accumulator never fails.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SampleError {
    /// Sample fits no marker cell of the quantile estimator
    Unclassifiable {
        /// The offending sample value
        value: f64,
    },
}

impl core::fmt::Display for SampleError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SampleError::Unclassifiable { value } => {
                write!(f, "invalid input argument x = {:e}: no marker cell matches", value)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SampleError {}

/// Core trait for all streaming accumulators
pub trait StreamingStat: Clone + Debug {
    /// Reset accumulator to its empty state
    fn clear(&mut self);

    /// Memory usage in bytes
    fn size_bytes(&self) -> usize;

    /// Number of samples folded in
    fn count(&self) -> u64;

    /// Check if accumulator is empty
    fn is_empty(&self) -> bool {
        self.count() == 0
    }
}
