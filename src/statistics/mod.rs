//! Statistical summaries for streaming data
//!
//! This module provides accumulators that compute statistics over streams
//! in a single pass with constant memory.
//!
//! # Example
//!
//! ```
//! use momentflow::statistics::Moments;
//!
//! let mut moments = Moments::new();
//!
//! for value in [1.0, 2.0, 3.0, 4.0, 5.0] {
//!     moments.add(value);
//! }
//!
//! println!("Mean: {}", moments.mean());
//! println!("Variance: {}", moments.variance());
//! println!("Skewness: {}", moments.skewness());
//! println!("Kurtosis: {}", moments.kurtosis());
//! ```

mod moments;

#[cfg(feature = "quantiles")]
mod running;

pub use moments::Moments;

#[cfg(feature = "quantiles")]
#[cfg_attr(docsrs, doc(cfg(feature = "quantiles")))]
pub use running::RunningStats;
