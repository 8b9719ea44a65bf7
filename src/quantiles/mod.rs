//! Streaming quantile estimation
//!
//! This module provides the P² (piecewise-parabolic) algorithm for
//! estimating a single quantile of a stream in constant memory.
//!
//! # Example
//!
//! ```
//! use momentflow::quantiles::P2Quantile;
//!
//! let mut median = P2Quantile::new(0.5);
//!
//! for value in [5.0, 1.0, 4.0, 2.0, 3.0, 6.0, 0.0] {
//!     median.add(value).unwrap();
//! }
//!
//! println!("Median estimate: {:?}", median.quantile());
//! ```

mod p2;

pub use p2::P2Quantile;
