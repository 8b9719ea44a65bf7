//! # Momentflow
//!
//! Single-pass running estimates of central moments for Rust.
//!
//! Momentflow maintains mean, variance, skewness, and kurtosis of a stream
//! of `f64` samples in O(1) time and O(1) space per sample, without storing
//! the sample history. It also ships the surrounding cross-validation
//! tooling: a P² quantile estimator, a richer reference accumulator that
//! additionally tracks min/max and a running median, and a driver that
//! feeds both implementations in lockstep and reports faults to an
//! injected observer.
//!
//! ## Quick Start
//!
//! ```rust
//! use momentflow::prelude::*;
//!
//! let mut moments = Moments::new();
//! for value in [2.0, 4.0, 6.0] {
//!     moments.add(value);
//! }
//!
//! assert_eq!(moments.count(), 3);
//! assert_eq!(moments.mean(), 4.0);
//! assert_eq!(moments.variance(), 4.0);
//! ```
//!
//! ## Non-finite inputs
//!
//! [`Moments`](statistics::Moments) performs no input guarding: infinities
//! and NaNs flow through the update recurrence and poison the state
//! permanently, by design. The richer [`RunningStats`](statistics::RunningStats)
//! reports a [`SampleError`](traits::SampleError) when its embedded median
//! estimator can no longer classify a sample, which is exactly the failure
//! mode the [`validation`] harness exists to observe:
//!
//! ```rust
//! use momentflow::prelude::*;
//!
//! let mut cv = CrossValidator::new(|report: &FaultReport<'_>| {
//!     println!("fault on x = {:e}: {}", report.value, report.error);
//!     FaultSignal::Stop
//! });
//!
//! let mut next = f64::INFINITY;
//! for _ in 0..10 {
//!     if cv.add(next) == FaultSignal::Stop {
//!         break;
//!     }
//!     next = -next;
//! }
//! ```
//!
//! ## Feature Flags
//!
//! Algorithm families (pick what you need):
//! - `quantiles` (default): P² quantile estimator, `RunningStats`
//! - `validation` (default): cross-validation driver, implies `quantiles`
//!
//! Platform features:
//! - `std` (default): standard library support; without it, math functions
//!   come from `libm` and the printing fault observer is unavailable

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Core traits always available
pub mod traits;

pub mod math;
pub mod statistics;

#[cfg(feature = "quantiles")]
#[cfg_attr(docsrs, doc(cfg(feature = "quantiles")))]
pub mod quantiles;

#[cfg(feature = "validation")]
#[cfg_attr(docsrs, doc(cfg(feature = "validation")))]
pub mod validation;

pub mod prelude {
    pub use crate::traits::*;

    pub use crate::statistics::Moments;

    #[cfg(feature = "quantiles")]
    pub use crate::quantiles::P2Quantile;

    #[cfg(feature = "quantiles")]
    pub use crate::statistics::RunningStats;

    #[cfg(feature = "validation")]
    pub use crate::validation::{CrossValidator, FaultObserver, FaultReport, FaultSignal};
}

pub use statistics::Moments;

#[cfg(feature = "quantiles")]
pub use quantiles::P2Quantile;

#[cfg(feature = "quantiles")]
pub use statistics::RunningStats;

#[cfg(feature = "validation")]
pub use validation::CrossValidator;
