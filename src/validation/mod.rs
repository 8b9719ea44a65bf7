//! Cross-validation harness for the moment accumulator
//!
//! Feeds each sample to two implementations in lockstep: the lean
//! [`Moments`] baseline and the richer [`RunningStats`] reference (which
//! additionally tracks extrema and a P² median). The reference side can
//! fault on samples its quantile markers cannot classify; the fault is
//! delivered to an injected [`FaultObserver`] together with a snapshot of
//! both accumulators, and the observer's returned [`FaultSignal`] tells
//! the caller whether to keep feeding.
//!
//! # Example
//!
//! ```
//! use momentflow::validation::{CrossValidator, FaultReport, FaultSignal};
//!
//! let mut cv = CrossValidator::new(|report: &FaultReport<'_>| {
//!     eprintln!("fault: {}", report.error);
//!     FaultSignal::Stop
//! });
//!
//! for x in [1.0, 2.0, 3.0] {
//!     assert_eq!(cv.add(x), FaultSignal::Continue);
//! }
//!
//! assert_eq!(cv.baseline().mean(), 2.0);
//! ```

use crate::statistics::{Moments, RunningStats};
use crate::traits::SampleError;

/// Signal returned by a fault observer to the driving loop
///
/// Replaces a process-wide abort flag: the observer states its verdict,
/// the caller of [`CrossValidator::add`] decides what to do with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultSignal {
    /// Keep feeding samples
    Continue,
    /// Stop the sample source
    Stop,
}

/// Snapshot handed to a fault observer when the reference side faults
///
/// Borrows both accumulators directly instead of going through a
/// process-wide "active state" pointer; the driver passes the context
/// explicitly at the fault site.
#[derive(Debug)]
pub struct FaultReport<'a> {
    /// The sample that triggered the fault
    pub value: f64,
    /// The reference-side error
    pub error: SampleError,
    /// The reference accumulator, post-update
    pub reference: &'a RunningStats,
    /// The baseline moment accumulator, post-update
    pub baseline: &'a Moments,
}

/// Capability invoked by the driver when the reference side faults
///
/// Observers read the report and answer with a [`FaultSignal`]; they do
/// not perform recovery and cannot alter the accumulator state.
pub trait FaultObserver {
    /// Handle a reference-side fault
    fn on_fault(&mut self, report: &FaultReport<'_>) -> FaultSignal;
}

impl<F> FaultObserver for F
where
    F: FnMut(&FaultReport<'_>) -> FaultSignal,
{
    fn on_fault(&mut self, report: &FaultReport<'_>) -> FaultSignal {
        self(report)
    }
}

/// Observer that prints a diagnostic snapshot to stderr and stops the run
///
/// The printed state mirrors the reference workspace layout: extrema,
/// mean, the central moment sums, the sample count, and the five P²
/// markers of the median estimator.
#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
#[derive(Debug, Default, Clone)]
pub struct StderrDiagnostics;

#[cfg(feature = "std")]
impl FaultObserver for StderrDiagnostics {
    fn on_fault(&mut self, report: &FaultReport<'_>) -> FaultSignal {
        let r = report.reference;
        let m = r.moments();
        eprintln!("sample fault: {} (x = {:.8e})", report.error, report.value);
        eprintln!(
            "reference: min={:?}, max={:?}, mean={:.6e}, m2={:.6e}, m3={:.6e}, m4={:.6e}, n={}",
            r.min(),
            r.max(),
            m.mean(),
            m.sum_squared_deviations(),
            m.sum_cubed_deviations(),
            m.sum_quartic_deviations(),
            r.count(),
        );

        let med = r.median_estimator();
        let heights = med.marker_heights();
        let positions = med.marker_positions();
        let desired = med.desired_positions();
        eprintln!("median markers (p = {:.2}):", med.probability());
        for i in 0..5 {
            eprintln!(
                "[{}] q={:.6e}, npos={}, np={:.6e}",
                i, heights[i], positions[i], desired[i]
            );
        }

        let b = report.baseline;
        eprintln!(
            "baseline: mean={:.6e}, variance={:.6e}, n={}",
            b.mean(),
            b.variance(),
            b.count(),
        );

        FaultSignal::Stop
    }
}

/// Driver that feeds two accumulator implementations in lockstep
///
/// Owns a [`Moments`] baseline, a [`RunningStats`] reference, and the
/// fault observer. [`add`](Self::add) folds each sample into both; when
/// the reference faults, the observer is invoked with a [`FaultReport`]
/// and its signal is returned to the caller, who decides whether the
/// sample source keeps going. The baseline is never affected by
/// reference-side faults.
///
/// # Example
///
/// ```
/// use momentflow::validation::{CrossValidator, FaultSignal, StderrDiagnostics};
///
/// let mut cv = CrossValidator::new(StderrDiagnostics);
///
/// let mut next = f64::INFINITY;
/// let mut fed = 0;
/// for _ in 0..10 {
///     fed += 1;
///     if cv.add(next) == FaultSignal::Stop {
///         break;
///     }
///     next = -next;
/// }
///
/// assert!(fed <= 10);
/// ```
#[derive(Debug)]
pub struct CrossValidator<O> {
    baseline: Moments,
    reference: RunningStats,
    observer: O,
}

impl<O: FaultObserver> CrossValidator<O> {
    /// Create a validator with empty accumulators and the given observer
    pub fn new(observer: O) -> Self {
        Self {
            baseline: Moments::new(),
            reference: RunningStats::new(),
            observer,
        }
    }

    /// Feed a sample to both implementations
    ///
    /// Returns [`FaultSignal::Continue`] when both sides accepted the
    /// sample, otherwise whatever the observer answered.
    pub fn add(&mut self, x: f64) -> FaultSignal {
        self.baseline.add(x);
        match self.reference.add(x) {
            Ok(()) => FaultSignal::Continue,
            Err(error) => {
                let report = FaultReport {
                    value: x,
                    error,
                    reference: &self.reference,
                    baseline: &self.baseline,
                };
                self.observer.on_fault(&report)
            }
        }
    }

    /// The baseline moment accumulator
    pub fn baseline(&self) -> &Moments {
        &self.baseline
    }

    /// The reference accumulator
    pub fn reference(&self) -> &RunningStats {
        &self.reference
    }

    /// Consume the validator, returning both accumulators and the observer
    pub fn into_parts(self) -> (Moments, RunningStats, O) {
        (self.baseline, self.reference, self.observer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Observer that records every fault and answers a fixed signal
    struct Recording {
        faults: Vec<(f64, SampleError)>,
        answer: FaultSignal,
    }

    impl Recording {
        fn new(answer: FaultSignal) -> Self {
            Self {
                faults: Vec::new(),
                answer,
            }
        }
    }

    impl FaultObserver for Recording {
        fn on_fault(&mut self, report: &FaultReport<'_>) -> FaultSignal {
            self.faults.push((report.value, report.error));
            self.answer
        }
    }

    #[test]
    fn test_finite_samples_never_fault() {
        let mut cv = CrossValidator::new(Recording::new(FaultSignal::Stop));

        for x in [2.0, 4.0, 6.0, 8.0, 10.0, 12.0] {
            assert_eq!(cv.add(x), FaultSignal::Continue);
        }

        assert_eq!(cv.baseline().count(), 6);
        assert_eq!(cv.reference().count(), 6);
        assert_eq!(cv.baseline().mean(), cv.reference().mean());
        assert_eq!(cv.baseline().variance(), cv.reference().variance());

        let (_, _, observer) = cv.into_parts();
        assert!(observer.faults.is_empty());
    }

    #[test]
    fn test_alternating_infinities_reach_observer() {
        let mut cv = CrossValidator::new(Recording::new(FaultSignal::Stop));

        let mut next = f64::INFINITY;
        let mut stopped_at = None;
        for i in 0..10 {
            if cv.add(next) == FaultSignal::Stop {
                stopped_at = Some(i);
                break;
            }
            next = -next;
        }

        let stopped_at = stopped_at.expect("alternating ±inf run must fault within 10 samples");

        // Baseline keeps absorbing whatever arrives, no guarding
        assert!(cv.baseline().mean().is_nan());
        assert_eq!(cv.baseline().count(), stopped_at as u64 + 1);

        let (_, _, observer) = cv.into_parts();
        assert_eq!(observer.faults.len(), 1);
    }

    #[test]
    fn test_observer_may_elect_to_continue() {
        let mut cv = CrossValidator::new(Recording::new(FaultSignal::Continue));

        for x in [1.0, 2.0, 3.0, 4.0, 5.0] {
            assert_eq!(cv.add(x), FaultSignal::Continue);
        }

        // NaN faults the reference median, but the observer waves it on
        assert_eq!(cv.add(f64::NAN), FaultSignal::Continue);
        assert_eq!(cv.add(7.0), FaultSignal::Continue);

        let (baseline, _, observer) = cv.into_parts();
        assert_eq!(observer.faults.len(), 1);
        assert_eq!(baseline.count(), 7);
    }

    #[test]
    fn test_closure_observer() {
        let mut cv = CrossValidator::new(|_report: &FaultReport<'_>| FaultSignal::Stop);

        for x in [1.0, 2.0, 3.0, 4.0, 5.0] {
            assert_eq!(cv.add(x), FaultSignal::Continue);
        }
        assert_eq!(cv.add(f64::NAN), FaultSignal::Stop);
    }
}
