//! Equivalence verifier — cross-check optimized output against the
//! reference path.
//!
//! Purpose
//! -------
//! Detect optimization bugs. The leading windows of an optimized run are
//! recomputed with the allocating reference arithmetic and compared slot by
//! slot. Disagreement is not a data problem; it means an execution path is
//! wrong, so it is reported as a typed [`EquivalenceReport`] the caller can
//! act on.
//!
//! Key behaviors
//! -------------
//! - Checks `min(sample_windows, n_windows)` leading windows, in order:
//!   1. series length against the expected window count,
//!   2. `NaN` pattern (a value must be non-finite on both paths or on
//!      neither),
//!   3. finite values: `|a − b| ≤ abs_tol + rel_tol · max(|a|, |b|)`.
//! - Stops at the first mismatch and records it; `max_abs_diff` covers the
//!   windows compared up to that point.
//!
//! Invariants & assumptions
//! ------------------------
//! - Never modifies the optimized series.
//! - Verification failure is a report, not an error. `RiskError` is returned
//!   only when the reference recomputation itself cannot run.
//!
//! Testing notes
//! -------------
//! - Unit tests cover a passing run, injected length, NaN-pattern and value
//!   mismatches, exact-equality options and sample clamping.
use crate::risk::{
    core::{data::RiskData, grid::HyperGrid, options::VerifyOptions, shape::RiskShape},
    errors::RiskResult,
    models::rolling::{RiskSeries, run_reference_prefix},
};

/// First disagreement found by [`verify_equivalence`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EquivalenceMismatch {
    /// Optimized series length differs from the expected window count.
    LengthMismatch { expected: usize, actual: usize },
    /// One path produced a non-finite value where the other did not.
    NanPatternMismatch { index: usize, optimized: f64, reference: f64 },
    /// Both finite, but further apart than the tolerances allow.
    ToleranceExceeded { index: usize, optimized: f64, reference: f64, diff: f64 },
}

impl std::fmt::Display for EquivalenceMismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EquivalenceMismatch::LengthMismatch { expected, actual } => {
                write!(f, "series length {actual} differs from expected {expected}")
            }
            EquivalenceMismatch::NanPatternMismatch { index, optimized, reference } => {
                write!(
                    f,
                    "window {index}: NaN pattern differs (optimized {optimized}, reference {reference})"
                )
            }
            EquivalenceMismatch::ToleranceExceeded { index, optimized, reference, diff } => {
                write!(
                    f,
                    "window {index}: optimized {optimized} vs reference {reference} (|diff| = {diff:e})"
                )
            }
        }
    }
}

/// EquivalenceReport — outcome of [`verify_equivalence`].
///
/// Fields
/// ------
/// - `windows_checked`: `usize` — windows compared before stopping.
/// - `max_abs_diff`: `f64` — largest `|a − b|` over compared finite pairs
///   (`0.0` if none).
/// - `mismatch`: `Option<EquivalenceMismatch>` — first disagreement, if any.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquivalenceReport {
    pub windows_checked: usize,
    pub max_abs_diff: f64,
    pub mismatch: Option<EquivalenceMismatch>,
}

impl EquivalenceReport {
    /// `true` when no mismatch was found.
    pub fn passed(&self) -> bool {
        self.mismatch.is_none()
    }
}

/// Recompute the leading windows with the reference path and compare them
/// with `optimized`.
///
/// Parameters
/// ----------
/// - `data`, `shape`, `grid`: the inputs `optimized` was computed from.
/// - `optimized`: `&RiskSeries` — output of any execution strategy.
/// - `opts`: `&VerifyOptions` — sample size and tolerances.
///
/// Returns
/// -------
/// `RiskResult<EquivalenceReport>`
///
/// Errors
/// ------
/// - Propagates errors from the reference recomputation (none for validated
///   inputs).
pub fn verify_equivalence(
    data: &RiskData, shape: &RiskShape, grid: &HyperGrid, optimized: &RiskSeries,
    opts: &VerifyOptions,
) -> RiskResult<EquivalenceReport> {
    let expected = shape.n_windows(data.len());
    if optimized.len() != expected {
        return Ok(EquivalenceReport {
            windows_checked: 0,
            max_abs_diff: 0.0,
            mismatch: Some(EquivalenceMismatch::LengthMismatch {
                expected,
                actual: optimized.len(),
            }),
        });
    }

    let reference = run_reference_prefix(data, shape, grid, opts.sample_windows)?;
    Ok(compare_prefix(optimized, &reference, opts))
}

/// Compare the first `reference.len()` values of `optimized` with
/// `reference`. `optimized` must be at least as long.
fn compare_prefix(
    optimized: &RiskSeries, reference: &RiskSeries, opts: &VerifyOptions,
) -> EquivalenceReport {
    let mut max_abs_diff = 0.0_f64;
    let pairs = optimized.values().into_iter().zip(reference.values()).enumerate();

    for (index, (&a, &b)) in pairs {
        let mismatch = if a.is_finite() != b.is_finite() {
            Some(EquivalenceMismatch::NanPatternMismatch { index, optimized: a, reference: b })
        } else if a.is_finite() {
            let diff = (a - b).abs();
            max_abs_diff = max_abs_diff.max(diff);
            (!opts.agrees(a, b)).then_some(EquivalenceMismatch::ToleranceExceeded {
                index,
                optimized: a,
                reference: b,
                diff,
            })
        } else {
            None
        };

        if mismatch.is_some() {
            return EquivalenceReport { windows_checked: index + 1, max_abs_diff, mismatch };
        }
    }

    EquivalenceReport { windows_checked: reference.len(), max_abs_diff, mismatch: None }
}
