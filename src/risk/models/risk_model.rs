//! RollingRiskModel — options-driven entry point for rolling risk runs.
//!
//! Purpose
//! -------
//! Tie the execution paths together behind one call: pick the strategy from
//! [`RollingOptions`], produce the [`RiskSeries`], optionally verify it
//! against the reference path, and log a short run summary.
//!
//! Key behaviors
//! -------------
//! - [`RollingRiskModel::estimate`] dispatches on [`ExecutionStrategy`]:
//!   - `Reference` → [`run_reference`],
//!   - `Preallocated` → [`run_sequential`],
//!   - `Parallel { workers }` → [`run_parallel`].
//! - With `verify: Some(opts)` the series is checked with
//!   [`verify_equivalence`]; the report travels next to the series in
//!   [`RollingOutcome`]. A failed check is logged at `warn` level and never
//!   withholds or alters the series.
//!
//! Conventions
//! -----------
//! - This is the only layer that logs (via the `log` facade); the numeric
//!   kernels below stay silent. Install any `log` backend to see output.
//! - An empty series (window plus horizon longer than the data) is a normal
//!   outcome and is logged at `debug` level only.
use crate::risk::{
    core::{
        data::RiskData,
        options::{ExecutionStrategy, RollingOptions},
    },
    errors::RiskResult,
    models::{
        rolling::{RiskSeries, run_reference, run_sequential},
        scheduler::{resolve_workers, run_parallel},
        verifier::{EquivalenceReport, verify_equivalence},
    },
};
use log::{debug, info, warn};

/// RollingOutcome — series plus optional verification report.
#[derive(Debug, Clone, PartialEq)]
pub struct RollingOutcome {
    pub series: RiskSeries,
    pub verification: Option<EquivalenceReport>,
}

impl RollingOutcome {
    /// `false` only when verification ran and found a mismatch.
    pub fn is_verified_or_unchecked(&self) -> bool {
        self.verification.as_ref().map_or(true, EquivalenceReport::passed)
    }
}

/// RollingRiskModel — configured rolling estimator.
#[derive(Debug, Clone, PartialEq)]
pub struct RollingRiskModel {
    options: RollingOptions,
}

impl RollingRiskModel {
    pub fn new(options: RollingOptions) -> Self {
        RollingRiskModel { options }
    }

    pub fn options(&self) -> &RollingOptions {
        &self.options
    }

    /// Compute the rolling risk series for `data`.
    ///
    /// Parameters
    /// ----------
    /// - `data`: `&RiskData` — validated reference series and factors.
    ///
    /// Returns
    /// -------
    /// `RiskResult<RollingOutcome>` whose series has length
    /// `max(0, N − W − H + 1)`.
    ///
    /// Errors
    /// ------
    /// - `RiskError::InvalidWorkerCount` for `Parallel { workers: Some(0) }`.
    /// - `RiskError::ThreadPoolBuild` if the worker pool cannot be created.
    ///
    /// Notes
    /// -----
    /// - A failed verification is *not* an error: inspect
    ///   `outcome.verification`.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use rolling_risk::risk::prelude::*;
    /// # use ndarray::{Array1, Array2};
    /// let reference = Array1::from_iter((0..40).map(|i| (i as f64 * 0.37).sin()));
    /// let factors = Array2::from_shape_fn((40, 2), |(i, j)| (i as f64 * (0.21 + j as f64)).cos());
    /// let data = RiskData::new(reference, factors).unwrap();
    /// let options = RollingOptions::new(
    ///     RiskShape::new(20, 5, 2).unwrap(),
    ///     HyperGrid::new([(0.0, 0.01), (0.1, 0.1)]).unwrap(),
    ///     ExecutionStrategy::Preallocated,
    ///     Some(VerifyOptions::default()),
    /// );
    /// let outcome = RollingRiskModel::new(options).estimate(&data).unwrap();
    /// assert_eq!(outcome.series.len(), 16);
    /// assert!(outcome.verification.unwrap().passed());
    /// ```
    pub fn estimate(&self, data: &RiskData) -> RiskResult<RollingOutcome> {
        let RollingOptions { shape, grid, strategy, verify } = &self.options;
        let n_windows = shape.n_windows(data.len());
        debug!(
            "Rolling run: {} observations, {} factors, {} windows (W = {}, H = {}, D = {}), {} grid points",
            data.len(),
            data.n_factors(),
            n_windows,
            shape.window_len,
            shape.horizon,
            shape.degree,
            grid.len()
        );

        let series = match strategy {
            ExecutionStrategy::Reference => run_reference(data, shape, grid)?,
            ExecutionStrategy::Preallocated => run_sequential(data, shape, grid)?,
            ExecutionStrategy::Parallel { workers } => {
                let workers = resolve_workers(*workers)?;
                debug!("Using {} worker threads", workers);
                run_parallel(data, shape, grid, Some(workers))?
            }
        };

        if series.is_empty() {
            debug!(
                "No valid window: window length {} plus horizon {} exceeds {} observations",
                shape.window_len,
                shape.horizon,
                data.len()
            );
        }

        let verification = match verify {
            Some(opts) => {
                let report = verify_equivalence(data, shape, grid, &series, opts)?;
                match report.mismatch {
                    Some(mismatch) => warn!(
                        "Equivalence check failed for {} strategy after {} windows: {}",
                        strategy.name(),
                        report.windows_checked,
                        mismatch
                    ),
                    None => debug!(
                        "Equivalence check passed on {} windows (max |diff| = {:e})",
                        report.windows_checked, report.max_abs_diff
                    ),
                }
                Some(report)
            }
            None => None,
        };

        info!(
            "Rolling risk ({}): {} windows, {} valid",
            strategy.name(),
            series.len(),
            series.valid_count()
        );

        Ok(RollingOutcome { series, verification })
    }
}
