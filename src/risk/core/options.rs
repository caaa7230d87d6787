//! Rolling risk options — execution strategy, verification and run
//! configuration.
//!
//! Purpose
//! -------
//! Collect the configuration knobs of a rolling risk run in one place: the
//! window geometry, the hyperparameter grid, how windows are executed, and
//! whether (and how strictly) the optimized output is cross-checked against
//! the reference arithmetic.
//!
//! Key behaviors
//! -------------
//! - [`ExecutionStrategy`] selects one of three execution paths that share a
//!   single algorithm core: the allocating reference path, the sequential
//!   preallocated-workspace path, and the parallel path.
//! - [`VerifyOptions`] configures the equivalence check (sample size and
//!   absolute/relative tolerances).
//! - [`RollingOptions`] bundles shape, grid, strategy and optional
//!   verification.
//!
//! Invariants & assumptions
//! ------------------------
//! - Components are validated by their own constructors (`RiskShape::new`,
//!   `HyperGrid::new`, `VerifyOptions::new`, `ExecutionStrategy::parallel`);
//!   [`RollingOptions::new`] performs no extra cross-field checks.
//! - Strategies differ in allocation and scheduling only. `Preallocated` and
//!   `Parallel` are bit-identical to each other; `Reference` agrees with them
//!   within the verifier tolerances.
//!
//! Testing notes
//! -------------
//! - Unit tests cover strategy parsing, worker resolution, verifier option
//!   validation and defaults.
use crate::risk::{
    core::{
        grid::HyperGrid,
        shape::RiskShape,
        validation::{validate_tolerance, validate_workers},
    },
    errors::{RiskError, RiskResult},
};
use std::str::FromStr;

/// How the per-window unit of work is executed.
///
/// - `Reference`: allocate fresh buffers for every window and use the
///   straightforward solver (`ndarray` products + `nalgebra` Cholesky).
/// - `Preallocated`: one [`WindowWorkspace`](crate::risk::core::workspace::WindowWorkspace)
///   reused across all windows, in start order.
/// - `Parallel { workers }`: windows split across a dedicated worker pool,
///   one workspace per task. `None` uses the number of logical CPUs.
///
/// Parsing accepts case-insensitive `"reference"`/`"baseline"`,
/// `"preallocated"`/`"sequential"` and `"parallel"` (with default workers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionStrategy {
    Reference,
    #[default]
    Preallocated,
    Parallel {
        workers: Option<usize>,
    },
}

impl ExecutionStrategy {
    /// Parallel strategy with an explicit, validated worker count.
    ///
    /// # Errors
    /// [`RiskError::InvalidWorkerCount`] if `workers == 0`.
    pub fn parallel(workers: usize) -> RiskResult<Self> {
        validate_workers(workers)?;
        Ok(ExecutionStrategy::Parallel { workers: Some(workers) })
    }

    /// Short lowercase name used in log lines.
    pub fn name(&self) -> &'static str {
        match self {
            ExecutionStrategy::Reference => "reference",
            ExecutionStrategy::Preallocated => "preallocated",
            ExecutionStrategy::Parallel { .. } => "parallel",
        }
    }
}

impl FromStr for ExecutionStrategy {
    type Err = RiskError;

    /// Parse a strategy name (case-insensitive).
    ///
    /// Any other value returns `RiskError::InvalidStrategy`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reference" | "baseline" => Ok(ExecutionStrategy::Reference),
            "preallocated" | "sequential" => Ok(ExecutionStrategy::Preallocated),
            "parallel" => Ok(ExecutionStrategy::Parallel { workers: None }),
            _ => Err(RiskError::InvalidStrategy {
                name: s.to_string(),
                reason: "Valid options are case insensitive 'reference', 'preallocated' or 'parallel'.",
            }),
        }
    }
}

/// Default number of leading windows recomputed by the verifier.
pub const DEFAULT_VERIFY_WINDOWS: usize = 10;
/// Default absolute tolerance of the verifier.
pub const DEFAULT_ABS_TOL: f64 = 1e-10;
/// Default relative tolerance of the verifier.
pub const DEFAULT_REL_TOL: f64 = 1e-8;

/// VerifyOptions — how the equivalence check samples and compares.
///
/// Fields
/// ------
/// - `sample_windows`: `usize`
///   Number of leading windows to recompute (`min(sample_windows,
///   n_windows)` are actually checked).
/// - `abs_tol`, `rel_tol`: `f64`
///   Two finite values `a`, `b` agree when
///   `|a − b| ≤ abs_tol + rel_tol · max(|a|, |b|)`. Setting both to `0.0`
///   demands exact equality.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerifyOptions {
    pub sample_windows: usize,
    pub abs_tol: f64,
    pub rel_tol: f64,
}

impl VerifyOptions {
    /// Construct validated verifier options.
    ///
    /// # Errors
    /// [`RiskError::InvalidTolerance`] if either tolerance is negative or
    /// non-finite.
    pub fn new(sample_windows: usize, abs_tol: f64, rel_tol: f64) -> RiskResult<Self> {
        validate_tolerance(abs_tol)?;
        validate_tolerance(rel_tol)?;
        Ok(VerifyOptions { sample_windows, abs_tol, rel_tol })
    }

    /// Exact comparison over the default sample.
    pub fn exact() -> Self {
        VerifyOptions { sample_windows: DEFAULT_VERIFY_WINDOWS, abs_tol: 0.0, rel_tol: 0.0 }
    }

    /// `true` when `a` and `b` agree under these tolerances. Both values are
    /// expected to be finite.
    #[inline]
    pub fn agrees(&self, a: f64, b: f64) -> bool {
        (a - b).abs() <= self.abs_tol + self.rel_tol * a.abs().max(b.abs())
    }
}

impl Default for VerifyOptions {
    fn default() -> Self {
        VerifyOptions {
            sample_windows: DEFAULT_VERIFY_WINDOWS,
            abs_tol: DEFAULT_ABS_TOL,
            rel_tol: DEFAULT_REL_TOL,
        }
    }
}

/// RollingOptions — full configuration of a rolling risk run.
///
/// Fields
/// ------
/// - `shape`: [`RiskShape`] — window length, horizon and degree.
/// - `grid`: [`HyperGrid`] — `(mu, alpha)` points scanned per fit.
/// - `strategy`: [`ExecutionStrategy`] — execution path.
/// - `verify`: `Option<VerifyOptions>` — when `Some`, the run's output is
///   cross-checked against the reference path and the report is returned
///   alongside the series.
#[derive(Debug, Clone, PartialEq)]
pub struct RollingOptions {
    pub shape: RiskShape,
    pub grid: HyperGrid,
    pub strategy: ExecutionStrategy,
    pub verify: Option<VerifyOptions>,
}

impl RollingOptions {
    /// Bundle already-validated components. Never fails.
    pub fn new(
        shape: RiskShape, grid: HyperGrid, strategy: ExecutionStrategy,
        verify: Option<VerifyOptions>,
    ) -> RollingOptions {
        RollingOptions { shape, grid, strategy, verify }
    }

    /// Same options with a different execution strategy.
    pub fn with_strategy(mut self, strategy: ExecutionStrategy) -> RollingOptions {
        self.strategy = strategy;
        self
    }

    /// Same options with verification enabled using `verify`.
    pub fn with_verification(mut self, verify: VerifyOptions) -> RollingOptions {
        self.verify = Some(verify);
        self
    }
}
