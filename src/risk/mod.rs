//! risk — rolling systemic-risk estimation over sliding windows.
//!
//! Purpose
//! -------
//! Estimate a time-varying risk series from a reference return series and a
//! set of factor return series. Every window of length `W` is summarized by
//! how well each factor, expanded in a polynomial basis and fitted by ridge
//! regression, explains the reference returns in-sample; the per-factor
//! errors are averaged into one value per window.
//!
//! Key behaviors
//! -------------
//! - [`core`] holds validated inputs ([`RiskData`]), geometry
//!   ([`RiskShape`]), the `(mu, alpha)` grid ([`HyperGrid`]), options and the
//!   per-context [`WindowWorkspace`].
//! - [`models`] holds the solver, the sequential / reference / parallel
//!   execution paths, the equivalence verifier and [`RollingRiskModel`].
//! - [`errors`] defines [`RiskError`] / [`RiskResult`] for configuration and
//!   structural problems.
//!
//! Invariants & assumptions
//! ------------------------
//! - Output length is `max(0, N − W − H + 1)`; slot `i` is window start `i`.
//! - Switching between the preallocated and parallel strategies changes
//!   wall-clock time only, never numeric output.
//! - Only configuration mistakes are errors. `NaN` marks windows where no
//!   factor produced a finite fit.
//!
//! Conventions
//! -----------
//! - Indexing is 0-based; rows are time, columns are factors.
//! - Logging goes through the `log` facade and only from
//!   [`RollingRiskModel`].
//!
//! Downstream usage
//! ----------------
//! - Most callers need only the [`prelude`]: build [`RiskData`] and
//!   [`RollingOptions`], then call [`RollingRiskModel::estimate`].
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each submodule; `tests/` exercises the full
//!   pipeline with seeded random inputs.

pub mod core;
pub mod errors;
pub mod models;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::core::{
    ExecutionStrategy, GridPoint, HyperGrid, RiskData, RiskShape, RollingOptions, VerifyOptions,
    WindowWorkspace,
};
pub use self::errors::{RiskError, RiskResult};
pub use self::models::{
    EquivalenceMismatch, EquivalenceReport, GridFit, RiskSeries, RollingOutcome,
    RollingRiskModel, run_parallel, run_reference, run_sequential, verify_equivalence,
};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rolling_risk::risk::prelude::*;
//
// to import the everyday risk surface in a single line.

pub mod prelude {
    pub use super::core::prelude::*;
    pub use super::errors::{RiskError, RiskResult};
    pub use super::models::{
        EquivalenceMismatch, EquivalenceReport, RiskSeries, RollingOutcome, RollingRiskModel,
    };
}
