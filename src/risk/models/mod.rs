//! models — execution paths of the rolling risk estimator.
//!
//! Purpose
//! -------
//! Implement the per-window computation once and expose it through three
//! execution paths plus a verifier that cross-checks them.
//!
//! Key behaviors
//! -------------
//! - [`solver`]: minimum in-sample RMSE over the `(mu, alpha)` grid, in an
//!   allocation-free form ([`scan_grid`]) and an allocating reference form
//!   ([`scan_grid_reference`]).
//! - [`rolling`]: window loop and [`RiskSeries`]; sequential
//!   ([`run_sequential`]) and reference ([`run_reference`]) runs.
//! - [`scheduler`]: [`run_parallel`] on a dedicated `rayon` pool.
//! - [`verifier`]: [`verify_equivalence`] and its typed report.
//! - [`risk_model`]: [`RollingRiskModel`], the options-driven entry point.
//!
//! Invariants & assumptions
//! ------------------------
//! - The sequential and parallel paths are bit-identical for any worker
//!   count; the reference path agrees with them within the verifier
//!   tolerances.
//! - Data-quality problems never raise: degenerate windows and infeasible
//!   grid points become `NaN`, too-short data becomes an empty series.

pub mod risk_model;
pub mod rolling;
pub mod scheduler;
pub mod solver;
pub mod verifier;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::risk_model::{RollingOutcome, RollingRiskModel};
pub use self::rolling::{
    RiskSeries, assess_window, assess_window_reference, run_reference, run_sequential,
    run_sequential_with,
};
pub use self::scheduler::{chunk_len, resolve_workers, run_parallel};
pub use self::solver::{GridFit, scan_grid, scan_grid_reference};
pub use self::verifier::{EquivalenceMismatch, EquivalenceReport, verify_equivalence};
