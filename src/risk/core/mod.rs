//! core — shared data, configuration and scratch types for rolling risk runs.
//!
//! Purpose
//! -------
//! Collect the structural building blocks of the rolling estimator: the
//! validated input container, window geometry, the hyperparameter grid,
//! execution and verification options, and the per-context workspace. The
//! model layer (`risk::models`) builds every execution path on top of these.
//!
//! Key behaviors
//! -------------
//! - [`RiskData`] validates the reference series and factor matrix and hands
//!   out zero-copy window views.
//! - [`RiskShape`] carries `(W, H, D)` and derives the window count
//!   `max(0, N − W − H + 1)`.
//! - [`HyperGrid`] / [`GridPoint`] hold the `(mu, alpha)` scan set.
//! - [`ExecutionStrategy`], [`VerifyOptions`] and [`RollingOptions`] describe
//!   how a run is executed and checked.
//! - [`WindowWorkspace`] owns the scratch buffers of one execution context.
//!
//! Invariants & assumptions
//! ------------------------
//! - Configuration is validated at construction; downstream code assumes
//!   `W ≥ 1`, a non-empty grid with finite `mu` and finite `alpha ≥ 0`, and
//!   factor rows aligned with the reference series.
//! - Data values are not validated; non-finite values degrade to `NaN`
//!   output downstream.
//!
//! Conventions
//! -----------
//! - Indexing is 0-based: window `s` covers rows `s..s + W`.
//! - No I/O and no logging in this layer.
//!
//! Downstream usage
//! ----------------
//! - Build `RiskData`, `RiskShape`, `HyperGrid`, wrap them in
//!   `RollingOptions`, and hand both to `RollingRiskModel`; or call the
//!   free functions in `risk::models` directly with a strategy of your own.

pub mod data;
pub mod grid;
pub mod options;
pub mod shape;
pub mod validation;
pub mod workspace;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::data::RiskData;
pub use self::grid::{GridPoint, HyperGrid};
pub use self::options::{
    DEFAULT_ABS_TOL, DEFAULT_REL_TOL, DEFAULT_VERIFY_WINDOWS, ExecutionStrategy, RollingOptions,
    VerifyOptions,
};
pub use self::shape::RiskShape;
pub use self::validation::{validate_alpha, validate_mu, validate_tolerance, validate_workers};
pub use self::workspace::WindowWorkspace;

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::data::RiskData;
    pub use super::grid::{GridPoint, HyperGrid};
    pub use super::options::{ExecutionStrategy, RollingOptions, VerifyOptions};
    pub use super::shape::RiskShape;
    pub use super::workspace::WindowWorkspace;
}
