//! rolling_risk — rolling-window systemic-risk estimation.
//!
//! Purpose
//! -------
//! Serve as the crate root for a rolling systemic-risk estimator: for every
//! window of a reference return series, fit each factor's polynomial
//! expansion by ridge regression over a `(mu, alpha)` grid and summarize the
//! best in-sample RMSE across factors as one risk value.
//!
//! Key behaviors
//! -------------
//! - [`numerics`]: polynomial basis, window standardization and a small
//!   in-place Cholesky solver. Pure numeric kernels.
//! - [`risk`]: inputs, configuration, workspaces, the grid-scan solver, the
//!   sequential / reference / parallel execution paths, the equivalence
//!   verifier and the [`RollingRiskModel`](risk::RollingRiskModel) entry
//!   point.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every execution path evaluates the same per-window unit of work; the
//!   preallocated and parallel paths are bit-identical, the reference path
//!   agrees within tolerance.
//! - Data-quality problems degrade to `NaN` (or an empty series) instead of
//!   failing the run. Errors are reserved for invalid configuration.
//!
//! Conventions
//! -----------
//! - Containers are `ndarray` arrays; indexing is 0-based.
//! - Logging uses the `log` facade and is emitted only by the orchestration
//!   layer; no backend is installed by the library.
//!
//! Downstream usage
//! ----------------
//! - `use rolling_risk::risk::prelude::*;` imports the everyday surface.
//!
//! Testing notes
//! -------------
//! - Unit tests live in each module; `tests/` runs the full pipeline on
//!   seeded random data, including the sequential/parallel identity checks.

pub mod numerics;
pub mod risk;
