//! numerics — pure numeric kernels used by the rolling risk estimator.
//!
//! Purpose
//! -------
//! Collect the small, allocation-conscious building blocks the ridge solver
//! is assembled from: the polynomial basis, window standardization and an
//! in-place Cholesky solve. Nothing here knows about windows, grids or
//! execution strategies.
//!
//! Key behaviors
//! -------------
//! - [`basis_value`] / [`basis_values`] / [`fill_basis_row`] evaluate the
//!   three-term recurrence `Pₖ₊₁ = x·Pₖ − k·Pₖ₋₁`.
//! - [`window_moments`] / [`standardize_into`] / [`standardize`] z-score a
//!   window with sample (`n − 1`) moments and never clamp `σ = 0`.
//! - [`cholesky_solve_in_place`] solves small SPD systems in caller buffers.
//!
//! Conventions
//! -----------
//! - All routines operate on `ndarray` views and favor in-place updates.
//! - No logging, no I/O, no global state: these functions are called inside
//!   the per-window inner loop from any number of worker threads.
//! - Degenerate numerics propagate as non-finite values or as
//!   [`NumericError`]; deciding what that means is the caller's job.
//!
//! Testing notes
//! -------------
//! - Each submodule carries its own unit tests; the rolling-window tests
//!   exercise these kernels end to end.

pub mod errors;
pub mod linalg;
pub mod polynomial;
pub mod standardize;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::errors::{NumericError, NumericResult};
pub use self::linalg::cholesky_solve_in_place;
pub use self::polynomial::{basis_value, basis_values, fill_basis_row};
pub use self::standardize::{WindowMoments, standardize, standardize_into, window_moments};
