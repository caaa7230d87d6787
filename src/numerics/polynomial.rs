//! numerics::polynomial — three-term recurrence polynomial basis.
//!
//! Purpose
//! -------
//! Evaluate the polynomial family used to expand a standardized factor window
//! into regression features. The family is defined by
//!
//! ```text
//! P₀(x) = 1,  P₁(x) = x,  Pₖ₊₁(x) = x·Pₖ(x) − k·Pₖ₋₁(x)   (k ≥ 1)
//! ```
//!
//! which is the probabilists' Hermite family. Standardized returns are close
//! to unit-variance, so these polynomials are close to orthogonal on the data
//! and keep the ridge normal equations well conditioned.
//!
//! Key behaviors
//! -------------
//! - [`basis_value`] evaluates a single `Pₙ(x)` iteratively with two running
//!   values: O(n) time, O(1) extra space, no recursion.
//! - [`basis_values`] maps [`basis_value`] over a view, preserving order.
//! - [`fill_basis_row`] writes `P₀(x)..P_D(x)` into a row buffer in one pass
//!   of the same recurrence, so `row[d] == basis_value(d, x)` bit-for-bit.
//!
//! Invariants & assumptions
//! ------------------------
//! - `basis_value(0, x) == 1.0` for every `x`, including `NaN` and `±∞`.
//! - For `n ≥ 1` a non-finite `x` propagates through the recurrence as
//!   `NaN`/`±∞`; this is intended and is not reported as an error.
//!
//! Conventions
//! -----------
//! - All functions are pure: no allocation beyond the returned array, no
//!   logging, no global state.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the degree-0/degree-1 identities, recurrence
//!   self-consistency, closed forms for low degrees, non-finite propagation,
//!   and agreement between [`fill_basis_row`] and [`basis_value`].
use ndarray::{Array1, ArrayView1, ArrayViewMut1};

/// Evaluate the degree-`n` basis polynomial `Pₙ(x)`.
///
/// Parameters
/// ----------
/// - `n`: `usize`
///   Polynomial degree.
/// - `x`: `f64`
///   Evaluation point. Non-finite values are allowed.
///
/// Returns
/// -------
/// `f64`
///   `Pₙ(x)` from the recurrence `Pₖ₊₁ = x·Pₖ − k·Pₖ₋₁`.
///
/// Panics
/// ------
/// - Never panics.
///
/// Examples
/// --------
/// ```rust
/// # use rolling_risk::numerics::polynomial::basis_value;
/// assert_eq!(basis_value(0, f64::NAN), 1.0);
/// assert_eq!(basis_value(1, 0.5), 0.5);
/// assert_eq!(basis_value(2, 3.0), 8.0); // x² − 1
/// ```
#[inline]
pub fn basis_value(n: usize, x: f64) -> f64 {
    if n == 0 {
        return 1.0;
    }
    let mut prev = 1.0;
    let mut curr = x;
    for k in 1..n {
        let next = x * curr - (k as f64) * prev;
        prev = curr;
        curr = next;
    }
    curr
}

/// Apply [`basis_value`] element-wise over `xs`.
///
/// Returns a new array of the same length; `out[i] == basis_value(n, xs[i])`.
pub fn basis_values(n: usize, xs: ArrayView1<'_, f64>) -> Array1<f64> {
    xs.mapv(|x| basis_value(n, x))
}

/// Write `P₀(x), P₁(x), …, P_D(x)` into `row`, where `D = row.len() − 1`.
///
/// Parameters
/// ----------
/// - `x`: `f64`
///   Evaluation point.
/// - `row`: `ArrayViewMut1<'_, f64>`
///   Destination; every entry is overwritten. An empty row is left untouched.
///
/// Notes
/// -----
/// - The recurrence is unrolled in exactly the order [`basis_value`] uses, so
///   each written entry is bit-identical to the scalar evaluation of the same
///   degree. Feature matrices filled through this helper therefore agree with
///   any column-wise construction built from [`basis_value`].
#[inline]
pub fn fill_basis_row(x: f64, mut row: ArrayViewMut1<'_, f64>) {
    let m = row.len();
    if m == 0 {
        return;
    }
    row[0] = 1.0;
    if m == 1 {
        return;
    }
    row[1] = x;
    let mut prev = 1.0;
    let mut curr = x;
    for k in 1..(m - 1) {
        let next = x * curr - (k as f64) * prev;
        prev = curr;
        curr = next;
        row[k + 1] = curr;
    }
}
