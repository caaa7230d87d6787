//! numerics::linalg — in-place Cholesky solve for small SPD systems.
//!
//! Purpose
//! -------
//! Solve the `(D + 1) × (D + 1)` ridge normal equations `A β = b` without
//! allocating, by factoring `A = L Lᵀ` in the lower triangle of the caller's
//! buffer and overwriting `b` with `β`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Only the lower triangle (including the diagonal) of `a` is read; it is
//!   overwritten with `L`. The strict upper triangle is left untouched.
//! - A pivot that is not strictly positive and finite rejects the system with
//!   [`NumericError::NonPositivePivot`]. `nalgebra::Cholesky::new` rejects
//!   negative and NaN pivots the same way, so the allocating reference path
//!   and this kernel agree on which grid points are feasible.
//! - On error the contents of `a` and `b` are unspecified; callers must
//!   rebuild them before reuse.
use crate::numerics::errors::{NumericError, NumericResult};
use ndarray::{ArrayViewMut1, ArrayViewMut2};

/// Factor `a` in place and solve `a · x = b`, writing `x` into `b`.
///
/// Parameters
/// ----------
/// - `a`: `ArrayViewMut2<'_, f64>`
///   Square symmetric matrix; lower triangle is read and replaced by `L`.
/// - `b`: `ArrayViewMut1<'_, f64>`
///   Right-hand side of length `a.nrows()`; replaced by the solution.
///
/// Returns
/// -------
/// `NumericResult<()>`
///   - `Ok(())` when `a` is numerically positive definite.
///   - `Err(NumericError::NonPositivePivot)` at the first failing pivot.
///   - `Err(NumericError::DimensionMismatch)` if `a` is not square or `b`
///     has the wrong length.
///
/// Panics
/// ------
/// - Never panics.
pub fn cholesky_solve_in_place(
    mut a: ArrayViewMut2<'_, f64>, mut b: ArrayViewMut1<'_, f64>,
) -> NumericResult<()> {
    let n = a.nrows();
    if a.ncols() != n {
        return Err(NumericError::DimensionMismatch { expected: n, actual: a.ncols() });
    }
    if b.len() != n {
        return Err(NumericError::DimensionMismatch { expected: n, actual: b.len() });
    }

    // Factor: column j of L.
    for j in 0..n {
        let mut diag = a[[j, j]];
        for k in 0..j {
            diag -= a[[j, k]] * a[[j, k]];
        }
        if !(diag > 0.0 && diag.is_finite()) {
            return Err(NumericError::NonPositivePivot { index: j, value: diag });
        }
        let l_jj = diag.sqrt();
        a[[j, j]] = l_jj;
        for i in (j + 1)..n {
            let mut s = a[[i, j]];
            for k in 0..j {
                s -= a[[i, k]] * a[[j, k]];
            }
            a[[i, j]] = s / l_jj;
        }
    }

    // Forward: L y = b.
    for i in 0..n {
        let mut s = b[i];
        for k in 0..i {
            s -= a[[i, k]] * b[k];
        }
        b[i] = s / a[[i, i]];
    }

    // Backward: Lᵀ x = y.
    for i in (0..n).rev() {
        let mut s = b[i];
        for k in (i + 1)..n {
            s -= a[[k, i]] * b[k];
        }
        b[i] = s / a[[i, i]];
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::{Array1, Array2, array};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Solving a known SPD system.
    // - Agreement with nalgebra's Cholesky on a ridge-like Gram matrix.
    // - Rejection of singular, indefinite and NaN systems.
    // - Dimension checks.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Solve a 3×3 SPD system with a known solution.
    //
    // Given
    // -----
    // - A = [[4,2,0],[2,5,1],[0,1,3]], x* = [1,-1,2], b = A x* = [2,-1,5].
    //
    // Expect
    // ------
    // - b is overwritten with x* within 1e-12.
    fn cholesky_solve_recovers_known_solution() {
        // Arrange
        let mut a = array![[4.0_f64, 2.0, 0.0], [2.0, 5.0, 1.0], [0.0, 1.0, 3.0]];
        let mut b = array![2.0_f64, -1.0, 5.0];

        // Act
        cholesky_solve_in_place(a.view_mut(), b.view_mut()).expect("SPD system must solve");

        // Assert
        assert_relative_eq!(b[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(b[1], -1.0, epsilon = 1e-12);
        assert_relative_eq!(b[2], 2.0, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Cross-check against nalgebra on a Gram matrix plus ridge shift.
    fn cholesky_solve_agrees_with_nalgebra() {
        // Arrange
        let x = array![
            [1.0_f64, 0.3, -0.91],
            [1.0, -1.2, 0.44],
            [1.0, 0.8, -0.36],
            [1.0, 2.1, 3.41],
            [1.0, -0.4, -0.84]
        ];
        let mut gram: Array2<f64> = x.t().dot(&x);
        for d in 0..3 {
            gram[[d, d]] += 0.01;
        }
        let rhs = array![0.5_f64, -0.25, 1.0];
        let expected = nalgebra::DMatrix::from_fn(3, 3, |i, j| gram[[i, j]])
            .cholesky()
            .expect("nalgebra must accept the SPD matrix")
            .solve(&nalgebra::DVector::from_iterator(3, rhs.iter().copied()));

        // Act
        let mut b: Array1<f64> = rhs.clone();
        cholesky_solve_in_place(gram.view_mut(), b.view_mut()).unwrap();

        // Assert
        for i in 0..3 {
            assert_relative_eq!(b[i], expected[i], max_relative = 1e-12);
        }
    }

    #[test]
    // Purpose
    // -------
    // Singular, indefinite and NaN matrices are rejected, never panicking.
    fn cholesky_solve_rejects_non_positive_definite_systems() {
        let mut singular = array![[1.0_f64, 1.0], [1.0, 1.0]];
        let mut b = array![1.0_f64, 1.0];
        match cholesky_solve_in_place(singular.view_mut(), b.view_mut()) {
            Err(NumericError::NonPositivePivot { index, .. }) => assert_eq!(index, 1),
            other => panic!("expected NonPositivePivot, got {other:?}"),
        }

        let mut indefinite = array![[-2.0_f64, 0.0], [0.0, 1.0]];
        let mut b = array![1.0_f64, 1.0];
        assert!(matches!(
            cholesky_solve_in_place(indefinite.view_mut(), b.view_mut()),
            Err(NumericError::NonPositivePivot { index: 0, .. })
        ));

        let mut with_nan = array![[f64::NAN, 0.0], [0.0, 1.0]];
        let mut b = array![1.0_f64, 1.0];
        assert!(cholesky_solve_in_place(with_nan.view_mut(), b.view_mut()).is_err());
    }

    #[test]
    // Purpose
    // -------
    // Non-square matrices and mismatched right-hand sides are reported.
    fn cholesky_solve_checks_dimensions() {
        let mut a = Array2::<f64>::eye(2);
        let mut b = Array1::<f64>::zeros(3);
        assert_eq!(
            cholesky_solve_in_place(a.view_mut(), b.view_mut()),
            Err(NumericError::DimensionMismatch { expected: 2, actual: 3 })
        );

        let mut rect = Array2::<f64>::zeros((2, 3));
        let mut b = Array1::<f64>::zeros(2);
        assert!(matches!(
            cholesky_solve_in_place(rect.view_mut(), b.view_mut()),
            Err(NumericError::DimensionMismatch { .. })
        ));
    }
}
