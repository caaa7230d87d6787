//! Ridge grid scan — minimum in-sample RMSE of a polynomial ridge fit.
//!
//! Purpose
//! -------
//! For one standardized (predictor, target) window pair, fit a ridge
//! regression on the polynomial expansion of the predictor at every `(mu,
//! alpha)` grid point and report the smallest in-sample RMSE. The value is a
//! summary of how well the factor explains the reference inside the window;
//! nothing is held out.
//!
//! Key behaviors
//! -------------
//! - Features: `X[i, d] = P_d(x_i − mu)` for `d = 0..=D`.
//! - Solve `(XᵀX + alpha·I) β = Xᵀy`. The penalty applies to every
//!   coefficient, including the degree-0 column.
//! - RMSE: `sqrt(mean((y − Xβ)²))`.
//! - A grid point is *infeasible* when the normal matrix is not positive
//!   definite or the RMSE is not finite; infeasible points are skipped. If
//!   no point is feasible the result is `NaN`.
//! - Two implementations with the same semantics:
//!   - [`scan_grid`]: writes every intermediate into a
//!     [`WindowWorkspace`] and allocates nothing.
//!   - [`scan_grid_reference`]: allocates fresh matrices per grid point,
//!     forms `XᵀX` with `ndarray` products and solves with `nalgebra`'s
//!     Cholesky factorization.
//!
//! Invariants & assumptions
//! ------------------------
//! - `x` and `y` have equal length; the optimized path also requires the
//!   workspace to match `(x.len(), degree)`.
//! - Grid order does not change the selected minimum: each point is computed
//!   from scratch and ties keep the earliest point only for the reported
//!   `best`, never for `rmse`.
//! - [`scan_grid`] is deterministic: the same inputs give bit-identical
//!   output regardless of which workspace instance is used or what it held.
//!
//! Conventions
//! -----------
//! - Numeric failures (`NumericError`) never escape; they mark the grid point
//!   infeasible. Only caller mistakes (length or workspace mismatch) are
//!   returned as `RiskError`.
//! - No logging: this runs in the innermost loop on every worker.
//!
//! Testing notes
//! -------------
//! - Unit tests cover exact recovery of a polynomial target, infeasible and
//!   all-infeasible grids, ridge monotonicity, grid-order invariance,
//!   reference/optimized agreement and argument validation.
use crate::{
    numerics::{basis_values, cholesky_solve_in_place, fill_basis_row},
    risk::{
        core::{
            grid::{GridPoint, HyperGrid},
            workspace::WindowWorkspace,
        },
        errors::{RiskError, RiskResult},
    },
};
use nalgebra::{DMatrix, DVector};
use ndarray::{Array1, Array2, ArrayView1, Axis};

/// GridFit — outcome of one grid scan.
///
/// Fields
/// ------
/// - `rmse`: `f64` — minimum RMSE over feasible grid points, `NaN` if none.
/// - `best`: `Option<GridPoint>` — first grid point attaining `rmse`.
/// - `feasible`: `usize` — number of feasible grid points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridFit {
    pub rmse: f64,
    pub best: Option<GridPoint>,
    pub feasible: usize,
}

impl GridFit {
    /// Result of a scan with no feasible grid point.
    pub fn infeasible() -> Self {
        GridFit { rmse: f64::NAN, best: None, feasible: 0 }
    }

    /// `true` when at least one grid point produced a finite RMSE.
    pub fn is_feasible(&self) -> bool {
        self.best.is_some()
    }

    #[inline]
    fn offer(&mut self, point: GridPoint, rmse: f64) {
        if !rmse.is_finite() {
            return;
        }
        self.feasible += 1;
        if self.best.is_none() || rmse < self.rmse {
            self.rmse = rmse;
            self.best = Some(point);
        }
    }
}

/// Scan `grid` for the minimum-RMSE ridge fit using workspace buffers.
///
/// Parameters
/// ----------
/// - `x`: `ArrayView1<'_, f64>` — standardized predictor window.
/// - `y`: `ArrayView1<'_, f64>` — standardized target window, same length.
/// - `grid`: `&HyperGrid` — `(mu, alpha)` points.
/// - `degree`: `usize` — highest polynomial degree `D`.
/// - `ws`: `&mut WindowWorkspace` — scratch allocated for `(x.len(), D)`.
///   Only `features`, `gram` and `coef` are written; `target` and
///   `predictor` are left alone so callers may pass views of them.
///
/// Returns
/// -------
/// `RiskResult<GridFit>`
///
/// Errors
/// ------
/// - `RiskError::WindowLengthMismatch` if `x.len() != y.len()`.
/// - `RiskError::WorkspaceShapeMismatch` if `ws` was sized for a different
///   window length or degree.
pub fn scan_grid(
    x: ArrayView1<'_, f64>, y: ArrayView1<'_, f64>, grid: &HyperGrid, degree: usize,
    ws: &mut WindowWorkspace,
) -> RiskResult<GridFit> {
    if x.len() != y.len() {
        return Err(RiskError::WindowLengthMismatch { predictor: x.len(), target: y.len() });
    }
    ws.ensure_dims(x.len(), degree)?;
    Ok(scan_grid_buffers(x, y, grid, &mut ws.features, &mut ws.gram, &mut ws.coef))
}

/// Grid scan over explicit buffers. Dimensions are the caller's
/// responsibility: `features` is `n × m`, `gram` is `m × m`, `coef` is `m`,
/// with `n = x.len() = y.len()`.
pub(crate) fn scan_grid_buffers(
    x: ArrayView1<'_, f64>, y: ArrayView1<'_, f64>, grid: &HyperGrid,
    features: &mut Array2<f64>, gram: &mut Array2<f64>, coef: &mut Array1<f64>,
) -> GridFit {
    let n = x.len();
    let m = features.ncols();
    let mut fit = GridFit::infeasible();

    for point in grid {
        for (row, &xi) in features.axis_iter_mut(Axis(0)).zip(x.iter()) {
            fill_basis_row(xi - point.mu, row);
        }

        for j in 0..m {
            let col_j = features.column(j);
            for k in 0..=j {
                let v = col_j.dot(&features.column(k));
                gram[[j, k]] = v;
                gram[[k, j]] = v;
            }
            gram[[j, j]] += point.alpha;
            coef[j] = col_j.dot(&y);
        }

        if cholesky_solve_in_place(gram.view_mut(), coef.view_mut()).is_err() {
            continue;
        }

        let mut ss = 0.0;
        for (row, &yi) in features.axis_iter(Axis(0)).zip(y.iter()) {
            let r = yi - row.dot(&*coef);
            ss += r * r;
        }
        fit.offer(*point, (ss / n as f64).sqrt());
    }
    fit
}

/// Allocating reference implementation of [`scan_grid`].
///
/// Builds a fresh `W × (D + 1)` feature matrix for every grid point
/// (column `d` from [`basis_values`]), forms `XᵀX` and `Xᵀy` with `ndarray`
/// matrix products and solves the ridge system through
/// `nalgebra::DMatrix::cholesky`. A failed factorization marks the point
/// infeasible.
///
/// Results agree with [`scan_grid`] up to floating-point reassociation in the
/// matrix products; they are not expected to be bit-identical.
///
/// # Errors
/// `RiskError::WindowLengthMismatch` if `x.len() != y.len()`.
pub fn scan_grid_reference(
    x: ArrayView1<'_, f64>, y: ArrayView1<'_, f64>, grid: &HyperGrid, degree: usize,
) -> RiskResult<GridFit> {
    if x.len() != y.len() {
        return Err(RiskError::WindowLengthMismatch { predictor: x.len(), target: y.len() });
    }
    let n = x.len();
    let m = degree + 1;
    let mut fit = GridFit::infeasible();

    for point in grid {
        let shifted = x.mapv(|v| v - point.mu);
        let mut features = Array2::<f64>::zeros((n, m));
        for d in 0..m {
            features.column_mut(d).assign(&basis_values(d, shifted.view()));
        }

        let mut gram = features.t().dot(&features);
        gram.diag_mut().mapv_inplace(|v| v + point.alpha);
        let rhs = features.t().dot(&y);

        let a = DMatrix::from_fn(m, m, |i, j| gram[[i, j]]);
        let b = DVector::from_iterator(m, rhs.iter().copied());
        let Some(chol) = a.cholesky() else {
            continue;
        };
        let beta = Array1::from_iter(chol.solve(&b).iter().copied());

        let resid = &y - &features.dot(&beta);
        let rmse = (resid.mapv(|r| r * r).sum() / n as f64).sqrt();
        fit.offer(*point, rmse);
    }
    Ok(fit)
}
