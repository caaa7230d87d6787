//! Window workspace — preallocated scratch buffers for one execution context.
//!
//! Purpose
//! -------
//! Own every intermediate buffer a single (window, factor) grid scan needs so
//! the optimized paths can process an entire run without per-window heap
//! allocation. A workspace is sized once from a [`RiskShape`] and then reused
//! for every window handled by the same execution context.
//!
//! Key behaviors
//! -------------
//! - [`WindowWorkspace::new`] allocates:
//!   - `target` / `predictor`: standardized windows, length `W`,
//!   - `features`: polynomial feature matrix, `W × (D + 1)`,
//!   - `gram`: ridge normal matrix `XᵀX + αI`, `(D + 1) × (D + 1)`,
//!   - `coef`: right-hand side `Xᵀy`, overwritten with `β` by the solve.
//! - [`WindowWorkspace::fits`] / [`WindowWorkspace::ensure_fits`] check that a
//!   workspace was allocated for a given shape.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every buffer is fully overwritten before it is read, for every window
//!   and grid point. No value carries over between windows, so poisoning the
//!   workspace between calls cannot change results.
//! - A workspace is owned by exactly one execution context at a time
//!   (`&mut` access); parallel tasks each allocate their own.
//!
//! Conventions
//! -----------
//! - Fields are public so solver kernels can split-borrow individual buffers.
//! - Purely numeric; performs no I/O and emits no logging.
//!
//! Testing notes
//! -------------
//! - Unit tests check buffer dimensions and shape matching. The
//!   poisoning property is tested where windows are actually processed
//!   (`risk::models::rolling`).
use crate::risk::{
    core::shape::RiskShape,
    errors::{RiskError, RiskResult},
};
use ndarray::{Array1, Array2};

/// WindowWorkspace — scratch buffers for the optimized grid scan.
///
/// Fields
/// ------
/// - `target`: `Array1<f64>` — standardized reference window (`W`).
/// - `predictor`: `Array1<f64>` — standardized factor window (`W`).
/// - `features`: `Array2<f64>` — feature matrix (`W × (D + 1)`).
/// - `gram`: `Array2<f64>` — normal matrix, factored in place (`(D + 1)²`).
/// - `coef`: `Array1<f64>` — `Xᵀy`, then the ridge coefficients (`D + 1`).
#[derive(Debug, Clone, PartialEq)]
pub struct WindowWorkspace {
    pub target: Array1<f64>,
    pub predictor: Array1<f64>,
    pub features: Array2<f64>,
    pub gram: Array2<f64>,
    pub coef: Array1<f64>,
    window_len: usize,
    degree: usize,
}

impl WindowWorkspace {
    /// Allocate a workspace for `shape`. Buffers start zeroed.
    pub fn new(shape: &RiskShape) -> Self {
        let w = shape.window_len;
        let m = shape.n_features();
        WindowWorkspace {
            target: Array1::zeros(w),
            predictor: Array1::zeros(w),
            features: Array2::zeros((w, m)),
            gram: Array2::zeros((m, m)),
            coef: Array1::zeros(m),
            window_len: w,
            degree: shape.degree,
        }
    }

    /// `(window_len, degree)` this workspace was allocated for.
    pub fn dims(&self) -> (usize, usize) {
        (self.window_len, self.degree)
    }

    /// `true` when the buffers match `shape`'s window length and degree.
    /// The horizon does not affect buffer sizes.
    pub fn fits(&self, shape: &RiskShape) -> bool {
        self.dims() == (shape.window_len, shape.degree)
    }

    /// Like [`fits`](Self::fits) but reports a mismatch as an error.
    ///
    /// # Errors
    /// [`RiskError::WorkspaceShapeMismatch`] with `expected` = the shape's
    /// `(window_len, degree)` and `actual` = this workspace's.
    pub fn ensure_fits(&self, shape: &RiskShape) -> RiskResult<()> {
        if !self.fits(shape) {
            return Err(RiskError::WorkspaceShapeMismatch {
                expected: (shape.window_len, shape.degree),
                actual: self.dims(),
            });
        }
        Ok(())
    }

    /// Check that the buffers can hold a window of `window_len` samples at
    /// `degree`, without a full [`RiskShape`].
    pub(crate) fn ensure_dims(&self, window_len: usize, degree: usize) -> RiskResult<()> {
        if self.dims() != (window_len, degree) {
            return Err(RiskError::WorkspaceShapeMismatch {
                expected: (window_len, degree),
                actual: self.dims(),
            });
        }
        Ok(())
    }

    /// Overwrite every buffer with `value`.
    pub fn fill(&mut self, value: f64) {
        self.target.fill(value);
        self.predictor.fill(value);
        self.features.fill(value);
        self.gram.fill(value);
        self.coef.fill(value);
    }
}
