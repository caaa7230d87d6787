//! Rolling orchestrator — one risk value per window start.
//!
//! Purpose
//! -------
//! Slide a window of length `W` over the aligned reference/factor series and
//! turn every window into a single risk value: the mean over factors of the
//! minimum in-sample ridge RMSE (see [`scan_grid`](super::solver::scan_grid)).
//!
//! Key behaviors
//! -------------
//! - `n_windows = max(0, N − W − H + 1)`; zero windows yield an empty
//!   [`RiskSeries`], never an error.
//! - For window start `s` the reference rows `s..s + W` are standardized into
//!   the target buffer; each factor column over the same rows is
//!   standardized into the predictor buffer and scanned over the grid.
//! - The window value is the mean of the finite per-factor RMSEs, summed in
//!   factor order; `NaN` if no factor produced a finite RMSE.
//! - [`run_sequential`] reuses one [`WindowWorkspace`] for the whole run;
//!   [`run_reference`] allocates everything per window and uses the
//!   reference solver.
//!
//! Invariants & assumptions
//! ------------------------
//! - Output slot `i` always corresponds to window start `i`.
//! - The horizon `H` only limits the number of windows; fits never read rows
//!   past `s + W`.
//! - The per-window computation reads nothing from the workspace that it did
//!   not write in the same window, so window values do not depend on
//!   processing order or on which workspace instance is used.
//!
//! Testing notes
//! -------------
//! - Unit tests cover empty runs, degenerate windows, factor averaging,
//!   horizon handling, workspace poisoning and reference agreement. The
//!   parallel path and the end-to-end scenario live in `scheduler` and the
//!   integration tests.
use crate::{
    numerics::{standardize, standardize_into},
    risk::{
        core::{data::RiskData, grid::HyperGrid, shape::RiskShape, workspace::WindowWorkspace},
        errors::RiskResult,
        models::solver::{scan_grid_buffers, scan_grid_reference},
    },
};
use ndarray::{Array1, ArrayView1};
use std::ops::Range;

/// RiskSeries — rolling risk values indexed by window start.
///
/// Fields
/// ------
/// - `values`: `Array1<f64>` — one value per window start, `NaN` where no
///   factor produced a finite fit.
/// - `window_len`, `horizon`: geometry the series was computed with, kept so
///   each value can be mapped back to its observation range.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskSeries {
    values: Array1<f64>,
    window_len: usize,
    horizon: usize,
}

impl RiskSeries {
    /// Wrap already computed window values.
    pub fn new(values: Array1<f64>, shape: &RiskShape) -> Self {
        RiskSeries { values, window_len: shape.window_len, horizon: shape.horizon }
    }

    /// Empty series for a run with no valid window.
    pub fn empty(shape: &RiskShape) -> Self {
        RiskSeries::new(Array1::zeros(0), shape)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Window values in start order.
    pub fn values(&self) -> ArrayView1<'_, f64> {
        self.values.view()
    }

    pub fn into_values(self) -> Array1<f64> {
        self.values
    }

    pub fn window_len(&self) -> usize {
        self.window_len
    }

    pub fn horizon(&self) -> usize {
        self.horizon
    }

    /// Number of finite values.
    pub fn valid_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_finite()).count()
    }

    /// Observation rows fitted for window `i` (`i..i + W`), or `None` past
    /// the end of the series.
    pub fn window_range(&self, i: usize) -> Option<Range<usize>> {
        (i < self.len()).then(|| i..i + self.window_len)
    }
}

/// Risk value of the window starting at `start`, using `ws` for scratch.
///
/// Parameters
/// ----------
/// - `data`: `&RiskData` — reference series and factor matrix.
/// - `shape`: `&RiskShape` — `W`, `H`, `D`.
/// - `grid`: `&HyperGrid` — `(mu, alpha)` points.
/// - `start`: `usize` — 0-based window start; rows `start..start + W` must
///   exist.
/// - `ws`: `&mut WindowWorkspace` — scratch sized for `shape`.
///
/// Returns
/// -------
/// `RiskResult<f64>` — mean of the finite per-factor RMSEs, or `NaN`.
///
/// Errors
/// ------
/// - `RiskError::WorkspaceShapeMismatch` if `ws` does not fit `shape`.
///
/// Panics
/// ------
/// - Panics if `start + W > data.len()`.
pub fn assess_window(
    data: &RiskData, shape: &RiskShape, grid: &HyperGrid, start: usize,
    ws: &mut WindowWorkspace,
) -> RiskResult<f64> {
    ws.ensure_fits(shape)?;
    Ok(window_value(data, shape, grid, start, ws))
}

/// Unchecked per-window unit of work shared by the sequential and parallel
/// paths. `ws` must fit `shape`.
pub(crate) fn window_value(
    data: &RiskData, shape: &RiskShape, grid: &HyperGrid, start: usize,
    ws: &mut WindowWorkspace,
) -> f64 {
    let w = shape.window_len;
    standardize_into(data.reference_window(start, w), ws.target.view_mut());

    let mut sum = 0.0;
    let mut finite = 0usize;
    for factor in 0..data.n_factors() {
        standardize_into(data.factor_window(factor, start, w), ws.predictor.view_mut());
        let fit = scan_grid_buffers(
            ws.predictor.view(),
            ws.target.view(),
            grid,
            &mut ws.features,
            &mut ws.gram,
            &mut ws.coef,
        );
        if fit.rmse.is_finite() {
            sum += fit.rmse;
            finite += 1;
        }
    }
    mean_or_nan(sum, finite)
}

/// Risk value of window `start` on the reference path: fresh buffers for
/// every standardized window and the allocating solver.
pub fn assess_window_reference(
    data: &RiskData, shape: &RiskShape, grid: &HyperGrid, start: usize,
) -> RiskResult<f64> {
    let w = shape.window_len;
    let (target, _) = standardize(data.reference_window(start, w));

    let mut sum = 0.0;
    let mut finite = 0usize;
    for factor in 0..data.n_factors() {
        let (predictor, _) = standardize(data.factor_window(factor, start, w));
        let fit = scan_grid_reference(predictor.view(), target.view(), grid, shape.degree)?;
        if fit.rmse.is_finite() {
            sum += fit.rmse;
            finite += 1;
        }
    }
    Ok(mean_or_nan(sum, finite))
}

#[inline]
fn mean_or_nan(sum: f64, count: usize) -> f64 {
    if count == 0 { f64::NAN } else { sum / count as f64 }
}

/// Sequential run with a single freshly allocated workspace.
///
/// Returns a series of length `shape.n_windows(data.len())`.
///
/// # Errors
/// Never fails for validated inputs; the `Result` mirrors the other
/// execution paths.
pub fn run_sequential(
    data: &RiskData, shape: &RiskShape, grid: &HyperGrid,
) -> RiskResult<RiskSeries> {
    if shape.n_windows(data.len()) == 0 {
        return Ok(RiskSeries::empty(shape));
    }
    let mut ws = WindowWorkspace::new(shape);
    run_sequential_with(data, shape, grid, &mut ws)
}

/// Sequential run reusing a caller-owned workspace, e.g. across several runs
/// with the same geometry.
///
/// # Errors
/// `RiskError::WorkspaceShapeMismatch` if `ws` does not fit `shape`.
pub fn run_sequential_with(
    data: &RiskData, shape: &RiskShape, grid: &HyperGrid, ws: &mut WindowWorkspace,
) -> RiskResult<RiskSeries> {
    ws.ensure_fits(shape)?;
    let n_windows = shape.n_windows(data.len());
    let mut out = Array1::<f64>::from_elem(n_windows, f64::NAN);
    for (start, slot) in out.iter_mut().enumerate() {
        *slot = window_value(data, shape, grid, start, ws);
    }
    Ok(RiskSeries::new(out, shape))
}

/// Reference run: no workspace, every window allocates its own buffers and
/// uses [`scan_grid_reference`].
pub fn run_reference(
    data: &RiskData, shape: &RiskShape, grid: &HyperGrid,
) -> RiskResult<RiskSeries> {
    run_reference_prefix(data, shape, grid, shape.n_windows(data.len()))
}

/// Reference values for the first `count` windows (clamped to the number of
/// valid windows).
pub(crate) fn run_reference_prefix(
    data: &RiskData, shape: &RiskShape, grid: &HyperGrid, count: usize,
) -> RiskResult<RiskSeries> {
    let count = count.min(shape.n_windows(data.len()));
    let values = (0..count)
        .map(|start| assess_window_reference(data, shape, grid, start))
        .collect::<RiskResult<Vec<f64>>>()?;
    Ok(RiskSeries::new(Array1::from_vec(values), shape))
}
