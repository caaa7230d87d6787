//! Hyperparameter grid for the per-window ridge scan.
//!
//! Purpose
//! -------
//! Represent the finite, ordered set of `(mu, alpha)` pairs that the solver
//! scans exhaustively for every (window, factor) pair. The grid is
//! configuration: it is validated once and then shared read-only by every
//! execution context.
//!
//! Key behaviors
//! -------------
//! - [`HyperGrid::new`] validates a list of points (non-empty, finite `mu`,
//!   finite non-negative `alpha`).
//! - [`HyperGrid::cartesian`] builds the product grid `mus × alphas` in
//!   row-major order (`mu` outer, `alpha` inner).
//!
//! Invariants & assumptions
//! ------------------------
//! - `mu` is a pre-expansion shift: features are `P_d(x − mu)`.
//! - `alpha` is the ridge strength added to every diagonal entry of `XᵀX`.
//! - Grid order has no effect on the selected minimum RMSE.
use crate::risk::{
    core::validation::{validate_alpha, validate_mu},
    errors::{RiskError, RiskResult},
};

/// One `(mu, alpha)` grid point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridPoint {
    /// Basis shift: the polynomial is evaluated at `x − mu`.
    pub mu: f64,
    /// Ridge strength.
    pub alpha: f64,
}

impl GridPoint {
    pub fn new(mu: f64, alpha: f64) -> Self {
        GridPoint { mu, alpha }
    }
}

impl From<(f64, f64)> for GridPoint {
    fn from((mu, alpha): (f64, f64)) -> Self {
        GridPoint { mu, alpha }
    }
}

/// HyperGrid — validated, ordered, non-empty list of [`GridPoint`]s.
///
/// Invariants
/// ----------
/// - At least one point.
/// - Every `mu` is finite; every `alpha` is finite and `≥ 0`.
#[derive(Debug, Clone, PartialEq)]
pub struct HyperGrid {
    points: Vec<GridPoint>,
}

impl HyperGrid {
    /// Construct a validated grid from anything convertible into grid points.
    ///
    /// Parameters
    /// ----------
    /// - `points`: `IntoIterator<Item = P>` with `P: Into<GridPoint>`
    ///   Grid points in scan order; `(mu, alpha)` tuples are accepted.
    ///
    /// Returns
    /// -------
    /// `RiskResult<HyperGrid>`
    ///
    /// Errors
    /// ------
    /// - `RiskError::EmptyGrid` if no points are supplied.
    /// - `RiskError::InvalidMu` for the first non-finite `mu`.
    /// - `RiskError::InvalidAlpha` for the first non-finite or negative
    ///   `alpha`.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use rolling_risk::risk::core::grid::HyperGrid;
    /// let grid = HyperGrid::new([(0.01, 0.001), (0.01, 0.01), (0.05, 0.1)]).unwrap();
    /// assert_eq!(grid.len(), 3);
    /// ```
    pub fn new<I, P>(points: I) -> RiskResult<Self>
    where
        I: IntoIterator<Item = P>,
        P: Into<GridPoint>,
    {
        let points: Vec<GridPoint> = points.into_iter().map(Into::into).collect();
        if points.is_empty() {
            return Err(RiskError::EmptyGrid);
        }
        for (index, point) in points.iter().enumerate() {
            validate_mu(index, point.mu)?;
            validate_alpha(index, point.alpha)?;
        }
        Ok(HyperGrid { points })
    }

    /// Product grid `mus × alphas`, `mu` varying slowest.
    ///
    /// # Errors
    /// Same as [`HyperGrid::new`]; an empty `mus` or `alphas` gives
    /// `RiskError::EmptyGrid`.
    pub fn cartesian(mus: &[f64], alphas: &[f64]) -> RiskResult<Self> {
        let points =
            mus.iter().flat_map(|&mu| alphas.iter().map(move |&alpha| GridPoint { mu, alpha }));
        HyperGrid::new(points)
    }

    /// Grid points in scan order.
    pub fn points(&self) -> &[GridPoint] {
        &self.points
    }

    /// Iterate over grid points in scan order.
    pub fn iter(&self) -> std::slice::Iter<'_, GridPoint> {
        self.points.iter()
    }

    /// Number of grid points (always ≥ 1).
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false` for a validated grid.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl<'a> IntoIterator for &'a HyperGrid {
    type Item = &'a GridPoint;
    type IntoIter = std::slice::Iter<'a, GridPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
