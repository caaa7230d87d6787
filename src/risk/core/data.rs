//! Return-series containers for rolling risk estimation.
//!
//! Purpose
//! -------
//! Provide a small, validated container for the two inputs of the estimator:
//! the reference return series and the matrix of factor return series that
//! share its time index. Centralizing the shape checks here lets the window
//! loop index into both without re-validating.
//!
//! Key behaviors
//! -------------
//! - [`RiskData::new`] enforces a non-empty reference series, at least one
//!   factor column, and one factor row per reference observation.
//! - [`RiskData::reference_window`] and [`RiskData::factor_window`] hand out
//!   read-only views of a window without copying.
//! - Fields are private: the series are read through [`RiskData::reference`]
//!   and [`RiskData::factors`] views, so the length check made at
//!   construction holds for the lifetime of the value. To change the data,
//!   take it apart with [`RiskData::into_parts`] and validate again.
//!
//! Invariants & assumptions
//! ------------------------
//! - `factors.nrows() == reference.len() > 0` and `factors.ncols() > 0`.
//! - Values are **not** checked for finiteness: a missing or non-finite value
//!   inside a window degrades that window's fits to `NaN`, which is the
//!   designated handling for data-quality problems.
//!
//! Conventions
//! -----------
//! - Rows are time, columns are factors (`N × F`).
//! - Window `s` covers rows `s..s + W` (0-based, half-open).
//!
//! Testing notes
//! -------------
//! - Unit tests cover the happy path, each shape error, acceptance of
//!   non-finite values, and window views.
use crate::risk::errors::{RiskError, RiskResult};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, s};

/// `RiskData` — validated reference series plus aligned factor matrix.
///
/// Fields (private)
/// ----------------
/// - `reference`: `Array1<f64>`
///   Reference asset returns, length `N`.
/// - `factors`: `Array2<f64>`
///   Factor returns, shape `N × F`.
///
/// Invariants
/// ----------
/// - `reference.len() > 0`, `factors.ncols() > 0`,
///   `factors.nrows() == reference.len()`.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskData {
    reference: Array1<f64>,
    factors: Array2<f64>,
}

impl RiskData {
    /// Construct a validated [`RiskData`] from a reference series and a factor
    /// matrix.
    ///
    /// Parameters
    /// ----------
    /// - `reference`: `Array1<f64>`
    ///   Reference return series of length `N ≥ 1`.
    /// - `factors`: `Array2<f64>`
    ///   Factor returns of shape `N × F` with `F ≥ 1`.
    ///
    /// Returns
    /// -------
    /// `RiskResult<RiskData>`
    ///
    /// Errors
    /// ------
    /// - `RiskError::EmptySeries` if `reference` is empty.
    /// - `RiskError::NoFactors` if `factors` has no columns.
    /// - `RiskError::FactorLengthMismatch` if `factors.nrows() != N`.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use rolling_risk::risk::core::data::RiskData;
    /// # use ndarray::{array, Array2};
    /// let reference = array![0.01, -0.02, 0.005];
    /// let factors = Array2::from_shape_vec((3, 2), vec![0.0, 0.1, 0.2, 0.3, 0.4, 0.5]).unwrap();
    /// let data = RiskData::new(reference, factors).unwrap();
    /// assert_eq!(data.n_factors(), 2);
    /// ```
    pub fn new(reference: Array1<f64>, factors: Array2<f64>) -> RiskResult<Self> {
        if reference.is_empty() {
            return Err(RiskError::EmptySeries);
        }
        if factors.ncols() == 0 {
            return Err(RiskError::NoFactors);
        }
        if factors.nrows() != reference.len() {
            return Err(RiskError::FactorLengthMismatch {
                expected: reference.len(),
                actual: factors.nrows(),
            });
        }
        Ok(RiskData { reference, factors })
    }

    /// Number of observations `N`.
    pub fn len(&self) -> usize {
        self.reference.len()
    }

    /// Always `false` for a validated instance; provided for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.reference.is_empty()
    }

    /// Number of factor series `F`.
    pub fn n_factors(&self) -> usize {
        self.factors.ncols()
    }

    /// Reference asset returns, length `N`.
    pub fn reference(&self) -> ArrayView1<'_, f64> {
        self.reference.view()
    }

    /// Factor returns, rows = time, columns = factors.
    pub fn factors(&self) -> ArrayView2<'_, f64> {
        self.factors.view()
    }

    /// Give back the owned `(reference, factors)` arrays.
    pub fn into_parts(self) -> (Array1<f64>, Array2<f64>) {
        (self.reference, self.factors)
    }

    /// Reference values for the window starting at `start` of length `len`.
    ///
    /// Panics if `start + len > self.len()`; callers derive window bounds from
    /// [`RiskShape::n_windows`](crate::risk::core::shape::RiskShape::n_windows).
    #[inline]
    pub fn reference_window(&self, start: usize, len: usize) -> ArrayView1<'_, f64> {
        self.reference.slice(s![start..start + len])
    }

    /// Values of factor column `factor` for the window starting at `start`.
    #[inline]
    pub fn factor_window(&self, factor: usize, start: usize, len: usize) -> ArrayView1<'_, f64> {
        self.factors.slice(s![start..start + len, factor])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array2, array};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Successful construction and accessors.
    // - Each shape error branch.
    // - Acceptance of non-finite values (degraded later, not rejected here).
    // - Window views into reference and factor columns.
    // -------------------------------------------------------------------------

    fn factors_3x2() -> Array2<f64> {
        Array2::from_shape_vec((3, 2), vec![1.0, 10.0, 2.0, 20.0, 3.0, 30.0]).unwrap()
    }

    #[test]
    // Purpose
    // -------
    // Valid inputs construct and report their dimensions.
    fn risk_data_new_accepts_aligned_inputs() {
        let data = RiskData::new(array![0.1_f64, 0.2, 0.3], factors_3x2()).unwrap();
        assert_eq!(data.len(), 3);
        assert!(!data.is_empty());
        assert_eq!(data.n_factors(), 2);
    }

    #[test]
    // Purpose
    // -------
    // Each structural problem maps to its own error variant.
    fn risk_data_new_rejects_shape_problems() {
        assert_eq!(
            RiskData::new(Array1::<f64>::zeros(0), Array2::<f64>::zeros((0, 1))),
            Err(RiskError::EmptySeries)
        );
        assert_eq!(
            RiskData::new(array![0.1_f64, 0.2, 0.3], Array2::<f64>::zeros((3, 0))),
            Err(RiskError::NoFactors)
        );
        assert_eq!(
            RiskData::new(array![0.1_f64, 0.2], factors_3x2()),
            Err(RiskError::FactorLengthMismatch { expected: 2, actual: 3 })
        );
    }

    #[test]
    // Purpose
    // -------
    // Non-finite values are accepted at construction time.
    fn risk_data_new_accepts_non_finite_values() {
        let data = RiskData::new(array![f64::NAN, 0.2, f64::INFINITY], factors_3x2());
        assert!(data.is_ok());
    }

    #[test]
    // Purpose
    // -------
    // The accessors expose the validated arrays, and data edited through
    // `into_parts` goes back through the same length check.
    //
    // Given
    // -----
    // - A valid 3 × 2 instance, taken apart and rebuilt with one factor row
    //   dropped.
    //
    // Expect
    // ------
    // - Views equal the inputs and stay aligned.
    // - Rebuilding with misaligned factors is rejected.
    fn accessors_expose_aligned_views_and_into_parts_revalidates() {
        // Arrange
        let reference = array![0.1_f64, 0.2, 0.3];
        let data = RiskData::new(reference.clone(), factors_3x2()).unwrap();

        // Act
        let (ref_view, factor_view) = (data.reference(), data.factors());

        // Assert
        assert_eq!(ref_view, reference);
        assert_eq!(factor_view, factors_3x2());
        assert_eq!(factor_view.nrows(), ref_view.len());

        // Act
        let (reference, factors) = data.into_parts();
        let truncated = factors.slice(s![..2, ..]).to_owned();

        // Assert
        assert_eq!(
            RiskData::new(reference, truncated),
            Err(RiskError::FactorLengthMismatch { expected: 3, actual: 2 })
        );
    }

    #[test]
    // Purpose
    // -------
    // Window views select the right rows and column.
    fn window_views_select_expected_rows() {
        let data = RiskData::new(array![0.1_f64, 0.2, 0.3], factors_3x2()).unwrap();
        assert_eq!(data.reference_window(1, 2), array![0.2_f64, 0.3]);
        assert_eq!(data.factor_window(1, 0, 2), array![10.0_f64, 20.0]);
        assert_eq!(data.factor_window(0, 1, 2), array![2.0_f64, 3.0]);
    }
}
