//! Window geometry for rolling fits.
//!
//! - `window_len` (W): number of observations in each fit window.
//! - `horizon` (H): look-ahead reserved after every window. It is not used by
//!   the in-sample fit; it only limits how many windows are valid.
//! - `degree` (D): highest polynomial degree in the feature expansion, so the
//!   feature matrix has `D + 1` columns.
use crate::risk::errors::{RiskError, RiskResult};

/// Geometry of the rolling fit.
///
/// Invariant: `window_len ≥ 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RiskShape {
    pub window_len: usize,
    pub horizon: usize,
    pub degree: usize,
}

impl RiskShape {
    /// Construct a [`RiskShape`].
    ///
    /// # Errors
    /// - [`RiskError::InvalidWindowLength`] if `window_len == 0`.
    ///
    /// A window longer than the series is *not* rejected here: it simply
    /// yields zero windows, which the orchestrator turns into an empty
    /// series.
    pub fn new(window_len: usize, horizon: usize, degree: usize) -> RiskResult<Self> {
        if window_len == 0 {
            return Err(RiskError::InvalidWindowLength { window_len });
        }
        Ok(RiskShape { window_len, horizon, degree })
    }

    /// Number of feature columns, `D + 1`.
    #[inline]
    pub fn n_features(&self) -> usize {
        self.degree + 1
    }

    /// Number of valid window starts for a series of length `n`:
    /// `max(0, n − W − H + 1)`.
    ///
    /// `W + H` past `usize::MAX` can never fit a series, so it yields 0.
    #[inline]
    pub fn n_windows(&self, n: usize) -> usize {
        self.window_len
            .checked_add(self.horizon)
            .map_or(0, |need| n.saturating_add(1).saturating_sub(need))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // `n_windows` follows N − W − H + 1 and clamps at zero.
    fn n_windows_matches_formula_and_clamps() {
        let shape = RiskShape::new(50, 5, 3).unwrap();
        assert_eq!(shape.n_windows(100), 46);
        assert_eq!(shape.n_windows(55), 1);
        assert_eq!(shape.n_windows(54), 0);
        assert_eq!(shape.n_windows(10), 0);
        assert_eq!(shape.n_windows(0), 0);
        assert_eq!(shape.n_features(), 4);
    }

    #[test]
    // Purpose
    // -------
    // A zero-length window is rejected; zero horizon and degree are fine.
    fn new_rejects_zero_window_only() {
        assert_eq!(RiskShape::new(0, 1, 1), Err(RiskError::InvalidWindowLength { window_len: 0 }));
        let shape = RiskShape::new(1, 0, 0).unwrap();
        assert_eq!(shape.n_windows(3), 3);
        assert_eq!(shape.n_features(), 1);
    }

    #[test]
    // Purpose
    // -------
    // A horizon so large that `W + H` overflows yields zero windows instead
    // of wrapping around or panicking.
    //
    // Given
    // -----
    // - W = 10, H = usize::MAX; also W = usize::MAX, H = 1.
    //
    // Expect
    // ------
    // - `n_windows` is 0 for short, long and maximal series lengths.
    fn n_windows_is_zero_when_window_plus_horizon_overflows() {
        // Arrange
        let huge_horizon = RiskShape::new(10, usize::MAX, 1).unwrap();
        let huge_window = RiskShape::new(usize::MAX, 1, 1).unwrap();

        // Act / Assert
        for n in [0, 30, 1_000_000, usize::MAX] {
            assert_eq!(huge_horizon.n_windows(n), 0, "n = {n}");
            assert_eq!(huge_window.n_windows(n), 0, "n = {n}");
        }
    }
}
