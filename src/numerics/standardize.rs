//! numerics::standardize — z-score normalization of a single window.
//!
//! Purpose
//! -------
//! Map a window of raw returns onto zero mean and unit sample variance before
//! basis expansion, so that polynomial features of different factors live on
//! a comparable scale and the ridge normal equations stay well conditioned.
//!
//! Key behaviors
//! -------------
//! - [`window_moments`] computes the sample mean and the sample standard
//!   deviation (divisor `n − 1`) of a window.
//! - [`standardize_into`] writes `(v − μ)/σ` into a caller-owned buffer and
//!   returns the moments used.
//! - [`standardize`] is the allocating convenience form.
//! - [`WindowMoments::rescale`] inverts the map, `z ↦ μ + σ·z`.
//!
//! Invariants & assumptions
//! ------------------------
//! - The mean is accumulated on data shifted by the first element. For a
//!   constant window every shifted value is exactly `0.0`, hence `σ == 0.0`
//!   exactly and every standardized value is `0/0 = NaN`.
//! - `σ == 0` is never clamped or replaced: the non-finite output is the
//!   signal that downstream finiteness checks rely on.
//! - A window of length 1 has divisor `0`; its σ is `NaN` and the output is
//!   non-finite. An empty window yields `NaN` moments and writes nothing.
//!
//! Conventions
//! -----------
//! - Pure numeric helpers: no logging, no global state, no panics for valid
//!   buffer lengths.
use ndarray::{Array1, ArrayView1, ArrayViewMut1, Zip};

/// Sample mean and sample standard deviation of one window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowMoments {
    /// Sample mean μ.
    pub mean: f64,
    /// Sample standard deviation σ with divisor `n − 1`.
    pub std: f64,
}

impl WindowMoments {
    /// Undo standardization: `μ + σ·z`.
    #[inline]
    pub fn rescale(&self, z: f64) -> f64 {
        self.mean + self.std * z
    }

    /// `true` when σ is zero, negative or non-finite.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        !(self.std.is_finite() && self.std > 0.0)
    }
}

/// Compute the sample mean and sample standard deviation of `window`.
///
/// Parameters
/// ----------
/// - `window`: `ArrayView1<'_, f64>`
///   Raw window values.
///
/// Returns
/// -------
/// [`WindowMoments`]
///   - `mean`: `v₀ + Σ(vᵢ − v₀)/n`.
///   - `std`: `sqrt(Σ(vᵢ − μ)² / (n − 1))`.
///
/// Notes
/// -----
/// - Shifting by `v₀` leaves the mathematical result unchanged but makes a
///   constant window produce exactly `σ = 0`.
/// - Non-finite inputs propagate into both moments.
pub fn window_moments(window: ArrayView1<'_, f64>) -> WindowMoments {
    let n = window.len();
    if n == 0 {
        return WindowMoments { mean: f64::NAN, std: f64::NAN };
    }
    let shift = window[0];
    let shifted_sum: f64 = window.iter().map(|&v| v - shift).sum();
    let mean = shift + shifted_sum / n as f64;
    let ss: f64 = window
        .iter()
        .map(|&v| {
            let d = v - mean;
            d * d
        })
        .sum();
    let std = (ss / (n as f64 - 1.0)).sqrt();
    WindowMoments { mean, std }
}

/// Standardize `window` into `out`, returning the moments used.
///
/// Parameters
/// ----------
/// - `window`: `ArrayView1<'_, f64>`
///   Raw window values.
/// - `out`: `ArrayViewMut1<'_, f64>`
///   Destination buffer; must have the same length as `window`. Every entry
///   is overwritten.
///
/// Returns
/// -------
/// [`WindowMoments`] of `window`.
///
/// Panics
/// ------
/// - Panics if `out.len() != window.len()` (a programming error; workspace
///   buffers are sized from the same window length).
pub fn standardize_into(
    window: ArrayView1<'_, f64>, out: ArrayViewMut1<'_, f64>,
) -> WindowMoments {
    let moments = window_moments(window);
    let WindowMoments { mean, std } = moments;
    Zip::from(out).and(&window).for_each(|o, &v| *o = (v - mean) / std);
    moments
}

/// Allocating form of [`standardize_into`].
pub fn standardize(window: ArrayView1<'_, f64>) -> (Array1<f64>, WindowMoments) {
    let mut out = Array1::<f64>::zeros(window.len());
    let moments = standardize_into(window, out.view_mut());
    (out, moments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::{Array1, array};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Moments on a hand-computable window.
    // - Zero mean / unit sample variance of the standardized output.
    // - Round trip standardize → rescale.
    // - Degenerate windows (constant, length 1, empty).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Check μ and σ (divisor n − 1) on a small window.
    //
    // Given
    // -----
    // - [1, 2, 3, 4]: μ = 2.5, Σ(v−μ)² = 5, σ = sqrt(5/3).
    fn window_moments_uses_sample_divisor() {
        let m = window_moments(array![1.0_f64, 2.0, 3.0, 4.0].view());
        assert_relative_eq!(m.mean, 2.5, epsilon = 1e-15);
        assert_relative_eq!(m.std, (5.0_f64 / 3.0).sqrt(), epsilon = 1e-15);
        assert!(!m.is_degenerate());
    }

    #[test]
    // Purpose
    // -------
    // The standardized window has zero mean and unit sample variance.
    fn standardize_produces_zero_mean_unit_variance() {
        // Arrange
        let w = array![0.013_f64, -0.021, 0.004, 0.017, -0.009, 0.002, -0.030];

        // Act
        let (z, _) = standardize(w.view());
        let after = window_moments(z.view());

        // Assert
        assert_relative_eq!(after.mean, 0.0, epsilon = 1e-14);
        assert_relative_eq!(after.std, 1.0, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Standardizing and then rescaling with the returned moments
    // reconstructs the original window.
    //
    // Given
    // -----
    // - A window with σ > 0 on a non-unit scale and offset.
    //
    // Expect
    // ------
    // - Element-wise agreement within floating-point tolerance.
    fn standardize_then_rescale_round_trips() {
        let w = array![101.5_f64, 99.25, 100.0, 103.75, 98.5, 100.125];
        let (z, m) = standardize(w.view());
        for (orig, zi) in w.iter().zip(z.iter()) {
            assert_relative_eq!(m.rescale(*zi), *orig, max_relative = 1e-13);
        }
    }

    #[test]
    // Purpose
    // -------
    // A constant window has σ exactly 0 and produces NaN output instead of
    // a clamped or finite value.
    //
    // Given
    // -----
    // - 50 copies of 0.1 (a value whose plain sum is not exact in binary).
    //
    // Expect
    // ------
    // - std == 0.0 exactly, moments flagged degenerate, every output NaN.
    fn standardize_constant_window_is_non_finite() {
        // Arrange
        let w = Array1::<f64>::from_elem(50, 0.1);

        // Act
        let (z, m) = standardize(w.view());

        // Assert
        assert_eq!(m.std, 0.0);
        assert_eq!(m.mean, 0.1);
        assert!(m.is_degenerate());
        assert!(z.iter().all(|v| v.is_nan()));
    }

    #[test]
    // Purpose
    // -------
    // Length-1 and empty windows degrade to non-finite moments without
    // panicking.
    fn window_moments_short_windows_are_degenerate() {
        let single = window_moments(array![0.5_f64].view());
        assert!(single.std.is_nan());
        assert!(single.is_degenerate());

        let empty = window_moments(Array1::<f64>::zeros(0).view());
        assert!(empty.mean.is_nan());
        assert!(empty.std.is_nan());
    }

    #[test]
    // Purpose
    // -------
    // `is_degenerate` flags exactly the spreads that cannot be divided by.
    //
    // Given
    // -----
    // - σ ∈ {0, −1, NaN, +∞} and σ = 0.25.
    //
    // Expect
    // ------
    // - Degenerate for the first four, usable for σ = 0.25.
    fn is_degenerate_flags_unusable_spread() {
        // Arrange
        let with_std = |std: f64| WindowMoments { mean: 0.0, std };

        // Act / Assert
        for std in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(with_std(std).is_degenerate(), "σ = {std}");
        }
        assert!(!with_std(0.25).is_degenerate());
    }

    #[test]
    // Purpose
    // -------
    // `standardize_into` fully overwrites a pre-poisoned buffer.
    fn standardize_into_overwrites_every_entry() {
        let w = array![1.0_f64, -1.0, 2.0, 0.0];
        let mut out = Array1::<f64>::from_elem(4, f64::NAN);
        standardize_into(w.view(), out.view_mut());
        assert!(out.iter().all(|v| v.is_finite()));
    }
}
