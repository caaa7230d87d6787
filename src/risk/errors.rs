//! Errors for rolling risk estimation (input validation, configuration
//! checks, and execution setup).
//!
//! This module defines [`RiskError`] and the [`RiskResult`] alias used by the
//! public risk-estimation surface.
//!
//! ## Conventions
//! - **Indices are 0-based** (window starts, factor columns, grid points).
//! - Data-quality problems inside a window are *not* errors: degenerate or
//!   infeasible windows are reported as `NaN` in the risk series, and a
//!   window/horizon longer than the series yields an empty series.
//! - `RiskError` is reserved for inputs or settings that make the run
//!   ill-defined (shape mismatches, invalid grids, invalid worker counts).
//! - A failed equivalence check is not an error either; it is returned as a
//!   typed report next to the series.

/// Crate-wide result alias for risk-estimation operations that may produce
/// [`RiskError`].
pub type RiskResult<T> = Result<T, RiskError>;

/// Unified error type for rolling risk estimation.
#[derive(Debug, Clone, PartialEq)]
pub enum RiskError {
    // ---- Input/data validation ----
    /// Reference series is empty.
    EmptySeries,

    /// Factor matrix has no columns.
    NoFactors,

    /// Factor matrix rows do not match the reference series length.
    FactorLengthMismatch { expected: usize, actual: usize },

    // ---- Shape / grid validation ----
    /// Window length must be at least 1.
    InvalidWindowLength { window_len: usize },

    /// Hyperparameter grid must contain at least one point.
    EmptyGrid,

    /// Grid shift `mu` must be finite.
    InvalidMu { index: usize, value: f64 },

    /// Grid regularization `alpha` must be finite and ≥ 0.
    InvalidAlpha { index: usize, value: f64, reason: &'static str },

    // ---- Execution / scheduling ----
    /// Parallel execution requested with zero workers.
    InvalidWorkerCount { workers: usize },

    /// Dedicated worker pool could not be built.
    ThreadPoolBuild { reason: String },

    /// Unknown execution strategy name.
    InvalidStrategy { name: String, reason: &'static str },

    /// A workspace was used with a shape it was not allocated for.
    WorkspaceShapeMismatch { expected: (usize, usize), actual: (usize, usize) },

    /// Predictor and target windows handed to the solver differ in length.
    WindowLengthMismatch { predictor: usize, target: usize },

    // ---- Verification options ----
    /// Verifier tolerances must be finite and ≥ 0.
    InvalidTolerance { value: f64, reason: &'static str },
}

impl std::error::Error for RiskError {}

impl std::fmt::Display for RiskError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Input/data validation ----
            RiskError::EmptySeries => {
                write!(f, "Reference series is empty.")
            }
            RiskError::NoFactors => {
                write!(f, "Factor matrix must contain at least one factor column.")
            }
            RiskError::FactorLengthMismatch { expected, actual } => {
                write!(
                    f,
                    "Factor matrix must have one row per reference observation: expected {expected}, got {actual}"
                )
            }
            // ---- Shape / grid validation ----
            RiskError::InvalidWindowLength { window_len } => {
                write!(f, "Window length must be at least 1; got: {window_len}")
            }
            RiskError::EmptyGrid => {
                write!(f, "Hyperparameter grid must contain at least one (mu, alpha) point.")
            }
            RiskError::InvalidMu { index, value } => {
                write!(f, "Grid point {index}: mu must be finite; got: {value}")
            }
            RiskError::InvalidAlpha { index, value, reason } => {
                write!(f, "Grid point {index}: invalid alpha {value}. {reason}")
            }
            // ---- Execution / scheduling ----
            RiskError::InvalidWorkerCount { workers } => {
                write!(f, "Parallel execution requires at least one worker; got: {workers}")
            }
            RiskError::ThreadPoolBuild { reason } => {
                write!(f, "Failed to build worker pool: {reason}")
            }
            RiskError::InvalidStrategy { name, reason } => {
                write!(f, "Unknown execution strategy {name:?}. {reason}")
            }
            RiskError::WorkspaceShapeMismatch { expected, actual } => {
                write!(
                    f,
                    "Workspace shape mismatch: expected (window_len, degree) = {expected:?}, got {actual:?}"
                )
            }
            RiskError::WindowLengthMismatch { predictor, target } => {
                write!(
                    f,
                    "Predictor and target windows must have equal length: predictor {predictor}, target {target}"
                )
            }
            // ---- Verification options ----
            RiskError::InvalidTolerance { value, reason } => {
                write!(f, "Invalid verifier tolerance {value}. {reason}")
            }
        }
    }
}

impl From<rayon::ThreadPoolBuildError> for RiskError {
    fn from(err: rayon::ThreadPoolBuildError) -> RiskError {
        RiskError::ThreadPoolBuild { reason: err.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - `Display` messages embedding their payloads.
    // - `std::error::Error` usability through `Box<dyn Error>`.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Each payload-carrying variant mentions its payload in the message.
    fn display_embeds_payloads() {
        let msg = RiskError::FactorLengthMismatch { expected: 100, actual: 99 }.to_string();
        assert!(msg.contains("100") && msg.contains("99"), "got {msg}");

        let msg = RiskError::InvalidMu { index: 2, value: f64::NAN }.to_string();
        assert!(msg.contains("Grid point 2") && msg.contains("NaN"), "got {msg}");

        let msg = RiskError::InvalidAlpha { index: 0, value: -1.0, reason: "Alpha must be >= 0." }
            .to_string();
        assert!(msg.contains("-1") && msg.contains("Alpha must be >= 0."), "got {msg}");

        let msg = RiskError::InvalidStrategy { name: "turbo".into(), reason: "nope" }.to_string();
        assert!(msg.contains("\"turbo\""), "got {msg}");

        let msg = RiskError::WorkspaceShapeMismatch { expected: (50, 3), actual: (40, 3) }
            .to_string();
        assert!(msg.contains("(50, 3)") && msg.contains("(40, 3)"), "got {msg}");
    }

    #[test]
    // Purpose
    // -------
    // `RiskError` can be propagated through `Box<dyn std::error::Error>`.
    fn risk_error_is_std_error() {
        fn fails() -> Result<(), Box<dyn std::error::Error>> {
            Err(RiskError::EmptyGrid)?;
            Ok(())
        }
        let err = fails().unwrap_err();
        assert!(err.to_string().contains("at least one"));
    }
}
