//! risk::core::validation — shared input guards for grids and options.
//!
//! Purpose
//! -------
//! Centralize the scalar checks applied when configuration is built, so
//! [`HyperGrid`](crate::risk::core::grid::HyperGrid),
//! [`VerifyOptions`](crate::risk::core::options::VerifyOptions) and
//! [`ExecutionStrategy`](crate::risk::core::options::ExecutionStrategy)
//! report invalid settings with the same error variants.
//!
//! Conventions
//! -----------
//! - Pure validation: no I/O, no allocation beyond error construction.
//! - The first offending value is reported; later ones are not inspected.
use crate::risk::errors::{RiskError, RiskResult};

/// Validate a grid shift `mu`: must be finite.
///
/// # Errors
/// [`RiskError::InvalidMu`] with the grid index and the offending value.
pub fn validate_mu(index: usize, mu: f64) -> RiskResult<()> {
    if !mu.is_finite() {
        return Err(RiskError::InvalidMu { index, value: mu });
    }
    Ok(())
}

/// Validate a ridge strength `alpha`: must be finite and non-negative.
///
/// `alpha == 0` is allowed; a resulting singular system is handled by the
/// solver as an infeasible grid point, not as a configuration error.
///
/// # Errors
/// [`RiskError::InvalidAlpha`] with the grid index, value and reason.
pub fn validate_alpha(index: usize, alpha: f64) -> RiskResult<()> {
    if !alpha.is_finite() {
        return Err(RiskError::InvalidAlpha {
            index,
            value: alpha,
            reason: "Alpha must be finite.",
        });
    }
    if alpha < 0.0 {
        return Err(RiskError::InvalidAlpha {
            index,
            value: alpha,
            reason: "Alpha must be non-negative.",
        });
    }
    Ok(())
}

/// Validate a verifier tolerance: must be finite and non-negative.
///
/// # Errors
/// [`RiskError::InvalidTolerance`] with the value and reason.
pub fn validate_tolerance(tol: f64) -> RiskResult<()> {
    if !tol.is_finite() {
        return Err(RiskError::InvalidTolerance { value: tol, reason: "Tolerance must be finite." });
    }
    if tol < 0.0 {
        return Err(RiskError::InvalidTolerance {
            value: tol,
            reason: "Tolerance must be non-negative.",
        });
    }
    Ok(())
}

/// Validate an explicit worker count: must be at least 1.
///
/// # Errors
/// [`RiskError::InvalidWorkerCount`].
pub fn validate_workers(workers: usize) -> RiskResult<()> {
    if workers == 0 {
        return Err(RiskError::InvalidWorkerCount { workers });
    }
    Ok(())
}
