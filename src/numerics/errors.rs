//! Errors for the numeric kernels.
//!
//! These never cross the public risk-estimation boundary: the ridge solver
//! treats any [`NumericError`] from a grid point as "infeasible" and moves on
//! to the next point. They exist so the kernels can be tested on their own.

/// Result alias for numeric kernels that may produce [`NumericError`].
pub type NumericResult<T> = Result<T, NumericError>;

/// Failure modes of the small dense linear-algebra kernels.
#[derive(Debug, Clone, PartialEq)]
pub enum NumericError {
    /// Cholesky pivot was zero, negative, or non-finite: the matrix is not
    /// (numerically) positive definite.
    NonPositivePivot { index: usize, value: f64 },

    /// A buffer did not match the expected dimension.
    DimensionMismatch { expected: usize, actual: usize },
}

impl std::error::Error for NumericError {}

impl std::fmt::Display for NumericError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NumericError::NonPositivePivot { index, value } => {
                write!(f, "Matrix is not positive definite: pivot {index} is {value}")
            }
            NumericError::DimensionMismatch { expected, actual } => {
                write!(f, "Dimension mismatch: expected {expected}, got {actual}")
            }
        }
    }
}
