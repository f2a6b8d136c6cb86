//! kernel::errors — error surface for distance and Matérn kernel evaluation.
//!
//! Purpose
//! -------
//! Collect the validation failures that can occur before any kernel value is
//! computed: non-positive ranges or smoothness, negative variances, and
//! coordinate sets whose dimensions do not line up. The kernel layer is pure
//! arithmetic, so almost every failure here is a configuration problem
//! detected up front; the one exception is a covariance that cannot be
//! factorized when simulating.
//!
//! Conventions
//! -----------
//! - Each variant carries the offending value so that callers can report it
//!   without re-deriving context.
//! - Higher layers (estimation, interpolation) convert [`KernelError`] into
//!   their own error types via `From`.

pub type KernelResult<T> = Result<T, KernelError>;

/// KernelError — invalid kernel parameters or incompatible coordinate sets.
///
/// Variants
/// --------
/// - `InvalidRange { value }`
///   Range parameter θ is non-finite or `≤ 0`.
/// - `InvalidSmoothness { value }`
///   Smoothness ν is non-finite or `≤ 0`.
/// - `InvalidVariance { value }`
///   Marginal variance is non-finite or negative.
/// - `InvalidNugget { value }`
///   Nugget is non-finite or negative.
/// - `InvalidPracticalRange { value }`
///   Practical correlation range is non-finite or `≤ 0`.
/// - `DimensionMismatch { left, right }`
///   Two coordinate sets have a different number of spatial dimensions.
/// - `NonFiniteDistance { row, col, value }`
///   A distance matrix handed to the kernel contains NaN or ±∞.
/// - `NotPositiveDefinite { dim }`
///   A covariance matrix built for simulation could not be factorized.
#[derive(Debug, Clone, PartialEq)]
pub enum KernelError {
    InvalidRange { value: f64 },
    InvalidSmoothness { value: f64 },
    InvalidVariance { value: f64 },
    InvalidNugget { value: f64 },
    InvalidPracticalRange { value: f64 },
    DimensionMismatch { left: usize, right: usize },
    NonFiniteDistance { row: usize, col: usize, value: f64 },
    NotPositiveDefinite { dim: usize },
}

impl std::error::Error for KernelError {}

impl std::fmt::Display for KernelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KernelError::InvalidRange { value } => {
                write!(f, "Invalid range: {value}, must be finite and > 0")
            }
            KernelError::InvalidSmoothness { value } => {
                write!(f, "Invalid smoothness: {value}, must be finite and > 0")
            }
            KernelError::InvalidVariance { value } => {
                write!(f, "Invalid variance: {value}, must be finite and >= 0")
            }
            KernelError::InvalidNugget { value } => {
                write!(f, "Invalid nugget: {value}, must be finite and >= 0")
            }
            KernelError::InvalidPracticalRange { value } => {
                write!(f, "Invalid practical correlation range: {value}, must be finite and > 0")
            }
            KernelError::DimensionMismatch { left, right } => {
                write!(f, "Coordinate dimension mismatch: {left} vs {right} columns")
            }
            KernelError::NonFiniteDistance { row, col, value } => {
                write!(f, "Non-finite distance at ({row}, {col}): {value}")
            }
            KernelError::NotPositiveDefinite { dim } => {
                write!(f, "Covariance matrix of dimension {dim} is not positive definite")
            }
        }
    }
}
