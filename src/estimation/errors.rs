//! Errors for covariance estimation, interpolation and the spectral driver.
//!
//! This module defines [`EstimationError`], the top-level error of the crate.
//! It wraps the lower layers ([`KernelError`], [`DataError`], [`OptError`])
//! and adds the configuration failures that only make sense at this level
//! (malformed grids, duplicate locations, bad lag grids). It implements
//! `Display`/`Error` and, with the `python-bindings` feature, converts to a
//! Python `ValueError`.
//!
//! ## Conventions
//! - Configuration problems are detected before any likelihood is evaluated.
//! - Numerical breakdown at a single grid point is *not* an error; it is
//!   recorded as `−∞` and counted. Only when every grid point fails does
//!   [`EstimationError::NoFiniteLikelihood`] surface.
use crate::{data::errors::DataError, kernel::errors::KernelError, optimization::errors::OptError};
#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Crate-wide result alias for estimation, interpolation and spectral
/// analysis.
pub type EstimationResult<T> = Result<T, EstimationError>;

/// Unified error type for the estimation stack.
#[derive(Debug, Clone, PartialEq)]
pub enum EstimationError {
    // ---- Wrapped layers ----
    Kernel(KernelError),
    Data(DataError),
    Optimization(OptError),

    // ---- Configuration ----
    /// A parameter grid axis is empty or holds an invalid value.
    InvalidGrid { axis: &'static str, reason: String },

    /// Two observations share a location where distinct locations are
    /// required (RBF interpolation).
    DuplicateLocation { first: usize, second: usize },

    /// Lag grid must have a positive finite extent and at least 2 points.
    InvalidLagGrid { extent: f64, points: usize },

    /// Covariance table handed to the spectrum must be square and
    /// non-empty, with a positive finite spacing.
    InvalidSpectrumTable { rows: usize, cols: usize, spacing: f64 },

    /// RBF kernel variance must be finite and > 0.
    InvalidKernelVariance { value: f64 },

    /// Values matrix rows differ from the number of locations.
    ShapeMismatch { expected: usize, found: usize },

    // ---- Outcome ----
    /// Every grid point produced a non-finite log-likelihood.
    NoFiniteLikelihood { evaluated: usize },
}

impl std::error::Error for EstimationError {}

impl std::fmt::Display for EstimationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EstimationError::Kernel(err) => write!(f, "Kernel error: {err}"),
            EstimationError::Data(err) => write!(f, "Data error: {err}"),
            EstimationError::Optimization(err) => write!(f, "Optimization error: {err}"),
            EstimationError::InvalidGrid { axis, reason } => {
                write!(f, "Invalid {axis} grid: {reason}")
            }
            EstimationError::DuplicateLocation { first, second } => {
                write!(f, "Observations {first} and {second} share the same location")
            }
            EstimationError::InvalidLagGrid { extent, points } => {
                write!(
                    f,
                    "Invalid lag grid: extent {extent} must be finite and > 0, points {points} must be >= 2"
                )
            }
            EstimationError::InvalidSpectrumTable { rows, cols, spacing } => {
                write!(
                    f,
                    "Invalid covariance table: {rows}x{cols} with spacing {spacing}; expected a non-empty square table and spacing > 0"
                )
            }
            EstimationError::InvalidKernelVariance { value } => {
                write!(f, "Invalid RBF kernel variance: {value}, must be finite and > 0")
            }
            EstimationError::ShapeMismatch { expected, found } => {
                write!(f, "Values have {found} rows, expected {expected} (one per location)")
            }
            EstimationError::NoFiniteLikelihood { evaluated } => {
                write!(f, "All {evaluated} grid points produced a non-finite log-likelihood")
            }
        }
    }
}

impl From<KernelError> for EstimationError {
    fn from(err: KernelError) -> Self {
        EstimationError::Kernel(err)
    }
}

impl From<DataError> for EstimationError {
    fn from(err: DataError) -> Self {
        EstimationError::Data(err)
    }
}

impl From<OptError> for EstimationError {
    fn from(err: OptError) -> Self {
        EstimationError::Optimization(err)
    }
}

/// Convert an [`EstimationError`] into a Python `ValueError` with the error
/// message.
#[cfg(feature = "python-bindings")]
impl From<EstimationError> for PyErr {
    fn from(err: EstimationError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
