//! numerical_stability — log-scale transforms and dense factorizations.
//!
//! Purpose
//! -------
//! Collect the numerically delicate pieces shared by the likelihood code:
//! positive scale parameters handled on the log scale, and Cholesky / QR /
//! symmetric-eigen factorizations with failures surfaced as
//! [`OptError`](crate::optimization::errors::OptError).
//!
//! Key behaviors
//! -------------
//! - [`transformations`]: `log_space` candidate grids, guarded
//!   `ln`/`exp` mapping for one-dimensional searches, and the shared
//!   tolerances `EIGEN_EPS` and `GENERAL_TOL`.
//! - [`linalg`]: `ndarray` ↔ `nalgebra` copies, Gaussian log-likelihood
//!   ingredients (`ln|A|`, `zᵀA⁻¹z`), Cholesky solves, the residual basis
//!   of a trend matrix, and a clamped symmetric eigendecomposition.
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs are finite; shape and domain validation happens upstream in
//!   `data` and `estimation`.
//! - Symmetric inputs are assumed symmetric; nothing here re-symmetrizes.
//!
//! Conventions
//! -----------
//! - Pure numerical helpers: no logging, no I/O, no global state.
//! - All fallible routines return `OptResult<T>`.
//!
//! Downstream usage
//! ----------------
//! - Grid search calls `log_det_and_quad` once per (slice, range,
//!   smoothness) triple.
//! - The fast estimator uses `residual_basis` once and `symmetric_eigen`
//!   once per range candidate.
//! - Interpolation and simulation use `cholesky_solve` and
//!   `cholesky_lower`.
//!
//! Testing notes
//! -------------
//! - Unit tests in [`linalg`] check closed-form 2×2 cases, orthogonality
//!   of the residual basis and eigen reconstruction.
//! - Unit tests in [`transformations`] check grid endpoints and ratios.

pub mod linalg;
pub mod transformations;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::linalg::{
    cholesky_lower, cholesky_solve, log_det_and_quad, residual_basis, symmetric_eigen,
    to_array2, to_dmatrix,
};
pub use self::transformations::{
    EIGEN_EPS, GENERAL_TOL, LOG_FLOOR, from_log_scale, log_space, to_log_scale,
};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_spatial::optimization::numerical_stability::prelude::*;
//
// to import the main numerical-stability surface in a single line.

pub mod prelude {
    pub use super::linalg::{
        cholesky_lower, cholesky_solve, log_det_and_quad, residual_basis, symmetric_eigen,
    };
    pub use super::transformations::{EIGEN_EPS, GENERAL_TOL, log_space};
}
