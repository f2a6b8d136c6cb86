//! optimization — profile-likelihood solver, dense linear algebra, and the
//! numerical error surface.
//!
//! Purpose
//! -------
//! Provide the numerical layer under the estimators: an Argmin-backed
//! maximizer for scalar profile likelihoods, Cholesky / QR / eigen helpers
//! on `ndarray` matrices, and a single error enum for every numerical or
//! solver failure.
//!
//! Key behaviors
//! -------------
//! - Maximize a scalar log-likelihood `ℓ(θ)` by golden-section search
//!   (`loglik_optimizer`).
//! - Supply Gaussian log-likelihood ingredients and factorizations
//!   (`numerical_stability`).
//! - Normalize numerical failures, configuration issues and backend solver
//!   errors into [`errors::OptError`] with the alias `OptResult<T>`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs are finite once upstream validation has passed; numerical
//!   breakdowns (non-positive-definite matrices, non-finite costs) are
//!   reported as `OptError`, not panics.
//!
//! Conventions
//! -----------
//! - Solvers conceptually maximize `ℓ(θ)` by minimizing `c(θ) = -ℓ(θ)`;
//!   user-facing outcomes are expressed in terms of `ℓ`.
//! - Callers never see raw Argmin errors.
//! - No logging here except the optional verbose solver observer.
//!
//! Downstream usage
//! ----------------
//! - `estimation` uses both submodules; `interpolation`, `kernel::simulation`
//!   and `spectral` use the linear-algebra helpers.
//! - Front-ends can import the curated surface via
//!   `optimization::prelude::*`.
//!
//! Testing notes
//! -------------
//! - Unit tests in the submodules cover solver wiring, validation and
//!   closed-form linear algebra; `errors` tests the Argmin round trip.

pub mod errors;
pub mod loglik_optimizer;
pub mod numerical_stability;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_spatial::optimization::prelude::*;
//
// to import the main optimization surface in a single line.

pub mod prelude {
    pub use super::errors::{OptError, OptResult};
    pub use super::loglik_optimizer::prelude::*;
    pub use super::numerical_stability::prelude::*;
}
