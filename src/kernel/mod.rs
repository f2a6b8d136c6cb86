//! kernel — distances, the Matérn covariance family, and field simulation.
//!
//! Purpose
//! -------
//! Provide the leaf numerical layer of the crate: Euclidean distance
//! matrices between coordinate sets, the Matérn covariance evaluated on
//! them, conversions between the raw range and the practical correlation
//! range, and Gaussian-field simulation for synthetic data.
//!
//! Key behaviors
//! -------------
//! - [`pairwise_distance`] / [`self_distance`] build `Array2<f64>` distance
//!   matrices from row-wise coordinates.
//! - [`matern`] maps distances to covariances with parameters
//!   [`MaternParams`]; [`matern_correlation`] is the scalar unit form.
//! - [`bessel_k`] evaluates `K_ν(x)` for real order.
//! - [`simulate_matern_field`] draws realizations by Cholesky.
//!
//! Invariants & assumptions
//! ------------------------
//! - Coordinates and distances are finite. Parameter validation happens in
//!   [`MaternParams::new`] and the conversion helpers.
//! - Zero distance is the only place the nugget enters the covariance.
//!
//! Conventions
//! -----------
//! - Coordinates are `n×d` arrays, one point per row.
//! - Pure functions; no logging.
//! - Errors are reported as [`KernelError`] via [`KernelResult`].
//!
//! Downstream usage
//! ----------------
//! - `estimation` builds per-slice distance caches once and evaluates
//!   correlation matrices per grid point.
//! - `interpolation` and `spectral` evaluate cross-covariances between
//!   data and target locations.
//!
//! Testing notes
//! -------------
//! - Each submodule carries unit tests for its closed forms and invariants.

pub mod bessel;
pub mod distance;
pub mod errors;
pub mod matern;
pub mod simulation;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::bessel::bessel_k;
pub use self::distance::{max_distance, min_positive_distance, pairwise_distance, self_distance};
pub use self::errors::{KernelError, KernelResult};
pub use self::matern::{
    MaternParams, matern, matern_correlation, practical_correlation_range,
    range_from_practical_correlation_range,
};
pub use self::simulation::simulate_matern_field;

// ---- Optional convenience prelude for downstream crates ------------------
//
// Downstream crates can `use rust_spatial::kernel::prelude::*;` to import
// the primary kernel surface in a single line.

pub mod prelude {
    pub use super::distance::{pairwise_distance, self_distance};
    pub use super::errors::{KernelError, KernelResult};
    pub use super::matern::{
        MaternParams, matern, matern_correlation, practical_correlation_range,
        range_from_practical_correlation_range,
    };
    pub use super::simulation::simulate_matern_field;
}
