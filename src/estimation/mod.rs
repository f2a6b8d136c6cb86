//! Covariance estimation for Matérn random fields.
//!
//! Two estimators share this module:
//!
//! - [`spatial::fit_matern_lengthscale`]: exhaustive grid search over
//!   smoothness, range and variance on an [`Observations`] table, with time
//!   slices treated as independent replicates and an optional separable
//!   AR(1) temporal fit ([`temporal`]).
//! - [`fast::fit_matern_fast`]: trend-projected profile likelihood with a
//!   nugget, diagonalizing once per range candidate and profiling the sill
//!   and nugget ratio ([`profile`]).
//!
//! Both report [`FitWarning`]s (also logged via `tracing::warn!`) when the
//! optimum sits on the edge of a supplied axis, and fail with
//! [`EstimationError`] only on invalid configuration or when no candidate
//! produced a finite likelihood.
//!
//! [`Observations`]: crate::data::Observations
pub mod cache;
pub mod errors;
pub mod fast;
pub mod grid;
pub mod profile;
pub mod spatial;
pub mod temporal;
pub mod warnings;

pub use self::errors::{EstimationError, EstimationResult};
pub use self::fast::{FastFit, FastMleOptions, RangeProfileRow, fit_matern_fast};
pub use self::grid::{MaternGrid, linear_axis};
pub use self::spatial::{LengthscaleFit, SpatialFitRow, fit_matern_lengthscale};
pub use self::temporal::{TemporalFit, fit_temporal_ar1};
pub use self::warnings::{FitWarning, GridAxis};

pub mod prelude {
    pub use super::errors::{EstimationError, EstimationResult};
    pub use super::fast::{FastFit, FastMleOptions, fit_matern_fast};
    pub use super::grid::{MaternGrid, linear_axis};
    pub use super::spatial::{LengthscaleFit, fit_matern_lengthscale};
    pub use super::warnings::{FitWarning, GridAxis};
}
