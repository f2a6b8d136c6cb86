//! interpolation — predicting a field at new locations.
//!
//! - [`rbf`]: exact Gaussian radial-basis-function interpolation of one
//!   value column of an [`Observations`](crate::data::Observations) table.
//! - [`kriging`]: universal kriging with a linear trend under fitted Matérn
//!   parameters, with kriging variances.

pub mod kriging;
pub mod rbf;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::kriging::{KrigingPrediction, krige};
pub use self::rbf::{GaussianRbf, fit_rbf, fit_rbf_at};
