//! spectral — covariance spectrum and prediction driver.
//!
//! Purpose
//! -------
//! Combine the fast estimator, a lag-grid tabulation of the fitted
//! covariance, its 2-D DFT and an optional kriged surface into one call,
//! [`analyze_spectrum`].
//!
//! Key behaviors
//! -------------
//! - [`dither`] bounds the input size by systematic decimation.
//! - [`LagGrid`] defines the `[−extent, extent]²` lag table.
//! - [`covariance_spectrum`] transforms the table with `rustfft`.
//!
//! Non-features
//! ------------
//! - No plotting; results are plain arrays.

pub mod dither;
pub mod driver;
pub mod lag_grid;
pub mod spectrum;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::dither::{Dithered, MAX_DITHERED_POINTS, dither};
pub use self::driver::{PredictionSurface, SpectrumAnalysis, SpectrumOptions, analyze_spectrum};
pub use self::lag_grid::LagGrid;
pub use self::spectrum::{CUTOFF_FRACTION, Spectrum, covariance_spectrum, fft_frequencies};
