//! spectral::driver — fit, tabulate, transform and (optionally) predict.
//!
//! Purpose
//! -------
//! Run the full covariance analysis of replicated field data in one call:
//! bound the input size, remove column means, fit the Matérn parameters by
//! [`fit_matern_fast`], tabulate the fitted covariance on a lag grid, take
//! its 2-D DFT, and optionally krige a prediction surface around the data
//! centroid.
//!
//! Key behaviors
//! -------------
//! - Dithering (when enabled) keeps every other row until at most
//!   [`MAX_DITHERED_POINTS`] remain and returns a
//!   [`FitWarning::ExcessData`]. Without dithering the full input is fitted.
//! - The lag-grid table is the signal covariance `sill·R(|h|/θ)`; the
//!   nugget is white noise and is left out of the spectrum.
//! - The prediction surface uses the same lag offsets, centred on the
//!   centroid of the (retained) locations: a `points × points` grid for
//!   2-D data, a `points` line for 1-D data.
//!
//! Conventions
//! -----------
//! - All warnings (decimation, fit boundaries) are collected in
//!   [`SpectrumAnalysis::warnings`] in the order they arose.
use crate::{
    estimation::{
        errors::{EstimationError, EstimationResult},
        fast::{FastFit, FastMleOptions, fit_matern_fast},
        warnings::FitWarning,
    },
    interpolation::kriging::{KrigingPrediction, krige},
    kernel::matern::MaternParams,
    spectral::{
        dither::{MAX_DITHERED_POINTS, dither},
        lag_grid::LagGrid,
        spectrum::{Spectrum, covariance_spectrum},
    },
};
use ndarray::{Array2, ArrayView2, Axis};
use tracing::debug;

/// SpectrumOptions — switches for [`analyze_spectrum`].
///
/// Default
/// -------
/// - `dither = true`, `predict = false`, `fast = FastMleOptions::default()`.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectrumOptions {
    pub dither: bool,
    pub predict: bool,
    pub fast: FastMleOptions,
}

impl Default for SpectrumOptions {
    fn default() -> Self {
        Self { dither: true, predict: false, fast: FastMleOptions::default() }
    }
}

/// Kriged surface on the lag grid around the data centroid.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionSurface {
    /// `k×d` target locations (row-major over the lag grid).
    pub targets: Array2<f64>,
    pub prediction: KrigingPrediction,
}

/// SpectrumAnalysis — result of [`analyze_spectrum`].
#[derive(Debug, Clone, PartialEq)]
pub struct SpectrumAnalysis {
    pub fit: FastFit,
    pub params: MaternParams,
    /// Fitted signal covariance on the lag grid (origin at the centre).
    pub covariance: Array2<f64>,
    pub spectrum: Spectrum,
    /// `√(8ν)·θ`.
    pub practical_range: f64,
    pub prediction: Option<PredictionSurface>,
    /// Number of observations actually fitted.
    pub n_used: usize,
    pub warnings: Vec<FitWarning>,
}

/// Fit, tabulate and transform the covariance of `values` (`n×m`).
///
/// # Errors
/// - [`EstimationError::ShapeMismatch`] if `values.nrows() != n`.
/// - Everything [`fit_matern_fast`] and [`krige`] return.
pub fn analyze_spectrum(
    locations: ArrayView2<f64>, values: ArrayView2<f64>, smoothness: f64, lag_grid: &LagGrid,
    options: &SpectrumOptions,
) -> EstimationResult<SpectrumAnalysis> {
    let n = locations.nrows();
    if values.nrows() != n {
        return Err(EstimationError::ShapeMismatch { expected: n, found: values.nrows() });
    }
    let mut warnings = Vec::new();
    let (locations, values) = if options.dither {
        let out = dither(locations, values, MAX_DITHERED_POINTS);
        warnings.extend(out.warning);
        (out.locations, out.values)
    } else {
        (locations.to_owned(), values.to_owned())
    };
    let n_used = locations.nrows();

    let detrended = match values.mean_axis(Axis(0)) {
        Some(means) => &values - &means,
        None => values.clone(),
    };
    let fit = fit_matern_fast(locations.view(), detrended.view(), smoothness, &options.fast)?;
    warnings.extend(fit.warnings.iter().cloned());
    let params = fit.params()?;
    let practical_range = params.practical_range();

    let signal = params.without_nugget();
    let covariance = lag_grid.distances().mapv(|d| signal.covariance_at(d));
    let spectrum = covariance_spectrum(&covariance, lag_grid.spacing())?;
    debug!(n_used, practical_range, cutoff = ?spectrum.cutoff, "spectral analysis");

    let prediction = if options.predict {
        let targets = surface_targets(locations.view(), lag_grid);
        let prediction = krige(locations.view(), detrended.view(), targets.view(), &params)?;
        Some(PredictionSurface { targets, prediction })
    } else {
        None
    };

    Ok(SpectrumAnalysis {
        fit,
        params,
        covariance,
        spectrum,
        practical_range,
        prediction,
        n_used,
        warnings,
    })
}

/// Centroid plus lag offsets: a square grid in 2-D, a line in 1-D.
fn surface_targets(locations: ArrayView2<f64>, lag_grid: &LagGrid) -> Array2<f64> {
    let centroid = locations.mean_axis(Axis(0)).unwrap_or_else(|| ndarray::Array1::zeros(2));
    let offsets = lag_grid.offsets();
    let p = lag_grid.points;
    if locations.ncols() == 1 {
        return Array2::from_shape_fn((p, 1), |(k, _)| centroid[0] + offsets[k]);
    }
    Array2::from_shape_fn((p * p, 2), |(k, j)| {
        let (row, col) = (k / p, k % p);
        centroid[j] + if j == 0 { offsets[col] } else { offsets[row] }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::simulation::simulate_matern_field;
    use rand::{SeedableRng, rngs::StdRng};

    fn lattice(side: usize) -> Array2<f64> {
        Array2::from_shape_fn((side * side, 2), |(k, j)| {
            if j == 0 { (k % side) as f64 } else { (k / side) as f64 }
        })
    }

    #[test]
    // Purpose
    // -------
    // End-to-end run on a small simulated field produces consistent pieces.
    //
    // Expect
    // ------
    // - Covariance peak at the lag-grid centre equals the fitted sill.
    // - Practical range is √(8ν)·θ̂.
    // - The prediction surface has one row per lag-grid node.
    fn analysis_pieces_are_consistent() {
        let locs = lattice(6);
        let truth = MaternParams::new(1.5, 1.0, 1.0, 0.05).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let values = simulate_matern_field(locs.view(), &truth, 8, &mut rng).unwrap();
        let grid = LagGrid::new(4.0, 9).unwrap();
        let opts = SpectrumOptions { predict: true, ..SpectrumOptions::default() };

        let out = analyze_spectrum(locs.view(), values.view(), 1.0, &grid, &opts).unwrap();

        assert_eq!(out.n_used, 36);
        assert_eq!(out.covariance.dim(), (9, 9));
        assert!((out.covariance[[4, 4]] - out.fit.sill).abs() <= 1e-12 * out.fit.sill.max(1.0));
        assert!((out.practical_range - 8f64.sqrt() * out.fit.range).abs() < 1e-9);
        let surface = out.prediction.unwrap();
        assert_eq!(surface.targets.dim(), (81, 2));
        assert_eq!(surface.prediction.values.dim(), (81, 8));
        assert_eq!(out.spectrum.magnitude.dim(), (9, 9));
    }

    #[test]
    fn one_dimensional_targets_form_a_line() {
        let locs = ndarray::array![[0.0], [2.0], [4.0]];
        let grid = LagGrid::new(1.0, 3).unwrap();
        let t = surface_targets(locs.view(), &grid);
        assert_eq!(t, ndarray::array![[1.0], [2.0], [3.0]]);
    }

    #[test]
    fn shape_mismatch_is_rejected() {
        let locs = lattice(3);
        let values = Array2::<f64>::zeros((4, 1));
        let grid = LagGrid::new(1.0, 3).unwrap();
        let err = analyze_spectrum(locs.view(), values.view(), 1.0, &grid, &SpectrumOptions::default());
        assert_eq!(err.unwrap_err(), EstimationError::ShapeMismatch { expected: 9, found: 4 });
    }
}
