//! rust_spatial — Matérn covariance estimation, interpolation and spectra
//! for scattered spatial data, with Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that
//! exposes the main entry points to Python via the `_rust_spatial`
//! extension module.
//!
//! Key behaviors
//! -------------
//! - Re-export the core modules as the public crate surface:
//!   - [`data`]: validated observation tables.
//!   - [`kernel`]: distances, the Matérn family, field simulation.
//!   - [`estimation`]: grid-search and fast maximum-likelihood fits.
//!   - [`interpolation`]: RBF interpolation and universal kriging.
//!   - [`spectral`]: the fit → lag grid → DFT → prediction driver.
//!   - [`optimization`]: profile-likelihood maximizer and dense linear
//!     algebra helpers.
//! - With `python-bindings`, define `#[pyclass]` wrappers and the
//!   `#[pymodule]` initializer for `_rust_spatial`, with `interpolation`,
//!   `estimation` and `spectral` submodules.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work lives in the inner modules; the binding layer only
//!   converts inputs, forwards calls and maps errors.
//! - Python callers receive `ValueError` for every [`EstimationError`].
//!
//! Conventions
//! -----------
//! - Coordinates are `n×d` arrays with `d ∈ {1, 2}`; replicated values are
//!   `n×m` arrays, one column per realization.
//! - Diagnostics that do not abort a fit are returned as
//!   [`FitWarning`](estimation::FitWarning) values and logged through
//!   `tracing`; the crate never installs a subscriber.
//!
//! Testing notes
//! -------------
//! - Unit tests sit next to each module; end-to-end scenarios live in
//!   `tests/integration_matern_pipeline.rs`.

pub mod data;
pub mod estimation;
pub mod interpolation;
pub mod kernel;
pub(crate) mod maybe_rayon;
pub mod optimization;
pub mod spectral;
pub mod utils;

pub use estimation::EstimationError;

#[cfg(feature = "python-bindings")]
use numpy::{IntoPyArray, PyArray1, PyArray2, PyArray3};

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    data::Observations,
    estimation::{
        fast::{FastFit, fit_matern_fast as fit_fast},
        spatial::{LengthscaleFit, SpatialFitRow, fit_matern_lengthscale as fit_lengthscale},
    },
    interpolation::rbf::fit_rbf_at,
    spectral::{
        driver::{SpectrumAnalysis, SpectrumOptions, analyze_spectrum as analyze},
        lag_grid::LagGrid,
    },
    utils::{
        extract_fast_options, extract_grid, extract_matrix, extract_times, extract_vector,
    },
};

/// Gaussian RBF interpolation of `values` observed at `locations` onto
/// `targets`.
///
/// Parameters
/// ----------
/// - `locations`: `n×d` array-like (`d ∈ {1, 2}`); a 1-D input is `n×1`.
/// - `values`: length-`n` array-like.
/// - `targets`: `k×d` array-like.
/// - `kernel_variance`: Gaussian kernel variance, `> 0`.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(signature = (locations, values, targets, kernel_variance = 1.0))]
pub fn fit_rbf<'py>(
    py: Python<'py>, locations: &Bound<'py, PyAny>, values: &Bound<'py, PyAny>,
    targets: &Bound<'py, PyAny>, kernel_variance: f64,
) -> PyResult<Bound<'py, PyArray1<f64>>> {
    let coords = extract_matrix(py, locations)?;
    let values = extract_vector(py, values)?;
    let targets = extract_matrix(py, targets)?;
    let obs = Observations::new(coords, None, vec![("value".to_string(), values)])
        .map_err(estimation::EstimationError::from)?;
    let predicted = fit_rbf_at(&obs, targets.view(), "value", kernel_variance)?;
    Ok(predicted.into_pyarray(py))
}

/// MaternGridFit — Python-facing view of a [`LengthscaleFit`].
///
/// Rows are `(smoothness, range, variance, log_likelihood)` tuples; the
/// temporal fit, when present, is `(ar1, variance, log_likelihood)`.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_spatial.estimation")]
pub struct MaternGridFit {
    inner: LengthscaleFit,
}

#[cfg(feature = "python-bindings")]
fn row_tuple(row: &SpatialFitRow) -> (f64, f64, f64, f64) {
    (row.smoothness, row.range, row.variance, row.log_likelihood)
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl MaternGridFit {
    #[getter]
    pub fn best(&self) -> (f64, f64, f64, f64) {
        row_tuple(&self.inner.best)
    }

    #[getter]
    pub fn rows(&self) -> Vec<(f64, f64, f64, f64)> {
        self.inner.rows.iter().map(row_tuple).collect()
    }

    /// Log-likelihood over `[smoothness, range, variance]`.
    #[getter]
    pub fn surface<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray3<f64>> {
        self.inner.surface.clone().into_pyarray(py)
    }

    #[getter]
    pub fn temporal(&self) -> Option<(f64, f64, f64)> {
        self.inner.temporal.as_ref().map(|t| (t.ar1, t.variance, t.log_likelihood))
    }

    #[getter]
    pub fn skipped_grid_points(&self) -> usize {
        self.inner.skipped_grid_points
    }

    #[getter]
    pub fn n_slices(&self) -> usize {
        self.inner.n_slices
    }

    #[getter]
    pub fn warnings(&self) -> Vec<String> {
        self.inner.warnings.iter().map(ToString::to_string).collect()
    }
}

/// Grid-search Matérn fit over `smoothness × range × variance`, with an
/// optional AR(1) temporal axis when `times` are given.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(signature = (
    locations, values, range_grid, smoothness_grid, variance_grid, times = None, ar1_grid = None
))]
#[allow(clippy::too_many_arguments)]
pub fn fit_matern_lengthscale<'py>(
    py: Python<'py>, locations: &Bound<'py, PyAny>, values: &Bound<'py, PyAny>,
    range_grid: &Bound<'py, PyAny>, smoothness_grid: &Bound<'py, PyAny>,
    variance_grid: &Bound<'py, PyAny>, times: Option<&Bound<'py, PyAny>>,
    ar1_grid: Option<&Bound<'py, PyAny>>,
) -> PyResult<MaternGridFit> {
    let coords = extract_matrix(py, locations)?;
    let values = extract_vector(py, values)?;
    let times = times.map(extract_times).transpose()?;
    let grid = extract_grid(py, range_grid, smoothness_grid, variance_grid, ar1_grid)?;
    let obs = Observations::new(coords, times, vec![("value".to_string(), values)])
        .map_err(estimation::EstimationError::from)?;
    let inner = fit_lengthscale(&obs, "value", &grid)?;
    Ok(MaternGridFit { inner })
}

/// MaternFastFit — Python-facing view of a [`FastFit`].
///
/// Instances are returned by `fit_matern_fast` and are read-only.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_spatial.estimation")]
pub struct MaternFastFit {
    inner: FastFit,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl MaternFastFit {
    #[getter]
    pub fn range(&self) -> f64 {
        self.inner.range
    }

    #[getter]
    pub fn sill(&self) -> f64 {
        self.inner.sill
    }

    #[getter]
    pub fn nugget(&self) -> f64 {
        self.inner.nugget
    }

    #[getter]
    pub fn smoothness(&self) -> f64 {
        self.inner.smoothness
    }

    #[getter]
    pub fn trace(&self) -> f64 {
        self.inner.trace
    }

    #[getter]
    pub fn log_likelihood(&self) -> f64 {
        self.inner.log_likelihood
    }

    /// `(range, lambda, sill, log_likelihood)` per range candidate.
    #[getter]
    pub fn profile(&self) -> Vec<(f64, f64, f64, f64)> {
        self.inner.profile.iter().map(|r| (r.range, r.lambda, r.sill, r.log_likelihood)).collect()
    }

    #[getter]
    pub fn warnings(&self) -> Vec<String> {
        self.inner.warnings.iter().map(ToString::to_string).collect()
    }
}

/// Fast Matérn maximum-likelihood fit with linear trend and nugget.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(signature = (
    locations, values, smoothness, range_candidates = None, lambda_grid = None, tol = None,
    refine_range = None
))]
pub fn fit_matern_fast<'py>(
    py: Python<'py>, locations: &Bound<'py, PyAny>, values: &Bound<'py, PyAny>, smoothness: f64,
    range_candidates: Option<&Bound<'py, PyAny>>, lambda_grid: Option<&Bound<'py, PyAny>>,
    tol: Option<f64>, refine_range: Option<bool>,
) -> PyResult<MaternFastFit> {
    let coords = extract_matrix(py, locations)?;
    let values = extract_matrix(py, values)?;
    let opts = extract_fast_options(py, range_candidates, lambda_grid, tol, refine_range)?;
    let inner = fit_fast(coords.view(), values.view(), smoothness, &opts)?;
    Ok(MaternFastFit { inner })
}

/// SpectrumResult — Python-facing view of a [`SpectrumAnalysis`].
#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_spatial.spectral")]
pub struct SpectrumResult {
    inner: SpectrumAnalysis,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl SpectrumResult {
    #[getter]
    pub fn fit(&self) -> MaternFastFit {
        MaternFastFit { inner: self.inner.fit.clone() }
    }

    #[getter]
    pub fn practical_range(&self) -> f64 {
        self.inner.practical_range
    }

    #[getter]
    pub fn cutoff(&self) -> Option<f64> {
        self.inner.spectrum.cutoff
    }

    #[getter]
    pub fn n_used(&self) -> usize {
        self.inner.n_used
    }

    #[getter]
    pub fn covariance<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        self.inner.covariance.clone().into_pyarray(py)
    }

    #[getter]
    pub fn spectrum<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        self.inner.spectrum.magnitude.clone().into_pyarray(py)
    }

    #[getter]
    pub fn frequencies<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        self.inner.spectrum.frequencies.clone().into_pyarray(py)
    }

    /// `(targets, values, variance)` when a prediction was requested.
    #[getter]
    #[allow(clippy::type_complexity)]
    pub fn prediction<'py>(
        &self, py: Python<'py>,
    ) -> Option<(Bound<'py, PyArray2<f64>>, Bound<'py, PyArray2<f64>>, Bound<'py, PyArray1<f64>>)>
    {
        self.inner.prediction.as_ref().map(|s| {
            (
                s.targets.clone().into_pyarray(py),
                s.prediction.values.clone().into_pyarray(py),
                s.prediction.variance.clone().into_pyarray(py),
            )
        })
    }

    #[getter]
    pub fn warnings(&self) -> Vec<String> {
        self.inner.warnings.iter().map(ToString::to_string).collect()
    }
}

/// Fit, tabulate on a lag grid, Fourier-transform and optionally krige.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(signature = (locations, values, smoothness, extent, points = 65, dither = true, predict = false))]
pub fn analyze_spectrum<'py>(
    py: Python<'py>, locations: &Bound<'py, PyAny>, values: &Bound<'py, PyAny>, smoothness: f64,
    extent: f64, points: usize, dither: bool, predict: bool,
) -> PyResult<SpectrumResult> {
    let coords = extract_matrix(py, locations)?;
    let values = extract_matrix(py, values)?;
    let grid = LagGrid::new(extent, points)?;
    let opts = SpectrumOptions { dither, predict, ..SpectrumOptions::default() };
    let inner = analyze(coords.view(), values.view(), smoothness, &grid, &opts)?;
    Ok(SpectrumResult { inner })
}

/// _rust_spatial — PyO3 module initializer for the Python extension.
///
/// Creates the `interpolation`, `estimation` and `spectral` submodules,
/// attaches them to `_rust_spatial`, and registers them in `sys.modules`
/// so `rust_spatial.<submodule>` imports work.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _rust_spatial<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let interpolation_mod = PyModule::new(_py, "interpolation")?;
    let estimation_mod = PyModule::new(_py, "estimation")?;
    let spectral_mod = PyModule::new(_py, "spectral")?;

    interpolation_mod.add_function(wrap_pyfunction!(fit_rbf, &interpolation_mod)?)?;
    estimation_mod.add_function(wrap_pyfunction!(fit_matern_lengthscale, &estimation_mod)?)?;
    estimation_mod.add_function(wrap_pyfunction!(fit_matern_fast, &estimation_mod)?)?;
    estimation_mod.add_class::<MaternGridFit>()?;
    estimation_mod.add_class::<MaternFastFit>()?;
    spectral_mod.add_function(wrap_pyfunction!(analyze_spectrum, &spectral_mod)?)?;
    spectral_mod.add_class::<SpectrumResult>()?;

    let modules = _py.import("sys")?.getattr("modules")?;
    for (name, sub) in [
        ("interpolation", &interpolation_mod),
        ("estimation", &estimation_mod),
        ("spectral", &spectral_mod),
    ] {
        m.add_submodule(sub)?;
        // Manually add submodules into sys.modules to allow for dot notation.
        modules.set_item(format!("rust_spatial.{name}"), sub)?;
    }
    Ok(())
}
