//! Python-input conversion helpers for the PyO3 layer.
//!
//! Every helper accepts the loose array-likes Python callers pass (numpy
//! arrays, pandas objects exposing `to_numpy`, plain sequences) and returns
//! owned `ndarray` values or validated option structs. Errors become
//! `TypeError`/`ValueError` before any numerical code runs.
#[cfg(feature = "python-bindings")]
use ndarray::{Array1, Array2, Axis};

#[cfg(feature = "python-bindings")]
use pyo3::{
    exceptions::{PyTypeError, PyValueError},
    prelude::*,
    types::PyAny,
};

#[cfg(feature = "python-bindings")]
use numpy::{
    IntoPyArray,    // Vec → PyArray
    PyArrayMethods, // .readonly()
    PyReadonlyArray1,
    PyReadonlyArray2,
};

#[cfg(feature = "python-bindings")]
use crate::{
    estimation::{fast::FastMleOptions, grid::MaternGrid},
    optimization::numerical_stability::GENERAL_TOL,
};

#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_f64_array<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray1<'py, f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray1<f64>>() {
        if arr_ro.as_slice().is_ok() {
            return Ok(arr_ro);
        }
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(series_ro) = obj.extract::<PyReadonlyArray1<f64>>() {
            if series_ro.as_slice().is_ok() {
                return Ok(series_ro);
            }
        }
    }

    let vec: Vec<f64> = raw_data.extract().map_err(|_| {
        PyTypeError::new_err("expected a 1-D numpy.ndarray, pandas.Series, or sequence of float64")
    })?;
    Ok(vec.into_pyarray(py).readonly())
}

/// Owned copy of a 1-D float array-like.
#[cfg(feature = "python-bindings")]
pub fn extract_vector<'py>(py: Python<'py>, raw: &Bound<'py, PyAny>) -> PyResult<Array1<f64>> {
    Ok(extract_f64_array(py, raw)?.as_array().to_owned())
}

/// Owned `n×k` matrix from a 2-D array-like; a 1-D input becomes `n×1`.
///
/// Used for both coordinates (`k ∈ {1, 2}`) and replicated values.
#[cfg(feature = "python-bindings")]
pub fn extract_matrix<'py>(py: Python<'py>, raw: &Bound<'py, PyAny>) -> PyResult<Array2<f64>> {
    if let Ok(arr) = raw.extract::<PyReadonlyArray2<f64>>() {
        return Ok(arr.as_array().to_owned());
    }
    if let Ok(obj) = raw.call_method("to_numpy", (false,), None) {
        if let Ok(arr) = obj.extract::<PyReadonlyArray2<f64>>() {
            return Ok(arr.as_array().to_owned());
        }
    }
    if let Ok(rows) = raw.extract::<Vec<Vec<f64>>>() {
        let ncols = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|r| r.len() != ncols) {
            return Err(PyValueError::new_err("rows must all have the same length"));
        }
        let flat: Vec<f64> = rows.into_iter().flatten().collect();
        let nrows = flat.len().checked_div(ncols).unwrap_or(0);
        return Array2::from_shape_vec((nrows, ncols), flat)
            .map_err(|e| PyValueError::new_err(e.to_string()));
    }
    Ok(extract_vector(py, raw)?.insert_axis(Axis(1)))
}

/// Build [`FastMleOptions`] from optional Python keyword arguments.
#[cfg(feature = "python-bindings")]
pub fn extract_fast_options<'py>(
    py: Python<'py>, range_candidates: Option<&Bound<'py, PyAny>>,
    lambda_grid: Option<&Bound<'py, PyAny>>, tol: Option<f64>, refine_range: Option<bool>,
) -> PyResult<FastMleOptions> {
    let defaults = FastMleOptions::default();
    let range_candidates =
        range_candidates.map(|raw| extract_vector(py, raw).map(|a| a.to_vec())).transpose()?;
    let lambda_grid = match lambda_grid {
        Some(raw) => extract_vector(py, raw)?.to_vec(),
        None => defaults.lambda_grid,
    };
    let tol = tol.unwrap_or(GENERAL_TOL);
    if !tol.is_finite() || tol <= 0.0 {
        return Err(PyValueError::new_err("tol must be finite and > 0"));
    }
    Ok(FastMleOptions {
        range_candidates,
        lambda_grid,
        tol,
        refine_range: refine_range.unwrap_or(defaults.refine_range),
    })
}

/// Integer time indices from a sequence or 1-D integer array.
#[cfg(feature = "python-bindings")]
pub fn extract_times<'py>(raw: &Bound<'py, PyAny>) -> PyResult<Vec<i64>> {
    if let Ok(obj) = raw.call_method("to_numpy", (false,), None) {
        if let Ok(times) = obj.extract::<Vec<i64>>() {
            return Ok(times);
        }
    }
    raw.extract::<Vec<i64>>()
        .map_err(|_| PyTypeError::new_err("expected a 1-D sequence of integer time indices"))
}

/// Build a validated [`MaternGrid`] from array-like axes.
#[cfg(feature = "python-bindings")]
pub fn extract_grid<'py>(
    py: Python<'py>, range: &Bound<'py, PyAny>, smoothness: &Bound<'py, PyAny>,
    variance: &Bound<'py, PyAny>, ar1: Option<&Bound<'py, PyAny>>,
) -> PyResult<MaternGrid> {
    let ar1 = ar1.map(|raw| extract_vector(py, raw).map(|a| a.to_vec())).transpose()?;
    let grid = MaternGrid::new(
        extract_vector(py, range)?.to_vec(),
        extract_vector(py, smoothness)?.to_vec(),
        extract_vector(py, variance)?.to_vec(),
        ar1,
    )?;
    Ok(grid)
}
