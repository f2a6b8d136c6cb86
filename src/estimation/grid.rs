//! Parameter grids for the grid-search maximum-likelihood estimator.
use crate::estimation::errors::{EstimationError, EstimationResult};

/// MaternGrid — candidate values for the grid search.
///
/// Fields
/// ------
/// - `range`: Matérn range candidates θ (`> 0`).
/// - `smoothness`: smoothness candidates ν (`> 0`); one result row each.
/// - `variance`: variance candidates σ² (`> 0`).
/// - `ar1`: optional temporal AR(1) coefficients θ_t (`0 < θ_t < 1`). When
///   present and the data carry more than one time index, a temporal fit
///   over `ar1 × variance` is added.
///
/// Invariants
/// ----------
/// - Every axis is non-empty and holds finite values in its domain.
/// - Order is preserved; boundary warnings refer to the first and last
///   entries as given, so callers pass axes sorted ascending.
#[derive(Debug, Clone, PartialEq)]
pub struct MaternGrid {
    pub range: Vec<f64>,
    pub smoothness: Vec<f64>,
    pub variance: Vec<f64>,
    pub ar1: Option<Vec<f64>>,
}

impl MaternGrid {
    /// Construct a validated grid.
    ///
    /// # Errors
    /// - [`EstimationError::InvalidGrid`] naming the offending axis.
    pub fn new(
        range: Vec<f64>, smoothness: Vec<f64>, variance: Vec<f64>, ar1: Option<Vec<f64>>,
    ) -> EstimationResult<Self> {
        check_axis("range", &range, |v| v > 0.0, "values must be finite and > 0")?;
        check_axis("smoothness", &smoothness, |v| v > 0.0, "values must be finite and > 0")?;
        check_axis("variance", &variance, |v| v > 0.0, "values must be finite and > 0")?;
        if let Some(ar1) = &ar1 {
            check_axis("ar1", ar1, |v| v > 0.0 && v < 1.0, "values must lie in (0, 1)")?;
        }
        Ok(Self { range, smoothness, variance, ar1 })
    }

    /// Total number of spatial grid points `|ν| · |θ| · |σ²|`.
    pub fn spatial_points(&self) -> usize {
        self.smoothness.len() * self.range.len() * self.variance.len()
    }
}

/// Evenly spaced axis `start, start + step, …` up to and including `stop`
/// (within half a step).
pub fn linear_axis(start: f64, stop: f64, step: f64) -> Vec<f64> {
    if !(step > 0.0) || stop < start {
        return vec![start];
    }
    let n = ((stop - start) / step + 0.5).floor() as usize + 1;
    (0..n).map(|i| start + step * i as f64).collect()
}

fn check_axis(
    axis: &'static str, values: &[f64], in_domain: impl Fn(f64) -> bool, reason: &str,
) -> EstimationResult<()> {
    if values.is_empty() {
        return Err(EstimationError::InvalidGrid { axis, reason: "axis is empty".to_string() });
    }
    if let Some(bad) = values.iter().find(|v| !v.is_finite() || !in_domain(**v)) {
        return Err(EstimationError::InvalidGrid { axis, reason: format!("{reason}, got {bad}") });
    }
    Ok(())
}
