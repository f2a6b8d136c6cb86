//! estimation::spatial — grid-search maximum likelihood for Matérn parameters.
//!
//! Purpose
//! -------
//! Estimate the Matérn range and variance (for each candidate smoothness)
//! of a scalar field observed at scattered locations, optionally repeated
//! over several time slices treated as independent replicates. The search
//! is an exhaustive grid over `smoothness × range × variance`.
//!
//! Key behaviors
//! -------------
//! - Distance matrices and centred values are cached per slice once
//!   ([`SliceCache`]).
//! - Each `(smoothness, range)` pair costs one Cholesky per slice; the
//!   variance axis is then profiled in closed form from the cached
//!   `ln|R|` and `zᵀR⁻¹z` sums:
//!
//!   ```text
//!   ℓ(ν, θ, σ²) = −½ Σ_s quad_s / σ² − ½ Σ_s n_s ln σ² − ½ Σ_s ln|R_s|
//!   ```
//!
//! - The `(smoothness, range)` loop runs in parallel under the `parallel`
//!   feature.
//! - A grid point whose correlation matrix is not positive definite scores
//!   `−∞` and is counted in `skipped_grid_points`.
//! - With an `ar1` axis and more than one time index, a separable temporal
//!   AR(1) fit is added (see [`crate::estimation::temporal`]).
//!
//! Invariants & assumptions
//! ------------------------
//! - Values are centred by their overall sample mean; the mean is not a
//!   free parameter.
//! - Slices are independent; no cross-slice covariance is modelled here.
//!
//! Conventions
//! -----------
//! - `surface[[i, j, k]]` is `ℓ` at `(smoothness[i], range[j], variance[k])`.
//! - Boundary warnings are evaluated for every per-smoothness row on the
//!   range and variance axes and carry that row's smoothness; the
//!   smoothness axis itself is never flagged.
//!
//! Testing notes
//! -------------
//! - Unit tests cover argmax bookkeeping on a tiny grid, the `−∞` policy
//!   for non-positive-definite points, and the all-fail error.
//! - Recovery of a simulated range lives in the integration tests.
use crate::{
    data::Observations,
    estimation::{
        cache::{SliceCache, SliceProfile},
        errors::{EstimationError, EstimationResult},
        grid::MaternGrid,
        temporal::{TemporalFit, fit_temporal_ar1},
        warnings::{FitWarning, GridAxis},
    },
    maybe_rayon::*,
};
use ndarray::Array3;
use tracing::debug;

/// Best `(range, variance)` for one smoothness value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialFitRow {
    pub smoothness: f64,
    pub range: f64,
    pub variance: f64,
    pub log_likelihood: f64,
    /// Indices of `range` and `variance` in their grid axes.
    pub range_index: usize,
    pub variance_index: usize,
}

/// LengthscaleFit — result of [`fit_matern_lengthscale`].
///
/// Fields
/// ------
/// - `rows`: one [`SpatialFitRow`] per smoothness, in grid order. A
///   smoothness whose every point failed is omitted.
/// - `best`: the row with the highest log-likelihood.
/// - `surface`: `ℓ` over `[smoothness, range, variance]`, `−∞` where the
///   correlation matrix was not positive definite.
/// - `temporal`: AR(1) fit when requested and the data carry time.
/// - `warnings`: boundary warnings, spatial ones per smoothness row in grid
///   order, then temporal ones.
/// - `skipped_grid_points`: number of `(smoothness, range)` pairs that
///   failed to factorize.
/// - `n_slices`: number of time slices used as replicates.
#[derive(Debug, Clone, PartialEq)]
pub struct LengthscaleFit {
    pub rows: Vec<SpatialFitRow>,
    pub best: SpatialFitRow,
    pub surface: Array3<f64>,
    pub temporal: Option<TemporalFit>,
    pub warnings: Vec<FitWarning>,
    pub skipped_grid_points: usize,
    pub n_slices: usize,
}

/// Grid-search maximum-likelihood fit of the Matérn range and variance.
///
/// # Errors
/// - `DataError::UnknownColumn` (wrapped) for a missing column.
/// - [`EstimationError::NoFiniteLikelihood`] if no grid point produced a
///   finite log-likelihood.
pub fn fit_matern_lengthscale(
    obs: &Observations, value_column: &str, grid: &MaternGrid,
) -> EstimationResult<LengthscaleFit> {
    let cache = SliceCache::build(obs, value_column)?;
    let (n_nu, n_range, n_var) = (grid.smoothness.len(), grid.range.len(), grid.variance.len());

    let profiles: Vec<Option<SliceProfile>> = (0..n_nu * n_range)
        .into_par_iter()
        .map(|k| {
            let (i, j) = (k / n_range, k % n_range);
            cache.profile(grid.range[j], grid.smoothness[i]).ok()
        })
        .collect();
    let skipped_grid_points = profiles.iter().filter(|p| p.is_none()).count();

    let mut surface = Array3::<f64>::from_elem((n_nu, n_range, n_var), f64::NEG_INFINITY);
    let mut rows = Vec::with_capacity(n_nu);
    for i in 0..n_nu {
        let mut row: Option<SpatialFitRow> = None;
        for j in 0..n_range {
            let Some(profile) = profiles[i * n_range + j] else { continue };
            for (k, &variance) in grid.variance.iter().enumerate() {
                let ll = profile.log_likelihood(variance);
                surface[[i, j, k]] = ll;
                if ll.is_finite() && row.is_none_or(|r| ll > r.log_likelihood) {
                    row = Some(SpatialFitRow {
                        smoothness: grid.smoothness[i],
                        range: grid.range[j],
                        variance,
                        log_likelihood: ll,
                        range_index: j,
                        variance_index: k,
                    });
                }
            }
        }
        rows.extend(row);
    }
    debug!(
        grid_points = grid.spatial_points(),
        skipped_grid_points,
        n_slices = cache.slices().len(),
        "spatial grid search finished"
    );

    let best = rows
        .iter()
        .copied()
        .reduce(|a, b| if b.log_likelihood > a.log_likelihood { b } else { a })
        .ok_or(EstimationError::NoFiniteLikelihood { evaluated: grid.spatial_points() })?;

    let mut warnings: Vec<FitWarning> = rows
        .iter()
        .flat_map(|row| {
            [
                FitWarning::boundary_at_smoothness(
                    GridAxis::Range,
                    &grid.range,
                    row.range_index,
                    row.smoothness,
                ),
                FitWarning::boundary_at_smoothness(
                    GridAxis::Variance,
                    &grid.variance,
                    row.variance_index,
                    row.smoothness,
                ),
            ]
        })
        .flatten()
        .collect();

    let temporal = match &grid.ar1 {
        Some(ar1) if obs.distinct_times() > 1 => {
            let fit = fit_temporal_ar1(obs, value_column, ar1, &grid.variance)?;
            warnings.extend(fit.warnings.iter().cloned());
            Some(fit)
        }
        _ => None,
    };

    Ok(LengthscaleFit {
        rows,
        best,
        surface,
        temporal,
        warnings,
        skipped_grid_points,
        n_slices: cache.slices().len(),
    })
}
