//! interpolation::kriging — universal kriging with a linear trend.
//!
//! Purpose
//! -------
//! Predict one or more realizations of a Matérn field at target locations
//! given fitted covariance parameters, removing a linear trend
//! `X = [1, x, (y)]` by generalized least squares.
//!
//! Key behaviors
//! -------------
//! - Data covariance `Σ = sill·R(θ) + nugget·I`; cross-covariance to the
//!   targets `c₀ = sill·R(θ)` without the nugget, so predictions are of the
//!   smooth signal.
//! - One Cholesky factorization of `Σ` serves the trend, the data and the
//!   cross-covariance right-hand sides.
//! - Predictor `ẑ(t) = x₀ᵀβ̂ + c₀ᵀΣ⁻¹(z − Xβ̂)` per column, with
//!   `β̂ = (XᵀΣ⁻¹X)⁻¹XᵀΣ⁻¹z`.
//! - Kriging variance `sill − c₀ᵀΣ⁻¹c₀ + uᵀ(XᵀΣ⁻¹X)⁻¹u`,
//!   `u = x₀ − XᵀΣ⁻¹c₀`, clipped at zero.
//!
//! Invariants & assumptions
//! ------------------------
//! - With zero nugget the predictor reproduces the data at observation
//!   sites and the variance vanishes there.
//! - Data that are exactly linear in the coordinates are reproduced
//!   everywhere.
use crate::{
    estimation::{
        errors::{EstimationError, EstimationResult},
        fast::trend_matrix,
    },
    kernel::{
        distance::{pairwise_distance, self_distance},
        matern::{MaternParams, correlation_matrix},
    },
    optimization::{errors::OptError, numerical_stability::cholesky_solve},
};
use ndarray::{Array1, Array2, ArrayView2, Axis, concatenate, s};

/// KrigingPrediction — predictions and kriging variance at the targets.
///
/// - `values`: `k×m`, one column per input realization.
/// - `variance`: `k` kriging variances (shared by all columns).
#[derive(Debug, Clone, PartialEq)]
pub struct KrigingPrediction {
    pub values: Array2<f64>,
    pub variance: Array1<f64>,
}

/// Universal kriging of `values` (`n×m`) at `targets` (`k×d`).
///
/// # Errors
/// - [`EstimationError::ShapeMismatch`] if `values.nrows() != n`.
/// - `KernelError::DimensionMismatch` (wrapped) for mismatched coordinates.
/// - `OptError::NoResidualSpace` (wrapped) if `n ≤ p`.
/// - `OptError::NotPositiveDefinite` (wrapped) if `Σ` or `XᵀΣ⁻¹X` cannot be
///   factorized.
pub fn krige(
    locations: ArrayView2<f64>, values: ArrayView2<f64>, targets: ArrayView2<f64>,
    params: &MaternParams,
) -> EstimationResult<KrigingPrediction> {
    let n = locations.nrows();
    if values.nrows() != n {
        return Err(EstimationError::ShapeMismatch { expected: n, found: values.nrows() });
    }
    let trend = trend_matrix(locations);
    let p = trend.ncols();
    if n <= p {
        return Err(OptError::NoResidualSpace { n_obs: n, n_trend: p }.into());
    }
    let target_trend = trend_matrix(targets);
    let m = values.ncols();

    let mut sigma = correlation_matrix(&self_distance(locations), params.range, params.smoothness)
        * params.variance;
    sigma.diag_mut().mapv_inplace(|v| v + params.nugget);
    let signal = params.without_nugget();
    let cross = pairwise_distance(locations, targets)?.mapv(|d| signal.covariance_at(d));

    // Σ⁻¹ [X | Z | C₀] in one solve.
    let rhs = concatenate(Axis(1), &[trend.view(), values.view(), cross.view()])
        .map_err(|_| EstimationError::ShapeMismatch { expected: n, found: values.nrows() })?;
    let solved = cholesky_solve(sigma.view(), rhs.view())?;
    let sigma_inv_x = solved.slice(s![.., ..p]);
    let sigma_inv_z = solved.slice(s![.., p..p + m]);
    let sigma_inv_c = solved.slice(s![.., p + m..]);

    let gram = trend.t().dot(&sigma_inv_x);
    let beta = cholesky_solve(gram.view(), trend.t().dot(&sigma_inv_z).view())?;
    let residual = &values - &trend.dot(&beta);
    let predicted = target_trend.dot(&beta) + sigma_inv_c.t().dot(&residual);

    let explained = (&cross * &sigma_inv_c).sum_axis(Axis(0));
    let u = &target_trend.t() - &trend.t().dot(&sigma_inv_c);
    let trend_term = (&u * &cholesky_solve(gram.view(), u.view())?).sum_axis(Axis(0));
    let variance = (trend_term - explained + params.variance).mapv(|v| v.max(0.0));

    Ok(KrigingPrediction { values: predicted, variance })
}
