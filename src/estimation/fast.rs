//! estimation::fast — spectral profile-likelihood fit with a nugget.
//!
//! Purpose
//! -------
//! Fit a Matérn covariance with a linear trend and a nugget to one or more
//! realizations of a field at common locations, without a grid over the
//! sill or nugget. For each candidate range the projected correlation
//! matrix is diagonalized once; the sill is then profiled in closed form and
//! the nugget ratio `λ = nugget/sill` by a coarse grid followed by
//! golden-section search on `ln λ` (see [`crate::estimation::profile`]).
//!
//! Key behaviors
//! -------------
//! - Trend `X = [1, x, (y)]` is removed by the residual basis `Q₂` of
//!   `[X | I]`; every realization is projected once (`z̃ = Q₂ᵀz`).
//! - The range is chosen among candidates by profile likelihood, then
//!   optionally refined on `ln θ` between the neighbours of the best
//!   candidate. A failed refinement falls back to the best candidate.
//! - Boundary warnings are raised for the range candidates and the λ grid.
//!
//! Invariants & assumptions
//! ------------------------
//! - `values` is `n×m`; columns are independent realizations sharing the
//!   same covariance.
//! - `n > p` (at least one residual degree of freedom).
//! - Range candidates and the λ grid are positive and ascending.
//!
//! Downstream usage
//! ----------------
//! - The spectral driver calls [`fit_matern_fast`] on detrended columns and
//!   turns the result into [`MaternParams`] via [`FastFit::params`].
use crate::{
    data::validation::{validate_column, validate_coords},
    estimation::{
        errors::{EstimationError, EstimationResult},
        profile::{LambdaProfile, SpectralEnergies},
        warnings::{FitWarning, GridAxis},
    },
    kernel::{
        distance::{max_distance, self_distance},
        matern::{MaternParams, correlation_matrix, validate_smoothness},
    },
    optimization::{
        errors::OptResult,
        loglik_optimizer::{
            Bracket, Cost, DEFAULT_MAX_ITER, LogLikelihood, MLEOptions, Theta, Tolerances,
            maximize,
        },
        numerical_stability::{
            GENERAL_TOL, from_log_scale, log_space, residual_basis, symmetric_eigen, to_log_scale,
        },
    },
};
use ndarray::{Array2, ArrayView2, Axis};
use tracing::debug;

/// Number of default range candidates.
pub const DEFAULT_RANGE_CANDIDATES: usize = 20;

/// FastMleOptions — configuration for [`fit_matern_fast`].
///
/// Fields
/// ------
/// - `range_candidates`: explicit ranges, ascending. `None` uses
///   [`DEFAULT_RANGE_CANDIDATES`] log-spaced values between
///   `max_distance / 100` and `max_distance`.
/// - `lambda_grid`: coarse grid for `λ = nugget/sill`, ascending.
/// - `tol`: golden-section tolerance for both `ln λ` and `ln θ`.
/// - `refine_range`: continue from the best candidate with golden-section
///   search on `ln θ`.
///
/// Default
/// -------
/// - `lambda_grid = 1e-6, 1e-5, …, 1e2`, `tol = 1e-7`, `refine_range = true`.
#[derive(Debug, Clone, PartialEq)]
pub struct FastMleOptions {
    pub range_candidates: Option<Vec<f64>>,
    pub lambda_grid: Vec<f64>,
    pub tol: f64,
    pub refine_range: bool,
}

impl Default for FastMleOptions {
    fn default() -> Self {
        Self {
            range_candidates: None,
            lambda_grid: log_space(1e-6, 1e2, 9),
            tol: GENERAL_TOL,
            refine_range: true,
        }
    }
}

/// Profile-likelihood summary at one range candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeProfileRow {
    pub range: f64,
    pub lambda: f64,
    pub sill: f64,
    pub log_likelihood: f64,
}

/// FastFit — result of [`fit_matern_fast`].
///
/// - `sill`, `nugget = λ·sill` and `range` parameterize
///   `C(d) = sill·R(d/range) + nugget·1{d = 0}`.
/// - `trace`: effective degrees of freedom `p + Σ D_i/(D_i+λ)`.
/// - `profile`: one row per range candidate, in candidate order.
#[derive(Debug, Clone, PartialEq)]
pub struct FastFit {
    pub range: f64,
    pub sill: f64,
    pub nugget: f64,
    pub lambda: f64,
    pub trace: f64,
    pub log_likelihood: f64,
    pub smoothness: f64,
    pub profile: Vec<RangeProfileRow>,
    pub warnings: Vec<FitWarning>,
}

impl FastFit {
    /// Fitted covariance parameters.
    ///
    /// # Errors
    /// - `KernelError` (wrapped) if a fitted value is outside its domain.
    pub fn params(&self) -> EstimationResult<MaternParams> {
        Ok(MaternParams::new(self.range, self.smoothness, self.sill, self.nugget)?)
    }
}

/// Trend design matrix `[1, x, (y)]` for `n×d` locations.
pub(crate) fn trend_matrix(locations: ArrayView2<f64>) -> Array2<f64> {
    let (n, d) = locations.dim();
    Array2::from_shape_fn((n, d + 1), |(i, j)| if j == 0 { 1.0 } else { locations[[i, j - 1]] })
}

/// Data shared by every range evaluation.
struct ProjectedData {
    distances: Array2<f64>,
    basis: Array2<f64>,
    projected: Array2<f64>,
    smoothness: f64,
    lambda_grid: Vec<f64>,
    opts: MLEOptions,
}

/// Best `λ` for one range.
#[derive(Debug, Clone)]
struct RangeEvaluation {
    energies: SpectralEnergies,
    lambda: f64,
    lambda_index: usize,
    log_likelihood: f64,
}

impl ProjectedData {
    fn energies(&self, range: f64) -> OptResult<SpectralEnergies> {
        let r = correlation_matrix(&self.distances, range, self.smoothness);
        let projected_r = self.basis.t().dot(&r).dot(&self.basis);
        let (eigenvalues, vectors) = symmetric_eigen(projected_r.view())?;
        let rotated = vectors.t().dot(&self.projected);
        let energies = rotated.mapv(|v| v * v).sum_axis(Axis(1));
        Ok(SpectralEnergies { eigenvalues, energies, n_realizations: self.projected.ncols() })
    }

    /// Coarse λ grid, then golden-section on `ln λ` between the neighbours
    /// of the best grid point. A failed search keeps the grid optimum.
    fn evaluate(&self, range: f64) -> OptResult<RangeEvaluation> {
        let energies = self.energies(range)?;
        let grid = &self.lambda_grid;
        let (lambda_index, coarse) = grid
            .iter()
            .map(|&l| energies.log_likelihood(l))
            .enumerate()
            .fold((0, f64::NEG_INFINITY), |best, (i, ll)| if ll > best.1 { (i, ll) } else { best });
        let mut out = RangeEvaluation {
            lambda: grid[lambda_index],
            lambda_index,
            log_likelihood: coarse,
            energies,
        };
        if !coarse.is_finite() || grid.len() < 2 {
            return Ok(out);
        }
        let lower = to_log_scale(grid[lambda_index.saturating_sub(1)]);
        let upper = to_log_scale(grid[(lambda_index + 1).min(grid.len() - 1)]);
        let refined = Bracket::new(lower, upper).and_then(|bracket| {
            maximize(&LambdaProfile, to_log_scale(out.lambda), &out.energies, &bracket, &self.opts)
        });
        match refined {
            Ok(fit) if fit.value > out.log_likelihood => {
                out.lambda = from_log_scale(fit.theta_hat);
                out.log_likelihood = fit.value;
            }
            Ok(_) => {}
            Err(err) => debug!(range, %err, "lambda refinement failed; keeping grid optimum"),
        }
        Ok(out)
    }
}

/// `max_λ ℓ(θ, λ)` as a function of `ln θ`.
struct RangeProfile;

impl LogLikelihood for RangeProfile {
    type Data = ProjectedData;

    fn value(&self, theta: Theta, data: &ProjectedData) -> OptResult<Cost> {
        Ok(data.evaluate(from_log_scale(theta))?.log_likelihood)
    }
}

/// Fast Matérn maximum-likelihood fit with trend and nugget.
///
/// # Errors
/// - `DataError` (wrapped) for bad locations or non-finite values.
/// - [`EstimationError::ShapeMismatch`] if `values.nrows() != n`.
/// - `KernelError::InvalidSmoothness` (wrapped).
/// - [`EstimationError::InvalidGrid`] for a bad range-candidate or λ axis,
///   or when every location coincides and no default range exists.
/// - `OptError::NoResidualSpace` (wrapped) if `n ≤ p`.
/// - [`EstimationError::NoFiniteLikelihood`] if no range candidate gave a
///   finite likelihood.
pub fn fit_matern_fast(
    locations: ArrayView2<f64>, values: ArrayView2<f64>, smoothness: f64, options: &FastMleOptions,
) -> EstimationResult<FastFit> {
    validate_coords(locations)?;
    let n = locations.nrows();
    if values.nrows() != n {
        return Err(EstimationError::ShapeMismatch { expected: n, found: values.nrows() });
    }
    if values.ncols() == 0 {
        return Err(EstimationError::ShapeMismatch { expected: 1, found: 0 });
    }
    for (j, column) in values.axis_iter(Axis(1)).enumerate() {
        validate_column(&format!("realization {j}"), column, n)?;
    }
    validate_smoothness(smoothness)?;
    check_positive_axis("lambda", &options.lambda_grid)?;
    let tols = Tolerances::new(options.tol, DEFAULT_MAX_ITER)?;

    let distances = self_distance(locations);
    let candidates = match &options.range_candidates {
        Some(c) => c.clone(),
        None => {
            let max = max_distance(&distances);
            log_space(max / 100.0, max, DEFAULT_RANGE_CANDIDATES)
        }
    };
    check_positive_axis("range", &candidates)?;

    let trend = trend_matrix(locations);
    let n_trend = trend.ncols();
    let basis = residual_basis(trend.view())?;
    let data = ProjectedData {
        projected: basis.t().dot(&values),
        basis,
        distances,
        smoothness,
        lambda_grid: options.lambda_grid.clone(),
        opts: MLEOptions::new(tols, false),
    };

    let mut profile = Vec::with_capacity(candidates.len());
    let mut best: Option<(usize, RangeEvaluation)> = None;
    for (i, &range) in candidates.iter().enumerate() {
        let eval = match data.evaluate(range) {
            Ok(eval) => eval,
            Err(err) => {
                debug!(range, %err, "range candidate failed");
                profile.push(RangeProfileRow {
                    range,
                    lambda: f64::NAN,
                    sill: f64::NAN,
                    log_likelihood: f64::NEG_INFINITY,
                });
                continue;
            }
        };
        profile.push(RangeProfileRow {
            range,
            lambda: eval.lambda,
            sill: eval.energies.sill(eval.lambda),
            log_likelihood: eval.log_likelihood,
        });
        let improves = best.as_ref().is_none_or(|(_, b)| eval.log_likelihood > b.log_likelihood);
        if eval.log_likelihood.is_finite() && improves {
            best = Some((i, eval));
        }
    }
    let (range_index, mut eval) =
        best.ok_or(EstimationError::NoFiniteLikelihood { evaluated: candidates.len() })?;
    let mut range = candidates[range_index];

    if options.refine_range && candidates.len() > 1 {
        let lower = to_log_scale(candidates[range_index.saturating_sub(1)]);
        let upper = to_log_scale(candidates[(range_index + 1).min(candidates.len() - 1)]);
        let refined = Bracket::new(lower, upper).and_then(|bracket| {
            maximize(&RangeProfile, to_log_scale(range), &data, &bracket, &data.opts)
        });
        match refined {
            Ok(fit) if fit.value > eval.log_likelihood => {
                let refined_range = from_log_scale(fit.theta_hat);
                match data.evaluate(refined_range) {
                    Ok(refined_eval) => {
                        range = refined_range;
                        eval = refined_eval;
                    }
                    Err(err) => debug!(%err, "refined range failed to re-evaluate"),
                }
            }
            Ok(_) => {}
            Err(err) => debug!(%err, "range refinement failed; keeping best candidate"),
        }
    }

    let sill = eval.energies.sill(eval.lambda);
    debug!(range, sill, lambda = eval.lambda, log_likelihood = eval.log_likelihood, "fast MLE");

    let warnings = [
        FitWarning::boundary(GridAxis::Range, &candidates, range_index),
        FitWarning::boundary(GridAxis::Lambda, &options.lambda_grid, eval.lambda_index),
    ]
    .into_iter()
    .flatten()
    .collect();

    Ok(FastFit {
        range,
        sill,
        nugget: eval.lambda * sill,
        lambda: eval.lambda,
        trace: eval.energies.trace(eval.lambda, n_trend),
        log_likelihood: eval.log_likelihood,
        smoothness,
        profile,
        warnings,
    })
}

fn check_positive_axis(axis: &'static str, values: &[f64]) -> EstimationResult<()> {
    if values.is_empty() {
        return Err(EstimationError::InvalidGrid { axis, reason: "axis is empty".to_string() });
    }
    if let Some(bad) = values.iter().find(|v| !v.is_finite() || **v <= 0.0) {
        return Err(EstimationError::InvalidGrid {
            axis,
            reason: format!("values must be finite and > 0, got {bad}"),
        });
    }
    Ok(())
}
