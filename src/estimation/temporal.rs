//! estimation::temporal — separable AR(1) fit across time at each site.
//!
//! Each site (exact location) contributes the time series of its
//! observations, with correlation `θ_t^{|t_i − t_j|}` between rows at times
//! `t_i` and `t_j`. Sites are independent. Values are centred by the
//! overall column mean, as in the spatial fit, and the same closed-form
//! variance profile is maximized over the `ar1 × variance` grid.
use crate::{
    data::Observations,
    estimation::{
        cache::SliceProfile,
        errors::{EstimationError, EstimationResult},
        warnings::{FitWarning, GridAxis},
    },
    optimization::{errors::OptResult, numerical_stability::log_det_and_quad},
};
use ndarray::{Array1, Array2};
use tracing::debug;

/// TemporalFit — AR(1) coefficient and variance maximizing the likelihood.
///
/// - `surface[[a, k]]` is `ℓ` at `(ar1[a], variance[k])`, `−∞` where a
///   site's correlation matrix failed to factorize (e.g. repeated times).
#[derive(Debug, Clone, PartialEq)]
pub struct TemporalFit {
    pub ar1: f64,
    pub variance: f64,
    pub log_likelihood: f64,
    pub surface: Array2<f64>,
    pub n_sites: usize,
    pub warnings: Vec<FitWarning>,
}

struct SiteSeries {
    times: Vec<i64>,
    values: Array1<f64>,
}

/// AR(1) correlation matrix `R_ij = θ^{|t_i − t_j|}`.
pub fn ar1_correlation(times: &[i64], theta: f64) -> Array2<f64> {
    let n = times.len();
    Array2::from_shape_fn((n, n), |(i, j)| {
        if i == j { 1.0 } else { theta.powf((times[i] - times[j]).unsigned_abs() as f64) }
    })
}

/// Fit the temporal AR(1) model over `ar1 × variance`.
///
/// # Errors
/// - `DataError::UnknownColumn` (wrapped) for a missing column.
/// - [`EstimationError::NoFiniteLikelihood`] if every coefficient fails.
pub fn fit_temporal_ar1(
    obs: &Observations, value_column: &str, ar1: &[f64], variance: &[f64],
) -> EstimationResult<TemporalFit> {
    let values = obs.column(value_column)?;
    let mean = values.mean().unwrap_or(0.0);
    let sites: Vec<SiteSeries> = obs
        .site_groups()
        .into_iter()
        .map(|g| SiteSeries {
            values: g.rows.iter().map(|&r| values[r] - mean).collect(),
            times: g.times,
        })
        .collect();

    let mut surface = Array2::<f64>::from_elem((ar1.len(), variance.len()), f64::NEG_INFINITY);
    let mut best: Option<(usize, usize, f64)> = None;
    for (a, &theta) in ar1.iter().enumerate() {
        let Ok(profile) = site_profile(&sites, theta) else { continue };
        for (k, &var) in variance.iter().enumerate() {
            let ll = profile.log_likelihood(var);
            surface[[a, k]] = ll;
            if ll.is_finite() && best.is_none_or(|(_, _, b)| ll > b) {
                best = Some((a, k, ll));
            }
        }
    }
    let (a, k, log_likelihood) =
        best.ok_or(EstimationError::NoFiniteLikelihood { evaluated: ar1.len() * variance.len() })?;
    debug!(n_sites = sites.len(), ar1 = ar1[a], variance = variance[k], "temporal AR(1) fit");

    let warnings = [
        FitWarning::boundary(GridAxis::Ar1, ar1, a),
        FitWarning::boundary(GridAxis::Variance, variance, k),
    ]
    .into_iter()
    .flatten()
    .collect();

    Ok(TemporalFit {
        ar1: ar1[a],
        variance: variance[k],
        log_likelihood,
        surface,
        n_sites: sites.len(),
        warnings,
    })
}

fn site_profile(sites: &[SiteSeries], theta: f64) -> OptResult<SliceProfile> {
    let mut out = SliceProfile { log_det: 0.0, quad: 0.0, n_obs: 0 };
    for site in sites {
        let r = ar1_correlation(&site.times, theta);
        let (log_det, quad) = log_det_and_quad(r.view(), site.values.view())?;
        out.log_det += log_det;
        out.quad += quad;
        out.n_obs += site.values.len();
    }
    Ok(out)
}
