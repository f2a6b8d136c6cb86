//! kernel::simulation — Gaussian random fields with Matérn covariance.
//!
//! Draws zero-mean realizations `L·ε` where `L` is the lower Cholesky factor
//! of the Matérn covariance (nugget included) at the given locations and
//! `ε` is i.i.d. standard normal. Used to generate synthetic data with a
//! known range for testing the estimators.
use crate::{
    kernel::{
        distance::self_distance,
        errors::{KernelError, KernelResult},
        matern::{MaternParams, matern},
    },
    optimization::numerical_stability::cholesky_lower,
};
use ndarray::{Array2, ArrayView2};
use rand::Rng;
use rand_distr::StandardNormal;

/// Relative diagonal jitter added before factorization. Smooth kernels on
/// dense designs are numerically singular without it.
pub const SIMULATION_JITTER: f64 = 1e-10;

/// Draw `n_realizations` independent Matérn fields at `locations`.
///
/// Returns an `n × n_realizations` matrix; column `k` is realization `k`.
///
/// # Errors
/// - [`KernelError::NonFiniteDistance`] if a location is not finite.
/// - [`KernelError::NotPositiveDefinite`] if the covariance cannot be
///   factorized (e.g. duplicate locations with zero nugget and zero
///   variance).
pub fn simulate_matern_field<R: Rng + ?Sized>(
    locations: ArrayView2<f64>, params: &MaternParams, n_realizations: usize, rng: &mut R,
) -> KernelResult<Array2<f64>> {
    let n = locations.nrows();
    let distances = self_distance(locations);
    let mut cov = matern(distances.view(), params)?;
    let jitter = SIMULATION_JITTER * params.variance.max(f64::MIN_POSITIVE);
    cov.diag_mut().mapv_inplace(|v| v + jitter);

    let l = cholesky_lower(cov.view()).map_err(|_| KernelError::NotPositiveDefinite { dim: n })?;
    let eps = Array2::from_shape_fn((n, n_realizations), |_| rng.sample::<f64, _>(StandardNormal));
    Ok(l.dot(&eps))
}
