//! interpolation::rbf — exact Gaussian radial-basis-function interpolation.
//!
//! Purpose
//! -------
//! Interpolate one value column of an observation table onto arbitrary
//! target locations with the Gaussian kernel
//! `k(d) = exp(−d² / (2·kernel_variance))`.
//!
//! Key behaviors
//! -------------
//! - Weights solve `A w = z − z̄` with `A_ij = k(|x_i − x_j|)` by Cholesky;
//!   predictions are `Σ_i w_i k(|t − x_i|) + z̄`.
//! - The interpolant reproduces the data exactly at distinct observation
//!   locations and decays to the sample mean far from the data.
//!
//! Invariants & assumptions
//! ------------------------
//! - Observation locations are pairwise distinct; coincident locations are
//!   rejected up front with [`EstimationError::DuplicateLocation`].
//! - `A` is positive definite in exact arithmetic for distinct points; a
//!   numerically singular `A` (very large `kernel_variance` relative to the
//!   point spacing) surfaces as `OptError::NotPositiveDefinite`.
use crate::{
    data::Observations,
    estimation::errors::{EstimationError, EstimationResult},
    kernel::distance::{pairwise_distance, self_distance},
    optimization::numerical_stability::cholesky_solve,
};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use tracing::debug;

/// Fitted Gaussian RBF interpolant.
#[derive(Debug, Clone, PartialEq)]
pub struct GaussianRbf {
    centers: Array2<f64>,
    weights: Array1<f64>,
    mean: f64,
    kernel_variance: f64,
}

impl GaussianRbf {
    /// Solve for the weights at `centers` (`n×d`).
    ///
    /// # Errors
    /// - [`EstimationError::InvalidKernelVariance`] unless finite and `> 0`.
    /// - [`EstimationError::ShapeMismatch`] if `values.len() != n`.
    /// - [`EstimationError::DuplicateLocation`] for coincident centers.
    /// - `OptError::NotPositiveDefinite` (wrapped) for a singular system.
    pub fn fit(
        centers: ArrayView2<f64>, values: ArrayView1<f64>, kernel_variance: f64,
    ) -> EstimationResult<Self> {
        if !kernel_variance.is_finite() || kernel_variance <= 0.0 {
            return Err(EstimationError::InvalidKernelVariance { value: kernel_variance });
        }
        let n = centers.nrows();
        if values.len() != n {
            return Err(EstimationError::ShapeMismatch { expected: n, found: values.len() });
        }
        let distances = self_distance(centers);
        if let Some((first, second)) = first_duplicate(&distances) {
            return Err(EstimationError::DuplicateLocation { first, second });
        }

        let mean = values.mean().unwrap_or(0.0);
        let gram = distances.mapv(|d| gaussian(d, kernel_variance));
        let rhs = values.mapv(|v| v - mean).insert_axis(Axis(1));
        let weights = cholesky_solve(gram.view(), rhs.view())?.remove_axis(Axis(1));
        debug!(n, kernel_variance, mean, "fitted Gaussian RBF");
        Ok(Self { centers: centers.to_owned(), weights, mean, kernel_variance })
    }

    /// Evaluate the interpolant at `targets` (`k×d`).
    ///
    /// # Errors
    /// - `KernelError::DimensionMismatch` (wrapped) if `targets` has a
    ///   different number of coordinates than the centers.
    pub fn predict(&self, targets: ArrayView2<f64>) -> EstimationResult<Array1<f64>> {
        let cross = pairwise_distance(targets, self.centers.view())?
            .mapv(|d| gaussian(d, self.kernel_variance));
        Ok(cross.dot(&self.weights) + self.mean)
    }

    pub fn weights(&self) -> ArrayView1<'_, f64> {
        self.weights.view()
    }

    /// Sample mean added back to every prediction.
    pub fn mean(&self) -> f64 {
        self.mean
    }
}

/// Interpolate `value_column` of `obs` onto the locations of `targets`.
///
/// # Errors
/// - `DataError::UnknownColumn` (wrapped) for a missing column.
/// - Everything [`GaussianRbf::fit`] and [`GaussianRbf::predict`] return.
pub fn fit_rbf(
    obs: &Observations, targets: &Observations, value_column: &str, kernel_variance: f64,
) -> EstimationResult<Array1<f64>> {
    fit_rbf_at(obs, targets.coords(), value_column, kernel_variance)
}

/// Interpolate `value_column` of `obs` onto raw `k×d` target coordinates.
pub fn fit_rbf_at(
    obs: &Observations, targets: ArrayView2<f64>, value_column: &str, kernel_variance: f64,
) -> EstimationResult<Array1<f64>> {
    let values = obs.column(value_column)?;
    GaussianRbf::fit(obs.coords(), values, kernel_variance)?.predict(targets)
}

fn gaussian(distance: f64, kernel_variance: f64) -> f64 {
    (-distance * distance / (2.0 * kernel_variance)).exp()
}

fn first_duplicate(distances: &Array2<f64>) -> Option<(usize, usize)> {
    let n = distances.nrows();
    (0..n).flat_map(|i| (i + 1..n).map(move |j| (i, j))).find(|&(i, j)| distances[[i, j]] == 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::errors::OptError;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Exact reproduction at distinct observation locations.
    // - Reversion to the mean far from the data.
    // - Up-front rejection of duplicate locations and bad kernel variances.
    // -------------------------------------------------------------------------

    fn corners() -> Observations {
        Observations::new(
            array![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]],
            None,
            vec![("z".to_string(), array![1.0, 2.0, 3.0, 4.0])],
        )
        .unwrap()
    }

    #[test]
    // Purpose
    // -------
    // The interpolant passes through the data.
    //
    // Given
    // -----
    // - Unit-square corners with values (1, 2, 3, 4), kernel variance 1.
    //
    // Expect
    // ------
    // - Predictions at the corners equal the data within 1e-6.
    fn reproduces_data_at_observation_sites() {
        let obs = corners();

        let pred = fit_rbf(&obs, &obs, "z", 1.0).unwrap();

        for (p, z) in pred.iter().zip([1.0, 2.0, 3.0, 4.0]) {
            assert_abs_diff_eq!(*p, z, epsilon = 1e-6);
        }
    }

    #[test]
    // Purpose
    // -------
    // Far from every center the kernel vanishes and the mean remains.
    fn far_targets_revert_to_mean() {
        let pred = fit_rbf_at(&corners(), array![[100.0, -50.0]].view(), "z", 1.0).unwrap();
        assert_abs_diff_eq!(pred[0], 2.5, epsilon = 1e-12);
    }

    #[test]
    fn rejects_duplicates_and_bad_variance() {
        let dup = Observations::new(
            array![[0.0, 0.0], [1.0, 0.0], [1.0, 0.0]],
            None,
            vec![("z".to_string(), array![1.0, 2.0, 3.0])],
        )
        .unwrap();
        assert_eq!(
            fit_rbf(&dup, &dup, "z", 1.0).unwrap_err(),
            EstimationError::DuplicateLocation { first: 1, second: 2 }
        );

        for bad in [0.0, -1.0, f64::NAN] {
            let err = fit_rbf(&corners(), &corners(), "z", bad).unwrap_err();
            assert!(matches!(err, EstimationError::InvalidKernelVariance { .. }));
        }
    }

    #[test]
    // Purpose
    // -------
    // A kernel far wider than the point spacing makes the Gram matrix
    // numerically rank one; the failure is reported, not hidden.
    fn singular_system_is_reported() {
        let err = fit_rbf(&corners(), &corners(), "z", 1e18).unwrap_err();
        assert!(matches!(err, EstimationError::Optimization(OptError::NotPositiveDefinite { .. })));
    }
}
