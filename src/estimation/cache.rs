//! estimation::cache — per-time-slice distance and value caches.
//!
//! Purpose
//! -------
//! Build, once per fit, everything about the data that does not depend on
//! the Matérn parameters: the rows of each time slice, their spatial
//! distance matrix, and their mean-centred values. Grid-search workers
//! share the cache immutably.
//!
//! Key behaviors
//! -------------
//! - [`SliceCache::build`] partitions the table by time index and centres
//!   the chosen column by its overall sample mean.
//! - [`SliceCache::profile`] evaluates `Σ_s ln|R_s|` and `Σ_s z_sᵀR_s⁻¹z_s`
//!   for one `(range, smoothness)` pair, the two sums the variance profile
//!   needs.
//!
//! Invariants & assumptions
//! ------------------------
//! - Slices are disjoint and cover every row.
//! - Distance matrices are symmetric with exact zero diagonals; correlation
//!   matrices built from them have an exact unit diagonal.
//!
//! Testing notes
//! -------------
//! - Unit tests check slice partitioning, centring, and that the profile of
//!   a single-point slice reduces to `(0, z²)`.
use crate::{
    data::Observations,
    estimation::errors::EstimationResult,
    kernel::{distance::self_distance, matern::correlation_matrix},
    optimization::{errors::OptResult, numerical_stability::log_det_and_quad},
};
use ndarray::{Array1, Array2};
use tracing::debug;

/// Cached data for one time slice.
#[derive(Debug, Clone, PartialEq)]
pub struct SliceData {
    pub time: Option<i64>,
    pub distances: Array2<f64>,
    pub values: Array1<f64>,
}

/// `Σ_s ln|R_s|`, `Σ_s z_sᵀR_s⁻¹z_s` and `Σ_s n_s` for one parameter pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliceProfile {
    pub log_det: f64,
    pub quad: f64,
    pub n_obs: usize,
}

impl SliceProfile {
    /// Profile log-likelihood at variance `σ²`:
    /// `−½ quad/σ² − ½ n ln σ² − ½ log_det`.
    pub fn log_likelihood(&self, variance: f64) -> f64 {
        -0.5 * self.quad / variance - 0.5 * self.n_obs as f64 * variance.ln() - 0.5 * self.log_det
    }
}

/// SliceCache — immutable per-slice data shared by grid-search workers.
#[derive(Debug, Clone, PartialEq)]
pub struct SliceCache {
    slices: Vec<SliceData>,
    mean: f64,
}

impl SliceCache {
    /// Partition `obs` by time slice and centre `column` by its overall mean.
    ///
    /// # Errors
    /// - `DataError::UnknownColumn` (wrapped) if `column` does not exist.
    pub fn build(obs: &Observations, column: &str) -> EstimationResult<Self> {
        let values = obs.column(column)?;
        let mean = values.mean().unwrap_or(0.0);
        let slices: Vec<SliceData> = obs
            .time_slices()
            .into_iter()
            .map(|slice| {
                let coords = obs.coords_of(&slice.rows);
                SliceData {
                    time: slice.time,
                    distances: self_distance(coords.view()),
                    values: slice.rows.iter().map(|&r| values[r] - mean).collect(),
                }
            })
            .collect();
        debug!(n_slices = slices.len(), n_obs = obs.len(), mean, "built slice cache");
        Ok(Self { slices, mean })
    }

    pub fn slices(&self) -> &[SliceData] {
        &self.slices
    }

    /// Overall sample mean removed from the values.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Total number of observations across slices.
    pub fn n_obs(&self) -> usize {
        self.slices.iter().map(|s| s.values.len()).sum()
    }

    /// Sum log-determinants and quadratic forms over slices for one
    /// `(range, smoothness)` pair.
    ///
    /// # Errors
    /// - `OptError::NotPositiveDefinite` if any slice's correlation matrix
    ///   fails to factorize.
    pub fn profile(&self, range: f64, smoothness: f64) -> OptResult<SliceProfile> {
        let mut out = SliceProfile { log_det: 0.0, quad: 0.0, n_obs: 0 };
        for slice in &self.slices {
            let r = correlation_matrix(&slice.distances, range, smoothness);
            let (log_det, quad) = log_det_and_quad(r.view(), slice.values.view())?;
            out.log_det += log_det;
            out.quad += quad;
            out.n_obs += slice.values.len();
        }
        Ok(out)
    }
}
