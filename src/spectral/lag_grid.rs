//! Square lag grid on which the fitted covariance is tabulated.
use crate::estimation::errors::{EstimationError, EstimationResult};
use ndarray::{Array1, Array2};

/// LagGrid — `points × points` lags covering `[−extent, extent]²`.
///
/// Invariants
/// ----------
/// - `extent` is finite and `> 0`; `points ≥ 2`.
/// - With an odd `points` the origin is a grid node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LagGrid {
    pub extent: f64,
    pub points: usize,
}

impl LagGrid {
    /// # Errors
    /// - [`EstimationError::InvalidLagGrid`] for a bad extent or fewer than
    ///   two points.
    pub fn new(extent: f64, points: usize) -> EstimationResult<Self> {
        if !extent.is_finite() || extent <= 0.0 || points < 2 {
            return Err(EstimationError::InvalidLagGrid { extent, points });
        }
        Ok(Self { extent, points })
    }

    /// Grid spacing `Δ = 2·extent / (points − 1)`.
    pub fn spacing(&self) -> f64 {
        2.0 * self.extent / (self.points - 1) as f64
    }

    /// Lag offsets along one axis, `−extent … extent`.
    pub fn offsets(&self) -> Array1<f64> {
        Array1::linspace(-self.extent, self.extent, self.points)
    }

    /// Euclidean lag lengths; `[[i, j]]` is `|(offset_j, offset_i)|`.
    pub fn distances(&self) -> Array2<f64> {
        let o = self.offsets();
        Array2::from_shape_fn((self.points, self.points), |(i, j)| o[i].hypot(o[j]))
    }
}
