//! kernel::matern — Matérn covariance and practical-range conversions.
//!
//! Purpose
//! -------
//! Evaluate the Matérn covariance family on distances and convert between the
//! raw range parameter and the human-readable practical correlation range.
//!
//! Key behaviors
//! -------------
//! - [`MaternParams`] carries a validated `(range, smoothness, variance,
//!   nugget)` quadruple.
//! - [`matern`] maps a distance matrix elementwise to covariances
//!
//!   ```text
//!   C(d) = σ² · 2^(1−ν)/Γ(ν) · (d/θ)^ν · K_ν(d/θ),   C(0) = σ² + τ²
//!   ```
//!
//!   with θ the range, ν the smoothness, σ² the variance and τ² the nugget.
//! - [`matern_correlation`] is the scalar unit-variance, zero-nugget form used
//!   by the estimators when building correlation matrices.
//! - [`range_from_practical_correlation_range`] and
//!   [`practical_correlation_range`] convert with the factor `√(8ν)`.
//!
//! Invariants & assumptions
//! ------------------------
//! - `θ > 0`, `ν > 0`, `σ² ≥ 0`, `τ² ≥ 0`, all finite; enforced by
//!   [`MaternParams::new`].
//! - Distances are finite and non-negative. Exactly zero distance is the only
//!   place the nugget enters.
//! - The correlation is clamped to `[0, 1]`: scaled arguments below
//!   [`SMALL_ARGUMENT`] (or small enough that `K_ν` overflows) return 1,
//!   arguments beyond [`LARGE_ARGUMENT`] return 0.
//!
//! Conventions
//! -----------
//! - The `d/θ` scaling (no `√(2ν)` factor) is used throughout; the practical
//!   range `√(8ν)·θ` is where the correlation has dropped to roughly 0.13.
//! - Pure functions, no logging.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the zero-distance value, monotonicity in distance,
//!   the exponential special case ν = 1/2, and the practical-range
//!   round trip.
use crate::kernel::{
    bessel::bessel_k,
    errors::{KernelError, KernelResult},
};
use ndarray::{Array2, ArrayView2};
use statrs::function::gamma::ln_gamma;

/// Scaled distances below this value are treated as coincident points.
pub const SMALL_ARGUMENT: f64 = 1e-12;

/// Scaled distances beyond this value give a correlation indistinguishable
/// from zero in `f64`.
pub const LARGE_ARGUMENT: f64 = 700.0;

/// MaternParams — validated Matérn covariance parameters.
///
/// Fields
/// ------
/// - `range`: θ, distance scale (`> 0`).
/// - `smoothness`: ν, mean-square differentiability (`> 0`).
/// - `variance`: σ², marginal variance of the smooth process (`≥ 0`).
/// - `nugget`: τ², measurement-error variance added at zero distance (`≥ 0`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaternParams {
    pub range: f64,
    pub smoothness: f64,
    pub variance: f64,
    pub nugget: f64,
}

impl MaternParams {
    /// Construct validated parameters.
    ///
    /// # Errors
    /// - [`KernelError::InvalidRange`], [`KernelError::InvalidSmoothness`],
    ///   [`KernelError::InvalidVariance`], [`KernelError::InvalidNugget`].
    pub fn new(range: f64, smoothness: f64, variance: f64, nugget: f64) -> KernelResult<Self> {
        validate_range(range)?;
        validate_smoothness(smoothness)?;
        if !variance.is_finite() || variance < 0.0 {
            return Err(KernelError::InvalidVariance { value: variance });
        }
        if !nugget.is_finite() || nugget < 0.0 {
            return Err(KernelError::InvalidNugget { value: nugget });
        }
        Ok(Self { range, smoothness, variance, nugget })
    }

    /// Unit variance, zero nugget.
    pub fn correlation(range: f64, smoothness: f64) -> KernelResult<Self> {
        Self::new(range, smoothness, 1.0, 0.0)
    }

    /// Same parameters without the nugget; used for cross-covariances between
    /// distinct point sets.
    pub fn without_nugget(&self) -> Self {
        Self { nugget: 0.0, ..*self }
    }

    /// Covariance at a single distance.
    pub fn covariance_at(&self, distance: f64) -> f64 {
        if distance == 0.0 {
            return self.variance + self.nugget;
        }
        self.variance * matern_correlation(distance, self.range, self.smoothness)
    }

    /// Practical correlation range `√(8ν)·θ` of these parameters.
    pub fn practical_range(&self) -> f64 {
        self.range * (8.0 * self.smoothness).sqrt()
    }
}

/// Unit-variance Matérn correlation at distance `d`.
///
/// `ρ(0) = 1`. Inputs are assumed validated (`range > 0`, `smoothness > 0`,
/// `d ≥ 0`).
pub fn matern_correlation(d: f64, range: f64, smoothness: f64) -> f64 {
    MaternCorrelation::new(range, smoothness).at(d)
}

/// Apply the Matérn covariance elementwise to a distance matrix.
///
/// Exactly-zero entries receive `variance + nugget`; all others
/// `variance · ρ(d)`.
///
/// # Errors
/// - [`KernelError::NonFiniteDistance`] if any entry is NaN or ±∞.
pub fn matern(distance: ArrayView2<f64>, params: &MaternParams) -> KernelResult<Array2<f64>> {
    let corr = MaternCorrelation::new(params.range, params.smoothness);
    let mut out = Array2::<f64>::zeros(distance.dim());
    for ((i, j), &d) in distance.indexed_iter() {
        if !d.is_finite() {
            return Err(KernelError::NonFiniteDistance { row: i, col: j, value: d });
        }
        out[[i, j]] =
            if d == 0.0 { params.variance + params.nugget } else { params.variance * corr.at(d) };
    }
    Ok(out)
}

/// Unit-variance correlation matrix from a symmetric distance matrix, with
/// the diagonal forced to exactly 1.
///
/// Only the upper triangle is evaluated.
pub(crate) fn correlation_matrix(distance: &Array2<f64>, range: f64, smoothness: f64) -> Array2<f64> {
    let corr = MaternCorrelation::new(range, smoothness);
    let n = distance.nrows();
    let mut out = Array2::<f64>::eye(n);
    for i in 0..n {
        for j in (i + 1)..n {
            let r = corr.at(distance[[i, j]]);
            out[[i, j]] = r;
            out[[j, i]] = r;
        }
    }
    out
}

/// Raw range θ such that the practical correlation range is `rho`.
///
/// # Errors
/// - [`KernelError::InvalidPracticalRange`] for non-positive `rho`.
/// - [`KernelError::InvalidSmoothness`] for non-positive `smoothness`.
pub fn range_from_practical_correlation_range(rho: f64, smoothness: f64) -> KernelResult<f64> {
    if !rho.is_finite() || rho <= 0.0 {
        return Err(KernelError::InvalidPracticalRange { value: rho });
    }
    validate_smoothness(smoothness)?;
    Ok(rho / (8.0 * smoothness).sqrt())
}

/// Practical correlation range `√(8ν)·θ` for a raw range θ.
pub fn practical_correlation_range(range: f64, smoothness: f64) -> KernelResult<f64> {
    validate_range(range)?;
    validate_smoothness(smoothness)?;
    Ok(range * (8.0 * smoothness).sqrt())
}

pub(crate) fn validate_range(range: f64) -> KernelResult<()> {
    if !range.is_finite() || range <= 0.0 {
        return Err(KernelError::InvalidRange { value: range });
    }
    Ok(())
}

pub(crate) fn validate_smoothness(smoothness: f64) -> KernelResult<()> {
    if !smoothness.is_finite() || smoothness <= 0.0 {
        return Err(KernelError::InvalidSmoothness { value: smoothness });
    }
    Ok(())
}

/// Matérn correlation with the `ln(2^(1−ν)/Γ(ν))` normalizer precomputed.
#[derive(Debug, Clone, Copy)]
struct MaternCorrelation {
    range: f64,
    smoothness: f64,
    ln_norm: f64,
}

impl MaternCorrelation {
    fn new(range: f64, smoothness: f64) -> Self {
        let ln_norm = (1.0 - smoothness) * std::f64::consts::LN_2 - ln_gamma(smoothness);
        Self { range, smoothness, ln_norm }
    }

    fn at(&self, d: f64) -> f64 {
        if d <= 0.0 {
            return 1.0;
        }
        let x = d / self.range;
        if x < SMALL_ARGUMENT {
            return 1.0;
        }
        if x > LARGE_ARGUMENT {
            return 0.0;
        }
        let k = bessel_k(self.smoothness, x);
        if k == 0.0 {
            return 0.0;
        }
        let value = (self.ln_norm + self.smoothness * x.ln() + k.ln()).exp();
        if value.is_finite() { value.clamp(0.0, 1.0) } else { 1.0 }
    }
}
