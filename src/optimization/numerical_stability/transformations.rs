//! Log-scale parameter transforms and shared numeric tolerances.
//!
//! Scale parameters in this crate (Matérn range, noise-to-signal ratio λ)
//! are strictly positive and span several orders of magnitude, so every
//! one-dimensional search runs on `ln(·)` and maps back with `exp`.
//!
//! # Provided items
//! - [`EIGEN_EPS`]: eigenvalues below this are clamped to zero before
//!   forming `D + λ`.
//! - [`GENERAL_TOL`]: default golden-section tolerance on the log scale.
//! - [`log_space`]: `n` log-spaced points between two positive bounds.
//! - [`to_log_scale`] / [`from_log_scale`]: guarded `ln` / `exp` pair.

/// Threshold below which symmetric eigenvalues are treated as zero.
///
/// Projected correlation matrices are positive semi-definite in exact
/// arithmetic; round-off can push the smallest eigenvalues slightly
/// negative, which would make `ln(D + λ)` undefined for tiny λ.
pub const EIGEN_EPS: f64 = 1e-12;

/// Default tolerance for golden-section searches on the log scale.
pub const GENERAL_TOL: f64 = 1e-7;

/// Smallest value passed to `ln` by [`to_log_scale`].
pub const LOG_FLOOR: f64 = 1e-300;

/// `n` points spaced evenly in `ln` between `lower` and `upper`
/// (inclusive).
///
/// Both endpoints are returned exactly, not through `exp(ln(·))`. Returns
/// an empty vector for `n = 0` and `[lower]` for `n = 1`. Callers validate
/// that both bounds are finite and positive.
pub fn log_space(lower: f64, upper: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![lower],
        _ => {
            let (a, b) = (lower.ln(), upper.ln());
            let step = (b - a) / (n - 1) as f64;
            (0..n)
                .map(|i| match i {
                    0 => lower,
                    i if i == n - 1 => upper,
                    i => (a + step * i as f64).exp(),
                })
                .collect()
        }
    }
}

/// Guarded natural log: values below [`LOG_FLOOR`] are floored first.
#[inline]
pub fn to_log_scale(x: f64) -> f64 {
    x.max(LOG_FLOOR).ln()
}

/// Inverse of [`to_log_scale`] on its range.
#[inline]
pub fn from_log_scale(t: f64) -> f64 {
    t.exp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    // Purpose
    // -------
    // `log_space` hits both endpoints exactly and has constant ratio
    // between neighbours.
    fn log_space_endpoints_and_ratio() {
        let grid = log_space(1e-6, 1e2, 9);
        assert_eq!(grid.len(), 9);
        assert_eq!(grid[0], 1e-6);
        assert_eq!(grid[8], 1e2);
        for w in grid.windows(2) {
            assert_relative_eq!(w[1] / w[0], 10.0, max_relative = 1e-12);
        }
        assert!(log_space(1.0, 2.0, 0).is_empty());
        assert_eq!(log_space(3.0, 5.0, 1), vec![3.0]);
    }

    #[test]
    fn log_scale_round_trip_and_floor() {
        assert_relative_eq!(from_log_scale(to_log_scale(1700.0)), 1700.0, max_relative = 1e-15);
        assert!(to_log_scale(0.0).is_finite());
    }
}
