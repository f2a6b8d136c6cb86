//! kernel::distance — Euclidean distance matrices between coordinate sets.
//!
//! Coordinates are stored row-wise: an `n×d` array holds `n` points in `d`
//! spatial dimensions (`d = 1` or `d = 2` in this crate, but nothing here
//! depends on that). Two entry points are provided:
//!
//! - [`pairwise_distance`] for two arbitrary sets (prediction targets against
//!   data, lag offsets against the origin, ...),
//! - [`self_distance`] for a set against itself, which fills only the upper
//!   triangle and mirrors it so the result is exactly symmetric with an
//!   exactly zero diagonal.
use crate::kernel::errors::{KernelError, KernelResult};
use ndarray::{Array2, ArrayView1, ArrayView2};

/// Euclidean distance between every row of `a` and every row of `b`.
///
/// Returns an `a.nrows() × b.nrows()` matrix.
///
/// # Errors
/// - [`KernelError::DimensionMismatch`] if `a` and `b` have a different
///   number of columns.
pub fn pairwise_distance(a: ArrayView2<f64>, b: ArrayView2<f64>) -> KernelResult<Array2<f64>> {
    if a.ncols() != b.ncols() {
        return Err(KernelError::DimensionMismatch { left: a.ncols(), right: b.ncols() });
    }
    let mut out = Array2::<f64>::zeros((a.nrows(), b.nrows()));
    for (i, row_a) in a.rows().into_iter().enumerate() {
        for (j, row_b) in b.rows().into_iter().enumerate() {
            out[[i, j]] = euclidean(row_a, row_b);
        }
    }
    Ok(out)
}

/// Distance matrix of a coordinate set against itself.
///
/// Symmetric by construction with a zero diagonal; half the work of
/// [`pairwise_distance`].
pub fn self_distance(a: ArrayView2<f64>) -> Array2<f64> {
    let n = a.nrows();
    let mut out = Array2::<f64>::zeros((n, n));
    for i in 0..n {
        for j in (i + 1)..n {
            let d = euclidean(a.row(i), a.row(j));
            out[[i, j]] = d;
            out[[j, i]] = d;
        }
    }
    out
}

/// Largest entry of a distance matrix (0 for an empty matrix).
pub fn max_distance(distances: &Array2<f64>) -> f64 {
    distances.iter().cloned().fold(0.0, f64::max)
}

/// Smallest strictly positive entry of a distance matrix, if any.
pub fn min_positive_distance(distances: &Array2<f64>) -> Option<f64> {
    distances.iter().cloned().filter(|&d| d > 0.0).reduce(f64::min)
}

#[inline]
fn euclidean(a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y) * (x - y)).sum::<f64>().sqrt()
}
