//! numerical_stability::linalg — dense factorizations shared by the estimators.
//!
//! Purpose
//! -------
//! Bridge `ndarray` matrices into `nalgebra` for the handful of dense
//! factorizations the likelihood code needs, and turn factorization
//! failures into [`OptError`] values instead of `Option`s.
//!
//! Key behaviors
//! -------------
//! - [`to_dmatrix`] / [`to_array2`] copy between the two matrix types.
//! - [`log_det_and_quad`] returns `(ln|A|, zᵀA⁻¹z)` from one Cholesky
//!   factorization, the two ingredients of every Gaussian log-likelihood.
//! - [`cholesky_lower`] and [`cholesky_solve`] expose the factor and a
//!   multi-right-hand-side solve.
//! - [`residual_basis`] returns an orthonormal basis of the orthogonal
//!   complement of `span(X)` via the QR factorization of `[X | I]`.
//! - [`symmetric_eigen`] wraps `nalgebra`'s symmetric eigensolver with
//!   eigenvalues clamped at zero.
//!
//! Invariants & assumptions
//! ------------------------
//! - Matrices passed to the Cholesky helpers are symmetric; only the lower
//!   triangle is read by `nalgebra`.
//! - `residual_basis` assumes `X` has full column rank.
//!
//! Conventions
//! -----------
//! - No explicit inverses are formed.
//! - Errors: [`OptError::NotPositiveDefinite`] when Cholesky fails,
//!   [`OptError::EigenDecompositionFailed`] on non-finite eigenvalues,
//!   [`OptError::SingularSystem`] for shape problems.
use crate::optimization::{
    errors::{OptError, OptResult},
    numerical_stability::transformations::EIGEN_EPS,
};
use nalgebra::{Cholesky, DMatrix, DVector, Dyn};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

/// Copy an `ndarray` matrix into a `nalgebra::DMatrix`.
pub fn to_dmatrix(a: ArrayView2<f64>) -> DMatrix<f64> {
    DMatrix::<f64>::from_fn(a.nrows(), a.ncols(), |i, j| a[[i, j]])
}

/// Copy a `nalgebra::DMatrix` into an `ndarray` matrix.
pub fn to_array2(m: &DMatrix<f64>) -> Array2<f64> {
    Array2::from_shape_fn((m.nrows(), m.ncols()), |(i, j)| m[(i, j)])
}

fn factor(a: ArrayView2<f64>) -> OptResult<Cholesky<f64, Dyn>> {
    if a.nrows() != a.ncols() {
        return Err(OptError::SingularSystem {
            rows: a.nrows(),
            cols: a.ncols(),
            reason: "Cholesky factorization requires a square matrix",
        });
    }
    to_dmatrix(a).cholesky().ok_or(OptError::NotPositiveDefinite { dim: a.nrows() })
}

/// `(ln|A|, zᵀA⁻¹z)` for symmetric positive-definite `A`.
///
/// # Errors
/// - [`OptError::NotPositiveDefinite`] if the Cholesky factorization fails.
/// - [`OptError::SingularSystem`] if `A` is not square or `z` has the
///   wrong length.
pub fn log_det_and_quad(a: ArrayView2<f64>, z: ArrayView1<f64>) -> OptResult<(f64, f64)> {
    if z.len() != a.nrows() {
        return Err(OptError::SingularSystem {
            rows: a.nrows(),
            cols: a.ncols(),
            reason: "right-hand side length differs from matrix dimension",
        });
    }
    let chol = factor(a)?;
    let l = chol.l();
    let log_det = 2.0 * l.diagonal().iter().map(|d| d.ln()).sum::<f64>();
    let rhs = DVector::<f64>::from_iterator(z.len(), z.iter().cloned());
    let w = l
        .solve_lower_triangular(&rhs)
        .ok_or(OptError::NotPositiveDefinite { dim: a.nrows() })?;
    Ok((log_det, w.norm_squared()))
}

/// Lower Cholesky factor `L` with `A = L Lᵀ`.
pub fn cholesky_lower(a: ArrayView2<f64>) -> OptResult<Array2<f64>> {
    Ok(to_array2(&factor(a)?.l()))
}

/// Solve `A X = B` for symmetric positive-definite `A` and a block of
/// right-hand sides `B` (`n×k`).
pub fn cholesky_solve(a: ArrayView2<f64>, b: ArrayView2<f64>) -> OptResult<Array2<f64>> {
    if b.nrows() != a.nrows() {
        return Err(OptError::SingularSystem {
            rows: a.nrows(),
            cols: a.ncols(),
            reason: "right-hand side rows differ from matrix dimension",
        });
    }
    let chol = factor(a)?;
    Ok(to_array2(&chol.solve(&to_dmatrix(b))))
}

/// Orthonormal `n×(n−p)` basis `Q₂` with `Q₂ᵀX = 0` for an `n×p` trend
/// matrix `X`.
///
/// The QR factorization of the augmented `n×(p+n)` matrix `[X | I]` yields a
/// full `n×n` orthogonal `Q`; its first `p` columns span `X` and the rest
/// span the complement.
///
/// # Errors
/// - [`OptError::NoResidualSpace`] if `p ≥ n`.
pub fn residual_basis(x: ArrayView2<f64>) -> OptResult<Array2<f64>> {
    let (n, p) = x.dim();
    if p >= n {
        return Err(OptError::NoResidualSpace { n_obs: n, n_trend: p });
    }
    let augmented = DMatrix::<f64>::from_fn(n, p + n, |i, j| {
        if j < p {
            x[[i, j]]
        } else if j - p == i {
            1.0
        } else {
            0.0
        }
    });
    let q = augmented.qr().q();
    Ok(Array2::from_shape_fn((n, n - p), |(i, j)| q[(i, p + j)]))
}

/// Eigenvalues and eigenvectors of a symmetric matrix, eigenvalues below
/// [`EIGEN_EPS`] clamped to zero.
///
/// Eigenvector `k` is column `k` of the returned matrix. No ordering is
/// imposed.
pub fn symmetric_eigen(m: ArrayView2<f64>) -> OptResult<(Array1<f64>, Array2<f64>)> {
    let n = m.nrows();
    if n != m.ncols() {
        return Err(OptError::SingularSystem {
            rows: n,
            cols: m.ncols(),
            reason: "eigendecomposition requires a square matrix",
        });
    }
    let eig = to_dmatrix(m).symmetric_eigen();
    if eig.eigenvalues.iter().any(|v| !v.is_finite()) {
        return Err(OptError::EigenDecompositionFailed { dim: n });
    }
    let values = Array1::from_iter(
        eig.eigenvalues.iter().map(|&v| if v < EIGEN_EPS { 0.0 } else { v }),
    );
    Ok((values, to_array2(&eig.eigenvectors)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Log-determinant and quadratic form against hand-computed values.
    // - Not-positive-definite detection.
    // - Orthogonality of the residual basis against the trend.
    // - Eigen reconstruction `U D Uᵀ = M`.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // For a 2×2 SPD matrix the log-determinant and quadratic form are known
    // in closed form.
    //
    // Given
    // -----
    // - A = [[4, 2], [2, 3]], det = 8, z = (1, 1).
    //
    // Expect
    // ------
    // - ln|A| = ln 8, zᵀA⁻¹z = (3 − 2 − 2 + 4)/8 = 3/8.
    fn log_det_and_quad_matches_closed_form() {
        let a = array![[4.0, 2.0], [2.0, 3.0]];
        let z = array![1.0, 1.0];

        let (log_det, quad) = log_det_and_quad(a.view(), z.view()).unwrap();

        assert_relative_eq!(log_det, 8.0_f64.ln(), max_relative = 1e-14);
        assert_relative_eq!(quad, 3.0 / 8.0, max_relative = 1e-14);
    }

    #[test]
    // Purpose
    // -------
    // An indefinite matrix is reported as `NotPositiveDefinite`, not a panic.
    fn indefinite_matrix_is_rejected() {
        let a = array![[1.0, 2.0], [2.0, 1.0]];
        let z = array![1.0, 0.0];

        assert_eq!(
            log_det_and_quad(a.view(), z.view()).unwrap_err(),
            OptError::NotPositiveDefinite { dim: 2 }
        );
        assert!(cholesky_solve(a.view(), Array2::eye(2).view()).is_err());
    }

    #[test]
    // Purpose
    // -------
    // `cholesky_solve` inverts and `cholesky_lower` reconstructs `A`.
    fn cholesky_solve_and_factor_reconstruct() {
        let a = array![[4.0, 2.0], [2.0, 3.0]];
        let inv = cholesky_solve(a.view(), Array2::eye(2).view()).unwrap();
        let id = a.dot(&inv);
        let l = cholesky_lower(a.view()).unwrap();
        let back = l.dot(&l.t());

        for i in 0..2 {
            for j in 0..2 {
                assert_relative_eq!(id[[i, j]], if i == j { 1.0 } else { 0.0 }, epsilon = 1e-13);
                assert_relative_eq!(back[[i, j]], a[[i, j]], epsilon = 1e-13);
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // The residual basis is orthonormal and annihilates the trend.
    //
    // Given
    // -----
    // - X = [1, x] on five points.
    //
    // Expect
    // ------
    // - Q₂ is 5×3, Q₂ᵀX = 0, Q₂ᵀQ₂ = I.
    fn residual_basis_is_orthonormal_complement() {
        let x = array![[1.0, 0.0], [1.0, 1.0], [1.0, 2.5], [1.0, 4.0], [1.0, 7.0]];

        let q2 = residual_basis(x.view()).unwrap();
        let qx = q2.t().dot(&x);
        let qq = q2.t().dot(&q2);

        assert_eq!(q2.dim(), (5, 3));
        assert!(qx.iter().all(|v| v.abs() < 1e-12));
        for i in 0..3 {
            for j in 0..3 {
                assert_relative_eq!(qq[[i, j]], if i == j { 1.0 } else { 0.0 }, epsilon = 1e-12);
            }
        }
        assert_eq!(
            residual_basis(array![[1.0, 2.0]].view()).unwrap_err(),
            OptError::NoResidualSpace { n_obs: 1, n_trend: 2 }
        );
    }

    #[test]
    fn symmetric_eigen_reconstructs_matrix() {
        let m = array![[2.0, 1.0, 0.0], [1.0, 2.0, 1.0], [0.0, 1.0, 2.0]];

        let (d, u) = symmetric_eigen(m.view()).unwrap();
        let back = u.dot(&Array2::from_diag(&d)).dot(&u.t());

        for (a, b) in back.iter().zip(m.iter()) {
            assert_relative_eq!(a, b, epsilon = 1e-12);
        }
    }
}
