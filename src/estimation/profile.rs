//! estimation::profile — concentrated likelihood over the nugget ratio λ.
//!
//! Purpose
//! -------
//! After projecting out the trend and diagonalizing the projected
//! correlation matrix `Q₂ᵀR(θ)Q₂ = U D Uᵀ`, the restricted likelihood of a
//! Matérn field with nugget depends on the data only through the eigenvalues
//! `D_i` and the rotated energies `u²_i = Σ_cols (Uᵀz̃)²_i`. Writing
//! `λ = nugget / sill`, the sill has a closed-form maximizer and the
//! remaining profile is one-dimensional:
//!
//! ```text
//! ρ̂(λ) = (1/(mN)) Σ_i u²_i / (D_i + λ)
//! ℓ(λ) = −(mN/2)(1 + ln 2π + ln ρ̂(λ)) − (m/2) Σ_i ln(D_i + λ)
//! ```
//!
//! with `N` residual degrees of freedom and `m` realizations.
//!
//! Conventions
//! -----------
//! - [`LambdaProfile`] is parameterized on `ln λ` so golden-section search
//!   works on a scale where the coarse grid is evenly spaced.
//! - Each evaluation is `O(N)`; no matrix work happens here.
use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::{Cost, LogLikelihood, Theta},
    numerical_stability::from_log_scale,
};
use ndarray::Array1;
use std::f64::consts::PI;

/// Spectral summary of the projected data for one range value.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectralEnergies {
    /// Eigenvalues `D_i ≥ 0` of `Q₂ᵀRQ₂`.
    pub eigenvalues: Array1<f64>,
    /// `u²_i`, summed over realizations.
    pub energies: Array1<f64>,
    /// Number of realizations `m`.
    pub n_realizations: usize,
}

impl SpectralEnergies {
    /// Residual degrees of freedom `N = n − p`.
    pub fn dof(&self) -> usize {
        self.eigenvalues.len()
    }

    /// Closed-form sill `ρ̂(λ)`.
    pub fn sill(&self, lambda: f64) -> f64 {
        let scale = (self.n_realizations * self.dof()) as f64;
        self.eigenvalues
            .iter()
            .zip(self.energies.iter())
            .map(|(&d, &u2)| u2 / (d + lambda))
            .sum::<f64>()
            / scale
    }

    /// Profile log-likelihood `ℓ(λ)`; `−∞` when `ρ̂(λ)` is not positive.
    pub fn log_likelihood(&self, lambda: f64) -> f64 {
        let m = self.n_realizations as f64;
        let mn = m * self.dof() as f64;
        let sill = self.sill(lambda);
        if !(sill > 0.0) || !sill.is_finite() {
            return f64::NEG_INFINITY;
        }
        let log_det: f64 = self.eigenvalues.iter().map(|&d| (d + lambda).ln()).sum();
        -0.5 * mn * (1.0 + (2.0 * PI).ln() + sill.ln()) - 0.5 * m * log_det
    }

    /// Effective degrees of freedom of the smoother: `p + Σ D_i/(D_i+λ)`.
    pub fn trace(&self, lambda: f64, n_trend: usize) -> f64 {
        n_trend as f64 + self.eigenvalues.iter().map(|&d| d / (d + lambda)).sum::<f64>()
    }
}

/// `ℓ` as a function of `ln λ`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LambdaProfile;

impl LogLikelihood for LambdaProfile {
    type Data = SpectralEnergies;

    fn value(&self, theta: Theta, data: &SpectralEnergies) -> OptResult<Cost> {
        Ok(data.log_likelihood(from_log_scale(theta)))
    }

    fn check(&self, _theta: Theta, data: &SpectralEnergies) -> OptResult<()> {
        if data.dof() == 0 || data.n_realizations == 0 {
            return Err(OptError::NoResidualSpace { n_obs: data.dof(), n_trend: 0 });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::loglik_optimizer::{Bracket, MLEOptions, maximize};
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    // Purpose
    // -------
    // With unit eigenvalues the sill and likelihood have closed forms:
    // ρ̂ = Σu²/(mN(1+λ)) and ℓ = −(mN/2)(1 + ln 2π + ln ρ̂) − (mN/2) ln(1+λ).
    fn unit_eigenvalues_match_closed_form() {
        let e = SpectralEnergies {
            eigenvalues: array![1.0, 1.0, 1.0],
            energies: array![2.0, 1.0, 3.0],
            n_realizations: 2,
        };
        let lambda = 0.5;
        let sill = 6.0 / (6.0 * 1.5);

        assert_relative_eq!(e.sill(lambda), sill, epsilon = 1e-14);
        assert_relative_eq!(
            e.log_likelihood(lambda),
            -3.0 * (1.0 + (2.0 * PI).ln() + sill.ln()) - 3.0 * 1.5_f64.ln(),
            epsilon = 1e-12
        );
        assert_relative_eq!(e.trace(lambda, 3), 3.0 + 3.0 / 1.5, epsilon = 1e-14);
    }

    #[test]
    // Purpose
    // -------
    // Zero energies leave no positive sill; the profile is −∞ rather than
    // NaN so coarse grids can skip it.
    fn zero_energy_profile_is_negative_infinity() {
        let e = SpectralEnergies {
            eigenvalues: array![0.5, 2.0],
            energies: array![0.0, 0.0],
            n_realizations: 1,
        };
        assert_eq!(e.log_likelihood(1.0), f64::NEG_INFINITY);
    }

    #[test]
    // Purpose
    // -------
    // Golden-section on ln λ finds an interior maximum when the energies
    // decay more slowly than the eigenvalues (a genuine nugget).
    //
    // Given
    // -----
    // - D = (4, 1, 0.25, 0.01), u² = (4.5, 1.5, 0.75, 0.51): data look like
    //   D + 0.5 with unit sill.
    //
    // Expect
    // ------
    // - The optimum (λ ≈ 0.5) beats every point of a coarse grid around it.
    fn golden_section_improves_on_coarse_grid() {
        let e = SpectralEnergies {
            eigenvalues: array![4.0, 1.0, 0.25, 0.01],
            energies: array![4.5, 1.5, 0.75, 0.51],
            n_realizations: 1,
        };
        let bracket = Bracket::new(1e-3_f64.ln(), 1e1_f64.ln()).unwrap();

        let out =
            maximize(&LambdaProfile, 0.0, &e, &bracket, &MLEOptions::default()).unwrap();

        for lambda in [1e-3, 1e-2, 1e-1, 1.0, 1e1] {
            assert!(out.value >= e.log_likelihood(lambda) - 1e-12);
        }
        assert!(out.theta_hat > bracket.lower && out.theta_hat < bracket.upper);
    }
}
