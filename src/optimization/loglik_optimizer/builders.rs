//! loglik_optimizer::builders — golden-section solver construction.
//!
//! Purpose
//! -------
//! Hide Argmin's constructor wiring for the golden-section search and apply
//! crate-level options, so higher-level code can request a configured solver
//! from a [`Bracket`] and [`MLEOptions`].
//!
//! Conventions
//! -----------
//! - The builder does **not** set the starting point or `max_iters`; these
//!   are runtime concerns applied by the runner (`run_golden_section`).
//! - `opts.tols.tol` is an absolute bracket width in `θ`. Argmin stops when
//!   `|x₃ − x₀| ≤ t·(|x₁| + |x₂|)`, so the builder hands it
//!   `t = tol / (2·max(|lower|, |upper|))`; both interior points stay inside
//!   the bracket, hence the final width is at most `tol`.
//! - Argmin rejections surface as [`OptError`](crate::optimization::errors::OptError)
//!   via `From<argmin::core::Error>`.
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        traits::{Bracket, MLEOptions},
        types::GoldenSection,
        validation::verify_tolerance,
    },
};

/// build_golden_section — construct a golden-section search over a bracket.
///
/// # Errors
/// - `InvalidTolerance` if `opts.tols.tol` is not finite and positive.
/// - Any error Argmin raises for the bracket or tolerance.
pub fn build_golden_section(bracket: &Bracket, opts: &MLEOptions) -> OptResult<GoldenSection> {
    verify_tolerance(opts.tols.tol)?;
    let relative = relative_tolerance(opts.tols.tol, bracket);
    let solver = GoldenSection::new(bracket.lower, bracket.upper)?.with_tolerance(relative)?;
    Ok(solver)
}

/// Argmin's relative stopping factor equivalent to an absolute width `tol`
/// on `bracket`.
fn relative_tolerance(tol: f64, bracket: &Bracket) -> f64 {
    tol / (2.0 * bracket.lower.abs().max(bracket.upper.abs()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::loglik_optimizer::traits::Tolerances;

    #[test]
    // Purpose
    // -------
    // A valid bracket and tolerance build a solver; a bad tolerance that
    // slipped past construction is still rejected here.
    fn builds_with_valid_inputs_only() {
        let bracket = Bracket::new(-3.0, 3.0).unwrap();
        assert!(build_golden_section(&bracket, &MLEOptions::default()).is_ok());

        let mut opts = MLEOptions::new(Tolerances::new(1e-6, 50).unwrap(), false);
        opts.tols.tol = -1.0;
        assert!(build_golden_section(&bracket, &opts).is_err());
    }

    #[test]
    // Purpose
    // -------
    // The relative factor scales with the bracket so that the guaranteed
    // final width equals the absolute tolerance.
    //
    // Given
    // -----
    // - The default `ln λ` bracket `[ln 1e-6, ln 1e2]` and `tol = 1e-7`.
    //
    // Expect
    // ------
    // - `t · 2·max(|lower|, |upper|) = tol`.
    fn relative_factor_bounds_absolute_width() {
        let bracket = Bracket::new(1e-6_f64.ln(), 1e2_f64.ln()).unwrap();

        let t = relative_tolerance(1e-7, &bracket);

        assert!((t * 2.0 * 1e-6_f64.ln().abs() - 1e-7).abs() < 1e-20);
        assert!(t < 1e-7);
    }
}
