//! High-level entry point for maximizing a scalar `LogLikelihood`.
//!
//! Wraps the problem in an `ArgMinAdapter` (which *minimizes* `-ℓ(θ)`),
//! builds a golden-section search over the bracket and delegates the run to
//! `run_golden_section`.
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        OptimOutcome, Theta,
        adapter::ArgMinAdapter,
        builders::build_golden_section,
        run::run_golden_section,
        traits::{Bracket, LogLikelihood, MLEOptions},
        validation::verify_start,
    },
};

/// Maximize a scalar log-likelihood `ℓ(θ)` over `bracket` by golden-section
/// search.
///
/// # Behavior
/// - Checks that `start` lies inside `bracket`, then calls
///   `f.check(start, data)`.
/// - Builds the solver from `bracket` and `opts.tols.tol` and runs it for at
///   most `opts.tols.max_iter` iterations.
///
/// Golden-section search assumes `ℓ` is unimodal on the bracket; callers
/// bracket around the best point of a coarse grid first.
///
/// # Errors
/// - `InvalidStart` when `start` is outside the bracket.
/// - Propagates any error from `f.check`, the builder or the run.
///
/// # Example
/// ```
/// use rust_spatial::optimization::errors::OptResult;
/// use rust_spatial::optimization::loglik_optimizer::{
///     Bracket, LogLikelihood, MLEOptions, maximize,
/// };
///
/// struct Concave;
/// impl LogLikelihood for Concave {
///     type Data = f64;
///     fn value(&self, theta: f64, peak: &f64) -> OptResult<f64> {
///         Ok(-(theta - peak).powi(2))
///     }
/// }
///
/// let bracket = Bracket::new(-5.0, 5.0)?;
/// let out = maximize(&Concave, 0.0, &1.25, &bracket, &MLEOptions::default())?;
/// assert!((out.theta_hat - 1.25).abs() < 1e-4);
/// # Ok::<(), rust_spatial::optimization::errors::OptError>(())
/// ```
pub fn maximize<F: LogLikelihood>(
    f: &F, start: Theta, data: &F::Data, bracket: &Bracket, opts: &MLEOptions,
) -> OptResult<OptimOutcome> {
    verify_start(start, bracket.lower, bracket.upper)?;
    f.check(start, data)?;
    let problem = ArgMinAdapter::new(f, data);
    let solver = build_golden_section(bracket, opts)?;
    run_golden_section(start, opts, problem, solver)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::{
        errors::{OptError, OptResult},
        loglik_optimizer::traits::Tolerances,
    };
    use approx::assert_abs_diff_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Recovery of the maximum of concave 1-D functions.
    // - Rejection of a start outside the bracket.
    // - Propagation of user errors out of the solver loop.
    // -------------------------------------------------------------------------

    struct ShiftedLogCosh;

    impl LogLikelihood for ShiftedLogCosh {
        type Data = f64;

        fn value(&self, theta: Theta, shift: &f64) -> OptResult<f64> {
            Ok(-(theta - shift).cosh().ln())
        }
    }

    struct Quadratic;

    impl LogLikelihood for Quadratic {
        type Data = f64;

        fn value(&self, theta: Theta, peak: &f64) -> OptResult<f64> {
            Ok(-(theta - peak).powi(2))
        }
    }

    struct Failing;

    impl LogLikelihood for Failing {
        type Data = ();

        fn value(&self, _theta: Theta, _data: &()) -> OptResult<f64> {
            Err(OptError::NotPositiveDefinite { dim: 3 })
        }
    }

    #[test]
    // Purpose
    // -------
    // Golden-section recovers the maximizer of a smooth concave function
    // and reports the log-likelihood (not the cost).
    //
    // Given
    // -----
    // - ℓ(θ) = −ln cosh(θ − 0.7) on [−4, 6], start at 0.
    //
    // Expect
    // ------
    // - θ̂ ≈ 0.7, ℓ(θ̂) ≈ 0, converged.
    fn recovers_maximum_of_concave_function() {
        let bracket = Bracket::new(-4.0, 6.0).unwrap();

        let out = maximize(&ShiftedLogCosh, 0.0, &0.7, &bracket, &MLEOptions::default()).unwrap();

        assert_abs_diff_eq!(out.theta_hat, 0.7, epsilon = 1e-4);
        assert_abs_diff_eq!(out.value, 0.0, epsilon = 1e-8);
        assert!(out.converged, "status = {}", out.status);
    }

    #[test]
    // Purpose
    // -------
    // The tolerance is absolute in θ: a peak far from zero on a wide
    // log-scale bracket is located to within `tol`, not `tol·|θ|`.
    //
    // Given
    // -----
    // - ℓ(θ) = −(θ − ln 1e-4)² on `[ln 1e-6, ln 1e2]`, `tol = 1e-7`.
    //
    // Expect
    // ------
    // - |θ̂ − ln 1e-4| ≤ 1e-7 and the run converges.
    fn tolerance_is_absolute_on_log_scale() {
        let peak = 1e-4_f64.ln();
        let bracket = Bracket::new(1e-6_f64.ln(), 1e2_f64.ln()).unwrap();
        let opts = MLEOptions::new(Tolerances::new(1e-7, 500).unwrap(), false);

        let out = maximize(&Quadratic, 0.0, &peak, &bracket, &opts).unwrap();

        assert!((out.theta_hat - peak).abs() <= 1e-7, "theta_hat = {}", out.theta_hat);
        assert!(out.converged, "status = {}", out.status);
    }

    #[test]
    fn start_outside_bracket_is_rejected() {
        let bracket = Bracket::new(0.0, 1.0).unwrap();
        let err = maximize(&ShiftedLogCosh, 3.0, &0.5, &bracket, &MLEOptions::default());
        assert!(matches!(err, Err(OptError::InvalidStart { .. })));
    }

    #[test]
    // Purpose
    // -------
    // An `OptError` raised inside the cost function comes back out of the
    // argmin executor as the same variant.
    fn user_errors_propagate_through_executor() {
        let bracket = Bracket::new(0.0, 1.0).unwrap();
        let err = maximize(&Failing, 0.5, &(), &bracket, &MLEOptions::default()).unwrap_err();
        assert_eq!(err, OptError::NotPositiveDefinite { dim: 3 });
    }
}
