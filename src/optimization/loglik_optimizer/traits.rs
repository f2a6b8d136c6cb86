//! Public API surface for one-dimensional profile-likelihood maximization.
//!
//! - [`LogLikelihood`]: trait users implement for a scalar profile.
//! - [`Bracket`]: validated search interval.
//! - [`MLEOptions`] and [`Tolerances`]: configuration for the optimizer.
//! - [`OptimOutcome`]: normalized result returned by the high-level `maximize` API.
//!
//! Convention: we *maximize* a user log-likelihood `ℓ(θ)` by minimizing the cost
//! `c(θ) = -ℓ(θ)`.
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        Cost, FnEvalMap, Theta,
        types::DEFAULT_MAX_ITER,
        validation::{
            validate_best_param, validate_value, verify_bracket, verify_max_iter, verify_tolerance,
        },
    },
    numerical_stability::GENERAL_TOL,
};
use argmin::core::{TerminationReason, TerminationStatus};

/// User-implemented scalar log-likelihood interface.
///
/// You maximize `ℓ(θ)`; internally we minimize the cost `c(θ) = -ℓ(θ)`.
///
/// - `type Data`: per-problem data carried into `value`/`check`.
///
/// Required:
/// - `value(Theta, &Data) -> OptResult<Cost>`: evaluate `ℓ(θ)`.
///   - Errors: return a descriptive `OptError` for numerical failures.
///
/// Optional:
/// - `check(Theta, &Data) -> OptResult<()>`: validation hook called once
///   before optimization. Defaults to accepting everything.
pub trait LogLikelihood {
    type Data;

    // Required methods
    fn value(&self, theta: Theta, data: &Self::Data) -> OptResult<Cost>;

    // Optional methods
    fn check(&self, _theta: Theta, _data: &Self::Data) -> OptResult<()> {
        Ok(())
    }
}

/// Closed search interval `[lower, upper]` for the scalar parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket {
    pub lower: f64,
    pub upper: f64,
}

impl Bracket {
    /// Construct a validated bracket.
    ///
    /// # Errors
    /// - [`crate::optimization::errors::OptError::InvalidBracket`] if an end
    ///   is non-finite or `lower >= upper`.
    pub fn new(lower: f64, upper: f64) -> OptResult<Self> {
        verify_bracket(lower, upper)?;
        Ok(Self { lower, upper })
    }

    /// Midpoint of the interval.
    pub fn midpoint(&self) -> f64 {
        0.5 * (self.lower + self.upper)
    }

    /// Whether `theta` lies inside the closed interval.
    pub fn contains(&self, theta: Theta) -> bool {
        theta >= self.lower && theta <= self.upper
    }
}

/// Optimizer-level configuration.
///
/// Fields:
/// - `tols: Tolerances` — tolerance and iteration limit.
/// - `verbose: bool` — if `true`, attaches an observer (behind the `obs_slog`
///   feature) and logs the initial state.
///
/// Default:
/// - `tols`: `tol = GENERAL_TOL (1e-7)`, `max_iter = 500`
/// - `verbose`: `false`
#[derive(Debug, Clone, PartialEq)]
pub struct MLEOptions {
    pub tols: Tolerances,
    pub verbose: bool,
}

impl MLEOptions {
    pub fn new(tols: Tolerances, verbose: bool) -> Self {
        Self { tols, verbose }
    }
}

impl Default for MLEOptions {
    fn default() -> Self {
        Self { tols: Tolerances { tol: GENERAL_TOL, max_iter: DEFAULT_MAX_ITER }, verbose: false }
    }
}

/// Numerical tolerance and iteration limit used by the optimizer.
///
/// - `tol`: absolute bracket-width tolerance of the golden-section search,
///   in units of `θ` (so `1e-7` on `ln λ` means a final `ln λ` interval of
///   at most `1e-7`).
/// - `max_iter`: hard cap on the number of iterations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    pub tol: f64,
    pub max_iter: u64,
}

impl Tolerances {
    /// Construct validated tolerances.
    ///
    /// # Errors
    /// - [`crate::optimization::errors::OptError::InvalidTolerance`] for
    ///   non-finite or non-positive `tol`.
    /// - [`crate::optimization::errors::OptError::InvalidMaxIter`] if
    ///   `max_iter == 0`.
    pub fn new(tol: f64, max_iter: u64) -> OptResult<Self> {
        verify_tolerance(tol)?;
        verify_max_iter(max_iter)?;
        Ok(Self { tol, max_iter })
    }
}

/// Canonical result returned by `maximize`.
///
/// - `theta_hat`: best parameter found.
/// - `value`: best **log-likelihood** value `ℓ(θ)` (not the cost).
/// - `converged`: `true` if the solver stopped on its own tolerance.
/// - `status`: human-readable termination status string.
/// - `iterations`: number of optimizer iterations performed.
/// - `fn_evals`: function-evaluation counters reported by `argmin`.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimOutcome {
    pub theta_hat: Theta,
    pub value: f64,
    pub converged: bool,
    pub status: String,
    pub iterations: usize,
    pub fn_evals: FnEvalMap,
}

impl OptimOutcome {
    /// Build a validated [`OptimOutcome`] from raw solver state.
    ///
    /// # Errors
    /// - Propagates validation errors for the best parameter or value.
    pub fn new(
        theta_hat_opt: Option<Theta>, value: f64, termination: TerminationStatus, iterations: u64,
        fn_evals: FnEvalMap,
    ) -> OptResult<Self> {
        let theta_hat = validate_best_param(theta_hat_opt)?;
        validate_value(value)?;
        let converged = matches!(
            termination,
            TerminationStatus::Terminated(TerminationReason::SolverConverged)
        );
        let status = match termination {
            TerminationStatus::NotTerminated => "Not terminated".to_string(),
            other => format!("{other:?}"),
        };
        Ok(Self { theta_hat, value, converged, status, iterations: iterations as usize, fn_evals })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::errors::OptError;

    #[test]
    // Purpose
    // -------
    // Defaults are valid and constructors reject the obvious mistakes.
    fn options_defaults_and_validation() {
        let opts = MLEOptions::default();
        assert_eq!(opts.tols.tol, GENERAL_TOL);
        assert!(Tolerances::new(opts.tols.tol, opts.tols.max_iter).is_ok());
        assert!(Tolerances::new(-1.0, 10).is_err());
        assert!(Tolerances::new(1e-6, 0).is_err());

        let b = Bracket::new(-2.0, 4.0).unwrap();
        assert_eq!(b.midpoint(), 1.0);
        assert!(b.contains(4.0) && !b.contains(4.1));
        assert!(matches!(Bracket::new(3.0, 3.0), Err(OptError::InvalidBracket { .. })));
    }

    #[test]
    // Purpose
    // -------
    // Only an own-tolerance stop counts as converged.
    fn outcome_maps_termination_status() {
        let converged = OptimOutcome::new(
            Some(1.0),
            -3.0,
            TerminationStatus::Terminated(TerminationReason::SolverConverged),
            12,
            FnEvalMap::new(),
        )
        .unwrap();
        let capped = OptimOutcome::new(
            Some(1.0),
            -3.0,
            TerminationStatus::Terminated(TerminationReason::MaxItersReached),
            500,
            FnEvalMap::new(),
        )
        .unwrap();

        assert!(converged.converged);
        assert!(!capped.converged);
        assert_eq!(capped.iterations, 500);
        assert!(
            OptimOutcome::new(None, 0.0, TerminationStatus::NotTerminated, 0, FnEvalMap::new())
                .is_err()
        );
    }
}
