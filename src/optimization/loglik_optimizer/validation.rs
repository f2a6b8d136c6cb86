//! Validation helpers for profile-likelihood optimization.
//!
//! This module centralizes the consistency checks used across the
//! optimizer interface:
//!
//! - **Configuration checks**: [`verify_tolerance`], [`verify_max_iter`],
//!   [`verify_bracket`], [`verify_start`].
//! - **Outcome checks**: [`validate_best_param`] and [`validate_value`].
//!
//! Each helper returns a specific [`OptError`] variant so that callers see
//! the offending value.
use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::Theta,
};

/// Validate the golden-section tolerance.
///
/// # Errors
/// Returns [`OptError::InvalidTolerance`] if the value is non-finite or ≤ 0.
pub fn verify_tolerance(tol: f64) -> OptResult<()> {
    if !tol.is_finite() {
        return Err(OptError::InvalidTolerance { tol, reason: "Tolerance must be finite." });
    }
    if tol <= 0.0 {
        return Err(OptError::InvalidTolerance { tol, reason: "Tolerance must be positive." });
    }
    Ok(())
}

/// Validate the iteration cap.
///
/// # Errors
/// Returns [`OptError::InvalidMaxIter`] if `max_iter == 0`.
pub fn verify_max_iter(max_iter: u64) -> OptResult<()> {
    if max_iter == 0 {
        return Err(OptError::InvalidMaxIter {
            max_iter,
            reason: "Maximum iterations must be greater than zero.",
        });
    }
    Ok(())
}

/// Validate a search bracket `[lower, upper]`.
///
/// # Errors
/// Returns [`OptError::InvalidBracket`] if either end is non-finite or the
/// interval is empty.
pub fn verify_bracket(lower: f64, upper: f64) -> OptResult<()> {
    if !lower.is_finite() || !upper.is_finite() {
        return Err(OptError::InvalidBracket {
            lower,
            upper,
            reason: "Bracket ends must be finite.",
        });
    }
    if lower >= upper {
        return Err(OptError::InvalidBracket {
            lower,
            upper,
            reason: "Lower end must be strictly below upper end.",
        });
    }
    Ok(())
}

/// Validate that the starting point lies inside the bracket.
///
/// # Errors
/// Returns [`OptError::InvalidStart`] otherwise (including NaN).
pub fn verify_start(start: Theta, lower: f64, upper: f64) -> OptResult<()> {
    if !(start >= lower && start <= upper) {
        return Err(OptError::InvalidStart { start, lower, upper });
    }
    Ok(())
}

/// Validate and unwrap the best parameter reported by the solver.
///
/// # Errors
/// - [`OptError::MissingBestParam`] if none was reported.
/// - [`OptError::NonFiniteCost`] if the parameter is not finite.
pub fn validate_best_param(best: Option<Theta>) -> OptResult<Theta> {
    match best {
        Some(t) if t.is_finite() => Ok(t),
        Some(t) => Err(OptError::NonFiniteCost { value: t }),
        None => Err(OptError::MissingBestParam),
    }
}

/// Validate that a scalar log-likelihood value is finite.
///
/// # Errors
/// Returns [`OptError::NonFiniteCost`] if the value is `NaN` or infinite.
pub fn validate_value(value: f64) -> OptResult<()> {
    if !value.is_finite() {
        return Err(OptError::NonFiniteCost { value });
    }
    Ok(())
}
