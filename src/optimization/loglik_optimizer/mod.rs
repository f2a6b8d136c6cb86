//! loglik_optimizer — argmin-powered maximizer for scalar profile likelihoods.
//!
//! Purpose
//! -------
//! Provide a small Argmin-backed layer for **maximizing one-dimensional
//! log-likelihoods** `ℓ(θ)`. The estimators in this crate profile every
//! nuisance parameter out analytically, leaving scalar problems in
//! `ln λ` (noise-to-signal ratio) and `ln θ` (range). Callers implement
//! [`LogLikelihood`] and invoke [`maximize`] with a [`Bracket`].
//!
//! Key behaviors
//! -------------
//! - Convert user log-likelihoods `ℓ(θ)` into Argmin cost functions
//!   `c(θ) = -ℓ(θ)` via [`adapter::ArgMinAdapter`].
//! - Expose a single entrypoint [`maximize`] that validates the start
//!   point, builds a golden-section search via [`builders`], executes it via
//!   [`run::run_golden_section`], and normalizes results into an
//!   [`OptimOutcome`].
//! - Centralize configuration ([`Tolerances`], [`MLEOptions`]) and
//!   validation logic ([`validation`]).
//!
//! Invariants & assumptions
//! ------------------------
//! - The optimizer **always maximizes** `ℓ(θ)`; user code never implements
//!   the cost directly.
//! - `ℓ` is assumed unimodal inside the bracket; callers bracket around the
//!   best point of a coarse grid.
//! - [`LogLikelihood::value`] reports numerical failures as [`OptError`]
//!   values, which propagate unchanged out of [`maximize`].
//!
//! Conventions
//! -----------
//! - Errors bubble up as [`OptResult<T>`] / [`OptError`]; this module never
//!   intentionally panics.
//! - Verbose runs (feature `obs_slog`) attach Argmin's slog observer.
//!
//! Downstream usage
//! ----------------
//! - `estimation::fast` profiles `ln λ` and optionally refines `ln θ`.
//!
//! Testing notes
//! -------------
//! - Unit tests in submodules cover sign conventions in [`adapter`],
//!   configuration validation in [`traits`] and [`validation`], and
//!   end-to-end recovery of known maxima in [`api`].
//!
//! [`OptError`]: crate::optimization::errors::OptError
//! [`OptResult<T>`]: crate::optimization::errors::OptResult

pub mod adapter;
pub mod api;
pub mod builders;
pub mod run;
pub mod traits;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::api::maximize;
pub use self::traits::{Bracket, LogLikelihood, MLEOptions, OptimOutcome, Tolerances};
pub use self::types::{Cost, DEFAULT_MAX_ITER, FnEvalMap, Theta};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_spatial::optimization::loglik_optimizer::prelude::*;
//
// to import the main optimizer surface in a single line.

pub mod prelude {
    pub use super::api::maximize;
    pub use super::traits::{Bracket, LogLikelihood, MLEOptions, OptimOutcome, Tolerances};
    pub use super::types::{Cost, Theta};
}
