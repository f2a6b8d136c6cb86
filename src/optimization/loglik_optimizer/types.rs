//! loglik_optimizer::types — shared numeric aliases and solver wiring.
//!
//! Purpose
//! -------
//! Centralize the scalar types and solver aliases used by the
//! one-dimensional profile-likelihood optimizer, so the rest of the
//! optimization code stays agnostic to Argmin generics.
//!
//! Key behaviors
//! -------------
//! - Define canonical aliases for the scalar parameter and cost
//!   (`Theta`, `Cost`).
//! - Provide the map type for Argmin function-evaluation counters
//!   (`FnEvalMap`).
//! - Expose the golden-section solver and its iteration state specialized
//!   to `f64`.
//!
//! Conventions
//! -----------
//! - Parameters searched by this crate are scale parameters mapped to the
//!   log scale by the caller; `Theta` is that log-scale value.
//! - This module defines no runtime behavior.
use argmin::{core::IterState, solver::goldensectionsearch::GoldenSectionSearch};
use std::collections::HashMap;

/// Scalar parameter searched by the optimizer (typically `ln θ` or `ln λ`).
pub type Theta = f64;

/// Scalar objective value; internally the cost `c(θ) = -ℓ(θ)`.
pub type Cost = f64;

/// Function-evaluation counters as reported by the solver.
///
/// Maps human-readable counter names (e.g., `"cost_count"`) to counts.
pub type FnEvalMap = HashMap<String, u64>;

/// Default iteration cap for golden-section runs.
pub const DEFAULT_MAX_ITER: u64 = 500;

/// Golden-section search specialized to this crate's scalar type.
pub type GoldenSection = GoldenSectionSearch<Cost>;

/// Iteration state carried by [`GoldenSection`].
pub type ScalarState = IterState<Theta, (), (), (), (), Cost>;
