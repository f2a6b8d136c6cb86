//! data — validated observation tables.
//!
//! Purpose
//! -------
//! Hold scattered observations (1-D or 2-D locations, optional integer time
//! index, named value columns) behind a single validated type,
//! [`Observations`], with the table layout fixed at ingestion.
//!
//! Key behaviors
//! -------------
//! - Validate shapes and finiteness once ([`validation`]).
//! - Group rows by time slice and by site for the spatial and temporal
//!   likelihoods.
//!
//! Conventions
//! -----------
//! - Errors are [`DataError`] via [`DataResult`].
//! - No logging; pure data handling.

pub mod errors;
pub mod observations;
pub mod validation;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::errors::{DataError, DataResult};
pub use self::observations::{ObservationLayout, Observations, SiteGroup, TimeSlice};
