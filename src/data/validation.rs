//! data::validation — shared input guards for observation tables.
//!
//! Purpose
//! -------
//! Centralize the checks run once when an [`Observations`] table is built,
//! so every downstream module can assume finite, rectangular input.
//!
//! Invariants & assumptions
//! ------------------------
//! - Coordinates are `n×1` or `n×2` with `n ≥ 1`.
//! - Every value column and the optional time vector have length `n`.
//! - Column names are unique.
//!
//! Conventions
//! -----------
//! - The first offending entry (in row-major order) is reported.
//!
//! [`Observations`]: crate::data::Observations
use crate::data::errors::{DataError, DataResult};
use ndarray::{ArrayView1, ArrayView2};

/// Validate the coordinate matrix: non-empty, 1 or 2 columns, all finite.
pub fn validate_coords(coords: ArrayView2<f64>) -> DataResult<()> {
    if coords.nrows() == 0 {
        return Err(DataError::EmptyObservations);
    }
    if !(1..=2).contains(&coords.ncols()) {
        return Err(DataError::InvalidCoordinateDim { ncols: coords.ncols() });
    }
    for ((row, col), &value) in coords.indexed_iter() {
        if !value.is_finite() {
            return Err(DataError::NonFiniteCoordinate { row, col, value });
        }
    }
    Ok(())
}

/// Validate one named value column against the table length.
pub fn validate_column(name: &str, values: ArrayView1<f64>, n: usize) -> DataResult<()> {
    if values.len() != n {
        return Err(DataError::LengthMismatch {
            what: "value column",
            expected: n,
            found: values.len(),
        });
    }
    for (row, &value) in values.iter().enumerate() {
        if !value.is_finite() {
            return Err(DataError::NonFiniteValue { column: name.to_string(), row, value });
        }
    }
    Ok(())
}

/// Validate the optional time vector length.
pub fn validate_times(times: Option<&[i64]>, n: usize) -> DataResult<()> {
    if let Some(t) = times {
        if t.len() != n {
            return Err(DataError::LengthMismatch {
                what: "time index",
                expected: n,
                found: t.len(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array2, array};

    #[test]
    // Purpose
    // -------
    // Cover each error branch and a success path.
    fn guards_cover_all_branches() {
        assert!(validate_coords(array![[0.0, 1.0], [2.0, 3.0]].view()).is_ok());
        assert_eq!(
            validate_coords(Array2::<f64>::zeros((0, 2)).view()).unwrap_err(),
            DataError::EmptyObservations
        );
        assert_eq!(
            validate_coords(Array2::<f64>::zeros((2, 3)).view()).unwrap_err(),
            DataError::InvalidCoordinateDim { ncols: 3 }
        );
        assert!(matches!(
            validate_coords(array![[0.0], [f64::INFINITY]].view()),
            Err(DataError::NonFiniteCoordinate { row: 1, col: 0, .. })
        ));
        assert!(matches!(
            validate_column("z", array![1.0, f64::NAN].view(), 2),
            Err(DataError::NonFiniteValue { row: 1, .. })
        ));
        assert!(matches!(
            validate_column("z", array![1.0].view(), 2),
            Err(DataError::LengthMismatch { expected: 2, found: 1, .. })
        ));
        assert!(validate_times(Some(&[1, 2, 3]), 2).is_err());
        assert!(validate_times(None, 2).is_ok());
    }
}
