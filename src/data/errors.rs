//! data::errors — validation failures for observation tables.
//!
//! Purpose
//! -------
//! Describe everything that can be wrong with raw input before any distance
//! or likelihood is computed: empty tables, ragged columns, non-finite
//! coordinates or values, and column-name problems.
//!
//! Conventions
//! -----------
//! - Variants carry the offending row, column name or value.
//! - `EstimationError` wraps [`DataError`] via `From`, so estimators can use
//!   `?` on ingestion.

pub type DataResult<T> = Result<T, DataError>;

/// DataError — invalid observation-table input.
///
/// Variants
/// --------
/// - `EmptyObservations`
///   The table has no rows.
/// - `InvalidCoordinateDim { ncols }`
///   Coordinates must have one or two columns.
/// - `LengthMismatch { what, expected, found }`
///   A column, time vector or coordinate axis has the wrong number of rows.
/// - `NonFiniteCoordinate { row, col, value }`
///   A coordinate is NaN or ±∞.
/// - `NonFiniteValue { column, row, value }`
///   A value in a named column is NaN or ±∞.
/// - `UnknownColumn { name }`
///   A requested value column does not exist.
/// - `DuplicateColumn { name }`
///   Two value columns share a name.
/// - `NoValueColumns`
///   The table carries no value column at all.
/// - `InsufficientData { needed, found }`
///   Fewer rows than an operation requires.
#[derive(Debug, Clone, PartialEq)]
pub enum DataError {
    EmptyObservations,
    InvalidCoordinateDim { ncols: usize },
    LengthMismatch { what: &'static str, expected: usize, found: usize },
    NonFiniteCoordinate { row: usize, col: usize, value: f64 },
    NonFiniteValue { column: String, row: usize, value: f64 },
    UnknownColumn { name: String },
    DuplicateColumn { name: String },
    NoValueColumns,
    InsufficientData { needed: usize, found: usize },
}

impl std::error::Error for DataError {}

impl std::fmt::Display for DataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataError::EmptyObservations => write!(f, "Observation table has no rows"),
            DataError::InvalidCoordinateDim { ncols } => {
                write!(f, "Coordinates must have 1 or 2 columns, found {ncols}")
            }
            DataError::LengthMismatch { what, expected, found } => {
                write!(f, "Length mismatch for {what}: expected {expected}, found {found}")
            }
            DataError::NonFiniteCoordinate { row, col, value } => {
                write!(f, "Non-finite coordinate at row {row}, axis {col}: {value}")
            }
            DataError::NonFiniteValue { column, row, value } => {
                write!(f, "Non-finite value in column '{column}' at row {row}: {value}")
            }
            DataError::UnknownColumn { name } => write!(f, "Unknown value column '{name}'"),
            DataError::DuplicateColumn { name } => write!(f, "Duplicate value column '{name}'"),
            DataError::NoValueColumns => write!(f, "Observation table has no value columns"),
            DataError::InsufficientData { needed, found } => {
                write!(f, "Need at least {needed} observations, found {found}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Column-related messages quote the column name.
    fn display_quotes_column_names() {
        let err = DataError::UnknownColumn { name: "temp".to_string() };
        let nonfinite =
            DataError::NonFiniteValue { column: "temp".to_string(), row: 3, value: f64::NAN };

        assert!(err.to_string().contains("'temp'"));
        assert!(nonfinite.to_string().contains("row 3"));
    }
}
