//! Non-fatal fit diagnostics.
//!
//! A fit can succeed and still be untrustworthy: the maximizer may sit on
//! the edge of the searched grid, or the driver may have thrown data away
//! to bound the cost. These conditions are returned as [`FitWarning`]
//! values inside results and logged once with `tracing::warn!` when
//! created.
use tracing::warn;

/// Grid axis a boundary warning refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridAxis {
    Range,
    Variance,
    Ar1,
    Lambda,
}

impl std::fmt::Display for GridAxis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GridAxis::Range => "range",
            GridAxis::Variance => "variance",
            GridAxis::Ar1 => "ar1",
            GridAxis::Lambda => "lambda",
        };
        f.write_str(name)
    }
}

/// FitWarning — diagnostics attached to a successful fit.
///
/// Variants
/// --------
/// - `BoundaryReached { axis, value, index, len, smoothness }`
///   The argmax along `axis` is its first or last grid value; the true
///   maximizer may lie outside the searched interval. Never raised for
///   axes of length 1. `smoothness` names the grid-search row the argmax
///   belongs to; `None` for fits with a single fixed smoothness.
/// - `ExcessData { original, retained, halvings }`
///   The spectral driver decimated its input by keeping every other row
///   `halvings` times.
#[derive(Debug, Clone, PartialEq)]
pub enum FitWarning {
    BoundaryReached {
        axis: GridAxis,
        value: f64,
        index: usize,
        len: usize,
        smoothness: Option<f64>,
    },
    ExcessData { original: usize, retained: usize, halvings: usize },
}

impl FitWarning {
    /// Boundary check for the argmax `index` on an axis of `values`.
    ///
    /// Returns (and logs) a warning iff the axis has at least two values
    /// and `index` is its first or last position.
    pub fn boundary(axis: GridAxis, values: &[f64], index: usize) -> Option<Self> {
        Self::edge(axis, values, index, None)
    }

    /// As [`FitWarning::boundary`], tagged with the smoothness row of a
    /// grid search.
    pub fn boundary_at_smoothness(
        axis: GridAxis, values: &[f64], index: usize, smoothness: f64,
    ) -> Option<Self> {
        Self::edge(axis, values, index, Some(smoothness))
    }

    fn edge(axis: GridAxis, values: &[f64], index: usize, smoothness: Option<f64>) -> Option<Self> {
        let len = values.len();
        if len < 2 || (index != 0 && index != len - 1) {
            return None;
        }
        Some(Self::BoundaryReached { axis, value: values[index], index, len, smoothness }.logged())
    }

    /// Excess-data warning, logged on creation.
    pub fn excess_data(original: usize, retained: usize, halvings: usize) -> Self {
        Self::ExcessData { original, retained, halvings }.logged()
    }

    fn logged(self) -> Self {
        match &self {
            FitWarning::BoundaryReached { axis, value, index, len, smoothness } => {
                warn!(
                    %axis,
                    value,
                    index,
                    len,
                    smoothness = ?smoothness,
                    "maximum likelihood estimate on grid boundary"
                );
            }
            FitWarning::ExcessData { original, retained, halvings } => {
                warn!(original, retained, halvings, "excess data decimated before fitting");
            }
        }
        self
    }
}

impl std::fmt::Display for FitWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FitWarning::BoundaryReached { axis, value, index, len, smoothness } => {
                write!(f, "Estimate for {axis} = {value}")?;
                if let Some(nu) = smoothness {
                    write!(f, " at smoothness {nu}")?;
                }
                write!(
                    f,
                    " lies on the grid boundary (index {index} of {len}); widen the {axis} grid"
                )
            }
            FitWarning::ExcessData { original, retained, halvings } => write!(
                f,
                "Excess data: kept {retained} of {original} observations after {halvings} halvings"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // The boundary rule fires iff the index is an end of an axis with at
    // least two values.
    //
    // Given
    // -----
    // - A 4-point axis, a 1-point axis.
    //
    // Expect
    // ------
    // - Indices 0 and 3 warn, 1 and 2 do not; the fixed axis never warns.
    fn boundary_rule_iff_edge_of_nontrivial_axis() {
        let axis = [1.0, 2.0, 3.0, 4.0];
        assert!(FitWarning::boundary(GridAxis::Range, &axis, 0).is_some());
        assert!(FitWarning::boundary(GridAxis::Range, &axis, 1).is_none());
        assert!(FitWarning::boundary(GridAxis::Range, &axis, 2).is_none());
        assert_eq!(
            FitWarning::boundary(GridAxis::Variance, &axis, 3),
            Some(FitWarning::BoundaryReached {
                axis: GridAxis::Variance,
                value: 4.0,
                index: 3,
                len: 4,
                smoothness: None
            })
        );
        assert!(FitWarning::boundary(GridAxis::Range, &[7.0], 0).is_none());
    }

    #[test]
    fn display_names_axis() {
        let w = FitWarning::boundary(GridAxis::Ar1, &[0.1, 0.9], 1).unwrap();
        assert!(w.to_string().contains("ar1"));
        assert!(FitWarning::excess_data(500, 125, 2).to_string().contains("125 of 500"));
        let tagged =
            FitWarning::boundary_at_smoothness(GridAxis::Range, &[1.0, 2.0], 0, 0.5).unwrap();
        assert!(tagged.to_string().contains("at smoothness 0.5"));
    }
}
