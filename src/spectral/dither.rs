//! Systematic decimation of oversized inputs.
use crate::estimation::warnings::FitWarning;
use ndarray::{Array2, ArrayView2, Axis};

/// Largest input the driver fits without decimation.
pub const MAX_DITHERED_POINTS: usize = 200;

/// Rows retained after [`dither`].
#[derive(Debug, Clone, PartialEq)]
pub struct Dithered {
    pub locations: Array2<f64>,
    pub values: Array2<f64>,
    /// Original row index of every retained row.
    pub rows: Vec<usize>,
    pub halvings: usize,
    pub warning: Option<FitWarning>,
}

/// Keep every other row until at most `max_points` remain.
///
/// Rows are kept in their original order (0, 2, 4, … of the current set),
/// so 500 rows become 250 and then 125 for `max_points = 200`. A
/// [`FitWarning::ExcessData`] is produced whenever at least one halving
/// happened.
pub fn dither(locations: ArrayView2<f64>, values: ArrayView2<f64>, max_points: usize) -> Dithered {
    let original = locations.nrows();
    let mut rows: Vec<usize> = (0..original).collect();
    let mut halvings = 0;
    while rows.len() > max_points.max(1) {
        rows = rows.into_iter().step_by(2).collect();
        halvings += 1;
    }
    let warning =
        (halvings > 0).then(|| FitWarning::excess_data(original, rows.len(), halvings));
    Dithered {
        locations: locations.select(Axis(0), &rows),
        values: values.select(Axis(0), &rows),
        rows,
        halvings,
        warning,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // 500 rows are halved twice (500 → 250 → 125), keeping even positions
    // of each intermediate set.
    fn halves_until_within_limit() {
        let locs = Array2::from_shape_fn((500, 2), |(i, j)| (i * 2 + j) as f64);
        let values = Array2::from_shape_fn((500, 1), |(i, _)| i as f64);

        let out = dither(locs.view(), values.view(), MAX_DITHERED_POINTS);

        assert_eq!(out.halvings, 2);
        assert_eq!(out.rows.len(), 125);
        assert_eq!(&out.rows[..3], &[0, 4, 8]);
        assert_eq!(out.values[[124, 0]], 496.0);
        assert_eq!(out.locations.row(1).to_vec(), vec![8.0, 9.0]);
        assert_eq!(
            out.warning,
            Some(FitWarning::ExcessData { original: 500, retained: 125, halvings: 2 })
        );
    }

    #[test]
    fn small_inputs_are_untouched() {
        let locs = Array2::<f64>::zeros((200, 1));
        let out = dither(locs.view(), locs.view(), MAX_DITHERED_POINTS);
        assert_eq!(out.halvings, 0);
        assert_eq!(out.rows.len(), 200);
        assert!(out.warning.is_none());
    }
}
