//! Observation tables: locations, optional time index, named value columns.
//!
//! Purpose
//! -------
//! Provide the validated input container shared by every estimator and
//! interpolator. The table layout (1-D or 2-D space, with or without time)
//! is decided once here and carried as [`ObservationLayout`]; no downstream
//! code inspects raw columns to re-derive it.
//!
//! Key behaviors
//! -------------
//! - [`Observations::new`] validates coordinates, the time vector and every
//!   value column in a single pass each.
//! - [`Observations::time_slices`] groups rows by distinct time index
//!   (ascending); without a time dimension there is a single slice.
//! - [`Observations::site_groups`] groups rows by exact coordinate equality;
//!   each group is a time series at one site, ordered by time.
//!
//! Invariants & assumptions
//! ------------------------
//! - `n ≥ 1`, coordinates `n×1` or `n×2`, all finite.
//! - Every value column has length `n` and finite entries; names unique.
//! - Time indices are integers (e.g. day numbers); `|t_i − t_j|` is the lag
//!   used by the temporal AR(1) model.
//!
//! Conventions
//! -----------
//! - Row order is preserved everywhere; groupings return row indices into
//!   the original table.
//! - `-0.0` and `0.0` are the same site.
//!
//! Testing notes
//! -------------
//! - Unit tests cover layout detection, column lookup, slice ordering and
//!   site grouping with interleaved times.
use crate::data::{
    errors::{DataError, DataResult},
    validation::{validate_column, validate_coords, validate_times},
};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use std::collections::{BTreeMap, HashMap};

/// Shape of an observation table, decided at ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObservationLayout {
    pub has_temporal_dimension: bool,
    pub has_second_spatial_dim: bool,
}

impl ObservationLayout {
    /// Number of spatial coordinates per row (1 or 2).
    pub fn spatial_dims(&self) -> usize {
        if self.has_second_spatial_dim { 2 } else { 1 }
    }
}

/// Rows sharing one time index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSlice {
    /// `None` when the table has no temporal dimension.
    pub time: Option<i64>,
    pub rows: Vec<usize>,
}

/// Rows observed at one site, ordered by time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteGroup {
    pub rows: Vec<usize>,
    /// Time index of each row in `rows`; all zero without a time dimension.
    pub times: Vec<i64>,
}

/// Observations — validated locations, optional times and value columns.
///
/// Fields
/// ------
/// - `coords`: `n×d` locations with `d ∈ {1, 2}`.
/// - `times`: optional integer time index per row.
/// - `columns`: named value columns in insertion order.
/// - `layout`: flags derived at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Observations {
    coords: Array2<f64>,
    times: Option<Vec<i64>>,
    columns: Vec<(String, Array1<f64>)>,
    layout: ObservationLayout,
}

impl Observations {
    /// Construct a validated table.
    ///
    /// # Errors
    /// - [`DataError::EmptyObservations`], [`DataError::InvalidCoordinateDim`]
    ///   and [`DataError::NonFiniteCoordinate`] for bad coordinates.
    /// - [`DataError::LengthMismatch`] for a ragged time vector or column.
    /// - [`DataError::NonFiniteValue`] for a bad value.
    /// - [`DataError::NoValueColumns`] / [`DataError::DuplicateColumn`].
    pub fn new(
        coords: Array2<f64>, times: Option<Vec<i64>>, columns: Vec<(String, Array1<f64>)>,
    ) -> DataResult<Self> {
        validate_coords(coords.view())?;
        let n = coords.nrows();
        validate_times(times.as_deref(), n)?;
        if columns.is_empty() {
            return Err(DataError::NoValueColumns);
        }
        for (i, (name, values)) in columns.iter().enumerate() {
            if columns[..i].iter().any(|(other, _)| other == name) {
                return Err(DataError::DuplicateColumn { name: name.clone() });
            }
            validate_column(name, values.view(), n)?;
        }
        let layout = ObservationLayout {
            has_temporal_dimension: times.is_some(),
            has_second_spatial_dim: coords.ncols() == 2,
        };
        Ok(Self { coords, times, columns, layout })
    }

    /// Build a table from separate coordinate axes.
    ///
    /// `y = None` gives a 1-D spatial layout.
    pub fn from_axes(
        x: Array1<f64>, y: Option<Array1<f64>>, times: Option<Vec<i64>>,
        columns: Vec<(String, Array1<f64>)>,
    ) -> DataResult<Self> {
        let n = x.len();
        let coords = match y {
            Some(y) => {
                if y.len() != n {
                    return Err(DataError::LengthMismatch {
                        what: "y coordinate",
                        expected: n,
                        found: y.len(),
                    });
                }
                ndarray::stack(Axis(1), &[x.view(), y.view()]).map_err(|_| {
                    DataError::LengthMismatch { what: "y coordinate", expected: n, found: y.len() }
                })?
            }
            None => x.insert_axis(Axis(1)),
        };
        Self::new(coords, times, columns)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.coords.nrows()
    }

    /// Always `false` for a validated table; provided for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.coords.nrows() == 0
    }

    pub fn coords(&self) -> ArrayView2<'_, f64> {
        self.coords.view()
    }

    pub fn times(&self) -> Option<&[i64]> {
        self.times.as_deref()
    }

    pub fn layout(&self) -> ObservationLayout {
        self.layout
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    /// Look up a value column by name.
    ///
    /// # Errors
    /// - [`DataError::UnknownColumn`] if no column has that name.
    pub fn column(&self, name: &str) -> DataResult<ArrayView1<'_, f64>> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, values)| values.view())
            .ok_or_else(|| DataError::UnknownColumn { name: name.to_string() })
    }

    /// Number of distinct time indices (1 without a time dimension).
    pub fn distinct_times(&self) -> usize {
        match &self.times {
            Some(t) => {
                let mut sorted = t.clone();
                sorted.sort_unstable();
                sorted.dedup();
                sorted.len()
            }
            None => 1,
        }
    }

    /// Rows grouped by time index, ascending in time.
    pub fn time_slices(&self) -> Vec<TimeSlice> {
        match &self.times {
            None => vec![TimeSlice { time: None, rows: (0..self.len()).collect() }],
            Some(times) => {
                let mut by_time: BTreeMap<i64, Vec<usize>> = BTreeMap::new();
                for (row, &t) in times.iter().enumerate() {
                    by_time.entry(t).or_default().push(row);
                }
                by_time.into_iter().map(|(t, rows)| TimeSlice { time: Some(t), rows }).collect()
            }
        }
    }

    /// Rows grouped by exact location, in order of first appearance; rows
    /// inside a group are sorted by time.
    pub fn site_groups(&self) -> Vec<SiteGroup> {
        let mut index: HashMap<Vec<u64>, usize> = HashMap::new();
        let mut groups: Vec<Vec<usize>> = Vec::new();
        for (row, coord) in self.coords.rows().into_iter().enumerate() {
            // `+ 0.0` folds -0.0 into 0.0 before taking the bit pattern.
            let key: Vec<u64> = coord.iter().map(|&c| (c + 0.0).to_bits()).collect();
            match index.get(&key) {
                Some(&g) => groups[g].push(row),
                None => {
                    index.insert(key, groups.len());
                    groups.push(vec![row]);
                }
            }
        }
        groups
            .into_iter()
            .map(|mut rows| {
                let times: Vec<i64> = match &self.times {
                    Some(t) => {
                        rows.sort_by_key(|&r| t[r]);
                        rows.iter().map(|&r| t[r]).collect()
                    }
                    None => vec![0; rows.len()],
                };
                SiteGroup { rows, times }
            })
            .collect()
    }

    /// Coordinates of a subset of rows, in the order given.
    pub fn coords_of(&self, rows: &[usize]) -> Array2<f64> {
        self.coords.select(Axis(0), rows)
    }
}
