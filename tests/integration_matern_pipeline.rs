//! Integration tests for Matérn estimation, interpolation and spectra.
//!
//! Purpose
//! -------
//! - Validate the end-to-end pipeline on simulated fields with known
//!   parameters: simulation → observation table → grid-search and fast
//!   maximum-likelihood fits → kriging and the spectral driver.
//! - Exercise realistic regimes (replicated time slices, jittered designs,
//!   oversized inputs) rather than toy edge cases only.
//!
//! Coverage
//! --------
//! - `interpolation::rbf`: exactness at the unit-square corners.
//! - `estimation::spatial`: range recovery from one or many realizations,
//!   boundary warnings per smoothness row.
//! - `estimation::fast`: agreement with the grid search.
//! - `interpolation::kriging`: exactness at data sites under fitted
//!   parameters.
//! - `spectral`: dithering of oversized inputs and the warning it emits.
//!
//! Exclusions
//! ----------
//! - Closed forms of the kernel, linear algebra helpers and optimizer;
//!   those are covered by unit tests.
//! - Python bindings.
use approx::assert_abs_diff_eq;
use ndarray::{Array1, Array2, Axis, array};
use rand::{Rng, SeedableRng, rngs::StdRng};
use rust_spatial::{
    data::Observations,
    estimation::{
        FastMleOptions, FitWarning, GridAxis, MaternGrid, fit_matern_fast, fit_matern_lengthscale,
        linear_axis,
    },
    interpolation::{fit_rbf, krige},
    kernel::{MaternParams, simulate_matern_field},
    spectral::{LagGrid, SpectrumOptions, analyze_spectrum},
};

const TRUE_RANGE: f64 = 1700.0;
const TRUE_SMOOTHNESS: f64 = 2.0;
const SPACING: f64 = 2000.0;
const N_SLICES: usize = 30;

/// Purpose
/// -------
/// Simulate `slices` independent Matérn realizations (θ = 1700, ν = 2,
/// σ² = 1, no nugget) on a 10×10 grid with spacing 2000, each node
/// jittered uniformly by up to ±200 in both coordinates.
///
/// Returns
/// -------
/// - `(locations, values)`: `100×2` and `100×slices`.
fn simulated_replicates(seed: u64, slices: usize) -> (Array2<f64>, Array2<f64>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let locations = Array2::from_shape_fn((100, 2), |(k, j)| {
        let node = (if j == 0 { k % 10 } else { k / 10 }) as f64;
        node * SPACING + rng.random_range(-200.0..200.0)
    });
    let params = MaternParams::new(TRUE_RANGE, TRUE_SMOOTHNESS, 1.0, 0.0).unwrap();
    let values = simulate_matern_field(locations.view(), &params, slices, &mut rng).unwrap();
    (locations, values)
}

/// Stack replicate columns into a spatio-temporal table with one time
/// index per column.
fn as_observations(locations: &Array2<f64>, values: &Array2<f64>) -> Observations {
    let (n, m) = values.dim();
    let coords = ndarray::concatenate(Axis(0), &vec![locations.view(); m]).unwrap();
    let times: Vec<i64> = (0..m).flat_map(|t| std::iter::repeat_n(t as i64, n)).collect();
    let z: Array1<f64> = values.t().iter().cloned().collect();
    Observations::new(coords, Some(times), vec![("z".to_string(), z)]).unwrap()
}

fn spatial_grid(range: Vec<f64>) -> MaternGrid {
    MaternGrid::new(range, vec![TRUE_SMOOTHNESS], linear_axis(0.25, 2.5, 0.25), None).unwrap()
}

fn has_boundary(warnings: &[FitWarning], axis: GridAxis) -> bool {
    warnings.iter().any(|w| matches!(w, FitWarning::BoundaryReached { axis: a, .. } if *a == axis))
}

fn has_boundary_at(warnings: &[FitWarning], axis: GridAxis, nu: f64) -> bool {
    warnings.iter().any(|w| {
        matches!(
            w,
            FitWarning::BoundaryReached { axis: a, smoothness: Some(s), .. }
                if *a == axis && *s == nu
        )
    })
}

#[test]
// Purpose
// -------
// Gaussian RBF interpolation reproduces the data at the unit-square
// corners.
//
// Given
// -----
// - Corners (0,0), (1,0), (0,1), (1,1) with values 1, 2, 3, 4.
// - Kernel variance 1.
//
// Expect
// ------
// - Each corner prediction within 1e-6 of its value.
fn rbf_reproduces_unit_square_corners() {
    let obs = Observations::new(
        array![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]],
        None,
        vec![("z".to_string(), array![1.0, 2.0, 3.0, 4.0])],
    )
    .unwrap();

    let pred = fit_rbf(&obs, &obs, "z", 1.0).unwrap();

    for (p, z) in pred.iter().zip([1.0, 2.0, 3.0, 4.0]) {
        assert_abs_diff_eq!(*p, z, epsilon = 1e-6);
    }
}

#[test]
// Purpose
// -------
// Grid search recovers the simulated range.
//
// Given
// -----
// - 30 replicate slices of 100 jittered sites (see `simulated_replicates`).
// - Range grid 500, 900, …, 3300; variance grid 0.25, 0.5, …, 2.5; ν = 2.
//
// Expect
// ------
// - θ̂ within one increment (400) of 1700.
// - No boundary warning on range or variance.
// - Every grid point factorizes.
fn grid_search_recovers_simulated_range() {
    let (locations, values) = simulated_replicates(17, N_SLICES);
    let obs = as_observations(&locations, &values);
    let grid = spatial_grid(linear_axis(500.0, 3300.0, 400.0));

    let fit = fit_matern_lengthscale(&obs, "z", &grid).unwrap();

    assert_eq!(fit.n_slices, N_SLICES);
    assert_eq!(fit.skipped_grid_points, 0);
    assert!((fit.best.range - TRUE_RANGE).abs() <= 400.0 + 1e-9, "range = {}", fit.best.range);
    assert!(!has_boundary(&fit.warnings, GridAxis::Range), "{:?}", fit.warnings);
    assert!(!has_boundary(&fit.warnings, GridAxis::Variance), "{:?}", fit.warnings);
}

#[test]
// Purpose
// -------
// Grid search recovers the range from a single realization.
//
// Given
// -----
// - One slice of 100 jittered sites, θ = 1700, ν = 2.
// - Range grid 500, 900, …, 3300; variance grid 0.25, 0.5, …, 2.5; ν = 2.
//
// Expect
// ------
// - θ̂ within one increment (400) of 1700.
// - No warnings at all.
fn grid_search_recovers_range_from_single_realization() {
    let (locations, values) = simulated_replicates(41, 1);
    let obs = as_observations(&locations, &values);
    let grid = spatial_grid(linear_axis(500.0, 3300.0, 400.0));

    let fit = fit_matern_lengthscale(&obs, "z", &grid).unwrap();

    assert_eq!(fit.n_slices, 1);
    assert!((fit.best.range - TRUE_RANGE).abs() <= 400.0 + 1e-9, "range = {}", fit.best.range);
    assert!(fit.warnings.is_empty(), "{:?}", fit.warnings);
}

#[test]
// Purpose
// -------
// Boundary warnings are raised per smoothness row, not only for the
// overall best row.
//
// Given
// -----
// - The 30-slice replicate dataset (true ν = 2).
// - Smoothness grid {0.5, 2}; range grid 500, 900, …, 3300.
//
// Expect
// ------
// - The best row is ν = 2 and carries no range warning.
// - The misspecified ν = 0.5 row compensates with the longest range and is
//   flagged, tagged with its smoothness.
// - For every row, a range warning exists iff its argmax is an axis end.
fn boundary_warnings_are_reported_per_smoothness() {
    let (locations, values) = simulated_replicates(17, N_SLICES);
    let obs = as_observations(&locations, &values);
    let range = linear_axis(500.0, 3300.0, 400.0);
    let variance = linear_axis(0.25, 2.5, 0.25);
    let grid =
        MaternGrid::new(range.clone(), vec![0.5, TRUE_SMOOTHNESS], variance, None).unwrap();

    let fit = fit_matern_lengthscale(&obs, "z", &grid).unwrap();

    assert_eq!(fit.best.smoothness, TRUE_SMOOTHNESS);
    assert!(
        !has_boundary_at(&fit.warnings, GridAxis::Range, TRUE_SMOOTHNESS),
        "{:?}",
        fit.warnings
    );
    let rough = fit.rows.iter().find(|r| r.smoothness == 0.5).unwrap();
    assert_eq!(rough.range_index, range.len() - 1);
    assert!(has_boundary_at(&fit.warnings, GridAxis::Range, 0.5), "{:?}", fit.warnings);
    for row in &fit.rows {
        let on_edge = row.range_index == 0 || row.range_index == range.len() - 1;
        assert_eq!(has_boundary_at(&fit.warnings, GridAxis::Range, row.smoothness), on_edge);
    }
}

#[test]
// Purpose
// -------
// A range axis that stops short of the truth yields a boundary warning on
// its last value, and only on the axis whose argmax is an edge.
fn truncated_range_axis_raises_boundary_warning() {
    let (locations, values) = simulated_replicates(17, N_SLICES);
    let obs = as_observations(&locations, &values);
    let grid = spatial_grid(vec![300.0, 500.0, 700.0]);

    let fit = fit_matern_lengthscale(&obs, "z", &grid).unwrap();

    assert_eq!(fit.best.range, 700.0);
    assert!(has_boundary(&fit.warnings, GridAxis::Range));
    let w = fit
        .warnings
        .iter()
        .find(|w| matches!(w, FitWarning::BoundaryReached { axis: GridAxis::Range, .. }))
        .unwrap();
    assert_eq!(
        *w,
        FitWarning::BoundaryReached {
            axis: GridAxis::Range,
            value: 700.0,
            index: 2,
            len: 3,
            smoothness: Some(TRUE_SMOOTHNESS),
        }
    );
}

#[test]
// Purpose
// -------
// The fast estimator and the grid search agree on the same data.
//
// Given
// -----
// - The replicate dataset; fast fit with the grid's range axis as
//   candidates and continuous refinement.
//
// Expect
// ------
// - Ranges within one grid increment (400) of each other.
// - Fast sill within 20% of the grid variance.
fn fast_and_grid_estimates_agree() {
    let (locations, values) = simulated_replicates(29, N_SLICES);
    let obs = as_observations(&locations, &values);
    let axis = linear_axis(500.0, 3300.0, 400.0);
    let grid_fit = fit_matern_lengthscale(&obs, "z", &spatial_grid(axis.clone())).unwrap();

    let opts = FastMleOptions { range_candidates: Some(axis), ..FastMleOptions::default() };
    let fast = fit_matern_fast(locations.view(), values.view(), TRUE_SMOOTHNESS, &opts).unwrap();

    assert!(
        (fast.range - grid_fit.best.range).abs() <= 400.0 + 1e-9,
        "fast = {}, grid = {}",
        fast.range,
        grid_fit.best.range
    );
    assert!(
        (fast.sill / grid_fit.best.variance - 1.0).abs() < 0.2,
        "fast sill = {}, grid variance = {}",
        fast.sill,
        grid_fit.best.variance
    );
}

#[test]
// Purpose
// -------
// Kriging with parameters from a fit reproduces the data at the sites
// when the nugget is zero.
fn kriging_is_exact_with_fitted_parameters() {
    let (locations, values) = simulated_replicates(5, N_SLICES);
    let obs = as_observations(&locations, &values);
    let grid = spatial_grid(linear_axis(500.0, 3300.0, 400.0));
    let fit = fit_matern_lengthscale(&obs, "z", &grid).unwrap();
    let params =
        MaternParams::new(fit.best.range, fit.best.smoothness, fit.best.variance, 0.0).unwrap();
    let first = values.slice(ndarray::s![.., ..3]);

    let out = krige(locations.view(), first, locations.view(), &params).unwrap();

    for (p, z) in out.values.iter().zip(first.iter()) {
        assert_abs_diff_eq!(*p, *z, epsilon = 1e-6);
    }
    assert!(out.variance.iter().all(|&v| v < 1e-6));
}

#[test]
// Purpose
// -------
// The spectral driver decimates 500 observations to 125 and reports it.
//
// Given
// -----
// - 500 random sites in a 20×20 square, one Matérn realization
//   (θ = 2, ν = 1, nugget 0.05).
//
// Expect
// ------
// - 2 halvings, 125 rows fitted, an `ExcessData` warning first in the list.
// - Practical range equals √(8ν)·θ̂ and the covariance table peaks at the
//   lag-grid centre.
fn spectral_driver_dithers_oversized_input() {
    let mut rng = StdRng::seed_from_u64(99);
    let locations = Array2::from_shape_fn((500, 2), |_| rng.random_range(0.0..20.0));
    let params = MaternParams::new(2.0, 1.0, 1.0, 0.05).unwrap();
    let values = simulate_matern_field(locations.view(), &params, 1, &mut rng).unwrap();
    let grid = LagGrid::new(10.0, 21).unwrap();

    let out =
        analyze_spectrum(locations.view(), values.view(), 1.0, &grid, &SpectrumOptions::default())
            .unwrap();

    assert_eq!(out.n_used, 125);
    assert_eq!(
        out.warnings.first(),
        Some(&FitWarning::ExcessData { original: 500, retained: 125, halvings: 2 })
    );
    assert!((out.practical_range - 8f64.sqrt() * out.fit.range).abs() < 1e-9);
    let peak = out.covariance.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    assert_eq!(out.covariance[[10, 10]], peak);
    assert!(out.prediction.is_none());
}
