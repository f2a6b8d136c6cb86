//! spectral::spectrum — 2-D DFT of a covariance tabulated on a lag grid.
//!
//! Purpose
//! -------
//! Approximate the spectral density of a stationary covariance by the
//! discrete Fourier transform of its values on a square lag grid, and
//! locate the frequency where the density has decayed to a fraction of its
//! peak.
//!
//! Conventions
//! -----------
//! - The input is indexed by lag offsets `−extent … extent`; the origin is
//!   shifted to index `[0, 0]` before transforming so the DFT phase refers
//!   to lag zero.
//! - Output stays in FFT order: index `k` on either axis has frequency
//!   `k/(NΔ)` for `k ≤ (N−1)/2` and `(k − N)/(NΔ)` above.
//! - Magnitudes are `|F|·Δ²`, the Riemann-sum approximation of the
//!   continuous transform.
use crate::estimation::errors::{EstimationError, EstimationResult};
use ndarray::{Array1, Array2, Axis};
use rustfft::{FftPlanner, num_complex::Complex};

/// Fraction of the zero-frequency-row peak that defines the cutoff.
pub const CUTOFF_FRACTION: f64 = 0.1;

/// Spectrum — DFT magnitude with its frequency axis and cutoff.
///
/// - `magnitude[[i, j]]` is the density at frequencies
///   `(frequencies[j], frequencies[i])`.
/// - `cutoff`: first non-negative frequency on the zero-frequency row where
///   the magnitude falls below [`CUTOFF_FRACTION`] of the row peak; `None`
///   if it never does inside the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    pub magnitude: Array2<f64>,
    pub frequencies: Array1<f64>,
    pub cutoff: Option<f64>,
}

/// Transform a square `N×N` lag-grid table with spacing `spacing`.
///
/// # Errors
/// - [`EstimationError::InvalidSpectrumTable`] for an empty or non-square
///   table, or a spacing that is not finite and positive.
pub fn covariance_spectrum(table: &Array2<f64>, spacing: f64) -> EstimationResult<Spectrum> {
    let (n, cols) = table.dim();
    if n == 0 || n != cols || !spacing.is_finite() || spacing <= 0.0 {
        return Err(EstimationError::InvalidSpectrumTable { rows: n, cols, spacing });
    }
    let shifted = origin_to_front(table);
    let mut data: Array2<Complex<f64>> = shifted.mapv(|v| Complex::new(v, 0.0));

    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(n);
    let mut buffer = vec![Complex::new(0.0, 0.0); n];
    for axis in [Axis(1), Axis(0)] {
        for mut lane in data.lanes_mut(axis) {
            buffer.iter_mut().zip(lane.iter()).for_each(|(b, v)| *b = *v);
            fft.process(&mut buffer);
            lane.iter_mut().zip(buffer.iter()).for_each(|(v, b)| *v = *b);
        }
    }

    let area = spacing * spacing;
    let magnitude = data.mapv(|c| c.norm() * area);
    let frequencies = fft_frequencies(n, spacing);
    let cutoff = find_cutoff(&magnitude, &frequencies);
    Ok(Spectrum { magnitude, frequencies, cutoff })
}

/// DFT sample frequencies in FFT order. Empty for `n = 0`.
pub fn fft_frequencies(n: usize, spacing: f64) -> Array1<f64> {
    let Some(half) = n.checked_sub(1).map(|m| m / 2) else {
        return Array1::zeros(0);
    };
    let scale = 1.0 / (n as f64 * spacing);
    Array1::from_iter((0..n).map(|k| {
        let k = if k <= half { k as f64 } else { k as f64 - n as f64 };
        k * scale
    }))
}

fn find_cutoff(magnitude: &Array2<f64>, frequencies: &Array1<f64>) -> Option<f64> {
    let row = magnitude.row(0);
    let peak = row.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if !(peak > 0.0) {
        return None;
    }
    frequencies
        .iter()
        .zip(row.iter())
        .filter(|(f, _)| **f >= 0.0)
        .find(|(_, m)| **m < CUTOFF_FRACTION * peak)
        .map(|(f, _)| *f)
}

/// Inverse FFT shift on both axes: the centre element moves to `[0, 0]`.
fn origin_to_front(table: &Array2<f64>) -> Array2<f64> {
    let (rows, cols) = table.dim();
    let (hr, hc) = (rows / 2, cols / 2);
    Array2::from_shape_fn((rows, cols), |(i, j)| table[[(i + hr) % rows, (j + hc) % cols]])
}
