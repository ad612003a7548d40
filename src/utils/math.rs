//! Shared numeric utilities for the smoothing scans.

use ndarray::{Array1, Axis};

/// Evaluate the parameterized sigmoid `1 / (1 + e^(-mu * x))`, rounded to
/// four decimal digits. Maps unbounded raw-duration differences into a
/// bounded (0, 1) strength score with `f(0) = 0.5` as the neutral point.
pub fn sigmoid(x: f64, mu: f64) -> f64 {
    round4(1.0 / (1.0 + (-mu * x).exp()))
}

/// Round to four decimal digits.
pub fn round4(x: f64) -> f64 {
    (x * 10_000.0).round() / 10_000.0
}

/// Running cumulative sum: `out[i] = values[0] + ... + values[i]`.
pub fn cumulative_sum(values: &Array1<f64>) -> Array1<f64> {
    let mut out = values.clone();
    out.accumulate_axis_inplace(Axis(0), |&prev, curr| *curr += prev);
    out
}

/// Reverse cumulative sum: `out[i] = values[i] + ... + values[n-1]`.
pub fn reverse_cumulative_sum(values: &Array1<f64>) -> Array1<f64> {
    let mut out = values.clone();
    out.invert_axis(Axis(0));
    out.accumulate_axis_inplace(Axis(0), |&prev, curr| *curr += prev);
    out.invert_axis(Axis(0));
    out
}
