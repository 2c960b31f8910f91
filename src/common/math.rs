//! Trailing-window arithmetic over plain `f64` slices.
//!
//! Every helper looks at the *last* `period` values of the slice and returns
//! `None` when the slice is too short, so callers can surface insufficient
//! data explicitly instead of comparing against NaN.

/// Arithmetic mean of a slice. `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// The trailing window of `period` values, if available.
pub fn trailing(values: &[f64], period: usize) -> Option<&[f64]> {
    if period == 0 || values.len() < period {
        return None;
    }
    Some(&values[values.len() - period..])
}

/// Simple moving average of the last `period` values.
pub fn sma(values: &[f64], period: usize) -> Option<f64> {
    mean(trailing(values, period)?)
}

/// Mean absolute deviation of the last `period` values from their own mean.
pub fn mean_absolute_deviation(values: &[f64], period: usize) -> Option<f64> {
    let window = trailing(values, period)?;
    let centre = mean(window)?;
    mean(&window.iter().map(|v| (v - centre).abs()).collect::<Vec<_>>())
}

/// Largest value of the last `period` values.
pub fn trailing_max(values: &[f64], period: usize) -> Option<f64> {
    trailing(values, period)?
        .iter()
        .copied()
        .fold(None, |acc: Option<f64>, v| match acc {
            Some(m) if m >= v => Some(m),
            _ => Some(v),
        })
}

/// Round to two decimals for display.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
