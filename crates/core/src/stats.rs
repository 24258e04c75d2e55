//! Shared numeric helpers for the aggregate views.

/// Mean and *sample* variance (n-1 divisor) of a slice of scores.
///
/// Returns `None` for an empty slice. With a single score the variance is
/// defined as 0.0 rather than dividing by zero.
pub fn mean_and_sample_variance(scores: &[f64]) -> Option<(f64, f64)> {
    if scores.is_empty() {
        return None;
    }
    let n = scores.len() as f64;
    let mean = scores.iter().sum::<f64>() / n;
    let variance = if scores.len() > 1 {
        scores.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / (n - 1.0)
    } else {
        0.0
    };
    Some((mean, variance))
}
