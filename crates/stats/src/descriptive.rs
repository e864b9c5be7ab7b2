//! Spread measures used by the bandwidth selectors.

/// Arithmetic mean, NaN for an empty slice.
pub(crate) fn mean(data: &[f64]) -> f64 {
    data.iter().sum::<f64>() / data.len() as f64
}

/// Sample standard deviation (N-1 denominator). Zero below two points.
pub(crate) fn sd(data: &[f64]) -> f64 {
    if data.len() < 2 {
        return 0.0;
    }
    let m = mean(data);
    let ss: f64 = data.iter().map(|&x| (x - m).powi(2)).sum();
    (ss / (data.len() - 1) as f64).sqrt()
}

/// Linear-interpolation quantile of sorted data (R `type = 7`).
///
/// `None` for an empty slice.
pub(crate) fn quantile_type7(sorted: &[f64], p: f64) -> Option<f64> {
    let last = sorted.len().checked_sub(1)?;
    let h = last as f64 * p.clamp(0.0, 1.0);
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(last);
    Some(sorted[lo] + (h - lo as f64) * (sorted[hi] - sorted[lo]))
}

/// Interquartile range of sorted data, zero when empty.
pub(crate) fn iqr(sorted: &[f64]) -> f64 {
    match (quantile_type7(sorted, 0.75), quantile_type7(sorted, 0.25)) {
        (Some(q3), Some(q1)) => q3 - q1,
        _ => 0.0,
    }
}
