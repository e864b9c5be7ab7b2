//! Right-aligned trailing mean.

/// Trailing mean over the last `window` values ending at each index.
///
/// Non-finite inputs are skipped, so each output is the mean of the finite
/// values inside its window. The first `window - 1` outputs are `NaN`
/// (not enough history), as is any window without a finite value.
///
/// # Panics
///
/// Panics if `window` is zero.
pub fn trailing_mean(values: &[f64], window: usize) -> Vec<f64> {
    assert!(window > 0, "trailing_mean: window must be positive");

    let mut out = vec![f64::NAN; values.len()];
    let mut sum = 0.0;
    let mut count = 0usize;

    for (i, &v) in values.iter().enumerate() {
        if v.is_finite() {
            sum += v;
            count += 1;
        }
        if i >= window {
            let old = values[i - window];
            if old.is_finite() {
                sum -= old;
                count -= 1;
            }
        }
        if i + 1 >= window && count > 0 {
            out[i] = sum / count as f64;
        }
        // Reset drift once the window holds no finite values.
        if count == 0 {
            sum = 0.0;
        }
    }
    out
}
