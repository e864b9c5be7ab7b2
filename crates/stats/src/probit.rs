//! Inverse standard-normal CDF via the Abramowitz & Stegun 26.2.23 rational
//! approximation (absolute error below 4.5e-4).

const C0: f64 = 2.515517;
const C1: f64 = 0.802853;
const C2: f64 = 0.010328;
const D1: f64 = 1.432788;
const D2: f64 = 0.189269;
const D3: f64 = 0.001308;

/// Standard-normal quantile of probability `p`.
///
/// `NaN` maps to `NaN`; `p <= 0` maps to `-inf` and `p >= 1` to `+inf`.
pub fn probit(p: f64) -> f64 {
    if p.is_nan() {
        return f64::NAN;
    }
    if p <= 0.0 {
        return f64::NEG_INFINITY;
    }
    if p >= 1.0 {
        return f64::INFINITY;
    }
    if p <= 0.5 {
        -tail(p)
    } else {
        tail(1.0 - p)
    }
}

/// Upper-tail deviate for a tail probability `q` in (0, 0.5].
fn tail(q: f64) -> f64 {
    let w = (1.0 / (q * q)).ln().sqrt();
    w - (C0 + C1 * w + C2 * w * w) / (1.0 + D1 * w + D2 * w * w + D3 * w * w * w)
}
