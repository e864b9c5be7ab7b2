//! Univariate Gaussian kernel density estimate.
//!
//! The bandwidth is picked by least-squares (unbiased) cross-validation,
//! searched on a fixed log grid around Silverman's normal-scale rule and then
//! refined by golden-section search. The search is deterministic for a given
//! input vector. A caller-supplied floor keeps the estimate defined for
//! degenerate (zero-spread) samples.

use std::f64::consts::{PI, SQRT_2};

use argmin::core::{CostFunction, Executor};
use argmin::solver::goldensectionsearch::GoldenSectionSearch;
use statrs::function::erf::erfc;

use crate::descriptive::{iqr, sd};

/// Grid search range around the normal-scale reference bandwidth.
const LSCV_LOWER: f64 = 0.05;
const LSCV_UPPER: f64 = 3.0;
const LSCV_GRID_POINTS: usize = 64;
const GOLDEN_ITERATIONS: u64 = 60;
const GOLDEN_TOLERANCE: f64 = 1e-8;

/// Smallest sample for which cross-validation is attempted.
const LSCV_MIN_POINTS: usize = 3;

/// Bandwidth selection rule.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Bandwidth {
    /// Least-squares cross-validation.
    #[default]
    Lscv,
    /// Silverman's rule of thumb, `0.9 · min(sd, IQR/1.34) · n^(-1/5)`.
    NormalScale,
    /// A fixed bandwidth.
    Fixed(f64),
}

/// Gaussian KDE fitted to a finite sample.
#[derive(Debug, Clone)]
pub struct GaussianKde {
    points: Vec<f64>,
    bandwidth: f64,
}

impl GaussianKde {
    /// Fit a KDE to `points`.
    ///
    /// The selected bandwidth is raised to `min_bandwidth` when smaller.
    /// Returns `None` if `points` is empty, contains a non-finite value, or
    /// the resulting bandwidth is not strictly positive.
    pub fn fit(points: &[f64], selector: Bandwidth, min_bandwidth: f64) -> Option<Self> {
        if points.is_empty() || points.iter().any(|x| !x.is_finite()) {
            return None;
        }
        let selected = match selector {
            Bandwidth::Lscv => lscv_bandwidth(points),
            Bandwidth::NormalScale => normal_scale_bandwidth(points),
            Bandwidth::Fixed(h) => h,
        };
        let bandwidth = if selected.is_finite() {
            selected.max(min_bandwidth)
        } else {
            min_bandwidth
        };
        if !(bandwidth > 0.0 && bandwidth.is_finite()) {
            return None;
        }
        Some(Self {
            points: points.to_vec(),
            bandwidth,
        })
    }

    /// The bandwidth in use.
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Number of sample points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`; a fitted estimate holds at least one point.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Density at `x`.
    #[cfg(test)]
    fn pdf(&self, x: f64) -> f64 {
        let h = self.bandwidth;
        self.points
            .iter()
            .map(|&xi| std_normal_pdf((x - xi) / h))
            .sum::<f64>()
            / (self.points.len() as f64 * h)
    }

    /// Cumulative probability at `x`.
    pub fn cdf(&self, x: f64) -> f64 {
        let h = self.bandwidth;
        self.points
            .iter()
            .map(|&xi| std_normal_cdf((x - xi) / h))
            .sum::<f64>()
            / self.points.len() as f64
    }

    /// Cumulative probability at each sample point, in sample order.
    ///
    /// Every value lies in `[1/(2n), 1 - 1/(2n)]`, strictly inside (0, 1).
    pub fn cdf_at_points(&self) -> Vec<f64> {
        self.points.iter().map(|&x| self.cdf(x)).collect()
    }
}

/// Silverman's normal-scale bandwidth.
///
/// Uses the smaller of SD and IQR/1.34 as the spread, falling back to the
/// non-zero one. Returns 0.0 for fewer than two points or zero spread.
pub(crate) fn normal_scale_bandwidth(points: &[f64]) -> f64 {
    let n = points.len();
    if n < 2 {
        return 0.0;
    }
    let mut sorted = points.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let scaled_iqr = iqr(&sorted) / 1.34;
    let s = sd(points);
    let spread = match (s > 0.0, scaled_iqr > 0.0) {
        (true, true) => s.min(scaled_iqr),
        (true, false) => s,
        (false, true) => scaled_iqr,
        (false, false) => return 0.0,
    };
    0.9 * spread * (n as f64).powf(-0.2)
}

/// Least-squares cross-validation score of bandwidth `h`.
///
/// `LSCV(h) = ∫ f̂² − (2/n) Σ f̂₋ᵢ(xᵢ)`, evaluated in closed form for the
/// Gaussian kernel. Lower is better.
#[cfg(test)]
fn lscv_score(points: &[f64], h: f64) -> f64 {
    lscv_from_diffs(&pairwise_diffs(points), points.len(), h)
}

/// Bandwidth minimising the LSCV score; normal-scale for small samples.
fn lscv_bandwidth(points: &[f64]) -> f64 {
    let reference = normal_scale_bandwidth(points);
    if points.len() < LSCV_MIN_POINTS || reference <= 0.0 {
        return reference;
    }

    let cost = LscvCost {
        diffs: pairwise_diffs(points),
        n: points.len(),
    };

    let lo = (reference * LSCV_LOWER).ln();
    let hi = (reference * LSCV_UPPER).ln();
    let step = (hi - lo) / (LSCV_GRID_POINTS - 1) as f64;
    let grid: Vec<f64> = (0..LSCV_GRID_POINTS).map(|i| lo + step * i as f64).collect();

    let mut best = 0;
    let mut best_score = f64::INFINITY;
    for (i, &g) in grid.iter().enumerate() {
        let s = cost.score(g);
        if s < best_score {
            best = i;
            best_score = s;
        }
    }

    let a = grid[best.saturating_sub(1)];
    let b = grid[(best + 1).min(LSCV_GRID_POINTS - 1)];
    match refine(&cost, a, b, grid[best]) {
        Some(log_h) if cost.score(log_h) <= best_score => log_h.exp(),
        _ => grid[best].exp(),
    }
}

/// LSCV score as a function of `ln h`.
struct LscvCost {
    diffs: Vec<f64>,
    n: usize,
}

impl LscvCost {
    fn score(&self, log_h: f64) -> f64 {
        lscv_from_diffs(&self.diffs, self.n, log_h.exp())
    }
}

impl CostFunction for &LscvCost {
    type Param = f64;
    type Output = f64;

    fn cost(&self, log_h: &Self::Param) -> Result<Self::Output, argmin::core::Error> {
        let s = self.score(*log_h);
        Ok(if s.is_finite() { s } else { f64::MAX })
    }
}

/// Golden-section search for the minimum of `cost` on `[a, b]`.
fn refine(cost: &LscvCost, a: f64, b: f64, init: f64) -> Option<f64> {
    let solver = GoldenSectionSearch::new(a, b)
        .ok()?
        .with_tolerance(GOLDEN_TOLERANCE)
        .ok()?;
    let result = Executor::new(cost, solver)
        .configure(|state| state.param(init).max_iters(GOLDEN_ITERATIONS))
        .run()
        .ok()?;
    result.state().best_param.filter(|p| p.is_finite())
}

fn lscv_from_diffs(diffs: &[f64], n: usize, h: f64) -> f64 {
    let nf = n as f64;
    let mut convolved = 0.0;
    let mut leave_one_out = 0.0;
    for &d in diffs {
        let u = d / h;
        // N(0, 2) density is the Gaussian kernel convolved with itself.
        convolved += (-0.25 * u * u).exp() / (2.0 * PI.sqrt());
        leave_one_out += std_normal_pdf(u);
    }
    let self_term = 1.0 / (2.0 * PI.sqrt() * nf * h);
    self_term + 2.0 * convolved / (nf * nf * h) - 4.0 * leave_one_out / (nf * (nf - 1.0) * h)
}

/// Absolute differences over all unordered pairs.
fn pairwise_diffs(points: &[f64]) -> Vec<f64> {
    let n = points.len();
    let mut diffs = Vec::with_capacity(n * n.saturating_sub(1) / 2);
    for i in 0..n {
        for j in (i + 1)..n {
            diffs.push((points[i] - points[j]).abs());
        }
    }
    diffs
}

fn std_normal_pdf(z: f64) -> f64 {
    (-0.5 * z * z).exp() / (2.0 * PI).sqrt()
}

fn std_normal_cdf(z: f64) -> f64 {
    0.5 * erfc(-z / SQRT_2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rand_distr::{Distribution, Normal};

    fn normal_sample(n: usize, seed: u64) -> Vec<f64> {
        let mut rng = StdRng::seed_from_u64(seed);
        let dist = Normal::new(10.0, 2.0).unwrap();
        (0..n).map(|_| dist.sample(&mut rng)).collect()
    }

    #[test]
    fn fit_rejects_empty_and_non_finite() {
        assert!(GaussianKde::fit(&[], Bandwidth::Lscv, 1e-6).is_none());
        assert!(GaussianKde::fit(&[1.0, f64::NAN], Bandwidth::Lscv, 1e-6).is_none());
        assert!(GaussianKde::fit(&[1.0, f64::INFINITY], Bandwidth::Lscv, 1e-6).is_none());
    }

    #[test]
    fn constant_sample_uses_floor_and_median_probability() {
        let kde = GaussianKde::fit(&[5.0; 4], Bandwidth::Lscv, 1e-6).unwrap();
        assert_eq!(kde.bandwidth(), 1e-6);
        for p in kde.cdf_at_points() {
            assert_eq!(p, 0.5);
        }
    }

    #[test]
    fn single_point_is_its_own_median() {
        let kde = GaussianKde::fit(&[-3.2], Bandwidth::Lscv, 1e-3).unwrap();
        assert_eq!(kde.cdf_at_points(), vec![0.5]);
    }

    #[test]
    fn zero_floor_with_degenerate_sample_fails() {
        assert!(GaussianKde::fit(&[2.0, 2.0], Bandwidth::Lscv, 0.0).is_none());
    }

    #[test]
    fn fixed_bandwidth_respected() {
        let kde = GaussianKde::fit(&[0.0, 1.0], Bandwidth::Fixed(0.7), 1e-6).unwrap();
        assert_eq!(kde.bandwidth(), 0.7);
        let floored = GaussianKde::fit(&[0.0, 1.0], Bandwidth::Fixed(1e-9), 1e-3).unwrap();
        assert_eq!(floored.bandwidth(), 1e-3);
    }

    #[test]
    fn normal_scale_matches_silverman() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
        // sd = 3.02765, IQR/1.34 = 4.5/1.34 = 3.35821 -> spread = sd
        let expected = 0.9 * 3.0276503540974917 * 10f64.powf(-0.2);
        assert_relative_eq!(normal_scale_bandwidth(&data), expected, epsilon = 1e-12);
        assert_eq!(normal_scale_bandwidth(&[1.0]), 0.0);
        assert_eq!(normal_scale_bandwidth(&[2.0, 2.0, 2.0]), 0.0);
    }

    #[test]
    fn cdf_symmetric_sample_median() {
        let kde = GaussianKde::fit(&[-2.0, -1.0, 0.0, 1.0, 2.0], Bandwidth::NormalScale, 1e-6)
            .unwrap();
        assert_abs_diff_eq!(kde.cdf(0.0), 0.5, epsilon = 1e-12);
        let probs = kde.cdf_at_points();
        assert_abs_diff_eq!(probs[0] + probs[4], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(probs[1] + probs[3], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn cdf_is_monotone_and_bounded() {
        let data = normal_sample(50, 7);
        let kde = GaussianKde::fit(&data, Bandwidth::Lscv, 1e-6).unwrap();
        let mut prev = 0.0;
        for i in 0..200 {
            let x = i as f64 * 0.1;
            let p = kde.cdf(x);
            assert!(p >= prev && p <= 1.0);
            prev = p;
        }
        assert!(kde.cdf(-100.0) < 1e-12);
        assert!(kde.cdf(100.0) > 1.0 - 1e-12);
    }

    #[test]
    fn cdf_at_points_strictly_inside_unit_interval() {
        let data = normal_sample(30, 11);
        let kde = GaussianKde::fit(&data, Bandwidth::Lscv, 1e-6).unwrap();
        let probs = kde.cdf_at_points();
        assert_eq!(probs.len(), data.len());
        let n = data.len() as f64;
        for p in probs {
            assert!(p >= 0.5 / n - 1e-12 && p <= 1.0 - 0.5 / n + 1e-12);
        }
    }

    #[test]
    fn pdf_integrates_to_one() {
        let data = normal_sample(40, 3);
        let kde = GaussianKde::fit(&data, Bandwidth::Lscv, 1e-6).unwrap();
        let (lo, hi, steps) = (-10.0, 30.0, 8000);
        let dx = (hi - lo) / steps as f64;
        let integral: f64 = (0..steps)
            .map(|i| kde.pdf(lo + (i as f64 + 0.5) * dx) * dx)
            .sum();
        assert_abs_diff_eq!(integral, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn lscv_bandwidth_near_reference_for_gaussian_data() {
        let data = normal_sample(200, 42);
        let reference = normal_scale_bandwidth(&data);
        let kde = GaussianKde::fit(&data, Bandwidth::Lscv, 1e-6).unwrap();
        let h = kde.bandwidth();
        assert!(
            h > reference * LSCV_LOWER && h < reference * LSCV_UPPER,
            "h = {h}, reference = {reference}"
        );
    }

    #[test]
    fn lscv_bandwidth_beats_grid_endpoints() {
        let data = normal_sample(60, 5);
        let reference = normal_scale_bandwidth(&data);
        let h = GaussianKde::fit(&data, Bandwidth::Lscv, 1e-9)
            .unwrap()
            .bandwidth();
        let chosen = lscv_score(&data, h);
        assert!(chosen <= lscv_score(&data, reference * LSCV_LOWER));
        assert!(chosen <= lscv_score(&data, reference * LSCV_UPPER));
    }

    #[test]
    fn lscv_is_deterministic() {
        let data = normal_sample(25, 99);
        let a = GaussianKde::fit(&data, Bandwidth::Lscv, 1e-6).unwrap();
        let b = GaussianKde::fit(&data, Bandwidth::Lscv, 1e-6).unwrap();
        assert_eq!(a.bandwidth(), b.bandwidth());
        assert_eq!(a.cdf_at_points(), b.cdf_at_points());
    }

    #[test]
    fn small_samples_fall_back_to_normal_scale() {
        let data = [1.0, 3.0];
        let kde = GaussianKde::fit(&data, Bandwidth::Lscv, 1e-6).unwrap();
        assert_relative_eq!(kde.bandwidth(), normal_scale_bandwidth(&data));
    }
}
