//! Engine configuration.

use spei_stats::Bandwidth;

use crate::error::SpeiError;

/// Default accumulation window, days.
pub const DEFAULT_WINDOW: usize = 365;

/// Default lower bound on the KDE bandwidth.
pub const DEFAULT_MIN_BANDWIDTH: f64 = 1e-6;

/// Configuration for [`compute_spei`](crate::compute_spei).
#[derive(Debug, Clone)]
pub struct SpeiConfig {
    /// Accumulation window `k` in days.
    window: usize,
    /// Bandwidth selection rule for the per-DOY KDE.
    bandwidth: Bandwidth,
    /// Floor applied to every selected bandwidth.
    min_bandwidth: f64,
    /// Fit the 365 strata on the rayon pool.
    parallel: bool,
}

impl SpeiConfig {
    /// Creates a configuration with a 365-day window, LSCV bandwidths and
    /// parallel stratum fits.
    pub fn new() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            bandwidth: Bandwidth::Lscv,
            min_bandwidth: DEFAULT_MIN_BANDWIDTH,
            parallel: true,
        }
    }

    /// Sets the accumulation window.
    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    /// Sets the bandwidth selector.
    pub fn with_bandwidth(mut self, bandwidth: Bandwidth) -> Self {
        self.bandwidth = bandwidth;
        self
    }

    /// Sets the bandwidth floor.
    pub fn with_min_bandwidth(mut self, min_bandwidth: f64) -> Self {
        self.min_bandwidth = min_bandwidth;
        self
    }

    /// Enables or disables parallel stratum fits.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn bandwidth(&self) -> Bandwidth {
        self.bandwidth
    }

    pub fn min_bandwidth(&self) -> f64 {
        self.min_bandwidth
    }

    pub fn parallel(&self) -> bool {
        self.parallel
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), SpeiError> {
        if self.window == 0 {
            return Err(SpeiError::InvalidConfig {
                reason: "window must be at least 1 day".to_string(),
            });
        }
        if !self.min_bandwidth.is_finite() || self.min_bandwidth <= 0.0 {
            return Err(SpeiError::InvalidConfig {
                reason: format!(
                    "min_bandwidth must be finite and > 0, got {}",
                    self.min_bandwidth
                ),
            });
        }
        if let Bandwidth::Fixed(h) = self.bandwidth
            && (!h.is_finite() || h <= 0.0)
        {
            return Err(SpeiError::InvalidConfig {
                reason: format!("fixed bandwidth must be finite and > 0, got {h}"),
            });
        }
        Ok(())
    }
}

impl Default for SpeiConfig {
    fn default() -> Self {
        Self::new()
    }
}
