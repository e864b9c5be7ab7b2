//! Per-run orchestration settings.

use chrono::NaiveDate;
use spei_core::SpeiConfig;
use spei_io::default_epoch;

use crate::error::SiteError;

/// Settings shared by every site of a run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Engine settings, window included.
    engine: SpeiConfig,
    /// Reference date of the `time` column.
    epoch: NaiveDate,
    /// Recompute even when the output column already exists.
    overwrite: bool,
    /// Write the augmented table; otherwise return it in memory.
    persist: bool,
    /// Process sites concurrently.
    parallel_sites: bool,
}

impl RunConfig {
    /// Defaults: default engine, 1950-01-01 epoch, no overwrite, persist,
    /// sites in parallel.
    pub fn new() -> Self {
        Self {
            engine: SpeiConfig::new(),
            epoch: default_epoch(),
            overwrite: false,
            persist: true,
            parallel_sites: true,
        }
    }

    pub fn with_engine(mut self, engine: SpeiConfig) -> Self {
        self.engine = engine;
        self
    }

    pub fn with_epoch(mut self, epoch: NaiveDate) -> Self {
        self.epoch = epoch;
        self
    }

    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn with_persist(mut self, persist: bool) -> Self {
        self.persist = persist;
        self
    }

    pub fn with_parallel_sites(mut self, parallel: bool) -> Self {
        self.parallel_sites = parallel;
        self
    }

    pub fn engine(&self) -> &SpeiConfig {
        &self.engine
    }

    pub fn window(&self) -> usize {
        self.engine.window()
    }

    pub fn epoch(&self) -> NaiveDate {
        self.epoch
    }

    pub fn overwrite(&self) -> bool {
        self.overwrite
    }

    pub fn persist(&self) -> bool {
        self.persist
    }

    pub fn parallel_sites(&self) -> bool {
        self.parallel_sites
    }

    /// Validates the engine settings.
    pub fn validate(&self) -> Result<(), SiteError> {
        self.engine.validate()?;
        Ok(())
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self::new()
    }
}
