//! On-disk layout of per-site artifacts.

use std::path::{Path, PathBuf};

/// Resolves `{root}/{site}/...` paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteLayout {
    root: PathBuf,
}

impl SiteLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn site_dir(&self, site: &str) -> PathBuf {
        self.root.join(site)
    }

    /// Forcing input and SPEI output, `{site}/eobs_spei_{site}.csv`.
    pub fn spei_path(&self, site: &str) -> PathBuf {
        self.site_dir(site).join(format!("eobs_spei_{site}.csv"))
    }

    /// Station climate, `{site}/eobs_climate_{site}.csv`.
    pub fn climate_path(&self, site: &str) -> PathBuf {
        self.site_dir(site).join(format!("eobs_climate_{site}.csv"))
    }
}
