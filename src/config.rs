use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level SPEI configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpeiToml {
    /// I/O settings.
    #[serde(default)]
    pub io: IoToml,

    /// Engine and run settings.
    #[serde(default)]
    pub spei: EngineToml,

    /// Sites to process.
    #[serde(default)]
    pub sites: Vec<SiteToml>,
}

impl SpeiToml {
    /// Reads `path`, or returns the defaults when no file is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let toml_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        toml::from_str(&toml_str)
            .with_context(|| format!("failed to parse TOML config: {}", path.display()))
    }

    /// Latitude of `site`, if the site is listed.
    pub fn latitude(&self, site: &str) -> Option<f64> {
        self.sites
            .iter()
            .find(|s| s.name == site)
            .and_then(|s| s.latitude)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IoToml {
    #[serde(default = "default_root")]
    pub root: PathBuf,
    #[serde(default = "default_epoch")]
    pub epoch: String,
}

impl Default for IoToml {
    fn default() -> Self {
        Self {
            root: default_root(),
            epoch: default_epoch(),
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}
fn default_epoch() -> String {
    "1950-01-01".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineToml {
    #[serde(default = "default_window")]
    pub window: usize,
    #[serde(default)]
    pub overwrite: bool,
    #[serde(default = "default_true")]
    pub persist: bool,
    #[serde(default = "default_true")]
    pub parallel: bool,
    #[serde(default = "default_bandwidth")]
    pub bandwidth: String,
    #[serde(default = "default_min_bandwidth")]
    pub min_bandwidth: f64,
}

impl Default for EngineToml {
    fn default() -> Self {
        Self {
            window: default_window(),
            overwrite: false,
            persist: true,
            parallel: true,
            bandwidth: default_bandwidth(),
            min_bandwidth: default_min_bandwidth(),
        }
    }
}

fn default_window() -> usize {
    365
}
fn default_true() -> bool {
    true
}
fn default_bandwidth() -> String {
    "lscv".to_string()
}
fn default_min_bandwidth() -> f64 {
    1e-6
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteToml {
    pub name: String,
    #[serde(default)]
    pub latitude: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let c: SpeiToml = toml::from_str("").unwrap();
        assert_eq!(c.io.root, PathBuf::from("."));
        assert_eq!(c.io.epoch, "1950-01-01");
        assert_eq!(c.spei.window, 365);
        assert!(c.spei.persist);
        assert!(!c.spei.overwrite);
        assert_eq!(c.spei.bandwidth, "lscv");
        assert!(c.sites.is_empty());
    }

    #[test]
    fn full_document() {
        let c: SpeiToml = toml::from_str(
            r#"
            [io]
            root = "/data/sites"

            [spei]
            window = 30
            overwrite = true
            bandwidth = "normal"

            [[sites]]
            name = "DE-Hai"
            latitude = 51.08

            [[sites]]
            name = "FR-Pue"
            "#,
        )
        .unwrap();
        assert_eq!(c.io.root, PathBuf::from("/data/sites"));
        assert_eq!(c.spei.window, 30);
        assert!(c.spei.overwrite);
        assert_eq!(c.sites.len(), 2);
        assert_eq!(c.latitude("DE-Hai"), Some(51.08));
        assert_eq!(c.latitude("FR-Pue"), None);
        assert_eq!(c.latitude("US-Ton"), None);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(toml::from_str::<SpeiToml>("[spei]\nwindw = 30").is_err());
    }

    #[test]
    fn load_without_path_is_default() {
        let c = SpeiToml::load(None).unwrap();
        assert_eq!(c.spei.window, 365);
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = SpeiToml::load(Some(&dir.path().join("absent.toml"))).unwrap_err();
        assert!(format!("{err:#}").contains("failed to read config"));
    }
}
