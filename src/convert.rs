//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;

use crate::config::*;

use spei_core::{Bandwidth, SpeiConfig};
use spei_site::RunConfig;

/// Parses an ISO `YYYY-MM-DD` epoch.
pub fn parse_epoch(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("invalid epoch {s:?}, expected YYYY-MM-DD"))
}

/// Parses a bandwidth selector: `lscv`, `normal`, or a positive number.
pub fn parse_bandwidth(s: &str) -> Result<Bandwidth> {
    match s.trim().to_lowercase().as_str() {
        "lscv" => Ok(Bandwidth::Lscv),
        "normal" | "normal-scale" | "nrd" => Ok(Bandwidth::NormalScale),
        other => match other.parse::<f64>() {
            Ok(h) if h.is_finite() && h > 0.0 => Ok(Bandwidth::Fixed(h)),
            _ => bail!("unknown bandwidth selector: {other:?}"),
        },
    }
}

/// Builds a [`SpeiConfig`] from the TOML engine section.
///
/// `window` overrides the configured window when given.
pub fn build_engine_config(spei: &EngineToml, window: Option<usize>) -> Result<SpeiConfig> {
    let cfg = SpeiConfig::new()
        .with_window(window.unwrap_or(spei.window))
        .with_bandwidth(parse_bandwidth(&spei.bandwidth)?)
        .with_min_bandwidth(spei.min_bandwidth)
        .with_parallel(spei.parallel);
    cfg.validate()?;
    Ok(cfg)
}

/// Builds a [`RunConfig`] from the whole TOML document.
pub fn build_run_config(config: &SpeiToml, window: Option<usize>) -> Result<RunConfig> {
    let engine = build_engine_config(&config.spei, window)?;
    let cfg = RunConfig::new()
        .with_engine(engine)
        .with_epoch(parse_epoch(&config.io.epoch)?)
        .with_overwrite(config.spei.overwrite)
        .with_persist(config.spei.persist)
        .with_parallel_sites(config.spei.parallel);
    cfg.validate()?;
    Ok(cfg)
}
