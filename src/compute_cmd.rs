use anyhow::{Result, bail};
use tracing::{info, info_span};

use spei_site::{SiteLayout, count_failures, run_sites};

use crate::cli::ComputeArgs;
use crate::config::SpeiToml;
use crate::convert;

/// Compute the SPEI of every requested site and print one line per site.
pub fn run(args: ComputeArgs) -> Result<()> {
    let _span = info_span!("compute").entered();

    let mut config = SpeiToml::load(args.common.config.as_deref())?;
    if let Some(root) = args.common.root {
        config.io.root = root;
    }
    config.spei.overwrite |= args.overwrite;
    config.spei.persist &= !args.no_persist;

    let run_cfg = convert::build_run_config(&config, args.window)?;
    let sites: Vec<String> = if args.sites.is_empty() {
        config.sites.iter().map(|s| s.name.clone()).collect()
    } else {
        args.sites
    };
    if sites.is_empty() {
        bail!("no sites: list [[sites]] in config or pass --site");
    }

    let layout = SiteLayout::new(&config.io.root);
    info!(
        root = %layout.root().display(),
        n_sites = sites.len(),
        window = run_cfg.window(),
        "computing SPEI"
    );

    let reports = run_sites(&layout, &sites, &run_cfg);
    for report in &reports {
        println!("{report}");
    }

    let n_failed = count_failures(&reports);
    if n_failed > 0 {
        bail!("{n_failed} of {} sites failed", reports.len());
    }
    Ok(())
}
