use anyhow::{Context, Result, bail};
use tracing::{info, info_span};

use spei_site::{SiteLayout, derive_forcing_sites};

use crate::cli::PetArgs;
use crate::config::SpeiToml;
use crate::convert;

/// Derive forcing tables for one site, or every configured site with a latitude.
pub fn run(args: PetArgs) -> Result<()> {
    let _span = info_span!("pet").entered();

    let mut config = SpeiToml::load(args.common.config.as_deref())?;
    if let Some(root) = args.common.root {
        config.io.root = root;
    }
    let epoch = convert::parse_epoch(&config.io.epoch)?;
    let overwrite = args.overwrite || config.spei.overwrite;

    let targets: Vec<(String, f64)> = match args.site {
        Some(site) => {
            let latitude = args
                .latitude
                .or_else(|| config.latitude(&site))
                .with_context(|| format!("no latitude for site {site}: pass --latitude"))?;
            vec![(site, latitude)]
        }
        None => config
            .sites
            .iter()
            .filter_map(|s| s.latitude.map(|lat| (s.name.clone(), lat)))
            .collect(),
    };
    if targets.is_empty() {
        bail!("no sites with a latitude: pass --site and --latitude");
    }

    let layout = SiteLayout::new(&config.io.root);
    info!(root = %layout.root().display(), n_sites = targets.len(), "deriving forcing");

    let reports = derive_forcing_sites(&layout, &targets, epoch, overwrite);
    for report in &reports {
        println!("{report}");
    }

    let n_failed = reports.iter().filter(|r| r.is_failure()).count();
    if n_failed > 0 {
        bail!("{n_failed} of {} sites failed", reports.len());
    }
    Ok(())
}
