use anyhow::{Context, Result};
use tracing::{info, info_span};

use spei_io::CsvTable;
use spei_site::{AttachConfig, SiteLayout, attach_spei};

use crate::cli::AttachArgs;
use crate::config::SpeiToml;

/// Attach `SPEI_{k}` to an acquisition table.
pub fn run(args: AttachArgs) -> Result<()> {
    let _span = info_span!("attach").entered();

    let mut config = SpeiToml::load(args.common.config.as_deref())?;
    if let Some(root) = args.common.root {
        config.io.root = root;
    }
    let window = args.window.unwrap_or(config.spei.window);
    let attach_cfg = AttachConfig::new(window).with_drop_missing(args.drop_missing);

    info!(path = %args.input.display(), "reading acquisitions");
    let mut table = CsvTable::read(&args.input)
        .with_context(|| format!("failed to read acquisitions: {}", args.input.display()))?;

    let layout = SiteLayout::new(&config.io.root);
    let summary = attach_spei(&mut table, &layout, &attach_cfg)
        .with_context(|| format!("failed to attach {}", attach_cfg.column()))?;

    let output = args.output.unwrap_or(args.input);
    table
        .write_to(&output)
        .with_context(|| format!("failed to write {}", output.display()))?;

    println!(
        "{}: {} rows, {} missing, {} dropped -> {}",
        attach_cfg.column(),
        summary.n_rows,
        summary.n_missing,
        summary.n_dropped,
        output.display()
    );
    Ok(())
}
