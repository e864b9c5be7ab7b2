use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Non-parametric daily SPEI for a set of sites.
#[derive(Parser)]
#[command(
    name = "spei",
    version,
    about = "Day-of-year stratified, kernel-density SPEI for daily site series"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Compute the SPEI of every site.
    Compute(ComputeArgs),
    /// Derive site forcing (precipitation and Hargreaves PET) from station climate.
    Pet(PetArgs),
    /// Attach site SPEI values to a table of dated acquisitions.
    Attach(AttachArgs),
}

/// Options shared by every subcommand.
#[derive(clap::Args)]
pub struct CommonArgs {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the site root directory from config.
    #[arg(short, long)]
    pub root: Option<PathBuf>,
}

/// Arguments for the `compute` subcommand.
#[derive(clap::Args)]
pub struct ComputeArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Sites to process; overrides the `[[sites]]` list from config.
    #[arg(short, long = "site")]
    pub sites: Vec<String>,

    /// Override the accumulation window (days).
    #[arg(short, long)]
    pub window: Option<usize>,

    /// Recompute sites whose output already holds the index.
    #[arg(long)]
    pub overwrite: bool,

    /// Compute without writing the output tables.
    #[arg(long)]
    pub no_persist: bool,
}

/// Arguments for the `pet` subcommand.
#[derive(clap::Args)]
pub struct PetArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Site to process; requires `--latitude` unless listed in config.
    #[arg(short, long)]
    pub site: Option<String>,

    /// Site latitude in decimal degrees.
    #[arg(long, allow_negative_numbers = true)]
    pub latitude: Option<f64>,

    /// Replace existing forcing tables.
    #[arg(long)]
    pub overwrite: bool,
}

/// Arguments for the `attach` subcommand.
#[derive(clap::Args)]
pub struct AttachArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// CSV of acquisitions with `name` and `date` columns.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output CSV path (defaults to overwriting the input).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override the accumulation window (days).
    #[arg(short, long)]
    pub window: Option<usize>,

    /// Drop acquisitions without an index value instead of writing -9999.
    #[arg(long)]
    pub drop_missing: bool,
}
