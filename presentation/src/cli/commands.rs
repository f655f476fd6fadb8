//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for resolution results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary of the matched record
    Summary,
    /// The full result as JSON
    Json,
}

impl From<OutputFormat> for parcel_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Summary => parcel_domain::OutputFormat::Summary,
            OutputFormat::Json => parcel_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for parcel-resolver
#[derive(Parser, Debug)]
#[command(name = "parcel-resolver")]
#[command(author, version, about = "Resolve a street address into a canonical property record")]
#[command(long_about = r#"
parcel-resolver expands a street address into spelling variants and tries
each one against the page source and the API source until a candidate
matching the city, state and zip is found.

Configuration files are loaded from (in priority order):
1. PARCEL_* environment variables
2. --config <path>      Explicit config file
3. ./parcel.toml        Project-level config
4. ~/.config/parcel-resolver/config.toml   Global config

Example:
  parcel-resolver "123 Main St" --city Springfield --state IL --zip 62704
  parcel-resolver "413 5th St" --city Austin --state TX -o json
"#)]
pub struct Cli {
    /// Street address, e.g. "123 Main St"
    pub address: Option<String>,

    #[arg(long)]
    pub city: Option<String>,

    /// Two-letter state code
    #[arg(long)]
    pub state: Option<String>,

    #[arg(long)]
    pub zip: Option<String>,

    /// Output format (defaults to [output].format, then summary)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Shared secret, required when an access key is configured
    #[arg(long, value_name = "KEY")]
    pub access_key: Option<String>,

    /// Append a JSONL transcript of every attempt to this file
    #[arg(long, value_name = "PATH")]
    pub attempt_log: Option<PathBuf>,

    /// Write diagnostics to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}
