//! Emits the frontend bundler configuration as JSON.
//!
//! Run with: cargo run --bin frontend-config -- --package web/package.json
//!
//! Without `--package` the version comes from this crate's own metadata.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use customer_db_tools::build_config::{BuildConfig, PackageMetadata, LONG_VERSION};
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "frontend-config",
    about = "Print the bundler options for the web frontend",
    version,
    long_version = LONG_VERSION
)]
struct Cli {
    #[arg(long, help = "package.json to read the application version from")]
    package: Option<PathBuf>,
    #[arg(
        long,
        action = ArgAction::SetTrue,
        help = "Print the raw define values instead of bundler expressions"
    )]
    raw: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    customer_db_tools::config::init_tracing("warn", false);

    let metadata = match &cli.package {
        Some(path) => PackageMetadata::from_path(path)
            .with_context(|| format!("failed to read package metadata from {}", path.display()))?,
        None => PackageMetadata::current(),
    };
    debug!(version = %metadata.version, "Resolved package metadata");

    let build_config = BuildConfig::from_metadata(&metadata);
    let rendered = if cli.raw {
        serde_json::to_string_pretty(&build_config)?
    } else {
        serde_json::to_string_pretty(&build_config.to_bundler_json()?)?
    };
    println!("{}", rendered);

    Ok(())
}
