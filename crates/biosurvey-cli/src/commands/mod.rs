//! Command implementations

mod config;
mod interactive;
mod search;
mod species;

use crate::cli::{AreaArgs, Cli, Commands};
use crate::output::OutputWriter;
use anyhow::{Context, Result};
use biosurvey_client::DirectoryClient;
use biosurvey_core::config::LayeredConfig;
use biosurvey_core::location::{FixedLocationProvider, NoLocationProvider};
use biosurvey_core::models::Coordinate;
use biosurvey_core::{acquire_location, LocationFix};
use std::sync::Arc;

/// Execute a CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);

    match &cli.command {
        Commands::Search(args) => search::execute(&cli, args, &output).await,
        Commands::Species(args) => species::execute(&cli, args, &output).await,
        Commands::Interactive(args) => interactive::execute(&cli, args, &output).await,
        Commands::Config => config::execute(&cli, &output),
    }
}

/// Client for the configured directory service
fn directory_client(config: &LayeredConfig) -> Result<Arc<DirectoryClient>> {
    let client = DirectoryClient::new(&config.api_base_url.value)
        .context("Failed to create directory service client")?;
    Ok(Arc::new(client))
}

/// Resolve the search origin once: explicit flags, else the configured fallback
async fn locate(area: &AreaArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<LocationFix> {
    let fallback = config.fallback_coordinate()?;
    let timeout = config.location_timeout();

    let fix = match (area.lat, area.lon) {
        (Some(lat), Some(lon)) => {
            let provider = FixedLocationProvider::new(Coordinate::new(lat, lon)?);
            acquire_location(&provider, fallback, timeout).await
        }
        _ => acquire_location(&NoLocationProvider, fallback, timeout).await,
    };

    if let LocationFix::Unavailable { fallback, reason } = &fix {
        output.warning(format!(
            "Location unavailable ({}); searching from {}. Use --lat/--lon to choose a center.",
            reason, fallback
        ));
    }

    Ok(fix)
}
