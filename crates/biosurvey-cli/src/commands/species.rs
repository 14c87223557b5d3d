use crate::cli::{Cli, SpeciesArgs};
use crate::config_loader::load_config_with_overrides;
use crate::output::OutputWriter;
use crate::output_types::{SpeciesOutput, SpeciesRow};
use anyhow::Result;
use biosurvey_core::config::CliConfigOverrides;
use biosurvey_search::Autocomplete;
use std::time::Duration;

pub async fn execute(cli: &Cli, args: &SpeciesArgs, output: &OutputWriter) -> Result<()> {
    let config = load_config_with_overrides(cli, CliConfigOverrides::default())?;
    let client = super::directory_client(&config)?;
    let kingdom = config.kingdom.value.clone();

    // A single lookup has nothing to debounce
    let autocomplete = Autocomplete::new(client, kingdom.clone(), Duration::ZERO);
    let suggestions = autocomplete.suggest(&args.text).await.into_current().unwrap_or_default();

    if output.is_json() {
        return output.result(SpeciesOutput { query: args.text.clone(), kingdom, suggestions });
    }

    if suggestions.is_empty() {
        output.info(format!("No {} match '{}'.", kingdom, args.text));
        return Ok(());
    }

    output.section(format!("Species matching '{}'", args.text));
    output.table(suggestions.iter().map(SpeciesRow::from).collect::<Vec<_>>());
    output.info("Search with: biosurvey search --species-id <Taxon ID>");
    Ok(())
}
