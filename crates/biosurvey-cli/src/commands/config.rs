use crate::cli::Cli;
use crate::config_loader::load_config_with_overrides;
use crate::output::OutputWriter;
use crate::output_types::{ConfigEntry, ConfigOutput};
use anyhow::Result;
use biosurvey_core::config::CliConfigOverrides;

pub fn execute(cli: &Cli, output: &OutputWriter) -> Result<()> {
    let config = load_config_with_overrides(cli, CliConfigOverrides::default())?;

    let entries: Vec<ConfigEntry> = config
        .to_inspection_map()
        .into_iter()
        .map(|(key, (value, source))| ConfigEntry { key, value, source })
        .collect();

    if output.is_json() {
        return output.result(ConfigOutput { entries });
    }

    output.section("Configuration");
    output.table(entries);
    Ok(())
}
