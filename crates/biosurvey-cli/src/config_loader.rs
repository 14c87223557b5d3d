//! Configuration loading utilities for CLI commands

use anyhow::{Context, Result};
use biosurvey_core::config::{parse_kingdom, validate_radius, CliConfigOverrides, LayeredConfig};
use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::errors;

/// Config file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "biosurvey.toml";

/// Load layered configuration: defaults, file, environment
pub fn load_config(explicit: Option<&Path>) -> Result<LayeredConfig> {
    let config = LayeredConfig::with_defaults();

    let config = match resolve_config_path(explicit) {
        Some(path) => {
            if !path.exists() {
                return Err(errors::config_file_not_found(&path.display().to_string()).into());
            }
            tracing::debug!(path = %path.display(), "Loading configuration file");
            config
                .load_from_file(&path)
                .with_context(|| format!("Failed to load configuration file {}", path.display()))?
        }
        None => config,
    };

    Ok(config.load_from_env())
}

/// Load layered configuration with global CLI overrides applied
pub fn load_config_with_overrides(cli: &Cli, overrides: CliConfigOverrides) -> Result<LayeredConfig> {
    let mut config = load_config(cli.config.as_deref())?;

    let kingdom = match cli.kingdom.as_deref() {
        Some(k) => Some(parse_kingdom(k).map_err(|e| errors::invalid_config("kingdom", &e.to_string()))?),
        None => None,
    };
    let radius_meters = match overrides.radius_meters {
        Some(r) => {
            Some(validate_radius(r).map_err(|e| errors::invalid_config("radius", &e.to_string()))?)
        }
        None => None,
    };

    config.update_from_cli(CliConfigOverrides {
        api_base_url: cli.api_url.clone().or(overrides.api_base_url),
        kingdom: kingdom.or(overrides.kingdom),
        radius_meters,
        debounce_ms: overrides.debounce_ms,
    });
    Ok(config)
}

fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let local = PathBuf::from(DEFAULT_CONFIG_FILE);
            local.is_file().then_some(local)
        }
    }
}
