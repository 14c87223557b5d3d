use crate::error::{Result, SurveyError};
use crate::location::DEFAULT_FALLBACK;
use crate::models::{Coordinate, DEFAULT_RADIUS_METERS};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Default directory service endpoint
pub const DEFAULT_API_BASE_URL: &str = "https://apps.des.qld.gov.au/species/";

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    Default,
    File,
    Environment,
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Layered configuration for the survey client
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub api_base_url: ConfigValue<String>,
    pub radius_meters: ConfigValue<f64>,
    pub debounce_ms: ConfigValue<u64>,
    pub kingdom: ConfigValue<String>,
    pub fallback_lat: ConfigValue<f64>,
    pub fallback_lon: ConfigValue<f64>,
    pub location_timeout_ms: ConfigValue<u64>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            api_base_url: ConfigValue::new(DEFAULT_API_BASE_URL.to_string(), ConfigSource::Default),
            radius_meters: ConfigValue::new(DEFAULT_RADIUS_METERS, ConfigSource::Default),
            debounce_ms: ConfigValue::new(300, ConfigSource::Default),
            kingdom: ConfigValue::new("animals".to_string(), ConfigSource::Default),
            fallback_lat: ConfigValue::new(DEFAULT_FALLBACK.lat, ConfigSource::Default),
            fallback_lon: ConfigValue::new(DEFAULT_FALLBACK.lon, ConfigSource::Default),
            location_timeout_ms: ConfigValue::new(5000, ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| SurveyError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| SurveyError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(url) = file_config.api_base_url {
            self.api_base_url.update(url, ConfigSource::File);
        }
        if let Some(radius) = file_config.radius_meters {
            self.radius_meters.update(validate_radius(radius)?, ConfigSource::File);
        }
        if let Some(debounce) = file_config.debounce_ms {
            self.debounce_ms.update(debounce, ConfigSource::File);
        }
        if let Some(kingdom) = file_config.kingdom {
            self.kingdom.update(parse_kingdom(&kingdom)?, ConfigSource::File);
        }
        if let Some(lat) = file_config.fallback_lat {
            self.fallback_lat.update(lat, ConfigSource::File);
        }
        if let Some(lon) = file_config.fallback_lon {
            self.fallback_lon.update(lon, ConfigSource::File);
        }
        if let Some(timeout) = file_config.location_timeout_ms {
            self.location_timeout_ms.update(timeout, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        if let Ok(url) = env::var("BIOSURVEY_API_BASE_URL") {
            self.api_base_url.update(url, ConfigSource::Environment);
        }

        if let Ok(radius_str) = env::var("BIOSURVEY_RADIUS_METERS") {
            match parse_radius(&radius_str) {
                Ok(radius) => self.radius_meters.update(radius, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid BIOSURVEY_RADIUS_METERS value '{}': expected a non-negative number",
                    radius_str
                ),
            }
        }

        if let Ok(debounce_str) = env::var("BIOSURVEY_DEBOUNCE_MS") {
            match debounce_str.trim().parse::<u64>() {
                Ok(debounce) => self.debounce_ms.update(debounce, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid BIOSURVEY_DEBOUNCE_MS value '{}': expected milliseconds",
                    debounce_str
                ),
            }
        }

        if let Ok(kingdom_str) = env::var("BIOSURVEY_KINGDOM") {
            match parse_kingdom(&kingdom_str) {
                Ok(kingdom) => self.kingdom.update(kingdom, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid BIOSURVEY_KINGDOM value '{}': expected animals, plants or fungi",
                    kingdom_str
                ),
            }
        }

        if let Ok(lat_str) = env::var("BIOSURVEY_FALLBACK_LAT") {
            match lat_str.trim().parse::<f64>() {
                Ok(lat) => self.fallback_lat.update(lat, ConfigSource::Environment),
                Err(_) => tracing::warn!("Invalid BIOSURVEY_FALLBACK_LAT value '{}'", lat_str),
            }
        }

        if let Ok(lon_str) = env::var("BIOSURVEY_FALLBACK_LON") {
            match lon_str.trim().parse::<f64>() {
                Ok(lon) => self.fallback_lon.update(lon, ConfigSource::Environment),
                Err(_) => tracing::warn!("Invalid BIOSURVEY_FALLBACK_LON value '{}'", lon_str),
            }
        }

        if let Ok(timeout_str) = env::var("BIOSURVEY_LOCATION_TIMEOUT_MS") {
            match timeout_str.trim().parse::<u64>() {
                Ok(timeout) => self.location_timeout_ms.update(timeout, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid BIOSURVEY_LOCATION_TIMEOUT_MS value '{}': expected milliseconds",
                    timeout_str
                ),
            }
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(url) = overrides.api_base_url {
            self.api_base_url.update(url, ConfigSource::Cli);
        }
        if let Some(radius) = overrides.radius_meters {
            self.radius_meters.update(radius, ConfigSource::Cli);
        }
        if let Some(debounce) = overrides.debounce_ms {
            self.debounce_ms.update(debounce, ConfigSource::Cli);
        }
        if let Some(kingdom) = overrides.kingdom {
            self.kingdom.update(kingdom, ConfigSource::Cli);
        }
    }

    /// Fallback search origin, validated
    pub fn fallback_coordinate(&self) -> Result<Coordinate> {
        Coordinate::new(self.fallback_lat.value, self.fallback_lon.value).map_err(|e| {
            SurveyError::ConfigInvalid {
                key: "fallback_lat/fallback_lon".to_string(),
                reason: e.to_string(),
            }
        })
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms.value)
    }

    pub fn location_timeout(&self) -> Duration {
        Duration::from_millis(self.location_timeout_ms.value)
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> BTreeMap<String, (String, ConfigSource)> {
        let mut map = BTreeMap::new();

        map.insert(
            "api_base_url".to_string(),
            (self.api_base_url.value.clone(), self.api_base_url.source),
        );
        map.insert(
            "radius_meters".to_string(),
            (format!("{}", self.radius_meters.value), self.radius_meters.source),
        );
        map.insert(
            "debounce_ms".to_string(),
            (self.debounce_ms.value.to_string(), self.debounce_ms.source),
        );
        map.insert("kingdom".to_string(), (self.kingdom.value.clone(), self.kingdom.source));
        map.insert(
            "fallback_lat".to_string(),
            (self.fallback_lat.value.to_string(), self.fallback_lat.source),
        );
        map.insert(
            "fallback_lon".to_string(),
            (self.fallback_lon.value.to_string(), self.fallback_lon.source),
        );
        map.insert(
            "location_timeout_ms".to_string(),
            (self.location_timeout_ms.value.to_string(), self.location_timeout_ms.source),
        );

        map
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    api_base_url: Option<String>,
    radius_meters: Option<f64>,
    debounce_ms: Option<u64>,
    kingdom: Option<String>,
    fallback_lat: Option<f64>,
    fallback_lon: Option<f64>,
    location_timeout_ms: Option<u64>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub api_base_url: Option<String>,
    pub radius_meters: Option<f64>,
    pub debounce_ms: Option<u64>,
    pub kingdom: Option<String>,
}

/// Parse a search radius in meters
pub fn parse_radius(s: &str) -> Result<f64> {
    let radius = s.trim().parse::<f64>().map_err(|_| SurveyError::ConfigInvalid {
        key: "radius_meters".to_string(),
        reason: format!("Invalid radius: {}. Use a non-negative number of meters", s),
    })?;
    validate_radius(radius)
}

/// Reject negative or non-finite radii
pub fn validate_radius(radius: f64) -> Result<f64> {
    if radius.is_finite() && radius >= 0.0 {
        Ok(radius)
    } else {
        Err(SurveyError::ConfigInvalid {
            key: "radius_meters".to_string(),
            reason: format!("Invalid radius: {}. Use a non-negative number of meters", radius),
        })
    }
}

/// Parse the kingdom searched by species autocomplete
pub fn parse_kingdom(s: &str) -> Result<String> {
    match s.trim().to_lowercase().as_str() {
        k @ ("animals" | "plants" | "fungi") => Ok(k.to_string()),
        _ => Err(SurveyError::ConfigInvalid {
            key: "kingdom".to_string(),
            reason: format!("Invalid kingdom: {}. Use animals, plants or fungi", s),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = LayeredConfig::with_defaults();
        assert_eq!(config.api_base_url.value, DEFAULT_API_BASE_URL);
        assert_eq!(config.radius_meters.value, 6000.0);
        assert_eq!(config.radius_meters.source, ConfigSource::Default);
        assert_eq!(config.debounce(), Duration::from_millis(300));
        assert_eq!(config.fallback_coordinate().unwrap(), DEFAULT_FALLBACK);
    }

    #[test]
    fn test_config_precedence() {
        let mut value = ConfigValue::new(6000.0, ConfigSource::Default);

        value.update(60000.0, ConfigSource::File);
        assert_eq!(value.value, 60000.0);

        value.update(1000.0, ConfigSource::Cli);
        assert_eq!(value.source, ConfigSource::Cli);

        // Lower precedence should not override
        value.update(2000.0, ConfigSource::Environment);
        assert_eq!(value.value, 1000.0);
        assert_eq!(value.source, ConfigSource::Cli);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
api_base_url = "http://localhost:8080/species/"
radius_meters = 60000.0
debounce_ms = 150
kingdom = "Plants"
"#
        )
        .unwrap();

        let config = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap();

        assert_eq!(config.api_base_url.value, "http://localhost:8080/species/");
        assert_eq!(config.api_base_url.source, ConfigSource::File);
        assert_eq!(config.radius_meters.value, 60000.0);
        assert_eq!(config.debounce_ms.value, 150);
        assert_eq!(config.kingdom.value, "plants");
        assert_eq!(config.fallback_lat.source, ConfigSource::Default);
    }

    #[test]
    fn test_file_rejects_negative_radius() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "radius_meters = -5.0").unwrap();
        assert!(LayeredConfig::with_defaults().load_from_file(file.path()).is_err());
    }

    #[test]
    fn test_parse_helpers() {
        assert_eq!(parse_radius("6000").unwrap(), 6000.0);
        assert!(parse_radius("-1").is_err());
        assert!(parse_radius("wide").is_err());
        assert_eq!(parse_kingdom("FUNGI").unwrap(), "fungi");
        assert!(parse_kingdom("minerals").is_err());
    }

    #[test]
    fn test_invalid_fallback_coordinate() {
        let mut config = LayeredConfig::with_defaults();
        config.fallback_lat.update(120.0, ConfigSource::File);
        assert!(config.fallback_coordinate().is_err());
    }

    #[test]
    fn test_inspection_map() {
        let map = LayeredConfig::with_defaults().to_inspection_map();
        assert_eq!(map.len(), 7);
        let (radius, source) = &map["radius_meters"];
        assert_eq!(radius, "6000");
        assert_eq!(*source, ConfigSource::Default);
    }
}
