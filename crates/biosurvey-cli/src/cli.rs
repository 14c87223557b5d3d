use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// biosurvey - Find biodiversity surveys near a location
#[derive(Parser, Debug)]
#[command(name = "biosurvey")]
#[command(about = "Search biodiversity surveys by species or project keyword", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Configuration file (defaults to ./biosurvey.toml when present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory service base URL
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Kingdom searched by species autocomplete (animals, plants, fungi)
    #[arg(long, global = true)]
    pub kingdom: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search surveys by project keyword or species
    Search(SearchArgs),

    /// List species matching free text
    Species(SpeciesArgs),

    /// Type, pick a suggestion and search, repeatedly
    Interactive(InteractiveArgs),

    /// Show the effective configuration and where each value came from
    Config,
}

/// Search origin and radius shared by the searching commands
#[derive(Parser, Debug, Clone)]
pub struct AreaArgs {
    /// Latitude of the search center (defaults to the configured fallback)
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Longitude of the search center
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    pub lon: Option<f64>,

    /// Search radius in meters
    #[arg(long, short = 'r')]
    pub radius: Option<f64>,
}

#[derive(Parser, Debug)]
pub struct SearchArgs {
    /// Project title keyword
    #[arg(default_value = "")]
    pub keyword: String,

    /// Search by species taxon id instead of the keyword
    #[arg(long, value_name = "ID")]
    pub species_id: Option<String>,

    #[command(flatten)]
    pub area: AreaArgs,

    /// Print a web search link for each project
    #[arg(long)]
    pub links: bool,
}

#[derive(Parser, Debug)]
pub struct SpeciesArgs {
    /// Scientific or common name fragment
    pub text: String,
}

#[derive(Parser, Debug)]
pub struct InteractiveArgs {
    #[command(flatten)]
    pub area: AreaArgs,

    /// Autocomplete debounce delay in milliseconds
    #[arg(long, value_name = "MS")]
    pub debounce_ms: Option<u64>,
}
