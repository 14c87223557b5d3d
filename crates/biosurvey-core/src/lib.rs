//! biosurvey core - Domain models, ports, location and configuration
//!
//! This crate contains the domain types and port definitions shared by the
//! directory client, the search pipeline and the CLI.

pub mod config;
pub mod error;
pub mod location;
pub mod models;
pub mod ports;

pub use error::{Result, SurveyError};
pub use location::{acquire_location, LocationFix};
