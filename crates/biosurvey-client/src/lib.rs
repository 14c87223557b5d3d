//! biosurvey client - HTTP adapter for the survey directory service
//!
//! Implements the `DirectoryService` port over the directory's query-parameter
//! API and normalizes its loosely shaped responses.

pub mod client;
pub mod features;
pub mod links;
pub mod wire;

pub use client::{ops, DirectoryClient};
pub use features::parse_survey_features;
pub use links::{web_search_query, web_search_url};
