//! biosurvey search - Species autocomplete and the staged survey search pipeline
//!
//! This crate turns search criteria into map markers and ranked project
//! metadata by chaining directory service calls, and tracks the session
//! state a presentation layer renders.

pub mod aggregate;
pub mod autocomplete;
pub mod controller;
pub mod metadata;
pub mod models;
pub mod pipeline;
pub mod session;

pub use autocomplete::{Autocomplete, Suggestions};
pub use controller::SearchController;
pub use models::{format_radius, SearchOutcome, SearchPath, SearchResults, StageSummary};
pub use pipeline::SearchPipeline;
pub use session::{SearchSession, SearchTicket, SessionState, GENERIC_ERROR_MESSAGE};
