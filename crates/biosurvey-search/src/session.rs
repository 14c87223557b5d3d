//! Search session state
//!
//! The session owns the editable criteria and a single tagged state. Each
//! search run takes a [`SearchTicket`] carrying the generation it started
//! under; completing a ticket older than the latest one is a no-op.

use biosurvey_core::error::{Result, SurveyError};
use biosurvey_core::models::{Coordinate, SearchCriteria, SpeciesSuggestion};
use serde::Serialize;

use crate::models::{SearchOutcome, SearchResults};

/// Shown for any failed remote call; details go to the log
pub const GENERIC_ERROR_MESSAGE: &str =
    "Something went wrong while contacting the survey directory. Please try again.";

/// Everything the presentation needs to render
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionState {
    Idle,

    /// Text is being edited; suggestions belong to `input`
    Typing { input: String, suggestions: Vec<SpeciesSuggestion> },

    Searching { generation: u64 },

    Results(SearchResults),

    /// A search finished without data
    NoResults { message: String, suggest_wider_radius: bool },

    Error { message: String },
}

impl SessionState {
    pub fn is_searching(&self) -> bool {
        matches!(self, SessionState::Searching { .. })
    }
}

/// Handle for one search run
#[derive(Debug, Clone, PartialEq)]
pub struct SearchTicket {
    pub generation: u64,

    /// Criteria snapshot the run should use
    pub criteria: SearchCriteria,
}

#[derive(Debug, Clone)]
pub struct SearchSession {
    criteria: SearchCriteria,
    state: SessionState,
    generation: u64,
}

impl SearchSession {
    pub fn new(criteria: SearchCriteria) -> Self {
        Self { criteria, state: SessionState::Idle, generation: 0 }
    }

    pub fn criteria(&self) -> &SearchCriteria {
        &self.criteria
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Record edited text; any committed species is dropped
    pub fn type_input(&mut self, input: impl Into<String>) {
        let input = input.into();
        self.criteria.set_keyword(input.clone());
        self.state = SessionState::Typing { input, suggestions: Vec::new() };
    }

    /// Attach suggestions if they still belong to the current text
    ///
    /// Returns false when the text changed since the suggestions were requested.
    pub fn apply_suggestions(&mut self, input: &str, list: Vec<SpeciesSuggestion>) -> bool {
        match &mut self.state {
            SessionState::Typing { input: current, suggestions } if current == input => {
                *suggestions = list;
                true
            }
            _ => false,
        }
    }

    /// Commit a suggestion as the search target and clear the list
    pub fn select_suggestion(&mut self, suggestion: &SpeciesSuggestion) {
        self.criteria.keyword = suggestion.label();
        self.criteria.select_species(suggestion.taxon_id.clone());
        self.state = SessionState::Typing { input: self.criteria.keyword.clone(), suggestions: Vec::new() };
        tracing::debug!(taxon_id = %suggestion.taxon_id, "Species committed");
    }

    pub fn reposition(&mut self, center: Coordinate) {
        self.criteria.reposition(center);
    }

    pub fn set_radius(&mut self, radius_meters: f64) {
        self.criteria.radius_meters = radius_meters;
    }

    /// Start a run; any earlier run still in flight becomes stale
    pub fn begin_search(&mut self) -> Result<SearchTicket> {
        self.criteria.target()?;

        self.generation += 1;
        self.state = SessionState::Searching { generation: self.generation };
        tracing::debug!(generation = self.generation, "Search started");

        Ok(SearchTicket { generation: self.generation, criteria: self.criteria.clone() })
    }

    /// Commit a finished run
    ///
    /// Returns false and leaves the state untouched when a newer run started.
    pub fn complete(&mut self, ticket: &SearchTicket, result: Result<SearchOutcome>) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(
                generation = ticket.generation,
                latest = self.generation,
                "Discarding stale search result"
            );
            return false;
        }

        self.state = match result {
            Ok(SearchOutcome::Found(results)) => SessionState::Results(results),
            Ok(outcome) => SessionState::NoResults {
                message: outcome.message().unwrap_or_default(),
                suggest_wider_radius: matches!(outcome, SearchOutcome::NoResultsInArea { .. }),
            },
            Err(e) => {
                tracing::error!(generation = ticket.generation, error = %e, "Search failed");
                SessionState::Error { message: error_message(&e) }
            }
        };
        true
    }
}

/// User-facing text for a failed run
pub fn error_message(error: &SurveyError) -> String {
    match error {
        SurveyError::EmptyQuery | SurveyError::InvalidRadius { .. } => error.to_string(),
        _ => GENERIC_ERROR_MESSAGE.to_string(),
    }
}
