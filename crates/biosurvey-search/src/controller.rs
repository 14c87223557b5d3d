use std::sync::Arc;
use std::time::Duration;

use biosurvey_core::error::Result;
use biosurvey_core::models::{Coordinate, SearchCriteria, SpeciesSuggestion};
use biosurvey_core::ports::DirectoryService;
use tokio::sync::Mutex;

use crate::autocomplete::{Autocomplete, Suggestions};
use crate::pipeline::SearchPipeline;
use crate::session::{SearchSession, SessionState};

/// Drives one search session: autocomplete, searches and state commits
///
/// The session lock is never held across a remote call, so overlapping
/// searches and keystrokes only contend for the commit step.
pub struct SearchController<D>
where
    D: DirectoryService + ?Sized,
{
    pipeline: SearchPipeline<Arc<D>>,
    autocomplete: Autocomplete<Arc<D>>,
    session: Mutex<SearchSession>,
}

impl<D> SearchController<D>
where
    D: DirectoryService + ?Sized,
{
    pub fn new(
        directory: Arc<D>,
        kingdom: impl Into<String>,
        debounce: Duration,
        criteria: SearchCriteria,
    ) -> Self {
        Self {
            pipeline: SearchPipeline::new(Arc::clone(&directory)),
            autocomplete: Autocomplete::new(directory, kingdom, debounce),
            session: Mutex::new(SearchSession::new(criteria)),
        }
    }

    pub async fn state(&self) -> SessionState {
        self.session.lock().await.state().clone()
    }

    pub async fn criteria(&self) -> SearchCriteria {
        self.session.lock().await.criteria().clone()
    }

    /// Record new text and fetch suggestions for it
    ///
    /// Returns `None` when newer text arrived before the suggestions did.
    pub async fn type_input(&self, input: &str) -> Option<Vec<SpeciesSuggestion>> {
        self.session.lock().await.type_input(input);

        match self.autocomplete.suggest(input).await {
            Suggestions::Current(list) => {
                let mut session = self.session.lock().await;
                session.apply_suggestions(input, list.clone()).then_some(list)
            }
            Suggestions::Superseded => None,
        }
    }

    /// Record text without asking for suggestions
    pub async fn set_keyword(&self, keyword: &str) {
        self.session.lock().await.type_input(keyword);
    }

    pub async fn select_suggestion(&self, suggestion: &SpeciesSuggestion) {
        self.session.lock().await.select_suggestion(suggestion);
    }

    pub async fn reposition(&self, center: Coordinate) {
        self.session.lock().await.reposition(center);
    }

    pub async fn set_radius(&self, radius_meters: f64) {
        self.session.lock().await.set_radius(radius_meters);
    }

    /// Run a search with the current criteria and return the resulting state
    ///
    /// If a newer search started meanwhile, its state is returned instead.
    pub async fn search(&self) -> Result<SessionState> {
        let ticket = self.session.lock().await.begin_search()?;

        let result = self.pipeline.execute(&ticket.criteria).await;

        let mut session = self.session.lock().await;
        session.complete(&ticket, result);
        Ok(session.state().clone())
    }
}
