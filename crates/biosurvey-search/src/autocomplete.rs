//! Debounced species autocomplete
//!
//! Every call to [`Autocomplete::suggest`] bumps a generation counter, waits
//! out the debounce delay and only queries the directory if no newer input
//! arrived meanwhile. A response that lands after a newer input is dropped,
//! so stale suggestions never replace fresher ones.

use biosurvey_core::models::{sort_by_scientific_name, SpeciesSuggestion};
use biosurvey_core::ports::DirectoryService;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Result of one autocomplete request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Suggestions {
    /// Suggestions for the latest input, sorted by scientific name
    Current(Vec<SpeciesSuggestion>),

    /// A newer input arrived; the caller should keep what it has
    Superseded,
}

impl Suggestions {
    pub fn into_current(self) -> Option<Vec<SpeciesSuggestion>> {
        match self {
            Suggestions::Current(list) => Some(list),
            Suggestions::Superseded => None,
        }
    }
}

pub struct Autocomplete<D>
where
    D: DirectoryService,
{
    directory: D,
    kingdom: String,
    delay: Duration,
    generation: AtomicU64,
}

impl<D> Autocomplete<D>
where
    D: DirectoryService,
{
    pub fn new(directory: D, kingdom: impl Into<String>, delay: Duration) -> Self {
        Self { directory, kingdom: kingdom.into(), delay, generation: AtomicU64::new(0) }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    /// Suggest species for the latest input
    ///
    /// Failures are logged and yield an empty list.
    pub async fn suggest(&self, input: &str) -> Suggestions {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let text = input.trim();

        if text.is_empty() {
            return Suggestions::Current(Vec::new());
        }

        tokio::time::sleep(self.delay).await;
        if !self.is_current(generation) {
            tracing::trace!(input = text, generation, "Autocomplete input superseded before request");
            return Suggestions::Superseded;
        }

        let result = self.directory.search_species(&self.kingdom, text).await;
        if !self.is_current(generation) {
            tracing::debug!(input = text, generation, "Discarding stale autocomplete response");
            return Suggestions::Superseded;
        }

        match result {
            Ok(mut suggestions) => {
                sort_by_scientific_name(&mut suggestions);
                tracing::debug!(input = text, count = suggestions.len(), "Species suggestions");
                Suggestions::Current(suggestions)
            }
            Err(e) => {
                tracing::warn!(input = text, error = %e, "Species autocomplete failed");
                Suggestions::Current(Vec::new())
            }
        }
    }
}
