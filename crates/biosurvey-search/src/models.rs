use biosurvey_core::models::{Coordinate, ProjectMetadata, SurveyGroup};
use serde::Serialize;

/// Which way the search target was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchPath {
    /// Free-text project title keyword
    Keyword,
    /// Species committed from autocomplete
    Species,
}

/// Per-stage counts reported alongside the results
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StageSummary {
    /// Project ids (keyword path) or survey points (species path) from stage 1
    pub candidates: usize,

    /// Project ids surviving the circle filter
    pub in_area: usize,

    /// Survey points aggregated
    pub survey_points: usize,

    /// Distinct coordinates among the survey points
    pub groups: usize,

    /// Metadata records after normalization
    pub projects: usize,
}

/// A completed search with data to show
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResults {
    pub path: SearchPath,

    /// Keyword text or taxon id the search ran for
    pub query: String,

    pub center: Coordinate,

    pub radius_meters: f64,

    /// Map markers, one per distinct coordinate
    pub groups: Vec<SurveyGroup>,

    /// Project metadata annotated with survey counts, in display order
    pub projects: Vec<ProjectMetadata>,

    pub summary: StageSummary,
}

/// Terminal state of one pipeline run
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SearchOutcome {
    Found(SearchResults),

    /// Stage 1 produced nothing
    NoResultsForKeyword { query: String },

    /// Candidates exist but none inside the circle
    NoResultsInArea { query: String, radius_meters: f64 },
}

impl SearchOutcome {
    /// User-facing message for the no-data states
    pub fn message(&self) -> Option<String> {
        match self {
            SearchOutcome::Found(_) => None,
            SearchOutcome::NoResultsForKeyword { query } => {
                Some(format!("No results found for '{}'.", query))
            }
            SearchOutcome::NoResultsInArea { query, radius_meters } => Some(format!(
                "No results for '{}' within {}. Try increasing the search radius.",
                query,
                format_radius(*radius_meters)
            )),
        }
    }

    pub fn results(&self) -> Option<&SearchResults> {
        match self {
            SearchOutcome::Found(results) => Some(results),
            _ => None,
        }
    }
}

/// "6 km" or "750 m"
pub fn format_radius(radius_meters: f64) -> String {
    if radius_meters >= 1000.0 {
        format!("{} km", radius_meters / 1000.0)
    } else {
        format!("{} m", radius_meters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let none = SearchOutcome::NoResultsForKeyword { query: "Koala".to_string() };
        assert_eq!(none.message().unwrap(), "No results found for 'Koala'.");

        let area = SearchOutcome::NoResultsInArea { query: "Koala".to_string(), radius_meters: 6000.0 };
        let message = area.message().unwrap();
        assert!(message.contains("within 6 km"));
        assert!(message.contains("increasing the search radius"));
    }

    #[test]
    fn test_format_radius() {
        assert_eq!(format_radius(60000.0), "60 km");
        assert_eq!(format_radius(1500.0), "1.5 km");
        assert_eq!(format_radius(750.0), "750 m");
    }
}
