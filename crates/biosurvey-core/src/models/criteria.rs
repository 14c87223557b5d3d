use serde::{Deserialize, Serialize};

use super::{Coordinate, TaxonId};
use crate::error::{Result, SurveyError};

/// Default search radius in meters
pub const DEFAULT_RADIUS_METERS: f64 = 6000.0;

/// What the user asked for, as edited by the search form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchCriteria {
    /// Free-text project title keyword
    pub keyword: String,

    /// Species committed from autocomplete; takes priority over the keyword
    pub selected_species_id: Option<TaxonId>,

    /// Search origin
    pub center: Coordinate,

    /// Radius of the circle query in meters
    pub radius_meters: f64,
}

/// The concrete search the pipeline will run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchTarget {
    Keyword(String),
    Species(TaxonId),
}

impl SearchCriteria {
    /// Create criteria centered on a coordinate with the default radius
    pub fn new(center: Coordinate) -> Self {
        Self {
            keyword: String::new(),
            selected_species_id: None,
            center,
            radius_meters: DEFAULT_RADIUS_METERS,
        }
    }

    /// Set the free-text keyword; editing the text drops any committed species
    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.set_keyword(keyword);
        self
    }

    pub fn with_species(mut self, taxon_id: TaxonId) -> Self {
        self.selected_species_id = Some(taxon_id);
        self
    }

    pub fn with_radius(mut self, radius_meters: f64) -> Self {
        self.radius_meters = radius_meters;
        self
    }

    pub fn with_center(mut self, center: Coordinate) -> Self {
        self.center = center;
        self
    }

    pub fn set_keyword(&mut self, keyword: impl Into<String>) {
        self.keyword = keyword.into();
        self.selected_species_id = None;
    }

    /// Commit a species chosen from the suggestion list
    pub fn select_species(&mut self, taxon_id: TaxonId) {
        self.selected_species_id = Some(taxon_id);
    }

    /// Move the search origin, e.g. after the user repositions the map
    pub fn reposition(&mut self, center: Coordinate) {
        self.center = center;
    }

    /// Circle query parameter for the current center and radius
    pub fn circle(&self) -> String {
        self.center.circle_param(self.radius_meters)
    }

    /// Validate the criteria and resolve the concrete search target
    pub fn target(&self) -> Result<SearchTarget> {
        if !self.radius_meters.is_finite() || self.radius_meters < 0.0 {
            return Err(SurveyError::InvalidRadius { radius: self.radius_meters });
        }

        if let Some(taxon_id) = &self.selected_species_id {
            return Ok(SearchTarget::Species(taxon_id.clone()));
        }

        let keyword = self.keyword.trim();
        if keyword.is_empty() {
            return Err(SurveyError::EmptyQuery);
        }

        Ok(SearchTarget::Keyword(keyword.to_string()))
    }
}
