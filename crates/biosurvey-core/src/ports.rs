//! Port trait definitions
//!
//! These traits define the interfaces that adapters must implement.

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::Result;
use crate::models::{Coordinate, ProjectId, ProjectMetadata, SpeciesSuggestion, SurveyPoint, TaxonId};

/// Port for the read-only survey directory service
///
/// Each method is a single round trip. Collections are returned already
/// normalized, whatever shape the service used on the wire.
#[async_trait]
pub trait DirectoryService: Send + Sync {
    /// Find species whose names match free text
    async fn search_species(&self, kingdom: &str, text: &str) -> Result<Vec<SpeciesSuggestion>>;

    /// Find projects whose title matches a keyword
    async fn search_projects(&self, title: &str) -> Result<Vec<ProjectId>>;

    /// List every project with surveys inside the circle
    async fn projects_in_circle(&self, center: Coordinate, radius_meters: f64)
        -> Result<Vec<ProjectId>>;

    /// Surveys recording a species inside the circle
    async fn surveys_by_species(
        &self,
        taxon_id: &TaxonId,
        center: Coordinate,
        radius_meters: f64,
    ) -> Result<Vec<SurveyPoint>>;

    /// Surveys belonging to the given projects inside the circle
    async fn surveys_by_projects(
        &self,
        project_ids: &[ProjectId],
        center: Coordinate,
        radius_meters: f64,
    ) -> Result<Vec<SurveyPoint>>;

    /// Metadata for a batch of projects, in response order
    async fn project_metadata(&self, project_ids: &[ProjectId]) -> Result<Vec<ProjectMetadata>>;
}

/// Port for the source of the starting map location
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Report the current position once
    async fn current_location(&self) -> Result<Coordinate>;
}

#[async_trait]
impl<T: DirectoryService + ?Sized> DirectoryService for Arc<T> {
    async fn search_species(&self, kingdom: &str, text: &str) -> Result<Vec<SpeciesSuggestion>> {
        (**self).search_species(kingdom, text).await
    }

    async fn search_projects(&self, title: &str) -> Result<Vec<ProjectId>> {
        (**self).search_projects(title).await
    }

    async fn projects_in_circle(
        &self,
        center: Coordinate,
        radius_meters: f64,
    ) -> Result<Vec<ProjectId>> {
        (**self).projects_in_circle(center, radius_meters).await
    }

    async fn surveys_by_species(
        &self,
        taxon_id: &TaxonId,
        center: Coordinate,
        radius_meters: f64,
    ) -> Result<Vec<SurveyPoint>> {
        (**self).surveys_by_species(taxon_id, center, radius_meters).await
    }

    async fn surveys_by_projects(
        &self,
        project_ids: &[ProjectId],
        center: Coordinate,
        radius_meters: f64,
    ) -> Result<Vec<SurveyPoint>> {
        (**self).surveys_by_projects(project_ids, center, radius_meters).await
    }

    async fn project_metadata(&self, project_ids: &[ProjectId]) -> Result<Vec<ProjectMetadata>> {
        (**self).project_metadata(project_ids).await
    }
}
