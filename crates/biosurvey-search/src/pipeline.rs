use biosurvey_core::error::Result;
use biosurvey_core::models::{ProjectId, SearchCriteria, SearchTarget, SurveyPoint, TaxonId};
use biosurvey_core::ports::DirectoryService;

use crate::aggregate::{count_by_project, distinct_projects, group_by_coordinate, intersect_in_order};
use crate::metadata::{annotate_survey_counts, normalize_metadata, sort_by_last_load_desc};
use crate::models::{SearchOutcome, SearchPath, SearchResults, StageSummary};

/// Search pipeline running keyword or species searches against the directory
///
/// Stages run strictly in sequence, each gated on the previous one producing
/// something. Any failing call aborts the run; nothing is retried.
pub struct SearchPipeline<D>
where
    D: DirectoryService,
{
    directory: D,
}

impl<D> SearchPipeline<D>
where
    D: DirectoryService,
{
    /// Create a new search pipeline
    pub fn new(directory: D) -> Self {
        Self { directory }
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    /// Run one search to a terminal outcome
    pub async fn execute(&self, criteria: &SearchCriteria) -> Result<SearchOutcome> {
        match criteria.target()? {
            SearchTarget::Keyword(keyword) => self.keyword_search(&keyword, criteria).await,
            SearchTarget::Species(taxon_id) => self.species_search(&taxon_id, criteria).await,
        }
    }

    /// Keyword path: title search, circle filter, surveys, metadata sorted by load date
    async fn keyword_search(
        &self,
        keyword: &str,
        criteria: &SearchCriteria,
    ) -> Result<SearchOutcome> {
        let mut summary = StageSummary::default();

        // Stage 1: resolve candidates
        let candidates = self.directory.search_projects(keyword).await?;
        summary.candidates = candidates.len();
        tracing::debug!(keyword, stage = 1, count = candidates.len(), "Project candidates");

        if candidates.is_empty() {
            return Ok(SearchOutcome::NoResultsForKeyword { query: keyword.to_string() });
        }

        // Stage 2: geographic filter
        let in_area_all =
            self.directory.projects_in_circle(criteria.center, criteria.radius_meters).await?;
        let in_area = intersect_in_order(&candidates, &in_area_all);
        summary.in_area = in_area.len();
        tracing::debug!(keyword, stage = 2, count = in_area.len(), "Candidates in area");

        if in_area.is_empty() {
            return Ok(SearchOutcome::NoResultsInArea {
                query: keyword.to_string(),
                radius_meters: criteria.radius_meters,
            });
        }

        let points = self
            .directory
            .surveys_by_projects(&in_area, criteria.center, criteria.radius_meters)
            .await?;

        let results = self
            .aggregate_and_fetch(SearchPath::Keyword, keyword, &in_area, &points, criteria, summary)
            .await?;

        Ok(SearchOutcome::Found(results))
    }

    /// Species path: surveys in the circle, counts per project, metadata in response order
    async fn species_search(
        &self,
        taxon_id: &TaxonId,
        criteria: &SearchCriteria,
    ) -> Result<SearchOutcome> {
        let mut summary = StageSummary::default();
        let query = taxon_id.to_string();

        // Stage 1: the service applies the circle filter itself
        let points = self
            .directory
            .surveys_by_species(taxon_id, criteria.center, criteria.radius_meters)
            .await?;
        summary.candidates = points.len();
        tracing::debug!(taxon_id = %taxon_id, stage = 1, count = points.len(), "Species surveys");

        if points.is_empty() {
            return Ok(SearchOutcome::NoResultsForKeyword { query });
        }

        let project_ids = distinct_projects(&points);
        summary.in_area = project_ids.len();

        let results = self
            .aggregate_and_fetch(SearchPath::Species, &query, &project_ids, &points, criteria, summary)
            .await?;

        Ok(SearchOutcome::Found(results))
    }

    /// Stages 3 to 5: aggregate points, fetch metadata in one batch, annotate and order
    async fn aggregate_and_fetch(
        &self,
        path: SearchPath,
        query: &str,
        project_ids: &[ProjectId],
        points: &[SurveyPoint],
        criteria: &SearchCriteria,
        mut summary: StageSummary,
    ) -> Result<SearchResults> {
        // Stage 3: aggregate
        let counts = count_by_project(points);
        let groups = group_by_coordinate(points, criteria.center);
        summary.survey_points = points.len();
        summary.groups = groups.len();

        // Stage 4: metadata fetch
        let records = self.directory.project_metadata(project_ids).await?;
        let mut projects = normalize_metadata(project_ids, records);

        // Stage 5: annotate & order
        annotate_survey_counts(&mut projects, &counts);
        if path == SearchPath::Keyword {
            sort_by_last_load_desc(&mut projects);
        }
        summary.projects = projects.len();

        tracing::info!(
            query,
            path = ?path,
            projects = projects.len(),
            groups = groups.len(),
            "Search complete"
        );

        Ok(SearchResults {
            path,
            query: query.to_string(),
            center: criteria.center,
            radius_meters: criteria.radius_meters,
            groups,
            projects,
            summary,
        })
    }
}
