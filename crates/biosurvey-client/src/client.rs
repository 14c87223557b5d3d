use async_trait::async_trait;
use biosurvey_core::error::{Result, SurveyError};
use biosurvey_core::models::{
    join_ids, Coordinate, ProjectId, ProjectMetadata, SpeciesSuggestion, SurveyPoint, TaxonId,
};
use biosurvey_core::ports::DirectoryService;
use reqwest::Url;

use crate::features::parse_survey_features;
use crate::wire::{parse_collection, MetadataRecord, ProjectRecord, SpeciesRecord};

/// Operation names understood by the directory service's `op` parameter
pub mod ops {
    pub const SPECIES_SEARCH: &str = "speciessearch";
    pub const GET_PROJECTS: &str = "getprojects";
    pub const SURVEYS_BY_SPECIES: &str = "getsurveysbyspecies";
    pub const SURVEYS_BY_PROJECTS: &str = "getsurveys";
    pub const PROJECTS_BY_ID: &str = "getprojectsbyid";
}

/// HTTP adapter for the survey directory service
#[derive(Debug, Clone)]
pub struct DirectoryClient {
    /// Base URL of the service (e.g., "https://apps.des.qld.gov.au/species/")
    base_url: Url,

    /// HTTP client
    client: reqwest::Client,
}

impl DirectoryClient {
    /// Create a client for the service at `base_url`
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| SurveyError::ConfigInvalid {
            key: "api_base_url".to_string(),
            reason: format!("'{}' is not a valid URL: {}", base_url, e),
        })?;

        Ok(Self { base_url, client: reqwest::Client::new() })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build the request URL for an operation
    pub fn operation_url(&self, op: &str, params: &[(&str, String)]) -> Url {
        let mut url = self.base_url.clone();
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("op", op);
            for (key, value) in params {
                query.append_pair(key, value);
            }
        }
        url
    }

    /// Issue one GET and return the body text
    async fn get(&self, op: &str, params: &[(&str, String)]) -> Result<String> {
        let url = self.operation_url(op, params);
        tracing::debug!(op, url = %url, "Directory request");

        let response = self.client.get(url).send().await.map_err(|e| SurveyError::Transport {
            operation: op.to_string(),
            reason: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SurveyError::Status { operation: op.to_string(), status: status.as_u16() });
        }

        response.text().await.map_err(|e| SurveyError::Transport {
            operation: op.to_string(),
            reason: format!("Failed to read response body: {}", e),
        })
    }

    async fn project_ids(&self, params: &[(&str, String)]) -> Result<Vec<ProjectId>> {
        let body = self.get(ops::GET_PROJECTS, params).await?;
        let records: Vec<ProjectRecord> = parse_collection(ops::GET_PROJECTS, &body)?;
        Ok(records.into_iter().filter_map(|r| r.project_id).collect())
    }
}

#[async_trait]
impl DirectoryService for DirectoryClient {
    async fn search_species(&self, kingdom: &str, text: &str) -> Result<Vec<SpeciesSuggestion>> {
        let params = [("kingdom", kingdom.to_string()), ("species", text.to_string())];
        let body = self.get(ops::SPECIES_SEARCH, &params).await?;
        let records: Vec<SpeciesRecord> = parse_collection(ops::SPECIES_SEARCH, &body)?;
        Ok(records.into_iter().filter_map(SpeciesRecord::into_suggestion).collect())
    }

    async fn search_projects(&self, title: &str) -> Result<Vec<ProjectId>> {
        self.project_ids(&[("projtitle", title.to_string())]).await
    }

    async fn projects_in_circle(
        &self,
        center: Coordinate,
        radius_meters: f64,
    ) -> Result<Vec<ProjectId>> {
        self.project_ids(&[("circle", center.circle_param(radius_meters))]).await
    }

    async fn surveys_by_species(
        &self,
        taxon_id: &TaxonId,
        center: Coordinate,
        radius_meters: f64,
    ) -> Result<Vec<SurveyPoint>> {
        let params = [
            ("taxonid", taxon_id.to_string()),
            ("circle", center.circle_param(radius_meters)),
        ];
        let body = self.get(ops::SURVEYS_BY_SPECIES, &params).await?;
        parse_survey_features(ops::SURVEYS_BY_SPECIES, &body)
    }

    async fn surveys_by_projects(
        &self,
        project_ids: &[ProjectId],
        center: Coordinate,
        radius_meters: f64,
    ) -> Result<Vec<SurveyPoint>> {
        let params = [
            ("projids", join_ids(project_ids)),
            ("circle", center.circle_param(radius_meters)),
        ];
        let body = self.get(ops::SURVEYS_BY_PROJECTS, &params).await?;
        parse_survey_features(ops::SURVEYS_BY_PROJECTS, &body)
    }

    async fn project_metadata(&self, project_ids: &[ProjectId]) -> Result<Vec<ProjectMetadata>> {
        let body = self.get(ops::PROJECTS_BY_ID, &[("projids", join_ids(project_ids))]).await?;
        let records: Vec<MetadataRecord> = parse_collection(ops::PROJECTS_BY_ID, &body)?;
        Ok(records.into_iter().filter_map(MetadataRecord::into_metadata).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_base_url() {
        let err = DirectoryClient::new("not a url").unwrap_err();
        assert!(matches!(err, SurveyError::ConfigInvalid { .. }));
    }

    #[test]
    fn test_operation_url() {
        let client = DirectoryClient::new("https://apps.des.qld.gov.au/species/").unwrap();
        let url = client.operation_url(
            ops::GET_PROJECTS,
            &[("circle", "-27.5,153,6000".to_string())],
        );

        assert_eq!(url.path(), "/species/");
        let pairs: Vec<(String, String)> =
            url.query_pairs().map(|(k, v)| (k.into_owned(), v.into_owned())).collect();
        assert_eq!(
            pairs,
            vec![
                ("op".to_string(), "getprojects".to_string()),
                ("circle".to_string(), "-27.5,153,6000".to_string()),
            ]
        );
    }
}
