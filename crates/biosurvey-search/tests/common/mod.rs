//! Scripted directory service that records every call

#![allow(dead_code)]

use async_trait::async_trait;
use biosurvey_core::error::{Result, SurveyError};
use biosurvey_core::models::{
    join_ids, Coordinate, ProjectId, ProjectInfo, ProjectMetadata, SpeciesSuggestion, SurveyPoint,
    TaxonId,
};
use biosurvey_core::ports::DirectoryService;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Species(String),
    Projects(String),
    Circle(String),
    SurveysBySpecies(String),
    SurveysByProjects(String),
    Metadata(String),
}

#[derive(Default)]
pub struct ScriptedDirectory {
    pub species: Vec<SpeciesSuggestion>,
    pub projects_by_title: HashMap<String, Vec<ProjectId>>,
    pub projects_in_circle: Vec<ProjectId>,
    pub species_surveys: Vec<SurveyPoint>,
    pub project_surveys: Vec<SurveyPoint>,
    pub metadata: Vec<ProjectMetadata>,

    /// Simulated latency keyed by species text or project title
    pub delays: HashMap<String, Duration>,

    /// Operation that fails with a transport error
    pub fail_on: Option<&'static str>,

    pub calls: Mutex<Vec<Call>>,
}

impl ScriptedDirectory {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    async fn record(&self, operation: &'static str, key: &str, call: Call) -> Result<()> {
        self.calls.lock().unwrap().push(call);

        if let Some(delay) = self.delays.get(key) {
            tokio::time::sleep(*delay).await;
        }

        if self.fail_on == Some(operation) {
            return Err(SurveyError::Transport {
                operation: operation.to_string(),
                reason: "connection reset".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl DirectoryService for ScriptedDirectory {
    async fn search_species(&self, _kingdom: &str, text: &str) -> Result<Vec<SpeciesSuggestion>> {
        self.record("speciessearch", text, Call::Species(text.to_string())).await?;
        Ok(self.species.clone())
    }

    async fn search_projects(&self, title: &str) -> Result<Vec<ProjectId>> {
        self.record("getprojects", title, Call::Projects(title.to_string())).await?;
        Ok(self.projects_by_title.get(title).cloned().unwrap_or_default())
    }

    async fn projects_in_circle(&self, center: Coordinate, radius_meters: f64) -> Result<Vec<ProjectId>> {
        let circle = center.circle_param(radius_meters);
        self.record("circle", &circle, Call::Circle(circle.clone())).await?;
        Ok(self.projects_in_circle.clone())
    }

    async fn surveys_by_species(
        &self,
        taxon_id: &TaxonId,
        _center: Coordinate,
        _radius_meters: f64,
    ) -> Result<Vec<SurveyPoint>> {
        self.record("getsurveysbyspecies", taxon_id.as_str(), Call::SurveysBySpecies(taxon_id.to_string()))
            .await?;
        Ok(self.species_surveys.clone())
    }

    async fn surveys_by_projects(
        &self,
        project_ids: &[ProjectId],
        _center: Coordinate,
        _radius_meters: f64,
    ) -> Result<Vec<SurveyPoint>> {
        let ids = join_ids(project_ids);
        self.record("getsurveys", &ids, Call::SurveysByProjects(ids.clone())).await?;
        Ok(self
            .project_surveys
            .iter()
            .filter(|p| project_ids.contains(&p.project_id))
            .cloned()
            .collect())
    }

    async fn project_metadata(&self, project_ids: &[ProjectId]) -> Result<Vec<ProjectMetadata>> {
        let ids = join_ids(project_ids);
        self.record("getprojectsbyid", &ids, Call::Metadata(ids.clone())).await?;
        Ok(self.metadata.clone())
    }
}

pub fn brisbane() -> Coordinate {
    Coordinate::new(-27.4698, 153.0251).unwrap()
}

pub fn point(id: &str, lat: f64, lon: f64, project: u64) -> SurveyPoint {
    SurveyPoint {
        id: id.to_string(),
        coordinate: Coordinate { lat, lon },
        project_id: ProjectId::from(project),
        project_name: format!("Project {}", project),
        locality_details: String::new(),
        start_date: String::new(),
        end_date: String::new(),
        site_code: String::new(),
        location_precision: String::new(),
    }
}

pub fn metadata(id: u64, name: &str, last_load: &str) -> ProjectMetadata {
    ProjectMetadata {
        project: ProjectInfo {
            id: ProjectId::from(id),
            name: name.to_string(),
            custodian_organisation: "Department of Environment".to_string(),
            source: String::new(),
        },
        abstract_text: String::new(),
        jurisdiction_description: String::new(),
        geographical_extent: String::new(),
        begin_date: String::new(),
        progress_description: String::new(),
        last_load_date: last_load.to_string(),
        survey_count: 0,
    }
}

pub fn species(name: &str, common: &str, taxon: u64) -> SpeciesSuggestion {
    SpeciesSuggestion {
        scientific_name: name.to_string(),
        common_name: common.to_string(),
        taxon_id: TaxonId::from(taxon),
        species_id: taxon.to_string(),
        species_name: name.to_string(),
    }
}
