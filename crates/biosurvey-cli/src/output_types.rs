use biosurvey_core::config::ConfigSource;
use biosurvey_core::models::{ProjectMetadata, SpeciesSuggestion, SurveyGroup};
use biosurvey_core::LocationFix;
use biosurvey_search::{format_radius, SessionState};
use serde::Serialize;
use tabled::Tabled;

/// Output for search command
#[derive(Debug, Serialize)]
pub struct SearchOutput {
    pub location: LocationFix,
    pub state: SessionState,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<ProjectLink>,
}

#[derive(Debug, Serialize)]
pub struct ProjectLink {
    pub project_id: String,
    pub name: String,
    pub url: String,
}

/// Output for species command
#[derive(Debug, Serialize)]
pub struct SpeciesOutput {
    pub query: String,
    pub kingdom: String,
    pub suggestions: Vec<SpeciesSuggestion>,
}

/// Output for config command
#[derive(Debug, Serialize)]
pub struct ConfigOutput {
    pub entries: Vec<ConfigEntry>,
}

#[derive(Debug, Serialize, Tabled)]
pub struct ConfigEntry {
    #[tabled(rename = "Key")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
    #[tabled(rename = "Source", display_with = "display_source")]
    pub source: ConfigSource,
}

fn display_source(source: &ConfigSource) -> String {
    format!("{:?}", source)
}

/// One map marker
#[derive(Debug, Tabled)]
pub struct GroupRow {
    #[tabled(rename = "#")]
    pub index: usize,
    #[tabled(rename = "Location")]
    pub location: String,
    #[tabled(rename = "Distance")]
    pub distance: String,
    #[tabled(rename = "Surveys")]
    pub surveys: usize,
    #[tabled(rename = "Projects")]
    pub projects: String,
}

impl GroupRow {
    pub fn new(index: usize, group: &SurveyGroup) -> Self {
        let mut names: Vec<&str> = Vec::new();
        for survey in &group.surveys {
            if !names.contains(&survey.project_name.as_str()) {
                names.push(&survey.project_name);
            }
        }

        Self {
            index: index + 1,
            location: format!("{:.5}, {:.5}", group.coordinate.lat, group.coordinate.lon),
            distance: format_radius(group.distance_meters.round()),
            surveys: group.len(),
            projects: names.join(", "),
        }
    }
}

#[derive(Debug, Tabled)]
pub struct ProjectRow {
    #[tabled(rename = "Project")]
    pub name: String,
    #[tabled(rename = "Custodian")]
    pub custodian: String,
    #[tabled(rename = "Surveys")]
    pub surveys: usize,
    #[tabled(rename = "Last loaded")]
    pub last_load_date: String,
    #[tabled(rename = "Started")]
    pub begin_date: String,
}

impl From<&ProjectMetadata> for ProjectRow {
    fn from(metadata: &ProjectMetadata) -> Self {
        Self {
            name: metadata.project.name.clone(),
            custodian: metadata.project.custodian_organisation.clone(),
            surveys: metadata.survey_count,
            last_load_date: metadata.last_load_date.clone(),
            begin_date: metadata.begin_date.clone(),
        }
    }
}

#[derive(Debug, Tabled)]
pub struct SpeciesRow {
    #[tabled(rename = "Scientific name")]
    pub scientific_name: String,
    #[tabled(rename = "Common name")]
    pub common_name: String,
    #[tabled(rename = "Taxon ID")]
    pub taxon_id: String,
}

impl From<&SpeciesSuggestion> for SpeciesRow {
    fn from(suggestion: &SpeciesSuggestion) -> Self {
        Self {
            scientific_name: suggestion.scientific_name.clone(),
            common_name: suggestion.common_name.clone(),
            taxon_id: suggestion.taxon_id.to_string(),
        }
    }
}
