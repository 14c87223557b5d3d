use serde::{Deserialize, Serialize};

use super::ProjectId;

/// Identity block of a project as returned by the metadata operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectInfo {
    pub id: ProjectId,
    pub name: String,
    pub custodian_organisation: String,
    pub source: String,
}

/// Project metadata enriched with the number of surveys found in the search area
///
/// Every text field defaults to an empty string when the service omits it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectMetadata {
    pub project: ProjectInfo,
    pub abstract_text: String,
    pub jurisdiction_description: String,
    pub geographical_extent: String,
    pub begin_date: String,
    pub progress_description: String,
    pub last_load_date: String,

    /// Not reported by the service; joined from the survey points of the search
    pub survey_count: usize,
}

impl ProjectMetadata {
    pub fn id(&self) -> &ProjectId {
        &self.project.id
    }
}
