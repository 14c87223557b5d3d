use serde::{Deserialize, Serialize};

use super::{Coordinate, ProjectId};

/// A single geolocated survey record belonging to a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyPoint {
    /// Feature identifier as reported by the service (may be empty)
    pub id: String,

    pub coordinate: Coordinate,

    pub project_id: ProjectId,

    pub project_name: String,

    pub locality_details: String,

    pub start_date: String,

    pub end_date: String,

    pub site_code: String,

    pub location_precision: String,
}

impl SurveyPoint {
    /// The display record carried inside a [`SurveyGroup`]
    pub fn detail(&self) -> SurveyDetail {
        SurveyDetail {
            id: self.id.clone(),
            project_id: self.project_id.clone(),
            project_name: self.project_name.clone(),
            locality_details: self.locality_details.clone(),
            start_date: self.start_date.clone(),
            end_date: self.end_date.clone(),
            site_code: self.site_code.clone(),
            location_precision: self.location_precision.clone(),
        }
    }
}

/// Survey fields shown for one marker, without the shared coordinate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyDetail {
    pub id: String,
    pub project_id: ProjectId,
    pub project_name: String,
    pub locality_details: String,
    pub start_date: String,
    pub end_date: String,
    pub site_code: String,
    pub location_precision: String,
}

/// Surveys recorded at exactly the same coordinate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyGroup {
    pub coordinate: Coordinate,

    /// Distance from the search center in meters
    pub distance_meters: f64,

    /// Details in first-seen order
    pub surveys: Vec<SurveyDetail>,
}

impl SurveyGroup {
    pub fn len(&self) -> usize {
        self.surveys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surveys.is_empty()
    }
}
