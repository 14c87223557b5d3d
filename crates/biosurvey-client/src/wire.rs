//! Wire records of the directory service and their normalization
//!
//! The service answers with a bare object when a collection has one element,
//! an array otherwise, and `null` or an empty body when nothing matched.
//! Field types are loose too (ids as numbers or strings), so every text field
//! is read leniently and missing values become empty strings.

use biosurvey_core::error::{Result, SurveyError};
use biosurvey_core::models::{ProjectId, ProjectInfo, ProjectMetadata, SpeciesSuggestion, TaxonId};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value as JsonValue;

/// Parse a response body into an ordered sequence of records
///
/// Each element is decoded on its own; elements that do not fit the record
/// shape are skipped so the rest of the batch survives.
pub fn parse_collection<T: DeserializeOwned>(operation: &str, body: &str) -> Result<Vec<T>> {
    let body = body.trim();
    if body.is_empty() {
        return Ok(Vec::new());
    }

    let parsed: JsonValue = serde_json::from_str(body).map_err(|e| SurveyError::Decode {
        operation: operation.to_string(),
        reason: e.to_string(),
    })?;

    let elements = match parsed {
        JsonValue::Null => return Ok(Vec::new()),
        JsonValue::Array(items) => items,
        single => vec![single],
    };

    let total = elements.len();
    let records: Vec<T> = elements
        .into_iter()
        .filter_map(|element| match serde_json::from_value(element) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::debug!(operation, error = %e, "Skipped malformed record");
                None
            }
        })
        .collect();

    if records.is_empty() && total > 0 {
        tracing::debug!(operation, total, "No usable records in response");
    }

    Ok(records)
}

/// Render any JSON scalar as display text; null and absent become ""
pub fn json_text(value: Option<&JsonValue>) -> String {
    match value {
        None | Some(JsonValue::Null) => String::new(),
        Some(JsonValue::String(s)) => s.trim().to_string(),
        Some(other) => other.to_string(),
    }
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    let value = Option::<JsonValue>::deserialize(deserializer)?;
    Ok(json_text(value.as_ref()))
}

fn lenient_id<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<JsonValue>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(JsonValue::Null) => None,
        Some(JsonValue::String(s)) if s.trim().is_empty() => None,
        Some(v) => serde_json::from_value(v).ok(),
    })
}

/// Species search record
#[derive(Debug, Deserialize)]
pub struct SpeciesRecord {
    #[serde(rename = "ScientificName", default, deserialize_with = "lenient_text")]
    pub scientific_name: String,

    #[serde(rename = "AcceptedCommonName", default, deserialize_with = "lenient_text")]
    pub accepted_common_name: String,

    #[serde(rename = "TaxonID", default, deserialize_with = "lenient_id")]
    pub taxon_id: Option<TaxonId>,

    #[serde(rename = "SpeciesID", default, deserialize_with = "lenient_text")]
    pub species_id: String,

    #[serde(rename = "SpeciesName", default, deserialize_with = "lenient_text")]
    pub species_name: String,
}

impl SpeciesRecord {
    /// Records without a taxon id cannot drive a species search
    pub fn into_suggestion(self) -> Option<SpeciesSuggestion> {
        let taxon_id = self.taxon_id?;
        Some(SpeciesSuggestion {
            scientific_name: self.scientific_name,
            common_name: self.accepted_common_name,
            taxon_id,
            species_id: self.species_id,
            species_name: self.species_name,
        })
    }
}

/// Project search / circle record; only the id is consumed
#[derive(Debug, Deserialize)]
pub struct ProjectRecord {
    #[serde(rename = "ProjectID", default, deserialize_with = "lenient_id")]
    pub project_id: Option<ProjectId>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProjectBlock {
    #[serde(rename = "ProjectID", default, deserialize_with = "lenient_id")]
    pub project_id: Option<ProjectId>,

    #[serde(rename = "Name", default, deserialize_with = "lenient_text")]
    pub name: String,

    #[serde(rename = "CustodianOrganisation", default, deserialize_with = "lenient_text")]
    pub custodian_organisation: String,

    #[serde(rename = "Source", default, deserialize_with = "lenient_text")]
    pub source: String,
}

/// Project metadata record
#[derive(Debug, Deserialize)]
pub struct MetadataRecord {
    #[serde(rename = "Project", default)]
    pub project: Option<ProjectBlock>,

    #[serde(rename = "Abstract", default, deserialize_with = "lenient_text")]
    pub abstract_text: String,

    #[serde(rename = "JurisdictionDescription", default, deserialize_with = "lenient_text")]
    pub jurisdiction_description: String,

    #[serde(rename = "GeographicalExtent", default, deserialize_with = "lenient_text")]
    pub geographical_extent: String,

    #[serde(rename = "BeginDate", default, deserialize_with = "lenient_text")]
    pub begin_date: String,

    #[serde(rename = "ProgressDescription", default, deserialize_with = "lenient_text")]
    pub progress_description: String,

    #[serde(rename = "LastLoadDate", default, deserialize_with = "lenient_text")]
    pub last_load_date: String,
}

impl MetadataRecord {
    /// Records without a project id cannot be joined and are dropped
    pub fn into_metadata(self) -> Option<ProjectMetadata> {
        let block = self.project?;
        let id = block.project_id?;
        Some(ProjectMetadata {
            project: ProjectInfo {
                id,
                name: block.name,
                custodian_organisation: block.custodian_organisation,
                source: block.source,
            },
            abstract_text: self.abstract_text,
            jurisdiction_description: self.jurisdiction_description,
            geographical_extent: self.geographical_extent,
            begin_date: self.begin_date,
            progress_description: self.progress_description,
            last_load_date: self.last_load_date,
            survey_count: 0,
        })
    }
}
