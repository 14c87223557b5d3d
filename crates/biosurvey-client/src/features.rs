//! Survey responses arrive as GeoJSON feature collections

use biosurvey_core::error::{Result, SurveyError};
use biosurvey_core::models::{Coordinate, ProjectId, SurveyPoint};
use geojson::{feature::Id, Feature, GeoJson, JsonObject};
use serde_json::Value as JsonValue;

use crate::wire::json_text;

/// Parse a survey response body into survey points, in feature order
///
/// Features without a point geometry or without a project id are skipped.
pub fn parse_survey_features(operation: &str, body: &str) -> Result<Vec<SurveyPoint>> {
    let body = body.trim();
    if body.is_empty() {
        return Ok(Vec::new());
    }

    let value: JsonValue = serde_json::from_str(body).map_err(|e| decode_error(operation, e))?;
    match &value {
        JsonValue::Null => return Ok(Vec::new()),
        JsonValue::Array(items) if items.is_empty() => return Ok(Vec::new()),
        _ => {}
    }

    let geojson = GeoJson::from_json_value(value).map_err(|e| decode_error(operation, e))?;

    let features = match geojson {
        GeoJson::FeatureCollection(collection) => collection.features,
        GeoJson::Feature(feature) => vec![feature],
        GeoJson::Geometry(_) => Vec::new(),
    };

    let total = features.len();
    let points: Vec<SurveyPoint> = features.into_iter().filter_map(feature_to_point).collect();

    if points.len() < total {
        tracing::debug!(
            operation,
            skipped = total - points.len(),
            "Skipped survey features without point geometry or project id"
        );
    }

    Ok(points)
}

fn decode_error(operation: &str, error: impl std::fmt::Display) -> SurveyError {
    SurveyError::Decode {
        operation: operation.to_string(),
        reason: error.to_string(),
    }
}

fn feature_to_point(feature: Feature) -> Option<SurveyPoint> {
    let coordinate = match &feature.geometry.as_ref()?.value {
        geojson::Value::Point(position) => Coordinate::from_position(position)?,
        _ => return None,
    };

    let properties = feature.properties.unwrap_or_default();
    let project_id = property_id(&properties, "ProjectID")?;

    let id = match feature.id {
        Some(Id::String(s)) => s,
        Some(Id::Number(n)) => n.to_string(),
        None => property(&properties, "SurveyID"),
    };

    Some(SurveyPoint {
        id,
        coordinate,
        project_id,
        project_name: property(&properties, "ProjectName"),
        locality_details: property(&properties, "LocalityDetails"),
        start_date: property(&properties, "StartDate"),
        end_date: property(&properties, "EndDate"),
        site_code: property(&properties, "SiteCode"),
        location_precision: property(&properties, "LocationPrecision"),
    })
}

fn property(properties: &JsonObject, key: &str) -> String {
    json_text(properties.get(key))
}

fn property_id(properties: &JsonObject, key: &str) -> Option<ProjectId> {
    let value = properties.get(key)?;
    if value.is_null() {
        return None;
    }
    serde_json::from_value(value.clone()).ok().filter(|id: &ProjectId| !id.as_str().is_empty())
}
