//! Shaping of project metadata: normalization, survey counts and ordering

use biosurvey_core::models::{ProjectId, ProjectMetadata};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};

/// Keep exactly one record per requested id, in response order
///
/// Records for ids that were never requested are dropped, as are repeats.
pub fn normalize_metadata(
    requested: &[ProjectId],
    records: Vec<ProjectMetadata>,
) -> Vec<ProjectMetadata> {
    let wanted: HashSet<&ProjectId> = requested.iter().collect();
    let mut seen: HashSet<ProjectId> = HashSet::new();
    let total = records.len();

    let normalized: Vec<ProjectMetadata> = records
        .into_iter()
        .filter(|m| wanted.contains(m.id()) && seen.insert(m.id().clone()))
        .collect();

    if normalized.len() < total {
        tracing::debug!(
            dropped = total - normalized.len(),
            "Dropped duplicate or unrequested metadata records"
        );
    }

    normalized
}

/// Attach the per-project survey count, 0 when the project had no surveys
pub fn annotate_survey_counts(
    projects: &mut [ProjectMetadata],
    counts: &HashMap<ProjectId, usize>,
) {
    for project in projects.iter_mut() {
        project.survey_count = counts.get(project.id()).copied().unwrap_or(0);
    }
}

/// Most recently loaded project first
///
/// Stable: equal dates keep their input order, and records whose date is
/// missing or unreadable go after every dated record.
pub fn sort_by_last_load_desc(projects: &mut [ProjectMetadata]) {
    projects.sort_by_cached_key(|p| Reverse(parse_service_date(&p.last_load_date)));
}

/// Parse the date formats the directory service has been seen to emit
pub fn parse_service_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Some(millis) = parse_json_date(raw) {
        return DateTime::from_timestamp_millis(millis).map(|dt| dt.naive_utc());
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%d/%m/%Y %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }

    for format in ["%Y-%m-%d", "%d/%m/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return date.and_hms_opt(0, 0, 0);
        }
    }

    None
}

/// `/Date(1577836800000)/` or `/Date(1577836800000+1000)/`
fn parse_json_date(raw: &str) -> Option<i64> {
    let inner = raw.strip_prefix("/Date(")?.strip_suffix(")/")?;
    let end = inner.get(1..)?.find(['+', '-']).map(|i| i + 1).unwrap_or(inner.len());
    inner[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use biosurvey_core::models::ProjectInfo;

    fn metadata(id: u64, last_load: &str) -> ProjectMetadata {
        ProjectMetadata {
            project: ProjectInfo {
                id: ProjectId::from(id),
                name: format!("Project {}", id),
                custodian_organisation: String::new(),
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

    fn ids(projects: &[ProjectMetadata]) -> Vec<String> {
        projects.iter().map(|p| p.id().to_string()).collect()
    }

    #[test]
    fn test_normalize_drops_unrequested_and_duplicates() {
        let requested = vec![ProjectId::from(1), ProjectId::from(2)];
        let records = vec![metadata(2, ""), metadata(9, ""), metadata(1, ""), metadata(2, "dup")];
        let normalized = normalize_metadata(&requested, records);
        assert_eq!(ids(&normalized), ["2", "1"]);
        assert_eq!(normalized[0].last_load_date, "");
    }

    #[test]
    fn test_annotate_defaults_to_zero() {
        let mut projects = vec![metadata(1, ""), metadata(2, "")];
        let counts = HashMap::from([(ProjectId::from(1), 4)]);
        annotate_survey_counts(&mut projects, &counts);
        assert_eq!(projects[0].survey_count, 4);
        assert_eq!(projects[1].survey_count, 0);
    }

    #[test]
    fn test_sort_desc_is_stable_and_undated_last() {
        let mut projects = vec![
            metadata(1, "2018-03-01"),
            metadata(2, ""),
            metadata(3, "2021-07-15T10:00:00"),
            metadata(4, "2018-03-01T00:00:00"),
            metadata(5, "garbage"),
            metadata(6, "15/07/2021 10:00:00"),
        ];
        sort_by_last_load_desc(&mut projects);
        assert_eq!(ids(&projects), ["3", "6", "1", "4", "2", "5"]);
    }

    #[test]
    fn test_parse_service_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
        assert_eq!(parse_service_date("2020-01-01"), Some(expected));
        assert_eq!(parse_service_date("01/01/2020"), Some(expected));
        assert_eq!(parse_service_date("2020-01-01T00:00:00"), Some(expected));
        assert_eq!(parse_service_date("2020-01-01T10:00:00+10:00"), Some(expected));
        assert_eq!(parse_service_date("/Date(1577836800000)/"), Some(expected));
        assert_eq!(parse_service_date("/Date(1577836800000+1000)/"), Some(expected));
        assert_eq!(parse_service_date(""), None);
        assert_eq!(parse_service_date("soon"), None);
    }
}
