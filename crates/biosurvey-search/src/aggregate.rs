use biosurvey_core::models::{Coordinate, ProjectId, SurveyGroup, SurveyPoint};
use std::collections::{HashMap, HashSet};

/// Group survey points sharing a coordinate, in first-seen order
///
/// Points are matched on their `"lat,lon"` key, so only exactly equal
/// coordinates share a marker.
pub fn group_by_coordinate(points: &[SurveyPoint], center: Coordinate) -> Vec<SurveyGroup> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<SurveyGroup> = Vec::new();

    for point in points {
        let key = point.coordinate.key();
        match index.get(&key) {
            Some(&i) => groups[i].surveys.push(point.detail()),
            None => {
                index.insert(key, groups.len());
                groups.push(SurveyGroup {
                    coordinate: point.coordinate,
                    distance_meters: center.distance_to(&point.coordinate),
                    surveys: vec![point.detail()],
                });
            }
        }
    }

    groups
}

/// Number of survey points carrying each project id
pub fn count_by_project(points: &[SurveyPoint]) -> HashMap<ProjectId, usize> {
    let mut counts = HashMap::new();
    for point in points {
        *counts.entry(point.project_id.clone()).or_insert(0) += 1;
    }
    counts
}

/// Distinct project ids in first-seen order
pub fn distinct_projects(points: &[SurveyPoint]) -> Vec<ProjectId> {
    let mut seen = HashSet::new();
    points
        .iter()
        .filter(|p| seen.insert(p.project_id.clone()))
        .map(|p| p.project_id.clone())
        .collect()
}

/// Keep the candidates that also appear in the area set, preserving candidate order
pub fn intersect_in_order(candidates: &[ProjectId], in_area: &[ProjectId]) -> Vec<ProjectId> {
    let area: HashSet<&ProjectId> = in_area.iter().collect();
    let mut seen = HashSet::new();
    candidates
        .iter()
        .filter(|id| area.contains(id) && seen.insert(*id))
        .cloned()
        .collect()
}
