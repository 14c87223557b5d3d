//! Staged search pipeline against a scripted directory

mod common;

use biosurvey_core::error::SurveyError;
use biosurvey_core::models::{ProjectId, SearchCriteria, TaxonId};
use biosurvey_search::{SearchOutcome, SearchPath, SearchPipeline};
use common::{brisbane, metadata, point, Call, ScriptedDirectory};
use std::collections::HashMap;

fn koala_directory() -> ScriptedDirectory {
    ScriptedDirectory {
        projects_by_title: HashMap::from([(
            "Koala".to_string(),
            vec![ProjectId::from(101), ProjectId::from(102)],
        )]),
        projects_in_circle: vec![ProjectId::from(101), ProjectId::from(300)],
        project_surveys: vec![point("s1", -27.47, 153.02, 101), point("s2", -27.47, 153.02, 101)],
        metadata: vec![metadata(101, "Koala Survey", "2020-01-01")],
        ..Default::default()
    }
}

#[tokio::test]
async fn test_keyword_search_requests_metadata_for_area_ids_only() {
    let pipeline = SearchPipeline::new(koala_directory());
    let criteria = SearchCriteria::new(brisbane()).with_keyword("Koala");

    let outcome = pipeline.execute(&criteria).await.unwrap();

    let calls = pipeline.directory().calls();
    assert_eq!(calls[0], Call::Projects("Koala".to_string()));
    assert_eq!(calls[1], Call::Circle("-27.4698,153.0251,6000".to_string()));
    assert_eq!(calls[2], Call::SurveysByProjects("101".to_string()));
    assert_eq!(calls[3], Call::Metadata("101".to_string()));
    assert_eq!(calls.len(), 4);

    let results = outcome.results().expect("search should find results");
    assert_eq!(results.path, SearchPath::Keyword);
    assert_eq!(results.projects.len(), 1);
    assert_eq!(results.projects[0].survey_count, 2);
    assert_eq!(results.groups.len(), 1);
    assert_eq!(results.summary.candidates, 2);
    assert_eq!(results.summary.in_area, 1);
}

#[tokio::test]
async fn test_no_candidates_stops_after_first_stage() {
    let pipeline = SearchPipeline::new(koala_directory());
    let criteria = SearchCriteria::new(brisbane()).with_keyword("Bilby");

    let outcome = pipeline.execute(&criteria).await.unwrap();

    assert_eq!(outcome, SearchOutcome::NoResultsForKeyword { query: "Bilby".to_string() });
    assert_eq!(pipeline.directory().calls(), vec![Call::Projects("Bilby".to_string())]);
}

#[tokio::test]
async fn test_empty_intersection_skips_metadata() {
    let directory = ScriptedDirectory {
        projects_in_circle: vec![ProjectId::from(999)],
        ..koala_directory()
    };
    let pipeline = SearchPipeline::new(directory);
    let criteria = SearchCriteria::new(brisbane()).with_keyword("Koala").with_radius(2000.0);

    let outcome = pipeline.execute(&criteria).await.unwrap();

    assert_eq!(
        outcome,
        SearchOutcome::NoResultsInArea { query: "Koala".to_string(), radius_meters: 2000.0 }
    );
    assert!(outcome.message().unwrap().contains("increasing the search radius"));

    let calls = pipeline.directory().calls();
    assert_eq!(calls.len(), 2);
    assert!(!calls.iter().any(|c| matches!(c, Call::Metadata(_) | Call::SurveysByProjects(_))));
}

#[tokio::test]
async fn test_keyword_results_sorted_by_last_load_desc() {
    let directory = ScriptedDirectory {
        projects_by_title: HashMap::from([(
            "Koala".to_string(),
            vec![ProjectId::from(1), ProjectId::from(2), ProjectId::from(3)],
        )]),
        projects_in_circle: vec![ProjectId::from(1), ProjectId::from(2), ProjectId::from(3)],
        metadata: vec![
            metadata(1, "Old", "2015-06-01"),
            metadata(2, "Undated", ""),
            metadata(3, "New", "2022-02-01"),
        ],
        ..Default::default()
    };
    let pipeline = SearchPipeline::new(directory);
    let criteria = SearchCriteria::new(brisbane()).with_keyword("Koala");

    let outcome = pipeline.execute(&criteria).await.unwrap();
    let names: Vec<&str> =
        outcome.results().unwrap().projects.iter().map(|p| p.project.name.as_str()).collect();

    assert_eq!(names, ["New", "Old", "Undated"]);
    assert!(outcome.results().unwrap().projects.iter().all(|p| p.survey_count == 0));
}

#[tokio::test]
async fn test_species_search_counts_and_groups() {
    let directory = ScriptedDirectory {
        species_surveys: vec![
            point("a1", -27.5, 153.0, 55),
            point("a2", -27.5, 153.0, 55),
            point("b1", -27.6, 153.1, 55),
        ],
        metadata: vec![metadata(55, "Koala Habitat", "")],
        ..Default::default()
    };
    let pipeline = SearchPipeline::new(directory);
    let criteria = SearchCriteria::new(brisbane()).with_species(TaxonId::from(860));

    let outcome = pipeline.execute(&criteria).await.unwrap();
    let results = outcome.results().unwrap();

    assert_eq!(results.path, SearchPath::Species);
    assert_eq!(results.groups.len(), 2);
    assert_eq!(results.groups[0].len(), 2);
    assert_eq!(results.projects[0].survey_count, 3);

    assert_eq!(
        pipeline.directory().calls(),
        vec![Call::SurveysBySpecies("860".to_string()), Call::Metadata("55".to_string())]
    );
}

#[tokio::test]
async fn test_species_search_keeps_response_order() {
    let directory = ScriptedDirectory {
        species_surveys: vec![point("a", -27.5, 153.0, 1), point("b", -27.6, 153.1, 2)],
        metadata: vec![metadata(2, "Second", "2010-01-01"), metadata(1, "First", "2020-01-01")],
        ..Default::default()
    };
    let pipeline = SearchPipeline::new(directory);
    let criteria = SearchCriteria::new(brisbane()).with_species(TaxonId::from(7));

    let outcome = pipeline.execute(&criteria).await.unwrap();
    let names: Vec<&str> =
        outcome.results().unwrap().projects.iter().map(|p| p.project.name.as_str()).collect();

    assert_eq!(names, ["Second", "First"]);
}

#[tokio::test]
async fn test_species_without_surveys_is_no_results() {
    let pipeline = SearchPipeline::new(ScriptedDirectory::default());
    let criteria = SearchCriteria::new(brisbane()).with_species(TaxonId::from(860));

    let outcome = pipeline.execute(&criteria).await.unwrap();

    assert!(matches!(outcome, SearchOutcome::NoResultsForKeyword { .. }));
    assert_eq!(pipeline.directory().calls().len(), 1);
}

#[tokio::test]
async fn test_transport_failure_aborts_pipeline() {
    let directory = ScriptedDirectory { fail_on: Some("circle"), ..koala_directory() };
    let pipeline = SearchPipeline::new(directory);
    let criteria = SearchCriteria::new(brisbane()).with_keyword("Koala");

    let err = pipeline.execute(&criteria).await.unwrap_err();

    assert!(err.is_transport());
    assert_eq!(pipeline.directory().calls().len(), 2);
}

#[tokio::test]
async fn test_empty_query_makes_no_calls() {
    let pipeline = SearchPipeline::new(koala_directory());
    let criteria = SearchCriteria::new(brisbane());

    let err = pipeline.execute(&criteria).await.unwrap_err();

    assert!(matches!(err, SurveyError::EmptyQuery));
    assert!(pipeline.directory().calls().is_empty());
}
