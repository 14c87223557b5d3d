use crate::cli::{Cli, SearchArgs};
use crate::config_loader::load_config_with_overrides;
use crate::errors;
use crate::output::OutputWriter;
use crate::output_types::{GroupRow, ProjectLink, ProjectRow, SearchOutput};
use crate::progress::create_spinner;
use anyhow::Result;
use biosurvey_client::web_search_url;
use biosurvey_core::config::CliConfigOverrides;
use biosurvey_core::models::{SearchCriteria, TaxonId};
use biosurvey_core::{LocationFix, SurveyError};
use biosurvey_search::{format_radius, SearchController, SearchResults, SessionState};

pub async fn execute(cli: &Cli, args: &SearchArgs, output: &OutputWriter) -> Result<()> {
    let config = load_config_with_overrides(
        cli,
        CliConfigOverrides { radius_meters: args.area.radius, ..Default::default() },
    )?;

    let fix = super::locate(&args.area, &config, output).await?;
    let client = super::directory_client(&config)?;

    let mut criteria = SearchCriteria::new(fix.coordinate())
        .with_radius(config.radius_meters.value)
        .with_keyword(args.keyword.as_str());
    if let Some(ref species_id) = args.species_id {
        criteria = criteria.with_species(TaxonId::new(species_id.trim()));
    }

    let controller =
        SearchController::new(client, config.kingdom.value.clone(), config.debounce(), criteria);

    let spinner = create_spinner("Searching survey directory...", output.is_json());
    let state = controller.search().await;
    spinner.finish_and_clear();

    let state = match state {
        Ok(state) => state,
        Err(SurveyError::EmptyQuery) => return Err(errors::empty_query().into()),
        Err(e) => return Err(e.into()),
    };

    render_state(state, &fix, args.links, output)
}

/// Print a finished search in the selected format
pub(super) fn render_state(
    state: SessionState,
    fix: &LocationFix,
    links: bool,
    output: &OutputWriter,
) -> Result<()> {
    if let SessionState::Error { message } = &state {
        return Err(errors::directory_unavailable(message).into());
    }

    let project_links = match (&state, links) {
        (SessionState::Results(results), true) => project_links(results),
        _ => Vec::new(),
    };

    if output.is_json() {
        return output.result(SearchOutput { location: fix.clone(), state, links: project_links });
    }

    match state {
        SessionState::Results(results) => {
            render_results(&results, output);
            if !project_links.is_empty() {
                output.section("Links");
                for link in &project_links {
                    output.kv(&link.name, &link.url);
                }
            }
        }
        SessionState::NoResults { message, suggest_wider_radius } => {
            output.info(&message);
            if suggest_wider_radius {
                output.info("Widen the search with --radius <meters>.");
            }
        }
        other => output.warning(format!("Search did not finish: {:?}", other)),
    }

    Ok(())
}

fn render_results(results: &SearchResults, output: &OutputWriter) {
    output.section("Search");
    output.kv("Query", &results.query);
    output.kv("Path", format!("{:?}", results.path));
    output.kv("Center", results.center);
    output.kv("Radius", format_radius(results.radius_meters));

    output.section(format!("Survey locations ({})", results.groups.len()));
    output.table(
        results.groups.iter().enumerate().map(|(i, g)| GroupRow::new(i, g)).collect::<Vec<_>>(),
    );

    output.section(format!("Projects ({})", results.projects.len()));
    output.table(results.projects.iter().map(ProjectRow::from).collect::<Vec<_>>());

    output.success(format!(
        "{} survey points in {} projects",
        results.summary.survey_points, results.summary.projects
    ));
}

fn project_links(results: &SearchResults) -> Vec<ProjectLink> {
    results
        .projects
        .iter()
        .map(|p| ProjectLink {
            project_id: p.id().to_string(),
            name: p.project.name.clone(),
            url: web_search_url(p).to_string(),
        })
        .collect()
}
