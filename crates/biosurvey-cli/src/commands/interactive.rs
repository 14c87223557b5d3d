use crate::cli::{Cli, InteractiveArgs};
use crate::config_loader::load_config_with_overrides;
use crate::output::OutputWriter;
use crate::progress::create_spinner;
use anyhow::Result;
use biosurvey_core::config::{validate_radius, CliConfigOverrides};
use biosurvey_core::models::SearchCriteria;
use biosurvey_core::ports::DirectoryService;
use biosurvey_core::{LocationFix, SurveyError};
use biosurvey_search::{format_radius, SearchController, SessionState};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};

pub async fn execute(cli: &Cli, args: &InteractiveArgs, output: &OutputWriter) -> Result<()> {
    let config = load_config_with_overrides(
        cli,
        CliConfigOverrides {
            radius_meters: args.area.radius,
            debounce_ms: args.debounce_ms,
            ..Default::default()
        },
    )?;

    let fix = super::locate(&args.area, &config, output).await?;
    let client = super::directory_client(&config)?;

    let criteria =
        SearchCriteria::new(fix.coordinate()).with_radius(config.radius_meters.value);
    let controller =
        SearchController::new(client, config.kingdom.value.clone(), config.debounce(), criteria);

    output.info(format!(
        "Searching within {} of {}",
        format_radius(config.radius_meters.value),
        fix.coordinate()
    ));

    loop {
        let text = prompt_text("Species or project keyword").await?;

        let suggestions = controller.type_input(&text).await.unwrap_or_default();
        if !suggestions.is_empty() {
            let mut items: Vec<String> = suggestions.iter().map(|s| s.label()).collect();
            items.push(format!("Search project titles for '{}'", text.trim()));

            let choice = prompt_select("Pick a species", items).await?;
            if let Some(suggestion) = suggestions.get(choice) {
                controller.select_suggestion(suggestion).await;
            }
        }

        search_until_settled(&controller, &fix, output).await?;

        if !prompt_confirm("Search again?", true).await? {
            break;
        }
    }

    Ok(())
}

/// Run the search, offering a wider radius while nothing is in the area
async fn search_until_settled<D>(
    controller: &SearchController<D>,
    fix: &LocationFix,
    output: &OutputWriter,
) -> Result<()>
where
    D: DirectoryService + ?Sized,
{
    loop {
        let spinner = create_spinner("Searching survey directory...", output.is_json());
        let state = controller.search().await;
        spinner.finish_and_clear();

        let state = match state {
            Ok(state) => state,
            Err(SurveyError::EmptyQuery) => {
                output.warning("Type a keyword or pick a species first.");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        match state {
            SessionState::Error { message } => {
                output.warning(message);
                return Ok(());
            }
            SessionState::NoResults { suggest_wider_radius: true, .. } => {
                super::search::render_state(state, fix, false, output)?;
                if !prompt_confirm("Increase the search radius?", true).await? {
                    return Ok(());
                }

                let current = controller.criteria().await.radius_meters;
                let radius = prompt_radius(current * 2.0).await?;
                controller.set_radius(radius).await;
            }
            state => return super::search::render_state(state, fix, true, output),
        }
    }
}

async fn prompt_text(prompt: &'static str) -> Result<String> {
    let text = tokio::task::spawn_blocking(move || {
        Input::<String>::with_theme(&ColorfulTheme::default()).with_prompt(prompt).interact_text()
    })
    .await??;
    Ok(text)
}

async fn prompt_select(prompt: &'static str, items: Vec<String>) -> Result<usize> {
    let choice = tokio::task::spawn_blocking(move || {
        Select::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .items(&items)
            .default(0)
            .interact()
    })
    .await??;
    Ok(choice)
}

async fn prompt_confirm(prompt: &'static str, default: bool) -> Result<bool> {
    let confirmed = tokio::task::spawn_blocking(move || {
        Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .default(default)
            .interact()
    })
    .await??;
    Ok(confirmed)
}

async fn prompt_radius(suggested: f64) -> Result<f64> {
    let radius = tokio::task::spawn_blocking(move || {
        Input::<f64>::with_theme(&ColorfulTheme::default())
            .with_prompt("Radius in meters")
            .default(suggested)
            .validate_with(|value: &f64| validate_radius(*value).map(|_| ()).map_err(|e| e.to_string()))
            .interact_text()
    })
    .await??;
    Ok(radius)
}
