use biosurvey_core::SurveyError;
use console::style;
use std::fmt;
use std::io;

/// Error with context and suggestions for the terminal
pub struct CliError {
    pub message: String,
    pub context: Option<String>,
    pub suggestions: Vec<String>,
    pub help_command: Option<String>,
}

impl CliError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
            suggestions: Vec::new(),
            help_command: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_help(mut self, command: impl Into<String>) -> Self {
        self.help_command = Some(command.into());
        self
    }

    pub fn display(&self) {
        eprintln!("{} {}\n", style("✗").red().bold(), style(&self.message).red().bold());

        if let Some(ref context) = self.context {
            eprintln!("{}", context);
            eprintln!();
        }

        if !self.suggestions.is_empty() {
            eprintln!("{}", style("To fix this:").yellow().bold());
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                eprintln!("  {}. {}", i + 1, suggestion);
            }
            eprintln!();
        }

        if let Some(ref help_cmd) = self.help_command {
            eprintln!("{} {}", style("Need help?").cyan(), style(help_cmd).cyan().bold());
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Debug for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Nothing to search for
pub fn empty_query() -> CliError {
    CliError::new("Nothing to search for")
        .with_context("Give a project keyword or a species taxon id.")
        .with_suggestion("Search by keyword: biosurvey search Koala")
        .with_suggestion("Find a taxon id: biosurvey species koala")
        .with_suggestion("Then: biosurvey search --species-id <ID>")
        .with_help("Run: biosurvey search --help")
}

/// A directory service call failed
pub fn directory_unavailable(message: &str) -> CliError {
    CliError::new("Search failed")
        .with_context(message.to_string())
        .with_suggestion("Check your network connection and try again")
        .with_suggestion("Check the service URL: biosurvey config")
        .with_help("Set RUST_LOG=debug for details")
}

/// Config file given with --config does not exist
pub fn config_file_not_found(path: &str) -> CliError {
    CliError::new("Configuration file not found")
        .with_context(format!("The specified configuration file does not exist.\n\nPath: {}", path))
        .with_suggestion("Check the file path and try again")
        .with_suggestion(format!("Or drop --config to use ./{} when present", crate::config_loader::DEFAULT_CONFIG_FILE))
        .with_help("Run: biosurvey config")
}

/// Invalid configuration or flag value
pub fn invalid_config(key: &str, reason: &str) -> CliError {
    CliError::new(format!("Invalid configuration: {}", key))
        .with_context(format!("Configuration value is invalid.\n\nReason: {}", reason))
        .with_suggestion("Check biosurvey.toml and BIOSURVEY_* environment variables")
        .with_help("Run: biosurvey config")
}

/// Convert anyhow::Error to CliError with context
pub fn from_anyhow(error: anyhow::Error) -> CliError {
    let error = match error.downcast::<CliError>() {
        Ok(cli_error) => return cli_error,
        Err(error) => error,
    };

    if let Some(survey_error) = error.downcast_ref::<SurveyError>() {
        return from_survey_error(survey_error);
    }

    if let Some(dialoguer::Error::IO(io_error)) = error.downcast_ref::<dialoguer::Error>() {
        return from_prompt_io(io_error);
    }

    CliError::new(format!("{:#}", error))
}

/// Prompts report a missing terminal as `NotConnected`
fn from_prompt_io(error: &io::Error) -> CliError {
    if error.kind() == io::ErrorKind::NotConnected {
        return CliError::new("Interactive mode needs a terminal")
            .with_context(format!("Error: {}", error))
            .with_suggestion("Run biosurvey interactive from a terminal")
            .with_suggestion("Or use: biosurvey search <keyword>");
    }

    CliError::new("Prompt failed").with_context(format!("Error: {}", error))
}

fn from_survey_error(error: &SurveyError) -> CliError {
    match error {
        SurveyError::EmptyQuery => empty_query(),
        SurveyError::ConfigInvalid { key, reason } => invalid_config(key, reason),
        SurveyError::ConfigMissing { key } => invalid_config(key, "missing value"),
        SurveyError::InvalidCoordinate { .. } | SurveyError::InvalidRadius { .. } => {
            CliError::new(error.to_string())
                .with_suggestion("Latitude must be within -90..90 and longitude within -180..180")
                .with_suggestion("Radius must be a non-negative number of meters")
                .with_help("Run: biosurvey search --help")
        }
        _ if error.is_transport() => {
            directory_unavailable(biosurvey_search::GENERIC_ERROR_MESSAGE)
        }
        _ => CliError::new(error.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_error_survives_anyhow() {
        let error: anyhow::Error = empty_query().into();
        let converted = from_anyhow(error);
        assert_eq!(converted.message, "Nothing to search for");
        assert_eq!(converted.suggestions.len(), 3);
    }

    #[test]
    fn test_transport_error_is_generic() {
        let error: anyhow::Error =
            SurveyError::Status { operation: "getprojects".to_string(), status: 502 }.into();
        let converted = from_anyhow(error);
        assert_eq!(converted.message, "Search failed");
        assert_eq!(converted.context.as_deref(), Some(biosurvey_search::GENERIC_ERROR_MESSAGE));
    }

    #[test]
    fn test_config_error_mapping() {
        let error: anyhow::Error = SurveyError::ConfigInvalid {
            key: "kingdom".to_string(),
            reason: "Invalid kingdom: rocks".to_string(),
        }
        .into();
        assert_eq!(from_anyhow(error).message, "Invalid configuration: kingdom");
    }

    #[test]
    fn test_prompt_without_terminal() {
        let io_error = io::Error::new(io::ErrorKind::NotConnected, "not a terminal");
        let error: anyhow::Error = dialoguer::Error::IO(io_error).into();
        let converted = from_anyhow(error);
        assert_eq!(converted.message, "Interactive mode needs a terminal");
        assert_eq!(converted.suggestions.len(), 2);
    }

    #[test]
    fn test_other_prompt_io_failure_is_not_a_terminal_error() {
        let io_error = io::Error::new(io::ErrorKind::BrokenPipe, "IO error: broken pipe");
        let error: anyhow::Error = dialoguer::Error::IO(io_error).into();
        let converted = from_anyhow(error);
        assert_eq!(converted.message, "Prompt failed");
        assert!(converted.suggestions.is_empty());
        assert!(converted.context.unwrap().contains("broken pipe"));
    }

    #[test]
    fn test_unrelated_error_mentioning_terminal_is_passed_through() {
        let error = anyhow::anyhow!("backend is not a terminal node");
        assert_eq!(from_anyhow(error).message, "backend is not a terminal node");
    }
}
