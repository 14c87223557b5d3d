//! Error types for biosurvey

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SurveyError {
    // Directory service errors
    #[error("Directory service request '{operation}' failed: {reason}")]
    Transport { operation: String, reason: String },

    #[error("Directory service returned status {status} for '{operation}'")]
    Status { operation: String, status: u16 },

    #[error("Failed to decode '{operation}' response: {reason}")]
    Decode { operation: String, reason: String },

    // Search input errors
    #[error("Invalid coordinate ({lat}, {lon}): {reason}")]
    InvalidCoordinate { lat: f64, lon: f64, reason: String },

    #[error("Invalid search radius {radius}: must be a non-negative number of meters")]
    InvalidRadius { radius: f64 },

    #[error("Search keyword is empty and no species is selected")]
    EmptyQuery,

    // Location errors
    #[error("Location unavailable: {reason}")]
    LocationUnavailable { reason: String },

    // Configuration errors
    #[error("Missing required configuration: {key}")]
    ConfigMissing { key: String },

    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SurveyError {
    /// Whether this error came from talking to the directory service
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            SurveyError::Transport { .. } | SurveyError::Status { .. } | SurveyError::Decode { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, SurveyError>;
