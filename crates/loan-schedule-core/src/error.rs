use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("Invalid configuration: {field} — {reason}")]
    InvalidConfiguration { field: String, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl ScheduleError {
    /// Shorthand for the fatal configuration variant.
    pub fn invalid(field: &str, reason: &str) -> Self {
        ScheduleError::InvalidConfiguration {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for ScheduleError {
    fn from(e: serde_json::Error) -> Self {
        ScheduleError::SerializationError(e.to_string())
    }
}
