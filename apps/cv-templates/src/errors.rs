use thiserror::Error;

/// Errors surfaced by the template engine.
///
/// Unknown template ids are not errors; lookups return `None` instead.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Structural validation failed. Carries every error, not just the first.
    #[error("Invalid template configuration: {}", .errors.join("; "))]
    InvalidConfiguration { errors: Vec<String> },

    #[error("Registry entry id '{entry_id}' does not match configuration id '{config_id}'")]
    EntryMismatch { entry_id: String, config_id: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
