//! Engine error handling
//!
//! Wraps calculator failures from the shared crate and adds the failure
//! modes of the stateful session: missing entries and storage problems.
//! Every variant is recoverable; the session stays usable after any error.

use health_metrics_shared::errors::MetricError;
use health_metrics_shared::validation::user_message;
use thiserror::Error;

/// Engine error type
#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Metric(#[from] MetricError),

    #[error("Entry not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error")]
    Config(#[from] config::ConfigError),
}

impl EngineError {
    /// Stable machine-readable code for the error kind
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::Metric(MetricError::MissingInput(_)) => "MISSING_INPUT",
            EngineError::Metric(MetricError::Domain(_)) => "DOMAIN_ERROR",
            EngineError::Metric(MetricError::Validation(_)) => "VALIDATION_ERROR",
            EngineError::NotFound(_) => "NOT_FOUND",
            EngineError::Storage(_) => "STORAGE_ERROR",
            EngineError::Serialization(_) => "SERIALIZATION_ERROR",
            EngineError::Config(_) => "CONFIG_ERROR",
        }
    }

    /// Message suitable for showing next to the form that caused it
    pub fn user_message(&self) -> String {
        match self {
            EngineError::Metric(err) => user_message(err),
            EngineError::NotFound(_) => "That entry no longer exists.".to_string(),
            _ => "Your data could not be saved. Please try again.".to_string(),
        }
    }
}

impl From<std::io::Error> for EngineError {
    fn from(err: std::io::Error) -> Self {
        EngineError::Storage(err.to_string())
    }
}

/// Result type alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
