//! Error types for evplan.

use thiserror::Error;

/// Errors that can occur in evplan operations.
#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Event not found: {0}")]
    EventNotFound(String),

    #[error(transparent)]
    Device(#[from] crate::device::DeviceError),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for evplan operations.
pub type PlannerResult<T> = Result<T, PlannerError>;
