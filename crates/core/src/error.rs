// Central Error Type for the Application

use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Domain error: {0}")]
    Domain(#[from] crate::domain::DomainError),

    /// Routine outcome: no waiting entry carries the requested identity
    #[error("Not found: {0}")]
    NotFound(String),

    /// Routine outcome: the waiting set has no entries
    #[error("Queue is empty")]
    Empty,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Empty and not-found are expected control flow, not failures
    pub fn is_routine(&self) -> bool {
        matches!(self, AppError::Empty | AppError::NotFound(_))
    }
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;
