// Domain Error Types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid priority class: {0} (expected 1, 2 or 3)")]
    InvalidPriorityClass(i64),

    #[error("Identity must not be empty")]
    EmptyIdentity,

    #[error("Validation error: {0}")]
    Validation(String),
}
