//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid query: {0} is required")]
    MissingField(&'static str),

    #[error("Invalid endpoint shape: {0}")]
    InvalidShape(String),
}
