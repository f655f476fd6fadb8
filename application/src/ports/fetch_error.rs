//! Errors shared by the fetch ports.

use thiserror::Error;

/// Errors a fetch adapter can report.
///
/// Everything except [`FetchError::Infrastructure`] only means "no candidate
/// from this attempt"; the engine moves on to the next one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Request timed out")]
    Timeout,

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Malformed response: {0}")]
    Malformed(String),

    #[error("Fetch infrastructure failure: {0}")]
    Infrastructure(String),
}
