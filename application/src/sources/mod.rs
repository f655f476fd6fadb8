//! Source queries
//!
//! A [`SourceQuery`] turns one [`SourceAttempt`] into a raw payload. Two
//! implementations exist:
//!
//! - [`DocumentSource`](document::DocumentSource): page URL from the variant,
//!   embedded data blob classified as a detail record or a search list
//! - [`ApiSource`](api::ApiSource): endpoint shape parameters from the
//!   variant, JSON body from the API

pub mod api;
pub mod document;

use crate::ports::fetch_error::FetchError;
use async_trait::async_trait;
use parcel_domain::{Query, SourceAttempt, SourceDescriptor};
use serde_json::Value;
use thiserror::Error;

/// What a source returned for an attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SourcePayload {
    /// A single property record
    Detail(Value),
    /// A list of search results to choose from
    SearchResults(Vec<Value>),
}

/// Why an attempt produced no payload.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    #[error("Timed out")]
    Timeout,

    #[error("Unavailable: {0}")]
    Unavailable(String),

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("Malformed payload: {0}")]
    Malformed(String),

    #[error("Empty payload: {0}")]
    Empty(String),

    #[error("Attempt has no endpoint shape")]
    MissingShape,

    #[error("Infrastructure failure: {0}")]
    Infrastructure(String),
}

impl SourceError {
    /// Whether this error should abort the whole resolution
    pub fn is_fatal(&self) -> bool {
        matches!(self, SourceError::Infrastructure(_))
    }
}

impl From<FetchError> for SourceError {
    fn from(e: FetchError) -> Self {
        match e {
            FetchError::Timeout => SourceError::Timeout,
            FetchError::Transport(msg) => SourceError::Unavailable(msg),
            FetchError::Malformed(msg) => SourceError::Malformed(msg),
            FetchError::Infrastructure(msg) => SourceError::Infrastructure(msg),
        }
    }
}

/// A queryable data source.
#[async_trait]
pub trait SourceQuery: Send + Sync {
    /// Static id, kind and shapes of this source
    fn descriptor(&self) -> &SourceDescriptor;

    /// Run one attempt for `query`
    async fn fetch(
        &self,
        attempt: &SourceAttempt,
        query: &Query,
    ) -> Result<SourcePayload, SourceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_mapping() {
        assert_eq!(SourceError::from(FetchError::Timeout), SourceError::Timeout);
        assert_eq!(
            SourceError::from(FetchError::Transport("reset".into())),
            SourceError::Unavailable("reset".into())
        );
        assert!(SourceError::from(FetchError::Infrastructure("x".into())).is_fatal());
        assert!(!SourceError::Status(503).is_fatal());
    }
}
