//! API fetch port
//!
//! A generic, timeout-bounded JSON HTTP GET.

use super::fetch_error::FetchError;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

/// Status and parsed body of an API response.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    /// `None` when the body was empty
    pub body: Option<Value>,
}

impl ApiResponse {
    pub fn new(status: u16, body: Option<Value>) -> Self {
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Port for JSON API requests.
///
/// Implementations must give up after `timeout` and report
/// [`FetchError::Timeout`]; non-2xx statuses are returned as responses,
/// not errors.
#[async_trait]
pub trait ApiFetchPort: Send + Sync {
    async fn get_json(
        &self,
        url: &str,
        headers: &[(String, String)],
        timeout: Duration,
    ) -> Result<ApiResponse, FetchError>;
}
