//! API source: JSON endpoints tried under several parameter shapes.

use super::{SourceError, SourcePayload, SourceQuery};
use crate::ports::api_fetch::ApiFetchPort;
use async_trait::async_trait;
use parcel_domain::{EndpointShape, Query, SourceAttempt, SourceDescriptor};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Configuration for an [`ApiSource`]
#[derive(Debug, Clone)]
pub struct ApiSourceConfig {
    pub id: String,
    /// Base URL the shape paths are appended to
    pub base_url: String,
    /// Extra request headers (API key, host)
    pub headers: Vec<(String, String)>,
    /// Shapes in priority order
    pub shapes: Vec<EndpointShape>,
    pub request_timeout: Duration,
}

impl Default for ApiSourceConfig {
    fn default() -> Self {
        Self {
            id: "zillow-api".to_string(),
            base_url: "https://zillow-com1.p.rapidapi.com".to_string(),
            headers: Vec::new(),
            shapes: EndpointShape::default_shapes(),
            request_timeout: Duration::from_secs(20),
        }
    }
}

pub struct ApiSource {
    config: ApiSourceConfig,
    descriptor: SourceDescriptor,
    fetcher: Arc<dyn ApiFetchPort>,
}

impl ApiSource {
    pub fn new(config: ApiSourceConfig, fetcher: Arc<dyn ApiFetchPort>) -> Self {
        let descriptor = SourceDescriptor::api(config.id.clone(), config.shapes.clone());
        Self {
            config,
            descriptor,
            fetcher,
        }
    }

    /// Request URL for a shape and variant
    pub fn url_for(
        &self,
        shape: &EndpointShape,
        variant: &str,
        query: &Query,
    ) -> Result<Url, SourceError> {
        let endpoint = format!("{}{}", self.config.base_url.trim_end_matches('/'), shape.path);
        let params = shape
            .style
            .build(variant, query.city(), query.state(), query.zip_or_empty());
        Url::parse_with_params(&endpoint, &params)
            .map_err(|e| SourceError::Infrastructure(format!("invalid URL {}: {}", endpoint, e)))
    }
}

#[async_trait]
impl SourceQuery for ApiSource {
    fn descriptor(&self) -> &SourceDescriptor {
        &self.descriptor
    }

    async fn fetch(
        &self,
        attempt: &SourceAttempt,
        query: &Query,
    ) -> Result<SourcePayload, SourceError> {
        let shape = attempt.shape.as_ref().ok_or(SourceError::MissingShape)?;
        let url = self.url_for(shape, &attempt.variant, query)?;
        debug!("Requesting {}", url);

        let response = self
            .fetcher
            .get_json(url.as_str(), &self.config.headers, self.config.request_timeout)
            .await?;

        if !response.is_success() {
            return Err(SourceError::Status(response.status));
        }
        let body = response
            .body
            .ok_or_else(|| SourceError::Malformed("empty response body".to_string()))?;

        classify_body(body)
    }
}

/// Split an API body into a single record or a list of search results.
pub fn classify_body(body: Value) -> Result<SourcePayload, SourceError> {
    let list = match body {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("props") {
            Some(Value::Array(items)) => items,
            Some(other) => {
                map.insert("props".to_string(), other);
                return detail(map);
            }
            None => return detail(map),
        },
        other => {
            return Err(SourceError::Malformed(format!(
                "expected object or array, got {}",
                other
            )));
        }
    };

    if list.is_empty() {
        return Err(SourceError::Empty("search returned no results".to_string()));
    }
    Ok(SourcePayload::SearchResults(list))
}

fn detail(map: serde_json::Map<String, Value>) -> Result<SourcePayload, SourceError> {
    if map.is_empty() {
        return Err(SourceError::Empty("empty record".to_string()));
    }
    Ok(SourcePayload::Detail(Value::Object(map)))
}
