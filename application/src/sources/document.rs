//! Document source: embedded page data.
//!
//! The page for an address either resolves straight to a property (detail
//! cache embedded as JSON-in-a-string) or to a search page listing nearby
//! results. Both are recognized through ordered paths.

use super::{SourceError, SourcePayload, SourceQuery};
use crate::ports::document_fetch::DocumentFetchPort;
use async_trait::async_trait;
use parcel_domain::extraction::path::{parse_embedded_json, walk};
use parcel_domain::{Query, SourceAttempt, SourceDescriptor};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Detail caches keyed by query string, each entry holding `property`
const DETAIL_CACHE_PATHS: &[&str] = &[
    "props.pageProps.componentProps.gdpClientCache",
    "props.pageProps.gdpClientCache",
    "gdpClientCache",
];

/// Direct detail record locations
const DETAIL_PATHS: &[&str] = &[
    "props.pageProps.initialData.property",
    "props.pageProps.property",
    "property",
];

/// Search result list locations
const SEARCH_LIST_PATHS: &[&str] = &[
    "props.pageProps.searchPageState.cat1.searchResults.listResults",
    "props.pageProps.searchPageState.cat1.searchResults.mapResults",
    "searchPageState.cat1.searchResults.listResults",
    "cat1.searchResults.listResults",
    "searchResults.listResults",
    "listResults",
];

/// Configuration for a [`DocumentSource`]
#[derive(Debug, Clone)]
pub struct DocumentSourceConfig {
    pub id: String,
    /// URL with a `{query}` placeholder for the slugged address
    pub url_template: String,
}

impl Default for DocumentSourceConfig {
    fn default() -> Self {
        Self {
            id: "zillow-page".to_string(),
            url_template: "https://www.zillow.com/homes/{query}_rb/".to_string(),
        }
    }
}

pub struct DocumentSource {
    config: DocumentSourceConfig,
    descriptor: SourceDescriptor,
    fetcher: Arc<dyn DocumentFetchPort>,
}

impl DocumentSource {
    pub fn new(config: DocumentSourceConfig, fetcher: Arc<dyn DocumentFetchPort>) -> Self {
        let descriptor = SourceDescriptor::document(config.id.clone());
        Self {
            config,
            descriptor,
            fetcher,
        }
    }

    /// Page URL for a variant of the query
    pub fn url_for(&self, variant: &str, query: &Query) -> String {
        let slug = slugify(&[variant, query.city(), query.state(), query.zip_or_empty()]);
        self.config.url_template.replace("{query}", &slug)
    }
}

#[async_trait]
impl SourceQuery for DocumentSource {
    fn descriptor(&self) -> &SourceDescriptor {
        &self.descriptor
    }

    async fn fetch(
        &self,
        attempt: &SourceAttempt,
        query: &Query,
    ) -> Result<SourcePayload, SourceError> {
        let url = self.url_for(&attempt.variant, query);
        debug!("Fetching document {}", url);

        let blob = self
            .fetcher
            .fetch_document(&url)
            .await?
            .ok_or_else(|| SourceError::Empty("page exposed no embedded data".to_string()))?;

        classify_document(&blob)
    }
}

/// Classify an embedded-data blob as a detail record or a search list.
///
/// Detail records take precedence: a page that resolved to a property is a
/// stronger signal than a list of nearby results.
pub fn classify_document(blob: &Value) -> Result<SourcePayload, SourceError> {
    if let Some(property) = detail_from_cache(blob) {
        return Ok(SourcePayload::Detail(property));
    }
    let detail = DETAIL_PATHS
        .iter()
        .filter_map(|path| walk(blob, path))
        .find(|value| value.is_object());
    if let Some(property) = detail {
        return Ok(SourcePayload::Detail(property.clone()));
    }

    let list = SEARCH_LIST_PATHS
        .iter()
        .filter_map(|path| walk(blob, path))
        .find_map(|value| value.as_array().filter(|items| !items.is_empty()));
    if let Some(items) = list {
        return Ok(SourcePayload::SearchResults(items.clone()));
    }

    Err(SourceError::Empty(
        "no property record or search results in document".to_string(),
    ))
}

fn detail_from_cache(blob: &Value) -> Option<Value> {
    let cache = DETAIL_CACHE_PATHS
        .iter()
        .filter_map(|path| walk(blob, path))
        .find_map(parse_embedded_json)?;
    let Value::Object(entries) = cache else {
        return None;
    };
    entries
        .values()
        .find_map(|entry| walk(entry, "property").filter(|p| p.is_object()).cloned())
}

/// `"123 Main St", "Springfield"` → `123-Main-St-Springfield`
fn slugify(parts: &[&str]) -> String {
    let joined = parts
        .iter()
        .filter(|p| !p.trim().is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ");

    let mut slug = String::with_capacity(joined.len());
    for c in joined.chars() {
        if c.is_alphanumeric() {
            slug.push(c);
        } else if (c.is_whitespace() || c == ',' || c == '-') && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_matches('-').to_string()
}
