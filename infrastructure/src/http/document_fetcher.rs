//! Page fetcher that pulls embedded structured data out of HTML.
//!
//! Listing pages ship their state as JSON inside a `<script>` container
//! (`__NEXT_DATA__` and friends). The fetcher downloads the page, looks for
//! the configured containers in order and, when none has data yet, waits a
//! settle delay and polls again a bounded number of times.

use super::{MAX_PAGE_SIZE, map_reqwest_error, read_bounded};
use async_trait::async_trait;
use parcel_application::ports::document_fetch::DocumentFetchPort;
use parcel_application::ports::fetch_error::FetchError;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE};
use scraper::{Html, Selector};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Polling and container settings
#[derive(Debug, Clone)]
pub struct DocumentFetcherConfig {
    /// Script element ids to look in, in priority order
    pub container_ids: Vec<String>,
    /// Wait between polls
    pub settle_delay: Duration,
    /// Page loads per fetch, at least one
    pub max_polls: u32,
    pub request_timeout: Duration,
}

impl Default for DocumentFetcherConfig {
    fn default() -> Self {
        Self {
            container_ids: vec!["__NEXT_DATA__".to_string()],
            settle_delay: Duration::from_millis(500),
            max_polls: 3,
            request_timeout: Duration::from_secs(15),
        }
    }
}

pub struct HttpDocumentFetcher {
    client: reqwest::Client,
    config: DocumentFetcherConfig,
}

impl HttpDocumentFetcher {
    pub fn new(user_agent: &str, config: DocumentFetcherConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| FetchError::Infrastructure(format!("HTTP client: {}", e)))?;
        Ok(Self { client, config })
    }

    async fn fetch_html(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .timeout(self.config.request_timeout)
            .header(ACCEPT, "text/html,application/xhtml+xml")
            .header(ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Transport(format!(
                "HTTP {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }
        let body = read_bounded(response, MAX_PAGE_SIZE).await?;
        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

#[async_trait]
impl DocumentFetchPort for HttpDocumentFetcher {
    async fn fetch_document(&self, url: &str) -> Result<Option<Value>, FetchError> {
        let polls = self.config.max_polls.max(1);
        for poll in 0..polls {
            if poll > 0 {
                tokio::time::sleep(self.config.settle_delay).await;
            }
            let html = self.fetch_html(url).await?;
            if let Some(blob) = extract_embedded_data(&html, &self.config.container_ids) {
                return Ok(Some(blob));
            }
            debug!("No embedded data in {} (poll {}/{})", url, poll + 1, polls);
        }
        Ok(None)
    }
}

/// Find the first non-empty JSON container in a page.
///
/// Named containers win; otherwise any `application/json` script holding an
/// object is used.
pub fn extract_embedded_data(html: &str, container_ids: &[String]) -> Option<Value> {
    let document = Html::parse_document(html);

    for id in container_ids {
        let css = format!("script[id=\"{}\"]", id);
        let Ok(selector) = Selector::parse(&css) else {
            continue;
        };
        let found = document
            .select(&selector)
            .find_map(|element| parse_container(&element.text().collect::<String>()));
        if found.is_some() {
            return found;
        }
    }

    let selector = Selector::parse(r#"script[type="application/json"]"#).ok()?;
    document
        .select(&selector)
        .find_map(|element| parse_container(&element.text().collect::<String>()))
}

fn parse_container(text: &str) -> Option<Value> {
    let value: Value = serde_json::from_str(text.trim()).ok()?;
    match &value {
        Value::Object(map) if !map.is_empty() => Some(value),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ids() -> Vec<String> {
        vec!["__NEXT_DATA__".to_string(), "hdpApolloPreloadedData".to_string()]
    }

    #[test]
    fn test_extracts_named_container() {
        let html = r#"<html><head>
            <script id="__NEXT_DATA__" type="application/json">{"props": {"pageProps": {"zpid": 3}}}</script>
        </head><body></body></html>"#;
        assert_eq!(
            extract_embedded_data(html, &ids()),
            Some(json!({"props": {"pageProps": {"zpid": 3}}}))
        );
    }

    #[test]
    fn test_skips_empty_container_for_next_id() {
        let html = r#"<html><body>
            <script id="__NEXT_DATA__" type="application/json">{}</script>
            <script id="hdpApolloPreloadedData">{"apiCache": "{}"}</script>
        </body></html>"#;
        assert_eq!(
            extract_embedded_data(html, &ids()),
            Some(json!({"apiCache": "{}"}))
        );
    }

    #[test]
    fn test_falls_back_to_any_json_script() {
        let html = r#"<html><body>
            <script type="application/json">{"cat1": {"searchResults": {"listResults": []}}}</script>
        </body></html>"#;
        assert!(extract_embedded_data(html, &ids()).is_some());
    }

    #[test]
    fn test_page_without_data() {
        let html = "<html><body><p>Access denied</p></body></html>";
        assert_eq!(extract_embedded_data(html, &ids()), None);
    }
}
