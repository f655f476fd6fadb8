//! Document source configuration from TOML (`[document]` section)

use crate::http::DocumentFetcherConfig;
use parcel_application::DocumentSourceConfig;
use parcel_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw document source configuration from TOML
///
/// # Example
///
/// ```toml
/// [document]
/// enabled = true
/// url_template = "https://www.zillow.com/homes/{query}_rb/"
/// site_base = "https://www.zillow.com"
/// container_ids = ["__NEXT_DATA__"]
/// settle_delay_ms = 500
/// max_polls = 3
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDocumentConfig {
    pub enabled: bool,
    pub id: String,
    /// Must contain `{query}`
    pub url_template: String,
    /// Root for relative property links
    pub site_base: String,
    pub container_ids: Vec<String>,
    pub settle_delay_ms: u64,
    pub max_polls: u32,
    /// Overrides the default browser-like User-Agent
    pub user_agent: Option<String>,
}

impl Default for FileDocumentConfig {
    fn default() -> Self {
        let source = DocumentSourceConfig::default();
        Self {
            enabled: true,
            id: source.id,
            url_template: source.url_template,
            site_base: "https://www.zillow.com".to_string(),
            container_ids: vec!["__NEXT_DATA__".to_string()],
            settle_delay_ms: 500,
            max_polls: 3,
            user_agent: None,
        }
    }
}

impl FileDocumentConfig {
    pub fn validate(&self) -> Vec<ConfigIssue> {
        if !self.enabled {
            return vec![];
        }
        let mut issues = Vec::new();
        if !self.url_template.contains("{query}") {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyValue {
                    field: "document.url_template".to_string(),
                },
                format!(
                    "document.url_template '{}' has no {{query}} placeholder",
                    self.url_template
                ),
            ));
        }
        if self.max_polls == 0 {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::OutOfRange {
                    field: "document.max_polls".to_string(),
                },
                "document.max_polls is 0; the page is still loaded once",
            ));
        }
        if self.container_ids.iter().all(|id| id.trim().is_empty()) {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::EmptyValue {
                    field: "document.container_ids".to_string(),
                },
                "document.container_ids is empty; only generic JSON scripts are read",
            ));
        }
        issues
    }

    /// Blank site base disables link absolutizing
    pub fn site_base_url(&self) -> Option<String> {
        let base = self.site_base.trim();
        (!base.is_empty()).then(|| base.to_string())
    }

    pub fn to_source_config(&self) -> DocumentSourceConfig {
        DocumentSourceConfig {
            id: self.id.clone(),
            url_template: self.url_template.clone(),
        }
    }

    pub fn to_fetcher_config(&self, request_timeout: Duration) -> DocumentFetcherConfig {
        DocumentFetcherConfig {
            container_ids: self
                .container_ids
                .iter()
                .filter(|id| !id.trim().is_empty())
                .cloned()
                .collect(),
            settle_delay: Duration::from_millis(self.settle_delay_ms),
            max_polls: self.max_polls.max(1),
            request_timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(FileDocumentConfig::default().validate().is_empty());
    }

    #[test]
    fn test_template_without_placeholder_is_error() {
        let config = FileDocumentConfig {
            url_template: "https://example.com/search".to_string(),
            ..Default::default()
        };
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert!(issues[0].is_error());
    }

    #[test]
    fn test_fetcher_config() {
        let config = FileDocumentConfig {
            container_ids: vec!["".to_string(), "__NEXT_DATA__".to_string()],
            settle_delay_ms: 250,
            max_polls: 0,
            ..Default::default()
        };
        let fetcher = config.to_fetcher_config(Duration::from_secs(5));
        assert_eq!(fetcher.container_ids, vec!["__NEXT_DATA__".to_string()]);
        assert_eq!(fetcher.settle_delay, Duration::from_millis(250));
        assert_eq!(fetcher.max_polls, 1);
        assert_eq!(fetcher.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_blank_site_base() {
        let config = FileDocumentConfig {
            site_base: "  ".to_string(),
            ..Default::default()
        };
        assert_eq!(config.site_base_url(), None);
    }
}
