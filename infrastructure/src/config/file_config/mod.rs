//! Raw TOML configuration data types
//!
//! These structs mirror the TOML file. Enum-like fields stay strings here and
//! are parsed into domain types with fallbacks, so a typo degrades to a
//! warning instead of failing the load.

mod access;
mod api;
mod document;
mod engine;
mod output;

pub use access::FileAccessConfig;
pub use api::{FileApiConfig, FileShapeConfig};
pub use document::FileDocumentConfig;
pub use engine::FileEngineConfig;
pub use output::FileOutputConfig;

use parcel_application::ResolutionConfig;
use parcel_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration that cannot be used at all
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("{count} configuration error(s): {summary}")]
    Invalid { count: usize, summary: String },
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Attempt timeout, enumeration order, zero-score policy
    pub engine: FileEngineConfig,
    pub api: FileApiConfig,
    pub document: FileDocumentConfig,
    pub access: FileAccessConfig,
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        issues.extend(self.engine.parse_attempt_timeout().1);
        issues.extend(self.engine.parse_source_order().1);
        issues.extend(self.engine.parse_zero_score_policy().1);
        issues.extend(self.api.validate());
        issues.extend(self.document.validate());

        if !self.api.enabled && !self.document.enabled {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::NoSources,
                "both [api] and [document] are disabled; nothing can be resolved",
            ));
        }

        issues
    }

    /// Validate and keep the configuration only if it has no errors.
    ///
    /// Warnings are returned alongside for the caller to report.
    pub fn into_validated(self) -> Result<(Self, Vec<ConfigIssue>), ConfigValidationError> {
        let issues = self.validate();
        let errors: Vec<&ConfigIssue> = issues.iter().filter(|i| i.is_error()).collect();
        if !errors.is_empty() {
            return Err(ConfigValidationError::Invalid {
                count: errors.len(),
                summary: errors
                    .iter()
                    .map(|i| i.message.as_str())
                    .collect::<Vec<_>>()
                    .join("; "),
            });
        }
        Ok((self, issues))
    }

    /// Build the immutable engine configuration.
    pub fn to_resolution_config(&self) -> ResolutionConfig {
        ResolutionConfig::default()
            .with_attempt_timeout(self.engine.parse_attempt_timeout().0)
            .with_source_order(self.engine.parse_source_order().0)
            .with_zero_score_policy(self.engine.parse_zero_score_policy().0)
            .with_site_base_url(self.document.site_base_url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parcel_domain::{OutputFormat, SourceOrder, ZeroScorePolicy};
    use std::time::Duration;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[engine]
attempt_timeout_secs = 8
source_order = "source_first"
zero_score_policy = "reject"

[api]
key = "abc"

[[api.shapes]]
path = "/propertyExtendedSearch"
style = "location"

[document]
settle_delay_ms = 100
container_ids = ["__NEXT_DATA__", "hdpApolloPreloadedData"]

[access]
key = "gate"

[output]
format = "json"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.engine.attempt_timeout_secs, 8);
        assert_eq!(config.api.key.as_deref(), Some("abc"));
        assert_eq!(config.api.shapes.len(), 1);
        assert_eq!(config.document.container_ids.len(), 2);
        assert_eq!(config.document.max_polls, 3);
        assert_eq!(config.access.key.as_deref(), Some("gate"));
        assert_eq!(config.output.format, Some(OutputFormat::Json));

        let resolution = config.to_resolution_config();
        assert_eq!(resolution.attempt_timeout, Duration::from_secs(8));
        assert_eq!(resolution.source_order, SourceOrder::SourceFirst);
        assert_eq!(resolution.zero_score_policy, ZeroScorePolicy::Reject);
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: FileConfig = toml::from_str("[engine]\nattempt_timeout_secs = 5\n").unwrap();
        assert_eq!(config.engine.attempt_timeout_secs, 5);
        assert_eq!(config.engine.source_order, "variant_first");
        assert!(config.api.enabled);
        assert!(config.document.enabled);
        assert!(config.output.color);
    }

    #[test]
    fn test_default_only_warns_about_missing_api_key() {
        let issues = FileConfig::default().validate();
        assert_eq!(issues.len(), 1);
        assert!(matches!(
            &issues[0].code,
            ConfigIssueCode::EmptyValue { field } if field == "api.key"
        ));
    }

    #[test]
    fn test_no_sources_is_error() {
        let mut config = FileConfig::default();
        config.api.enabled = false;
        config.document.enabled = false;

        let issues = config.validate();
        assert!(issues.iter().any(|i| i.code == ConfigIssueCode::NoSources));

        let err = config.into_validated().unwrap_err();
        assert!(err.to_string().contains("1 configuration error"));
    }

    #[test]
    fn test_into_validated_keeps_warnings() {
        let (config, warnings) = FileConfig::default().into_validated().unwrap();
        assert_eq!(config, FileConfig::default());
        assert_eq!(warnings.len(), 1);
    }
}
