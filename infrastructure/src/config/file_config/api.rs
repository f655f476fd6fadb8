//! API source configuration from TOML (`[api]` section)

use parcel_application::ApiSourceConfig;
use parcel_domain::{ConfigIssue, ConfigIssueCode, EndpointShape, ParamStyle};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw API source configuration from TOML
///
/// # Example
///
/// ```toml
/// [api]
/// enabled = true
/// base_url = "https://zillow-com1.p.rapidapi.com"
/// host = "zillow-com1.p.rapidapi.com"
/// key = "..."
///
/// [[api.shapes]]
/// path = "/property"
/// style = "full_address"     # full_address, components, location, street_and_zip
/// ```
///
/// Leaving `shapes` out keeps the built-in shape list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileApiConfig {
    pub enabled: bool,
    pub id: String,
    pub base_url: String,
    /// Sent as `x-rapidapi-host`
    pub host: Option<String>,
    /// Sent as `x-rapidapi-key`
    pub key: Option<String>,
    pub shapes: Vec<FileShapeConfig>,
}

/// One `[[api.shapes]]` entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileShapeConfig {
    pub path: String,
    pub style: String,
}

impl Default for FileApiConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            id: "zillow-api".to_string(),
            base_url: "https://zillow-com1.p.rapidapi.com".to_string(),
            host: Some("zillow-com1.p.rapidapi.com".to_string()),
            key: None,
            shapes: EndpointShape::default_shapes()
                .into_iter()
                .map(|shape| FileShapeConfig {
                    path: shape.path,
                    style: shape.style.to_string(),
                })
                .collect(),
        }
    }
}

impl FileApiConfig {
    /// Parse shape entries, dropping (and reporting) invalid ones.
    ///
    /// An empty result falls back to the built-in shapes.
    pub fn parse_shapes(&self) -> (Vec<EndpointShape>, Vec<ConfigIssue>) {
        let mut shapes = Vec::new();
        let mut issues = Vec::new();

        for (i, entry) in self.shapes.iter().enumerate() {
            let style = match entry.style.parse::<ParamStyle>() {
                Ok(style) => style,
                Err(_) => {
                    issues.push(ConfigIssue::warning(
                        ConfigIssueCode::InvalidEnumValue {
                            field: format!("api.shapes[{}].style", i),
                            value: entry.style.clone(),
                            valid_values: vec![
                                "full_address".to_string(),
                                "components".to_string(),
                                "location".to_string(),
                                "street_and_zip".to_string(),
                            ],
                        },
                        format!(
                            "api.shapes[{}].style: unknown value '{}', shape skipped",
                            i, entry.style
                        ),
                    ));
                    continue;
                }
            };
            match EndpointShape::new(entry.path.clone(), style) {
                Ok(shape) => shapes.push(shape),
                Err(e) => issues.push(ConfigIssue::warning(
                    ConfigIssueCode::InvalidEnumValue {
                        field: format!("api.shapes[{}].path", i),
                        value: entry.path.clone(),
                        valid_values: vec!["/<path>".to_string()],
                    },
                    format!("api.shapes[{}].path: {}, shape skipped", i, e),
                )),
            }
        }

        if shapes.is_empty() {
            shapes = EndpointShape::default_shapes();
        }
        (shapes, issues)
    }

    /// Issues that only matter when the source is enabled
    pub fn validate(&self) -> Vec<ConfigIssue> {
        if !self.enabled {
            return vec![];
        }
        let mut issues = self.parse_shapes().1;
        if self.base_url.trim().is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyValue {
                    field: "api.base_url".to_string(),
                },
                "api.base_url cannot be empty while the API source is enabled",
            ));
        }
        if self.key.as_deref().is_none_or(|k| k.trim().is_empty()) {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::EmptyValue {
                    field: "api.key".to_string(),
                },
                "api.key is not set; the API will likely reject every request",
            ));
        }
        issues
    }

    /// Request headers for every API call
    pub fn headers(&self) -> Vec<(String, String)> {
        let mut headers = Vec::new();
        if let Some(key) = self.key.as_deref().filter(|k| !k.is_empty()) {
            headers.push(("x-rapidapi-key".to_string(), key.to_string()));
        }
        if let Some(host) = self.host.as_deref().filter(|h| !h.is_empty()) {
            headers.push(("x-rapidapi-host".to_string(), host.to_string()));
        }
        headers
    }

    pub fn to_source_config(&self, request_timeout: Duration) -> ApiSourceConfig {
        ApiSourceConfig {
            id: self.id.clone(),
            base_url: self.base_url.clone(),
            headers: self.headers(),
            shapes: self.parse_shapes().0,
            request_timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_shapes_round_trip() {
        let (shapes, issues) = FileApiConfig::default().parse_shapes();
        assert!(issues.is_empty());
        assert_eq!(shapes, EndpointShape::default_shapes());
    }

    #[test]
    fn test_invalid_shapes_are_skipped() {
        let config: FileApiConfig = toml::from_str(
            r#"
[[shapes]]
path = "/property"
style = "components"

[[shapes]]
path = "property"
style = "location"

[[shapes]]
path = "/search"
style = "bogus"
"#,
        )
        .unwrap();

        let (shapes, issues) = config.parse_shapes();
        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0].style, ParamStyle::Components);
        assert_eq!(issues.len(), 2);
    }

    #[test]
    fn test_headers() {
        let config = FileApiConfig {
            key: Some("secret".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.headers(),
            vec![
                ("x-rapidapi-key".to_string(), "secret".to_string()),
                (
                    "x-rapidapi-host".to_string(),
                    "zillow-com1.p.rapidapi.com".to_string()
                ),
            ]
        );
    }

    #[test]
    fn test_missing_key_warns_only_when_enabled() {
        let enabled = FileApiConfig::default();
        assert_eq!(enabled.validate().len(), 1);
        assert!(!enabled.validate()[0].is_error());

        let disabled = FileApiConfig {
            enabled: false,
            ..Default::default()
        };
        assert!(disabled.validate().is_empty());
    }
}
