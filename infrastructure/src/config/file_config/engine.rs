//! Engine configuration from TOML (`[engine]` section)

use parcel_domain::{ConfigIssue, ConfigIssueCode, SourceOrder, ZeroScorePolicy};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw engine configuration from TOML
///
/// # Example
///
/// ```toml
/// [engine]
/// attempt_timeout_secs = 20
/// source_order = "variant_first"     # "variant_first" or "source_first"
/// zero_score_policy = "accept"       # "accept" or "reject"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileEngineConfig {
    /// Bound on each (source, variant, shape) attempt
    pub attempt_timeout_secs: u64,
    pub source_order: String,
    pub zero_score_policy: String,
}

impl Default for FileEngineConfig {
    fn default() -> Self {
        Self {
            attempt_timeout_secs: 20,
            source_order: "variant_first".to_string(),
            zero_score_policy: "accept".to_string(),
        }
    }
}

impl FileEngineConfig {
    /// Attempt timeout; zero falls back to the default with a warning.
    pub fn parse_attempt_timeout(&self) -> (Duration, Vec<ConfigIssue>) {
        if self.attempt_timeout_secs > 0 {
            return (Duration::from_secs(self.attempt_timeout_secs), vec![]);
        }
        let fallback = Self::default().attempt_timeout_secs;
        let issue = ConfigIssue::warning(
            ConfigIssueCode::OutOfRange {
                field: "engine.attempt_timeout_secs".to_string(),
            },
            format!(
                "engine.attempt_timeout_secs: must be positive, falling back to {}",
                fallback
            ),
        );
        (Duration::from_secs(fallback), vec![issue])
    }

    pub fn parse_source_order(&self) -> (SourceOrder, Vec<ConfigIssue>) {
        match self.source_order.parse::<SourceOrder>() {
            Ok(order) => (order, vec![]),
            Err(_) => {
                let issue = ConfigIssue::warning(
                    ConfigIssueCode::InvalidEnumValue {
                        field: "engine.source_order".to_string(),
                        value: self.source_order.clone(),
                        valid_values: vec![
                            "source_first".to_string(),
                            "variant_first".to_string(),
                        ],
                    },
                    format!(
                        "engine.source_order: unknown value '{}', falling back to 'variant_first'",
                        self.source_order
                    ),
                );
                (SourceOrder::default(), vec![issue])
            }
        }
    }

    pub fn parse_zero_score_policy(&self) -> (ZeroScorePolicy, Vec<ConfigIssue>) {
        match self.zero_score_policy.parse::<ZeroScorePolicy>() {
            Ok(policy) => (policy, vec![]),
            Err(_) => {
                let issue = ConfigIssue::warning(
                    ConfigIssueCode::InvalidEnumValue {
                        field: "engine.zero_score_policy".to_string(),
                        value: self.zero_score_policy.clone(),
                        valid_values: vec!["accept".to_string(), "reject".to_string()],
                    },
                    format!(
                        "engine.zero_score_policy: unknown value '{}', falling back to 'accept'",
                        self.zero_score_policy
                    ),
                );
                (ZeroScorePolicy::default(), vec![issue])
            }
        }
    }
}
