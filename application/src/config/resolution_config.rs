//! Resolution parameters: use case loop control.
//!
//! [`ResolutionConfig`] groups the parameters that control how the attempt
//! list is built and walked. Source endpoints and credentials belong to the
//! source adapters, not here.

use parcel_domain::{SourceOrder, ZeroScorePolicy};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolutionConfig {
    /// Upper bound on a single attempt, fetch and classification included
    pub attempt_timeout: Duration,
    /// Source-major or variant-major enumeration
    pub source_order: SourceOrder,
    /// Whether a search list whose best entry scored zero still matches
    pub zero_score_policy: ZeroScorePolicy,
    /// Site root used to absolutize relative property links
    pub site_base_url: Option<String>,
}

impl Default for ResolutionConfig {
    fn default() -> Self {
        Self {
            attempt_timeout: Duration::from_secs(20),
            source_order: SourceOrder::default(),
            zero_score_policy: ZeroScorePolicy::default(),
            site_base_url: Some("https://www.zillow.com".to_string()),
        }
    }
}

impl ResolutionConfig {
    pub fn with_attempt_timeout(mut self, timeout: Duration) -> Self {
        self.attempt_timeout = timeout;
        self
    }

    pub fn with_source_order(mut self, order: SourceOrder) -> Self {
        self.source_order = order;
        self
    }

    pub fn with_zero_score_policy(mut self, policy: ZeroScorePolicy) -> Self {
        self.zero_score_policy = policy;
        self
    }

    pub fn with_site_base_url(mut self, base: Option<String>) -> Self {
        self.site_base_url = base;
        self
    }
}
