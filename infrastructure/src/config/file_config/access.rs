//! Access gating from TOML (`[access]` section)

use serde::{Deserialize, Serialize};

/// Shared secret the caller must present.
///
/// ```toml
/// [access]
/// key = "..."
/// ```
///
/// Also settable through `PARCEL_ACCESS_KEY`. Unset means no gating.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAccessConfig {
    pub key: Option<String>,
}

impl FileAccessConfig {
    pub fn is_gated(&self) -> bool {
        self.key.as_deref().is_some_and(|k| !k.is_empty())
    }

    /// Whether `provided` satisfies the configured key
    pub fn permits(&self, provided: Option<&str>) -> bool {
        !self.is_gated() || provided == self.key.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ungated_permits_anything() {
        let access = FileAccessConfig::default();
        assert!(!access.is_gated());
        assert!(access.permits(None));
        assert!(access.permits(Some("whatever")));
    }

    #[test]
    fn test_gated_requires_exact_key() {
        let access = FileAccessConfig {
            key: Some("s3cret".to_string()),
        };
        assert!(access.is_gated());
        assert!(access.permits(Some("s3cret")));
        assert!(!access.permits(Some("S3CRET")));
        assert!(!access.permits(None));
    }
}
