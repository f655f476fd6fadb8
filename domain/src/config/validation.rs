//! Configuration issues reported by config validation.
//!
//! The infrastructure layer parses the raw TOML into strings and numbers;
//! anything it cannot turn into a domain value is reported as a
//! [`ConfigIssue`] instead of failing the whole load.

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: a default is used instead.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// A string field did not parse into its enum.
    InvalidEnumValue {
        field: String,
        value: String,
        valid_values: Vec<String>,
    },
    /// A numeric field is outside its usable range.
    OutOfRange { field: String },
    /// A required value is empty.
    EmptyValue { field: String },
    /// Every source is disabled, nothing can ever match.
    NoSources,
}

/// A detected issue in the configuration.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_severity() {
        let w = ConfigIssue::warning(ConfigIssueCode::NoSources, "w");
        let e = ConfigIssue::error(ConfigIssueCode::NoSources, "e");
        assert!(!w.is_error());
        assert!(e.is_error());
        assert_eq!(e.message, "e");
    }
}
