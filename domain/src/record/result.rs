//! Resolution result returned to the caller.

use super::canonical::CanonicalRecord;
use serde::{Deserialize, Serialize};

/// Outcome of one resolution call.
///
/// - matched: `ok = true`, record present, confidence > 0
/// - no match: `ok = true`, no record, confidence 0, `note` explains why
/// - failure: `ok = false`, `error` set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionResult {
    pub ok: bool,
    pub canonical_record: Option<CanonicalRecord>,
    pub source_description: String,
    /// 0..=100
    pub match_confidence: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ResolutionResult {
    /// A successful match
    pub fn matched(
        record: CanonicalRecord,
        source_description: impl Into<String>,
        match_confidence: u8,
    ) -> Self {
        Self {
            ok: true,
            canonical_record: Some(record),
            source_description: source_description.into(),
            match_confidence: match_confidence.min(100),
            note: None,
            error: None,
        }
    }

    /// Every attempt was exhausted without an acceptable candidate
    pub fn no_match(note: impl Into<String>) -> Self {
        Self {
            ok: true,
            canonical_record: None,
            source_description: "none".to_string(),
            match_confidence: 0,
            note: Some(note.into()),
            error: None,
        }
    }

    /// The request could not be completed
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            canonical_record: None,
            source_description: "none".to_string(),
            match_confidence: 0,
            note: None,
            error: Some(error.into()),
        }
    }

    pub fn is_match(&self) -> bool {
        self.ok && self.canonical_record.is_some()
    }
}
