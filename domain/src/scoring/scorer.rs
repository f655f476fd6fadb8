//! Candidate validation against the query.
//!
//! Two modes:
//!
//! - **Strict** (single records): the candidate's city and state must equal
//!   the query's, the zip must equal it when the query has one, and the
//!   candidate must carry a valuation or an identifier.
//! - **Fuzzy** (search lists): each entry is scored by substring containment
//!   of the query address (+2) and city (+1); the best entry wins, ties go
//!   to the first one seen.
//!
//! All comparisons run on [`normalize_for_match`] output.

use crate::core::query::Query;
use crate::extraction::path::{NumericFallback, extract_i64, extract_str};
use crate::extraction::paths::FieldPaths;
use crate::source::attempt::SourceKind;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::LazyLock;

/// zpid text fallback: 4 to 12 digits
pub static IDENTIFIER_FALLBACK: LazyLock<NumericFallback> =
    LazyLock::new(|| NumericFallback::new("zpid", 4..=12));
/// Valuation text fallback: 4 to 9 digits
pub static VALUATION_FALLBACK: LazyLock<NumericFallback> =
    LazyLock::new(|| NumericFallback::new("zestimate", 4..=9));

/// Lowercase and drop every non-alphanumeric character
pub fn normalize_for_match(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(|c| c.to_lowercase())
        .collect()
}

/// What to do when the best fuzzy candidate scored zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeroScorePolicy {
    /// Keep the first entry as a best-effort guess
    #[default]
    Accept,
    /// Treat the list as containing no match
    Reject,
}

impl fmt::Display for ZeroScorePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZeroScorePolicy::Accept => write!(f, "accept"),
            ZeroScorePolicy::Reject => write!(f, "reject"),
        }
    }
}

impl std::str::FromStr for ZeroScorePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "accept" | "best_effort" | "best-effort" => Ok(ZeroScorePolicy::Accept),
            "reject" | "no_match" | "no-match" => Ok(ZeroScorePolicy::Reject),
            _ => Err(format!("Invalid ZeroScorePolicy: {}", s)),
        }
    }
}

/// A fetched candidate together with its verdict.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    pub candidate: Value,
    pub address_match_score: u32,
    pub city_match: bool,
    pub state_match: bool,
    pub zip_match: bool,
    pub has_valuation: bool,
    pub has_identifier: bool,
    pub acceptable: bool,
}

/// Scores candidates for one query and the address variant used to fetch them.
#[derive(Debug, Clone)]
pub struct CandidateScorer {
    /// Normalized original address and, when different, the attempt variant
    address_keys: Vec<String>,
    city: String,
    state: String,
    zip: String,
}

impl CandidateScorer {
    pub fn new(query: &Query, variant: &str) -> Self {
        let mut address_keys = vec![normalize_for_match(query.address())];
        let variant_key = normalize_for_match(variant);
        if !variant_key.is_empty() && !address_keys.contains(&variant_key) {
            address_keys.push(variant_key);
        }
        Self {
            address_keys,
            city: normalize_for_match(query.city()),
            state: normalize_for_match(query.state()),
            zip: normalize_for_match(query.zip_or_empty()),
        }
    }

    /// Substring score: 2 for the address, +1 for the city on top of it.
    pub fn fuzzy_score(&self, candidate: &Value, kind: SourceKind) -> u32 {
        let text = normalize_for_match(&candidate_address_text(candidate, kind));
        if text.is_empty() {
            return 0;
        }
        let address_hit = self
            .address_keys
            .iter()
            .any(|key| !key.is_empty() && text.contains(key.as_str()));
        if !address_hit {
            return 0;
        }
        if !self.city.is_empty() && text.contains(self.city.as_str()) {
            3
        } else {
            2
        }
    }

    /// Strict validation of a single record.
    pub fn score_strict(&self, candidate: Value, kind: SourceKind) -> ScoredCandidate {
        let paths = FieldPaths::for_source(kind);
        let field = |p: &[&str]| {
            extract_str(&candidate, p)
                .map(|s| normalize_for_match(&s))
                .unwrap_or_default()
        };

        let city_match = !self.city.is_empty() && field(paths.city) == self.city;
        let state_match = !self.state.is_empty() && field(paths.state) == self.state;
        let zip_match = self.zip.is_empty() || field(paths.zip) == self.zip;
        let has_valuation = has_valuation(&candidate, kind);
        let has_identifier = has_identifier(&candidate, kind);
        let address_match_score = self.fuzzy_score(&candidate, kind);

        let acceptable =
            city_match && state_match && zip_match && (has_valuation || has_identifier);

        ScoredCandidate {
            candidate,
            address_match_score,
            city_match,
            state_match,
            zip_match,
            has_valuation,
            has_identifier,
            acceptable,
        }
    }

    /// Pick the best entry of a search list.
    ///
    /// Returns `None` for an empty list, or when the best score is zero and
    /// the policy is [`ZeroScorePolicy::Reject`].
    pub fn select_fuzzy(
        &self,
        candidates: Vec<Value>,
        kind: SourceKind,
        policy: ZeroScorePolicy,
    ) -> Option<ScoredCandidate> {
        let mut best: Option<(u32, Value)> = None;
        for candidate in candidates {
            let score = self.fuzzy_score(&candidate, kind);
            // strict `>` keeps the first-seen entry on ties
            if best.as_ref().is_none_or(|(top, _)| score > *top) {
                best = Some((score, candidate));
            }
        }

        let (score, candidate) = best?;
        if score == 0 && policy == ZeroScorePolicy::Reject {
            return None;
        }

        let mut scored = self.score_strict(candidate, kind);
        scored.address_match_score = score;
        scored.acceptable = true;
        Some(scored)
    }
}

/// Full address string for fuzzy matching.
///
/// Uses a full single-line address when the record has one, otherwise joins
/// street, city, state and zip.
pub fn candidate_address_text(candidate: &Value, kind: SourceKind) -> String {
    let paths = FieldPaths::for_source(kind);
    if let Some(full) = extract_str(candidate, paths.full_address) {
        return full;
    }
    [paths.street, paths.city, paths.state, paths.zip]
        .iter()
        .filter_map(|p| extract_str(candidate, p))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Valuation via paths, falling back to the serialized-text scan
pub fn has_valuation(candidate: &Value, kind: SourceKind) -> bool {
    let paths = FieldPaths::for_source(kind);
    extract_i64(candidate, paths.zestimate).is_some()
        || VALUATION_FALLBACK.find(candidate).is_some()
}

/// Identifier via paths, falling back to the serialized-text scan
pub fn has_identifier(candidate: &Value, kind: SourceKind) -> bool {
    let paths = FieldPaths::for_source(kind);
    extract_i64(candidate, paths.zpid).is_some()
        || IDENTIFIER_FALLBACK.find(candidate).is_some()
}
