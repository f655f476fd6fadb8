//! Final match confidence for an accepted candidate.

use crate::source::attempt::SourceKind;

/// Valuation present, matched through a page document
pub const DOCUMENT_VALUATION_CONFIDENCE: u8 = 90;
/// Valuation present, matched through the API (no page verification)
pub const API_VALUATION_CONFIDENCE: u8 = 85;
/// Floor for fuzzy search-list selections without a valuation
pub const FUZZY_CONFIDENCE_FLOOR: u8 = 20;
/// Strict location match without a valuation
pub const STRICT_MATCH_CONFIDENCE: u8 = 60;

/// Confidence (0..=100) for an accepted candidate.
///
/// `fuzzy_score` is `Some` when the candidate was picked from a search list.
pub fn match_confidence(kind: SourceKind, has_valuation: bool, fuzzy_score: Option<u32>) -> u8 {
    if has_valuation {
        return match kind {
            SourceKind::Document => DOCUMENT_VALUATION_CONFIDENCE,
            SourceKind::Api => API_VALUATION_CONFIDENCE,
        };
    }
    match fuzzy_score {
        Some(score) => {
            let scaled = score.saturating_mul(10).min(100) as u8;
            scaled.max(FUZZY_CONFIDENCE_FLOOR)
        }
        None => STRICT_MATCH_CONFIDENCE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valuation_confidence_by_path() {
        assert_eq!(match_confidence(SourceKind::Document, true, None), 90);
        assert_eq!(match_confidence(SourceKind::Api, true, None), 85);
        assert_eq!(match_confidence(SourceKind::Document, true, Some(0)), 90);
    }

    #[test]
    fn test_fuzzy_confidence() {
        assert_eq!(match_confidence(SourceKind::Document, false, Some(0)), 20);
        assert_eq!(match_confidence(SourceKind::Document, false, Some(2)), 20);
        assert_eq!(match_confidence(SourceKind::Document, false, Some(3)), 30);
        assert_eq!(match_confidence(SourceKind::Document, false, Some(50)), 100);
    }

    #[test]
    fn test_strict_without_valuation() {
        assert_eq!(match_confidence(SourceKind::Api, false, None), 60);
        assert_eq!(match_confidence(SourceKind::Document, false, None), 60);
    }
}
