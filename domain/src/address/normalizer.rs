//! Address variant generation.
//!
//! Providers disagree on how a street line is spelled (`Main St` vs
//! `Main Street`, `5th St` vs `E 5th St`). [`AddressNormalizer`] turns the
//! user's address into an ordered, deduplicated list of spellings so the
//! engine can retry the same lookup under each of them.

use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Bidirectional street-suffix table: (full word, abbreviation)
pub const ABBREVIATIONS: [(&str, &str); 10] = [
    ("Street", "St"),
    ("Avenue", "Ave"),
    ("Boulevard", "Blvd"),
    ("Drive", "Dr"),
    ("Road", "Rd"),
    ("Lane", "Ln"),
    ("Court", "Ct"),
    ("Place", "Pl"),
    ("Terrace", "Ter"),
    ("Parkway", "Pkwy"),
];

/// Directionals inserted after the house number, in emission order
pub const INSERTED_DIRECTIONALS: [&str; 4] = ["E", "W", "N", "S"];

static FULL_WORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    word_regex(ABBREVIATIONS.iter().map(|(full, _)| *full), false)
});

static ABBREVIATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    word_regex(ABBREVIATIONS.iter().map(|(_, abbr)| *abbr), true)
});

/// A directional is a whole whitespace-delimited token, so the `s` of a
/// possessive (`Land's`) does not count.
static DIRECTIONAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|\s)(?:N|S|E|W|NE|NW|SE|SW)\.?(?:\s|,|$)")
        .expect("directional pattern is valid")
});

static HOUSE_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)\s+(.*[A-Za-z].*)$").expect("house number pattern is valid")
});

/// Case-insensitive whole-word alternation over `words`.
///
/// `\b` anchors make the first and last word of the address match as well
/// as interior ones, and keep `St` from matching inside `Stanley`.
fn word_regex<'a>(words: impl Iterator<Item = &'a str>, allow_period: bool) -> Regex {
    let alternation = words.map(regex::escape).collect::<Vec<_>>().join("|");
    let suffix = if allow_period { r"\.?" } else { "" };
    Regex::new(&format!(r"(?i)\b({})\b{}", alternation, suffix))
        .expect("abbreviation pattern is valid")
}

/// Expands a free-text street address into plausible spellings.
pub struct AddressNormalizer;

impl AddressNormalizer {
    /// Produce the ordered, deduplicated variant list for `address`.
    ///
    /// The trimmed input is always first, followed by the abbreviated form,
    /// the expanded form and, when the address has no directional, one
    /// variant per inserted directional (E, W, N, S). Blank input yields an
    /// empty list.
    pub fn normalize(address: &str) -> Vec<String> {
        let original = address.trim();
        if original.is_empty() {
            return Vec::new();
        }

        let mut variants: Vec<String> = Vec::new();
        let mut push = |candidate: String| {
            if !candidate.is_empty() && !variants.contains(&candidate) {
                variants.push(candidate);
            }
        };

        push(original.to_string());
        push(Self::abbreviate(original));
        push(Self::expand(original));
        for variant in Self::directional_variants(original) {
            push(variant);
        }

        variants
    }

    /// Replace every full suffix word with its abbreviation
    pub fn abbreviate(address: &str) -> String {
        let replaced = FULL_WORD_RE.replace_all(address, |caps: &Captures| {
            lookup(&caps[1], |(full, _)| full)
                .map(|(_, abbr)| abbr.to_string())
                .unwrap_or_else(|| caps[0].to_string())
        });
        collapse_whitespace(&replaced)
    }

    /// Replace every abbreviation (optionally followed by `.`) with its full word
    pub fn expand(address: &str) -> String {
        let replaced = ABBREVIATION_RE.replace_all(address, |caps: &Captures| {
            lookup(&caps[1], |(_, abbr)| abbr)
                .map(|(full, _)| full.to_string())
                .unwrap_or_else(|| caps[0].to_string())
        });
        collapse_whitespace(&replaced)
    }

    /// Whether the address already carries a compass directional
    pub fn has_directional(address: &str) -> bool {
        DIRECTIONAL_RE.is_match(address)
    }

    /// `"<number> <dir> <street>"` for each inserted directional.
    ///
    /// Empty when the address already has a directional or does not start
    /// with a numeric house number followed by a street name.
    pub fn directional_variants(address: &str) -> Vec<String> {
        let address = address.trim();
        if Self::has_directional(address) {
            return Vec::new();
        }
        let Some(caps) = HOUSE_NUMBER_RE.captures(address) else {
            return Vec::new();
        };
        let number = &caps[1];
        let street = collapse_whitespace(&caps[2]);

        INSERTED_DIRECTIONALS
            .iter()
            .map(|dir| format!("{} {} {}", number, dir, street))
            .collect()
    }
}

fn lookup(
    word: &str,
    key: impl Fn(&(&'static str, &'static str)) -> &'static str,
) -> Option<(&'static str, &'static str)> {
    ABBREVIATIONS
        .iter()
        .find(|pair| key(pair).eq_ignore_ascii_case(word))
        .copied()
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_first_variant_is_trimmed_input() {
        for input in ["123 Main St", "  9 Elm Avenue  ", "PO Box 12", "Apt 3, 77 Oak Rd"] {
            let variants = AddressNormalizer::normalize(input);
            assert_eq!(variants[0], input.trim());
        }
    }

    #[test]
    fn test_variants_have_no_duplicates() {
        for input in ["123 Main St", "1 N Lake Dr", "Main", "500 Sunset Boulevard"] {
            let variants = AddressNormalizer::normalize(input);
            let unique: HashSet<_> = variants.iter().collect();
            assert_eq!(unique.len(), variants.len(), "duplicates in {:?}", variants);
        }
    }

    #[test]
    fn test_blank_input_yields_no_variants() {
        assert!(AddressNormalizer::normalize("").is_empty());
        assert!(AddressNormalizer::normalize("   \t").is_empty());
    }

    #[test]
    fn test_abbreviation_passes() {
        assert_eq!(AddressNormalizer::expand("123 Main St"), "123 Main Street");
        assert_eq!(AddressNormalizer::expand("123 main st."), "123 main Street");
        assert_eq!(AddressNormalizer::abbreviate("55 Ocean AVENUE"), "55 Ocean Ave");
        assert_eq!(
            AddressNormalizer::abbreviate("Parkway Place 4"),
            "Pkwy Pl 4",
            "first and last word positions are both matched"
        );
    }

    #[test]
    fn test_substitution_is_word_bounded() {
        assert_eq!(AddressNormalizer::expand("12 Stanley Rdx"), "12 Stanley Rdx");
        assert_eq!(AddressNormalizer::abbreviate("8 Streetcar Ln"), "8 Streetcar Ln");
    }

    #[test]
    fn test_directional_variants_for_bare_street() {
        let variants = AddressNormalizer::normalize("413 5th St");
        assert_eq!(variants[0], "413 5th St");
        for expected in ["413 E 5th St", "413 W 5th St", "413 N 5th St", "413 S 5th St"] {
            assert!(variants.contains(&expected.to_string()), "missing {}", expected);
        }
        let e = variants.iter().position(|v| v == "413 E 5th St").unwrap();
        let s = variants.iter().position(|v| v == "413 S 5th St").unwrap();
        assert!(e < s);
    }

    #[test]
    fn test_no_directional_variants_when_present() {
        assert!(AddressNormalizer::directional_variants("10 N Lake Dr").is_empty());
        assert!(AddressNormalizer::directional_variants("10 sw Lake Dr").is_empty());
        assert!(AddressNormalizer::normalize("10 N Lake Dr").len() == 2);
    }

    #[test]
    fn test_possessive_street_name_gets_directionals() {
        assert!(!AddressNormalizer::has_directional("12 Land's End Rd"));
        assert!(AddressNormalizer::has_directional("12 N. Land's End Rd"));
        assert_eq!(
            AddressNormalizer::normalize("12 Land's End Rd"),
            vec![
                "12 Land's End Rd",
                "12 Land's End Road",
                "12 E Land's End Rd",
                "12 W Land's End Rd",
                "12 N Land's End Rd",
                "12 S Land's End Rd",
            ]
        );
    }

    #[test]
    fn test_no_directional_variants_without_house_number() {
        assert!(AddressNormalizer::directional_variants("Main Street").is_empty());
        assert!(AddressNormalizer::directional_variants("123").is_empty());
    }

    #[test]
    fn test_full_variant_order() {
        let variants = AddressNormalizer::normalize("123 Main St");
        assert_eq!(
            variants,
            vec![
                "123 Main St",
                "123 Main Street",
                "123 E Main St",
                "123 W Main St",
                "123 N Main St",
                "123 S Main St",
            ]
        );
    }
}
