//! Ordered dotted-path lookup over untyped records.
//!
//! Every source returns a differently shaped JSON document. Instead of
//! binding each shape to a struct, callers describe where a field *might*
//! live as an ordered list of dotted paths (`"hdpData.homeInfo.zestimate"`,
//! `"zestimate"`, ...) and the extractor walks them in order.
//!
//! A path segment is an object key, or an array index when the segment is
//! all digits and the current node is an array (`"photos.0.url"`).

use regex::Regex;
use serde_json::Value;
use std::ops::RangeInclusive;

/// Walk a single dotted path. Any missing intermediate fails the path.
pub fn walk<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(record);
    }
    path.split('.').try_fold(record, |node, segment| match node {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

/// Return the first path whose terminal value is present and not `null`.
///
/// Paths are evaluated strictly in order; evaluation stops at the first hit.
pub fn extract<'a>(record: &'a Value, paths: &[&str]) -> Option<&'a Value> {
    paths
        .iter()
        .filter_map(|path| walk(record, path))
        .find(|value| !value.is_null())
}

/// First path yielding a non-blank string. Numbers are rendered as text.
pub fn extract_str(record: &Value, paths: &[&str]) -> Option<String> {
    paths
        .iter()
        .filter_map(|path| walk(record, path))
        .find_map(coerce_text)
}

/// First path yielding a usable integer (see [`coerce_integer`]).
pub fn extract_i64(record: &Value, paths: &[&str]) -> Option<i64> {
    paths
        .iter()
        .filter_map(|path| walk(record, path))
        .find_map(coerce_integer)
}

/// First path yielding a usable decimal number (see [`coerce_decimal`]).
pub fn extract_f64(record: &Value, paths: &[&str]) -> Option<f64> {
    paths
        .iter()
        .filter_map(|path| walk(record, path))
        .find_map(coerce_decimal)
}

/// First path yielding a boolean, accepting `"yes"`/`"no"`/`"true"`/`"false"`.
pub fn extract_bool(record: &Value, paths: &[&str]) -> Option<bool> {
    paths
        .iter()
        .filter_map(|path| walk(record, path))
        .find_map(|value| match value {
            Value::Bool(b) => Some(*b),
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "yes" | "true" | "y" => Some(true),
                "no" | "false" | "n" | "none" => Some(false),
                _ => None,
            },
            _ => None,
        })
}

/// First path yielding a non-empty list of strings.
///
/// A plain string is accepted as a one-element list.
pub fn extract_string_list(record: &Value, paths: &[&str]) -> Option<Vec<String>> {
    paths
        .iter()
        .filter_map(|path| walk(record, path))
        .find_map(|value| {
            let items: Vec<String> = match value {
                Value::Array(items) => items.iter().filter_map(coerce_text).collect(),
                other => coerce_text(other).into_iter().collect(),
            };
            (!items.is_empty()).then_some(items)
        })
}

/// Text coercion: trimmed non-empty strings, and numbers as their decimal form.
pub fn coerce_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Integer coercion for identifiers and money amounts.
///
/// Numbers are taken directly (fractions rounded). Strings have every
/// non-digit character stripped before parsing, so `"$412,300"` becomes
/// `412300`. A result of zero or a failed parse is treated as absent.
pub fn coerce_integer(value: &Value) -> Option<i64> {
    let parsed = match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.round() as i64)),
        Value::String(s) => {
            let digits: String = s.chars().filter(|c| c.is_ascii_digit()).collect();
            digits.parse::<i64>().ok()
        }
        _ => None,
    };
    parsed.filter(|n| *n != 0)
}

/// Decimal coercion for measurements (`"2.5"`, `"7,405 sqft"`).
///
/// Keeps digits and the first decimal point. Zero is treated as absent.
pub fn coerce_decimal(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let mut seen_point = false;
            let cleaned: String = s
                .chars()
                .filter(|c| {
                    if *c == '.' && !seen_point {
                        seen_point = true;
                        true
                    } else {
                        c.is_ascii_digit()
                    }
                })
                .collect();
            cleaned.parse::<f64>().ok()
        }
        _ => None,
    };
    parsed.filter(|n| n.is_finite() && *n != 0.0)
}

/// Last-resort numeric scan over the serialized record.
///
/// Searches the JSON text for `"<field>": <digits>` (optionally quoted)
/// where the digit run length falls in the configured range. Only meant for
/// numeric identifier and valuation fields. Build one per field and keep it
/// in a static; the pattern is compiled once.
#[derive(Debug)]
pub struct NumericFallback {
    pattern: Regex,
}

impl NumericFallback {
    pub fn new(field: &str, digits: RangeInclusive<usize>) -> Self {
        let pattern = format!(
            r#""{}"\s*:\s*"?(\d{{{},{}}})(?:[^\d]|$)"#,
            regex::escape(field),
            digits.start(),
            digits.end()
        );
        Self {
            pattern: Regex::new(&pattern).expect("numeric fallback pattern is valid"),
        }
    }

    /// First non-zero match in the serialized `record`
    pub fn find(&self, record: &Value) -> Option<i64> {
        let text = serde_json::to_string(record).ok()?;
        self.pattern
            .captures_iter(&text)
            .filter_map(|caps| caps.get(1))
            .find_map(|m| m.as_str().parse::<i64>().ok().filter(|n| *n != 0))
    }
}

/// Parse a string value that itself holds serialized JSON.
///
/// Pages frequently embed caches as JSON-in-a-string. Non-string values are
/// returned as-is.
pub fn parse_embedded_json(value: &Value) -> Option<Value> {
    match value {
        Value::String(s) => serde_json::from_str(s).ok(),
        Value::Null => None,
        other => Some(other.clone()),
    }
}
