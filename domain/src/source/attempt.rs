//! Attempt enumeration.
//!
//! An attempt is one concrete (source, address variant, endpoint shape)
//! pairing. The enumeration order is fixed and deterministic:
//!
//! - Within a source, **variant-major**: every shape is tried for the first
//!   variant before the next variant is touched, so the caller's own
//!   spelling is exhausted before any rewritten spelling is used.
//! - Across sources, [`SourceOrder`] decides whether a source is exhausted
//!   over all variants before the next source starts (`SourceFirst`), or
//!   whether every source is tried for a variant before moving on
//!   (`VariantFirst`, the default). Only `VariantFirst` guarantees the
//!   unmodified address reaches every source before any rewritten one.

use super::shape::EndpointShape;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The two families of sources the engine knows how to score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Embedded structured data from a rendered page
    Document,
    /// JSON from a remote API endpoint
    Api,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Document => write!(f, "document"),
            SourceKind::Api => write!(f, "api"),
        }
    }
}

/// Cross-source ordering policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceOrder {
    /// Exhaust each source over all variants before the next source
    SourceFirst,
    /// For each variant, try every source before the next variant
    #[default]
    VariantFirst,
}

impl fmt::Display for SourceOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceOrder::SourceFirst => write!(f, "source_first"),
            SourceOrder::VariantFirst => write!(f, "variant_first"),
        }
    }
}

impl std::str::FromStr for SourceOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "source_first" | "source" => Ok(SourceOrder::SourceFirst),
            "variant_first" | "variant" => Ok(SourceOrder::VariantFirst),
            _ => Err(format!("Invalid SourceOrder: {}", s)),
        }
    }
}

/// Static description of a source: its id, kind and shapes.
///
/// Document sources have no shapes and produce one attempt per variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDescriptor {
    pub id: String,
    pub kind: SourceKind,
    pub shapes: Vec<EndpointShape>,
}

impl SourceDescriptor {
    pub fn document(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: SourceKind::Document,
            shapes: Vec::new(),
        }
    }

    pub fn api(id: impl Into<String>, shapes: Vec<EndpointShape>) -> Self {
        Self {
            id: id.into(),
            kind: SourceKind::Api,
            shapes,
        }
    }

    /// Attempts for a single variant, in shape order
    fn attempts_for(&self, source_index: usize, variant: &str) -> Vec<SourceAttempt> {
        if self.shapes.is_empty() {
            return vec![SourceAttempt {
                source_index,
                source_id: self.id.clone(),
                kind: self.kind,
                variant: variant.to_string(),
                shape: None,
            }];
        }
        self.shapes
            .iter()
            .map(|shape| SourceAttempt {
                source_index,
                source_id: self.id.clone(),
                kind: self.kind,
                variant: variant.to_string(),
                shape: Some(shape.clone()),
            })
            .collect()
    }
}

/// One concrete (source, variant, shape) pairing to try.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceAttempt {
    /// Position of the source in the engine's source list
    pub source_index: usize,
    pub source_id: String,
    pub kind: SourceKind,
    pub variant: String,
    pub shape: Option<EndpointShape>,
}

impl SourceAttempt {
    /// Human-readable label used in logs and result descriptions
    pub fn describe(&self) -> String {
        match &self.shape {
            Some(shape) => format!(
                "{} {} {} with \"{}\"",
                self.kind, self.source_id, shape, self.variant
            ),
            None => format!("{} {} with \"{}\"", self.kind, self.source_id, self.variant),
        }
    }
}

/// Enumerate every attempt in priority order.
pub fn enumerate_attempts(
    variants: &[String],
    sources: &[SourceDescriptor],
    order: SourceOrder,
) -> Vec<SourceAttempt> {
    let mut attempts = Vec::new();
    match order {
        SourceOrder::SourceFirst => {
            for (index, source) in sources.iter().enumerate() {
                for variant in variants {
                    attempts.extend(source.attempts_for(index, variant));
                }
            }
        }
        SourceOrder::VariantFirst => {
            for variant in variants {
                for (index, source) in sources.iter().enumerate() {
                    attempts.extend(source.attempts_for(index, variant));
                }
            }
        }
    }
    attempts
}
