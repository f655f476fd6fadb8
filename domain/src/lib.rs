//! Domain layer for parcel-resolver
//!
//! This crate contains the pure logic of record resolution. It has no
//! dependencies on network, configuration files or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Variants
//!
//! The caller's street address is expanded into alternate spellings
//! ([`AddressNormalizer`]) so that each source can be retried under every
//! plausible form, original first.
//!
//! ## Ordered paths
//!
//! Sources return differently shaped JSON. Fields are never read by
//! structural assumption, only through ordered dotted paths
//! ([`extraction::path`]) with a last-resort numeric text scan.
//!
//! ## Scoring
//!
//! Candidates are validated strictly (single records) or fuzzily (search
//! lists) by [`CandidateScorer`], and accepted matches get a confidence from
//! [`match_confidence`].

pub mod address;
pub mod config;
pub mod core;
pub mod extraction;
pub mod record;
pub mod scoring;
pub mod source;

// Re-export commonly used types
pub use address::normalizer::AddressNormalizer;
pub use config::{
    OutputFormat,
    validation::{ConfigIssue, ConfigIssueCode, Severity},
};
pub use core::{error::DomainError, query::Query};
pub use extraction::paths::FieldPaths;
pub use record::{
    canonical::{CanonicalRecord, PriceEvent},
    mapper::FieldMapper,
    result::ResolutionResult,
};
pub use scoring::{
    confidence::match_confidence,
    scorer::{CandidateScorer, ScoredCandidate, ZeroScorePolicy, normalize_for_match},
};
pub use source::{
    attempt::{SourceAttempt, SourceDescriptor, SourceKind, SourceOrder, enumerate_attempts},
    shape::{EndpointShape, ParamStyle},
};
