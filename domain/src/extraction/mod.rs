//! Field extraction from untyped source records.
//!
//! - [`path`]: ordered dotted-path lookup, numeric coercion and the
//!   serialized-text numeric fallback
//! - [`paths`]: the candidate path lists for each canonical field

pub mod path;
pub mod paths;
