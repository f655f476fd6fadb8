//! Canonical output types and the mapping into them.
//!
//! - [`canonical::CanonicalRecord`]: the fixed output schema
//! - [`result::ResolutionResult`]: what a resolution call returns
//! - [`mapper::FieldMapper`]: raw candidate → canonical record

pub mod canonical;
pub mod mapper;
pub mod result;
