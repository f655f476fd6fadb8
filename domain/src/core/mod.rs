//! Core domain concepts shared across all subdomains.
//!
//! - [`query::Query`]: a validated address lookup request
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod query;
