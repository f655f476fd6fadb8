//! Application layer for parcel-resolver
//!
//! This crate contains the resolution use case, the source queries it
//! drives, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod sources;
pub mod use_cases;

// Re-export commonly used types
pub use config::ResolutionConfig;
pub use ports::{
    api_fetch::{ApiFetchPort, ApiResponse},
    attempt_logger::{AttemptEvent, AttemptLogger, NoAttemptLogger},
    document_fetch::DocumentFetchPort,
    fetch_error::FetchError,
    progress::{AttemptOutcome, NoProgress, ResolutionProgress},
};
pub use sources::{
    SourceError, SourcePayload, SourceQuery,
    api::{ApiSource, ApiSourceConfig},
    document::{DocumentSource, DocumentSourceConfig},
};
pub use use_cases::resolve_property::{
    ResolveError, ResolvePropertyInput, ResolvePropertyUseCase,
};
