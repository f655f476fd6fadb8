//! Infrastructure layer for parcel-resolver
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, plus configuration file loading.

pub mod config;
pub mod http;
pub mod logging;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileAccessConfig, FileApiConfig, FileConfig,
    FileDocumentConfig, FileEngineConfig, FileOutputConfig,
};
pub use http::{DEFAULT_USER_AGENT, DocumentFetcherConfig, HttpApiFetcher, HttpDocumentFetcher};
pub use logging::JsonlAttemptLogger;
