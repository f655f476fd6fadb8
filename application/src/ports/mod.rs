//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod api_fetch;
pub mod attempt_logger;
pub mod document_fetch;
pub mod fetch_error;
pub mod progress;
