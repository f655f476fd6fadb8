//! Structured attempt logging.

mod jsonl_logger;

pub use jsonl_logger::JsonlAttemptLogger;
