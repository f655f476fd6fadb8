//! Port for structured attempt logging.
//!
//! Defines the [`AttemptLogger`] trait for recording every source attempt
//! and the final verdict of a resolution to a structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostics, while this port captures a machine-readable
//! transcript (JSONL) of which (source, variant, shape) was tried and why
//! it was accepted or skipped.

use serde_json::Value;

/// A structured attempt event for logging.
pub struct AttemptEvent {
    /// Event type identifier (e.g., "attempt", "resolution").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl AttemptEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging attempt events.
///
/// `log` is synchronous and non-fallible; logging failures are ignored so
/// they never affect a resolution.
pub trait AttemptLogger: Send + Sync {
    fn log(&self, event: AttemptEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoAttemptLogger;

impl AttemptLogger for NoAttemptLogger {
    fn log(&self, _event: AttemptEvent) {}
}
