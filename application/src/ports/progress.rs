//! Progress notification port
//!
//! Defines the interface for reporting progress during a resolution.

use parcel_domain::{Query, ResolutionResult, SourceAttempt};

/// What happened to a single attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// The candidate passed validation; enumeration stops here
    Accepted,
    /// A candidate was fetched but failed validation
    Rejected,
    /// Timeout, transport failure, bad status or unusable payload
    Unavailable(String),
}

impl AttemptOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttemptOutcome::Accepted => "accepted",
            AttemptOutcome::Rejected => "rejected",
            AttemptOutcome::Unavailable(_) => "unavailable",
        }
    }
}

/// Callback for progress updates during a resolution
///
/// Implementations live in the presentation layer.
pub trait ResolutionProgress: Send + Sync {
    /// Called once the attempt list is known
    fn on_resolution_start(&self, query: &Query, total_attempts: usize);

    /// Called before each attempt is issued
    fn on_attempt_start(&self, _index: usize, _attempt: &SourceAttempt) {}

    /// Called when an attempt resolves
    fn on_attempt_complete(&self, index: usize, attempt: &SourceAttempt, outcome: &AttemptOutcome);

    /// Called with the final result
    fn on_resolution_complete(&self, result: &ResolutionResult);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ResolutionProgress for NoProgress {
    fn on_resolution_start(&self, _query: &Query, _total_attempts: usize) {}
    fn on_attempt_complete(&self, _index: usize, _attempt: &SourceAttempt, _outcome: &AttemptOutcome) {}
    fn on_resolution_complete(&self, _result: &ResolutionResult) {}
}
