//! Resolve Property use case.
//!
//! Turns a street address into a canonical record by walking an ordered
//! list of (source, variant, shape) attempts and stopping at the first
//! acceptable candidate.
//!
//! # Flow
//!
//! 1. Expand the address into variants ([`AddressNormalizer`])
//! 2. Enumerate attempts across sources ([`enumerate_attempts`])
//! 3. Run attempts one at a time, each under the attempt timeout
//! 4. Validate each payload ([`CandidateScorer`]); strict for single records
//!    and API lists, fuzzy for document search lists
//! 5. Map the winner ([`FieldMapper`]) and score it ([`match_confidence`])
//!
//! A source that times out or fails to respond only skips its attempt.
//! Infrastructure failures abort the resolution.

use crate::config::ResolutionConfig;
use crate::ports::attempt_logger::{AttemptEvent, AttemptLogger, NoAttemptLogger};
use crate::ports::progress::{AttemptOutcome, NoProgress, ResolutionProgress};
use crate::sources::{SourceError, SourcePayload, SourceQuery};
use parcel_domain::{
    AddressNormalizer, CandidateScorer, DomainError, FieldMapper, Query, ResolutionResult,
    ScoredCandidate, SourceAttempt, SourceDescriptor, SourceKind, enumerate_attempts,
    match_confidence,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that end a resolution without a [`ResolutionResult`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error(transparent)]
    InvalidQuery(#[from] DomainError),

    #[error("No sources configured")]
    NoSources,

    #[error("Source {source_id} failed: {message}")]
    Infrastructure { source_id: String, message: String },
}

/// Raw caller input for [`ResolvePropertyUseCase::resolve_or_report`].
#[derive(Debug, Clone, Default)]
pub struct ResolvePropertyInput {
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: Option<String>,
}

impl ResolvePropertyInput {
    pub fn new(
        address: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        zip: Option<String>,
    ) -> Self {
        Self {
            address: address.into(),
            city: city.into(),
            state: state.into(),
            zip,
        }
    }

    pub fn into_query(self) -> Result<Query, DomainError> {
        Query::new(self.address, self.city, self.state, self.zip)
    }
}

/// The resolution engine.
///
/// Holds only shared, immutable state; one instance can serve concurrent
/// resolutions.
pub struct ResolvePropertyUseCase {
    sources: Vec<Arc<dyn SourceQuery>>,
    config: ResolutionConfig,
    attempt_logger: Arc<dyn AttemptLogger>,
}

impl Clone for ResolvePropertyUseCase {
    fn clone(&self) -> Self {
        Self {
            sources: self.sources.clone(),
            config: self.config.clone(),
            attempt_logger: self.attempt_logger.clone(),
        }
    }
}

impl ResolvePropertyUseCase {
    /// Sources are queried in the order given.
    pub fn new(sources: Vec<Arc<dyn SourceQuery>>, config: ResolutionConfig) -> Self {
        Self {
            sources,
            config,
            attempt_logger: Arc::new(NoAttemptLogger),
        }
    }

    pub fn with_attempt_logger(mut self, logger: Arc<dyn AttemptLogger>) -> Self {
        self.attempt_logger = logger;
        self
    }

    pub fn config(&self) -> &ResolutionConfig {
        &self.config
    }

    pub async fn execute(&self, query: &Query) -> Result<ResolutionResult, ResolveError> {
        self.execute_with_progress(query, &NoProgress).await
    }

    /// Request boundary: validate input, resolve, and fold every failure
    /// except invalid input into a `{ok: false}` result.
    pub async fn resolve_or_report(
        &self,
        input: ResolvePropertyInput,
        progress: &dyn ResolutionProgress,
    ) -> Result<ResolutionResult, ResolveError> {
        let query = input.into_query()?;
        match self.execute_with_progress(&query, progress).await {
            Ok(result) => Ok(result),
            Err(ResolveError::InvalidQuery(e)) => Err(ResolveError::InvalidQuery(e)),
            Err(e) => {
                warn!("Resolution failed: {}", e);
                let result = ResolutionResult::failure(e.to_string());
                self.log_resolution(&query, &result);
                progress.on_resolution_complete(&result);
                Ok(result)
            }
        }
    }

    pub async fn execute_with_progress(
        &self,
        query: &Query,
        progress: &dyn ResolutionProgress,
    ) -> Result<ResolutionResult, ResolveError> {
        if self.sources.is_empty() {
            return Err(ResolveError::NoSources);
        }

        let variants = AddressNormalizer::normalize(query.address());
        let descriptors: Vec<SourceDescriptor> = self
            .sources
            .iter()
            .map(|source| source.descriptor().clone())
            .collect();
        let attempts = enumerate_attempts(&variants, &descriptors, self.config.source_order);

        info!(
            "Resolving {} ({} variants, {} attempts)",
            query,
            variants.len(),
            attempts.len()
        );
        progress.on_resolution_start(query, attempts.len());

        for (index, attempt) in attempts.iter().enumerate() {
            progress.on_attempt_start(index, attempt);
            debug!("Attempt {}/{}: {}", index + 1, attempts.len(), attempt.describe());

            let fetched = self.run_attempt(attempt, query).await;

            let (outcome, result) = match fetched {
                Ok(payload) => match self.evaluate(query, attempt, payload) {
                    Some(result) => (AttemptOutcome::Accepted, Some(result)),
                    None => (AttemptOutcome::Rejected, None),
                },
                Err(e) if e.is_fatal() => {
                    let outcome = AttemptOutcome::Unavailable(e.to_string());
                    self.log_attempt(index, attempt, &outcome);
                    progress.on_attempt_complete(index, attempt, &outcome);
                    return Err(ResolveError::Infrastructure {
                        source_id: attempt.source_id.clone(),
                        message: e.to_string(),
                    });
                }
                Err(e) => {
                    debug!("{} unavailable: {}", attempt.describe(), e);
                    (AttemptOutcome::Unavailable(e.to_string()), None)
                }
            };

            self.log_attempt(index, attempt, &outcome);
            progress.on_attempt_complete(index, attempt, &outcome);

            if let Some(result) = result {
                info!(
                    "Matched via {} (confidence {})",
                    result.source_description, result.match_confidence
                );
                self.log_resolution(query, &result);
                progress.on_resolution_complete(&result);
                return Ok(result);
            }
        }

        let result = ResolutionResult::no_match(format!(
            "No acceptable candidate after {} attempts across {} address variants and {} sources",
            attempts.len(),
            variants.len(),
            self.sources.len()
        ));
        info!("No match for {}", query);
        self.log_resolution(query, &result);
        progress.on_resolution_complete(&result);
        Ok(result)
    }

    async fn run_attempt(
        &self,
        attempt: &SourceAttempt,
        query: &Query,
    ) -> Result<SourcePayload, SourceError> {
        let source = self
            .sources
            .get(attempt.source_index)
            .ok_or_else(|| SourceError::Infrastructure("attempt names unknown source".into()))?;

        match tokio::time::timeout(self.config.attempt_timeout, source.fetch(attempt, query)).await
        {
            Ok(fetched) => fetched,
            Err(_) => Err(SourceError::Timeout),
        }
    }

    /// Validate a payload; `Some` only for an acceptable candidate.
    fn evaluate(
        &self,
        query: &Query,
        attempt: &SourceAttempt,
        payload: SourcePayload,
    ) -> Option<ResolutionResult> {
        let scorer = CandidateScorer::new(query, &attempt.variant);
        let kind = attempt.kind;

        let (scored, fuzzy_score) = match payload {
            SourcePayload::Detail(record) => {
                let scored = scorer.score_strict(record, kind);
                (scored.acceptable.then_some(scored)?, None)
            }
            SourcePayload::SearchResults(items) => match kind {
                SourceKind::Document => {
                    let scored =
                        scorer.select_fuzzy(items, kind, self.config.zero_score_policy)?;
                    let score = scored.address_match_score;
                    (scored, Some(score))
                }
                SourceKind::Api => {
                    let scored = items
                        .into_iter()
                        .map(|item| scorer.score_strict(item, kind))
                        .find(|scored| scored.acceptable)?;
                    (scored, None)
                }
            },
        };

        Some(self.build_result(attempt, scored, fuzzy_score))
    }

    fn build_result(
        &self,
        attempt: &SourceAttempt,
        scored: ScoredCandidate,
        fuzzy_score: Option<u32>,
    ) -> ResolutionResult {
        let record = FieldMapper::new(attempt.kind)
            .with_site_base(self.config.site_base_url.clone())
            .map(&scored.candidate);
        let has_valuation = scored.has_valuation || record.has_valuation();
        let confidence = match_confidence(attempt.kind, has_valuation, fuzzy_score);
        ResolutionResult::matched(record, attempt.describe(), confidence)
    }

    fn log_attempt(&self, index: usize, attempt: &SourceAttempt, outcome: &AttemptOutcome) {
        let reason = match outcome {
            AttemptOutcome::Unavailable(reason) => Some(reason.as_str()),
            _ => None,
        };
        self.attempt_logger.log(AttemptEvent::new(
            "attempt",
            json!({
                "index": index,
                "source": attempt.source_id,
                "kind": attempt.kind.to_string(),
                "variant": attempt.variant,
                "shape": attempt.shape.as_ref().map(|s| s.to_string()),
                "outcome": outcome.as_str(),
                "reason": reason,
            }),
        ));
    }

    fn log_resolution(&self, query: &Query, result: &ResolutionResult) {
        self.attempt_logger.log(AttemptEvent::new(
            "resolution",
            json!({
                "query": query.one_line(),
                "ok": result.ok,
                "matched": result.is_match(),
                "source": result.source_description,
                "confidence": result.match_confidence,
                "note": result.note,
                "error": result.error,
            }),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use parcel_domain::{EndpointShape, ParamStyle};
    use serde_json::{Value, json};
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Replies from a variant → payload table and records every call.
    struct StubSource {
        descriptor: SourceDescriptor,
        replies: HashMap<String, Result<SourcePayload, SourceError>>,
        delay: Option<Duration>,
        calls: Mutex<Vec<(String, Option<String>)>>,
    }

    impl StubSource {
        fn api(id: &str, shapes: Vec<EndpointShape>) -> Self {
            Self {
                descriptor: SourceDescriptor::api(id, shapes),
                replies: HashMap::new(),
                delay: None,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn document(id: &str) -> Self {
            Self {
                descriptor: SourceDescriptor::document(id),
                replies: HashMap::new(),
                delay: None,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn reply(mut self, variant: &str, reply: Result<SourcePayload, SourceError>) -> Self {
            self.replies.insert(variant.to_string(), reply);
            self
        }

        fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }

        fn calls(&self) -> Vec<(String, Option<String>)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SourceQuery for StubSource {
        fn descriptor(&self) -> &SourceDescriptor {
            &self.descriptor
        }

        async fn fetch(
            &self,
            attempt: &SourceAttempt,
            _query: &Query,
        ) -> Result<SourcePayload, SourceError> {
            self.calls.lock().unwrap().push((
                attempt.variant.clone(),
                attempt.shape.as_ref().map(|s| s.style.to_string()),
            ));
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.replies
                .get(&attempt.variant)
                .cloned()
                .unwrap_or(Err(SourceError::Status(404)))
        }
    }

    #[derive(Default)]
    struct RecordingLogger {
        events: Mutex<Vec<(String, Value)>>,
    }

    impl AttemptLogger for RecordingLogger {
        fn log(&self, event: AttemptEvent) {
            self.events
                .lock()
                .unwrap()
                .push((event.event_type.to_string(), event.payload));
        }
    }

    fn springfield() -> Query {
        Query::new("123 Main St", "Springfield", "IL", Some("62704".into())).unwrap()
    }

    fn api_record() -> Value {
        json!({
            "zpid": 1001,
            "address": {"streetAddress": "123 Main Street", "city": "Springfield", "state": "IL", "zipcode": "62704"},
            "zestimate": 245000,
            "bedrooms": 3
        })
    }

    fn one_shape() -> Vec<EndpointShape> {
        vec![EndpointShape::new("/property", ParamStyle::FullAddress).unwrap()]
    }

    fn engine(sources: Vec<Arc<dyn SourceQuery>>) -> ResolvePropertyUseCase {
        ResolvePropertyUseCase::new(sources, ResolutionConfig::default())
    }

    #[tokio::test]
    async fn test_variant_expansion_reaches_accepting_shape() {
        let api = Arc::new(
            StubSource::api("rapid", one_shape())
                .reply("123 Main Street", Ok(SourcePayload::Detail(api_record()))),
        );
        let result = engine(vec![api.clone()]).execute(&springfield()).await.unwrap();

        assert!(result.is_match());
        assert_eq!(result.match_confidence, 85);
        assert!(result.source_description.contains("123 Main Street"));
        let record = result.canonical_record.unwrap();
        assert_eq!(record.zpid, Some(1001));
        assert_eq!(record.zestimate, Some(245000));
        // original first, expanded second
        assert_eq!(api.calls().len(), 2);
        assert_eq!(api.calls()[0].0, "123 Main St");
    }

    #[tokio::test]
    async fn test_no_acceptance_is_empty_success() {
        let api = Arc::new(StubSource::api("rapid", one_shape()));
        let result = engine(vec![api.clone()]).execute(&springfield()).await.unwrap();

        assert!(result.ok);
        assert!(result.canonical_record.is_none());
        assert_eq!(result.match_confidence, 0);
        assert!(result.note.as_deref().is_some_and(|n| !n.is_empty()));
        assert!(result.error.is_none());
        // every variant was tried
        assert_eq!(api.calls().len(), 6);
    }

    #[tokio::test]
    async fn test_repeat_resolution_is_identical() {
        let api: Arc<dyn SourceQuery> = Arc::new(
            StubSource::api("rapid", one_shape())
                .reply("123 Main Street", Ok(SourcePayload::Detail(api_record()))),
        );
        let engine = engine(vec![api]);
        let first = engine.execute(&springfield()).await.unwrap();
        let second = engine.execute(&springfield()).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_variant_major_shape_minor_order() {
        let shapes = vec![
            EndpointShape::new("/property", ParamStyle::FullAddress).unwrap(),
            EndpointShape::new("/property", ParamStyle::Components).unwrap(),
        ];
        let api = Arc::new(StubSource::api("rapid", shapes));
        let query = Query::new("9 Oak Street", "Austin", "TX", None).unwrap();
        engine(vec![api.clone()]).execute(&query).await.unwrap();

        let calls = api.calls();
        let expected = [
            ("9 Oak Street", "full_address"),
            ("9 Oak Street", "components"),
            ("9 Oak St", "full_address"),
            ("9 Oak St", "components"),
        ];
        assert!(calls.len() >= expected.len(), "only {} calls", calls.len());
        for (call, (variant, style)) in calls[..expected.len()].iter().zip(expected) {
            assert_eq!(call.0, variant);
            assert_eq!(call.1.as_deref(), Some(style));
        }
    }

    #[tokio::test]
    async fn test_original_address_reaches_api_before_rewritten_page_match() {
        let query = Query::new("413 5th St", "Austin", "TX", None).unwrap();
        let detail = |zpid: i64| {
            Ok(SourcePayload::Detail(json!({
                "zpid": zpid,
                "city": "Austin",
                "state": "TX",
                "zestimate": 410000
            })))
        };
        let document = Arc::new(StubSource::document("page").reply("413 E 5th St", detail(1)));
        let api = Arc::new(StubSource::api("rapid", one_shape()).reply("413 5th St", detail(2)));

        let result = engine(vec![document.clone(), api.clone()])
            .execute(&query)
            .await
            .unwrap();

        assert_eq!(result.canonical_record.unwrap().zpid, Some(2));
        assert!(result.source_description.starts_with("api rapid"));
        assert_eq!(document.calls().len(), 1);
        assert_eq!(document.calls()[0].0, "413 5th St");
    }

    #[tokio::test]
    async fn test_document_source_is_tried_before_api() {
        let document = Arc::new(StubSource::document("page").reply(
            "123 Main St",
            Ok(SourcePayload::Detail(json!({
                "zpid": 77,
                "city": "Springfield",
                "state": "IL",
                "zipcode": "62704",
                "zestimate": 250000
            }))),
        ));
        let api = Arc::new(
            StubSource::api("rapid", one_shape())
                .reply("123 Main St", Ok(SourcePayload::Detail(api_record()))),
        );
        let result = engine(vec![document.clone(), api.clone()])
            .execute(&springfield())
            .await
            .unwrap();

        assert_eq!(result.match_confidence, 90);
        assert!(result.source_description.starts_with("document page"));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_fuzzy_search_list_confidence() {
        let document = Arc::new(StubSource::document("page").reply(
            "123 Main St",
            Ok(SourcePayload::SearchResults(vec![
                json!({"address": "999 Other Rd, Elsewhere, IL 60000"}),
                json!({"address": "123 Main St, Springfield, IL 62704", "detailUrl": "/homedetails/1_zpid/"}),
            ])),
        ));
        let result = engine(vec![document]).execute(&springfield()).await.unwrap();

        assert!(result.is_match());
        assert_eq!(result.match_confidence, 30);
        let record = result.canonical_record.unwrap();
        assert_eq!(
            record.property_url.as_deref(),
            Some("https://www.zillow.com/homedetails/1_zpid/")
        );
    }

    #[tokio::test]
    async fn test_zero_score_policy_reject() {
        let list = Ok(SourcePayload::SearchResults(vec![json!({
            "address": "999 Other Rd, Elsewhere, IL 60000"
        })]));
        let document = Arc::new(StubSource::document("page").reply("123 Main St", list.clone()));
        let accepting = engine(vec![document]).execute(&springfield()).await.unwrap();
        assert_eq!(accepting.match_confidence, 20);

        let document = Arc::new(StubSource::document("page").reply("123 Main St", list));
        let config = ResolutionConfig::default()
            .with_zero_score_policy(parcel_domain::ZeroScorePolicy::Reject);
        let rejecting = ResolvePropertyUseCase::new(vec![document], config)
            .execute(&springfield())
            .await
            .unwrap();
        assert!(!rejecting.is_match());
    }

    #[tokio::test]
    async fn test_strict_match_without_valuation() {
        let api = Arc::new(StubSource::api("rapid", one_shape()).reply(
            "123 Main St",
            Ok(SourcePayload::Detail(json!({
                "zpid": 5,
                "address": {"city": "Springfield", "state": "IL", "zipcode": "62704"}
            }))),
        ));
        let result = engine(vec![api]).execute(&springfield()).await.unwrap();
        assert_eq!(result.match_confidence, 60);
    }

    #[tokio::test]
    async fn test_api_list_takes_first_acceptable_entry() {
        let api = Arc::new(StubSource::api("rapid", one_shape()).reply(
            "123 Main St",
            Ok(SourcePayload::SearchResults(vec![
                json!({"zpid": 1, "address": {"city": "Chicago", "state": "IL"}}),
                json!({"zpid": 2, "address": {"city": "Springfield", "state": "IL", "zipcode": "62704"}}),
                json!({"zpid": 3, "address": {"city": "Springfield", "state": "IL", "zipcode": "62704"}}),
            ])),
        ));
        let result = engine(vec![api]).execute(&springfield()).await.unwrap();
        assert_eq!(result.canonical_record.unwrap().zpid, Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timed_out_attempt_is_skipped() {
        let slow = Arc::new(
            StubSource::document("page")
                .reply("123 Main St", Ok(SourcePayload::Detail(api_record())))
                .with_delay(Duration::from_secs(60)),
        );
        let api = Arc::new(
            StubSource::api("rapid", one_shape())
                .reply("123 Main St", Ok(SourcePayload::Detail(api_record()))),
        );
        let config = ResolutionConfig::default().with_attempt_timeout(Duration::from_secs(1));
        let result = ResolvePropertyUseCase::new(vec![slow.clone(), api], config)
            .execute(&springfield())
            .await
            .unwrap();

        assert!(result.is_match());
        assert!(result.source_description.starts_with("api rapid"));
        assert_eq!(slow.calls().len(), 6);
    }

    #[tokio::test]
    async fn test_infrastructure_failure_is_reported() {
        let api = Arc::new(StubSource::api("rapid", one_shape()).reply(
            "123 Main St",
            Err(SourceError::Infrastructure("browser crashed".into())),
        ));
        let engine = engine(vec![api]);

        let err = engine.execute(&springfield()).await.unwrap_err();
        assert!(matches!(err, ResolveError::Infrastructure { .. }));

        let input = ResolvePropertyInput::new("123 Main St", "Springfield", "IL", None);
        let result = engine.resolve_or_report(input, &NoProgress).await.unwrap();
        assert!(!result.ok);
        assert!(result.error.unwrap().contains("browser crashed"));
    }

    #[tokio::test]
    async fn test_invalid_input_is_rejected_before_attempts() {
        let api = Arc::new(StubSource::api("rapid", one_shape()));
        let input = ResolvePropertyInput::new("123 Main St", "  ", "IL", None);
        let err = engine(vec![api.clone()])
            .resolve_or_report(input, &NoProgress)
            .await
            .unwrap_err();

        assert!(matches!(err, ResolveError::InvalidQuery(_)));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_no_sources() {
        let err = engine(Vec::new()).execute(&springfield()).await.unwrap_err();
        assert_eq!(err, ResolveError::NoSources);
    }

    #[tokio::test]
    async fn test_attempts_are_logged() {
        let api = Arc::new(
            StubSource::api("rapid", one_shape())
                .reply("123 Main Street", Ok(SourcePayload::Detail(api_record()))),
        );
        let logger = Arc::new(RecordingLogger::default());
        engine(vec![api])
            .with_attempt_logger(logger.clone())
            .execute(&springfield())
            .await
            .unwrap();

        let events = logger.events.lock().unwrap();
        let types: Vec<&str> = events.iter().map(|(t, _)| t.as_str()).collect();
        assert_eq!(types, ["attempt", "attempt", "resolution"]);
        assert_eq!(events[0].1["outcome"], "unavailable");
        assert_eq!(events[1].1["outcome"], "accepted");
        assert_eq!(events[2].1["confidence"], 85);
    }
}
