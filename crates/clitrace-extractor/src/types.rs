//! Request and response types for processing

use crate::error::CorrelationFailure;
use clitrace_domain::{CliPair, ExtractionMode, RequestId, SearchError};
use std::fmt;
use thiserror::Error;

/// Request to process call-detail text
#[derive(Debug, Clone)]
pub struct ProcessRequest {
    /// Raw call-detail text
    pub text: String,

    /// Wire name of the mode (`only_cli` or `with_samples`)
    pub mode: String,
}

impl ProcessRequest {
    /// Create a request with a raw mode name
    pub fn new(text: impl Into<String>, mode: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            mode: mode.into(),
        }
    }

    /// Create an `only_cli` request
    pub fn only_cli(text: impl Into<String>) -> Self {
        Self::new(text, ExtractionMode::OnlyCli.as_str())
    }

    /// Create a `with_samples` request
    pub fn with_samples(text: impl Into<String>) -> Self {
        Self::new(text, ExtractionMode::WithSamples.as_str())
    }
}

/// Result of a processing request
#[derive(Debug, Clone)]
pub struct ProcessOutcome {
    /// Result lines in pair order
    pub results: Vec<String>,

    /// Pairs that produced no result, in pair order
    pub failures: Vec<PairFailure>,

    /// Metadata about the request
    pub metadata: ProcessMetadata,
}

/// A pair that was skipped, and why
#[derive(Debug, Clone, PartialEq)]
pub struct PairFailure {
    /// Position of the pair in extraction order
    pub index: usize,

    /// The pair itself
    pub pair: CliPair,

    /// Why it was skipped
    pub kind: FailureKind,
}

impl fmt::Display for PairFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pair {} ({}): {}", self.index, self.pair, self.kind)
    }
}

/// Stage at which a pair failed
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FailureKind {
    /// Backend configuration is missing
    #[error("backend unavailable: {0}")]
    BackendUnavailable(SearchError),

    /// The query itself failed
    #[error("query failed: {0}")]
    Query(SearchError),

    /// Hits were fetched but did not correlate
    #[error("correlation failed: {0}")]
    Correlation(CorrelationFailure),

    /// Internal fault while handling the pair
    #[error("unexpected failure: {0}")]
    Unexpected(String),

    /// The request deadline elapsed first
    #[error("request deadline exceeded")]
    DeadlineExceeded,
}

impl From<SearchError> for FailureKind {
    fn from(e: SearchError) -> Self {
        if e.is_backend_unavailable() {
            FailureKind::BackendUnavailable(e)
        } else {
            FailureKind::Query(e)
        }
    }
}

impl From<CorrelationFailure> for FailureKind {
    fn from(e: CorrelationFailure) -> Self {
        FailureKind::Correlation(e)
    }
}

/// Metadata about a processing request
#[derive(Debug, Clone)]
pub struct ProcessMetadata {
    /// Identifier used in log lines for this request
    pub request_id: RequestId,

    /// Mode the request ran in
    pub mode: ExtractionMode,

    /// Number of CLI pairs found in the text
    pub pairs_found: usize,

    /// True when the deadline cut the request short
    pub partial: bool,

    /// Processing time in milliseconds
    pub processing_time_ms: u64,
}
