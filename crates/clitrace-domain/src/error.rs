//! Error types for search backend access

use thiserror::Error;

/// Errors a search backend can report for a single query
///
/// None of these abort a processing request; the orchestrator records them
/// against the affected pair and moves on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// Required backend configuration is absent
    #[error("Search backend not configured: missing {0}")]
    NotConfigured(String),

    /// The request did not complete within the configured timeout
    #[error("Search request timed out")]
    Timeout,

    /// Connection or transport failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// Backend answered with a non-2xx status
    #[error("Search backend returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body (possibly truncated)
        body: String,
    },

    /// Response body is not valid JSON or a hit is malformed
    #[error("Malformed search response: {0}")]
    Decode(String),

    /// Response is JSON but lacks the `hits.hits` array
    #[error("Search response missing hits: {0}")]
    MissingHits(String),
}

impl SearchError {
    /// Whether the failure stems from absent configuration rather than the query
    pub fn is_backend_unavailable(&self) -> bool {
        matches!(self, SearchError::NotConfigured(_))
    }
}
