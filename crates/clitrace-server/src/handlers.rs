//! HTTP request handlers for the server.
//!
//! Exposes CLI processing and a health check using axum.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router as AxumRouter,
};
use clitrace_domain::{ExtractionMode, LogSearch};
use clitrace_extractor::{ExtractorError, ProcessRequest, Processor};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;

/// Shared application state
pub struct AppState<S: LogSearch> {
    /// Processor shared by every request
    pub processor: Arc<Processor<S>>,
}

impl<S: LogSearch> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            processor: Arc::clone(&self.processor),
        }
    }
}

/// Processing request body
#[derive(Debug, Deserialize)]
pub struct ProcessBody {
    /// Call-detail text
    #[serde(default)]
    pub text: String,
    /// `only_cli` or `with_samples`
    #[serde(default)]
    pub mode: Option<String>,
}

/// Processing response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ProcessResponse {
    /// Result lines in pair order
    pub results: Vec<String>,
    /// Number of pairs that produced no result
    pub skipped: usize,
    /// Number of CLI pairs found in the text
    pub pairs_found: usize,
    /// True when the request produced no result lines
    pub no_matches: bool,
    /// Mode the request ran in
    pub mode: String,
    /// Request identifier, as seen in the server log
    pub request_id: String,
    /// True when the request deadline cut processing short
    pub partial: bool,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// Overall health status
    pub status: String,
    /// Whether the search backend has endpoint and credentials
    pub search_configured: bool,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// Request could not be processed
    Processing(ExtractorError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Processing(e) if e.is_caller_error() => (StatusCode::BAD_REQUEST, e.to_string()),
            AppError::Processing(e) => {
                error!("Request failed: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

impl From<ExtractorError> for AppError {
    fn from(e: ExtractorError) -> Self {
        AppError::Processing(e)
    }
}

/// POST /process - Extract CLIs, optionally correlating them with the log store
async fn process<S: LogSearch + 'static>(
    State(state): State<AppState<S>>,
    Json(body): Json<ProcessBody>,
) -> Result<Json<ProcessResponse>, AppError> {
    let mode = body
        .mode
        .unwrap_or_else(|| ExtractionMode::default().as_str().to_string());

    let outcome = state
        .processor
        .process(ProcessRequest::new(body.text, mode))
        .await?;

    Ok(Json(ProcessResponse {
        skipped: outcome.failures.len(),
        pairs_found: outcome.metadata.pairs_found,
        no_matches: outcome.results.is_empty(),
        mode: outcome.metadata.mode.to_string(),
        request_id: outcome.metadata.request_id.to_string(),
        partial: outcome.metadata.partial,
        results: outcome.results,
    }))
}

/// GET /health - Service health
async fn health_check<S: LogSearch + 'static>(
    State(state): State<AppState<S>>,
) -> Json<HealthCheckResponse> {
    let search_configured = state.processor.search().is_configured();

    let status = if search_configured { "healthy" } else { "degraded" };

    Json(HealthCheckResponse {
        status: status.to_string(),
        search_configured,
    })
}

/// Create the axum router with all routes
pub fn create_router<S: LogSearch + 'static>(state: AppState<S>) -> AxumRouter {
    AxumRouter::new()
        .route("/process", post(process::<S>))
        .route("/health", get(health_check::<S>))
        .with_state(state)
}
