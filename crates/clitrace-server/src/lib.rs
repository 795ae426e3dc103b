//! Clitrace Server
//!
//! HTTP front end for CLI extraction and log correlation.

#![warn(missing_docs)]

pub mod config;
pub mod handlers;

use clitrace_extractor::Processor;
use clitrace_search::ElasticClient;
use config::ServerConfig;
use handlers::{create_router, AppState};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Server error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Search client could not be created
    #[error("Search client error: {0}")]
    Search(#[from] clitrace_domain::SearchError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Install the global tracing subscriber
///
/// Honors `RUST_LOG`; defaults to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // A subscriber installed earlier (e.g. by a test harness) wins
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Build the shared application state from configuration
///
/// Incomplete search settings are reported but do not prevent startup.
pub fn build_state(config: &ServerConfig) -> Result<AppState<ElasticClient>, ServerError> {
    match config.search.validate() {
        Ok(()) => info!(
            "Search backend: {} (index {}, timeout {}s)",
            config.search.endpoint.as_deref().unwrap_or_default(),
            config.search.index,
            config.search.timeout_secs
        ),
        Err(reason) => error!(
            "Search backend is not usable: {}; with_samples requests will skip every pair",
            reason
        ),
    }

    let search = ElasticClient::new(config.search.clone())?;
    let processor = Processor::new(search, config.processor.clone());

    Ok(AppState {
        processor: Arc::new(processor),
    })
}

/// Start the HTTP server
///
/// Builds the processor and search client, then starts the axum server.
pub async fn start_server(config: ServerConfig) -> Result<(), ServerError> {
    init_tracing();

    info!("Starting Clitrace Server");
    info!("Bind address: {}", config.bind_addr());
    info!(
        "Max concurrency: {}, request deadline: {}",
        config.processor.max_concurrency,
        config
            .processor
            .request_deadline_secs
            .map(|s| format!("{}s", s))
            .unwrap_or_else(|| "none".to_string())
    );

    let state = build_state(&config)?;
    let app = create_router(state);

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Server listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::Server(e.to_string()))?;

    Ok(())
}
