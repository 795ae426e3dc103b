//! Elasticsearch-compatible search client
//!
//! Issues one `POST {endpoint}/{index}/_search` per CLI-sent value with basic
//! authentication and the configured timeout. Failures are returned, never
//! retried.
//!
//! # Examples
//!
//! ```no_run
//! use clitrace_search::{ElasticClient, SearchConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = SearchConfig::new("http://localhost:9200", "elastic", "changeme");
//! let client = ElasticClient::new(config)?;
//! let hits = client.query("42123XYZ").await?;
//! println!("{} hits", hits.len());
//! # Ok(())
//! # }
//! ```

use crate::config::SearchConfig;
use crate::query::build_search_body;
use crate::response::decode_hits;
use chrono::{DateTime, Utc};
use clitrace_domain::{LogHit, LogSearch, SearchError};
use tracing::{debug, warn};

/// Longest response body kept in a [`SearchError::Status`]
const MAX_ERROR_BODY_CHARS: usize = 512;

/// Search client for an Elasticsearch or OpenSearch cluster
pub struct ElasticClient {
    config: SearchConfig,
    client: reqwest::Client,
}

impl ElasticClient {
    /// Create a new client
    ///
    /// Incomplete configuration is accepted; every query then fails with
    /// [`SearchError::NotConfigured`] before touching the network.
    pub fn new(config: SearchConfig) -> Result<Self, SearchError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| SearchError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// The configuration this client was built with
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Query the backend for hits mentioning `cli_sent`
    pub async fn query(&self, cli_sent: &str) -> Result<Vec<LogHit>, SearchError> {
        self.query_at(cli_sent, Utc::now()).await
    }

    /// Query with an explicit "now" for the time window
    pub async fn query_at(
        &self,
        cli_sent: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<LogHit>, SearchError> {
        let (endpoint, username, password) = self.credentials()?;
        let url = format!(
            "{}/{}/_search",
            endpoint.trim_end_matches('/'),
            self.config.index
        );
        let body = build_search_body(
            cli_sent,
            now,
            self.config.lookback_days,
            self.config.max_hits,
        );

        debug!("Searching {} for '{}'", url, cli_sent);

        let response = self
            .client
            .post(&url)
            .basic_auth(username, Some(password))
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let text = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            warn!("Search for '{}' returned HTTP {}", cli_sent, status);
            return Err(SearchError::Status {
                status: status.as_u16(),
                body: text.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        let hits = decode_hits(&text)?;
        debug!("Search for '{}' returned {} hits", cli_sent, hits.len());
        Ok(hits)
    }

    fn credentials(&self) -> Result<(&str, &str, &str), SearchError> {
        if let Some(field) = self.config.missing_field() {
            return Err(SearchError::NotConfigured(field.to_string()));
        }
        match (
            self.config.endpoint.as_deref(),
            self.config.username.as_deref(),
            self.config.password.as_deref(),
        ) {
            (Some(endpoint), Some(username), Some(password)) => Ok((endpoint, username, password)),
            _ => Err(SearchError::NotConfigured("endpoint".to_string())),
        }
    }
}

fn transport_error(e: reqwest::Error) -> SearchError {
    if e.is_timeout() {
        SearchError::Timeout
    } else if e.is_decode() {
        SearchError::Decode(e.to_string())
    } else {
        SearchError::Transport(e.to_string())
    }
}

impl LogSearch for ElasticClient {
    async fn search(&self, cli_sent: &str) -> Result<Vec<LogHit>, SearchError> {
        self.query(cli_sent).await
    }

    fn is_configured(&self) -> bool {
        self.config.missing_field().is_none()
    }
}
