//! Clitrace Search Client
//!
//! Implementations of the `LogSearch` trait from `clitrace-domain`.
//!
//! # Providers
//!
//! - `ElasticClient`: live Elasticsearch/OpenSearch `_search` integration
//! - `MockSearch`: deterministic canned hits for testing
//!
//! # Examples
//!
//! ```
//! use clitrace_domain::{LogHit, LogSearch};
//! use clitrace_search::MockSearch;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let mut search = MockSearch::default();
//! search.add_hits("42123XYZ", vec![LogHit::new("10:00:00 BYE", "2024-03-09T10:00:00Z")]);
//!
//! let hits = search.search("42123XYZ").await.unwrap();
//! assert_eq!(hits.len(), 1);
//! # }
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod elastic;
pub mod query;
pub mod response;

use clitrace_domain::{LogHit, LogSearch, SearchError};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub use config::SearchConfig;
pub use elastic::ElasticClient;
pub use query::build_search_body;
pub use response::decode_hits;

/// Canned behaviour for one CLI-sent value
#[derive(Debug, Clone)]
enum MockBehavior {
    Hits(Vec<LogHit>),
    Fail(SearchError),
    Panic,
}

/// Mock search backend for deterministic testing
///
/// Returns pre-configured hits without any network calls. Unknown values
/// yield an empty hit list.
///
/// # Examples
///
/// ```
/// use clitrace_domain::{LogSearch, SearchError};
/// use clitrace_search::MockSearch;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let mut search = MockSearch::default();
/// search.add_failure("42123A", SearchError::Timeout);
///
/// assert_eq!(search.search("42123A").await, Err(SearchError::Timeout));
/// assert!(search.search("42123B").await.unwrap().is_empty());
/// assert_eq!(search.call_count(), 2);
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MockSearch {
    behaviors: Arc<Mutex<HashMap<String, MockBehavior>>>,
    delays: Arc<Mutex<HashMap<String, Duration>>>,
    call_count: Arc<Mutex<usize>>,
    configured: bool,
}

impl MockSearch {
    /// Create an empty, configured mock
    pub fn new() -> Self {
        Self {
            behaviors: Arc::new(Mutex::new(HashMap::new())),
            delays: Arc::new(Mutex::new(HashMap::new())),
            call_count: Arc::new(Mutex::new(0)),
            configured: true,
        }
    }

    /// Create a mock that behaves like a backend with no credentials
    pub fn unconfigured() -> Self {
        Self {
            configured: false,
            ..Self::new()
        }
    }

    /// Return `hits` for queries on `cli_sent`
    pub fn add_hits(&mut self, cli_sent: impl Into<String>, hits: Vec<LogHit>) {
        self.behaviors
            .lock()
            .unwrap()
            .insert(cli_sent.into(), MockBehavior::Hits(hits));
    }

    /// Fail queries on `cli_sent` with `error`
    pub fn add_failure(&mut self, cli_sent: impl Into<String>, error: SearchError) {
        self.behaviors
            .lock()
            .unwrap()
            .insert(cli_sent.into(), MockBehavior::Fail(error));
    }

    /// Panic inside queries on `cli_sent`
    pub fn add_panic(&mut self, cli_sent: impl Into<String>) {
        self.behaviors
            .lock()
            .unwrap()
            .insert(cli_sent.into(), MockBehavior::Panic);
    }

    /// Sleep for `delay` before answering queries on `cli_sent`
    pub fn add_delay(&mut self, cli_sent: impl Into<String>, delay: Duration) {
        self.delays.lock().unwrap().insert(cli_sent.into(), delay);
    }

    /// Get the number of times search was called
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        *self.call_count.lock().unwrap() = 0;
    }
}

impl Default for MockSearch {
    fn default() -> Self {
        Self::new()
    }
}

impl LogSearch for MockSearch {
    async fn search(&self, cli_sent: &str) -> Result<Vec<LogHit>, SearchError> {
        *self.call_count.lock().unwrap() += 1;

        if !self.configured {
            return Err(SearchError::NotConfigured("endpoint".to_string()));
        }

        let delay = self.delays.lock().unwrap().get(cli_sent).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let behavior = self.behaviors.lock().unwrap().get(cli_sent).cloned();
        match behavior {
            Some(MockBehavior::Hits(hits)) => Ok(hits),
            Some(MockBehavior::Fail(error)) => Err(error),
            Some(MockBehavior::Panic) => panic!("mock search panic for {}", cli_sent),
            None => Ok(Vec::new()),
        }
    }

    fn is_configured(&self) -> bool {
        self.configured
    }
}
