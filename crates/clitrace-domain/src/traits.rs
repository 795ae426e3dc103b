//! Trait definitions for external interactions
//!
//! These traits define the boundary between the correlation engine and the
//! log store. Implementations live in `clitrace-search`.

use crate::{LogHit, SearchError};
use std::future::Future;

/// Time-bounded full-text search over the log store
///
/// Implemented by the infrastructure layer (clitrace-search)
pub trait LogSearch: Send + Sync {
    /// Fetch hits whose message matches `cli_sent`, oldest first
    fn search(
        &self,
        cli_sent: &str,
    ) -> impl Future<Output = Result<Vec<LogHit>, SearchError>> + Send;

    /// Whether the backend has everything it needs to issue queries
    fn is_configured(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedSearch(Vec<LogHit>);

    impl LogSearch for FixedSearch {
        async fn search(&self, _cli_sent: &str) -> Result<Vec<LogHit>, SearchError> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn test_trait_default_is_configured() {
        let search = FixedSearch(vec![LogHit::new("msg", "2024-01-01T00:00:00Z")]);
        assert!(search.is_configured());
        assert_eq!(search.search("x").await.unwrap().len(), 1);
    }
}
