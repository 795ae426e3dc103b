//! Configuration for the search backend
//!
//! Endpoint and credentials usually come from the environment; everything
//! else has defaults. Incomplete configuration is allowed to load so that the
//! service can still answer `only_cli` requests, but it is detectable up
//! front through [`SearchConfig::missing_field`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Environment variable holding the backend base URL
pub const ENV_URL: &str = "CLITRACE_SEARCH_URL";
/// Environment variable holding the index pattern
pub const ENV_INDEX: &str = "CLITRACE_SEARCH_INDEX";
/// Environment variable holding the basic-auth user
pub const ENV_USER: &str = "CLITRACE_SEARCH_USER";
/// Environment variable holding the basic-auth password
pub const ENV_PASSWORD: &str = "CLITRACE_SEARCH_PASSWORD";
/// Environment variable holding the request timeout in seconds
pub const ENV_TIMEOUT_SECS: &str = "CLITRACE_SEARCH_TIMEOUT_SECS";

/// Search backend configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Base URL (e.g., "https://logs.example.net:9200")
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Index or index pattern to query
    #[serde(default = "default_index")]
    pub index: String,

    /// Basic-auth user
    #[serde(default)]
    pub username: Option<String>,

    /// Basic-auth password
    #[serde(default)]
    pub password: Option<String>,

    /// Per-request timeout (seconds)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Size of the time window searched, ending now (days)
    #[serde(default = "default_lookback_days")]
    pub lookback_days: u32,

    /// Maximum hits fetched per query
    #[serde(default = "default_max_hits")]
    pub max_hits: usize,
}

fn default_index() -> String {
    "logs-*".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_lookback_days() -> u32 {
    3
}

fn default_max_hits() -> usize {
    100
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            index: default_index(),
            username: None,
            password: None,
            timeout_secs: default_timeout_secs(),
            lookback_days: default_lookback_days(),
            max_hits: default_max_hits(),
        }
    }
}

impl fmt::Debug for SearchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchConfig")
            .field("endpoint", &self.endpoint)
            .field("index", &self.index)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("timeout_secs", &self.timeout_secs)
            .field("lookback_days", &self.lookback_days)
            .field("max_hits", &self.max_hits)
            .finish()
    }
}

impl SearchConfig {
    /// Create a fully populated configuration
    pub fn new(
        endpoint: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: Some(endpoint.into()),
            username: Some(username.into()),
            password: Some(password.into()),
            ..Self::default()
        }
    }

    /// Get the request timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Name of the first required setting that is absent or empty
    pub fn missing_field(&self) -> Option<&'static str> {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());

        if !present(&self.endpoint) {
            Some("endpoint")
        } else if !present(&self.username) {
            Some("username")
        } else if !present(&self.password) {
            Some("password")
        } else {
            None
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if let Some(field) = self.missing_field() {
            return Err(format!("search.{} is required", field));
        }
        if self.index.trim().is_empty() {
            return Err("search.index must not be empty".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("search.timeout_secs must be greater than 0".to_string());
        }
        if self.lookback_days == 0 {
            return Err("search.lookback_days must be greater than 0".to_string());
        }
        if self.max_hits == 0 {
            return Err("search.max_hits must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Overlay values from the process environment
    pub fn apply_env(&mut self) -> Result<(), String> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Overlay values from an arbitrary key lookup
    ///
    /// Keys are the `CLITRACE_SEARCH_*` names; empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = get(ENV_URL) {
            self.endpoint = Some(url);
        }
        if let Some(index) = get(ENV_INDEX) {
            self.index = index;
        }
        if let Some(user) = get(ENV_USER) {
            self.username = Some(user);
        }
        if let Some(password) = get(ENV_PASSWORD) {
            self.password = Some(password);
        }
        if let Some(timeout) = get(ENV_TIMEOUT_SECS) {
            self.timeout_secs = timeout
                .trim()
                .parse()
                .map_err(|e| format!("{} is not a number: {}", ENV_TIMEOUT_SECS, e))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_default_config_is_incomplete() {
        let config = SearchConfig::default();
        assert_eq!(config.missing_field(), Some("endpoint"));
        assert!(config.validate().is_err());
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.lookback_days, 3);
        assert_eq!(config.max_hits, 100);
    }

    #[test]
    fn test_complete_config_is_valid() {
        let config = SearchConfig::new("http://localhost:9200", "elastic", "secret");
        assert_eq!(config.missing_field(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_blank_password_counts_as_missing() {
        let mut config = SearchConfig::new("http://localhost:9200", "elastic", "secret");
        config.password = Some("   ".to_string());
        assert_eq!(config.missing_field(), Some("password"));
    }

    #[test]
    fn test_zero_timeout_is_invalid() {
        let mut config = SearchConfig::new("http://localhost:9200", "elastic", "secret");
        config.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_overrides_fill_missing_fields() {
        let mut config = SearchConfig::default();
        config
            .apply_overrides(lookup(&[
                (ENV_URL, "https://search:9200"),
                (ENV_USER, "reader"),
                (ENV_PASSWORD, "pw"),
                (ENV_TIMEOUT_SECS, "25"),
            ]))
            .unwrap();

        assert_eq!(config.endpoint.as_deref(), Some("https://search:9200"));
        assert_eq!(config.username.as_deref(), Some("reader"));
        assert_eq!(config.timeout_secs, 25);
        assert_eq!(config.index, "logs-*");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_override_is_ignored() {
        let mut config = SearchConfig::new("http://a:9200", "u", "p");
        config.apply_overrides(lookup(&[(ENV_URL, "")])).unwrap();
        assert_eq!(config.endpoint.as_deref(), Some("http://a:9200"));
    }

    #[test]
    fn test_bad_timeout_override() {
        let mut config = SearchConfig::default();
        let result = config.apply_overrides(lookup(&[(ENV_TIMEOUT_SECS, "soon")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = SearchConfig::new("http://a:9200", "u", "hunter2");
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<redacted>"));
    }
}
