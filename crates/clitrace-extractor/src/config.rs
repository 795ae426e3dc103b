//! Configuration for the Processor

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the Processor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessorConfig {
    /// Maximum input text length (bytes)
    #[serde(default = "default_max_text_length")]
    pub max_text_length: usize,

    /// Maximum pairs queried against the backend at once
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,

    /// Overall budget for one `with_samples` request (seconds)
    ///
    /// When it elapses, outstanding backend calls are cancelled and the
    /// results gathered so far are returned.
    #[serde(default)]
    pub request_deadline_secs: Option<u64>,
}

fn default_max_text_length() -> usize {
    1_000_000
}

fn default_max_concurrency() -> usize {
    4
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            max_text_length: default_max_text_length(),
            max_concurrency: default_max_concurrency(),
            request_deadline_secs: None,
        }
    }
}

impl ProcessorConfig {
    /// One pair at a time, no deadline
    pub fn sequential() -> Self {
        Self {
            max_concurrency: 1,
            ..Self::default()
        }
    }

    /// Get the request deadline as a Duration
    pub fn request_deadline(&self) -> Option<Duration> {
        self.request_deadline_secs.map(Duration::from_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_text_length == 0 {
            return Err("max_text_length must be greater than 0".to_string());
        }
        if self.max_concurrency == 0 {
            return Err("max_concurrency must be greater than 0".to_string());
        }
        if self.request_deadline_secs == Some(0) {
            return Err("request_deadline_secs must be greater than 0".to_string());
        }
        Ok(())
    }
}
