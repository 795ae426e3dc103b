//! Configuration file parsing for the server.
//!
//! Loads the bind address plus the `[search]` and `[processor]` sections
//! from TOML. Search credentials are normally supplied through the
//! environment and overlaid after the file is read.

use clitrace_extractor::ProcessorConfig;
use clitrace_search::SearchConfig;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Server configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// A value is present but unusable
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Server configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1")
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Bind port (e.g., 8080)
    #[serde(default = "default_bind_port")]
    pub bind_port: u16,

    /// Search backend settings
    #[serde(default)]
    pub search: SearchConfig,

    /// Processing limits
    #[serde(default)]
    pub processor: ProcessorConfig,
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_bind_port() -> u16 {
    8080
}

impl ServerConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse configuration from a TOML string
    ///
    /// Search credentials may be absent; processor limits must be valid.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: ServerConfig = toml::from_str(toml_str)?;
        config.processor.validate().map_err(ConfigError::Invalid)?;
        Ok(config)
    }

    /// Configuration used when no file is given
    pub fn default_config() -> Self {
        ServerConfig {
            bind_address: default_bind_address(),
            bind_port: default_bind_port(),
            search: SearchConfig::default(),
            processor: ProcessorConfig::default(),
        }
    }

    /// Overlay search settings from the process environment
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.search.apply_env().map_err(ConfigError::Invalid)
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }
}
