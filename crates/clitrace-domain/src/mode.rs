//! Mode module - how much work a processing request asks for

use std::fmt;

/// Extraction mode requested by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExtractionMode {
    /// Return delivered CLI values only; no backend access
    #[default]
    OnlyCli,

    /// Correlate each pair against the search backend
    WithSamples,
}

impl ExtractionMode {
    /// Get the wire name of the mode
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionMode::OnlyCli => "only_cli",
            ExtractionMode::WithSamples => "with_samples",
        }
    }

    /// Parse a mode from its wire name
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "only_cli" => Some(ExtractionMode::OnlyCli),
            "with_samples" => Some(ExtractionMode::WithSamples),
            _ => None,
        }
    }
}

impl fmt::Display for ExtractionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
