//! Error types for the Extractor

use thiserror::Error;

/// Errors that abort a whole processing request
///
/// All of these are caller-input or configuration problems; per-pair
/// failures never surface here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractorError {
    /// Input text is empty or whitespace only
    #[error("Please provide text")]
    EmptyText,

    /// Mode is neither `only_cli` nor `with_samples`
    #[error("Unknown mode: {0}")]
    UnknownMode(String),

    /// Text exceeds maximum length
    #[error("Text too long: {0} bytes (max: {1})")]
    TextTooLong(usize, usize),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ExtractorError {
    /// Whether the error was caused by the caller's input
    pub fn is_caller_error(&self) -> bool {
        !matches!(self, ExtractorError::Config(_))
    }
}

/// Reasons a single correlation attempt yields no record
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CorrelationFailure {
    /// No hit carries the termination-method marker
    #[error("No termination event found")]
    NoTermination,

    /// Termination event has no call identifier
    #[error("Termination event has no call id")]
    MissingCallId,

    /// No establishment event shares the termination's call identifier
    #[error("No establishment event for call id {call_id}")]
    NoEstablishment {
        /// Call identifier taken from the termination event
        call_id: String,
    },

    /// A required field could not be extracted
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    /// CLI-sent value matches neither party of the termination event
    #[error("CLI {cli_sent} is neither caller nor callee of the call")]
    VerificationMismatch {
        /// Marker value the hits were searched for
        cli_sent: String,
    },

    /// Neither the message nor the hit timestamp yields a usable time
    #[error("Unparseable event timestamp: {0}")]
    UnrecoverableTimestamp(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caller_error_classification() {
        assert!(ExtractorError::EmptyText.is_caller_error());
        assert!(ExtractorError::UnknownMode("x".to_string()).is_caller_error());
        assert!(ExtractorError::TextTooLong(10, 5).is_caller_error());
        assert!(!ExtractorError::Config("bad".to_string()).is_caller_error());
    }

    #[test]
    fn test_failure_messages() {
        let failure = CorrelationFailure::NoEstablishment {
            call_id: "abc@10.0.0.1".to_string(),
        };
        assert_eq!(failure.to_string(), "No establishment event for call id abc@10.0.0.1");
        assert_eq!(
            CorrelationFailure::MissingField("to_display").to_string(),
            "Missing field: to_display"
        );
    }
}
