//! Hit module - one record from the log search backend

/// A log record returned by the search backend
///
/// Both fields are required; decoders must fail rather than default when
/// either is absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogHit {
    /// Raw log message text
    pub message: String,

    /// Backend `@timestamp` value (ISO-8601, optionally `Z`-suffixed)
    pub timestamp: String,
}

impl LogHit {
    /// Create a new hit
    pub fn new(message: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            timestamp: timestamp.into(),
        }
    }
}
