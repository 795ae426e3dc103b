//! Pair module - a CLI record lifted from two adjacent input lines

use std::fmt;

/// Prefix identifying a marker line in call-detail text
pub const MARKER_PREFIX: &str = "42123";

/// Literal text the switch prints when no calling line identity was sent
pub const NO_CLI_PRESENTED: &str = "No CLI presented";

/// Received value recorded for a pair whose CLI was withheld
pub const ANONYMOUS: &str = "anonymous";

/// A (sent, received) CLI association
///
/// `sent` is the marker line itself; `received` is the line that followed it,
/// which is a numeric token, a `+`-prefixed numeric token, or [`ANONYMOUS`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CliPair {
    /// Marker line (starts with [`MARKER_PREFIX`])
    pub sent: String,

    /// Delivered CLI value
    pub received: String,
}

impl CliPair {
    /// Create a new pair
    pub fn new(sent: impl Into<String>, received: impl Into<String>) -> Self {
        Self {
            sent: sent.into(),
            received: received.into(),
        }
    }

    /// Whether the received side is the anonymous sentinel
    pub fn is_anonymous(&self) -> bool {
        self.received == ANONYMOUS
    }
}

impl fmt::Display for CliPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.sent, self.received)
    }
}

/// Check whether a line is a numeric CLI token
///
/// Accepts a run of ASCII digits, optionally preceded by a single `+`.
///
/// # Examples
///
/// ```
/// use clitrace_domain::pair::is_cli_token;
///
/// assert!(is_cli_token("100"));
/// assert!(is_cli_token("+3312345"));
/// assert!(!is_cli_token("+"));
/// assert!(!is_cli_token("12a"));
/// ```
pub fn is_cli_token(s: &str) -> bool {
    let digits = s.strip_prefix('+').unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Check whether a line starts a CLI record
pub fn is_marker_line(s: &str) -> bool {
    s.starts_with(MARKER_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_token_accepts_digits() {
        assert!(is_cli_token("0"));
        assert!(is_cli_token("421900123456"));
    }

    #[test]
    fn test_cli_token_accepts_plus_prefix() {
        assert!(is_cli_token("+421900123456"));
    }

    #[test]
    fn test_cli_token_rejects_other_text() {
        assert!(!is_cli_token(""));
        assert!(!is_cli_token("+"));
        assert!(!is_cli_token("++12"));
        assert!(!is_cli_token("12 34"));
        assert!(!is_cli_token("-12"));
        assert!(!is_cli_token("١٢٣"));
    }

    #[test]
    fn test_marker_line() {
        assert!(is_marker_line("42123XYZ"));
        assert!(is_marker_line("42123"));
        assert!(!is_marker_line(" 42123"));
        assert!(!is_marker_line("4212"));
    }

    #[test]
    fn test_anonymous_pair() {
        let pair = CliPair::new("42123Q", ANONYMOUS);
        assert!(pair.is_anonymous());
        assert!(!CliPair::new("42123Q", "100").is_anonymous());
    }

    #[test]
    fn test_pair_display() {
        let pair = CliPair::new("42123ABC", "+3312345");
        assert_eq!(pair.to_string(), "42123ABC -> +3312345");
    }
}
