//! Field extraction from call-control log messages
//!
//! Messages are free text carrying `key=value` tokens, optionally led by a
//! wall-clock time:
//!
//! ```text
//! 14:22:05 sbc-edge-01 ccs[4021]: method=BYE call_id=a84b4c76e66710@10.1.2.3 from_user=42123XYZ to_user=421911222333 to_display=699954123456
//! ```
//!
//! Every extractor is a pure `&str -> Option<&str>` function backed by a
//! pattern compiled once per process.

use regex::Regex;
use std::sync::LazyLock;

/// Method token marking a call termination
pub const TERMINATION_METHOD: &str = "BYE";

/// Method token marking a call establishment
pub const ESTABLISHMENT_METHOD: &str = "INVITE";

static METHOD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bmethod=(?P<method>[A-Z]+)\b").expect("valid method pattern"));

static CALL_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\bcall_id="?(?P<call_id>[^\s;,"]+)"#).expect("valid call_id pattern")
});

static FROM_USER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\bfrom_user="?(?P<from_user>[^\s;,"]+)"#).expect("valid from_user pattern")
});

static TO_USER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\bto_user="?(?P<to_user>[^\s;,"]+)"#).expect("valid to_user pattern")
});

static TO_DISPLAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\bto_display="?(?P<to_display>[^\s;,"]+)"#).expect("valid to_display pattern")
});

static LEADING_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?P<time>\d{2}:\d{2}:\d{2})\b").expect("valid leading time pattern")
});

fn capture<'a>(pattern: &Regex, group: &str, message: &'a str) -> Option<&'a str> {
    pattern
        .captures(message)
        .and_then(|caps| caps.name(group))
        .map(|m| m.as_str())
}

/// SIP method named by the message, if any
pub fn method(message: &str) -> Option<&str> {
    capture(&METHOD, "method", message)
}

/// Whether the message records a call termination
pub fn is_termination(message: &str) -> bool {
    method(message) == Some(TERMINATION_METHOD)
}

/// Whether the message records a call establishment
pub fn is_establishment(message: &str) -> bool {
    method(message) == Some(ESTABLISHMENT_METHOD)
}

/// Correlation identifier shared by both legs of a call
pub fn call_id(message: &str) -> Option<&str> {
    capture(&CALL_ID, "call_id", message)
}

/// Originating user
pub fn from_user(message: &str) -> Option<&str> {
    capture(&FROM_USER, "from_user", message)
}

/// Destination user
pub fn to_user(message: &str) -> Option<&str> {
    capture(&TO_USER, "to_user", message)
}

/// Destination display number
pub fn to_display(message: &str) -> Option<&str> {
    capture(&TO_DISPLAY, "to_display", message)
}

/// `HH:MM:SS` token at the start of the message
pub fn leading_time(message: &str) -> Option<&str> {
    capture(&LEADING_TIME, "time", message)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BYE: &str = "14:22:05 sbc-edge-01 ccs[4021]: method=BYE call_id=a84b4c76e66710@10.1.2.3 \
                       from_user=42123XYZ to_user=421911222333 to_display=699954123456";

    const INVITE: &str = "14:20:41 sbc-edge-01 ccs[4021]: method=INVITE call_id=a84b4c76e66710@10.1.2.3 \
                          from_user=42123XYZ to_user=0911222333";

    #[test]
    fn test_method_classification() {
        assert!(is_termination(BYE));
        assert!(!is_establishment(BYE));
        assert!(is_establishment(INVITE));
        assert!(!is_termination(INVITE));
    }

    #[test]
    fn test_method_must_be_whole_token() {
        assert!(!is_termination("method=BYEBYE call_id=x"));
        assert!(!is_establishment("method=INVITED call_id=x"));
        assert!(!is_termination("BYE received without method token"));
    }

    #[test]
    fn test_field_extraction() {
        assert_eq!(call_id(BYE), Some("a84b4c76e66710@10.1.2.3"));
        assert_eq!(from_user(BYE), Some("42123XYZ"));
        assert_eq!(to_user(BYE), Some("421911222333"));
        assert_eq!(to_display(BYE), Some("699954123456"));
        assert_eq!(to_user(INVITE), Some("0911222333"));
    }

    #[test]
    fn test_missing_fields() {
        assert_eq!(to_display(INVITE), None);
        assert_eq!(call_id("method=BYE from_user=1"), None);
    }

    #[test]
    fn test_quoted_and_delimited_values() {
        let message = r#"method=BYE;call_id="q1@host";to_display="+699954000""#;
        assert_eq!(call_id(message), Some("q1@host"));
        assert_eq!(to_display(message), Some("+699954000"));
    }

    #[test]
    fn test_prefixed_keys_do_not_match() {
        // "sip_to_user" must not be read as "to_user"
        assert_eq!(to_user("method=BYE sip_to_user=999"), None);
    }

    #[test]
    fn test_leading_time() {
        assert_eq!(leading_time(BYE), Some("14:22:05"));
        assert_eq!(leading_time("  09:01:02 something"), Some("09:01:02"));
        assert_eq!(leading_time("host 14:22:05 method=BYE"), None);
        assert_eq!(leading_time("14:22:051 method=BYE"), None);
    }
}
