//! Cross-event correlation
//!
//! Rebuilds one verified call record from the hits returned for a CLI-sent
//! value: the first termination event names a call id, the first
//! establishment event with the same call id supplies the callee, and the
//! termination event supplies everything else.
//!
//! Ties are broken by input order only. The backend sorts hits by ascending
//! timestamp, so "first" means "earliest".

use crate::error::CorrelationFailure;
use crate::numbering::derive_from_number;
use crate::patterns;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use clitrace_domain::LogHit;

/// Fields read from a termination event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminationFields {
    /// Originating user
    pub from_user: String,
    /// Destination user
    pub to_user: String,
    /// Destination display number
    pub to_display: String,
}

/// Fields read from an establishment event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EstablishmentFields {
    /// Destination user
    pub to_user: String,
}

/// A termination event matched to its establishment event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrelatedRecord {
    /// Call identifier shared by both events
    pub call_id: String,
    /// Termination-side fields
    pub termination: TerminationFields,
    /// Establishment-side fields
    pub establishment: EstablishmentFields,
    /// `YYYY-MM-DD HH:MM:SS`, UTC
    pub timestamp: String,
}

impl CorrelatedRecord {
    /// Derived "from" number
    pub fn from_number(&self) -> String {
        derive_from_number(&self.termination.to_display)
    }

    /// Render the record as a result line
    pub fn format(&self, delivered_cli: &str) -> String {
        format!(
            "{} UTC from {} to {} | CLI displayed {}",
            self.timestamp,
            self.from_number(),
            self.establishment.to_user,
            delivered_cli
        )
    }
}

/// Correlate hits for one pair and render the result line
pub fn correlate(
    hits: &[LogHit],
    cli_sent: &str,
    delivered_cli: &str,
) -> Result<String, CorrelationFailure> {
    correlate_record(hits, cli_sent).map(|record| record.format(delivered_cli))
}

/// Correlate hits for one pair into a verified record
pub fn correlate_record(
    hits: &[LogHit],
    cli_sent: &str,
) -> Result<CorrelatedRecord, CorrelationFailure> {
    let termination = hits
        .iter()
        .find(|hit| patterns::is_termination(&hit.message))
        .ok_or(CorrelationFailure::NoTermination)?;

    let call_id = patterns::call_id(&termination.message)
        .ok_or(CorrelationFailure::MissingCallId)?;

    let establishment = hits
        .iter()
        .find(|hit| {
            patterns::is_establishment(&hit.message)
                && patterns::call_id(&hit.message) == Some(call_id)
        })
        .ok_or_else(|| CorrelationFailure::NoEstablishment {
            call_id: call_id.to_string(),
        })?;

    let termination_fields = TerminationFields {
        from_user: required(patterns::from_user(&termination.message), "from_user")?,
        to_user: required(patterns::to_user(&termination.message), "to_user")?,
        to_display: required(patterns::to_display(&termination.message), "to_display")?,
    };
    let establishment_fields = EstablishmentFields {
        to_user: required(patterns::to_user(&establishment.message), "establishment to_user")?,
    };

    if cli_sent != termination_fields.from_user && cli_sent != termination_fields.to_user {
        return Err(CorrelationFailure::VerificationMismatch {
            cli_sent: cli_sent.to_string(),
        });
    }

    let timestamp = derive_timestamp(&termination.message, &termination.timestamp)?;

    Ok(CorrelatedRecord {
        call_id: call_id.to_string(),
        termination: termination_fields,
        establishment: establishment_fields,
        timestamp,
    })
}

fn required(value: Option<&str>, field: &'static str) -> Result<String, CorrelationFailure> {
    value
        .map(str::to_string)
        .ok_or(CorrelationFailure::MissingField(field))
}

/// Event time as `YYYY-MM-DD HH:MM:SS`
///
/// Prefers the message's own leading time on the hit's date; falls back to
/// the hit timestamp alone.
pub fn derive_timestamp(message: &str, hit_timestamp: &str) -> Result<String, CorrelationFailure> {
    let hit_time = parse_hit_timestamp(hit_timestamp)
        .ok_or_else(|| CorrelationFailure::UnrecoverableTimestamp(hit_timestamp.to_string()))?;

    let message_time = patterns::leading_time(message)
        .and_then(|t| NaiveTime::parse_from_str(t, "%H:%M:%S").ok());

    Ok(match message_time {
        Some(time) => format!("{} {}", format_date(hit_time.date()), time.format("%H:%M:%S")),
        None => hit_time.format("%Y-%m-%d %H:%M:%S").to_string(),
    })
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parse a backend `@timestamp` into naive UTC
fn parse_hit_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc).naive_utc());
    }

    let naive = raw.strip_suffix('Z').unwrap_or(raw);
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(naive, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CALL_ID: &str = "a84b4c76e66710@10.1.2.3";

    fn bye(call_id: &str, from: &str, to: &str, display: &str) -> LogHit {
        LogHit::new(
            format!(
                "14:22:05 sbc-edge-01 ccs[4021]: method=BYE call_id={} from_user={} to_user={} to_display={}",
                call_id, from, to, display
            ),
            "2024-03-09T14:22:05.120Z",
        )
    }

    fn invite(call_id: &str, to: &str) -> LogHit {
        LogHit::new(
            format!(
                "14:20:41 sbc-edge-01 ccs[4021]: method=INVITE call_id={} from_user=42123XYZ to_user={}",
                call_id, to
            ),
            "2024-03-09T14:20:41.003Z",
        )
    }

    fn call_hits() -> Vec<LogHit> {
        vec![
            invite(CALL_ID, "0911222333"),
            LogHit::new("14:21:00 method=ACK call_id=a84b4c76e66710@10.1.2.3", "2024-03-09T14:21:00Z"),
            bye(CALL_ID, "42123XYZ", "421911222333", "699954123456"),
        ]
    }

    #[test]
    fn test_full_correlation() {
        let result = correlate(&call_hits(), "42123XYZ", "100").unwrap();
        assert_eq!(
            result,
            "2024-03-09 14:22:05 UTC from 421123456 to 0911222333 | CLI displayed 100"
        );
    }

    #[test]
    fn test_record_fields() {
        let record = correlate_record(&call_hits(), "42123XYZ").unwrap();
        assert_eq!(record.call_id, CALL_ID);
        assert_eq!(record.termination.to_display, "699954123456");
        assert_eq!(record.establishment.to_user, "0911222333");
        assert_eq!(record.from_number(), "421123456");
    }

    #[test]
    fn test_non_matching_display_prefix_uses_default_from() {
        let hits = vec![
            invite(CALL_ID, "0911222333"),
            bye(CALL_ID, "42123XYZ", "421911222333", "0212345678"),
        ];
        let result = correlate(&hits, "42123XYZ", "+3312345").unwrap();
        assert_eq!(
            result,
            "2024-03-09 14:22:05 UTC from unknown to 0911222333 | CLI displayed +3312345"
        );
    }

    #[test]
    fn test_no_termination() {
        let hits = vec![invite(CALL_ID, "0911222333")];
        assert_eq!(
            correlate(&hits, "42123XYZ", "100"),
            Err(CorrelationFailure::NoTermination)
        );
        assert_eq!(correlate(&[], "42123XYZ", "100"), Err(CorrelationFailure::NoTermination));
    }

    #[test]
    fn test_termination_without_call_id() {
        let hits = vec![LogHit::new(
            "14:22:05 method=BYE from_user=42123XYZ to_user=1 to_display=2",
            "2024-03-09T14:22:05Z",
        )];
        assert_eq!(correlate(&hits, "42123XYZ", "100"), Err(CorrelationFailure::MissingCallId));
    }

    #[test]
    fn test_no_establishment_with_same_call_id() {
        let hits = vec![
            invite("other-call@10.1.2.3", "0911222333"),
            bye(CALL_ID, "42123XYZ", "421911222333", "699954123456"),
        ];
        assert_eq!(
            correlate(&hits, "42123XYZ", "100"),
            Err(CorrelationFailure::NoEstablishment {
                call_id: CALL_ID.to_string()
            })
        );
    }

    #[test]
    fn test_call_id_must_match_exactly() {
        // A longer call id that merely contains the termination's id is a different call
        let hits = vec![
            invite("a84b4c76e66710@10.1.2.30", "0911222333"),
            bye(CALL_ID, "42123XYZ", "421911222333", "699954123456"),
        ];
        assert!(matches!(
            correlate(&hits, "42123XYZ", "100"),
            Err(CorrelationFailure::NoEstablishment { .. })
        ));
    }

    #[test]
    fn test_establishment_after_termination_still_matches() {
        let mut hits = call_hits();
        hits.reverse();
        assert!(correlate(&hits, "42123XYZ", "100").is_ok());
    }

    #[test]
    fn test_missing_termination_field() {
        let hits = vec![
            invite(CALL_ID, "0911222333"),
            LogHit::new(
                format!("14:22:05 method=BYE call_id={} from_user=42123XYZ to_user=421911222333", CALL_ID),
                "2024-03-09T14:22:05Z",
            ),
        ];
        assert_eq!(
            correlate(&hits, "42123XYZ", "100"),
            Err(CorrelationFailure::MissingField("to_display"))
        );
    }

    #[test]
    fn test_missing_establishment_field() {
        let hits = vec![
            LogHit::new(format!("method=INVITE call_id={}", CALL_ID), "2024-03-09T14:20:41Z"),
            bye(CALL_ID, "42123XYZ", "421911222333", "699954123456"),
        ];
        assert_eq!(
            correlate(&hits, "42123XYZ", "100"),
            Err(CorrelationFailure::MissingField("establishment to_user"))
        );
    }

    #[test]
    fn test_verification_mismatch() {
        let hits = vec![
            invite(CALL_ID, "0911222333"),
            bye(CALL_ID, "42123OTHER", "421911222333", "699954123456"),
        ];
        assert_eq!(
            correlate(&hits, "42123XYZ", "100"),
            Err(CorrelationFailure::VerificationMismatch {
                cli_sent: "42123XYZ".to_string()
            })
        );
    }

    #[test]
    fn test_verification_accepts_destination_user() {
        let hits = vec![
            invite(CALL_ID, "0911222333"),
            bye(CALL_ID, "421900000000", "42123XYZ", "699954123456"),
        ];
        assert!(correlate(&hits, "42123XYZ", "100").is_ok());
    }

    #[test]
    fn test_first_termination_wins() {
        let hits = vec![
            invite(CALL_ID, "0911222333"),
            invite("second@10.1.2.3", "0922000000"),
            bye(CALL_ID, "42123XYZ", "421911222333", "699954111"),
            bye("second@10.1.2.3", "42123XYZ", "421911222333", "699954222"),
        ];
        let record = correlate_record(&hits, "42123XYZ").unwrap();
        assert_eq!(record.call_id, CALL_ID);
        assert_eq!(record.from_number(), "421111");
    }

    #[test]
    fn test_correlation_is_idempotent() {
        let hits = call_hits();
        let first = correlate(&hits, "42123XYZ", "100");
        let second = correlate(&hits, "42123XYZ", "100");
        assert_eq!(first, second);
    }

    #[test]
    fn test_timestamp_falls_back_to_hit_time() {
        let hits = vec![
            invite(CALL_ID, "0911222333"),
            LogHit::new(
                format!(
                    "sbc-edge-01: method=BYE call_id={} from_user=42123XYZ to_user=1 to_display=699954",
                    CALL_ID
                ),
                "2024-03-09T23:59:58Z",
            ),
        ];
        let result = correlate(&hits, "42123XYZ", "100").unwrap();
        assert!(result.starts_with("2024-03-09 23:59:58 UTC from 421 to 0911222333"));
    }

    #[test]
    fn test_unparseable_hit_timestamp() {
        let mut hits = call_hits();
        hits[2].timestamp = "yesterday".to_string();
        assert_eq!(
            correlate(&hits, "42123XYZ", "100"),
            Err(CorrelationFailure::UnrecoverableTimestamp("yesterday".to_string()))
        );
    }

    #[test]
    fn test_derive_timestamp_variants() {
        assert_eq!(
            derive_timestamp("08:00:01 method=BYE", "2024-03-09T07:59:59Z").unwrap(),
            "2024-03-09 08:00:01"
        );
        assert_eq!(
            derive_timestamp("method=BYE", "2024-03-09T07:59:59.999").unwrap(),
            "2024-03-09 07:59:59"
        );
        // Offsets are normalised to UTC
        assert_eq!(
            derive_timestamp("method=BYE", "2024-03-10T01:30:00+02:00").unwrap(),
            "2024-03-09 23:30:00"
        );
        // An impossible clock reading in the message falls back to the hit time
        assert_eq!(
            derive_timestamp("27:61:00 method=BYE", "2024-03-09T07:59:59Z").unwrap(),
            "2024-03-09 07:59:59"
        );
    }
}
