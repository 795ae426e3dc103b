//! Query body construction for the `_search` endpoint

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde_json::{json, Value};

/// Field holding the log text
pub const MESSAGE_FIELD: &str = "message";

/// Field holding the event time
pub const TIMESTAMP_FIELD: &str = "@timestamp";

/// Build the search body for one CLI-sent value
///
/// Full-text matches `cli_sent` against the message field, restricted to
/// `[now - lookback_days, now)`, capped at `max_hits`, oldest first.
pub fn build_search_body(
    cli_sent: &str,
    now: DateTime<Utc>,
    lookback_days: u32,
    max_hits: usize,
) -> Value {
    let window_start = now - Duration::days(i64::from(lookback_days));

    json!({
        "query": {
            "bool": {
                "must": [
                    { "match": { MESSAGE_FIELD: cli_sent } }
                ],
                "filter": [
                    {
                        "range": {
                            TIMESTAMP_FIELD: {
                                "gte": format_instant(window_start),
                                "lt": format_instant(now),
                                "format": "strict_date_optional_time"
                            }
                        }
                    }
                ]
            }
        },
        "size": max_hits,
        "sort": [
            { TIMESTAMP_FIELD: { "order": "asc" } }
        ]
    })
}

fn format_instant(t: DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Millis, true)
}
