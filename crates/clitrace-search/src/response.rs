//! Decode `_search` responses into log hits

use crate::query::{MESSAGE_FIELD, TIMESTAMP_FIELD};
use clitrace_domain::{LogHit, SearchError};
use serde_json::Value;

/// Decode a raw `_search` response body
///
/// A body that is not JSON, or a hit lacking a string `message` or
/// `@timestamp`, is [`SearchError::Decode`]. A JSON body without a
/// `hits.hits` array is [`SearchError::MissingHits`].
pub fn decode_hits(body: &str) -> Result<Vec<LogHit>, SearchError> {
    let json: Value = serde_json::from_str(body)
        .map_err(|e| SearchError::Decode(format!("JSON parse error: {}", e)))?;

    let hits = json
        .get("hits")
        .and_then(|h| h.get("hits"))
        .and_then(Value::as_array)
        .ok_or_else(|| SearchError::MissingHits("expected array at hits.hits".to_string()))?;

    hits.iter()
        .enumerate()
        .map(|(idx, hit)| decode_hit(hit).map_err(|e| SearchError::Decode(format!("hit {}: {}", idx, e))))
        .collect()
}

fn decode_hit(hit: &Value) -> Result<LogHit, String> {
    let source = hit
        .get("_source")
        .and_then(Value::as_object)
        .ok_or_else(|| "missing or invalid '_source'".to_string())?;

    let message = source
        .get(MESSAGE_FIELD)
        .and_then(Value::as_str)
        .ok_or_else(|| format!("missing or invalid '{}'", MESSAGE_FIELD))?;

    let timestamp = source
        .get(TIMESTAMP_FIELD)
        .and_then(Value::as_str)
        .ok_or_else(|| format!("missing or invalid '{}'", TIMESTAMP_FIELD))?;

    Ok(LogHit::new(message, timestamp))
}
