//! Response envelope decoding.
//!
//! Every UptimeRobot response is a JSON object with a `stat` field:
//! ```json
//! { "stat": "ok", "monitors": [ ... ] }
//! { "stat": "fail", "error": { "type": "invalid_parameter", "message": "..." } }
//! ```
//! The remaining fields vary per endpoint, so the decoded envelope is kept as
//! an untyped JSON map for callers to pick apart.

use serde_json::{Map, Value};

use ur_core::constants::STAT_OK;
use ur_core::error::{UrError, UrResult};

/// Decoded response envelope.
pub type ResponseMap = Map<String, Value>;

/// Decode and validate a response body.
///
/// Fails with [`UrError::Decode`] if the body is not valid JSON or is an array
/// or scalar, and with [`UrError::Api`] if `stat` is anything but `"ok"`.
/// A `null` body decodes to an empty envelope and so reports `Api("null")`.
pub fn decode_envelope(body: &str) -> UrResult<ResponseMap> {
    let decode_error = |message: String| UrError::Decode {
        body: body.to_string(),
        message,
    };
    let envelope = match serde_json::from_str::<Value>(body).map_err(|e| decode_error(e.to_string()))? {
        Value::Object(map) => map,
        // A literal `null` is valid JSON with no status; it fails the `stat` check below.
        Value::Null => ResponseMap::new(),
        other => {
            return Err(decode_error(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            )))
        }
    };

    if !is_ok(&envelope) {
        let detail = envelope.get("error").unwrap_or(&Value::Null);
        return Err(UrError::Api(detail.to_string()));
    }

    Ok(envelope)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// The envelope's `stat` marker, if it is a string.
pub fn stat(envelope: &ResponseMap) -> Option<&str> {
    envelope.get("stat").and_then(Value::as_str)
}

/// Whether the envelope reports success.
pub fn is_ok(envelope: &ResponseMap) -> bool {
    stat(envelope) == Some(STAT_OK)
}
