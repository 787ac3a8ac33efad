//! Reply objects shared by the JSON bindings.
//!
//! The HTTP-JSON body and the JSON-RPC `result` carry the same object:
//!
//! ```json
//! {
//!   "ok": true,
//!   "status": 200,
//!   "headers": { "Content-Type": "text/html" },
//!   "body": "...",
//!   "error": "optional failure message"
//! }
//! ```
//!
//! A non-empty `error` means the service could not complete the fetch and
//! is surfaced as a remote error, even though the envelope itself succeeded.

// ============================================================================
// Imports
// ============================================================================

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;
use tracing::trace;

use crate::error::{Error, Result};
use crate::model::{FetchResult, HealthStatus};

// ============================================================================
// FetchReply
// ============================================================================

/// Fetch reply as sent by the service.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FetchReply {
    /// Target HTTP status.
    #[serde(default)]
    pub status: u16,

    /// Service verdict.
    #[serde(default)]
    pub ok: bool,

    /// Target response headers.
    #[serde(default)]
    pub headers: Option<HashMap<String, String>>,

    /// Decoded target body (`null` is read as empty).
    #[serde(default)]
    pub body: Option<String>,
}

impl From<FetchReply> for FetchResult {
    fn from(reply: FetchReply) -> Self {
        Self {
            status: reply.status,
            ok: reply.ok,
            headers: reply.headers,
            body: reply.body.unwrap_or_default(),
        }
    }
}

// ============================================================================
// Decoding
// ============================================================================

/// Extracts a non-empty `error` member as a remote error.
///
/// String errors are used verbatim; structured errors are stringified.
/// The whole reply object is kept as the raw payload.
pub fn remote_error(reply: &Value) -> Option<Error> {
    let message = match reply.get("error")? {
        Value::Null => return None,
        Value::String(s) if s.is_empty() => return None,
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    Some(Error::remote_with_raw(message, reply.clone()))
}

/// Decodes a fetch reply object.
///
/// # Errors
///
/// - [`Error::Remote`] if the reply carries a non-empty `error`
/// - [`Error::Json`] if the object does not have the reply shape
pub fn decode_fetch_reply(reply: Value) -> Result<FetchResult> {
    if let Some(err) = remote_error(&reply) {
        return Err(err);
    }

    let reply: FetchReply = serde_json::from_value(reply)?;
    trace!(status = reply.status, ok = reply.ok, "Fetch reply decoded");

    Ok(reply.into())
}

/// Decodes a health reply object (`{"status": "ok"}`).
///
/// # Errors
///
/// - [`Error::Remote`] if the reply carries a non-empty `error`
/// - [`Error::Json`] if `status` is missing or not a string
pub fn decode_health_reply(reply: Value) -> Result<HealthStatus> {
    if let Some(err) = remote_error(&reply) {
        return Err(err);
    }

    Ok(serde_json::from_value(reply)?)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    #[test]
    fn test_decode_success() {
        let result = decode_fetch_reply(json!({
            "ok": true,
            "status": 200,
            "headers": {"Server": "stub"},
            "body": "hi"
        }))
        .expect("decode");

        assert_eq!(result.status, 200);
        assert!(result.ok);
        assert_eq!(result.body, "hi");
        assert_eq!(result.header("server"), Some("stub"));
    }

    #[test]
    fn test_null_body_becomes_empty() {
        let result = decode_fetch_reply(json!({"ok": false, "status": 0, "body": null}))
            .expect("decode");
        assert_eq!(result.body, "");
        assert!(result.headers.is_none());
    }

    #[test]
    fn test_empty_error_is_ignored() {
        let result = decode_fetch_reply(json!({"ok": true, "status": 204, "error": ""}))
            .expect("decode");
        assert_eq!(result.status, 204);
    }

    #[test]
    fn test_error_string_is_remote() {
        let reply = json!({"ok": false, "status": 0, "error": "dial tcp: i/o timeout"});
        let err = decode_fetch_reply(reply.clone()).unwrap_err();

        assert!(err.is_remote());
        assert_eq!(err.to_string(), "Remote error: dial tcp: i/o timeout");
        assert_eq!(err.raw(), Some(&reply));
    }

    #[test]
    fn test_structured_error_is_stringified() {
        let err = remote_error(&json!({"error": {"code": 7}})).expect("remote");
        assert!(err.to_string().contains(r#"{"code":7}"#));
    }

    #[test]
    fn test_wrong_shape_is_protocol() {
        let err = decode_fetch_reply(json!({"status": "two hundred"})).unwrap_err();
        assert!(err.is_protocol());

        let err = decode_fetch_reply(json!([1, 2, 3])).unwrap_err();
        assert!(err.is_protocol());
    }

    #[test]
    fn test_decode_health() {
        let health = decode_health_reply(json!({"status": "ok"})).expect("decode");
        assert!(health.is_ok());

        assert!(decode_health_reply(json!({})).unwrap_err().is_protocol());
        assert!(
            decode_health_reply(json!({"error": "down"}))
                .unwrap_err()
                .is_remote()
        );
    }
}
