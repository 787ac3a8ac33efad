//! Canonical call results.

// ============================================================================
// Imports
// ============================================================================

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// ============================================================================
// FetchResult
// ============================================================================

/// Outcome of a fetch the service carried out.
///
/// `ok` is the service's own verdict on the target response and is never
/// recomputed from `status` locally. A target answering `404` yields
/// `ok == false` here, not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchResult {
    /// HTTP status of the target response.
    #[serde(default)]
    pub status: u16,

    /// Service verdict on the target response.
    #[serde(default)]
    pub ok: bool,

    /// Target response headers.
    #[serde(default)]
    pub headers: Option<HashMap<String, String>>,

    /// Decoded target response body.
    #[serde(default)]
    pub body: String,
}

impl FetchResult {
    /// Looks up a response header, ignoring ASCII case.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .as_ref()?
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Parses the target's body as JSON.
    ///
    /// The body belongs to the target, not to the service, so a parse
    /// failure is a local error with no [`ErrorKind`](crate::ErrorKind).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the body is not valid JSON
    /// for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body)
            .map_err(|e| Error::invalid_argument(format!("target body is not valid JSON: {e}")))
    }
}

// ============================================================================
// HealthStatus
// ============================================================================

/// Service health report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Status token; `"ok"` when healthy.
    pub status: String,
}

impl HealthStatus {
    /// Creates a status report.
    #[inline]
    #[must_use]
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
        }
    }

    /// Returns `true` if the service reports itself healthy.
    #[inline]
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::{Value, json};

    #[test]
    fn test_fetch_result_partial_parse() {
        let result: FetchResult =
            serde_json::from_value(json!({"status": 200, "ok": true, "body": "hi"})).expect("parse");
        assert_eq!(result.status, 200);
        assert!(result.ok);
        assert_eq!(result.body, "hi");
        assert!(result.headers.is_none());
    }

    #[test]
    fn test_non_success_is_still_a_result() {
        let result: FetchResult =
            serde_json::from_value(json!({"status": 404, "ok": false, "body": ""})).expect("parse");
        assert_eq!(result.status, 404);
        assert!(!result.ok);
    }

    #[test]
    fn test_header_lookup_ignores_case() {
        let result = FetchResult {
            headers: Some(HashMap::from([(
                "Content-Type".to_string(),
                "application/json".to_string(),
            )])),
            ..Default::default()
        };
        assert_eq!(result.header("content-type"), Some("application/json"));
        assert_eq!(result.header("x-missing"), None);
        assert_eq!(FetchResult::default().header("content-type"), None);
    }

    #[test]
    fn test_json_body() {
        let result = FetchResult {
            body: r#"{"ja3_hash":"abc"}"#.to_string(),
            ..Default::default()
        };
        let value: Value = result.json().expect("json body");
        assert_eq!(value["ja3_hash"], "abc");

        let broken = FetchResult {
            body: "<html>".to_string(),
            ..Default::default()
        };
        let err = broken.json::<Value>().unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { .. }));
        assert!(err.is_local());
        assert_eq!(err.kind(), None);
    }

    #[test]
    fn test_health_status() {
        assert!(HealthStatus::new("ok").is_ok());
        assert!(!HealthStatus::new("degraded").is_ok());
    }
}
