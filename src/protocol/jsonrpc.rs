//! JSON-RPC 2.0 envelopes.
//!
//! # Format
//!
//! Request:
//! ```json
//! {"jsonrpc": "2.0", "method": "fetch", "params": {"url": "...", "method": "GET"}, "id": 1}
//! ```
//!
//! Success:
//! ```json
//! {"jsonrpc": "2.0", "result": {"ok": true, "status": 200, "body": "..."}, "id": 1}
//! ```
//!
//! Error:
//! ```json
//! {"jsonrpc": "2.0", "error": {"code": -32000, "message": "boom"}, "id": 1}
//! ```
//!
//! Fetch params are sparse: besides `url` and `method`, only fields the
//! caller supplied are serialized. The service distinguishes "absent"
//! from "present with the default value".

// ============================================================================
// Imports
// ============================================================================

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::identifiers::RequestId;
use crate::model::{Cookie, FetchRequest, Field, Fingerprint, SuppliedFields};

// ============================================================================
// Constants
// ============================================================================

/// Protocol version tag.
pub const JSONRPC_VERSION: &str = "2.0";

/// Default RPC endpoint path.
pub const DEFAULT_RPC_PATH: &str = "/rpc";

// ============================================================================
// Method
// ============================================================================

/// Methods exposed by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    /// `health`
    Health,
    /// `fetch`
    Fetch,
}

impl Method {
    /// Returns the method name.
    #[inline]
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Health => "health",
            Self::Fetch => "fetch",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Request
// ============================================================================

/// A JSON-RPC call envelope.
#[derive(Debug, Clone, Serialize)]
pub struct Request<P> {
    /// Always `"2.0"`.
    pub jsonrpc: &'static str,

    /// Method name.
    pub method: Method,

    /// Method params.
    pub params: P,

    /// Correlation id.
    pub id: RequestId,
}

impl<P: Serialize> Request<P> {
    /// Creates an envelope.
    #[inline]
    #[must_use]
    pub fn new(method: Method, params: P, id: RequestId) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            method,
            params,
            id,
        }
    }
}

impl Request<Map<String, Value>> {
    /// Creates a `health` call with empty params.
    #[inline]
    #[must_use]
    pub fn health(id: RequestId) -> Self {
        Self::new(Method::Health, Map::new(), id)
    }
}

impl Request<FetchParams> {
    /// Creates a `fetch` call with sparse params.
    #[inline]
    #[must_use]
    pub fn fetch(request: &FetchRequest, id: RequestId) -> Self {
        Self::new(Method::Fetch, FetchParams::from_request(request), id)
    }
}

// ============================================================================
// FetchParams
// ============================================================================

/// Sparse `fetch` params.
///
/// `None` fields are absent from the serialized object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchParams {
    /// Target URL.
    pub url: String,

    /// HTTP method.
    pub method: String,

    /// Target headers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<HashMap<String, String>>,

    /// Target body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,

    /// Proxy URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy: Option<String>,

    /// Timeout in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,

    /// Redirect switch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disable_redirect: Option<bool>,

    /// `User-Agent` override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    /// TLS fingerprint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<Fingerprint>,

    /// Browser profile token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub browser: Option<String>,

    /// Cookies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cookies: Option<Vec<Cookie>>,
}

impl FetchParams {
    /// Builds params holding only the caller-supplied fields of `request`.
    #[must_use]
    pub fn from_request(request: &FetchRequest) -> Self {
        let supplied = request.supplied();
        let has = |field| supplied.contains(field);

        Self {
            url: request.url().to_string(),
            method: request.method().to_string(),
            headers: has(Field::Headers).then(|| request.headers().clone()),
            body: has(Field::Body).then(|| request.body().to_string()),
            proxy: has(Field::Proxy)
                .then(|| request.proxy().map(str::to_string))
                .flatten(),
            timeout: has(Field::Timeout).then(|| request.timeout_secs()),
            disable_redirect: has(Field::DisableRedirect).then(|| request.disable_redirect()),
            user_agent: has(Field::UserAgent)
                .then(|| request.user_agent().map(str::to_string))
                .flatten(),
            fingerprint: has(Field::Fingerprint)
                .then(|| request.fingerprint().cloned())
                .flatten(),
            browser: has(Field::Browser)
                .then(|| request.browser().map(str::to_string))
                .flatten(),
            cookies: has(Field::Cookies).then(|| request.cookies().to_vec()),
        }
    }

    /// Returns which optional fields are present.
    #[must_use]
    pub fn present(&self) -> SuppliedFields {
        let checks = [
            (Field::Headers, self.headers.is_some()),
            (Field::Body, self.body.is_some()),
            (Field::Proxy, self.proxy.is_some()),
            (Field::Timeout, self.timeout.is_some()),
            (Field::DisableRedirect, self.disable_redirect.is_some()),
            (Field::UserAgent, self.user_agent.is_some()),
            (Field::Fingerprint, self.fingerprint.is_some()),
            (Field::Browser, self.browser.is_some()),
            (Field::Cookies, self.cookies.is_some()),
        ];
        checks
            .into_iter()
            .filter_map(|(field, present)| present.then_some(field))
            .collect()
    }
}

// ============================================================================
// Response
// ============================================================================

/// A JSON-RPC reply envelope.
///
/// Members are optional so that malformed replies can be reported
/// precisely instead of failing as a generic parse error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Response {
    /// Version tag.
    #[serde(default)]
    pub jsonrpc: Option<String>,

    /// Result value (if success).
    #[serde(default)]
    pub result: Option<Value>,

    /// Error object (if error). `null` is read as absent.
    #[serde(default)]
    pub error: Option<Value>,

    /// Correlation id. May be `null` for server-side parse errors.
    #[serde(default)]
    pub id: Option<Value>,
}

impl Response {
    /// Returns `true` if this is an error response.
    #[inline]
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Checks the envelope against the request id and extracts the result.
    ///
    /// A missing `result` yields an empty object.
    ///
    /// # Errors
    ///
    /// - [`Error::Protocol`] if `jsonrpc` is not `"2.0"`, or a success reply has no id
    /// - [`Error::IdMismatch`] if the reply id differs from `expected`
    /// - [`Error::Remote`] if the reply carries an `error` object
    pub fn into_result(self, expected: RequestId) -> Result<Value> {
        if let Some(version) = &self.jsonrpc
            && version != JSONRPC_VERSION
        {
            return Err(Error::protocol(format!(
                "unsupported jsonrpc version {version:?}"
            )));
        }

        match (&self.id, self.error) {
            // Parse errors are answered with a null id; nothing to correlate.
            (None, Some(error)) => Err(Error::remote_with_raw(error.to_string(), error)),
            (None, None) => Err(Error::protocol("response without id")),
            (Some(id), error) => {
                check_id(id, expected)?;
                match error {
                    Some(error) => Err(Error::remote_with_raw(error.to_string(), error)),
                    None => Ok(self.result.unwrap_or_else(|| Value::Object(Map::new()))),
                }
            }
        }
    }
}

/// Compares a reply id with the id that was sent.
fn check_id(actual: &Value, expected: RequestId) -> Result<()> {
    match actual.as_u64() {
        Some(id) if id == expected.as_u64() => Ok(()),
        Some(id) => Err(Error::id_mismatch(expected, RequestId::new(id))),
        None => Err(Error::protocol(format!(
            "response id {actual} does not match request id {expected}"
        ))),
    }
}

// ============================================================================
// Tests
// ============================================================================
