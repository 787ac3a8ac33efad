//! HTTP-JSON wire shapes.
//!
//! `POST /fetch` carries the complete request, every field present:
//!
//! ```json
//! {
//!   "url": "https://example.com",
//!   "method": "GET",
//!   "headers": {},
//!   "body": "",
//!   "proxy": null,
//!   "timeout": 30,
//!   "disableRedirect": false,
//!   "userAgent": null,
//!   "fingerprint": null,
//!   "browser": null,
//!   "cookies": []
//! }
//! ```
//!
//! `GET /health` has no body. Replies are decoded by [`super::reply`].

// ============================================================================
// Imports
// ============================================================================

use std::collections::HashMap;

use serde::Serialize;

use crate::model::{Cookie, FetchRequest, Fingerprint};

// ============================================================================
// Constants
// ============================================================================

/// Fetch endpoint path.
pub const FETCH_PATH: &str = "/fetch";

/// Health endpoint path.
pub const HEALTH_PATH: &str = "/health";

// ============================================================================
// FetchBody
// ============================================================================

/// Full `POST /fetch` body, borrowed from a [`FetchRequest`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchBody<'a> {
    /// Target URL.
    pub url: &'a str,
    /// HTTP method.
    pub method: &'a str,
    /// Target headers.
    pub headers: &'a HashMap<String, String>,
    /// Target body.
    pub body: &'a str,
    /// Proxy URL.
    pub proxy: Option<&'a str>,
    /// Timeout in seconds.
    pub timeout: u64,
    /// Redirect switch.
    pub disable_redirect: bool,
    /// `User-Agent` override.
    pub user_agent: Option<&'a str>,
    /// TLS fingerprint.
    pub fingerprint: Option<&'a Fingerprint>,
    /// Browser profile token.
    pub browser: Option<&'a str>,
    /// Cookies.
    pub cookies: &'a [Cookie],
}

impl<'a> From<&'a FetchRequest> for FetchBody<'a> {
    fn from(request: &'a FetchRequest) -> Self {
        Self {
            url: request.url(),
            method: request.method(),
            headers: request.headers(),
            body: request.body(),
            proxy: request.proxy(),
            timeout: request.timeout_secs(),
            disable_redirect: request.disable_redirect(),
            user_agent: request.user_agent(),
            fingerprint: request.fingerprint(),
            browser: request.browser(),
            cookies: request.cookies(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
