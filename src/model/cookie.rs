//! Cookie records forwarded with a fetch.

// ============================================================================
// Imports
// ============================================================================

use serde::{Deserialize, Serialize};

// ============================================================================
// Cookie
// ============================================================================

/// A cookie the service should send to the target.
///
/// `expires` is Unix seconds; `None` means a session cookie.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cookie {
    /// Cookie name.
    pub name: String,

    /// Cookie value.
    pub value: String,

    /// Cookie path.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub path: String,

    /// Cookie domain.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub domain: String,

    /// Expiry as Unix seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<i64>,

    /// `HttpOnly` attribute.
    #[serde(default)]
    pub http_only: bool,

    /// `Secure` attribute.
    #[serde(default)]
    pub secure: bool,
}

impl Cookie {
    /// Creates a session cookie with no attributes.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            ..Default::default()
        }
    }

    /// Sets the path.
    #[inline]
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Sets the domain.
    #[inline]
    #[must_use]
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    /// Sets the expiry (Unix seconds).
    #[inline]
    #[must_use]
    pub fn with_expires(mut self, expires: i64) -> Self {
        self.expires = Some(expires);
        self
    }

    /// Marks the cookie `HttpOnly`.
    #[inline]
    #[must_use]
    pub fn http_only(mut self) -> Self {
        self.http_only = true;
        self
    }

    /// Marks the cookie `Secure`.
    #[inline]
    #[must_use]
    pub fn secure(mut self) -> Self {
        self.secure = true;
        self
    }
}

// ============================================================================
// Tests
// ============================================================================
