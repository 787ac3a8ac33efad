//! Canonical fetch request.
//!
//! A [`FetchRequest`] is fully populated from the moment it exists:
//! [`FetchRequest::new`] fills every optional field with its documented
//! default, so no binding needs default logic of its own. Each `with_*`
//! call additionally records the field in [`SuppliedFields`], which only
//! the JSON-RPC binding consults to omit what the caller never set.
//!
//! # Example
//!
//! ```
//! use fastls_client::{BrowserProfile, Field, FetchRequest};
//!
//! let request = FetchRequest::new("https://example.com")
//!     .with_browser(BrowserProfile::Firefox)
//!     .with_header("Accept", "application/json");
//!
//! assert_eq!(request.method(), "GET");
//! assert_eq!(request.timeout_secs(), 30);
//! assert!(request.supplied().contains(Field::Browser));
//! assert!(!request.supplied().contains(Field::Timeout));
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use crate::error::{Error, Result};

use super::{Cookie, Fingerprint};

// ============================================================================
// Constants
// ============================================================================

/// Method used when the caller does not set one.
pub const DEFAULT_METHOD: &str = "GET";

/// Remote fetch timeout used when the caller does not set one.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// ============================================================================
// Field
// ============================================================================

/// Optional request fields whose presence is tracked.
///
/// `url` and `method` are always transmitted and are not listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// `headers`
    Headers,
    /// `body`
    Body,
    /// `proxy`
    Proxy,
    /// `timeout`
    Timeout,
    /// `disableRedirect`
    DisableRedirect,
    /// `userAgent`
    UserAgent,
    /// `fingerprint`
    Fingerprint,
    /// `browser`
    Browser,
    /// `cookies`
    Cookies,
}

impl Field {
    /// All tracked fields, in wire order.
    pub const ALL: [Self; 9] = [
        Self::Headers,
        Self::Body,
        Self::Proxy,
        Self::Timeout,
        Self::DisableRedirect,
        Self::UserAgent,
        Self::Fingerprint,
        Self::Browser,
        Self::Cookies,
    ];

    /// Returns the JSON key of the field.
    #[inline]
    #[must_use]
    pub const fn wire_name(&self) -> &'static str {
        match self {
            Self::Headers => "headers",
            Self::Body => "body",
            Self::Proxy => "proxy",
            Self::Timeout => "timeout",
            Self::DisableRedirect => "disableRedirect",
            Self::UserAgent => "userAgent",
            Self::Fingerprint => "fingerprint",
            Self::Browser => "browser",
            Self::Cookies => "cookies",
        }
    }

    #[inline]
    const fn bit(&self) -> u16 {
        1 << (*self as u16)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

// ============================================================================
// SuppliedFields
// ============================================================================

/// Set of [`Field`]s the caller set explicitly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SuppliedFields(u16);

impl SuppliedFields {
    /// Returns an empty set.
    #[inline]
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Adds a field.
    #[inline]
    pub fn insert(&mut self, field: Field) {
        self.0 |= field.bit();
    }

    /// Returns `true` if the caller set `field`.
    #[inline]
    #[must_use]
    pub const fn contains(&self, field: Field) -> bool {
        self.0 & field.bit() != 0
    }

    /// Number of supplied fields.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Returns `true` if nothing beyond `url`/`method` was supplied.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Iterates the supplied fields in wire order.
    pub fn iter(&self) -> impl Iterator<Item = Field> + '_ {
        Field::ALL.into_iter().filter(|f| self.contains(*f))
    }
}

impl FromIterator<Field> for SuppliedFields {
    fn from_iter<I: IntoIterator<Item = Field>>(iter: I) -> Self {
        let mut set = Self::empty();
        for field in iter {
            set.insert(field);
        }
        set
    }
}

// ============================================================================
// FetchRequest
// ============================================================================

/// Transport-agnostic description of one fetch through the service.
///
/// Fields are private so the supplied-field set cannot drift from the
/// values; read them through the accessors.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    url: String,
    method: String,
    headers: HashMap<String, String>,
    body: String,
    proxy: Option<String>,
    timeout_secs: u64,
    disable_redirect: bool,
    user_agent: Option<String>,
    fingerprint: Option<Fingerprint>,
    browser: Option<String>,
    cookies: Vec<Cookie>,
    supplied: SuppliedFields,
}

// ============================================================================
// FetchRequest - Constructors
// ============================================================================

impl FetchRequest {
    /// Creates a request for `url` with every other field defaulted.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: DEFAULT_METHOD.to_string(),
            headers: HashMap::new(),
            body: String::new(),
            proxy: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            disable_redirect: false,
            user_agent: None,
            fingerprint: None,
            browser: None,
            cookies: Vec::new(),
            supplied: SuppliedFields::empty(),
        }
    }

    /// Creates a `GET` request.
    #[inline]
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(url)
    }

    /// Creates a `POST` request carrying `body`.
    #[inline]
    #[must_use]
    pub fn post(url: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(url).with_method("POST").with_body(body)
    }
}

// ============================================================================
// FetchRequest - Builder Methods
// ============================================================================

impl FetchRequest {
    /// Sets the HTTP method the service uses against the target.
    #[inline]
    #[must_use]
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    /// Adds one header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self.supplied.insert(Field::Headers);
        self
    }

    /// Adds several headers.
    #[must_use]
    pub fn with_headers<K, V>(mut self, headers: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.headers
            .extend(headers.into_iter().map(|(k, v)| (k.into(), v.into())));
        self.supplied.insert(Field::Headers);
        self
    }

    /// Sets the request body.
    #[inline]
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self.supplied.insert(Field::Body);
        self
    }

    /// Routes the target fetch through a proxy URL.
    #[inline]
    #[must_use]
    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self.supplied.insert(Field::Proxy);
        self
    }

    /// Sets the timeout in whole seconds.
    #[inline]
    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self.supplied.insert(Field::Timeout);
        self
    }

    /// Sets the timeout, rounded up to whole seconds.
    #[must_use]
    pub fn with_timeout(self, timeout: Duration) -> Self {
        let mut secs = timeout.as_secs();
        if timeout.subsec_nanos() > 0 {
            secs = secs.saturating_add(1);
        }
        self.with_timeout_secs(secs)
    }

    /// Controls whether the service follows redirects.
    #[inline]
    #[must_use]
    pub fn with_disable_redirect(mut self, disable: bool) -> Self {
        self.disable_redirect = disable;
        self.supplied.insert(Field::DisableRedirect);
        self
    }

    /// Sets the `User-Agent` sent to the target.
    #[inline]
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self.supplied.insert(Field::UserAgent);
        self
    }

    /// Sets an explicit TLS fingerprint.
    #[inline]
    #[must_use]
    pub fn with_fingerprint(mut self, fingerprint: Fingerprint) -> Self {
        self.fingerprint = Some(fingerprint);
        self.supplied.insert(Field::Fingerprint);
        self
    }

    /// Sets a browser impersonation profile.
    ///
    /// Accepts a [`BrowserProfile`](super::BrowserProfile) or any token.
    /// May be combined with a fingerprint; the service decides precedence.
    #[inline]
    #[must_use]
    pub fn with_browser(mut self, browser: impl Into<String>) -> Self {
        self.browser = Some(browser.into());
        self.supplied.insert(Field::Browser);
        self
    }

    /// Appends one cookie.
    #[must_use]
    pub fn with_cookie(mut self, cookie: Cookie) -> Self {
        self.cookies.push(cookie);
        self.supplied.insert(Field::Cookies);
        self
    }

    /// Appends several cookies, preserving order.
    #[must_use]
    pub fn with_cookies(mut self, cookies: impl IntoIterator<Item = Cookie>) -> Self {
        self.cookies.extend(cookies);
        self.supplied.insert(Field::Cookies);
        self
    }
}

// ============================================================================
// FetchRequest - Accessors
// ============================================================================

impl FetchRequest {
    /// Target URL.
    #[inline]
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// HTTP method.
    #[inline]
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Headers sent to the target.
    #[inline]
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Request body.
    #[inline]
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Proxy URL.
    #[inline]
    #[must_use]
    pub fn proxy(&self) -> Option<&str> {
        self.proxy.as_deref()
    }

    /// Timeout in seconds.
    #[inline]
    #[must_use]
    pub const fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    /// Timeout as a [`Duration`].
    #[inline]
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Whether redirects are disabled.
    #[inline]
    #[must_use]
    pub const fn disable_redirect(&self) -> bool {
        self.disable_redirect
    }

    /// `User-Agent` override.
    #[inline]
    #[must_use]
    pub fn user_agent(&self) -> Option<&str> {
        self.user_agent.as_deref()
    }

    /// TLS fingerprint.
    #[inline]
    #[must_use]
    pub fn fingerprint(&self) -> Option<&Fingerprint> {
        self.fingerprint.as_ref()
    }

    /// Browser profile token.
    #[inline]
    #[must_use]
    pub fn browser(&self) -> Option<&str> {
        self.browser.as_deref()
    }

    /// Cookies, in caller order.
    #[inline]
    #[must_use]
    pub fn cookies(&self) -> &[Cookie] {
        &self.cookies
    }

    /// Fields set explicitly by the caller.
    #[inline]
    #[must_use]
    pub const fn supplied(&self) -> SuppliedFields {
        self.supplied
    }
}

// ============================================================================
// FetchRequest - Validation
// ============================================================================

impl FetchRequest {
    /// Checks the request before it is dispatched.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidArgument`] if `url` is empty
    /// - [`Error::InvalidArgument`] if the timeout is zero
    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(Error::invalid_argument("url must not be empty"));
        }
        if self.timeout_secs == 0 {
            return Err(Error::invalid_argument("timeout must be positive"));
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
