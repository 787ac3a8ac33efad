//! TLS fingerprint and browser profile types.
//!
//! # Example
//!
//! ```
//! use fastls_client::{BrowserProfile, Fingerprint};
//!
//! let fingerprint = Fingerprint::ja3("771,4865-4866-4867,0-23-65281,29-23-24,0");
//! assert_eq!(fingerprint.kind.as_str(), "ja3");
//!
//! let browser: String = BrowserProfile::Chrome142.into();
//! assert_eq!(browser, "chrome142");
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// FingerprintKind
// ============================================================================

/// Fingerprint notation understood by the remote service.
///
/// Transmitted as its string token on every binding. Tokens this client
/// does not know are carried through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FingerprintKind {
    /// JA3 string.
    Ja3,
    /// JA4 string.
    Ja4,
    /// Raw JA4 (`ja4_r`) string.
    Ja4r,
    /// Any other token, passed through verbatim.
    Other(String),
}

impl FingerprintKind {
    /// Returns the wire token.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Ja3 => "ja3",
            Self::Ja4 => "ja4",
            Self::Ja4r => "ja4r",
            Self::Other(token) => token,
        }
    }
}

impl From<&str> for FingerprintKind {
    fn from(token: &str) -> Self {
        match token {
            "ja3" => Self::Ja3,
            "ja4" => Self::Ja4,
            "ja4r" => Self::Ja4r,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for FingerprintKind {
    #[inline]
    fn from(token: String) -> Self {
        Self::from(token.as_str())
    }
}

impl From<FingerprintKind> for String {
    fn from(kind: FingerprintKind) -> Self {
        match kind {
            FingerprintKind::Other(token) => token,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for FingerprintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Fingerprint
// ============================================================================

/// TLS handshake signature the service should present to the target.
///
/// Serialized as `{"type": "...", "value": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint {
    /// Notation of `value`.
    #[serde(rename = "type")]
    pub kind: FingerprintKind,

    /// Fingerprint string in the given notation.
    pub value: String,
}

impl Fingerprint {
    /// Creates a fingerprint of any kind.
    #[must_use]
    pub fn new(kind: impl Into<FingerprintKind>, value: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            value: value.into(),
        }
    }

    /// Creates a JA3 fingerprint.
    #[inline]
    #[must_use]
    pub fn ja3(value: impl Into<String>) -> Self {
        Self::new(FingerprintKind::Ja3, value)
    }

    /// Creates a JA4 fingerprint.
    #[inline]
    #[must_use]
    pub fn ja4(value: impl Into<String>) -> Self {
        Self::new(FingerprintKind::Ja4, value)
    }

    /// Creates a raw JA4 fingerprint.
    #[inline]
    #[must_use]
    pub fn ja4r(value: impl Into<String>) -> Self {
        Self::new(FingerprintKind::Ja4r, value)
    }
}

// ============================================================================
// BrowserProfile
// ============================================================================

/// Named impersonation presets known to the remote service.
///
/// The request's `browser` field is free-form; this enum only spells the
/// tokens the service ships with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BrowserProfile {
    /// Latest Chrome preset.
    Chrome,
    /// Chrome 120.
    Chrome120,
    /// Chrome 142.
    Chrome142,
    /// Chromium.
    Chromium,
    /// Microsoft Edge.
    Edge,
    /// Firefox (the service default).
    Firefox,
    /// Safari.
    Safari,
    /// Opera.
    Opera,
}

impl BrowserProfile {
    /// All presets, in service order.
    pub const ALL: [Self; 8] = [
        Self::Chrome,
        Self::Chrome120,
        Self::Chrome142,
        Self::Chromium,
        Self::Edge,
        Self::Firefox,
        Self::Safari,
        Self::Opera,
    ];

    /// Returns the wire token.
    #[inline]
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Chrome => "chrome",
            Self::Chrome120 => "chrome120",
            Self::Chrome142 => "chrome142",
            Self::Chromium => "chromium",
            Self::Edge => "edge",
            Self::Firefox => "firefox",
            Self::Safari => "safari",
            Self::Opera => "opera",
        }
    }

    /// Looks up a preset by its token.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == token)
    }
}

impl From<BrowserProfile> for String {
    #[inline]
    fn from(profile: BrowserProfile) -> Self {
        profile.as_str().to_string()
    }
}

impl fmt::Display for BrowserProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Tests
// ============================================================================
