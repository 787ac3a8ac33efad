//! Transport-agnostic request and result model.
//!
//! Every binding consumes the same [`FetchRequest`] and produces the same
//! [`FetchResult`] / [`HealthStatus`].
//!
//! # Components
//!
//! | Type | Description |
//! |------|-------------|
//! | [`FetchRequest`] | Fully defaulted fetch intent |
//! | [`SuppliedFields`] | Which optional fields the caller set |
//! | [`Fingerprint`] | Explicit TLS fingerprint |
//! | [`BrowserProfile`] | Named impersonation presets |
//! | [`Cookie`] | Cookie forwarded to the target |
//! | [`FetchResult`] | Normalized target response |
//! | [`HealthStatus`] | Service health report |

// ============================================================================
// Submodules
// ============================================================================

/// Cookie records.
pub mod cookie;

/// Fingerprint and browser profile types.
pub mod fingerprint;

/// Canonical fetch request.
pub mod request;

/// Canonical call results.
pub mod response;

// ============================================================================
// Re-exports
// ============================================================================

pub use cookie::Cookie;
pub use fingerprint::{BrowserProfile, Fingerprint, FingerprintKind};
pub use request::{DEFAULT_METHOD, DEFAULT_TIMEOUT_SECS, FetchRequest, Field, SuppliedFields};
pub use response::{FetchResult, HealthStatus};
