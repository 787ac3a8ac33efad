//! Client configuration.
//!
//! # Defaults
//!
//! | Setting | Default |
//! |---------|---------|
//! | `rpc_path` | `/rpc` |
//! | `connect_timeout` | 10 s |
//! | `health_timeout` | 30 s |
//! | `user_agent` | `fastls-client/<version>` |
//!
//! The user agent is sent to the service itself. It has nothing to do
//! with the `userAgent` field of a fetch request.

// ============================================================================
// Imports
// ============================================================================

use std::time::Duration;

use url::Url;

use crate::error::{Error, Result};
use crate::protocol::jsonrpc::DEFAULT_RPC_PATH;
use crate::transport::TransportKind;

// ============================================================================
// Constants
// ============================================================================

/// Default TCP connect timeout.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default deadline for `health` calls.
pub const DEFAULT_HEALTH_TIMEOUT: Duration = Duration::from_secs(30);

/// User agent sent to the service.
pub const DEFAULT_USER_AGENT: &str = concat!("fastls-client/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// ClientConfig
// ============================================================================

/// Settings for one client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the service.
    pub endpoint: Url,

    /// Wire binding.
    pub transport: TransportKind,

    /// Path of the JSON-RPC endpoint. Ignored by the other bindings.
    pub rpc_path: String,

    /// TCP connect timeout.
    pub connect_timeout: Duration,

    /// Deadline applied to `health` calls.
    pub health_timeout: Duration,

    /// `User-Agent` of calls to the service.
    pub user_agent: String,
}

impl ClientConfig {
    /// Creates a config with defaults for `transport` at `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `endpoint` is not an absolute
    /// `http` or `https` URL.
    pub fn new(transport: TransportKind, endpoint: &str) -> Result<Self> {
        Ok(Self {
            endpoint: parse_endpoint(endpoint)?,
            transport,
            rpc_path: DEFAULT_RPC_PATH.to_string(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            health_timeout: DEFAULT_HEALTH_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        })
    }

    /// Sets the JSON-RPC path.
    #[inline]
    #[must_use]
    pub fn with_rpc_path(mut self, path: impl Into<String>) -> Self {
        self.rpc_path = path.into();
        self
    }

    /// Sets the connect timeout.
    #[inline]
    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets the health deadline.
    #[inline]
    #[must_use]
    pub fn with_health_timeout(mut self, timeout: Duration) -> Self {
        self.health_timeout = timeout;
        self
    }

    /// Sets the user agent sent to the service.
    #[inline]
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Checks settings that cannot be checked on assignment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for an RPC path that does not start with
    /// `/`, or a zero timeout.
    pub fn validate(&self) -> Result<()> {
        if !self.rpc_path.starts_with('/') {
            return Err(Error::config(format!(
                "RPC path must start with '/': {:?}",
                self.rpc_path
            )));
        }

        if self.connect_timeout.is_zero() {
            return Err(Error::config("connect timeout must be non-zero"));
        }

        if self.health_timeout.is_zero() {
            return Err(Error::config("health timeout must be non-zero"));
        }

        Ok(())
    }
}

/// Parses and checks a service endpoint.
fn parse_endpoint(endpoint: &str) -> Result<Url> {
    let url = Url::parse(endpoint.trim())
        .map_err(|e| Error::config(format!("invalid endpoint {endpoint:?}: {e}")))?;

    match url.scheme() {
        "http" | "https" if url.has_host() => Ok(url),
        "http" | "https" => Err(Error::config(format!("endpoint has no host: {endpoint}"))),
        scheme => Err(Error::config(format!(
            "unsupported endpoint scheme {scheme:?}, expected http or https"
        ))),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::new(TransportKind::JsonRpc, "http://127.0.0.1:8801")
            .expect("config");

        assert_eq!(config.transport, TransportKind::JsonRpc);
        assert_eq!(config.rpc_path, "/rpc");
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert_eq!(config.health_timeout, Duration::from_secs(30));
        assert!(config.user_agent.starts_with("fastls-client/"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_endpoints() {
        for endpoint in ["", "127.0.0.1:8800", "ftp://host/", "not a url"] {
            let err = ClientConfig::new(TransportKind::HttpJson, endpoint).unwrap_err();
            assert!(matches!(err, Error::Config { .. }), "{endpoint}: {err}");
        }
    }

    #[test]
    fn test_accepts_https_with_prefix() {
        let config = ClientConfig::new(TransportKind::HttpJson, "https://gateway.test/fastls/")
            .expect("config");
        assert_eq!(config.endpoint.path(), "/fastls/");
    }

    #[test]
    fn test_validate_rpc_path() {
        let config = ClientConfig::new(TransportKind::JsonRpc, "http://127.0.0.1:8801")
            .expect("config")
            .with_rpc_path("rpc");
        assert!(config.validate().is_err());

        assert!(config.with_rpc_path("/v2/rpc").validate().is_ok());
    }

    #[test]
    fn test_validate_zero_timeouts() {
        let config = ClientConfig::new(TransportKind::Grpc, "http://127.0.0.1:8802")
            .expect("config");

        assert!(config.clone().with_connect_timeout(Duration::ZERO).validate().is_err());
        assert!(config.with_health_timeout(Duration::ZERO).validate().is_err());
    }
}
