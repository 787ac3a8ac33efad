//! Builder pattern for client configuration.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use fastls_client::Client;
//!
//! # async fn example() -> fastls_client::Result<()> {
//! let client = Client::builder()
//!     .json_rpc("http://127.0.0.1:8801")
//!     .health_timeout(Duration::from_secs(5))
//!     .build()?;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::error::{Error, Result};
use crate::transport::{
    GrpcTransport, HttpJsonTransport, JsonRpcTransport, Transport, TransportKind,
};

use super::config::ClientConfig;
use super::core::Client;

// ============================================================================
// ClientBuilder
// ============================================================================

/// Builder for configuring a [`Client`].
///
/// Use [`Client::builder()`] to create a new builder. An endpoint and a
/// binding are required; everything else has a default.
#[derive(Debug, Default, Clone)]
pub struct ClientBuilder {
    /// Service base URL, unparsed.
    endpoint: Option<String>,
    /// Wire binding.
    transport: Option<TransportKind>,
    rpc_path: Option<String>,
    connect_timeout: Option<Duration>,
    health_timeout: Option<Duration>,
    user_agent: Option<String>,
}

// ============================================================================
// ClientBuilder Implementation
// ============================================================================

impl ClientBuilder {
    /// Creates a builder with nothing set.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Targets an HTTP-JSON deployment at `endpoint`.
    #[inline]
    #[must_use]
    pub fn http_json(self, endpoint: impl Into<String>) -> Self {
        self.transport(TransportKind::HttpJson).endpoint(endpoint)
    }

    /// Targets a JSON-RPC deployment at `endpoint`.
    ///
    /// Calls go to `endpoint` + [`rpc_path`](Self::rpc_path).
    #[inline]
    #[must_use]
    pub fn json_rpc(self, endpoint: impl Into<String>) -> Self {
        self.transport(TransportKind::JsonRpc).endpoint(endpoint)
    }

    /// Targets a gRPC deployment at `endpoint`.
    #[inline]
    #[must_use]
    pub fn grpc(self, endpoint: impl Into<String>) -> Self {
        self.transport(TransportKind::Grpc).endpoint(endpoint)
    }

    /// Sets the service base URL.
    #[inline]
    #[must_use]
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Sets the wire binding.
    #[inline]
    #[must_use]
    pub fn transport(mut self, kind: TransportKind) -> Self {
        self.transport = Some(kind);
        self
    }

    /// Sets the JSON-RPC path (default `/rpc`).
    #[inline]
    #[must_use]
    pub fn rpc_path(mut self, path: impl Into<String>) -> Self {
        self.rpc_path = Some(path.into());
        self
    }

    /// Sets the TCP connect timeout.
    #[inline]
    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets the deadline for [`Client::health`].
    #[inline]
    #[must_use]
    pub fn health_timeout(mut self, timeout: Duration) -> Self {
        self.health_timeout = Some(timeout);
        self
    }

    /// Sets the user agent sent to the service.
    #[inline]
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Resolves the settings into a validated [`ClientConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the endpoint or binding is missing or
    /// any setting is invalid.
    pub fn config(&self) -> Result<ClientConfig> {
        let transport = self.transport.ok_or_else(|| {
            Error::config(
                "Transport is required. Use .http_json(), .json_rpc() or .grpc().\n\
                 Example: Client::builder().json_rpc(\"http://127.0.0.1:8801\")",
            )
        })?;

        let endpoint = self.endpoint.as_deref().ok_or_else(|| {
            Error::config(format!(
                "Endpoint is required. Use .endpoint() to set it.\n\
                 Example: .endpoint(\"http://127.0.0.1:{}\") for {transport}",
                transport.default_port()
            ))
        })?;

        let mut config = ClientConfig::new(transport, endpoint)?;
        if let Some(path) = &self.rpc_path {
            config.rpc_path.clone_from(path);
        }
        if let Some(timeout) = self.connect_timeout {
            config.connect_timeout = timeout;
        }
        if let Some(timeout) = self.health_timeout {
            config.health_timeout = timeout;
        }
        if let Some(user_agent) = &self.user_agent {
            config.user_agent.clone_from(user_agent);
        }

        config.validate()?;
        Ok(config)
    }

    /// Builds the client.
    ///
    /// No connection is made until the first call. The gRPC binding needs
    /// a running tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the settings are invalid.
    pub fn build(self) -> Result<Client> {
        let config = self.config()?;
        debug!(transport = %config.transport, endpoint = %config.endpoint, "Building client");

        let transport: Arc<dyn Transport> = match config.transport {
            TransportKind::HttpJson => Arc::new(HttpJsonTransport::new(&config)?),
            TransportKind::JsonRpc => Arc::new(JsonRpcTransport::new(&config)?),
            TransportKind::Grpc => Arc::new(GrpcTransport::new(&config)?),
        };

        Ok(Client::with_transport(transport, config.health_timeout))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_creates_empty_builder() {
        let builder = ClientBuilder::new();
        assert!(builder.endpoint.is_none());
        assert!(builder.transport.is_none());
    }

    #[test]
    fn test_shortcuts_set_kind_and_endpoint() {
        let builder = ClientBuilder::new().grpc("http://127.0.0.1:8802");
        assert_eq!(builder.transport, Some(TransportKind::Grpc));
        assert_eq!(builder.endpoint.as_deref(), Some("http://127.0.0.1:8802"));
    }

    #[test]
    fn test_missing_transport_is_config_error() {
        let err = ClientBuilder::new()
            .endpoint("http://127.0.0.1:8800")
            .config()
            .unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_missing_endpoint_is_config_error() {
        let err = ClientBuilder::new()
            .transport(TransportKind::HttpJson)
            .config()
            .unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
        assert!(err.to_string().contains("8800"));
    }

    #[test]
    fn test_overrides_apply() {
        let config = ClientBuilder::new()
            .json_rpc("http://127.0.0.1:8801")
            .rpc_path("/v1/rpc")
            .connect_timeout(Duration::from_secs(2))
            .health_timeout(Duration::from_secs(3))
            .user_agent("fetcher/1")
            .config()
            .expect("config");

        assert_eq!(config.rpc_path, "/v1/rpc");
        assert_eq!(config.connect_timeout, Duration::from_secs(2));
        assert_eq!(config.health_timeout, Duration::from_secs(3));
        assert_eq!(config.user_agent, "fetcher/1");
    }

    #[test]
    fn test_invalid_rpc_path_rejected() {
        let result = ClientBuilder::new()
            .json_rpc("http://127.0.0.1:8801")
            .rpc_path("rpc")
            .build();
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[tokio::test]
    async fn test_build_each_binding() {
        for kind in TransportKind::ALL {
            let endpoint = format!("http://127.0.0.1:{}", kind.default_port());
            let client = ClientBuilder::new()
                .transport(kind)
                .endpoint(endpoint)
                .build()
                .expect("client");
            assert_eq!(client.transport_kind(), kind);
        }
    }
}
