//! Client facade over one transport binding.
//!
//! The [`Client`] validates requests locally and hands them to its
//! [`Transport`]. It is cheap to clone and safe to share between tasks.
//!
//! # Example
//!
//! ```no_run
//! use fastls_client::{Client, FetchRequest};
//!
//! # async fn example() -> fastls_client::Result<()> {
//! let client = Client::builder().http_json("http://127.0.0.1:8800").build()?;
//!
//! let result = client
//!     .fetch(FetchRequest::get("https://example.com").with_browser("chrome142"))
//!     .await?;
//! println!("{} {}", result.status, result.body);
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::error::Result;
use crate::model::{FetchRequest, FetchResult, HealthStatus};
use crate::transport::{Transport, TransportKind};

use super::builder::ClientBuilder;
use super::config::DEFAULT_HEALTH_TIMEOUT;

// ============================================================================
// Types
// ============================================================================

/// Internal shared state for the client.
struct ClientInner {
    /// Active binding.
    transport: Arc<dyn Transport>,

    /// Deadline for `health`.
    health_timeout: Duration,
}

// ============================================================================
// Client
// ============================================================================

/// Client for a fastls deployment.
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

// ============================================================================
// Client - Display
// ============================================================================

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("transport", &self.inner.transport)
            .field("health_timeout", &self.inner.health_timeout)
            .finish()
    }
}

// ============================================================================
// Client - Public API
// ============================================================================

impl Client {
    /// Creates a configuration builder.
    #[inline]
    #[must_use]
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Wraps an existing transport, using the default health deadline.
    #[must_use]
    pub fn from_transport(transport: Arc<dyn Transport>) -> Self {
        Self::with_transport(transport, DEFAULT_HEALTH_TIMEOUT)
    }

    pub(crate) fn with_transport(transport: Arc<dyn Transport>, health_timeout: Duration) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                transport,
                health_timeout,
            }),
        }
    }

    /// Binding in use.
    #[inline]
    #[must_use]
    pub fn transport_kind(&self) -> TransportKind {
        self.inner.transport.kind()
    }

    /// Deadline applied to [`health`](Self::health).
    #[inline]
    #[must_use]
    pub fn health_timeout(&self) -> Duration {
        self.inner.health_timeout
    }

    /// Asks the service whether it is up.
    ///
    /// # Errors
    ///
    /// Transport, protocol or remote errors from the binding.
    pub async fn health(&self) -> Result<HealthStatus> {
        let status = self.inner.transport.health(self.inner.health_timeout).await?;
        debug!(transport = %self.transport_kind(), status = %status.status, "Health");
        Ok(status)
    }

    /// Performs one fetch through the service.
    ///
    /// Invalid requests fail with
    /// [`Error::InvalidArgument`](crate::Error::InvalidArgument) before
    /// anything is sent. Otherwise exactly one call is made, bounded by
    /// the request's timeout.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidArgument`](crate::Error::InvalidArgument) for a
    ///   blank URL or zero timeout
    /// - transport, protocol or remote errors from the binding
    pub async fn fetch(&self, request: FetchRequest) -> Result<FetchResult> {
        request.validate()?;

        debug!(
            transport = %self.transport_kind(),
            url = request.url(),
            method = request.method(),
            "Fetch"
        );

        let result = self.inner.transport.fetch(&request).await;
        match &result {
            Ok(reply) => debug!(status = reply.status, ok = reply.ok, "Fetch completed"),
            Err(e) => warn!(url = request.url(), error = %e, "Fetch failed"),
        }
        result
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use parking_lot::Mutex;

    use crate::error::Error;

    #[derive(Debug, Default)]
    struct RecordingTransport {
        fetched: Mutex<Vec<String>>,
        health_deadlines: Mutex<Vec<Duration>>,
    }

    #[async_trait]
    impl Transport for RecordingTransport {
        fn kind(&self) -> TransportKind {
            TransportKind::HttpJson
        }

        async fn health(&self, deadline: Duration) -> Result<HealthStatus> {
            self.health_deadlines.lock().push(deadline);
            Ok(HealthStatus::new("ok"))
        }

        async fn fetch(&self, request: &FetchRequest) -> Result<FetchResult> {
            self.fetched.lock().push(request.url().to_string());
            Ok(FetchResult {
                status: 200,
                ok: true,
                headers: None,
                body: "hi".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_empty_url_never_dispatched() {
        let transport = Arc::new(RecordingTransport::default());
        let client = Client::from_transport(transport.clone());

        let err = client.fetch(FetchRequest::new("")).await.unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { .. }));
        assert!(err.is_local());
        assert!(transport.fetched.lock().is_empty());
    }

    #[tokio::test]
    async fn test_zero_timeout_never_dispatched() {
        let transport = Arc::new(RecordingTransport::default());
        let client = Client::from_transport(transport.clone());

        let request = FetchRequest::new("https://example.test").with_timeout_secs(0);
        assert!(client.fetch(request).await.is_err());
        assert!(transport.fetched.lock().is_empty());
    }

    #[tokio::test]
    async fn test_valid_fetch_dispatched_once() {
        let transport = Arc::new(RecordingTransport::default());
        let client = Client::from_transport(transport.clone());

        let result = client
            .fetch(FetchRequest::new("https://example.test"))
            .await
            .expect("fetch");

        assert_eq!(result.status, 200);
        assert_eq!(result.body, "hi");
        assert_eq!(*transport.fetched.lock(), ["https://example.test"]);
    }

    #[tokio::test]
    async fn test_health_uses_configured_deadline() {
        let transport = Arc::new(RecordingTransport::default());
        let client = Client::with_transport(transport.clone(), Duration::from_secs(4));

        assert!(client.health().await.expect("health").is_ok());
        assert_eq!(*transport.health_deadlines.lock(), [Duration::from_secs(4)]);
        assert_eq!(client.health_timeout(), Duration::from_secs(4));
    }

    #[test]
    fn test_health_default_deadline() {
        let transport = Arc::new(RecordingTransport::default());
        let client = Client::from_transport(transport.clone());

        let status = tokio_test::block_on(client.health()).expect("health");
        assert_eq!(status.status, "ok");
        assert_eq!(*transport.health_deadlines.lock(), [DEFAULT_HEALTH_TIMEOUT]);
    }

    #[test]
    fn test_clone_shares_transport() {
        let client = Client::from_transport(Arc::new(RecordingTransport::default()));
        let clone = client.clone();
        assert!(Arc::ptr_eq(&client.inner, &clone.inner));
        assert_eq!(clone.transport_kind(), TransportKind::HttpJson);
    }
}
