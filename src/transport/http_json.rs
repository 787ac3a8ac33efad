//! HTTP-JSON binding.
//!
//! `POST {endpoint}/fetch` with the full request object, `GET
//! {endpoint}/health` for health. One attempt per call, no retries.

// ============================================================================
// Imports
// ============================================================================

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;
use url::Url;

use crate::client::ClientConfig;
use crate::error::{Error, Result};
use crate::model::{FetchRequest, FetchResult, HealthStatus};
use crate::protocol::http_json::{FETCH_PATH, FetchBody, HEALTH_PATH};
use crate::protocol::reply::{decode_fetch_reply, decode_health_reply, remote_error};

use super::http::{HttpClient, endpoint_url, with_deadline};
use super::{Transport, TransportKind};

// ============================================================================
// HttpJsonTransport
// ============================================================================

/// Binding for the plain JSON-over-HTTP deployment.
#[derive(Debug, Clone)]
pub struct HttpJsonTransport {
    http: HttpClient,
    fetch_url: Url,
    health_url: Url,
}

impl HttpJsonTransport {
    /// Creates the binding for `config.endpoint`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the endpoint cannot be used.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            http: HttpClient::new(config)?,
            fetch_url: endpoint_url(&config.endpoint, FETCH_PATH)?,
            health_url: endpoint_url(&config.endpoint, HEALTH_PATH)?,
        })
    }

    /// URL fetch calls are posted to.
    #[inline]
    #[must_use]
    pub fn fetch_url(&self) -> &Url {
        &self.fetch_url
    }
}

#[async_trait]
impl Transport for HttpJsonTransport {
    fn kind(&self) -> TransportKind {
        TransportKind::HttpJson
    }

    async fn health(&self, deadline: Duration) -> Result<HealthStatus> {
        let (status, reply) =
            with_deadline("health", deadline, self.http.get_json(&self.health_url)).await?;

        if !status.is_success() && remote_error(&reply).is_none() {
            return Err(Error::protocol(format!("health returned HTTP {status}")));
        }

        decode_health_reply(reply)
    }

    async fn fetch(&self, request: &FetchRequest) -> Result<FetchResult> {
        let body = FetchBody::from(request);
        debug!(url = request.url(), method = request.method(), "HTTP-JSON fetch");

        let (status, reply) = with_deadline(
            "fetch",
            request.timeout(),
            self.http.post_json(&self.fetch_url, &body),
        )
        .await?;

        // Invalid input is answered with 400 and a JSON error body.
        if !status.is_success() && remote_error(&reply).is_none() {
            return Err(Error::protocol(format!("fetch returned HTTP {status}")));
        }

        decode_fetch_reply(reply)
    }
}

// ============================================================================
// Tests
// ============================================================================
