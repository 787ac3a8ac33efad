//! JSON-RPC 2.0 binding.
//!
//! Every call is one `POST` of a [`Request`] envelope to the RPC path.
//! Ids come from the binding's [`CorrelationManager`]; each reply is
//! checked against the id of its own request before the result is used,
//! so concurrent calls through one client cannot pick up each other's
//! replies.

// ============================================================================
// Imports
// ============================================================================

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};
use url::Url;

use crate::client::ClientConfig;
use crate::error::Result;
use crate::identifiers::RequestId;
use crate::model::{FetchRequest, FetchResult, HealthStatus};
use crate::protocol::jsonrpc::{FetchParams, Method, Request, Response};
use crate::protocol::reply::{decode_fetch_reply, decode_health_reply};

use super::correlation::CorrelationManager;
use super::http::{HttpClient, endpoint_url, with_deadline};
use super::{Transport, TransportKind};

// ============================================================================
// JsonRpcTransport
// ============================================================================

/// Binding for the JSON-RPC deployment.
#[derive(Debug)]
pub struct JsonRpcTransport {
    http: HttpClient,
    rpc_url: Url,
    ids: CorrelationManager,
}

impl JsonRpcTransport {
    /// Creates the binding for `config.endpoint` + `config.rpc_path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`](crate::Error::Config) if the endpoint
    /// cannot be used.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            http: HttpClient::new(config)?,
            rpc_url: endpoint_url(&config.endpoint, &config.rpc_path)?,
            ids: CorrelationManager::new(),
        })
    }

    /// URL calls are posted to.
    #[inline]
    #[must_use]
    pub fn rpc_url(&self) -> &Url {
        &self.rpc_url
    }

    /// Most recently issued correlation id.
    #[inline]
    #[must_use]
    pub fn last_request_id(&self) -> Option<RequestId> {
        self.ids.last_issued()
    }

    /// Issues one call and returns its checked `result`.
    async fn call<P: Serialize>(
        &self,
        method: Method,
        params: P,
        deadline: Duration,
    ) -> Result<Value> {
        let id = self.ids.next_id();
        let envelope = Request::new(method, params, id);
        debug!(%id, %method, "JSON-RPC call");

        let (_, reply) = with_deadline(
            method.as_str(),
            deadline,
            self.http.post_json(&self.rpc_url, &envelope),
        )
        .await?;

        let response: Response = serde_json::from_value(reply)?;
        response.into_result(id).inspect_err(|e| {
            if e.is_protocol() {
                warn!(%id, %method, error = %e, "Rejected JSON-RPC reply");
            }
        })
    }
}

#[async_trait]
impl Transport for JsonRpcTransport {
    fn kind(&self) -> TransportKind {
        TransportKind::JsonRpc
    }

    async fn health(&self, deadline: Duration) -> Result<HealthStatus> {
        let result = self.call(Method::Health, Map::new(), deadline).await?;
        decode_health_reply(result)
    }

    async fn fetch(&self, request: &FetchRequest) -> Result<FetchResult> {
        let params = FetchParams::from_request(request);
        let result = self.call(Method::Fetch, params, request.timeout()).await?;
        decode_fetch_reply(result)
    }
}

// ============================================================================
// Tests
// ============================================================================
