//! gRPC binding.
//!
//! Calls `fastls.FastlsService/Fetch` and `/Health` over a lazily
//! connected `tonic` channel. The RPC layer pairs requests with replies,
//! so no correlation ids are issued here.
//!
//! Any non-OK status becomes [`Error::Rpc`] with the status message kept
//! verbatim. A structured `error` inside a successful `FetchResponse` is
//! a remote error.

// ============================================================================
// Imports
// ============================================================================

use std::time::Duration;

use async_trait::async_trait;
use tonic::Status;
use tonic::transport::Endpoint;
use tracing::debug;

use crate::client::ClientConfig;
use crate::error::{Error, Result};
use crate::model::{FetchRequest, FetchResult, HealthStatus};
use crate::protocol::grpc::{self, FastlsServiceClient, HealthRequest};

use super::http::with_deadline;
use super::{Transport, TransportKind};

// ============================================================================
// GrpcTransport
// ============================================================================

/// Binding for the gRPC deployment.
///
/// Cloning shares the underlying channel.
#[derive(Debug, Clone)]
pub struct GrpcTransport {
    client: FastlsServiceClient,
}

impl GrpcTransport {
    /// Creates the binding for `config.endpoint`.
    ///
    /// The channel connects on first use, so this must run inside a
    /// tokio runtime but does not touch the network.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the endpoint is not a valid URI.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let endpoint = Endpoint::from_shared(config.endpoint.to_string())
            .map_err(|e| Error::config(format!("invalid gRPC endpoint: {e}")))?
            .connect_timeout(config.connect_timeout);

        Ok(Self {
            client: FastlsServiceClient::new(endpoint.connect_lazy()),
        })
    }
}

#[async_trait]
impl Transport for GrpcTransport {
    fn kind(&self) -> TransportKind {
        TransportKind::Grpc
    }

    async fn health(&self, deadline: Duration) -> Result<HealthStatus> {
        let mut client = self.client.clone();
        let mut request = tonic::Request::new(HealthRequest {});
        request.set_timeout(deadline);

        let response = with_deadline("Health", deadline, async move {
            client.health(request).await.map_err(map_status)
        })
        .await?;

        Ok(response.into_inner().into())
    }

    async fn fetch(&self, request: &FetchRequest) -> Result<FetchResult> {
        debug!(url = request.url(), method = request.method(), "gRPC fetch");

        let deadline = request.timeout();
        let mut client = self.client.clone();
        let mut call = tonic::Request::new(grpc::FetchRequest::from(request));
        call.set_timeout(deadline);

        let response = with_deadline("Fetch", deadline, async move {
            client.fetch(call).await.map_err(map_status)
        })
        .await?;

        response.into_inner().into_result()
    }
}

/// Keeps the status code and message of a failed call.
fn map_status(status: Status) -> Error {
    debug!(code = ?status.code(), message = status.message(), "gRPC call failed");
    Error::rpc(status.code(), status.message())
}

// ============================================================================
// Tests
// ============================================================================
