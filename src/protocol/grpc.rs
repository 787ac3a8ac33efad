//! gRPC messages and client stub for `fastls.FastlsService`.
//!
//! Messages mirror `proto/fastls.proto` and are declared with
//! `prost` derives, so no build script or `protoc` is needed.
//!
//! | RPC | Request | Response |
//! |-----|---------|----------|
//! | `Fetch` | [`FetchRequest`] | [`FetchResponse`] |
//! | `Health` | [`HealthRequest`] | [`HealthResponse`] |

// ============================================================================
// Imports
// ============================================================================

use std::collections::HashMap;

use tonic::codec::ProstCodec;
use tonic::codegen::http::uri::PathAndQuery;
use tonic::transport::Channel;
use tonic::{IntoRequest, Status};

use crate::error::{Error, Result};
use crate::model;

// ============================================================================
// Constants
// ============================================================================

/// Fully qualified service name.
pub const SERVICE_NAME: &str = "fastls.FastlsService";

/// Request path of `Fetch`.
pub const FETCH_PATH: &str = "/fastls.FastlsService/Fetch";

/// Request path of `Health`.
pub const HEALTH_PATH: &str = "/fastls.FastlsService/Health";

// ============================================================================
// Messages
// ============================================================================

/// `fastls.Fingerprint`
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Fingerprint {
    /// Kind token (`ja3`, `ja4`, ...).
    #[prost(string, tag = "1")]
    pub r#type: String,
    /// Fingerprint string.
    #[prost(string, tag = "2")]
    pub value: String,
}

/// `fastls.Cookie`
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Cookie {
    /// Cookie name.
    #[prost(string, tag = "1")]
    pub name: String,
    /// Cookie value.
    #[prost(string, tag = "2")]
    pub value: String,
    /// Cookie path.
    #[prost(string, tag = "3")]
    pub path: String,
    /// Cookie domain.
    #[prost(string, tag = "4")]
    pub domain: String,
    /// Unix seconds; 0 for a session cookie.
    #[prost(int64, tag = "5")]
    pub expires: i64,
    /// `HttpOnly` attribute.
    #[prost(bool, tag = "6")]
    pub http_only: bool,
    /// `Secure` attribute.
    #[prost(bool, tag = "7")]
    pub secure: bool,
}

/// `fastls.FetchRequest`
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FetchRequest {
    /// Target URL.
    #[prost(string, tag = "1")]
    pub url: String,
    /// HTTP method.
    #[prost(string, tag = "2")]
    pub method: String,
    /// Target headers.
    #[prost(map = "string, string", tag = "3")]
    pub headers: HashMap<String, String>,
    /// Target body.
    #[prost(string, tag = "4")]
    pub body: String,
    /// Proxy URL.
    #[prost(string, tag = "5")]
    pub proxy: String,
    /// Timeout in seconds.
    #[prost(int32, tag = "6")]
    pub timeout: i32,
    /// Redirect switch.
    #[prost(bool, tag = "7")]
    pub disable_redirect: bool,
    /// `User-Agent` override.
    #[prost(string, tag = "8")]
    pub user_agent: String,
    /// TLS fingerprint.
    #[prost(message, optional, tag = "9")]
    pub fingerprint: Option<Fingerprint>,
    /// Browser profile token.
    #[prost(string, tag = "10")]
    pub browser: String,
    /// Cookies.
    #[prost(message, repeated, tag = "11")]
    pub cookies: Vec<Cookie>,
}

/// `fastls.FetchResponse`
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FetchResponse {
    /// Service verdict.
    #[prost(bool, tag = "1")]
    pub ok: bool,
    /// Target HTTP status.
    #[prost(int32, tag = "2")]
    pub status: i32,
    /// Target response headers.
    #[prost(map = "string, string", tag = "3")]
    pub headers: HashMap<String, String>,
    /// Target body.
    #[prost(string, tag = "4")]
    pub body: String,
    /// Fetch failure reported by the service.
    #[prost(string, tag = "5")]
    pub error: String,
}

/// `fastls.HealthRequest`
#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct HealthRequest {}

/// `fastls.HealthResponse`
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct HealthResponse {
    /// Status token.
    #[prost(string, tag = "1")]
    pub status: String,
}

// ============================================================================
// Conversions
// ============================================================================

impl From<&model::Cookie> for Cookie {
    fn from(cookie: &model::Cookie) -> Self {
        Self {
            name: cookie.name.clone(),
            value: cookie.value.clone(),
            path: cookie.path.clone(),
            domain: cookie.domain.clone(),
            expires: cookie.expires.unwrap_or_default(),
            http_only: cookie.http_only,
            secure: cookie.secure,
        }
    }
}

impl From<&model::FetchRequest> for FetchRequest {
    fn from(request: &model::FetchRequest) -> Self {
        Self {
            url: request.url().to_string(),
            method: request.method().to_string(),
            headers: request.headers().clone(),
            body: request.body().to_string(),
            proxy: request.proxy().unwrap_or_default().to_string(),
            timeout: i32::try_from(request.timeout_secs()).unwrap_or(i32::MAX),
            disable_redirect: request.disable_redirect(),
            user_agent: request.user_agent().unwrap_or_default().to_string(),
            fingerprint: request.fingerprint().map(|fp| Fingerprint {
                r#type: fp.kind.as_str().to_string(),
                value: fp.value.clone(),
            }),
            browser: request.browser().unwrap_or_default().to_string(),
            cookies: request.cookies().iter().map(Cookie::from).collect(),
        }
    }
}

impl FetchResponse {
    /// Maps the reply onto the canonical result.
    ///
    /// # Errors
    ///
    /// - [`Error::Remote`] if `error` is non-empty
    /// - [`Error::Protocol`] if `status` is not a valid HTTP status
    pub fn into_result(self) -> Result<model::FetchResult> {
        if !self.error.is_empty() {
            return Err(Error::remote(self.error));
        }

        let status = u16::try_from(self.status)
            .map_err(|_| Error::protocol(format!("invalid status {}", self.status)))?;

        Ok(model::FetchResult {
            status,
            ok: self.ok,
            headers: Some(self.headers),
            body: self.body,
        })
    }
}

impl From<HealthResponse> for model::HealthStatus {
    #[inline]
    fn from(response: HealthResponse) -> Self {
        Self::new(response.status)
    }
}

// ============================================================================
// FastlsServiceClient
// ============================================================================

/// Unary client for `fastls.FastlsService`.
#[derive(Debug, Clone)]
pub struct FastlsServiceClient {
    inner: tonic::client::Grpc<Channel>,
}

impl FastlsServiceClient {
    /// Wraps a channel.
    #[inline]
    #[must_use]
    pub fn new(channel: Channel) -> Self {
        Self {
            inner: tonic::client::Grpc::new(channel),
        }
    }

    /// Calls `Fetch`.
    ///
    /// # Errors
    ///
    /// Returns the call's [`Status`] on any failure.
    pub async fn fetch(
        &mut self,
        request: impl IntoRequest<FetchRequest>,
    ) -> std::result::Result<tonic::Response<FetchResponse>, Status> {
        self.ready().await?;
        let codec: ProstCodec<FetchRequest, FetchResponse> = ProstCodec::default();
        self.inner
            .unary(
                request.into_request(),
                PathAndQuery::from_static(FETCH_PATH),
                codec,
            )
            .await
    }

    /// Calls `Health`.
    ///
    /// # Errors
    ///
    /// Returns the call's [`Status`] on any failure.
    pub async fn health(
        &mut self,
        request: impl IntoRequest<HealthRequest>,
    ) -> std::result::Result<tonic::Response<HealthResponse>, Status> {
        self.ready().await?;
        let codec: ProstCodec<HealthRequest, HealthResponse> = ProstCodec::default();
        self.inner
            .unary(
                request.into_request(),
                PathAndQuery::from_static(HEALTH_PATH),
                codec,
            )
            .await
    }

    async fn ready(&mut self) -> std::result::Result<(), Status> {
        self.inner
            .ready()
            .await
            .map_err(|e| Status::unavailable(format!("service was not ready: {e}")))
    }
}

// ============================================================================
// Tests
// ============================================================================
