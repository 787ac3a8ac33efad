//! Transport bindings for the fastls service.
//!
//! The service exposes the same two operations, `fetch` and `health`, over
//! three wire bindings. Each binding implements [`Transport`]; the
//! [`Client`](crate::Client) only ever talks to the trait.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   Arc<dyn Transport>   ┌───────────────────┐   HTTP/1.1    ┌────────┐
//! │    Client    │───────────────────────►│ HttpJsonTransport │──────────────►│        │
//! │              │                        ├───────────────────┤   POST /rpc   │ fastls │
//! │  validate,   │                        │ JsonRpcTransport  │──────────────►│ server │
//! │  dispatch    │                        ├───────────────────┤   HTTP/2      │        │
//! │              │                        │   GrpcTransport   │──────────────►│        │
//! └──────────────┘                        └───────────────────┘               └────────┘
//! ```
//!
//! # Error Classification
//!
//! Every binding maps its failures onto the same three kinds:
//!
//! | Kind | Examples |
//! |------|----------|
//! | transport | connection refused, deadline passed, non-OK gRPC status |
//! | protocol | malformed JSON, wrong `jsonrpc` version, id mismatch |
//! | remote | `error` field in the reply, JSON-RPC error object |
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `correlation` | JSON-RPC request id issuance |
//! | `http` | Shared HTTP client and deadline helper |
//! | `http_json` | HTTP-JSON binding |
//! | `jsonrpc` | JSON-RPC 2.0 binding |
//! | `grpc` | gRPC binding |

// ============================================================================
// Submodules
// ============================================================================

/// Request id issuance.
pub mod correlation;

/// Shared HTTP plumbing.
pub mod http;

/// HTTP-JSON binding.
pub mod http_json;

/// JSON-RPC 2.0 binding.
pub mod jsonrpc;

/// gRPC binding.
pub mod grpc;

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{FetchRequest, FetchResult, HealthStatus};

// ============================================================================
// Re-exports
// ============================================================================

pub use correlation::CorrelationManager;
pub use grpc::GrpcTransport;
pub use http_json::HttpJsonTransport;
pub use jsonrpc::JsonRpcTransport;

// ============================================================================
// TransportKind
// ============================================================================

/// Wire binding used to reach the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportKind {
    /// Plain JSON over HTTP (`/fetch`, `/health`).
    HttpJson,
    /// JSON-RPC 2.0 over HTTP POST.
    JsonRpc,
    /// gRPC `fastls.FastlsService`.
    Grpc,
}

impl TransportKind {
    /// All bindings.
    pub const ALL: [Self; 3] = [Self::HttpJson, Self::JsonRpc, Self::Grpc];

    /// Short lowercase name.
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HttpJson => "http-json",
            Self::JsonRpc => "jsonrpc",
            Self::Grpc => "grpc",
        }
    }

    /// Port the reference deployment listens on for this binding.
    #[inline]
    #[must_use]
    pub const fn default_port(self) -> u16 {
        match self {
            Self::HttpJson => 8800,
            Self::JsonRpc => 8801,
            Self::Grpc => 8802,
        }
    }
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Transport
// ============================================================================

/// One wire binding of the fastls service.
///
/// Implementations make exactly one attempt per call and never retry.
/// They must be safe to share between tasks; concurrent calls may not
/// observe each other's replies.
#[async_trait]
pub trait Transport: Send + Sync + fmt::Debug {
    /// Binding implemented by this transport.
    fn kind(&self) -> TransportKind;

    /// Checks that the service is up, giving up after `deadline`.
    ///
    /// # Errors
    ///
    /// Transport, protocol or remote errors per the binding.
    async fn health(&self, deadline: Duration) -> Result<HealthStatus>;

    /// Performs one fetch, bounded by the request's own timeout.
    ///
    /// The request has already been validated by the caller.
    ///
    /// # Errors
    ///
    /// Transport, protocol or remote errors per the binding.
    async fn fetch(&self, request: &FetchRequest) -> Result<FetchResult>;
}

// ============================================================================
// Tests
// ============================================================================
