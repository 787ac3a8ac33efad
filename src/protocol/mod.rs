//! Wire formats for the three bindings.
//!
//! Nothing here does I/O. Each module turns a [`FetchRequest`] into the
//! shape its binding sends and turns replies back into model types.
//!
//! # Field Names
//!
//! The JSON bindings use camelCase, the gRPC binding uses the proto
//! field names:
//!
//! | Model | JSON | Proto |
//! |-------|------|-------|
//! | `timeout_secs` | `timeout` | `timeout` (int32) |
//! | `disable_redirect` | `disableRedirect` | `disable_redirect` |
//! | `user_agent` | `userAgent` | `user_agent` |
//! | `fingerprint.kind` | `fingerprint.type` | `Fingerprint.type` |
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `reply` | Reply decoding shared by the JSON bindings |
//! | `http_json` | HTTP-JSON request body |
//! | `jsonrpc` | JSON-RPC 2.0 envelopes |
//! | `grpc` | Protobuf messages and unary client |
//!
//! [`FetchRequest`]: crate::model::FetchRequest

// ============================================================================
// Submodules
// ============================================================================

/// Reply decoding for the JSON bindings.
pub mod reply;

/// HTTP-JSON request body.
pub mod http_json;

/// JSON-RPC 2.0 envelopes.
pub mod jsonrpc;

/// Protobuf messages and unary client.
pub mod grpc;

// ============================================================================
// Re-exports
// ============================================================================

pub use http_json::FetchBody;
pub use jsonrpc::{FetchParams, Method};
pub use reply::FetchReply;
