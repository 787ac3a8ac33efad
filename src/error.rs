//! Error types for the Fastls client.
//!
//! This module defines all error types used throughout the crate.
//!
//! # Usage
//!
//! All fallible operations return [`Result<T>`] which uses [`Error`]:
//!
//! ```ignore
//! use fastls_client::{Client, FetchRequest, Result};
//!
//! async fn example(client: &Client) -> Result<()> {
//!     let result = client.fetch(FetchRequest::new("https://example.com")).await?;
//!     println!("{}", result.status);
//!     Ok(())
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants | [`ErrorKind`] |
//! |----------|----------|---------------|
//! | Local | [`Error::Config`], [`Error::InvalidArgument`] | none |
//! | Transport | [`Error::Connection`], [`Error::Timeout`], [`Error::Rpc`] | `Transport` |
//! | Protocol | [`Error::Protocol`], [`Error::IdMismatch`], [`Error::Json`] | `Protocol` |
//! | Remote | [`Error::Remote`] | `Remote` |
//!
//! Local errors are raised before anything is dispatched. Every other
//! variant describes a failure of the call itself, never of the target
//! URL: a target answering `404` is a normal [`FetchResult`] with
//! `ok == false`.
//!
//! [`FetchResult`]: crate::FetchResult

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::result::Result as StdResult;

use serde_json::Value;
use thiserror::Error;
use tonic::Code;

use crate::identifiers::RequestId;

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
///
/// All fallible operations in this crate return this type.
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// ErrorKind
// ============================================================================

/// Classification of a failed call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The call could not be carried to or from the service
    /// (connection refused, DNS, timeout, gRPC status).
    Transport,
    /// The service answered with something this client cannot interpret
    /// (malformed body, mismatched correlation id).
    Protocol,
    /// The service itself reported an application-level failure.
    Remote,
}

impl ErrorKind {
    /// Returns the lowercase name of the kind.
    #[inline]
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Transport => "transport",
            Self::Protocol => "protocol",
            Self::Remote => "remote",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
///
/// Each variant includes relevant context for debugging.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Local Errors
    // ========================================================================
    /// Configuration error.
    ///
    /// Returned when client configuration is invalid.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// Invalid argument supplied by the caller.
    ///
    /// Returned before dispatch, e.g. for an empty request URL.
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument.
        message: String,
    },

    // ========================================================================
    // Transport Errors
    // ========================================================================
    /// Connection to the service failed.
    ///
    /// Returned when the request cannot be written or the reply cannot be read.
    #[error("Connection failed: {message}")]
    Connection {
        /// Description of the connection error.
        message: String,
    },

    /// Call deadline exceeded.
    #[error("Timeout after {timeout_ms}ms: {operation}")]
    Timeout {
        /// Description of the operation that timed out.
        operation: String,
        /// Milliseconds waited before timeout.
        timeout_ms: u64,
    },

    /// gRPC call failed with a non-OK status.
    #[error("RPC failed with status {code:?}: {message}")]
    Rpc {
        /// Status code reported by the gRPC stack.
        code: Code,
        /// Status message, preserved verbatim.
        message: String,
    },

    // ========================================================================
    // Protocol Errors
    // ========================================================================
    /// Reply could not be interpreted.
    #[error("Protocol error: {message}")]
    Protocol {
        /// Description of the protocol violation.
        message: String,
    },

    /// JSON-RPC reply carries a different id than the request.
    #[error("Protocol error: response id {actual} does not match request id {expected}")]
    IdMismatch {
        /// Id sent with the request.
        expected: RequestId,
        /// Id found in the reply.
        actual: RequestId,
    },

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ========================================================================
    // Remote Errors
    // ========================================================================
    /// The service reported an application-level failure.
    #[error("Remote error: {message}")]
    Remote {
        /// Message supplied by the service.
        message: String,
        /// Structured error payload, if the service sent one.
        raw: Option<Value>,
    },
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates a configuration error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates an invalid argument error.
    #[inline]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Creates a connection error.
    #[inline]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Creates a timeout error.
    #[inline]
    pub fn timeout(operation: impl Into<String>, timeout_ms: u64) -> Self {
        Self::Timeout {
            operation: operation.into(),
            timeout_ms,
        }
    }

    /// Creates a gRPC status error.
    #[inline]
    pub fn rpc(code: Code, message: impl Into<String>) -> Self {
        Self::Rpc {
            code,
            message: message.into(),
        }
    }

    /// Creates a protocol error.
    #[inline]
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }

    /// Creates a correlation id mismatch error.
    #[inline]
    pub fn id_mismatch(expected: RequestId, actual: RequestId) -> Self {
        Self::IdMismatch { expected, actual }
    }

    /// Creates a remote error without structured payload.
    #[inline]
    pub fn remote(message: impl Into<String>) -> Self {
        Self::Remote {
            message: message.into(),
            raw: None,
        }
    }

    /// Creates a remote error carrying the service's structured payload.
    #[inline]
    pub fn remote_with_raw(message: impl Into<String>, raw: Value) -> Self {
        Self::Remote {
            message: message.into(),
            raw: Some(raw),
        }
    }
}

// ============================================================================
// Error Accessors
// ============================================================================

impl Error {
    /// Returns the call-failure classification.
    ///
    /// `None` for local errors, which are never dispatched.
    #[must_use]
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Config { .. } | Self::InvalidArgument { .. } => None,
            Self::Connection { .. } | Self::Timeout { .. } | Self::Rpc { .. } => {
                Some(ErrorKind::Transport)
            }
            Self::Protocol { .. } | Self::IdMismatch { .. } | Self::Json(_) => {
                Some(ErrorKind::Protocol)
            }
            Self::Remote { .. } => Some(ErrorKind::Remote),
        }
    }

    /// Returns the structured payload of a remote error.
    #[inline]
    #[must_use]
    pub fn raw(&self) -> Option<&Value> {
        match self {
            Self::Remote { raw, .. } => raw.as_ref(),
            _ => None,
        }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if this is a timeout error.
    #[inline]
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            Self::Timeout { .. }
                | Self::Rpc {
                    code: Code::DeadlineExceeded,
                    ..
                }
        )
    }

    /// Returns `true` if the call failed in transit.
    #[inline]
    #[must_use]
    pub fn is_transport(&self) -> bool {
        self.kind() == Some(ErrorKind::Transport)
    }

    /// Returns `true` if the reply violated the wire contract.
    #[inline]
    #[must_use]
    pub fn is_protocol(&self) -> bool {
        self.kind() == Some(ErrorKind::Protocol)
    }

    /// Returns `true` if the service reported the failure.
    #[inline]
    #[must_use]
    pub fn is_remote(&self) -> bool {
        self.kind() == Some(ErrorKind::Remote)
    }

    /// Returns `true` if the error was raised locally, before dispatch.
    #[inline]
    #[must_use]
    pub fn is_local(&self) -> bool {
        self.kind().is_none()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    #[test]
    fn test_error_display() {
        let err = Error::connection("connection refused");
        assert_eq!(err.to_string(), "Connection failed: connection refused");
    }

    #[test]
    fn test_local_errors_have_no_kind() {
        assert_eq!(Error::config("bad endpoint").kind(), None);
        assert_eq!(Error::invalid_argument("url is empty").kind(), None);
        assert!(Error::invalid_argument("url is empty").is_local());
    }

    #[test]
    fn test_transport_kinds() {
        assert_eq!(
            Error::connection("refused").kind(),
            Some(ErrorKind::Transport)
        );
        assert_eq!(
            Error::timeout("fetch", 1000).kind(),
            Some(ErrorKind::Transport)
        );
        assert_eq!(
            Error::rpc(Code::Unavailable, "tcp connect error").kind(),
            Some(ErrorKind::Transport)
        );
    }

    #[test]
    fn test_protocol_kinds() {
        let mismatch = Error::id_mismatch(RequestId::new(1), RequestId::new(2));
        assert!(mismatch.is_protocol());
        assert_eq!(
            mismatch.to_string(),
            "Protocol error: response id 2 does not match request id 1"
        );

        let json_err = serde_json::from_str::<Value>("{not json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
        assert!(err.is_protocol());
    }

    #[test]
    fn test_remote_raw_payload() {
        let payload = json!({"code": -32000, "message": "boom"});
        let err = Error::remote_with_raw(payload.to_string(), payload.clone());

        assert!(err.is_remote());
        assert_eq!(err.raw(), Some(&payload));
        assert!(err.to_string().contains("boom"));
        assert_eq!(Error::remote("boom").raw(), None);
    }

    #[test]
    fn test_is_timeout() {
        assert!(Error::timeout("fetch", 5000).is_timeout());
        assert!(Error::rpc(Code::DeadlineExceeded, "deadline").is_timeout());
        assert!(!Error::rpc(Code::Unavailable, "down").is_timeout());
        assert!(!Error::connection("refused").is_timeout());
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(ErrorKind::Transport.to_string(), "transport");
        assert_eq!(ErrorKind::Protocol.to_string(), "protocol");
        assert_eq!(ErrorKind::Remote.to_string(), "remote");
    }
}
