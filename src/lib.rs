//! Fastls client - one fetch operation, three wire bindings.
//!
//! A fastls service performs HTTP requests on behalf of its caller while
//! impersonating a browser's TLS and HTTP/2 fingerprint. This crate is the
//! calling side: it builds the request, ships it over the binding the
//! deployment speaks, and maps every outcome onto one result and one error
//! taxonomy.
//!
//! # Architecture
//!
//! - **Model**: [`FetchRequest`] is fully defaulted at construction and
//!   remembers which optional fields the caller set.
//! - **Protocol**: pure encoders and decoders per binding, no I/O.
//! - **Transport**: one [`Transport`] implementation per binding.
//! - **Client**: validates locally, then makes exactly one call.
//!
//! | Binding | Fetch | Health |
//! |---------|-------|--------|
//! | HTTP-JSON | `POST /fetch` | `GET /health` |
//! | JSON-RPC 2.0 | `POST /rpc`, method `fetch` | method `health` |
//! | gRPC | `fastls.FastlsService/Fetch` | `fastls.FastlsService/Health` |
//!
//! # Quick Start
//!
//! ```no_run
//! use fastls_client::{BrowserProfile, Client, FetchRequest, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = Client::builder()
//!         .json_rpc("http://127.0.0.1:8801")
//!         .build()?;
//!
//!     let request = FetchRequest::get("https://tls.peet.ws/api/all")
//!         .with_browser(BrowserProfile::Chrome142);
//!
//!     let result = client.fetch(request).await?;
//!     println!("{} {}", result.status, result.body);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Errors
//!
//! Failures that reach the wire carry an [`ErrorKind`]:
//!
//! | Kind | Meaning |
//! |------|---------|
//! | transport | the call did not complete (refused, timed out, gRPC status) |
//! | protocol | a reply arrived but could not be interpreted |
//! | remote | the service reported a failure |
//!
//! Local failures such as an empty URL have no kind and never reach the
//! wire.
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | [`Client`], [`ClientBuilder`], [`ClientConfig`] |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`identifiers`] | Type-safe ID wrappers |
//! | [`model`] | Request and result types |
//! | [`protocol`] | Wire formats (internal) |
//! | [`transport`] | Binding implementations |

// ============================================================================
// Modules
// ============================================================================

/// Client facade and configuration.
///
/// Use [`Client::builder()`] to create a configured client.
pub mod client;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Type-safe identifiers.
pub mod identifiers;

/// Transport-agnostic request and result model.
pub mod model;

/// Wire formats for the three bindings.
///
/// Internal module; exposed for tooling that needs the exact shapes.
pub mod protocol;

/// Transport bindings.
///
/// Implement [`Transport`] to plug a custom binding into [`Client`].
pub mod transport;

// ============================================================================
// Re-exports
// ============================================================================

// Client types
pub use client::{Client, ClientBuilder, ClientConfig};

// Error types
pub use error::{Error, ErrorKind, Result};

// Identifier types
pub use identifiers::RequestId;

// Model types
pub use model::{
    BrowserProfile, Cookie, FetchRequest, FetchResult, Field, Fingerprint, FingerprintKind,
    HealthStatus, SuppliedFields,
};

// Transport types
pub use transport::{Transport, TransportKind};
