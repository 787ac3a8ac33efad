//! Client entry point.
//!
//! # Components
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Client`] | Validates and dispatches calls |
//! | [`ClientBuilder`] | Fluent configuration builder |
//! | [`ClientConfig`] | Resolved settings |
//!
//! # Example
//!
//! ```no_run
//! use fastls_client::{Client, FetchRequest, Result};
//!
//! # async fn example() -> Result<()> {
//! let client = Client::builder().grpc("http://127.0.0.1:8802").build()?;
//!
//! client.health().await?;
//! let result = client.fetch(FetchRequest::new("https://example.com")).await?;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Submodules
// ============================================================================

/// Fluent builder for client configuration.
pub mod builder;

/// Resolved client settings.
pub mod config;

/// Core client implementation.
pub mod core;

// ============================================================================
// Re-exports
// ============================================================================

pub use builder::ClientBuilder;
pub use config::ClientConfig;
pub use core::Client;
