//! HTTP plumbing shared by the HTTP-JSON and JSON-RPC bindings.
//!
//! Wraps one pooled `reqwest::Client` and turns every failure into the
//! crate taxonomy:
//!
//! | Failure | Error |
//! |---------|-------|
//! | connect / write / read | [`Error::Connection`] |
//! | deadline | [`Error::Timeout`] |
//! | body is not JSON | [`Error::Protocol`] |

// ============================================================================
// Imports
// ============================================================================

use std::error::Error as StdError;
use std::future::Future;
use std::time::Duration;

use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;
use tokio::time::timeout;
use tracing::{trace, warn};
use url::Url;

use crate::client::ClientConfig;
use crate::error::{Error, Result};

// ============================================================================
// Constants
// ============================================================================

/// Longest body excerpt quoted in protocol errors.
const BODY_EXCERPT_CHARS: usize = 200;

// ============================================================================
// HttpClient
// ============================================================================

/// Pooled HTTP client for JSON calls.
///
/// Cloning is cheap and shares the connection pool.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    connect_timeout: Duration,
}

impl HttpClient {
    /// Builds a client from the connection settings in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the underlying client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| Error::config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            connect_timeout: config.connect_timeout,
        })
    }

    /// Sends `GET url` and parses the reply body as JSON.
    ///
    /// # Errors
    ///
    /// - [`Error::Connection`] if the request cannot be sent or read
    /// - [`Error::Timeout`] if the connection cannot be opened in time
    /// - [`Error::Protocol`] if the body is not JSON
    pub async fn get_json(&self, url: &Url) -> Result<(StatusCode, Value)> {
        trace!(%url, "GET");
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| map_send_error(e, self.connect_timeout))?;

        read_json(response, self.connect_timeout).await
    }

    /// Sends `POST url` with a JSON body and parses the reply body as JSON.
    ///
    /// Sets `Content-Type: application/json`.
    ///
    /// # Errors
    ///
    /// - [`Error::Connection`] if the request cannot be sent or read
    /// - [`Error::Timeout`] if the connection cannot be opened in time
    /// - [`Error::Protocol`] if the body is not JSON
    pub async fn post_json<T>(&self, url: &Url, body: &T) -> Result<(StatusCode, Value)>
    where
        T: Serialize + ?Sized,
    {
        trace!(%url, "POST");
        let response = self
            .client
            .post(url.clone())
            .json(body)
            .send()
            .await
            .map_err(|e| map_send_error(e, self.connect_timeout))?;

        read_json(response, self.connect_timeout).await
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Appends `path` to the endpoint, keeping any base path prefix.
///
/// # Errors
///
/// Returns [`Error::Config`] if the result is not a valid URL.
pub fn endpoint_url(base: &Url, path: &str) -> Result<Url> {
    let joined = format!(
        "{}/{}",
        base.as_str().trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    Url::parse(&joined).map_err(|e| Error::config(format!("invalid endpoint {joined}: {e}")))
}

/// Runs `call`, failing with [`Error::Timeout`] once `deadline` passes.
///
/// Dropping the call on timeout releases its connection.
pub async fn with_deadline<T, F>(operation: &str, deadline: Duration, call: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match timeout(deadline, call).await {
        Ok(result) => result,
        Err(_) => {
            warn!(operation, timeout_ms = deadline.as_millis() as u64, "Call timed out");
            Err(Error::timeout(operation, deadline.as_millis() as u64))
        }
    }
}

/// Reads the whole reply body and parses it as JSON.
async fn read_json(
    response: reqwest::Response,
    connect_timeout: Duration,
) -> Result<(StatusCode, Value)> {
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| map_send_error(e, connect_timeout))?;

    match serde_json::from_str::<Value>(&text) {
        Ok(value) => Ok((status, value)),
        Err(e) if status.is_success() => {
            Err(Error::protocol(format!("malformed JSON reply: {e}")))
        }
        Err(_) => Err(Error::protocol(format!(
            "HTTP {status} with non-JSON body: {}",
            excerpt(&text)
        ))),
    }
}

/// Classifies a `reqwest` failure.
///
/// The client sets no overall request timeout, so a timeout reported by
/// `reqwest` is the connect timeout.
fn map_send_error(err: reqwest::Error, connect_timeout: Duration) -> Error {
    if err.is_timeout() {
        warn!(error = %error_chain(&err), "Connect timed out");
        return Error::timeout("connect", connect_timeout.as_millis() as u64);
    }
    if err.is_decode() {
        return Error::protocol(error_chain(&err));
    }
    if err.is_builder() {
        return Error::protocol(format!("failed to encode request: {}", error_chain(&err)));
    }
    Error::connection(error_chain(&err))
}

/// Renders an error with its sources, `outer: inner: root`.
fn error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

fn excerpt(text: &str) -> String {
    text.chars().take(BODY_EXCERPT_CHARS).collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url_joins() {
        let base = Url::parse("http://127.0.0.1:8800").expect("url");
        assert_eq!(
            endpoint_url(&base, "/fetch").expect("join").as_str(),
            "http://127.0.0.1:8800/fetch"
        );

        let prefixed = Url::parse("http://gateway.test/fastls/").expect("url");
        assert_eq!(
            endpoint_url(&prefixed, "/rpc").expect("join").as_str(),
            "http://gateway.test/fastls/rpc"
        );
    }

    #[tokio::test]
    async fn test_with_deadline_times_out() {
        let err = with_deadline("slow", Duration::from_millis(20), async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(())
        })
        .await
        .unwrap_err();

        assert!(err.is_timeout());
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn test_with_deadline_passes_result() {
        let value = with_deadline("fast", Duration::from_secs(1), async { Ok(7) })
            .await
            .expect("value");
        assert_eq!(value, 7);
    }

    #[tokio::test]
    async fn test_reqwest_timeout_keeps_timeout_kind() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let addr = listener.local_addr().expect("addr");
        let server = tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(200))
            .build()
            .expect("client");
        let err = client
            .get(format!("http://{addr}/health"))
            .send()
            .await
            .unwrap_err();
        assert!(err.is_timeout());

        let mapped = map_send_error(err, Duration::from_millis(200));
        assert!(mapped.is_timeout(), "unexpected error: {mapped}");
        assert!(mapped.is_transport());
        assert!(matches!(
            mapped,
            Error::Timeout { ref operation, timeout_ms: 200 } if operation == "connect"
        ));

        server.abort();
    }

    #[tokio::test]
    async fn test_client_keeps_connect_timeout() {
        let config = ClientConfig::new(crate::TransportKind::HttpJson, "http://127.0.0.1:8800")
            .expect("config")
            .with_connect_timeout(Duration::from_millis(750));
        let http = HttpClient::new(&config).expect("client");
        assert_eq!(http.connect_timeout, Duration::from_millis(750));
    }

    #[test]
    fn test_excerpt_truncates() {
        let long = "x".repeat(1000);
        assert_eq!(excerpt(&long).len(), BODY_EXCERPT_CHARS);
        assert_eq!(excerpt("short"), "short");
    }

    #[test]
    fn test_error_chain_includes_sources() {
        let inner = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let outer = Error::Json(serde_json::Error::io(inner));
        assert!(error_chain(&outer).contains("refused"));
    }
}
