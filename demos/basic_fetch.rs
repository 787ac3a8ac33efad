//! Walkthrough of the client over a chosen binding.
//!
//! Demonstrates:
//! - Building a client for HTTP-JSON, JSON-RPC or gRPC
//! - Checking service health
//! - Plain GET, browser profile, JA3 fingerprint and POST fetches
//!
//! Environment:
//! - `FASTLS_TRANSPORT`: `http-json` (default), `jsonrpc` or `grpc`
//! - `FASTLS_HTTP_URL`, `FASTLS_RPC_URL`, `FASTLS_GRPC_URL`: endpoints,
//!   defaulting to the reference deployment ports
//! - `FASTLS_DEBUG`: any value enables debug logging
//!
//! Usage:
//!   cargo run --example basic_fetch
//!   FASTLS_TRANSPORT=grpc cargo run --example basic_fetch

// ============================================================================
// Imports
// ============================================================================

use fastls_client::{BrowserProfile, Client, FetchRequest, Fingerprint, Result, TransportKind};
use tracing_subscriber::EnvFilter;

// ============================================================================
// Constants
// ============================================================================

const TARGET_URL: &str = "https://tls.peet.ws/api/all";
const POST_URL: &str = "https://httpbin.org/post";
const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/142.0.0.0 Safari/537.36";
const JA3_CHROME: &str = "771,4865-4866-4867-49195-49199-49196-49200-52393-52392-49171-49172-156-157-47-53,0-23-65281-10-11-35-16-5-13-18-51-45-43-27-17513,29-23-24,0";

// ============================================================================
// Types
// ============================================================================

#[derive(Debug, Clone, Copy)]
struct Args {
    debug: bool,
    transport: TransportKind,
}

impl Args {
    fn from_env() -> Self {
        let transport = match std::env::var("FASTLS_TRANSPORT").as_deref() {
            Ok("grpc") => TransportKind::Grpc,
            Ok("jsonrpc") => TransportKind::JsonRpc,
            _ => TransportKind::HttpJson,
        };

        Self {
            debug: std::env::var_os("FASTLS_DEBUG").is_some(),
            transport,
        }
    }
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() {
    let args = Args::from_env();
    init_logging(args.debug);

    if let Err(e) = run(args).await {
        eprintln!("\n[ERROR] {e}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    println!("=== basic_fetch over {} ===\n", args.transport);

    let client = Client::builder()
        .transport(args.transport)
        .endpoint(endpoint(args.transport))
        .build()?;

    let health = client.health().await?;
    println!("[Health] {}", health.status);

    // Plain GET with service defaults
    let result = client.fetch(FetchRequest::get(TARGET_URL)).await?;
    println!("[GET] status={} ok={}", result.status, result.ok);

    // Named browser profile
    let request = FetchRequest::get(TARGET_URL).with_browser(BrowserProfile::Chrome142);
    let result = client.fetch(request).await?;
    match result.json::<serde_json::Value>() {
        Ok(report) => println!("[Browser] ja4={}", report["tls"]["ja4"]),
        Err(_) => println!("[Browser] {} bytes of body", result.body.len()),
    }

    // Explicit JA3 fingerprint
    let request = FetchRequest::get(TARGET_URL)
        .with_fingerprint(Fingerprint::ja3(JA3_CHROME))
        .with_user_agent(USER_AGENT);
    let result = client.fetch(request).await?;
    println!("[JA3] status={} ok={}", result.status, result.ok);

    // POST with a JSON body
    let request = FetchRequest::post(POST_URL, r#"{"hello":"fastls"}"#)
        .with_header("Content-Type", "application/json")
        .with_timeout_secs(15);
    let result = client.fetch(request).await?;
    println!("[POST] status={} bytes={}", result.status, result.body.len());

    Ok(())
}

// ============================================================================
// Functions
// ============================================================================

fn endpoint(kind: TransportKind) -> String {
    let var = match kind {
        TransportKind::HttpJson => "FASTLS_HTTP_URL",
        TransportKind::JsonRpc => "FASTLS_RPC_URL",
        TransportKind::Grpc => "FASTLS_GRPC_URL",
    };

    std::env::var(var).unwrap_or_else(|_| format!("http://127.0.0.1:{}", kind.default_port()))
}

fn init_logging(debug: bool) {
    let filter = if debug {
        "fastls_client=debug"
    } else {
        "fastls_client=info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();
}
