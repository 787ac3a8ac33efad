use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;

use fastls_client::protocol::grpc::{
    FETCH_PATH, FetchRequest, FetchResponse, HEALTH_PATH, HealthRequest, HealthResponse,
    SERVICE_NAME,
};
use parking_lot::Mutex;
use tokio::net::TcpStream;
use tonic::body::BoxBody;
use tonic::codec::ProstCodec;
use tonic::codegen::{Body, BoxFuture, Service, StdError, empty_body, http};
use tonic::server::{Grpc, NamedService, UnaryService};
use tonic::transport::Server;
use tonic::{Request, Response, Status};

use super::stub_server::unused_port;

type FetchHandler = dyn Fn(&FetchRequest) -> FetchResponse + Send + Sync;

/// In-process `fastls.FastlsService` that records fetch requests and
/// answers through a handler. `Health` always reports `ok`.
#[derive(Clone)]
#[allow(dead_code)]
pub struct GrpcStub {
    handler: Arc<FetchHandler>,
    requests: Arc<Mutex<Vec<FetchRequest>>>,
}

#[allow(dead_code)]
impl GrpcStub {
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&FetchRequest) -> FetchResponse + Send + Sync + 'static,
    {
        Self {
            handler: Arc::new(handler),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Shared log of received fetch requests.
    pub fn requests(&self) -> Arc<Mutex<Vec<FetchRequest>>> {
        Arc::clone(&self.requests)
    }

    /// Serves on a random local port and returns its base URL once it
    /// accepts connections.
    pub async fn spawn(self) -> (String, tokio::task::JoinHandle<()>) {
        let port = unused_port().await;
        let addr = SocketAddr::from(([127, 0, 0, 1], port));

        let handle = tokio::spawn(async move {
            let _ = Server::builder().add_service(self).serve(addr).await;
        });

        for _ in 0..100 {
            if TcpStream::connect(addr).await.is_ok() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }

        (format!("http://{addr}"), handle)
    }
}

impl NamedService for GrpcStub {
    const NAME: &'static str = SERVICE_NAME;
}

struct FetchMethod(GrpcStub);

impl UnaryService<FetchRequest> for FetchMethod {
    type Response = FetchResponse;
    type Future = BoxFuture<Response<FetchResponse>, Status>;

    fn call(&mut self, request: Request<FetchRequest>) -> Self::Future {
        let request = request.into_inner();
        self.0.requests.lock().push(request.clone());
        let reply = (self.0.handler)(&request);
        Box::pin(async move { Ok(Response::new(reply)) })
    }
}

struct HealthMethod;

impl UnaryService<HealthRequest> for HealthMethod {
    type Response = HealthResponse;
    type Future = BoxFuture<Response<HealthResponse>, Status>;

    fn call(&mut self, _request: Request<HealthRequest>) -> Self::Future {
        Box::pin(async move {
            Ok(Response::new(HealthResponse {
                status: "ok".to_string(),
            }))
        })
    }
}

impl<B> Service<http::Request<B>> for GrpcStub
where
    B: Body + Send + 'static,
    B::Error: Into<StdError> + Send + 'static,
{
    type Response = http::Response<BoxBody>;
    type Error = Infallible;
    type Future = BoxFuture<Self::Response, Self::Error>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: http::Request<B>) -> Self::Future {
        match req.uri().path() {
            FETCH_PATH => {
                let method = FetchMethod(self.clone());
                Box::pin(async move {
                    let codec: ProstCodec<FetchResponse, FetchRequest> = ProstCodec::default();
                    let mut grpc = Grpc::new(codec);
                    Ok(grpc.unary(method, req).await)
                })
            }
            HEALTH_PATH => Box::pin(async move {
                let codec: ProstCodec<HealthResponse, HealthRequest> = ProstCodec::default();
                let mut grpc = Grpc::new(codec);
                Ok(grpc.unary(HealthMethod, req).await)
            }),
            _ => Box::pin(async move {
                let mut response = http::Response::new(empty_body());
                let headers = response.headers_mut();
                headers.insert("grpc-status", http::HeaderValue::from_static("12"));
                headers.insert(
                    http::header::CONTENT_TYPE,
                    http::HeaderValue::from_static("application/grpc"),
                );
                Ok(response)
            }),
        }
    }
}
