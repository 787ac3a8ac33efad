pub mod grpc_server;
pub mod stub_server;
