pub mod grpc;

pub use grpc::{GrpcTestServer, hello};
