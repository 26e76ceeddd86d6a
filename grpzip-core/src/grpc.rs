mod client;
mod codec;
mod error;
mod metadata;
mod types;

pub use client::GrpcClient;
pub use error::{Error, Result};
pub use types::{ConnectOptions, Encoding, InvokeOptions, TlsConfig, UnaryResult};
