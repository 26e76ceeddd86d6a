mod check;
mod grpc;
mod proto;
mod scenario;
mod suite;
mod summary;

pub use check::{CheckOutcome, Checks};
pub use grpc::{
    ConnectOptions as GrpcConnectOptions, Encoding, Error as GrpcError, GrpcClient,
    InvokeOptions as GrpcInvokeOptions, TlsConfig as GrpcTlsConfig, UnaryResult as GrpcUnaryResult,
};
pub use proto::{Error as ProtoError, GrpcMethod, ProtoSchema};
pub use scenario::CompressionScenario;
pub use suite::{Error as SuiteError, RunConfig, run_suite};
pub use summary::{RunSummary, ScenarioSummary};
