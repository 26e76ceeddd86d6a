use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

fn parse_duration(input: &str) -> Result<Duration, String> {
    humantime::parse_duration(input.trim())
        .map_err(|e| format!("invalid duration '{input}' (expected e.g. 10s, 250ms, 1m): {e}"))
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report.
    HumanReadable,
    /// Emit JSON lines (NDJSON) to stdout.
    Json,
}

#[derive(Debug, Parser)]
#[command(
    name = "grpzip",
    author,
    version,
    about = "gRPC compression negotiation probe",
    long_about = "grpzip probes a gRPC server's compression negotiation for a unary method.\n\nIt invokes the method three times: once compressed with gzip (accepting gzip), once advertising identity only, and once without any accept-encoding metadata, then checks the status, the response payload, and whether the server honored `grpc-encoding`/`grpc-accept-encoding`.",
    after_help = "Examples:\n  grpzip run localhost:8080 --proto hello.proto\n  grpzip run localhost:8080 --proto hello.proto --iterations 10 --output json\n  grpzip run localhost:8080 --proto api.proto --method pkg.Svc/Greet --request-field who"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the negotiation scenarios against a server
    #[command(
        long_about = "Run the three compression negotiation scenarios against a server and report per-scenario checks.\n\nExit code is 0 when every check passes and 10 when any check fails."
    )]
    Run(RunArgs),
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Server target as host:port (plaintext unless TLS flags are given)
    pub target: String,

    /// Path to the .proto file describing the service
    #[arg(long)]
    pub proto: PathBuf,

    /// Extra proto include directory (repeatable)
    #[arg(short = 'I', long = "include", value_name = "DIR")]
    pub includes: Vec<PathBuf>,

    /// Full method to invoke, as pkg.Service/Method
    #[arg(long, default_value = "hello.HelloGrpc/SayHello")]
    pub method: String,

    /// String field set on the request message
    #[arg(long, default_value = "name")]
    pub request_field: String,

    /// String field read back from the response message
    #[arg(long, default_value = "message")]
    pub response_field: String,

    /// Prefix for the per-scenario request payloads
    #[arg(long, default_value = "grpzip")]
    pub name_prefix: String,

    /// Requests per scenario
    #[arg(long, default_value_t = 1)]
    pub iterations: u64,

    /// Per-request timeout (e.g. 10s, 250ms)
    #[arg(long, value_parser = parse_duration)]
    pub timeout: Option<Duration>,

    /// Connect timeout (e.g. 5s)
    #[arg(long, value_parser = parse_duration)]
    pub connect_timeout: Option<Duration>,

    /// CA certificate (PEM); enables TLS
    #[arg(long, value_name = "FILE")]
    pub tls_ca: Option<PathBuf>,

    /// Client certificate (PEM); requires --tls-key
    #[arg(long, value_name = "FILE", requires = "tls_key")]
    pub tls_cert: Option<PathBuf>,

    /// Client private key (PEM); requires --tls-cert
    #[arg(long, value_name = "FILE", requires = "tls_cert")]
    pub tls_key: Option<PathBuf>,

    /// Override the TLS server name
    #[arg(long, value_name = "NAME")]
    pub tls_domain: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::HumanReadable)]
    pub output: OutputFormat,
}

impl RunArgs {
    /// Whether any TLS-related flag was given.
    #[must_use]
    pub fn wants_tls(&self) -> bool {
        self.tls_ca.is_some()
            || self.tls_cert.is_some()
            || self.tls_key.is_some()
            || self.tls_domain.is_some()
    }
}
