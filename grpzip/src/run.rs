use anyhow::Context as _;
use std::path::Path;

use grpzip_core::{GrpcClient, GrpcConnectOptions, GrpcTlsConfig, ProtoSchema, RunConfig};

use crate::cli::RunArgs;
use crate::exit_codes::ExitCode;
use crate::output;
use crate::run_error::RunError;

pub async fn run(args: RunArgs) -> Result<ExitCode, RunError> {
    let out = output::formatter(args.output);

    let schema = ProtoSchema::compile_from_proto(&args.proto, &args.includes).map_err(|e| {
        RunError::InvalidInput(
            anyhow::Error::new(e)
                .context(format!("failed to load proto: {}", args.proto.display())),
        )
    })?;

    let method = schema
        .method(&args.method)
        .map_err(|e| RunError::InvalidInput(anyhow::Error::new(e)))?;

    let tls = tls_config(&args).map_err(RunError::InvalidInput)?;
    let connect = GrpcConnectOptions {
        timeout: args.connect_timeout,
        tls,
    };

    let client = GrpcClient::connect(&args.target, connect).await.map_err(|e| {
        RunError::RuntimeError(
            anyhow::Error::new(e).context(format!("failed to connect to {}", args.target)),
        )
    })?;

    let cfg = RunConfig {
        iterations: args.iterations,
        name_prefix: args.name_prefix.clone(),
        request_field: args.request_field.clone(),
        response_field: args.response_field.clone(),
        timeout: args.timeout,
    };

    out.print_header(&args.target, &args.method, &cfg);

    let summary = grpzip_core::run_suite(&client, &method, &cfg)
        .await
        .map_err(|e| match e {
            grpzip_core::SuiteError::RequestField { .. } => {
                RunError::InvalidInput(anyhow::Error::new(e))
            }
            grpzip_core::SuiteError::Grpc(_) => RunError::RuntimeError(anyhow::Error::new(e)),
        })?;

    out.print_summary(&summary).map_err(RunError::RuntimeError)?;

    Ok(ExitCode::from_checks(summary.checks_failed_total() > 0))
}

fn tls_config(args: &RunArgs) -> anyhow::Result<Option<GrpcTlsConfig>> {
    if !args.wants_tls() {
        return Ok(None);
    }

    Ok(Some(GrpcTlsConfig {
        ca_pem: read_pem(args.tls_ca.as_deref())?,
        identity_pem: read_pem(args.tls_cert.as_deref())?,
        identity_key_pem: read_pem(args.tls_key.as_deref())?,
        domain_name: args.tls_domain.clone(),
    }))
}

fn read_pem(path: Option<&Path>) -> anyhow::Result<Option<Vec<u8>>> {
    match path {
        Some(path) => std::fs::read(path)
            .map(Some)
            .with_context(|| format!("failed to read PEM file: {}", path.display())),
        None => Ok(None),
    }
}
