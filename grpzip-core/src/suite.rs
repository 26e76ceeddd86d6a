use std::time::Duration;

use prost_reflect::{DynamicMessage, Value};

use crate::check::Checks;
use crate::grpc::{GrpcClient, UnaryResult};
use crate::proto::GrpcMethod;
use crate::scenario::CompressionScenario;
use crate::summary::{RunSummary, ScenarioSummary};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Grpc(#[from] crate::grpc::Error),

    #[error("request message '{message}' has no string field '{field}'")]
    RequestField { message: String, field: String },
}

#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Requests per scenario.
    pub iterations: u64,

    /// Prefix for per-scenario request payloads (`<prefix>-<scenario>`).
    pub name_prefix: String,

    /// String field written on the request message.
    pub request_field: String,

    /// String field read back from the response message.
    pub response_field: String,

    /// Per-request timeout.
    pub timeout: Option<Duration>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            iterations: 1,
            name_prefix: "grpzip".to_string(),
            request_field: "name".to_string(),
            response_field: "message".to_string(),
            timeout: None,
        }
    }
}

/// Run every negotiation scenario sequentially against the given unary
/// method. Non-OK statuses are recorded as failed checks; only
/// transport-level problems surface as errors.
pub async fn run_suite(
    client: &GrpcClient,
    method: &GrpcMethod,
    cfg: &RunConfig,
) -> Result<RunSummary> {
    let mut summary = RunSummary::default();

    for scenario in CompressionScenario::ALL {
        summary
            .scenarios
            .push(run_scenario(client, method, cfg, scenario).await?);
    }

    Ok(summary)
}

async fn run_scenario(
    client: &GrpcClient,
    method: &GrpcMethod,
    cfg: &RunConfig,
    scenario: CompressionScenario,
) -> Result<ScenarioSummary> {
    let name = scenario.request_name(&cfg.name_prefix);
    let expected_message = format!("Hello {name}!");
    let request = build_request(method, &cfg.request_field, &name)?;

    let mut checks = Checks::default();
    let mut failed_requests = 0u64;
    let mut response_encoding = None;
    let mut elapsed = Duration::ZERO;

    let iterations = cfg.iterations.max(1);
    for _ in 0..iterations {
        let res = client
            .unary(method, request.clone(), scenario.invoke_options(cfg.timeout))
            .await?;

        elapsed += res.elapsed;
        if !res.ok {
            failed_requests += 1;
        }
        if let Some(enc) = res.response_encoding() {
            response_encoding = Some(enc.to_string());
        }

        evaluate(scenario, &res, &expected_message, &cfg.response_field, &mut checks);
    }

    Ok(ScenarioSummary {
        scenario,
        requests_total: iterations,
        failed_requests_total: failed_requests,
        checks: checks.into_outcomes(),
        response_encoding,
        elapsed,
    })
}

fn build_request(method: &GrpcMethod, field: &str, name: &str) -> Result<DynamicMessage> {
    let desc = method.input();
    let mut msg = DynamicMessage::new(desc.clone());

    msg.try_set_field_by_name(field, Value::String(name.to_string()))
        .map_err(|_| Error::RequestField {
            message: desc.full_name().to_string(),
            field: field.to_string(),
        })?;

    Ok(msg)
}

fn evaluate(
    scenario: CompressionScenario,
    res: &UnaryResult,
    expected_message: &str,
    response_field: &str,
    checks: &mut Checks,
) {
    checks.record("status is OK", res.ok);

    let message = res.field_str(response_field);
    checks.record(
        "response message is correct",
        message.as_deref() == Some(expected_message),
    );

    if scenario.expects_compressed() {
        checks.record(
            "response compressed with gzip",
            res.response_encoding() == Some("gzip"),
        );
    } else {
        let encoding = res.response_encoding();
        checks.record(
            "response not compressed",
            encoding.is_none() || encoding == Some("identity"),
        );
    }
}
