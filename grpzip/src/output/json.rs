use serde::Serialize;
use std::io::Write as _;

use super::OutputFormatter;

pub(crate) struct JsonOutput;

impl OutputFormatter for JsonOutput {
    fn print_header(&self, _target: &str, _method: &str, _cfg: &grpzip_core::RunConfig) {}

    fn print_summary(&self, summary: &grpzip_core::RunSummary) -> anyhow::Result<()> {
        for scenario in &summary.scenarios {
            emit_json_line(&build_scenario_line(scenario));
        }
        emit_json_line(&build_summary_line(summary));
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct JsonCheck {
    pub name: String,
    pub passes: u64,
    pub fails: u64,
}

#[derive(Debug, Serialize)]
pub(crate) struct JsonScenarioLine {
    pub kind: &'static str,
    pub scenario: String,
    pub expectation: &'static str,

    pub requests_total: u64,
    pub failed_requests_total: u64,

    pub response_encoding: Option<String>,
    pub elapsed_ms: u64,

    pub checks: Vec<JsonCheck>,
    pub checks_failed_total: u64,
}

#[derive(Debug, Serialize)]
pub(crate) struct JsonSummaryLine {
    pub kind: &'static str,
    pub scenarios_total: u64,
    pub checks_passed_total: u64,
    pub checks_failed_total: u64,
}

fn build_scenario_line(s: &grpzip_core::ScenarioSummary) -> JsonScenarioLine {
    JsonScenarioLine {
        kind: "scenario",
        scenario: s.scenario.to_string(),
        expectation: s.scenario.expectation(),
        requests_total: s.requests_total,
        failed_requests_total: s.failed_requests_total,
        response_encoding: s.response_encoding.clone(),
        elapsed_ms: s.elapsed.as_millis() as u64,
        checks: s
            .checks
            .iter()
            .map(|c| JsonCheck {
                name: c.name.clone(),
                passes: c.passes,
                fails: c.fails,
            })
            .collect(),
        checks_failed_total: s.checks_failed_total(),
    }
}

fn build_summary_line(summary: &grpzip_core::RunSummary) -> JsonSummaryLine {
    JsonSummaryLine {
        kind: "summary",
        scenarios_total: summary.scenarios.len() as u64,
        checks_passed_total: summary.checks_passed_total(),
        checks_failed_total: summary.checks_failed_total(),
    }
}

fn emit_json_line<T: Serialize>(line: &T) {
    let mut out = std::io::stdout().lock();
    if serde_json::to_writer(&mut out, line).is_ok() {
        let _ = writeln!(out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grpzip_core::{CheckOutcome, CompressionScenario, RunSummary, ScenarioSummary};
    use serde_json::Value;
    use std::time::Duration;

    fn summary() -> RunSummary {
        RunSummary {
            scenarios: vec![ScenarioSummary {
                scenario: CompressionScenario::IdentityOnly,
                requests_total: 2,
                failed_requests_total: 0,
                checks: vec![CheckOutcome {
                    name: "response not compressed".to_string(),
                    passes: 2,
                    fails: 0,
                }],
                response_encoding: None,
                elapsed: Duration::from_millis(7),
            }],
        }
    }

    #[test]
    fn scenario_line_has_kind_and_checks() {
        let summary = summary();
        let line = build_scenario_line(&summary.scenarios[0]);

        let v: Value = match serde_json::to_value(&line) {
            Ok(v) => v,
            Err(err) => panic!("to_value failed: {err}"),
        };
        assert_eq!(v.get("kind").and_then(Value::as_str), Some("scenario"));
        assert_eq!(
            v.get("scenario").and_then(Value::as_str),
            Some("identity-only")
        );
        assert_eq!(
            v.pointer("/checks/0/name").and_then(Value::as_str),
            Some("response not compressed")
        );
        assert_eq!(
            v.get("checks_failed_total").and_then(Value::as_u64),
            Some(0)
        );
        assert!(v.get("response_encoding").is_some_and(Value::is_null));
    }

    #[test]
    fn summary_line_has_totals() {
        let line = build_summary_line(&summary());

        let v: Value = match serde_json::to_value(&line) {
            Ok(v) => v,
            Err(err) => panic!("to_value failed: {err}"),
        };
        assert_eq!(v.get("kind").and_then(Value::as_str), Some("summary"));
        assert_eq!(v.get("scenarios_total").and_then(Value::as_u64), Some(1));
        assert_eq!(
            v.get("checks_passed_total").and_then(Value::as_u64),
            Some(2)
        );
    }
}
