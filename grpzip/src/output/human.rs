use std::fmt::Write as _;

use super::OutputFormatter;

pub(crate) struct HumanReadableOutput;

impl OutputFormatter for HumanReadableOutput {
    fn print_header(&self, target: &str, method: &str, cfg: &grpzip_core::RunConfig) {
        println!("target: {target}");
        println!("method: {method}");
        println!("iterations per scenario: {}", cfg.iterations.max(1));
        println!();
    }

    fn print_summary(&self, summary: &grpzip_core::RunSummary) -> anyhow::Result<()> {
        print!("{}", render(summary));
        Ok(())
    }
}

fn render(summary: &grpzip_core::RunSummary) -> String {
    let mut out = String::new();

    for s in &summary.scenarios {
        writeln!(&mut out, "scenario: {} ({})", s.scenario, s.scenario.expectation()).ok();
        writeln!(
            &mut out,
            "  requests: {} (failed {})",
            s.requests_total, s.failed_requests_total
        )
        .ok();
        match &s.response_encoding {
            Some(enc) => writeln!(&mut out, "  response encoding: {enc}").ok(),
            None => writeln!(&mut out, "  response encoding: none").ok(),
        };

        for c in &s.checks {
            let mark = if c.passed() { "PASS" } else { "FAIL" };
            writeln!(
                &mut out,
                "  [{mark}] {} ({}/{})",
                c.name,
                c.passes,
                c.passes + c.fails
            )
            .ok();
        }
        out.push('\n');
    }

    writeln!(
        &mut out,
        "checks: {} passed, {} failed",
        summary.checks_passed_total(),
        summary.checks_failed_total()
    )
    .ok();

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use grpzip_core::{CheckOutcome, CompressionScenario, RunSummary, ScenarioSummary};
    use std::time::Duration;

    #[test]
    fn render_marks_failed_checks() {
        let summary = RunSummary {
            scenarios: vec![ScenarioSummary {
                scenario: CompressionScenario::WithGzip,
                requests_total: 1,
                failed_requests_total: 0,
                checks: vec![
                    CheckOutcome {
                        name: "status is OK".to_string(),
                        passes: 1,
                        fails: 0,
                    },
                    CheckOutcome {
                        name: "response compressed with gzip".to_string(),
                        passes: 0,
                        fails: 1,
                    },
                ],
                response_encoding: None,
                elapsed: Duration::ZERO,
            }],
        };

        let text = render(&summary);
        assert!(text.contains("scenario: with-gzip"));
        assert!(text.contains("[PASS] status is OK (1/1)"));
        assert!(text.contains("[FAIL] response compressed with gzip (0/1)"));
        assert!(text.contains("response encoding: none"));
        assert!(text.contains("checks: 1 passed, 1 failed"));
    }
}
