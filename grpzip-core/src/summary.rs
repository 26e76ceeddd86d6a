use std::time::Duration;

use crate::check::CheckOutcome;
use crate::scenario::CompressionScenario;

#[derive(Debug, Default, Clone)]
pub struct RunSummary {
    pub scenarios: Vec<ScenarioSummary>,
}

impl RunSummary {
    #[must_use]
    pub fn checks_passed_total(&self) -> u64 {
        self.scenarios
            .iter()
            .flat_map(|s| &s.checks)
            .map(|c| c.passes)
            .sum()
    }

    #[must_use]
    pub fn checks_failed_total(&self) -> u64 {
        self.scenarios
            .iter()
            .flat_map(|s| &s.checks)
            .map(|c| c.fails)
            .sum()
    }

    #[must_use]
    pub fn scenario(&self, scenario: CompressionScenario) -> Option<&ScenarioSummary> {
        self.scenarios.iter().find(|s| s.scenario == scenario)
    }
}

#[derive(Debug, Clone)]
pub struct ScenarioSummary {
    pub scenario: CompressionScenario,

    pub requests_total: u64,
    pub failed_requests_total: u64,

    pub checks: Vec<CheckOutcome>,

    /// Last observed `grpc-encoding` response header, if any.
    pub response_encoding: Option<String>,

    /// Time spent inside RPCs for this scenario.
    pub elapsed: Duration,
}

impl ScenarioSummary {
    #[must_use]
    pub fn checks_failed_total(&self) -> u64 {
        self.checks.iter().map(|c| c.fails).sum()
    }

    #[must_use]
    pub fn check(&self, name: &str) -> Option<&CheckOutcome> {
        self.checks.iter().find(|c| c.name == name)
    }
}
