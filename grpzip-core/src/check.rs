/// Aggregated pass/fail counters for one named check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    pub name: String,
    pub passes: u64,
    pub fails: u64,
}

impl CheckOutcome {
    #[must_use]
    pub fn passed(&self) -> bool {
        self.fails == 0
    }
}

/// Named boolean assertions recorded while a scenario runs. Outcomes
/// keep their first-recorded order.
#[derive(Debug, Clone, Default)]
pub struct Checks {
    outcomes: Vec<CheckOutcome>,
}

impl Checks {
    pub fn record(&mut self, name: &str, pass: bool) {
        let idx = match self.outcomes.iter().position(|o| o.name == name) {
            Some(idx) => idx,
            None => {
                self.outcomes.push(CheckOutcome {
                    name: name.to_string(),
                    passes: 0,
                    fails: 0,
                });
                self.outcomes.len() - 1
            }
        };

        let outcome = &mut self.outcomes[idx];
        if pass {
            outcome.passes += 1;
        } else {
            outcome.fails += 1;
        }
    }

    #[must_use]
    pub fn outcomes(&self) -> &[CheckOutcome] {
        &self.outcomes
    }

    #[must_use]
    pub fn into_outcomes(self) -> Vec<CheckOutcome> {
        self.outcomes
    }

    #[must_use]
    pub fn failed_total(&self) -> u64 {
        self.outcomes.iter().map(|o| o.fails).sum()
    }
}
