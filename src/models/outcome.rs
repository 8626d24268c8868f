use serde::Serialize;

use crate::checks::Check;

/// Aggregate verdict for one signature evaluation.
///
/// Carries exactly one message per declared metric, in declaration
/// order. `pass` starts out true and flips only when an evaluator
/// explicitly reports a failure; informational messages (missing
/// current data, nothing to compare against) never flip it.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationOutcome {
    pub pass: bool,
    pub messages: Vec<String>,
}

impl Default for EvaluationOutcome {
    fn default() -> Self {
        Self {
            pass: true,
            messages: Vec::new(),
        }
    }
}

impl EvaluationOutcome {
    /// Record an evaluator's verdict.
    pub fn record(&mut self, check: Check) {
        if !check.passed {
            self.pass = false;
        }
        self.messages.push(check.message);
    }

    /// Record an informational message that carries no pass/fail signal.
    pub fn note(&mut self, message: String) {
        self.messages.push(message);
    }
}

/// Wire shape returned to the caller.
#[derive(Debug, Serialize)]
pub struct SignatureResponse {
    pub pass: bool,
    pub response: Vec<String>,
}

impl From<EvaluationOutcome> for SignatureResponse {
    fn from(outcome: EvaluationOutcome) -> Self {
        Self {
            pass: outcome.pass,
            response: outcome.messages,
        }
    }
}
