use log::debug;
use serde::{Deserialize, Serialize};

use crate::application::{LoanService, Outcome};
use crate::domain::Amount;
use crate::io::script::{Operation, Script};

/// Success payload of a replayed operation.
/// Mutations report `true`; balance queries report the amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StepValue {
    Done(bool),
    Balance(Amount),
}

/// Result of one replayed operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepResult {
    pub step: usize,
    pub operation: Operation,
    pub outcome: Outcome<StepValue>,
}

/// Options for replay runs
#[derive(Debug, Clone, Default)]
pub struct ReplayOptions {
    /// Validate the script without touching the ledger.
    pub dry_run: bool,
}

/// Summary of a replay run
#[derive(Debug, Clone, Default)]
pub struct ReplayResult {
    pub steps: Vec<StepResult>,
    pub succeeded: usize,
    pub failed: usize,
}

/// Runs scripts against a ledger, one operation at a time, in order.
pub struct Replayer<'a> {
    service: &'a mut LoanService,
}

impl<'a> Replayer<'a> {
    pub fn new(service: &'a mut LoanService) -> Self {
        Self { service }
    }

    /// Execute a single operation and render its outcome.
    pub fn apply(&mut self, operation: &Operation) -> Outcome<StepValue> {
        match operation {
            Operation::Issue { user, amount } => {
                Outcome::from(self.service.issue_loan(user, *amount))
                    .map(|_| StepValue::Done(true))
            }
            Operation::Accrue { user, height } => {
                Outcome::from(self.service.accrue_interest(user, *height))
                    .map(|_| StepValue::Done(true))
            }
            Operation::Balance { user, height } => {
                Outcome::from(self.service.get_total_loan_balance(user, *height))
                    .map(StepValue::Balance)
            }
            Operation::Reset => {
                self.service.reset();
                Outcome::Ok(StepValue::Done(true))
            }
        }
    }

    /// Replay every operation of `script`.
    /// Failed operations are recorded and do not stop the run.
    pub fn run(&mut self, script: &Script, options: &ReplayOptions) -> ReplayResult {
        let mut result = ReplayResult::default();
        if options.dry_run {
            debug!("dry run: {} operations validated", script.len());
            return result;
        }

        for (index, operation) in script.operations.iter().enumerate() {
            let outcome = self.apply(operation);
            if outcome.is_ok() {
                result.succeeded += 1;
            } else {
                result.failed += 1;
            }
            debug!("step {} {}: {:?}", index + 1, operation.name(), outcome);

            result.steps.push(StepResult {
                step: index + 1,
                operation: operation.clone(),
                outcome,
            });
        }

        result
    }
}
