//! Per-record dispatch: key set gate, evaluation, comparison

use super::keys::check_keys;
use super::operation::{EvaluationError, Operation};
use crate::config::CheckPreferences;
use crate::diagnostics::{codes, Diagnostic, Reporter};
use crate::scanner::Record;
use log::trace;
use serde::Serialize;

/// Outcome of checking one record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Every identity held
    Passed,
    /// Arithmetic was attempted and at least one identity failed
    Failed,
    /// Key set did not match the operation; arithmetic skipped
    Rejected,
    /// Type is not a known operation
    Unknown,
}

/// Verifies records against their operation identities
#[derive(Debug, Clone)]
pub struct Verifier {
    max_shift_bits: u64,
}

impl Verifier {
    pub fn new(max_shift_bits: u64) -> Self {
        Self { max_shift_bits }
    }

    pub fn from_preferences(prefs: &CheckPreferences) -> Self {
        Self::new(prefs.max_shift_bits)
    }

    pub fn max_shift_bits(&self) -> u64 {
        self.max_shift_bits
    }

    /// Check one record, reporting every discrepancy to `reporter`
    pub fn verify_record(&self, record: &Record, reporter: &dyn Reporter) -> Verdict {
        let line = record.line_number();
        let operation = Operation::from_type(record.test_type());

        if let Operation::Unknown(name) = &operation {
            reporter.report(&Diagnostic::at_line(
                line,
                codes::dispatch::UNKNOWN_TEST_TYPE,
                format!("unknown test type {:?}.", name),
            ));
            return Verdict::Unknown;
        }

        if !check_keys(record, operation.required_keys(), reporter) {
            return Verdict::Rejected;
        }

        let computed = match operation.evaluate(record, self.max_shift_bits) {
            Ok(computed) => computed,
            Err(error) => {
                reporter.report(&Diagnostic::at_line(
                    line,
                    evaluation_code(&error),
                    format!("{}.", error),
                ));
                return Verdict::Failed;
            }
        };

        let mut verdict = Verdict::Passed;
        for result in &computed {
            let matches = record.get(result.key) == Some(&result.value);
            trace!(
                "Line {}: {} == {}: {}",
                line,
                result.expression,
                result.key,
                matches
            );

            if !matches {
                reporter.report(&Diagnostic::at_line(
                    line,
                    codes::verification::RESULT_MISMATCH,
                    format!(
                        "{} did not match {}. Got {:x}",
                        result.expression, result.key, result.value
                    ),
                ));
                verdict = Verdict::Failed;
            }
        }

        verdict
    }
}

fn evaluation_code(error: &EvaluationError) -> crate::diagnostics::Code {
    match error {
        EvaluationError::ShiftTooLarge { .. } => codes::verification::SHIFT_TOO_LARGE,
        EvaluationError::DivisionByZero => codes::verification::DIVISION_BY_ZERO,
        EvaluationError::MissingOperand(_) => codes::key_set::MISSING_KEY,
    }
}
