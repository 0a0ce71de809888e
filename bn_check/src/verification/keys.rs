//! Key set validation
//!
//! A record may be verified only when its attribute names are exactly the
//! set its operation requires.

use crate::diagnostics::{codes, Diagnostic, Reporter};
use crate::scanner::Record;

/// Compare the record's keys against `required` (set equality).
///
/// Reports every missing key in `required` order, then every extra key in
/// ascending order. Returns true only when nothing was reported.
pub fn check_keys(record: &Record, required: &[&str], reporter: &dyn Reporter) -> bool {
    let mut found_errors = false;

    for key in required {
        if !record.contains_key(key) {
            reporter.report(&Diagnostic::at_line(
                record.line_number(),
                codes::key_set::MISSING_KEY,
                format!("missing key {:?}.", key),
            ));
            found_errors = true;
        }
    }

    for key in record.keys() {
        if !required.contains(&key) {
            reporter.report(&Diagnostic::at_line(
                record.line_number(),
                codes::key_set::UNEXPECTED_KEY,
                format!("unexpected key {:?}.", key),
            ));
            found_errors = true;
        }
    }

    !found_errors
}
