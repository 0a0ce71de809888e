//! Run loop: scan records, dispatch each one, tally the outcome

mod error;
mod stats;

pub use error::PipelineError;
pub use stats::RunSummary;

use crate::config::CheckPreferences;
use crate::diagnostics::{Diagnostic, Reporter, TallyReporter};
use crate::file_processor::open_test_file;
use crate::scanner::RecordScanner;
use crate::verification::Verifier;
use log::{debug, info, warn};
use std::io::BufRead;
use std::path::Path;

/// Check every record readable from `reader`
///
/// Non-fatal diagnostics go to `reporter` as they are found. A fatal scan
/// error stops the run; it is reported once and returned together with the
/// summary of the records checked before it.
pub fn check_reader<R: BufRead>(
    reader: R,
    path_label: &str,
    prefs: &CheckPreferences,
    reporter: &dyn Reporter,
) -> Result<RunSummary, PipelineError> {
    info!("Checking {}", path_label);

    let tally = TallyReporter::new(reporter);
    let verifier = Verifier::from_preferences(prefs);
    let mut scanner = RecordScanner::new(reader);
    let mut summary = RunSummary::start(path_label);

    let fatal = loop {
        match scanner.next_record() {
            Ok(Some(record)) => {
                let verdict = verifier.verify_record(&record, &tally);
                debug!("Line {}: {} {:?}", record.line_number(), record.test_type(), verdict);
                summary.record_verdict(verdict);
            }
            Ok(None) => break None,
            Err(error) => break Some(error),
        }
    };

    if let Some(error) = &fatal {
        tally.report(&Diagnostic::run_level(
            error.error_code(),
            format!("Error reading tests: {}.", error),
        ));
        summary.fatal_error = Some(error.to_string());
    }

    summary.finish(tally.counts());
    info!(
        "{}: {} records, {} passed, {} diagnostics in {} ms",
        path_label,
        summary.records_scanned,
        summary.records_passed,
        summary.diagnostic_total(),
        summary.duration_ms()
    );

    match fatal {
        Some(error) => {
            warn!("{}: scan stopped at {}", path_label, error);
            Err(PipelineError::Scan {
                error,
                summary: Box::new(summary),
            })
        }
        None => Ok(summary),
    }
}

/// Open `path` and check it
pub fn check_file(
    path: impl AsRef<Path>,
    prefs: &CheckPreferences,
    reporter: &dyn Reporter,
) -> Result<RunSummary, PipelineError> {
    let path = path.as_ref();
    let reader = match open_test_file(path) {
        Ok(reader) => reader,
        Err(error) => {
            reporter.report(&Diagnostic::run_level(
                error.error_code(),
                format!("Error opening {}: {}.", path.display(), error.reason()),
            ));
            return Err(error.into());
        }
    };

    check_reader(reader, &path.display().to_string(), prefs, reporter)
}
