//! Run summary accumulated while checking one file

use crate::verification::Verdict;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Outcome of one run over a test vector file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub path: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub records_scanned: usize,
    pub records_passed: usize,
    pub records_failed: usize,
    pub records_rejected: usize,
    pub records_unknown: usize,
    /// Diagnostic counts keyed by code
    pub diagnostics: BTreeMap<String, usize>,
    pub fatal_error: Option<String>,
}

impl RunSummary {
    pub fn start(path: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            path: path.into(),
            started_at: now,
            finished_at: now,
            records_scanned: 0,
            records_passed: 0,
            records_failed: 0,
            records_rejected: 0,
            records_unknown: 0,
            diagnostics: BTreeMap::new(),
            fatal_error: None,
        }
    }

    pub fn record_verdict(&mut self, verdict: Verdict) {
        self.records_scanned += 1;
        match verdict {
            Verdict::Passed => self.records_passed += 1,
            Verdict::Failed => self.records_failed += 1,
            Verdict::Rejected => self.records_rejected += 1,
            Verdict::Unknown => self.records_unknown += 1,
        }
    }

    pub(crate) fn finish(&mut self, diagnostics: BTreeMap<String, usize>) {
        self.diagnostics = diagnostics;
        self.finished_at = Utc::now();
    }

    pub fn diagnostic_total(&self) -> usize {
        self.diagnostics.values().sum()
    }

    /// Count of diagnostics that did not stop the scan
    pub fn non_fatal_total(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|(code, _)| !crate::diagnostics::codes::is_fatal(code))
            .map(|(_, count)| count)
            .sum()
    }

    pub fn has_non_fatal(&self) -> bool {
        self.non_fatal_total() > 0
    }

    /// True when every record passed and nothing was reported
    pub fn is_clean(&self) -> bool {
        self.fatal_error.is_none() && self.diagnostic_total() == 0
    }

    /// Whether the run should fail once non-fatal diagnostics count against it
    pub fn fails_strict(&self) -> bool {
        self.has_non_fatal()
    }

    /// Whether the run counts as successful under the given strictness
    pub fn passes(&self, strict: bool) -> bool {
        self.fatal_error.is_none() && !(strict && self.fails_strict())
    }

    pub fn duration_ms(&self) -> i64 {
        (self.finished_at - self.started_at).num_milliseconds()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
