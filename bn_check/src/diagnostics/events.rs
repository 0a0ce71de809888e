//! Diagnostic values produced while checking a test vector file

use super::codes::{self, Code};
use std::fmt;

/// One reported condition, fatal or not
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Originating line, absent for run-level conditions
    pub line: Option<usize>,
    pub code: Code,
    pub message: String,
}

impl Diagnostic {
    /// Create a diagnostic tied to an input line
    pub fn at_line(line: usize, code: Code, message: impl Into<String>) -> Self {
        Self {
            line: Some(line),
            code,
            message: message.into(),
        }
    }

    /// Create a diagnostic that does not belong to any line
    pub fn run_level(code: Code, message: impl Into<String>) -> Self {
        Self {
            line: None,
            code,
            message: message.into(),
        }
    }

    /// Check if this diagnostic stops the run
    pub fn is_fatal(&self) -> bool {
        self.code.is_fatal()
    }

    /// Get category from the code registry
    pub fn category(&self) -> &'static str {
        codes::get_category(self.code.as_str())
    }

    /// Get description from the code registry
    pub fn description(&self) -> &'static str {
        codes::get_description(self.code.as_str())
    }

    /// Single-line rendering written to the error channel
    pub fn format(&self) -> String {
        self.to_string()
    }

    /// Rendering with the code, category and description, for verbose output
    pub fn format_detailed(&self) -> String {
        format!(
            "[{}] {} ({}: {})",
            self.code,
            self,
            self.category(),
            self.description()
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "Line {}: {}", line, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::codes;

    #[test]
    fn test_line_diagnostic_formatting() {
        let diagnostic = Diagnostic::at_line(
            7,
            codes::key_set::MISSING_KEY,
            "missing key \"B\".",
        );

        assert_eq!(diagnostic.format(), "Line 7: missing key \"B\".");
        assert!(!diagnostic.is_fatal());
        assert_eq!(diagnostic.category(), "KeySet");
    }

    #[test]
    fn test_run_level_formatting() {
        let diagnostic = Diagnostic::run_level(
            codes::file::OPEN_FAILURE,
            "Error opening vectors.txt: not found.",
        );

        assert_eq!(diagnostic.format(), "Error opening vectors.txt: not found.");
        assert!(diagnostic.is_fatal());
    }

    #[test]
    fn test_detailed_formatting() {
        let diagnostic = Diagnostic::at_line(
            3,
            codes::dispatch::UNKNOWN_TEST_TYPE,
            "unknown test type \"Foo\".",
        );
        let detailed = diagnostic.format_detailed();

        assert!(detailed.starts_with("[W103]"));
        assert!(detailed.contains("Line 3"));
        assert!(detailed.ends_with(&format!("(Dispatch: {})", diagnostic.description())));
    }

    #[test]
    fn test_single_line() {
        let diagnostic = Diagnostic::at_line(
            2,
            codes::verification::RESULT_MISMATCH,
            "A + B did not match Sum. Got 3",
        );
        assert!(!diagnostic.format().contains('\n'));
    }
}
