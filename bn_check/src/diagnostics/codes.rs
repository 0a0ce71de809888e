//! Diagnostic codes and classification
//!
//! Single source of truth for every code the checker reports, together with
//! its category, whether it halts the run, and a short description.

use std::collections::HashMap;
use std::sync::OnceLock;

/// Code wrapper shared by fatal errors and non-fatal diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }

    /// Whether a condition with this code stops the run
    pub fn is_fatal(&self) -> bool {
        is_fatal(self.0)
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Complete metadata for a code
#[derive(Debug, Clone)]
pub struct CodeMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub fatal: bool,
    pub description: &'static str,
}

impl CodeMetadata {
    pub fn new(
        code: &'static str,
        category: &'static str,
        fatal: bool,
        description: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            fatal,
            description,
        }
    }
}

/// Record scanner error codes
pub mod scan {
    use super::Code;

    pub const INVALID_SYNTAX: Code = Code::new("E001");
    pub const INVALID_VALUE: Code = Code::new("E002");
    pub const DUPLICATE_KEY: Code = Code::new("E003");
    pub const READ_FAILURE: Code = Code::new("E004");
}

/// File access error codes
pub mod file {
    use super::Code;

    pub const OPEN_FAILURE: Code = Code::new("E010");
}

/// Key set validation codes
pub mod key_set {
    use super::Code;

    pub const MISSING_KEY: Code = Code::new("W100");
    pub const UNEXPECTED_KEY: Code = Code::new("W101");
}

/// Operation verification codes
pub mod verification {
    use super::Code;

    pub const RESULT_MISMATCH: Code = Code::new("W102");
    pub const SHIFT_TOO_LARGE: Code = Code::new("W104");
    pub const DIVISION_BY_ZERO: Code = Code::new("W105");
}

/// Dispatch codes
pub mod dispatch {
    use super::Code;

    pub const UNKNOWN_TEST_TYPE: Code = Code::new("W103");
}

static CODE_REGISTRY: OnceLock<HashMap<&'static str, CodeMetadata>> = OnceLock::new();

fn get_code_registry() -> &'static HashMap<&'static str, CodeMetadata> {
    CODE_REGISTRY.get_or_init(|| {
        let entries = [
            CodeMetadata::new("E001", "Scan", true, "Attribute line has no '=' separator"),
            CodeMetadata::new("E002", "Scan", true, "Attribute value is not valid hexadecimal"),
            CodeMetadata::new("E003", "Scan", true, "Attribute key repeated within a record"),
            CodeMetadata::new("E004", "Scan", true, "Input stream could not be read"),
            CodeMetadata::new("E010", "File", true, "Test vector file could not be opened"),
            CodeMetadata::new("W100", "KeySet", false, "Required key missing from record"),
            CodeMetadata::new("W101", "KeySet", false, "Record carries a key its type does not use"),
            CodeMetadata::new("W102", "Verification", false, "Computed result differs from record"),
            CodeMetadata::new("W103", "Dispatch", false, "Record type is not a known operation"),
            CodeMetadata::new("W104", "Verification", false, "Shift amount above configured ceiling"),
            CodeMetadata::new("W105", "Verification", false, "Quotient record divides by zero"),
        ];

        entries
            .into_iter()
            .map(|metadata| (metadata.code, metadata))
            .collect()
    })
}

/// Get metadata for a specific code
pub fn get_code_metadata(code: &str) -> Option<&'static CodeMetadata> {
    get_code_registry().get(code)
}

/// Check if a code halts the run
pub fn is_fatal(code: &str) -> bool {
    get_code_registry()
        .get(code)
        .map(|metadata| metadata.fatal)
        .unwrap_or(false)
}

/// Get human-readable description for a code
pub fn get_description(code: &str) -> &'static str {
    get_code_registry()
        .get(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown code")
}

/// Get category for a code
pub fn get_category(code: &str) -> &'static str {
    get_code_registry()
        .get(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}
