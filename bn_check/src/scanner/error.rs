//! Fatal scan errors
//!
//! Any of these stops the scan permanently. Each carries the line that was
//! being read when the problem was detected.

use crate::diagnostics::{codes, Code};

pub type ScanResult<T> = Result<T, ScanError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScanError {
    #[error("line {line}: invalid syntax")]
    InvalidSyntax { line: usize },

    #[error("line {line}: could not parse \"{value}\"")]
    InvalidValue { line: usize, value: String },

    #[error("line {line}: duplicate key \"{key}\"")]
    DuplicateKey { line: usize, key: String },

    #[error("line {line}: read failed: {message}")]
    Io { line: usize, message: String },
}

impl ScanError {
    pub fn invalid_syntax(line: usize) -> Self {
        Self::InvalidSyntax { line }
    }

    pub fn invalid_value(line: usize, value: &str) -> Self {
        Self::InvalidValue {
            line,
            value: value.to_string(),
        }
    }

    pub fn duplicate_key(line: usize, key: &str) -> Self {
        Self::DuplicateKey {
            line,
            key: key.to_string(),
        }
    }

    pub fn io(line: usize, error: &std::io::Error) -> Self {
        Self::Io {
            line,
            message: error.to_string(),
        }
    }

    /// Get diagnostic code for this error
    pub fn error_code(&self) -> Code {
        match self {
            Self::InvalidSyntax { .. } => codes::scan::INVALID_SYNTAX,
            Self::InvalidValue { .. } => codes::scan::INVALID_VALUE,
            Self::DuplicateKey { .. } => codes::scan::DUPLICATE_KEY,
            Self::Io { .. } => codes::scan::READ_FAILURE,
        }
    }

    /// Line on which the error was detected
    pub fn line(&self) -> usize {
        match self {
            Self::InvalidSyntax { line }
            | Self::InvalidValue { line, .. }
            | Self::DuplicateKey { line, .. }
            | Self::Io { line, .. } => *line,
        }
    }
}
