use super::RunSummary;
use crate::diagnostics::Code;
use crate::file_processor::FileProcessorError;
use crate::scanner::ScanError;

/// Pipeline processing errors
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("File processing failed: {0}")]
    File(#[from] FileProcessorError),

    /// Scanning stopped early; `summary` covers the records checked before the failure
    #[error("Scan failed: {error}")]
    Scan {
        error: ScanError,
        summary: Box<RunSummary>,
    },
}

impl PipelineError {
    pub fn error_code(&self) -> Code {
        match self {
            Self::File(error) => error.error_code(),
            Self::Scan { error, .. } => error.error_code(),
        }
    }

    /// Partial summary, if any records were reached before the failure
    pub fn summary(&self) -> Option<&RunSummary> {
        match self {
            Self::File(_) => None,
            Self::Scan { summary, .. } => Some(summary),
        }
    }
}
