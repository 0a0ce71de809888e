// Internal modules
pub mod config;
pub mod diagnostics;
pub mod file_processor;
pub mod pipeline;
pub mod scanner;
pub mod verification;

// Re-export key types for library consumers
pub use config::CheckPreferences;
pub use diagnostics::{Code, ConsoleReporter, Diagnostic, MemoryReporter, Reporter};
pub use pipeline::{check_file, check_reader, PipelineError, RunSummary};
pub use scanner::{Record, RecordScanner, ScanError};
pub use verification::{Operation, Verdict, Verifier};
