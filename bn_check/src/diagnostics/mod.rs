//! Diagnostic reporting for the checker
//!
//! Diagnostics are structured values (line, code, message) handed to an
//! explicit [`Reporter`] sink. Rendering is one human-readable line each.

pub mod codes;
pub mod events;
pub mod service;

pub use codes::Code;
pub use events::Diagnostic;
pub use service::{ConsoleReporter, MemoryReporter, Reporter, TallyReporter, WriterReporter};
