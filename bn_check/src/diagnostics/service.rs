//! Diagnostic sinks
//!
//! Every diagnostic flows through a [`Reporter`]. The checker never writes to
//! a global stream itself, so callers decide where diagnostics end up: the
//! process error channel, any writer, or an in-memory list.

use super::codes::Code;
use super::events::Diagnostic;
use crate::config::compile_time::diagnostics::MAX_MEMORY_DIAGNOSTICS;
use std::collections::BTreeMap;
use std::io::{self, Write};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Sink for diagnostics
pub trait Reporter: Send + Sync {
    fn report(&self, diagnostic: &Diagnostic);
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Writes one line per diagnostic to the wrapped writer
pub struct WriterReporter<W: Write + Send> {
    writer: Mutex<W>,
    detailed: bool,
}

impl<W: Write + Send> WriterReporter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
            detailed: false,
        }
    }

    /// Prefix each line with its code and append category and description
    pub fn with_details(mut self, detailed: bool) -> Self {
        self.detailed = detailed;
        self
    }

    /// Recover the wrapped writer
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write + Send> Reporter for WriterReporter<W> {
    fn report(&self, diagnostic: &Diagnostic) {
        let line = if self.detailed {
            diagnostic.format_detailed()
        } else {
            diagnostic.format()
        };
        let mut writer = lock(&self.writer);
        // A broken error channel must not stop the scan
        let _ = writeln!(writer, "{}", line);
        let _ = writer.flush();
    }
}

/// Reporter bound to the process error channel
pub struct ConsoleReporter {
    inner: WriterReporter<io::Stderr>,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self {
            inner: WriterReporter::new(io::stderr()),
        }
    }

    pub fn with_details(self, detailed: bool) -> Self {
        Self {
            inner: self.inner.with_details(detailed),
        }
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for ConsoleReporter {
    fn report(&self, diagnostic: &Diagnostic) {
        self.inner.report(diagnostic);
    }
}

/// Memory reporter for testing and embedding
pub struct MemoryReporter {
    diagnostics: Mutex<Vec<Diagnostic>>,
    max_diagnostics: usize,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::with_limit(MAX_MEMORY_DIAGNOSTICS)
    }

    /// Keep at most `max_diagnostics` entries, dropping the oldest
    pub fn with_limit(max_diagnostics: usize) -> Self {
        Self {
            diagnostics: Mutex::new(Vec::new()),
            max_diagnostics: max_diagnostics.max(1),
        }
    }

    pub fn get_diagnostics(&self) -> Vec<Diagnostic> {
        lock(&self.diagnostics).clone()
    }

    /// Rendered lines, in reporting order
    pub fn lines(&self) -> Vec<String> {
        lock(&self.diagnostics)
            .iter()
            .map(Diagnostic::format)
            .collect()
    }

    pub fn diagnostic_count(&self) -> usize {
        lock(&self.diagnostics).len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.diagnostics).is_empty()
    }

    pub fn clear(&self) {
        lock(&self.diagnostics).clear();
    }

    pub fn get_diagnostics_with_code(&self, code: Code) -> Vec<Diagnostic> {
        lock(&self.diagnostics)
            .iter()
            .filter(|d| d.code == code)
            .cloned()
            .collect()
    }

    pub fn has_code(&self, code: Code) -> bool {
        lock(&self.diagnostics).iter().any(|d| d.code == code)
    }
}

impl Default for MemoryReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for MemoryReporter {
    fn report(&self, diagnostic: &Diagnostic) {
        let mut diagnostics = lock(&self.diagnostics);

        if diagnostics.len() >= self.max_diagnostics {
            let remove_count = diagnostics.len() - self.max_diagnostics + 1;
            diagnostics.drain(0..remove_count);
        }

        diagnostics.push(diagnostic.clone());
    }
}

/// Forwards to another reporter while counting diagnostics per code
pub struct TallyReporter<'a> {
    inner: &'a dyn Reporter,
    counts: Mutex<BTreeMap<Code, usize>>,
}

impl<'a> TallyReporter<'a> {
    pub fn new(inner: &'a dyn Reporter) -> Self {
        Self {
            inner,
            counts: Mutex::new(BTreeMap::new()),
        }
    }

    pub fn count(&self, code: Code) -> usize {
        lock(&self.counts).get(&code).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        lock(&self.counts).values().sum()
    }

    /// Number of diagnostics that did not stop the run
    pub fn non_fatal_total(&self) -> usize {
        lock(&self.counts)
            .iter()
            .filter(|(code, _)| !code.is_fatal())
            .map(|(_, count)| count)
            .sum()
    }

    /// Counts keyed by code string, in code order
    pub fn counts(&self) -> BTreeMap<String, usize> {
        lock(&self.counts)
            .iter()
            .map(|(code, count)| (code.as_str().to_string(), *count))
            .collect()
    }
}

impl Reporter for TallyReporter<'_> {
    fn report(&self, diagnostic: &Diagnostic) {
        *lock(&self.counts).entry(diagnostic.code).or_insert(0) += 1;
        self.inner.report(diagnostic);
    }
}
