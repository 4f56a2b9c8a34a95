//! Per-run diagnostics accumulator.
//!
//! One [`AnalysisContext`] is created at the start of a run and threaded by
//! reference through every extraction call. It is never a process-wide
//! singleton, so two workspaces can be analyzed concurrently in one process.

use serde::Serialize;

/// Severity of a collected diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

/// One diagnostic record, in collection order.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

/// Run-scoped diagnostics sink.
///
/// Warnings never halt a run by themselves; the caller inspects the context
/// after completion and decides whether to proceed.
#[derive(Debug, Default)]
pub struct AnalysisContext {
    diagnostics: Vec<Diagnostic>,
    fatal: bool,
}

impl AnalysisContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic {
            severity: Severity::Warning,
            message: message.into(),
            file: None,
        });
    }

    pub fn warn_file(&mut self, file: impl Into<String>, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic {
            severity: Severity::Warning,
            message: message.into(),
            file: Some(file.into()),
        });
    }

    /// Record a non-recoverable condition. The run keeps collecting
    /// diagnostics but `is_ok` reports failure.
    pub fn error(&mut self, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic {
            severity: Severity::Error,
            message: message.into(),
            file: None,
        });
        self.fatal = true;
    }

    pub fn is_ok(&self) -> bool {
        !self.fatal
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count()
    }
}
